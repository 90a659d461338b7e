//! Storage for spots and tails.
//!
//! Every spot exists from the start of the run, with the value 0.  A
//! tail has no elements until it is dimensioned (using one before then
//! is E241); dimensioning it again discards its old contents.
use std::collections::HashMap;

use super::alarm::Fault;

#[derive(Debug, Default)]
pub struct Memory {
    spots: HashMap<u16, u16>,
    tails: HashMap<u16, Vec<u16>>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Memory {
        Memory::default()
    }

    #[must_use]
    pub fn spot(&self, name: u16) -> u16 {
        self.spots.get(&name).copied().unwrap_or(0)
    }

    pub fn set_spot(&mut self, name: u16, value: u16) {
        self.spots.insert(name, value);
    }

    /// # Errors
    ///
    /// Fails with [`Fault::ZeroDimension`] if `dimension` is 0.
    pub fn dimension(&mut self, name: u16, dimension: u16) -> Result<(), Fault> {
        if dimension == 0 {
            return Err(Fault::ZeroDimension);
        }
        self.tails.insert(name, vec![0; usize::from(dimension)]);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if the tail has not been dimensioned.
    pub fn elements(&self, name: u16) -> Result<&[u16], Fault> {
        self.tails
            .get(&name)
            .map(Vec::as_slice)
            .ok_or(Fault::SubscriptOutOfRange {
                tail: name,
                index: 1,
            })
    }

    /// # Errors
    ///
    /// Fails if the tail has not been dimensioned.
    pub fn elements_mut(&mut self, name: u16) -> Result<&mut [u16], Fault> {
        self.tails
            .get_mut(&name)
            .map(Vec::as_mut_slice)
            .ok_or(Fault::SubscriptOutOfRange {
                tail: name,
                index: 1,
            })
    }

    fn position(name: u16, index: u32) -> Result<usize, Fault> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .ok_or(Fault::SubscriptOutOfRange { tail: name, index })
    }

    /// Fetch an element of a tail.  Subscripts start at 1.
    ///
    /// # Errors
    ///
    /// Fails if the subscript is outside the dimension of the tail.
    pub fn element(&self, name: u16, index: u32) -> Result<u16, Fault> {
        let position = Memory::position(name, index)?;
        self.elements(name)?
            .get(position)
            .copied()
            .ok_or(Fault::SubscriptOutOfRange { tail: name, index })
    }

    /// # Errors
    ///
    /// Fails if the subscript is outside the dimension of the tail.
    pub fn set_element(&mut self, name: u16, index: u32, value: u16) -> Result<(), Fault> {
        let position = Memory::position(name, index)?;
        match self
            .tails
            .get_mut(&name)
            .and_then(|elements| elements.get_mut(position))
        {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Fault::SubscriptOutOfRange { tail: name, index }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spots_start_at_zero() {
        let mut memory = Memory::new();
        assert_eq!(memory.spot(10), 0);
        memory.set_spot(10, 231);
        assert_eq!(memory.spot(10), 231);
        assert_eq!(memory.spot(11), 0);
    }

    #[test]
    fn test_subscripts_start_at_one() {
        let mut memory = Memory::new();
        memory.dimension(12, 3).expect("non-zero dimension");
        memory.set_element(12, 1, 5).expect("in range");
        memory.set_element(12, 3, 7).expect("in range");
        assert_eq!(memory.elements(12), Ok(&[5, 0, 7][..]));
        assert_eq!(
            memory.element(12, 0),
            Err(Fault::SubscriptOutOfRange { tail: 12, index: 0 })
        );
        assert_eq!(
            memory.element(12, 4),
            Err(Fault::SubscriptOutOfRange { tail: 12, index: 4 })
        );
    }

    #[test]
    fn test_undimensioned_tail() {
        let mut memory = Memory::new();
        let fault = Fault::SubscriptOutOfRange { tail: 3, index: 1 };
        assert_eq!(memory.elements(3), Err(fault.clone()));
        assert_eq!(memory.element(3, 1), Err(fault.clone()));
        assert_eq!(memory.elements_mut(3).err(), Some(fault));
    }

    #[test]
    fn test_redimension_clears() {
        let mut memory = Memory::new();
        memory.dimension(12, 2).expect("non-zero dimension");
        memory.set_element(12, 2, 9).expect("in range");
        memory.dimension(12, 2).expect("non-zero dimension");
        assert_eq!(memory.elements(12), Ok(&[0, 0][..]));
        assert_eq!(memory.dimension(12, 0), Err(Fault::ZeroDimension));
    }
}
