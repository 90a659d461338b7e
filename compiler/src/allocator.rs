//! Allocation of fresh labels and variable names.
use tracing::{event, Level};

use base::prelude::{ConstructionError, Kind, Label, Reference};

/// Variable names below this one are left for the standard library
/// (which uses `.1` to `.6` and others for its arguments and
/// results).
pub const FIRST_VARIABLE: u16 = 10;

pub const FIRST_LABEL: u16 = 1;

/// Labels in this range belong to the system library.  We never
/// allocate them.
pub const FIRST_LIBRARY_LABEL: u16 = 1000;
pub const LAST_LIBRARY_LABEL: u16 = 1999;

/// Hands out names which are never reused within a session.  Spots
/// and tails share a single sequence of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAllocator {
    // None once the last name has been handed out.
    next_label: Option<u16>,
    next_variable: Option<u16>,
}

impl Default for NameAllocator {
    fn default() -> NameAllocator {
        NameAllocator {
            next_label: Some(FIRST_LABEL),
            next_variable: Some(FIRST_VARIABLE),
        }
    }
}

impl NameAllocator {
    #[must_use]
    pub fn new() -> NameAllocator {
        NameAllocator::default()
    }

    /// # Errors
    ///
    /// Fails once every permitted label number has been issued.
    pub fn label(&mut self) -> Result<Label, ConstructionError> {
        let number = self.next_label.ok_or(ConstructionError::LabelsExhausted)?;
        self.next_label = number.checked_add(1).map(|n| {
            if (FIRST_LIBRARY_LABEL..=LAST_LIBRARY_LABEL).contains(&n) {
                LAST_LIBRARY_LABEL + 1
            } else {
                n
            }
        });
        Ok(Label::new(number))
    }

    /// Allocate several labels at once.
    ///
    /// # Errors
    ///
    /// Fails once every permitted label number has been issued.
    pub fn labels<const N: usize>(&mut self) -> Result<[Label; N], ConstructionError> {
        let mut labels = [Label::new(0); N];
        for slot in &mut labels {
            *slot = self.label()?;
        }
        event!(Level::DEBUG, "allocated labels {labels:?}");
        Ok(labels)
    }

    /// # Errors
    ///
    /// Fails once all 65535 variable names have been issued.
    pub fn variable(&mut self, kind: Kind) -> Result<Reference, ConstructionError> {
        let name = self
            .next_variable
            .ok_or(ConstructionError::NamesExhausted)?;
        self.next_variable = name.checked_add(1);
        Ok(Reference::new(kind, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_start_above_library_cells() {
        let mut names = NameAllocator::new();
        assert_eq!(names.variable(Kind::Spot), Ok(Reference::spot(10)));
        assert_eq!(names.variable(Kind::Tail), Ok(Reference::tail(11)));
        assert_eq!(names.variable(Kind::Spot), Ok(Reference::spot(12)));
    }

    #[test]
    fn test_labels_start_at_one() {
        let mut names = NameAllocator::new();
        assert_eq!(
            names.labels::<3>(),
            Ok([Label::new(1), Label::new(2), Label::new(3)])
        );
    }

    #[test]
    fn test_labels_skip_library_range() {
        let mut names = NameAllocator {
            next_label: Some(998),
            next_variable: Some(FIRST_VARIABLE),
        };
        assert_eq!(names.label(), Ok(Label::new(998)));
        assert_eq!(names.label(), Ok(Label::new(999)));
        assert_eq!(names.label(), Ok(Label::new(2000)));
    }

    #[test]
    fn test_label_exhaustion() {
        let mut names = NameAllocator {
            next_label: Some(u16::MAX),
            next_variable: Some(FIRST_VARIABLE),
        };
        assert_eq!(names.label(), Ok(Label::new(u16::MAX)));
        assert_eq!(names.label(), Err(ConstructionError::LabelsExhausted));
    }

    #[test]
    fn test_variable_exhaustion() {
        let mut names = NameAllocator {
            next_label: Some(FIRST_LABEL),
            next_variable: Some(u16::MAX),
        };
        assert_eq!(names.variable(Kind::Spot), Ok(Reference::spot(u16::MAX)));
        assert_eq!(
            names.variable(Kind::Tail),
            Err(ConstructionError::NamesExhausted)
        );
    }
}
