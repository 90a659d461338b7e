//! Values and the native INTERCAL operators.
//!
//! INTERCAL has 16-bit and 32-bit values.  Constants and spots are
//! 16 bits wide; mingling two 16-bit values produces a 32-bit one.
//! The width matters for the unary operators, which rotate their
//! operand within its own width.

#[cfg(test)]
use test_strategy::Arbitrary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Width {
    Sixteen,
    ThirtyTwo,
}

impl Width {
    #[must_use]
    pub const fn bits(&self) -> u32 {
        match self {
            Width::Sixteen => 16,
            Width::ThirtyTwo => 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value {
    bits: u32,
    width: Width,
}

impl From<u16> for Value {
    fn from(n: u16) -> Value {
        Value {
            bits: u32::from(n),
            width: Width::Sixteen,
        }
    }
}

impl Value {
    #[must_use]
    pub const fn thirty_two(bits: u32) -> Value {
        Value {
            bits,
            width: Width::ThirtyTwo,
        }
    }

    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    #[must_use]
    pub const fn width(&self) -> Width {
        self.width
    }

    /// Returns the value as a 16-bit quantity, if it fits.  A 32-bit
    /// value whose upper half is zero fits.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        u16::try_from(self.bits).ok()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bits == 0
    }

    /// Rotate right by one place, within the width of the value.
    fn rotate_right_one(&self) -> u32 {
        match self.width {
            Width::Sixteen => {
                let low = self.bits & 0xFFFF;
                (low >> 1) | ((low & 1) << 15)
            }
            Width::ThirtyTwo => self.bits.rotate_right(1),
        }
    }

    #[must_use]
    pub fn unary_and(&self) -> Value {
        Value {
            bits: self.bits & self.rotate_right_one(),
            width: self.width,
        }
    }

    #[must_use]
    pub fn unary_or(&self) -> Value {
        Value {
            bits: self.bits | self.rotate_right_one(),
            width: self.width,
        }
    }

    #[must_use]
    pub fn unary_xor(&self) -> Value {
        Value {
            bits: self.bits ^ self.rotate_right_one(),
            width: self.width,
        }
    }

    /// The select operator.  The result has the width of the mask.
    #[must_use]
    pub fn select(&self, mask: Value) -> Value {
        Value {
            bits: select(self.bits, mask.bits),
            width: mask.width,
        }
    }
}

/// Interleave the bits of `high` and `low`.  Bit `i` of `high` becomes
/// bit `2i+1` of the result and bit `i` of `low` becomes bit `2i`.
#[must_use]
pub fn mingle(high: u16, low: u16) -> u32 {
    (0..16).fold(0_u32, |acc, i| {
        let h = (u32::from(high) >> i) & 1;
        let l = (u32::from(low) >> i) & 1;
        acc | (h << (2 * i + 1)) | (l << (2 * i))
    })
}

/// Take the bits of `value` at the positions where `mask` has ones,
/// and pack them (in order) into the low end of the result.
#[must_use]
pub fn select(value: u32, mask: u32) -> u32 {
    let mut result: u32 = 0;
    let mut out_bit: u32 = 0;
    for i in 0..32 {
        if (mask >> i) & 1 != 0 {
            result |= ((value >> i) & 1) << out_bit;
            out_bit += 1;
        }
    }
    result
}

/// Reverse the order of the bits in a byte, by swapping nybbles, then
/// bit pairs, then adjacent bits.
#[must_use]
pub const fn reverse_bits(byte: u8) -> u8 {
    let mut value = byte;
    value = ((value & 0b0000_1111) << 4) | ((value & 0b1111_0000) >> 4);
    value = ((value & 0b0011_0011) << 2) | ((value & 0b1100_1100) >> 2);
    value = ((value & 0b0101_0101) << 1) | ((value & 0b1010_1010) >> 1);
    value
}
