//! INTERCAL expressions.
//!
//! The language has only five operators: the binary "mingle" (`$`,
//! which interleaves the bits of its operands) and "select" (`~`,
//! which extracts the bits of its left operand picked out by the
//! ones in its right operand and packs them to the right), and the
//! unary AND, OR and XOR operators, each of which combines a value
//! with itself rotated right by one bit.
//!
//! Everything else (two-operand bitwise operations, shifts,
//! comparisons) is built out of those five when the expression is
//! constructed.  So an [`Expr`] tree only ever contains the native
//! operators, and rendering it (see [`crate::group`]) is a direct
//! walk over the tree.
//!
//! Expressions are immutable values.  Building one has no effect on
//! the program being generated; only attaching it to a statement
//! does.
use super::names::Reference;

/// The mask `#0$#65535`, which picks out the even-numbered bits of a
/// mingled value.  Applied after a unary operator on `x$y` it yields
/// the bitwise combination of `x` and `y`.
const EVEN_BITS: (u16, u16) = (0, 0xFFFF);

/// The mask `#32767$#1`.  Selecting `(x$#0)` through it yields a zero
/// bit followed by bits 0..=14 of `x`, which is `x` shifted left by
/// one place (modulo 2^16).
const SHIFT_LEFT_ONE: (u16, u16) = (0x7FFF, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mingle,
    Select,
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Mingle => "$",
            BinaryOp::Select => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    And,
    Or,
    Xor,
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::And => "&",
            UnaryOp::Or => "V",
            UnaryOp::Xor => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A 16-bit constant, written `#N`.
    Constant(u16),
    /// A whole variable: the value of a spot, or (as the target of an
    /// assignment) the dimension of a tail.
    Variable(Reference),
    /// One element of a tail.  Build these with [`Reference::index`].
    Subscript { array: Reference, index: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
}

impl From<u16> for Expr {
    fn from(value: u16) -> Expr {
        Expr::Constant(value)
    }
}

impl From<Reference> for Expr {
    fn from(reference: Reference) -> Expr {
        Expr::Variable(reference)
    }
}

impl From<&Reference> for Expr {
    fn from(reference: &Reference) -> Expr {
        Expr::Variable(*reference)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Expr {
        expr.clone()
    }
}

impl Expr {
    fn binary<R: Into<Expr>>(self, op: BinaryOp, right: R) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    fn unary(self, op: UnaryOp) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(self),
        }
    }

    fn mask((high, low): (u16, u16)) -> Expr {
        Expr::Constant(high).mingle(low)
    }

    /// Interleave the bits of `self` and `other` (`self$other`).  The
    /// bits of `self` land in the odd-numbered positions of the 32-bit
    /// result.
    #[must_use]
    pub fn mingle<R: Into<Expr>>(self, other: R) -> Expr {
        self.binary(BinaryOp::Mingle, other)
    }

    /// Select the bits of `self` where `mask` has ones (`self~mask`).
    #[must_use]
    pub fn select<R: Into<Expr>>(self, mask: R) -> Expr {
        self.binary(BinaryOp::Select, mask)
    }

    #[must_use]
    pub fn self_and(self) -> Expr {
        self.unary(UnaryOp::And)
    }

    #[must_use]
    pub fn self_or(self) -> Expr {
        self.unary(UnaryOp::Or)
    }

    #[must_use]
    pub fn self_xor(self) -> Expr {
        self.unary(UnaryOp::Xor)
    }

    fn bitwise<R: Into<Expr>>(self, other: R, op: UnaryOp) -> Expr {
        self.mingle(other).unary(op).select(Expr::mask(EVEN_BITS))
    }

    /// Bitwise AND of two 16-bit values.
    #[must_use]
    pub fn and<R: Into<Expr>>(self, other: R) -> Expr {
        self.bitwise(other, UnaryOp::And)
    }

    /// Bitwise OR of two 16-bit values.
    #[must_use]
    pub fn or<R: Into<Expr>>(self, other: R) -> Expr {
        self.bitwise(other, UnaryOp::Or)
    }

    /// Bitwise XOR of two 16-bit values.
    #[must_use]
    pub fn xor<R: Into<Expr>>(self, other: R) -> Expr {
        self.bitwise(other, UnaryOp::Xor)
    }

    /// Logical negation; only meaningful for the truth values 0 and 1.
    #[must_use]
    pub fn not(self) -> Expr {
        self.xor(1)
    }

    /// 1 if the values differ, otherwise 0.
    #[must_use]
    pub fn not_equal<R: Into<Expr>>(self, other: R) -> Expr {
        Expr::Constant(0xFFFF).select(self.xor(other)).select(1)
    }

    /// 1 if the values are the same, otherwise 0.
    #[must_use]
    pub fn equal<R: Into<Expr>>(self, other: R) -> Expr {
        self.not_equal(other).not()
    }

    /// Shift left by a constant number of places, discarding bits
    /// shifted out of the top of the 16-bit value.  Each place is a
    /// separate mingle-and-select, so the expression grows linearly
    /// with `places`.
    #[must_use]
    pub fn shift_left(self, places: u32) -> Expr {
        (0..places).fold(self, |value, _| {
            value.mingle(0).select(Expr::mask(SHIFT_LEFT_ONE))
        })
    }

    /// Shift right by a constant number of places.
    #[must_use]
    pub fn shift_right(self, places: u32) -> Expr {
        let mask: u16 = 0xFFFF_u16.checked_shl(places).unwrap_or(0);
        self.select(Expr::Constant(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mingle_builds_binary_node() {
        let e = Expr::from(5).mingle(10);
        assert_eq!(
            e,
            Expr::Binary {
                op: BinaryOp::Mingle,
                left: Box::new(Expr::Constant(5)),
                right: Box::new(Expr::Constant(10)),
            }
        );
    }

    #[test]
    fn test_and_uses_even_bit_mask() {
        let x = Reference::spot(10);
        let e = Expr::from(x).and(1);
        assert_eq!(
            e,
            Expr::from(x)
                .mingle(1)
                .self_and()
                .select(Expr::Constant(0).mingle(0xFFFF))
        );
    }

    #[test]
    fn test_not_is_xor_with_one() {
        let x = Reference::spot(10);
        assert_eq!(Expr::from(x).not(), Expr::from(x).xor(1));
    }

    #[test]
    fn test_shift_left_zero_places_is_identity() {
        let x = Reference::spot(12);
        assert_eq!(Expr::from(x).shift_left(0), Expr::from(x));
    }

    #[test]
    fn test_shift_left_nests_once_per_place() {
        let x = Expr::from(Reference::spot(12));
        let once = x.clone().mingle(0).select(Expr::Constant(0x7FFF).mingle(1));
        assert_eq!(x.clone().shift_left(1), once);
        assert_eq!(x.clone().shift_left(3), once.shift_left(2));
    }

    #[test]
    fn test_shift_right_mask() {
        let x = Expr::from(Reference::spot(12));
        assert_eq!(
            x.clone().shift_right(5),
            x.clone().select(Expr::Constant(0xFFE0))
        );
        assert_eq!(x.clone().shift_right(16), x.select(Expr::Constant(0)));
    }
}
