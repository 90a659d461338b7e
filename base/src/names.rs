//! Names of INTERCAL storage cells and statement labels.
//!
//! INTERCAL identifies both variables and statement labels by
//! numbers in the range 1..=65535.  A variable name is preceded by a
//! sigil which determines its kind: a "spot" (`.`) is a 16-bit
//! scalar and a "tail" (`,`) is an array of 16-bit values.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use super::expr::Expr;

/// A statement label.  Displays in the form used by the source
/// language, for example `(1009)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u16);

impl Label {
    #[must_use]
    pub const fn new(number: u16) -> Label {
        Label(number)
    }

    #[must_use]
    pub const fn number(&self) -> u16 {
        self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// A 16-bit scalar variable.
    Spot,
    /// An array of 16-bit values.
    Tail,
}

impl Kind {
    #[must_use]
    pub const fn sigil(&self) -> char {
        match self {
            Kind::Spot => '.',
            Kind::Tail => ',',
        }
    }
}

/// A named storage cell.
///
/// References are plain values; creating one does not emit anything.
/// Fresh names are handed out by the compiler's allocator, while the
/// fixed cells of the standard library ABI are built with
/// [`Reference::spot`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    kind: Kind,
    name: u16,
}

impl Reference {
    #[must_use]
    pub const fn new(kind: Kind, name: u16) -> Reference {
        Reference { kind, name }
    }

    #[must_use]
    pub const fn spot(name: u16) -> Reference {
        Reference::new(Kind::Spot, name)
    }

    #[must_use]
    pub const fn tail(name: u16) -> Reference {
        Reference::new(Kind::Tail, name)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> u16 {
        self.name
    }

    /// Build the expression for one element of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`ConstructionError::NotAnArray`] when `self` is a
    /// spot; only tails can be subscripted.
    pub fn index<E: Into<Expr>>(&self, index: E) -> Result<Expr, ConstructionError> {
        match self.kind {
            Kind::Tail => Ok(Expr::Subscript {
                array: *self,
                index: Box::new(index.into()),
            }),
            Kind::Spot => Err(ConstructionError::NotAnArray(*self)),
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.sigil(), self.name)
    }
}

/// Signals a malformed program construction.  These are mistakes in
/// the code which builds the program, not run-time failures of the
/// generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// A spot was subscripted.
    NotAnArray(Reference),
    /// There are no more variable names available in this session.
    NamesExhausted,
    /// There are no more statement labels available in this session.
    LabelsExhausted,
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::NotAnArray(reference) => {
                write!(f, "{reference} is not an array and cannot be subscripted")
            }
            ConstructionError::NamesExhausted => {
                f.write_str("all 65535 variable names have already been allocated")
            }
            ConstructionError::LabelsExhausted => {
                f.write_str("all available statement labels have already been allocated")
            }
        }
    }
}

impl Error for ConstructionError {}

#[test]
fn test_label_display() {
    assert_eq!(Label::new(7).to_string(), "(7)");
    assert_eq!(Label::new(1009).to_string(), "(1009)");
}

#[test]
fn test_reference_display() {
    assert_eq!(Reference::spot(10).to_string(), ".10");
    assert_eq!(Reference::tail(12).to_string(), ",12");
}

#[test]
fn test_spot_cannot_be_indexed() {
    let spot = Reference::spot(3);
    assert_eq!(spot.index(1), Err(ConstructionError::NotAnArray(spot)));
}

#[test]
fn test_tail_can_be_indexed() {
    let tail = Reference::tail(11);
    match tail.index(2) {
        Ok(Expr::Subscript { array, index }) => {
            assert_eq!(array, tail);
            assert_eq!(*index, Expr::Constant(2));
        }
        other => {
            panic!("expected a subscript expression, got {other:?}");
        }
    }
}
