//! Calls into the C-INTERCAL system library.
//!
//! The system library routines take their arguments in `.1` and `.2`
//! and leave their result in `.3`.  They are entered with NEXT and
//! return with `RESUME #1`, so a call leaves the NEXT stack unchanged.
use base::prelude::{Expr, Label, Reference};

use super::session::Session;

/// `.3 <- .1 + .2`, modulo 2^16.
pub const ADD: Label = Label::new(1009);
/// `.3 <- .1 - .2`, modulo 2^16.
pub const SUBTRACT: Label = Label::new(1010);

pub const FIRST_OPERAND: Reference = Reference::spot(1);
pub const SECOND_OPERAND: Reference = Reference::spot(2);
pub const RESULT: Reference = Reference::spot(3);

impl Session {
    fn library_call<D, X, Y>(&mut self, routine: Label, destination: D, x: X, y: Y)
    where
        D: Into<Expr>,
        X: Into<Expr>,
        Y: Into<Expr>,
    {
        self.assign(FIRST_OPERAND, x);
        self.assign(SECOND_OPERAND, y);
        self.jump_pushing_return(routine);
        self.assign(destination, RESULT);
    }

    /// `destination <- x + y` (wrapping), via the system library.
    /// The destination may be one of the operands.
    pub fn add<D, X, Y>(&mut self, destination: D, x: X, y: Y)
    where
        D: Into<Expr>,
        X: Into<Expr>,
        Y: Into<Expr>,
    {
        self.library_call(ADD, destination, x, y);
    }

    /// `destination <- x - y` (wrapping), via the system library.
    pub fn subtract<D, X, Y>(&mut self, destination: D, x: X, y: Y)
    where
        D: Into<Expr>,
        X: Into<Expr>,
        Y: Into<Expr>,
    {
        self.library_call(SUBTRACT, destination, x, y);
    }
}
