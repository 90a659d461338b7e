//! The prelude exports the types which are needed to build and
//! inspect INTERCAL programs.  Providing this prelude is the main
//! purpose of the base crate.
pub use super::expr::{BinaryOp, Expr, UnaryOp};
pub use super::group::Group;
pub use super::names::{ConstructionError, Kind, Label, Reference};
pub use super::outcome::Outcome;
pub use super::statement::{Command, Politeness, Statement};
pub use super::word::{reverse_bits, Value, Width};
