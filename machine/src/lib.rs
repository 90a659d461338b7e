//! This crate executes INTERCAL programs, as produced by the
//! `compiler` crate, without needing the C-INTERCAL toolchain.  It is
//! used to check the behaviour of generated code.
#![crate_name = "machine"]

mod alarm;
mod control;
mod io;
mod memory;

pub use alarm::{Fault, NEXT_STACK_LIMIT};
pub use control::{run, Execution, Machine, DEFAULT_STEP_LIMIT};
pub use io::{numeral_lines, roman, END_OF_INPUT};
