//! Run-time errors of the machine.
//!
//! Each fault corresponds to a C-INTERCAL error, and carries the
//! number and the (traditional) message of that error, so that a
//! failing program reports itself in the same way under the machine as
//! it would when compiled with `ick`.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use base::prelude::Label;

/// The maximum depth of the NEXT stack.
pub const NEXT_STACK_LIMIT: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// A statement the machine cannot execute, such as reading the
    /// value of a whole tail.
    Unsupported(String),
    /// Too few of the statements in the program say PLEASE.
    InsufficientlyPolite,
    /// Too many of the statements in the program say PLEASE.
    OverlyPolite,
    /// A NEXT would make the NEXT stack deeper than
    /// [`NEXT_STACK_LIMIT`].
    TooManyNexts,
    /// A NEXT to a label which isn't in the program.
    UndefinedLabel(Label),
    /// Two statements carry the same label.
    DuplicateLabel(Label),
    /// A tail was given the dimension 0.
    ZeroDimension,
    /// A subscript was outside the dimension of the tail (or the tail
    /// has no dimension yet).
    SubscriptOutOfRange { tail: u16, index: u32 },
    /// A value too large for a 16-bit location.
    ValueTooLarge(u32),
    /// A mingle operand which doesn't fit in 16 bits.
    MingleOperandTooLarge(u32),
    /// Input was needed at the end of the input stream.
    EndOfInput,
    /// A word in a number read in was not a digit.
    NotADigit(String),
    /// `RESUME #0`.
    ResumeZero,
    /// A RESUME of more entries than there are on the NEXT stack.
    NextStackRupture,
    /// Control ran past the last statement.
    FellOffTheEdge,
    /// The run went on for longer than the machine was configured to
    /// allow.
    StepLimit(u64),
}

impl Fault {
    /// The number of the corresponding C-INTERCAL error.  Faults
    /// peculiar to the machine have none.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Fault::Unsupported(_) => Some(0),
            Fault::InsufficientlyPolite => Some(79),
            Fault::OverlyPolite => Some(99),
            Fault::TooManyNexts => Some(123),
            Fault::UndefinedLabel(_) => Some(129),
            Fault::DuplicateLabel(_) => Some(182),
            Fault::ZeroDimension => Some(240),
            Fault::SubscriptOutOfRange { .. } => Some(241),
            Fault::ValueTooLarge(_) => Some(275),
            Fault::MingleOperandTooLarge(_) => Some(533),
            Fault::EndOfInput => Some(562),
            Fault::NotADigit(_) => Some(579),
            Fault::ResumeZero => Some(621),
            Fault::NextStackRupture => Some(632),
            Fault::FellOffTheEdge => Some(633),
            Fault::StepLimit(_) => None,
        }
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        if let Some(code) = self.code() {
            write!(f, "ICL{code:03}I\t")?;
        }
        match self {
            Fault::Unsupported(what) => write!(f, "UNSUPPORTED STATEMENT: {what}"),
            Fault::InsufficientlyPolite => f.write_str("PROGRAMMER IS INSUFFICIENTLY POLITE"),
            Fault::OverlyPolite => f.write_str("PROGRAMMER IS OVERLY POLITE"),
            Fault::TooManyNexts => f.write_str("PROGRAM HAS DISAPPEARED INTO THE BLACK LAGOON"),
            Fault::UndefinedLabel(label) => {
                write!(f, "PROGRAM HAS GOTTEN LOST ON THE WAY TO {label}")
            }
            Fault::DuplicateLabel(label) => {
                write!(f, "YOU MUST LIKE THIS LABEL A LOT! {label}")
            }
            Fault::ZeroDimension => f.write_str("ERROR HANDLER PRINTED SNIDE REMARK"),
            Fault::SubscriptOutOfRange { tail, index } => write!(
                f,
                "VARIABLES MAY NOT BE STORED IN WEST HYPERSPACE (,{tail}SUB#{index})"
            ),
            Fault::ValueTooLarge(value) => {
                write!(f, "DON'T BYTE OFF MORE THAN YOU CAN CHEW ({value})")
            }
            Fault::MingleOperandTooLarge(value) => {
                write!(f, "YOU WANTED MAYBE A LONG LONG? ({value})")
            }
            Fault::EndOfInput => f.write_str("I DO NOT COMPUTE"),
            Fault::NotADigit(word) => {
                write!(f, "WHAT BASE AND/OR LANGUAGE INCLUDES {word}?")
            }
            Fault::ResumeZero => f.write_str("ERROR TYPE 621 ENCOUNTERED"),
            Fault::NextStackRupture => {
                f.write_str("THE NEXT STACK RUPTURES.  ALL DIE.  OH, THE EMBARRASSMENT!")
            }
            Fault::FellOffTheEdge => f.write_str("PROGRAM FELL OFF THE EDGE"),
            Fault::StepLimit(steps) => write!(f, "PROGRAM WAS STOPPED AFTER {steps} STEPS"),
        }
    }
}

impl Error for Fault {}

#[test]
fn test_fault_codes() {
    assert_eq!(Fault::TooManyNexts.code(), Some(123));
    assert_eq!(Fault::UndefinedLabel(Label::new(4)).code(), Some(129));
    assert_eq!(Fault::FellOffTheEdge.code(), Some(633));
    assert_eq!(Fault::StepLimit(10).code(), None);
}

#[test]
fn test_fault_display() {
    assert_eq!(
        Fault::ResumeZero.to_string(),
        "ICL621I\tERROR TYPE 621 ENCOUNTERED"
    );
    assert_eq!(
        Fault::UndefinedLabel(Label::new(7)).to_string(),
        "ICL129I\tPROGRAM HAS GOTTEN LOST ON THE WAY TO (7)"
    );
    assert_eq!(
        Fault::StepLimit(5).to_string(),
        "PROGRAM WAS STOPPED AFTER 5 STEPS"
    );
}
