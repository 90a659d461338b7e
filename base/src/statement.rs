//! INTERCAL statements and their source form.
//!
//! A statement is one line of the program:
//!
//! ```text
//! (12) PLEASE .10 <- #13
//!      DO READ OUT .10
//!  (3) DON'T GIVE UP
//! ```
//!
//! The label field is right-justified in four columns (and blank if
//! there is no label).  It is followed by the politeness word, which
//! is chosen by the code generator when the statement is emitted, and
//! then the command.
use std::fmt::{self, Display, Formatter};

use super::expr::Expr;
use super::group::Group;
use super::names::Label;

/// The width of the label field (which is followed by a space).
const LABEL_FIELD_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// `DO`
    Terse,
    /// `PLEASE`
    Polite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `target <- value`.  The target is a spot, an element of a
    /// tail, or a whole tail (in which case the value is the new
    /// dimension of the array).
    Assign { target: Expr, value: Expr },
    /// `WRITE IN target`: input to a variable.  For a whole tail
    /// this reads binary data, otherwise a spelled-out number.
    WriteIn(Expr),
    /// `READ OUT value`: output.  For a whole tail this writes binary
    /// data, otherwise a Roman numeral.
    ReadOut(Expr),
    /// `(label) NEXT`: push the address of the following statement
    /// onto the NEXT stack, then jump to the label.
    Next(Label),
    /// `RESUME n`: pop n entries from the NEXT stack, and jump to the
    /// last of them.
    Resume(Expr),
    /// `FORGET n`: discard n entries from the NEXT stack.
    Forget(Expr),
    /// `DON'T GIVE UP`: a statement which does nothing, used to carry
    /// a label.
    Nop,
    /// `GIVE UP`: end the program.
    GiveUp,
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let plain = |e: &Expr| e.render(Group::Plain);
        match self {
            Command::Assign { target, value } => {
                write!(f, "{} <- {}", plain(target), plain(value))
            }
            Command::WriteIn(target) => write!(f, "WRITE IN {}", plain(target)),
            Command::ReadOut(value) => write!(f, "READ OUT {}", plain(value)),
            Command::Next(label) => write!(f, "{label} NEXT"),
            Command::Resume(count) => write!(f, "RESUME {}", plain(count)),
            Command::Forget(count) => write!(f, "FORGET {}", plain(count)),
            Command::Nop => f.write_str("DON'T GIVE UP"),
            Command::GiveUp => f.write_str("GIVE UP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub label: Option<Label>,
    pub politeness: Politeness,
    pub command: Command,
}

impl Statement {
    /// The word which introduces the command.  `DON'T` already
    /// contains the "DO", so a terse no-op has no separate word.
    fn introduction(&self) -> &'static str {
        match (self.politeness, &self.command) {
            (Politeness::Polite, _) => "PLEASE ",
            (Politeness::Terse, Command::Nop) => "",
            (Politeness::Terse, _) => "DO ",
        }
    }
}

/// Displays a whole source line, without the trailing newline.
impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label: String = match self.label {
            Some(label) => label.to_string(),
            None => String::new(),
        };
        write!(
            f,
            "{label:>width$} {}{}",
            self.introduction(),
            self.command,
            width = LABEL_FIELD_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::Reference;

    fn terse(command: Command) -> Statement {
        Statement {
            label: None,
            politeness: Politeness::Terse,
            command,
        }
    }

    #[test]
    fn test_assign_line() {
        let s = terse(Command::Assign {
            target: Reference::spot(10).into(),
            value: Expr::Constant(13),
        });
        assert_eq!(s.to_string(), "     DO .10 <- #13");
    }

    #[test]
    fn test_polite_line() {
        let s = Statement {
            label: None,
            politeness: Politeness::Polite,
            command: Command::ReadOut(Reference::spot(10).into()),
        };
        assert_eq!(s.to_string(), "     PLEASE READ OUT .10");
    }

    #[test]
    fn test_labelled_nop() {
        let mut s = terse(Command::Nop);
        s.label = Some(Label::new(3));
        assert_eq!(s.to_string(), " (3) DON'T GIVE UP");
        s.politeness = Politeness::Polite;
        assert_eq!(s.to_string(), " (3) PLEASE DON'T GIVE UP");
    }

    #[test]
    fn test_wide_label_is_not_truncated() {
        let mut s = terse(Command::GiveUp);
        s.label = Some(Label::new(12345));
        assert_eq!(s.to_string(), "(12345) DO GIVE UP");
    }

    #[test]
    fn test_stack_commands() {
        assert_eq!(
            terse(Command::Next(Label::new(1009))).to_string(),
            "     DO (1009) NEXT"
        );
        assert_eq!(
            terse(Command::Resume(Expr::Constant(1))).to_string(),
            "     DO RESUME #1"
        );
        assert_eq!(
            terse(Command::Forget(Reference::spot(16).into())).to_string(),
            "     DO FORGET .16"
        );
    }

    #[test]
    fn test_io_commands() {
        assert_eq!(
            terse(Command::WriteIn(Reference::tail(11).into())).to_string(),
            "     DO WRITE IN ,11"
        );
        let element = Reference::tail(12).index(1).expect("tails can be indexed");
        assert_eq!(
            terse(Command::Assign {
                target: element,
                value: Reference::spot(3).into(),
            })
            .to_string(),
            "     DO ,12SUB#1 <- .3"
        );
    }
}
