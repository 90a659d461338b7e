//! The listing: the statements of the program, in emission order
//! (which is also program order).
//!
//! C-INTERCAL rejects a program which is insufficiently polite (too
//! few of its statements say `PLEASE`) and also one which is overly
//! polite.  The listing therefore decides the politeness of each
//! statement as it is appended, saying `PLEASE` once in every
//! [`POLITENESS_PERIOD`] statements.
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::{Command, Label, Politeness, Statement};

pub const POLITENESS_PERIOD: u8 = 5;

/// Counts down the statements until the next polite one.
///
/// The count runs freely across the whole session; it is not reset
/// at the boundaries of control-flow constructs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PolitenessCounter {
    remaining: u8,
}

impl PolitenessCounter {
    #[must_use]
    pub fn new() -> PolitenessCounter {
        PolitenessCounter::default()
    }

    /// The politeness of the statement about to be appended.  The
    /// first statement of a session is polite, then every fifth one
    /// after that.
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.remaining == 0
    }

    /// Decide the politeness of the statement being appended, and
    /// count it.
    pub fn advance(&mut self) -> Politeness {
        let politeness = if self.is_due() {
            Politeness::Polite
        } else {
            Politeness::Terse
        };
        self.remaining = (self.remaining + POLITENESS_PERIOD - 1) % POLITENESS_PERIOD;
        politeness
    }
}

#[derive(Debug, Default)]
pub struct Listing {
    statements: Vec<Statement>,
    politeness: PolitenessCounter,
}

impl Listing {
    #[must_use]
    pub fn new() -> Listing {
        Listing::default()
    }

    /// Append one statement, resolving its politeness.
    pub fn push(&mut self, label: Option<Label>, command: Command) {
        let statement = Statement {
            label,
            politeness: self.politeness.advance(),
            command,
        };
        event!(Level::TRACE, "emitting statement {}: {statement}", self.statements.len() + 1);
        self.statements.push(statement);
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The program text: one line per statement, each ending in a
    /// newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_statement_is_polite() {
        let mut counter = PolitenessCounter::new();
        assert!(counter.is_due());
        assert_eq!(counter.advance(), Politeness::Polite);
        assert!(!counter.is_due());
    }

    #[test]
    fn test_cadence() {
        let mut counter = PolitenessCounter::new();
        let polite: Vec<usize> = (1..=16)
            .filter(|_| counter.advance() == Politeness::Polite)
            .collect();
        assert_eq!(polite, vec![1, 6, 11, 16]);
    }

    #[test]
    fn test_listing_text() {
        let mut listing = Listing::new();
        assert!(listing.is_empty());
        listing.push(None, Command::GiveUp);
        listing.push(Some(Label::new(1)), Command::Nop);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.text(), "     PLEASE GIVE UP\n (1) DON'T GIVE UP\n");
    }

    #[test]
    fn test_push_resolves_politeness() {
        let mut listing = Listing::new();
        listing.push(None, Command::GiveUp);
        listing.push(None, Command::GiveUp);
        let politeness: Vec<Politeness> =
            listing.statements().iter().map(|s| s.politeness).collect();
        assert_eq!(politeness, vec![Politeness::Polite, Politeness::Terse]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn every_fifth_statement_is_polite(#[strategy(0_usize..200)] count: usize) {
        let mut listing = Listing::new();
        for _ in 0..count {
            listing.push(None, Command::Nop);
        }
        let polite: Vec<usize> = listing
            .statements()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.politeness == Politeness::Polite)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(polite.len(), count.div_ceil(5));
        assert!(polite.iter().all(|i| i % 5 == 0));
        if count % 5 == 0 {
            assert_eq!(polite.len(), count / 5);
        }
    }
}
