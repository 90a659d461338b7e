//! A solution to the SPOJ problem SBSTR1 ("Substring Check"), as an
//! INTERCAL program.
//!
//! Each line of input holds a 10-character binary string A and a
//! 5-character binary string B separated by a space.  For each line
//! the program prints 1 if B is a substring of A, and 0 otherwise.
//!
//! Both strings are converted to numbers, and B is compared with each
//! 5-bit window of A.
use tracing::{event, Level};

use base::prelude::{ConstructionError, Expr, Reference};
use compiler::{BinaryIo, Session};

pub(crate) const LENGTH_A: u16 = 10;
pub(crate) const LENGTH_B: u16 = 5;
pub(crate) const DEFAULT_PROBLEM_COUNT: u16 = 24;

const WINDOW_MASK: u16 = (1 << LENGTH_B) - 1;

struct Solution {
    io: BinaryIo,
    string_a: Reference,
    string_b: Reference,
    separator: Reference,
    loop_counter: Reference,
    number_a: Reference,
    number_b: Reference,
    is_substring: Reference,
}

impl Solution {
    fn new(session: &mut Session) -> Result<Solution, ConstructionError> {
        let io = BinaryIo::new(session)?;
        Ok(Solution {
            io,
            string_a: session.tail_with(LENGTH_A)?,
            string_b: session.tail_with(LENGTH_B)?,
            separator: session.tail_with(1)?,
            loop_counter: session.spot()?,
            number_a: session.spot()?,
            number_b: session.spot()?,
            is_substring: session.spot()?,
        })
    }

    fn read_separator(&self, session: &mut Session) -> Result<(), ConstructionError> {
        self.io.read_bytes(session, self.separator, 1)
    }

    fn read_input(&self, session: &mut Session) -> Result<(), ConstructionError> {
        self.io.read_bytes(session, self.string_a, LENGTH_A)?;
        self.io
            .parse_bits(session, self.number_a, self.string_a, LENGTH_A)?;
        self.read_separator(session)?;
        self.io.read_bytes(session, self.string_b, LENGTH_B)?;
        self.io
            .parse_bits(session, self.number_b, self.string_b, LENGTH_B)?;
        self.read_separator(session)
    }

    /// 1 if the window of A starting `shift` bits from the right
    /// equals B.
    fn window_matches(&self, shift: u16) -> Expr {
        Expr::from(self.number_a)
            .select(WINDOW_MASK << shift)
            .equal(self.number_b)
    }

    fn check_for_substring(&self, session: &mut Session) -> Result<(), ConstructionError> {
        session.assign(self.is_substring, 0);
        for shift in 0..=(LENGTH_A - LENGTH_B) {
            session.assign(
                self.is_substring,
                Expr::from(self.is_substring).or(self.window_matches(shift)),
            );
        }
        session.if_else(
            self.is_substring,
            |s: &mut Session| {
                self.io.write_str(s, "1\n");
                Ok(())
            },
            |s: &mut Session| {
                self.io.write_str(s, "0\n");
                Ok(())
            },
        )
    }
}

/// Generate the program, which solves `problem_count` problems.
pub(crate) fn generate(problem_count: u16) -> Result<Session, ConstructionError> {
    let mut session = Session::new();
    let solution = Solution::new(&mut session)?;
    session.assign(solution.loop_counter, 0);
    session.while_loop(
        Expr::from(solution.loop_counter).not_equal(problem_count),
        |s: &mut Session| -> Result<(), ConstructionError> {
            solution.read_input(s)?;
            solution.check_for_substring(s)?;
            s.add(solution.loop_counter, solution.loop_counter, 1);
            Ok(())
        },
    )?;
    session.halt();
    event!(
        Level::INFO,
        "generated a program of {} statements for {problem_count} problems",
        session.listing().len()
    );
    Ok(session)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use machine::Machine;
    use test_strategy::proptest;

    #[proptest(cases = 16)]
    fn answers_agree_with_substring_search(
        #[strategy("[01]{10}")] a: String,
        #[strategy("[01]{5}")] b: String,
    ) {
        let session = generate(1).expect("construction should succeed");
        let execution = Machine::new(session.statements())
            .expect("program should load")
            .run(format!("{a} {b}\n").as_bytes());
        let answer = if a.contains(&b) { "1\n" } else { "0\n" };
        assert_eq!(execution.text(), answer);
    }
}
