//! Structured control flow.
//!
//! INTERCAL has no conditional jump.  What it does have is the NEXT
//! stack: `(L) NEXT` pushes a return address and jumps to `L`,
//! `RESUME #1` pops one return address and jumps to it, and
//! `FORGET n` silently discards `n` return addresses.  Since
//! `FORGET #0` does nothing, a condition whose value is 0 or 1 can be
//! used as the count of a FORGET to decide whether a return address is
//! dropped; the following `RESUME #1` then returns to one of two
//! places, depending on the condition.
//!
//! Every construct leaves the NEXT stack as it found it, and each of
//! its labels is placed exactly once.
use tracing::{event, Level};

use base::prelude::{ConstructionError, Expr, Label};

use super::session::Session;

impl Session {
    /// Generate an if/else construct.
    ///
    /// `condition` must evaluate to 0 (false) or 1 (true), as the
    /// results of [`Expr::equal`] and [`Expr::not_equal`] do.  Only
    /// one of `then` and `otherwise` is executed by the generated
    /// program, after which both paths rejoin.
    ///
    /// The blocks generate their own statements into the session,
    /// and may themselves contain further control-flow constructs.
    ///
    /// # Errors
    ///
    /// Fails if labels cannot be allocated, or if either block fails;
    /// the construct is abandoned at that point.
    pub fn if_else<C, T, O, E>(&mut self, condition: C, then: T, otherwise: O) -> Result<(), E>
    where
        C: Into<Expr>,
        T: FnOnce(&mut Session) -> Result<(), E>,
        O: FnOnce(&mut Session) -> Result<(), E>,
        E: From<ConstructionError>,
    {
        let condition: Expr = condition.into();
        let [else_label, condition_label, end_label] = self.labels::<3>()?;
        event!(
            Level::DEBUG,
            "expanding if/else on {condition} (else={else_label}, condition={condition_label}, end={end_label})"
        );

        // The return address pushed here resumes the "then" block.
        self.jump_pushing_return(else_label);
        then(self)?;
        self.jump_pushing_return(end_label);

        // The return address pushed here resumes the "else" block, which
        // first discards the "then" return address.
        self.label_here(else_label);
        self.jump_pushing_return(condition_label);
        self.pop_and_discard(1);
        otherwise(self)?;
        self.jump_pushing_return(end_label);

        // When the condition is true, drop the "else" return address
        // so that we resume into the "then" block instead.
        self.label_here(condition_label);
        self.pop_and_discard(condition);
        self.pop_and_jump(1);

        self.label_here(end_label);
        self.pop_and_discard(1);
        Ok(())
    }

    /// Generate a loop which executes `body` for as long as
    /// `condition` (which must evaluate to 0 or 1) is true.  The
    /// condition is tested before each iteration, including the
    /// first.
    ///
    /// # Errors
    ///
    /// Fails if labels cannot be allocated, or if the body fails.
    pub fn while_loop<C, B, E>(&mut self, condition: C, body: B) -> Result<(), E>
    where
        C: Into<Expr>,
        B: FnOnce(&mut Session) -> Result<(), E>,
        E: From<ConstructionError>,
    {
        let condition: Expr = condition.into();
        let [body_label, condition_label, end_label] = self.labels::<3>()?;
        event!(
            Level::DEBUG,
            "expanding while loop on {condition} (body={body_label}, condition={condition_label}, end={end_label})"
        );

        self.loop_test(body_label, end_label);

        self.label_here(body_label);
        self.jump_pushing_return(condition_label);
        self.pop_and_discard(1);
        body(self)?;
        self.loop_test(body_label, end_label);

        // While the condition holds, keep the return address into the
        // body; otherwise drop it and resume at the jump to the end.
        self.label_here(condition_label);
        self.pop_and_discard(condition.not());
        self.pop_and_jump(1);

        self.label_here(end_label);
        self.pop_and_discard(1);
        Ok(())
    }

    /// Test the loop condition.  If it holds, control continues in the
    /// body; if not, at the statement after the jump to the body,
    /// which leaves the loop.
    fn loop_test(&mut self, body_label: Label, end_label: Label) {
        self.jump_pushing_return(body_label);
        self.jump_pushing_return(end_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::prelude::Reference;

    fn no_block(_: &mut Session) -> Result<(), ConstructionError> {
        Ok(())
    }

    #[test]
    fn test_if_else_expansion() {
        let mut session = Session::new();
        session
            .if_else(
                1,
                |s: &mut Session| -> Result<(), ConstructionError> {
                    s.write_out(100);
                    Ok(())
                },
                |s: &mut Session| -> Result<(), ConstructionError> {
                    s.write_out(200);
                    Ok(())
                },
            )
            .expect("construction should succeed");
        assert_eq!(
            session.text(),
            concat!(
                "     PLEASE (1) NEXT\n",
                "     DO READ OUT #100\n",
                "     DO (3) NEXT\n",
                " (1) DON'T GIVE UP\n",
                "     DO (2) NEXT\n",
                "     PLEASE FORGET #1\n",
                "     DO READ OUT #200\n",
                "     DO (3) NEXT\n",
                " (2) DON'T GIVE UP\n",
                "     DO FORGET #1\n",
                "     PLEASE RESUME #1\n",
                " (3) DON'T GIVE UP\n",
                "     DO FORGET #1\n",
            )
        );
    }

    #[test]
    fn test_while_expansion() {
        let mut session = Session::new();
        let x = Reference::spot(10);
        session
            .while_loop(Expr::from(x).not_equal(9), |s: &mut Session| {
                s.read_into(x);
                Ok::<(), ConstructionError>(())
            })
            .expect("construction should succeed");
        let lines: Vec<String> = session.statements().iter().map(|s| s.to_string()).collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "     PLEASE (1) NEXT");
        assert_eq!(lines[1], "     DO (3) NEXT");
        assert_eq!(lines[2], " (1) DON'T GIVE UP");
        assert_eq!(lines[3], "     DO (2) NEXT");
        assert_eq!(lines[4], "     DO FORGET #1");
        assert_eq!(lines[5], "     PLEASE WRITE IN .10");
        assert_eq!(lines[6], "     DO (1) NEXT");
        assert_eq!(lines[7], "     DO (3) NEXT");
        assert_eq!(lines[8], " (2) DON'T GIVE UP");
        assert!(lines[9].starts_with("     DO FORGET '"), "{}", lines[9]);
        assert_eq!(lines[10], "     PLEASE RESUME #1");
        assert_eq!(lines[11], " (3) DON'T GIVE UP");
        assert_eq!(lines[12], "     DO FORGET #1");
    }

    #[test]
    fn test_labels_are_placed_once() {
        let mut session = Session::new();
        session
            .if_else(0, no_block, |s: &mut Session| {
                s.while_loop(0, no_block)?;
                s.if_else(1, no_block, no_block)
            })
            .expect("construction should succeed");
        let mut placed: Vec<Label> = session
            .statements()
            .iter()
            .filter_map(|s| s.label)
            .collect();
        assert_eq!(placed.len(), 9);
        placed.sort();
        placed.dedup();
        assert_eq!(placed.len(), 9);
    }

    #[test]
    fn test_block_failure_propagates() {
        let mut session = Session::new();
        let spot = Reference::spot(10);
        let result = session.if_else(
            1,
            |_: &mut Session| spot.index(1).map(|_| ()),
            no_block,
        );
        assert_eq!(result, Err(ConstructionError::NotAnArray(spot)));
    }
}
