//! Execution of a program.
//!
//! The machine works from the structured [`Statement`]s of a program
//! (it has no parser), and implements those parts of C-INTERCAL which
//! generated programs use.  The addition and subtraction routines of
//! the system library, `(1009)` and `(1010)`, are built in.
use std::collections::HashMap;

use tracing::{event, Level};

use base::prelude::{
    BinaryOp, Command, Expr, Kind, Label, Outcome, Politeness, Reference, Statement, UnaryOp,
    Value,
};
use base::word::mingle;

use super::alarm::{Fault, NEXT_STACK_LIMIT};
use super::io::{Input, Output};
use super::memory::Memory;

pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// `.3 <- .1 + .2`, also setting `.4` to 1 (or to 2 if the addition
/// overflowed).
const LIBRARY_ADD: Label = Label::new(1009);
/// `.3 <- .1 - .2`.
const LIBRARY_SUBTRACT: Label = Label::new(1010);

/// The result of running a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub output: Vec<u8>,
    /// Why the program stopped, if it didn't stop by GIVE UP.
    pub fault: Option<Fault>,
    /// The number of statements executed.
    pub steps: u64,
}

impl Execution {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.fault.is_none()
    }

    /// The output of the program, as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Follows the toolchain's conventions: the error message follows
/// the program's own output.
impl From<Execution> for Outcome {
    fn from(execution: Execution) -> Outcome {
        let mut output = execution.text();
        match execution.fault {
            Some(fault) => {
                output.push_str(&fault.to_string());
                output.push('\n');
                Outcome::failed(output)
            }
            None => Outcome::succeeded(output),
        }
    }
}

/// Checks the proportion of polite statements in the way `ick` does:
/// at least a fifth, but no more than a third, of the statements of a
/// program must say PLEASE.
fn check_politeness(statements: &[Statement]) -> Result<(), Fault> {
    let total = statements.len();
    if total <= 3 {
        return Ok(());
    }
    let polite = statements
        .iter()
        .filter(|s| s.politeness == Politeness::Polite)
        .count();
    if polite == 0 || total / polite > 5 {
        Err(Fault::InsufficientlyPolite)
    } else if total / polite < 3 {
        Err(Fault::OverlyPolite)
    } else {
        Ok(())
    }
}

/// A loaded program.
#[derive(Debug, Clone)]
pub struct Machine {
    statements: Vec<Statement>,
    labels: HashMap<Label, usize>,
    step_limit: u64,
}

impl Machine {
    /// Load a program.
    ///
    /// # Errors
    ///
    /// Fails if two statements have the same label, or if the program
    /// is not polite enough (or is too polite).
    pub fn new(statements: &[Statement]) -> Result<Machine, Fault> {
        let mut labels = HashMap::new();
        for (index, statement) in statements.iter().enumerate() {
            if let Some(label) = statement.label {
                if labels.insert(label, index).is_some() {
                    return Err(Fault::DuplicateLabel(label));
                }
            }
        }
        check_politeness(statements)?;
        event!(
            Level::DEBUG,
            "loaded {} statements with {} labels",
            statements.len(),
            labels.len()
        );
        Ok(Machine {
            statements: statements.to_vec(),
            labels,
            step_limit: DEFAULT_STEP_LIMIT,
        })
    }

    #[must_use]
    pub fn with_step_limit(mut self, step_limit: u64) -> Machine {
        self.step_limit = step_limit;
        self
    }

    /// Run the program from the beginning, with `stdin` as its input.
    #[must_use]
    pub fn run(&self, stdin: &[u8]) -> Execution {
        let mut run = Run {
            machine: self,
            memory: Memory::new(),
            next_stack: Vec::new(),
            input: Input::new(stdin),
            output: Output::new(),
        };
        let (fault, steps) = match run.execute() {
            Ok(steps) => (None, steps),
            Err((fault, steps)) => (Some(fault), steps),
        };
        match &fault {
            Some(f) => event!(Level::DEBUG, "program failed after {steps} steps: {f}"),
            None => event!(Level::DEBUG, "program gave up after {steps} steps"),
        }
        Execution {
            output: run.output.into_bytes(),
            fault,
            steps,
        }
    }
}

/// What to do after a statement.
enum Flow {
    Continue,
    Jump(usize),
    Stop,
}

/// The state of one run of a program.
struct Run<'m, 'i> {
    machine: &'m Machine,
    memory: Memory,
    // Each entry is the index of the statement to return to.
    next_stack: Vec<usize>,
    input: Input<'i>,
    output: Output,
}

fn fit16(value: Value) -> Result<u16, Fault> {
    value.as_u16().ok_or(Fault::ValueTooLarge(value.bits()))
}

fn unsupported(what: &str, expr: &Expr) -> Fault {
    Fault::Unsupported(format!("{what} {expr}"))
}

impl Run<'_, '_> {
    /// Returns the number of steps taken.
    fn execute(&mut self) -> Result<u64, (Fault, u64)> {
        let machine = self.machine;
        let mut pc: usize = 0;
        let mut steps: u64 = 0;
        loop {
            let Some(statement) = machine.statements.get(pc) else {
                return Err((Fault::FellOffTheEdge, steps));
            };
            if steps >= machine.step_limit {
                return Err((Fault::StepLimit(steps), steps));
            }
            steps += 1;
            event!(Level::TRACE, "step {steps}: statement {}: {statement}", pc + 1);
            match self.step(pc, &statement.command) {
                Ok(Flow::Continue) => pc += 1,
                Ok(Flow::Jump(target)) => pc = target,
                Ok(Flow::Stop) => return Ok(steps),
                Err(fault) => {
                    event!(
                        Level::DEBUG,
                        "statement {} ({statement}) failed: {fault}",
                        pc + 1
                    );
                    return Err((fault, steps));
                }
            }
        }
    }

    fn step(&mut self, pc: usize, command: &Command) -> Result<Flow, Fault> {
        match command {
            Command::Assign { target, value } => {
                self.assign(target, value)?;
                Ok(Flow::Continue)
            }
            Command::WriteIn(target) => {
                self.write_in(target)?;
                Ok(Flow::Continue)
            }
            Command::ReadOut(value) => {
                self.read_out(value)?;
                Ok(Flow::Continue)
            }
            Command::Next(label) => self.next(pc, *label),
            Command::Resume(count) => {
                let count = self.count(count)?;
                if count == 0 {
                    return Err(Fault::ResumeZero);
                }
                let depth = self.next_stack.len();
                if count > depth {
                    return Err(Fault::NextStackRupture);
                }
                let target = self.next_stack[depth - count];
                self.next_stack.truncate(depth - count);
                Ok(Flow::Jump(target))
            }
            Command::Forget(count) => {
                let count = self.count(count)?;
                let depth = self.next_stack.len();
                self.next_stack.truncate(depth.saturating_sub(count));
                Ok(Flow::Continue)
            }
            Command::Nop => Ok(Flow::Continue),
            Command::GiveUp => Ok(Flow::Stop),
        }
    }

    fn count(&self, expr: &Expr) -> Result<usize, Fault> {
        let value = self.evaluate(expr)?;
        usize::try_from(value.bits()).map_err(|_| Fault::ValueTooLarge(value.bits()))
    }

    fn next(&mut self, pc: usize, label: Label) -> Result<Flow, Fault> {
        if self.next_stack.len() >= NEXT_STACK_LIMIT {
            return Err(Fault::TooManyNexts);
        }
        match self.machine.labels.get(&label) {
            Some(&target) => {
                self.next_stack.push(pc + 1);
                Ok(Flow::Jump(target))
            }
            None if label == LIBRARY_ADD || label == LIBRARY_SUBTRACT => {
                self.library(label);
                Ok(Flow::Continue)
            }
            None => Err(Fault::UndefinedLabel(label)),
        }
    }

    fn library(&mut self, routine: Label) {
        let x = self.memory.spot(1);
        let y = self.memory.spot(2);
        if routine == LIBRARY_ADD {
            let (sum, overflowed) = x.overflowing_add(y);
            self.memory.set_spot(3, sum);
            self.memory.set_spot(4, if overflowed { 2 } else { 1 });
        } else {
            self.memory.set_spot(3, x.wrapping_sub(y));
        }
    }

    fn evaluate(&self, expr: &Expr) -> Result<Value, Fault> {
        match expr {
            Expr::Constant(n) => Ok(Value::from(*n)),
            Expr::Variable(reference) => match reference.kind() {
                Kind::Spot => Ok(Value::from(self.memory.spot(reference.name()))),
                Kind::Tail => Err(unsupported("the value of the whole tail", expr)),
            },
            Expr::Subscript { array, index } => {
                let index = self.evaluate(index)?;
                Ok(Value::from(self.memory.element(array.name(), index.bits())?))
            }
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                match op {
                    BinaryOp::Mingle => {
                        let operand = |v: Value| {
                            v.as_u16().ok_or(Fault::MingleOperandTooLarge(v.bits()))
                        };
                        Ok(Value::thirty_two(mingle(operand(left)?, operand(right)?)))
                    }
                    BinaryOp::Select => Ok(left.select(right)),
                }
            }
            Expr::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                Ok(match op {
                    UnaryOp::And => operand.unary_and(),
                    UnaryOp::Or => operand.unary_or(),
                    UnaryOp::Xor => operand.unary_xor(),
                })
            }
        }
    }

    fn store(&mut self, target: &Expr, value: u16) -> Result<(), Fault> {
        match target {
            Expr::Variable(reference) if reference.kind() == Kind::Spot => {
                self.memory.set_spot(reference.name(), value);
                Ok(())
            }
            Expr::Subscript { array, index } => {
                let index = self.evaluate(index)?;
                self.memory.set_element(array.name(), index.bits(), value)
            }
            _ => Err(unsupported("storing into", target)),
        }
    }

    fn whole_tail(target: &Expr) -> Option<Reference> {
        match target {
            Expr::Variable(reference) if reference.kind() == Kind::Tail => Some(*reference),
            _ => None,
        }
    }

    fn assign(&mut self, target: &Expr, value: &Expr) -> Result<(), Fault> {
        let value = fit16(self.evaluate(value)?)?;
        match Run::whole_tail(target) {
            Some(tail) => self.memory.dimension(tail.name(), value),
            None => self.store(target, value),
        }
    }

    fn write_in(&mut self, target: &Expr) -> Result<(), Fault> {
        match Run::whole_tail(target) {
            Some(tail) => {
                let elements = self.memory.elements_mut(tail.name())?;
                self.input.read_text(elements);
                Ok(())
            }
            None => {
                let value = self.input.read_number()?;
                self.store(target, value)
            }
        }
    }

    fn read_out(&mut self, value: &Expr) -> Result<(), Fault> {
        match Run::whole_tail(value) {
            Some(tail) => {
                self.output.write_text(self.memory.elements(tail.name())?);
                Ok(())
            }
            None => {
                let value = self.evaluate(value)?;
                self.output.write_number(value.bits());
                Ok(())
            }
        }
    }
}

/// Load and run a program with the default step limit.  A program
/// which fails to load produces a failed outcome, just as a program
/// rejected by the toolchain does.
#[must_use]
pub fn run(statements: &[Statement], stdin: &[u8]) -> Outcome {
    match Machine::new(statements) {
        Ok(machine) => machine.run(stdin).into(),
        Err(fault) => Outcome::failed(format!("{fault}\n")),
    }
}
