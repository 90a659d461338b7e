//! A compilation session: one program being generated.
//!
//! The session owns the listing and the name allocator.  Each of the
//! statement operations below appends exactly one statement to the
//! listing; none of them can fail.  Mistakes in the construction of
//! the program, such as subscripting a spot, are reported by the
//! operations which build names and expressions instead.
use base::prelude::{Command, ConstructionError, Expr, Kind, Label, Reference, Statement};

use super::allocator::NameAllocator;
use super::listing::Listing;

#[derive(Debug, Default)]
pub struct Session {
    listing: Listing,
    names: NameAllocator,
}

impl Session {
    #[must_use]
    pub fn new() -> Session {
        Session::default()
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        self.listing.statements()
    }

    /// The text of the program generated so far.
    #[must_use]
    pub fn text(&self) -> String {
        self.listing.text()
    }

    /// # Errors
    ///
    /// Fails when no more labels are available.
    pub fn label(&mut self) -> Result<Label, ConstructionError> {
        self.names.label()
    }

    /// # Errors
    ///
    /// Fails when no more labels are available.
    pub fn labels<const N: usize>(&mut self) -> Result<[Label; N], ConstructionError> {
        self.names.labels()
    }

    /// Allocate a fresh spot.  Nothing is emitted.
    ///
    /// # Errors
    ///
    /// Fails when no more variable names are available.
    pub fn spot(&mut self) -> Result<Reference, ConstructionError> {
        self.names.variable(Kind::Spot)
    }

    /// Allocate a fresh spot and emit an assignment of its initial
    /// value.
    ///
    /// # Errors
    ///
    /// Fails when no more variable names are available.
    pub fn spot_with<V: Into<Expr>>(&mut self, value: V) -> Result<Reference, ConstructionError> {
        let spot = self.spot()?;
        self.assign(spot, value);
        Ok(spot)
    }

    /// Allocate a fresh tail, without dimensioning it.
    ///
    /// # Errors
    ///
    /// Fails when no more variable names are available.
    pub fn tail(&mut self) -> Result<Reference, ConstructionError> {
        self.names.variable(Kind::Tail)
    }

    /// Allocate a fresh tail and emit the assignment which gives it
    /// its dimension.
    ///
    /// # Errors
    ///
    /// Fails when no more variable names are available.
    pub fn tail_with<V: Into<Expr>>(
        &mut self,
        dimension: V,
    ) -> Result<Reference, ConstructionError> {
        let tail = self.tail()?;
        self.assign(tail, dimension);
        Ok(tail)
    }

    fn statement(&mut self, label: Option<Label>, command: Command) {
        self.listing.push(label, command);
    }

    /// `target <- value`.
    pub fn assign<T: Into<Expr>, V: Into<Expr>>(&mut self, target: T, value: V) {
        self.statement(
            None,
            Command::Assign {
                target: target.into(),
                value: value.into(),
            },
        );
    }

    /// `WRITE IN target`.
    pub fn read_into<T: Into<Expr>>(&mut self, target: T) {
        self.statement(None, Command::WriteIn(target.into()));
    }

    /// `READ OUT value`.
    pub fn write_out<V: Into<Expr>>(&mut self, value: V) {
        self.statement(None, Command::ReadOut(value.into()));
    }

    /// `(label) NEXT`.
    pub fn jump_pushing_return(&mut self, label: Label) {
        self.statement(None, Command::Next(label));
    }

    /// `RESUME count`.
    pub fn pop_and_jump<N: Into<Expr>>(&mut self, count: N) {
        self.statement(None, Command::Resume(count.into()));
    }

    /// `FORGET count`.
    pub fn pop_and_discard<N: Into<Expr>>(&mut self, count: N) {
        self.statement(None, Command::Forget(count.into()));
    }

    /// Emit a statement which does nothing but carry `label`, so that
    /// it can be the target of a jump.
    pub fn label_here(&mut self, label: Label) {
        self.statement(Some(label), Command::Nop);
    }

    /// `GIVE UP`.
    pub fn halt(&mut self) {
        self.statement(None, Command::GiveUp);
    }
}
