//! Grouping of nested expressions.
//!
//! INTERCAL has no operator precedence.  Instead, any operand which
//! is itself an operator expression must be enclosed in "sparks"
//! (`'`) or "rabbit ears" (`"`).  Adjacent levels of nesting must use
//! different characters, so that the parser can tell an inner group
//! from the end of an outer one.
//!
//! We cycle through three levels.  The outermost expression of a
//! statement is [`Group::Plain`] and is not enclosed at all; its
//! operands are rendered at [`Group::Spark`], theirs at
//! [`Group::Rabbit`], theirs at [`Group::Spark`] again and so on.
//! `Plain` is never re-entered once it has been left, since an
//! unquoted operand would be ambiguous.
use std::fmt::{self, Display, Formatter};

use super::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Plain,
    Spark,
    Rabbit,
}

impl Group {
    /// The level at which the operands of an expression rendered at
    /// `self` are rendered.
    #[must_use]
    pub const fn next(self) -> Group {
        match self {
            Group::Plain | Group::Rabbit => Group::Spark,
            Group::Spark => Group::Rabbit,
        }
    }

    #[must_use]
    pub const fn quote(self) -> &'static str {
        match self {
            Group::Plain => "",
            Group::Spark => "'",
            Group::Rabbit => "\"",
        }
    }
}

impl Expr {
    /// Render this expression as INTERCAL source text, as it should
    /// appear at nesting level `group`.
    #[must_use]
    pub fn render(&self, group: Group) -> String {
        let mut out = String::new();
        self.render_into(group, &mut out);
        out
    }

    fn render_into(&self, group: Group, out: &mut String) {
        let inner = group.next();
        match self {
            // Constants and variables are atoms; they never need
            // grouping, whatever the level.
            Expr::Constant(n) => {
                out.push('#');
                out.push_str(&n.to_string());
            }
            Expr::Variable(reference) => {
                out.push_str(&reference.to_string());
            }
            Expr::Subscript { array, index } => {
                out.push_str(group.quote());
                Expr::Variable(*array).render_into(inner, out);
                out.push_str("SUB");
                index.render_into(inner, out);
                out.push_str(group.quote());
            }
            Expr::Binary { op, left, right } => {
                out.push_str(group.quote());
                left.render_into(inner, out);
                out.push_str(op.symbol());
                right.render_into(inner, out);
                out.push_str(group.quote());
            }
            Expr::Unary { op, operand } => {
                out.push_str(group.quote());
                out.push_str(op.symbol());
                operand.render_into(inner, out);
                out.push_str(group.quote());
            }
        }
    }
}

/// Displays the expression at the outermost level, as it would be
/// written as a statement operand.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Group::Plain))
    }
}
