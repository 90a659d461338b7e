//! The `base` crate defines the INTERCAL-related things which are
//! useful both in the code generator and in the reference machine.
//! The idea is that if you want to generate programs, you depend on
//! the base crate but do not need to depend on the machine library
//! itself (and vice versa).

pub mod expr;
pub mod group;
pub mod names;
pub mod outcome;
pub mod prelude;
pub mod statement;
pub mod word;

#[test]
fn test_prelude_renders_through_expressions() {
    use prelude::*;
    let x = Reference::spot(10);
    let e: Expr = Expr::from(x).mingle(5);
    assert_eq!(e.to_string(), ".10$#5");
}
