use test_strategy::proptest;

use base::prelude::{Command, Expr, Politeness, Reference, Statement};
use machine::{numeral_lines, Fault, Machine};

/// Print the value of `expr`, then stop.
fn evaluate(expr: Expr) -> Result<String, Fault> {
    let statements = vec![
        Statement {
            label: None,
            politeness: Politeness::Polite,
            command: Command::ReadOut(expr),
        },
        Statement {
            label: None,
            politeness: Politeness::Terse,
            command: Command::GiveUp,
        },
    ];
    let execution = Machine::new(&statements)?.run(b"");
    match execution.fault {
        Some(fault) => Err(fault),
        None => Ok(execution.text()),
    }
}

fn printed(n: u32) -> Result<String, Fault> {
    Ok(numeral_lines(n))
}

#[test]
fn mingle_interleaves() {
    assert_eq!(evaluate(Expr::from(5).mingle(10)), printed(0b0110_0110));
}

#[test]
fn select_packs_to_the_right() {
    // 0b1011_0001 ~ 0b1111_0000 = 0b1011
    assert_eq!(evaluate(Expr::from(177).select(240)), printed(11));
    // Bits 0, 2, 4 and 6 of 0b1011_0001 are 1, 0, 1, 0.
    assert_eq!(evaluate(Expr::from(177).select(85)), printed(0b0101));
}

#[test]
fn unary_operators_rotate_within_16_bits() {
    // #1 rotated right is #32768.
    assert_eq!(evaluate(Expr::from(1).self_or()), printed(32769));
    assert_eq!(evaluate(Expr::from(1).self_xor()), printed(32769));
    assert_eq!(evaluate(Expr::from(3).self_and()), printed(1));
}

#[test]
fn whole_tail_operand_is_unsupported() {
    assert!(matches!(
        evaluate(Expr::from(Reference::tail(11)).mingle(0)),
        Err(Fault::Unsupported(_))
    ));
}

#[test]
fn reading_out_an_undimensioned_tail_faults() {
    assert_eq!(
        evaluate(Expr::from(Reference::tail(11))),
        Err(Fault::SubscriptOutOfRange { tail: 11, index: 1 })
    );
}

#[proptest]
fn and_or_xor_match_native(x: u16, y: u16) {
    assert_eq!(
        evaluate(Expr::from(x).and(y)),
        printed(u32::from(x & y))
    );
    assert_eq!(evaluate(Expr::from(x).or(y)), printed(u32::from(x | y)));
    assert_eq!(
        evaluate(Expr::from(x).xor(y)),
        printed(u32::from(x ^ y))
    );
}

#[proptest]
fn comparisons_produce_truth_values(x: u16, y: u16) {
    let differ = u32::from(x != y);
    assert_eq!(evaluate(Expr::from(x).not_equal(y)), printed(differ));
    assert_eq!(evaluate(Expr::from(x).equal(y)), printed(1 - differ));
    assert_eq!(evaluate(Expr::from(x).equal(x)), printed(1));
}

#[proptest]
fn shifts_match_native(x: u16, #[strategy(0_u32..=16)] places: u32) {
    let left = x.checked_shl(places).unwrap_or(0);
    let right = x.checked_shr(places).unwrap_or(0);
    assert_eq!(
        evaluate(Expr::from(x).shift_left(places)),
        printed(u32::from(left))
    );
    assert_eq!(
        evaluate(Expr::from(x).shift_right(places)),
        printed(u32::from(right))
    );
}

#[proptest]
fn not_negates_truth_values(#[strategy(0_u16..=1)] truth: u16) {
    assert_eq!(
        evaluate(Expr::from(truth).not()),
        printed(u32::from(1 - truth))
    );
}
