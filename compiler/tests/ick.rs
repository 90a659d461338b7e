//! These tests need the C-INTERCAL compiler.  They are ignored by
//! default; run them with `cargo test -- --ignored` on a machine which
//! has `ick` (set `ICK` to use one which is not on the `PATH`).
//!
//! Each program is run both by `ick` and by the reference machine, and
//! the two must agree.
use std::path::PathBuf;

use base::prelude::{ConstructionError, Expr};
use compiler::{BinaryIo, Ick, Session};

fn toolchain() -> Ick {
    match std::env::var_os("ICK") {
        Some(path) => Ick::new(PathBuf::from(path)),
        None => Ick::default(),
    }
}

fn compile_and_compare(session: &Session, stdin: &[u8]) -> String {
    let ick = toolchain();
    let work_dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    let build = ick
        .compile_in(work_dir.path(), "test", &session.text())
        .expect("should be able to run ick");
    assert!(
        build.succeeded(),
        "ick rejected the program:\n{}\n{}",
        build.outcome.output,
        session.text()
    );
    let compiled = ick
        .run(&build.executable, stdin)
        .expect("should be able to run the compiled program");
    let simulated = machine::run(session.statements(), stdin);
    assert_eq!(compiled, simulated);
    compiled.output
}

#[test]
#[ignore]
fn numbers_are_printed_alike() {
    let mut session = Session::new();
    for n in [0, 1, 4, 9, 14, 40, 90, 400, 900, 1994, 3999] {
        session.write_out(n);
    }
    session.halt();
    compile_and_compare(&session, b"");
}

#[test]
#[ignore]
fn text_output() {
    let mut session = Session::new();
    let io = BinaryIo::new(&mut session).expect("names are available");
    io.write_str(&mut session, "hello ick world\n");
    session.halt();
    assert_eq!(compile_and_compare(&session, b""), "hello ick world\n");
}

#[test]
#[ignore]
fn control_flow() {
    let mut session = Session::new();
    let x = session.spot().expect("names are available");
    session.read_into(x);
    session
        .while_loop(
            Expr::from(x).not_equal(9),
            |s: &mut Session| -> Result<(), ConstructionError> {
                s.if_else(
                    Expr::from(x).equal(4),
                    |s: &mut Session| {
                        s.write_out(400);
                        Ok::<(), ConstructionError>(())
                    },
                    |s: &mut Session| {
                        s.write_out(x);
                        Ok(())
                    },
                )?;
                s.read_into(x);
                Ok(())
            },
        )
        .expect("construction should succeed");
    session.halt();
    compile_and_compare(&session, b"ONE\nFOUR\nFIVE\nSEVEN\nNINE\n");
}

#[test]
#[ignore]
fn echo_bytes() {
    let mut session = Session::new();
    let io = BinaryIo::new(&mut session).expect("names are available");
    let buffer = session.tail_with(5).expect("names are available");
    io.read_bytes(&mut session, buffer, 5)
        .expect("buffer is a tail");
    for i in 1..=5_u16 {
        io.write_byte(&mut session, buffer.index(i).expect("tails can be indexed"));
    }
    session.halt();
    assert_eq!(compile_and_compare(&session, b"Ick!\n"), "Ick!\n");
}

#[test]
#[ignore]
fn failures_are_reported_alike() {
    let mut session = Session::new();
    session.pop_and_jump(0);
    session.halt();
    let ick = toolchain();
    let build = ick
        .compile(&session.text())
        .expect("should be able to run ick");
    assert!(build.succeeded(), "{}", build.outcome.output);
    let compiled = ick
        .run(&build.executable, b"")
        .expect("should be able to run the compiled program");
    assert!(!compiled.success);
    assert!(compiled.output.contains("ICL621I"), "{}", compiled.output);
}
