use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::ArgAction::Set;
use clap::{Parser, ValueEnum};
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use base::prelude::{ConstructionError, Outcome};
use compiler::{Ick, ToolchainFailure};

mod substring;

/// Generate (and optionally run) an INTERCAL solution to the SPOJ
/// problem SBSTR1.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// The number of problems the program solves.
    #[clap(action = Set, long, default_value_t = substring::DEFAULT_PROBLEM_COUNT)]
    problems: u16,

    /// File to which the program is written.  When not set, the
    /// program is printed on the standard output (unless it is being
    /// run).
    #[clap(action = Set, short = 'o', long)]
    output: Option<PathBuf>,

    /// Run the program, with the standard input as its input.
    #[clap(action = Set, long, value_enum, default_value_t = Runner::None)]
    run: Runner,

    /// The C-INTERCAL compiler to use with `--run ick`.
    #[clap(action = Set, long, env = "ICK", default_value = compiler::toolchain::DEFAULT_ICK)]
    ick: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Runner {
    /// Don't run the program.
    None,
    /// Run the program on the built-in reference machine.
    Machine,
    /// Compile the program with ick, and run the result.
    Ick,
}

#[derive(Debug)]
enum Fail {
    /// The program could not be generated.
    Construction(ConstructionError),
    /// The toolchain could not be run.
    Toolchain(ToolchainFailure),
    /// ick refused to compile the program.
    Rejected(String),
    /// The program ran, but failed.
    ProgramFailed,
    Io {
        what: String,
        error: io::Error,
    },
    /// We were not able to correctly initialise ourselves.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Construction(e) => write!(f, "failed to generate the program: {e}"),
            Fail::Toolchain(e) => e.fmt(f),
            Fail::Rejected(diagnostics) => {
                write!(f, "the compiler rejected the program: {diagnostics}")
            }
            Fail::ProgramFailed => f.write_str("the program failed"),
            Fail::Io { what, error } => write!(f, "I/O error {what}: {error}"),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

impl From<ConstructionError> for Fail {
    fn from(e: ConstructionError) -> Fail {
        Fail::Construction(e)
    }
}

impl From<ToolchainFailure> for Fail {
    fn from(e: ToolchainFailure) -> Fail {
        Fail::Toolchain(e)
    }
}

fn read_stdin() -> Result<Vec<u8>, Fail> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .map_err(|error| Fail::Io {
            what: "reading the standard input".to_string(),
            error,
        })?;
    Ok(input)
}

fn print(text: &str) -> Result<(), Fail> {
    let mut stdout = io::stdout();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|error| Fail::Io {
            what: "writing the standard output".to_string(),
            error,
        })
}

fn execute(cli: &Cli, session: &compiler::Session) -> Result<Option<Outcome>, Fail> {
    match cli.run {
        Runner::None => Ok(None),
        Runner::Machine => {
            let input = read_stdin()?;
            Ok(Some(machine::run(session.statements(), &input)))
        }
        Runner::Ick => {
            let ick = Ick::new(cli.ick.clone());
            let build = ick.compile(&session.text())?;
            if !build.succeeded() {
                return Err(Fail::Rejected(build.outcome.output));
            }
            let input = read_stdin()?;
            Ok(Some(ick.run(&build.executable, &input)?))
        }
    }
}

fn run_generator() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.2.19/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "sbstr1", problems = cli.problems, run = ?cli.run);
    let _enter = span.enter();

    let session = substring::generate(cli.problems)?;
    let text = session.text();
    match &cli.output {
        Some(path) => {
            fs::write(path, &text).map_err(|error| Fail::Io {
                what: format!("writing {}", path.display()),
                error,
            })?;
            event!(Level::INFO, "wrote the program to {}", path.display());
        }
        None if cli.run == Runner::None => print(&text)?,
        None => (),
    }

    match execute(&cli, &session)? {
        Some(outcome) => {
            print(&outcome.output)?;
            if outcome.success {
                event!(Level::INFO, "the program succeeded");
                Ok(())
            } else {
                event!(Level::ERROR, "the program failed");
                Err(Fail::ProgramFailed)
            }
        }
        None => Ok(()),
    }
}

fn main() {
    match run_generator() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
