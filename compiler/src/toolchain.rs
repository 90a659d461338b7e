//! Running the C-INTERCAL toolchain (`ick`) on generated programs.
//!
//! A rejection of the program by `ick`, or a non-zero exit status from
//! the compiled program, is not an error here: it is reported as an
//! [`Outcome`] which did not succeed.  Only failures to do the I/O
//! (creating files, starting processes) are errors.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{self, Error as IoError, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

use tempfile::TempDir;
use tracing::{event, Level};

use base::prelude::Outcome;

pub const DEFAULT_ICK: &str = "ick";

/// The name given to the source file (and so the executable) when the
/// caller doesn't choose one.
const DEFAULT_PROGRAM_NAME: &str = "program";

#[derive(Debug)]
pub enum ToolchainFailure {
    CreatingWorkDirectory {
        error: IoError,
    },
    IoErrorOnSource {
        filename: PathBuf,
        error: IoError,
    },
    StartingProgram {
        program: PathBuf,
        error: IoError,
    },
    IoErrorOnStdin {
        program: PathBuf,
        error: IoError,
    },
}

impl Display for ToolchainFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ToolchainFailure::CreatingWorkDirectory { error } => {
                write!(f, "failed to create a temporary directory: {error}")
            }
            ToolchainFailure::IoErrorOnSource { filename, error } => {
                write!(
                    f,
                    "I/O error writing source file {}: {error}",
                    filename.display()
                )
            }
            ToolchainFailure::StartingProgram { program, error } => {
                write!(f, "failed to start {}: {error}", program.display())
            }
            ToolchainFailure::IoErrorOnStdin { program, error } => {
                write!(
                    f,
                    "I/O error writing the input of {}: {error}",
                    program.display()
                )
            }
        }
    }
}

impl Error for ToolchainFailure {}

/// The result of compiling a program.
#[derive(Debug)]
pub struct Build {
    /// The diagnostics of the compiler, and whether it accepted the
    /// program.
    pub outcome: Outcome,
    /// Where the executable is (if the compilation succeeded).
    pub executable: PathBuf,
    // Keeps the temporary directory holding `executable` alive.
    work_dir: Option<TempDir>,
}

impl Build {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome.success
    }

    /// The temporary directory which holds the build, if the build
    /// owns one.
    #[must_use]
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_ref().map(TempDir::path)
    }
}

/// The `ick` compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ick {
    program: PathBuf,
}

impl Default for Ick {
    fn default() -> Ick {
        Ick::new(DEFAULT_ICK)
    }
}

impl Ick {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(program: P) -> Ick {
        Ick {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Compile `source` in a fresh temporary directory.  The directory
    /// is removed when the returned [`Build`] is dropped.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be written or `ick` cannot be
    /// started.
    pub fn compile(&self, source: &str) -> Result<Build, ToolchainFailure> {
        let work_dir = TempDir::new()
            .map_err(|error| ToolchainFailure::CreatingWorkDirectory { error })?;
        let mut build = self.compile_in(work_dir.path(), DEFAULT_PROGRAM_NAME, source)?;
        build.work_dir = Some(work_dir);
        Ok(build)
    }

    /// Compile `source` as `<dir>/<name>.i`, leaving the executable
    /// (if any) at `<dir>/<name>`.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be written or `ick` cannot be
    /// started.
    pub fn compile_in(
        &self,
        dir: &Path,
        name: &str,
        source: &str,
    ) -> Result<Build, ToolchainFailure> {
        let source_file = dir.join(format!("{name}.i"));
        fs::write(&source_file, source).map_err(|error| ToolchainFailure::IoErrorOnSource {
            filename: source_file.clone(),
            error,
        })?;
        event!(
            Level::INFO,
            "compiling {} with {}",
            source_file.display(),
            self.program.display()
        );
        let output = Command::new(&self.program)
            .arg("-b")
            .arg(&source_file)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| ToolchainFailure::StartingProgram {
                program: self.program.clone(),
                error,
            })?;
        let outcome = outcome_of(&output);
        if !outcome.success {
            event!(
                Level::WARN,
                "{} rejected {}: {}",
                self.program.display(),
                source_file.display(),
                outcome.output.trim_end()
            );
        }
        Ok(Build {
            outcome,
            executable: dir.join(name),
            work_dir: None,
        })
    }

    /// Run a compiled program (this doesn't involve `ick` itself, but
    /// it completes the toolchain's contract).
    ///
    /// # Errors
    ///
    /// Fails if the program cannot be started or its input cannot be
    /// written.
    pub fn run(&self, executable: &Path, stdin: &[u8]) -> Result<Outcome, ToolchainFailure> {
        run_program(executable, stdin)
    }
}

/// Run `executable`, feeding it `stdin` and collecting its output.
///
/// # Errors
///
/// Fails if the program cannot be started or its input cannot be
/// written.
pub fn run_program(executable: &Path, stdin: &[u8]) -> Result<Outcome, ToolchainFailure> {
    event!(
        Level::INFO,
        "running {} with {} bytes of input",
        executable.display(),
        stdin.len()
    );
    let starting_failure = |error| ToolchainFailure::StartingProgram {
        program: executable.to_path_buf(),
        error,
    };
    let mut child = Command::new(executable)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(starting_failure)?;

    // The input is written on another thread while we collect the
    // output.
    let input = child.stdin.take();
    let output = thread::scope(|scope| {
        let writer = scope.spawn(move || -> io::Result<()> {
            match input {
                Some(mut pipe) => match pipe.write_all(stdin) {
                    // The program is allowed to stop early without
                    // reading all its input.
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                },
                None => Ok(()),
            }
        });
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("input writer panicked")));
        (output, written)
    });
    let (output, written) = output;
    let output = output.map_err(|error| ToolchainFailure::StartingProgram {
        program: executable.to_path_buf(),
        error,
    })?;
    written.map_err(|error| ToolchainFailure::IoErrorOnStdin {
        program: executable.to_path_buf(),
        error,
    })?;
    let outcome = outcome_of(&output);
    if !outcome.success {
        event!(
            Level::WARN,
            "{} failed with {}",
            executable.display(),
            output.status
        );
    }
    Ok(outcome)
}

/// Combines stdout and then stderr.
fn outcome_of(output: &Output) -> Outcome {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Outcome {
        output: text,
        success: output.status.success(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        assert_eq!(Ick::default().program(), Path::new("ick"));
    }

    #[test]
    fn test_missing_compiler_is_a_failure() {
        let ick = Ick::new("/nonexistent/ick-compiler");
        match ick.compile("     PLEASE GIVE UP\n") {
            Err(ToolchainFailure::StartingProgram { program, .. }) => {
                assert_eq!(program, PathBuf::from("/nonexistent/ick-compiler"));
            }
            other => panic!("expected a failure to start the compiler, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_in_writes_source() {
        let dir = TempDir::new().expect("should be able to create a temporary directory");
        let ick = Ick::new("/nonexistent/ick-compiler");
        let source = "     PLEASE GIVE UP\n";
        assert!(ick.compile_in(dir.path(), "prog", source).is_err());
        let written = fs::read_to_string(dir.path().join("prog.i"))
            .expect("the source file should have been written");
        assert_eq!(written, source);
    }

    #[test]
    fn test_failure_display() {
        let failure = ToolchainFailure::StartingProgram {
            program: PathBuf::from("ick"),
            error: IoError::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(failure.to_string(), "failed to start ick: not found");
    }
}
