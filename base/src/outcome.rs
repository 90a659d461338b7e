/// The result of running a tool (the INTERCAL compiler, or a compiled
/// program) to completion.
///
/// A tool which ran but failed (for example because it rejected the
/// program) is described by an `Outcome` whose `success` is false; the
/// diagnostics are in `output`.  Failing to run the tool at all is a
/// different kind of problem and is reported as an error by whoever
/// tried to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Everything the tool wrote, standard output and standard error
    /// combined.
    pub output: String,
    pub success: bool,
}

impl Outcome {
    #[must_use]
    pub fn succeeded(output: String) -> Outcome {
        Outcome {
            output,
            success: true,
        }
    }

    #[must_use]
    pub fn failed(output: String) -> Outcome {
        Outcome {
            output,
            success: false,
        }
    }
}
