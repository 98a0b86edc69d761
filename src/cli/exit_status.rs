use std::process::ExitCode;

/// Process exit status of a transcan run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The build finished without error-level issues.
    Success,
    /// Dynamic usages, conflicts or unparsable files were reported.
    /// For `extract`, the asset has still been written.
    Failure,
    /// The run could not complete (bad config, unwritable output, ...).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
