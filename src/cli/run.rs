//! Dispatch of parsed arguments to the command handlers.

use anyhow::Result;

use super::{
    args::Command,
    commands::{CommandResult, check::check, extract::extract, init::init},
    exit_status::ExitStatus,
    report,
};

/// Outcome of one CLI invocation.
pub enum RunOutcome {
    /// A scanning command ran; its result still has to be reported.
    Scanned(CommandResult),
    /// The command printed its own output.
    Done(ExitStatus),
}

pub fn run(command: Command) -> Result<RunOutcome> {
    match command {
        Command::Extract(cmd) => extract(cmd).map(RunOutcome::Scanned),
        Command::Check(cmd) => check(cmd).map(RunOutcome::Scanned),
        Command::Init => init().map(RunOutcome::Done),
    }
}

/// Exit status for a finished scan: any error-level issue fails the run.
pub fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

pub fn finish(outcome: RunOutcome, verbose: bool) -> ExitStatus {
    match outcome {
        RunOutcome::Scanned(result) => {
            report::print(&result, verbose);
            exit_status_from_result(&result)
        }
        RunOutcome::Done(status) => status,
    }
}
