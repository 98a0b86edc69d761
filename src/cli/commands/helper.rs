use super::{CommandResult, CommandSummary};
use crate::core::context::ExtractOutput;
use crate::issues::{Issue, Severity};

/// Count issues by severity and package a command result.
///
/// Issues keep the order the build produced them in.
pub fn finish(summary: CommandSummary, output: ExtractOutput) -> CommandResult {
    let ExtractOutput {
        issues,
        sources,
        files_scanned,
        ..
    } = output;

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        sources,
        parse_error_count,
        files_scanned,
    }
}
