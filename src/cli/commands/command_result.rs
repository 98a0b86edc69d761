use std::path::PathBuf;

use crate::core::context::SourceFiles;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Check(CheckSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Where the asset was written.
    pub asset_path: PathBuf,
    pub translation_count: usize,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub translation_count: usize,
}

/// Result of running a scanning command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, parse errors first.
    pub issues: Vec<Issue>,
    /// Contents of the files the issues point into.
    pub sources: SourceFiles,
    /// Number of files that failed to read or parse.
    pub parse_error_count: usize,
    /// Number of markup and script files scanned.
    pub files_scanned: usize,
}
