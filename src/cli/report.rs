//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo style, in the order the build found them.
//! Kept apart from the engine so transcan can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary};
use crate::core::context::SourceFiles;
use crate::core::data::SourceLocation;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

/// Print issues in cargo-style format to stdout.
///
/// `sources` provides the file contents used to show the offending line;
/// files missing from it are reported without source context.
pub fn report(issues: &[Issue], sources: &SourceFiles) {
    report_to(issues, sources, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], sources: &SourceFiles, writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, sources, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize, translations: usize) {
    print_success_to(files, translations, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, translations: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} {} - {} {}, no issues found",
            files,
            if files == 1 { "file" } else { "files" },
            translations,
            if translations == 1 {
                "translation"
            } else {
                "translations"
            }
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(
    issue: &Issue,
    sources: &SourceFiles,
    writer: &mut W,
    max_line_width: usize,
) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    // Continuation lines of the message become notes.
    let message = issue.message();
    let mut lines = message.split('\n');
    let headline = lines.next().unwrap_or_default();

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        headline,
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(location) => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
            if let Some(source_line) = source_line(sources, location) {
                print_source_context(
                    location,
                    source_line,
                    severity,
                    writer,
                    max_line_width,
                );
            }
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    for note in lines {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            note.trim_start_matches('\t'),
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_source_context<W: Write>(
    location: &SourceLocation,
    source_line: &str,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        location.line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = source_line
        .chars()
        .take(location.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_usages<W: Write>(usages: &[SourceLocation], writer: &mut W, max_line_width: usize) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage,
            suffix,
            width = max_line_width
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn source_line<'a>(sources: &'a SourceFiles, location: &SourceLocation) -> Option<&'a str> {
    let content = sources.get(&location.file_path)?;
    content.lines().nth(location.line.checked_sub(1)?)
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(location) => Some(location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult, verbose: bool) {
    report(&result.issues, &result.sources);

    let translation_count = match &result.summary {
        CommandSummary::Extract(summary) => summary.translation_count,
        CommandSummary::Check(summary) => summary.translation_count,
    };
    if result.issues.is_empty() {
        print_success(result.files_scanned, translation_count);
    }

    if let CommandSummary::Extract(summary) = &result.summary {
        println!(
            "{} {} {}",
            "Wrote".green().bold(),
            summary.asset_path.display(),
            format!("({} translations)", translation_count).dimmed()
        );
    }

    print_parse_warning(result.parse_error_count, verbose);
}
