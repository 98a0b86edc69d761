//! Issue types for extraction results.
//!
//! Each issue is self-contained: it carries the records (or file) it is about,
//! so the reporter can render it without going back to the registry.

use enum_dispatch::enum_dispatch;

use crate::core::data::{SourceLocation, TranslationRecord};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DynamicTranslation,
    ConflictingTranslation,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DynamicTranslation => write!(f, "dynamic-translation"),
            Rule::ConflictingTranslation => write!(f, "conflicting-translation"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A usage whose id or default text is not a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicUsageIssue {
    pub record: TranslationRecord,
}

impl DynamicUsageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DynamicTranslation
    }
}

/// Two usages of one id with different default texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictIssue {
    /// The record already in the catalog (its default text wins).
    pub existing: TranslationRecord,
    /// Every usage of the rejected default text.
    pub conflicting: TranslationRecord,
}

impl ConflictIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ConflictingTranslation
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while extracting translations.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DynamicUsage(DynamicUsageIssue),
    Conflict(ConflictIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::DynamicUsage(_) => DynamicUsageIssue::severity(),
            Issue::Conflict(_) => ConflictIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::DynamicUsage(_) => DynamicUsageIssue::rule(),
            Issue::Conflict(_) => ConflictIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A usage site in source.
    Source(&'a SourceLocation),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Primary location: the first usage of the offending record.
    fn location(&self) -> ReportLocation<'_>;

    /// Full message. The first line is the headline; following lines are
    /// indented with a tab.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Usage locations after the primary one.
    fn usages(&self) -> &[SourceLocation] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

fn record_location(record: &TranslationRecord) -> ReportLocation<'_> {
    match record.resources.first() {
        Some(location) => ReportLocation::Source(location),
        None => ReportLocation::File { path: "" },
    }
}

fn later_usages(record: &TranslationRecord) -> &[SourceLocation] {
    record.resources.get(1..).unwrap_or_default()
}

impl Report for DynamicUsageIssue {
    fn location(&self) -> ReportLocation<'_> {
        record_location(&self.record)
    }

    fn message(&self) -> String {
        if self.record.id.is_unresolved() && self.record.id.raw().is_empty() {
            return "Failed to extract a translation: no id was given and there is no content to use as one."
                .to_string();
        }
        format!(
            "Failed to extract the translation {}: the id or the default text is not a literal.",
            self.record
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn usages(&self) -> &[SourceLocation] {
        later_usages(&self.record)
    }
}

impl Report for ConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        record_location(&self.conflicting)
    }

    fn message(&self) -> String {
        format!(
            "Two translations with the same id {} but different default texts.\n\tExisting: {}\n\tNew: {}",
            self.existing.id, self.existing, self.conflicting
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn usages(&self) -> &[SourceLocation] {
        later_usages(&self.conflicting)
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Tests
// ============================================================
