//! Translation records: the normalized unit produced by both scanners.
//!
//! A record is created by the markup or script scanner with exactly one
//! resource (the usage site). The registry then folds records that agree on
//! `(id, default_text)` into one, accumulating their resources.

use std::fmt;

use crate::core::data::SourceLocation;

/// An id or default text as found in source.
///
/// `Unresolved` keeps the raw expression text so diagnostics can show what the
/// user actually wrote (`{{ vm.key }}`, `prefix + name`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TranslationValue {
    /// A compile-time literal.
    Literal(String),
    /// A non-literal expression that cannot be resolved statically.
    Unresolved(String),
}

impl TranslationValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn unresolved(raw: impl Into<String>) -> Self {
        Self::Unresolved(raw.into())
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Unresolved(_) => None,
        }
    }

    /// Source text of the value, literal or not.
    pub fn raw(&self) -> &str {
        match self {
            Self::Literal(value) | Self::Unresolved(value) => value,
        }
    }
}

impl fmt::Display for TranslationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "\"{}\"", value),
            Self::Unresolved(raw) => write!(f, "`{}`", raw),
        }
    }
}

/// A translation usage: id, optional default text, and where it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub id: TranslationValue,
    pub default_text: Option<TranslationValue>,
    /// Usage sites in discovery order, without duplicates.
    pub resources: Vec<SourceLocation>,
}

impl TranslationRecord {
    pub fn new(
        id: TranslationValue,
        default_text: Option<TranslationValue>,
        location: SourceLocation,
    ) -> Self {
        Self {
            id,
            default_text,
            resources: vec![location],
        }
    }

    /// True if the id or the default text could not be resolved to a literal.
    pub fn is_dynamic(&self) -> bool {
        self.id.is_unresolved()
            || self
                .default_text
                .as_ref()
                .is_some_and(TranslationValue::is_unresolved)
    }

    /// Literal default text, `None` when absent or unresolved.
    pub fn default_literal(&self) -> Option<&str> {
        self.default_text.as_ref().and_then(|v| v.as_literal())
    }

    /// Same id and same default text. Absent never equals an empty string.
    pub fn is_mergeable_with(&self, other: &TranslationRecord) -> bool {
        self.id == other.id && self.default_text == other.default_text
    }

    /// Same id but a different default text.
    pub fn conflicts_with(&self, other: &TranslationRecord) -> bool {
        self.id == other.id && self.default_text != other.default_text
    }

    /// Append the resources of `other` that are not already known.
    pub fn absorb_resources(&mut self, other: impl IntoIterator<Item = SourceLocation>) {
        for location in other {
            if !self.resources.contains(&location) {
                self.resources.push(location);
            }
        }
    }
}

impl fmt::Display for TranslationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ id: {}, defaultText: ", self.id)?;
        match &self.default_text {
            Some(text) => write!(f, "{}", text)?,
            None => write!(f, "undefined")?,
        }
        let usages: Vec<String> = self.resources.iter().map(|r| r.to_string()).collect();
        write!(f, ", usages: [ {} ] }}", usages.join(", "))
    }
}
