//! Angular interpolation handling for markup values.
//!
//! Text and attribute values may embed `{{ expression }}` interpolations. A value
//! containing one cannot be resolved statically, unless it is the
//! `{{ 'KEY' | translate }}` filter form, which is itself a translation usage.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::TranslationValue;

static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());

static QUOTED_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:'([^'\\]*)'|"([^"\\]*)")$"#).unwrap());

pub fn contains_interpolation(value: &str) -> bool {
    INTERPOLATION_REGEX.is_match(value)
}

/// Classify a markup value: literal text, or unresolved if it interpolates.
pub fn markup_value(value: &str) -> TranslationValue {
    if contains_interpolation(value) {
        TranslationValue::unresolved(value)
    } else {
        TranslationValue::literal(value)
    }
}

/// Ids of every `{{ <expr> | <filter> }}` interpolation in `value`, in order.
///
/// A quoted literal expression yields a literal id, anything else the raw
/// expression as an unresolved id.
pub fn filter_usages(value: &str, filter: &str) -> Vec<TranslationValue> {
    INTERPOLATION_REGEX
        .captures_iter(value)
        .filter_map(|caps| {
            let expression = caps.get(1)?.as_str();
            let segments = split_pipes(expression);
            let (subject, filters) = segments.split_first()?;
            let uses_filter = filters.iter().any(|segment| filter_name(segment) == filter);
            uses_filter.then(|| subject_value(subject))
        })
        .collect()
}

fn subject_value(subject: &str) -> TranslationValue {
    let subject = subject.trim();
    let unbound = subject.strip_prefix("::").unwrap_or(subject).trim();
    match QUOTED_LITERAL_REGEX.captures(unbound) {
        Some(caps) => {
            let literal = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            TranslationValue::literal(literal)
        }
        None => TranslationValue::unresolved(subject),
    }
}

/// `translate:values` -> `translate`
fn filter_name(segment: &str) -> &str {
    segment.split(':').next().unwrap_or_default().trim()
}

/// Split an expression on filter pipes, ignoring `||` and quoted text.
fn split_pipes(expression: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    let chars: Vec<(usize, char)> = expression.char_indices().collect();

    for (i, &(offset, c)) in chars.iter().enumerate() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '|') => {
                let prev_pipe = i > 0 && chars[i - 1].1 == '|';
                let next_pipe = chars.get(i + 1).is_some_and(|&(_, n)| n == '|');
                if !prev_pipe && !next_pipe {
                    segments.push(&expression[start..offset]);
                    start = offset + 1;
                }
            }
            _ => {}
        }
    }
    segments.push(&expression[start..]);
    segments
}
