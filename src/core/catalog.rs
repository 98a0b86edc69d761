//! The catalog (id -> default text) and its persisted asset forms.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::data::TranslationRecord;

/// Ordered mapping from translation id to default text, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from registered records. Absent default texts become
    /// empty strings; records without a literal id are skipped.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TranslationRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            if let Some(id) = record.id.as_literal() {
                let text = record.default_literal().unwrap_or_default();
                catalog.insert(id, text);
            }
        }
        catalog
    }

    /// Insert unless the id is already present (first value wins).
    pub fn insert(&mut self, id: impl Into<String>, default_text: impl Into<String>) {
        self.entries
            .entry(id.into())
            .or_insert_with(|| default_text.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Persisted form of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `translations.json`: a flat JSON object.
    #[default]
    Json,
    /// `translations.js`: a CommonJS module exporting the same object.
    #[value(name = "js")]
    #[serde(rename = "js")]
    CommonJs,
}

const COMMONJS_PREFIX: &str = "module.exports =";

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "translations.json",
            OutputFormat::CommonJs => "translations.js",
        }
    }
}

/// A generated file, ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub file_name: &'static str,
    pub content: String,
}

/// Serialize the catalog in the given format, keeping catalog order.
pub fn emit_asset(catalog: &Catalog, format: OutputFormat) -> Result<Asset> {
    let json = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
    let content = match format {
        OutputFormat::Json => format!("{}\n", json),
        OutputFormat::CommonJs => format!("{} {};\n", COMMONJS_PREFIX, json),
    };
    Ok(Asset {
        file_name: format.file_name(),
        content,
    })
}

/// Read a catalog back from an asset produced by [`emit_asset`].
pub fn parse_asset(content: &str, format: OutputFormat) -> Result<Catalog> {
    let json = match format {
        OutputFormat::Json => content,
        OutputFormat::CommonJs => {
            let Some(body) = content.trim().strip_prefix(COMMONJS_PREFIX) else {
                bail!("Expected the asset to start with `{}`", COMMONJS_PREFIX);
            };
            body.trim_end().strip_suffix(';').unwrap_or(body)
        }
    };
    serde_json::from_str(json).context("Failed to parse catalog asset")
}
