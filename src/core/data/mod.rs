//! Core data types shared by the scanners, the registry and the reporter.
//!
//! - `record`: `TranslationRecord` and the tagged `TranslationValue`
//! - `source`: `SourceLocation` and byte-offset to line/column mapping

pub mod record;
pub mod source;

pub use record::{TranslationRecord, TranslationValue};
pub use source::{LineIndex, SourceLocation};
