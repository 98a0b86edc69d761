//! Core extraction engine.
//!
//! ## Pipeline
//!
//! 1. **Discovery** (`file_scanner`): markup and script files under the source root
//! 2. **Parsing** (`parsers`): HTML documents and swc ASTs, one file per task
//! 3. **Extraction** (`extract`): translation records per file
//! 4. **Merging** (`registry`): one catalog plus conflict and dynamic-usage issues
//! 5. **Serialization** (`catalog`): the `translations.json` / `.js` asset
//!
//! `context` drives the whole pipeline for the CLI.

pub mod catalog;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod registry;

pub use catalog::{Asset, Catalog, OutputFormat, emit_asset, parse_asset};
pub use context::{ExtractContext, ExtractOutput, SourceFiles};
pub use data::{SourceLocation, TranslationRecord, TranslationValue};
pub use registry::{Registry, RegistryOutput, SharedRegistry};
