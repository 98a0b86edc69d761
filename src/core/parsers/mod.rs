//! Parsers turning raw artifacts into the trees the scanners walk.
//!
//! - `html`: markup templates (lenient HTML tree built on quick-xml)
//! - `script`: JS/TS sources (swc AST plus extracted comments)

pub mod html;
pub mod script;

use std::path::Path;

/// Kind of source artifact, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Markup,
    Script,
}

pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

impl ArtifactKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if MARKUP_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Markup)
        } else if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Script)
        } else {
            None
        }
    }
}
