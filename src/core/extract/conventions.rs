//! Names of the markers the scanners look for.
//!
//! Both structs deserialize from the `markup` / `script` sections of
//! `.transcanrc.json`; every field falls back to the angular-translate default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkupConventions {
    /// Tag name or attribute marking a translation site.
    pub marker: String,
    /// Attribute carrying an explicit default text.
    pub default_attribute: String,
    /// Prefix of `translate-attr-<name>` attributes.
    pub attribute_prefix: String,
    /// Prefix of `translate-default-attr-<name>` attributes.
    pub default_attribute_prefix: String,
    /// Attribute silencing dynamic-usage errors for the element.
    pub suppress_attribute: String,
    /// Filter name recognized inside `{{ ... | filter }}` interpolations.
    pub filter: String,
}

impl Default for MarkupConventions {
    fn default() -> Self {
        Self {
            marker: "translate".to_string(),
            default_attribute: "translate-default".to_string(),
            attribute_prefix: "translate-attr-".to_string(),
            default_attribute_prefix: "translate-default-attr-".to_string(),
            suppress_attribute: "suppress-dynamic-translation-error".to_string(),
            filter: "translate".to_string(),
        }
    }
}

impl MarkupConventions {
    /// Attributes that belong to the convention itself and are never scanned
    /// for filter interpolations.
    pub fn is_convention_attribute(&self, name: &str) -> bool {
        name == self.marker
            || name == self.default_attribute
            || name == self.suppress_attribute
            || name.starts_with(&self.attribute_prefix)
            || name.starts_with(&self.default_attribute_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptConventions {
    /// Name of the translation service (`$translate`).
    pub service: String,
    /// Methods of the service taking the same arguments (`$translate.instant`).
    pub service_methods: Vec<String>,
    /// Comment text silencing dynamic-usage errors for the next call.
    pub suppress_comment: String,
}

impl Default for ScriptConventions {
    fn default() -> Self {
        Self {
            service: "$translate".to_string(),
            service_methods: vec!["instant".to_string()],
            suppress_comment: "suppress-dynamic-translation-error".to_string(),
        }
    }
}
