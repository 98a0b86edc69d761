//! Markup scanner: translation records from a parsed HTML template.
//!
//! Recognized forms (with default conventions):
//!
//! ```html
//! <translate>HELLO</translate>                       <!-- element form -->
//! <div translate>Login</div>                         <!-- id from content -->
//! <div translate="LOGIN">Log in</div>                <!-- id + default from content -->
//! <div translate="LOGIN" translate-default="Log in"></div>
//! <img translate-attr-title="LOGO" translate-default-attr-title="Our logo">
//! <span>{{ 'HELLO' | translate }}</span>             <!-- filter form -->
//! ```
//!
//! Dynamic records from an element carrying `suppress-dynamic-translation-error`
//! are dropped here, before they ever reach the registry.

use crate::core::data::{SourceLocation, TranslationRecord, TranslationValue};
use crate::core::extract::conventions::MarkupConventions;
use crate::core::extract::interpolation::{filter_usages, markup_value};
use crate::core::parsers::html::{Document, Element, Node};

/// Scan a parsed template and yield its translation records in document order.
pub fn scan_markup(
    document: &Document,
    file_path: &str,
    conventions: &MarkupConventions,
) -> impl Iterator<Item = TranslationRecord> + use<> {
    let mut scanner = MarkupScanner {
        file_path,
        conventions,
        records: Vec::new(),
    };
    scanner.scan_nodes(&document.children, false);
    scanner.records.into_iter()
}

struct MarkupScanner<'a> {
    file_path: &'a str,
    conventions: &'a MarkupConventions,
    records: Vec<TranslationRecord>,
}

impl MarkupScanner<'_> {
    fn scan_nodes(&mut self, nodes: &[Node], suppressed: bool) {
        for node in nodes {
            match node {
                Node::Element(element) => self.scan_element(element),
                Node::Text(text) => {
                    let location = SourceLocation::new(self.file_path, text.line, text.col);
                    self.collect_filters(&text.text, &location, suppressed);
                }
            }
        }
    }

    fn scan_element(&mut self, element: &Element) {
        let suppressed = element.has_attribute(&self.conventions.suppress_attribute);
        let location = SourceLocation::new(self.file_path, element.line, element.col);

        if self.is_translation_site(element)
            && let Some(record) = self.primary_record(element, location.clone())
        {
            self.push(record, suppressed);
        }

        for attribute in &element.attributes {
            if let Some(target) = attribute.name.strip_prefix(&self.conventions.attribute_prefix)
            {
                let record =
                    self.attribute_record(element, target, &attribute.value, location.clone());
                self.push(record, suppressed);
            }
        }

        for attribute in &element.attributes {
            if !self.conventions.is_convention_attribute(&attribute.name) {
                self.collect_filters(&attribute.value, &location, suppressed);
            }
        }

        // The suppression marker covers the element's own text, not nested elements.
        self.scan_nodes(&element.children, suppressed);
    }

    fn is_translation_site(&self, element: &Element) -> bool {
        element.name == self.conventions.marker || element.has_attribute(&self.conventions.marker)
    }

    /// The element's own translation: id from the marker attribute or the
    /// content, default text from the default attribute or the content.
    ///
    /// An element with neither an id nor content only translates its
    /// attributes when it declares any; otherwise it yields an empty id.
    fn primary_record(
        &self,
        element: &Element,
        location: SourceLocation,
    ) -> Option<TranslationRecord> {
        let content = element.direct_text();
        let explicit_id = element
            .attribute(&self.conventions.marker)
            .map(|a| a.value.trim())
            .filter(|v| !v.is_empty());

        let (id, id_from_content) = match explicit_id {
            Some(value) => (markup_value(value), false),
            None if content.is_empty() => {
                if self.has_attribute_translations(element) {
                    return None;
                }
                (TranslationValue::unresolved(""), true)
            }
            None => (markup_value(&content), true),
        };

        let default_text = match element.attribute(&self.conventions.default_attribute) {
            Some(attribute) => Some(markup_value(&attribute.value)),
            None if !id_from_content && !content.is_empty() => Some(markup_value(&content)),
            None => None,
        };

        Some(TranslationRecord::new(id, default_text, location))
    }

    fn has_attribute_translations(&self, element: &Element) -> bool {
        element
            .attributes
            .iter()
            .any(|a| a.name.starts_with(&self.conventions.attribute_prefix))
    }

    /// A `translate-attr-<target>` declaration.
    fn attribute_record(
        &self,
        element: &Element,
        target: &str,
        declared_id: &str,
        location: SourceLocation,
    ) -> TranslationRecord {
        let declared_id = declared_id.trim();
        let id = if !declared_id.is_empty() {
            markup_value(declared_id)
        } else {
            match element.attribute(target).map(|a| a.value.trim()) {
                Some(value) if !value.is_empty() => markup_value(value),
                _ => TranslationValue::unresolved(""),
            }
        };

        let default_name = format!("{}{}", self.conventions.default_attribute_prefix, target);
        let default_text = element
            .attribute(&default_name)
            .map(|a| markup_value(&a.value));

        TranslationRecord::new(id, default_text, location)
    }

    fn collect_filters(&mut self, value: &str, location: &SourceLocation, suppressed: bool) {
        for id in filter_usages(value, &self.conventions.filter) {
            let record = TranslationRecord::new(id, None, location.clone());
            self.push(record, suppressed);
        }
    }

    fn push(&mut self, record: TranslationRecord, suppressed: bool) {
        if suppressed && record.is_dynamic() {
            return;
        }
        self.records.push(record);
    }
}
