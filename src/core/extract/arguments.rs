//! Argument resolution for translation service calls.
//!
//! ```js
//! $translate('ID');                                   // id
//! $translate('ID', 'Default');                        // id, default text
//! $translate(['A', 'B'], { A: 'Default A' });         // one usage per id
//! ```
//!
//! Anything that is not a literal of the expected shape is kept as an
//! unresolved value carrying its source text.

use swc_common::{SourceMap, SourceMapper, Spanned};
use swc_ecma_ast::{ArrayLit, Expr, ExprOrSpread, Lit, ObjectLit, Prop, PropName, PropOrSpread};

use crate::core::data::TranslationValue;

/// One translation usage found in a call's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUsage {
    pub id: TranslationValue,
    pub default_text: Option<TranslationValue>,
}

/// Resolve the arguments of a service call into usages. A call without
/// arguments is not a usage.
pub fn resolve_arguments(args: &[ExprOrSpread], source_map: &SourceMap) -> Vec<ResolvedUsage> {
    let Some(first) = args.first() else {
        return Vec::new();
    };
    let second = args.get(1);

    if first.spread.is_none()
        && let Expr::Array(ids) = &*first.expr
    {
        return resolve_id_array(ids, second, source_map);
    }

    vec![ResolvedUsage {
        id: argument_value(first, source_map),
        default_text: second.map(|arg| argument_value(arg, source_map)),
    }]
}

/// Default texts supplied alongside an id array.
enum DefaultTexts<'a> {
    Absent,
    Object(&'a ObjectLit),
    Unresolved(String),
}

fn resolve_id_array(
    ids: &ArrayLit,
    second: Option<&ExprOrSpread>,
    source_map: &SourceMap,
) -> Vec<ResolvedUsage> {
    let defaults = match second {
        None => DefaultTexts::Absent,
        Some(arg) => match &*arg.expr {
            Expr::Object(object) if arg.spread.is_none() => DefaultTexts::Object(object),
            _ => DefaultTexts::Unresolved(source_text(arg, source_map)),
        },
    };

    // Holes (`[, 'A']`) are skipped.
    ids.elems
        .iter()
        .flatten()
        .map(|element| {
            let id = argument_value(element, source_map);
            let default_text = match &defaults {
                DefaultTexts::Absent => None,
                DefaultTexts::Object(object) => id
                    .as_literal()
                    .and_then(|key| object_entry(object, key, source_map)),
                DefaultTexts::Unresolved(raw) => Some(TranslationValue::unresolved(raw.as_str())),
            };
            ResolvedUsage { id, default_text }
        })
        .collect()
}

/// Value of the last property named `key`, as in JavaScript.
fn object_entry(object: &ObjectLit, key: &str, source_map: &SourceMap) -> Option<TranslationValue> {
    object.props.iter().rev().find_map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        match &**prop {
            Prop::KeyValue(kv) if prop_name(&kv.key) == Some(key) => {
                Some(expr_value(&kv.value, source_map))
            }
            Prop::Shorthand(ident) if ident.sym.as_str() == key => {
                Some(TranslationValue::unresolved(ident.sym.as_str()))
            }
            _ => None,
        }
    })
}

fn prop_name(name: &PropName) -> Option<&str> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

fn argument_value(arg: &ExprOrSpread, source_map: &SourceMap) -> TranslationValue {
    if arg.spread.is_some() {
        return TranslationValue::unresolved(source_text(arg, source_map));
    }
    expr_value(&arg.expr, source_map)
}

/// A string literal or an expression-free template literal resolves; anything
/// else stays unresolved.
pub fn expr_value(expr: &Expr, source_map: &SourceMap) -> TranslationValue {
    match string_literal(expr) {
        Some(value) => TranslationValue::literal(value),
        None => TranslationValue::unresolved(expr_source_text(expr, source_map)),
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|cooked| cooked.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

fn source_text(arg: &ExprOrSpread, source_map: &SourceMap) -> String {
    let text = expr_source_text(&arg.expr, source_map);
    match arg.spread {
        Some(_) => format!("...{}", text),
        None => text,
    }
}

fn expr_source_text(expr: &Expr, source_map: &SourceMap) -> String {
    source_map.span_to_snippet(expr.span()).unwrap_or_default()
}
