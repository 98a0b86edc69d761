//! Script scanner: translation records from calls to the translation service.
//!
//! A single AST pass tracks the enclosing function scopes (and the
//! `var _this = this` aliases declared in them), normalizes each callee into a
//! `ServiceReference`, and resolves the arguments of every call the matchers
//! accept.

use swc_common::SourceMap;
use swc_ecma_ast::{
    ArrowExpr, CallExpr, ClassMethod, ClassProp, Constructor, Expr, Function, GetterProp,
    MethodProp, Pat, PrivateMethod, PrivateProp, SetterProp, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{SourceLocation, TranslationRecord};
use crate::core::extract::arguments::resolve_arguments;
use crate::core::extract::conventions::ScriptConventions;
use crate::core::extract::service_ref::{ScopeChain, ScopeKind, ServiceReference, match_service};
use crate::core::extract::suppressions::Suppressions;
use crate::core::parsers::script::ParsedScript;

/// Scan a parsed script and yield its translation records in source order.
pub fn scan_script(
    parsed: &ParsedScript,
    file_path: &str,
    conventions: &ScriptConventions,
) -> impl Iterator<Item = TranslationRecord> + use<> {
    let suppressions = Suppressions::collect(
        &parsed.comments,
        &parsed.source_map,
        &conventions.suppress_comment,
    );
    let mut scanner = ScriptScanner {
        file_path,
        source_map: &parsed.source_map,
        conventions,
        suppressions,
        scopes: ScopeChain::new(),
        records: Vec::new(),
    };
    parsed.module.visit_with(&mut scanner);
    scanner.records.into_iter()
}

struct ScriptScanner<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    conventions: &'a ScriptConventions,
    suppressions: Suppressions,
    scopes: ScopeChain,
    records: Vec<TranslationRecord>,
}

impl ScriptScanner<'_> {
    fn with_scope<F>(&mut self, kind: ScopeKind, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scopes.enter(kind);
        f(self);
        self.scopes.exit();
    }

    fn collect_call(&mut self, node: &CallExpr) {
        let loc = self.source_map.lookup_char_pos(node.span.lo);
        let location = SourceLocation::new(self.file_path, loc.line, loc.col_display + 1);
        let suppressed = self.suppressions.covers(loc.line);

        for usage in resolve_arguments(&node.args, self.source_map) {
            let record = TranslationRecord::new(usage.id, usage.default_text, location.clone());
            if suppressed && record.is_dynamic() {
                continue;
            }
            self.records.push(record);
        }
    }
}

impl Visit for ScriptScanner<'_> {
    fn visit_function(&mut self, node: &Function) {
        self.with_scope(ScopeKind::Function, |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_scope(ScopeKind::Arrow, |this| node.visit_children_with(this));
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Constructor, |this| {
            node.params.visit_with(this);
            node.body.visit_with(this);
        });
    }

    // Methods visit their function's children directly so that `visit_function`
    // does not push a second, plain-function scope.

    fn visit_class_method(&mut self, node: &ClassMethod) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Method, |this| node.function.visit_children_with(this));
    }

    fn visit_private_method(&mut self, node: &PrivateMethod) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Method, |this| node.function.visit_children_with(this));
    }

    fn visit_method_prop(&mut self, node: &MethodProp) {
        node.key.visit_with(self);
        self.with_scope(ScopeKind::Method, |this| node.function.visit_children_with(this));
    }

    fn visit_getter_prop(&mut self, node: &GetterProp) {
        self.with_scope(ScopeKind::Method, |this| node.visit_children_with(this));
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.with_scope(ScopeKind::Method, |this| node.visit_children_with(this));
    }

    // Field initializers see the instance as `this`.

    fn visit_class_prop(&mut self, node: &ClassProp) {
        self.with_scope(ScopeKind::Method, |this| node.visit_children_with(this));
    }

    fn visit_private_prop(&mut self, node: &PrivateProp) {
        self.with_scope(ScopeKind::Method, |this| node.visit_children_with(this));
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Pat::Ident(binding) = &node.name {
            let is_this_alias = node
                .init
                .as_deref()
                .is_some_and(|init| matches!(init, Expr::This(_)));
            self.scopes.declare(binding.id.sym.as_str(), is_this_alias);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(reference) = ServiceReference::from_callee(&node.callee, &self.scopes)
            && match_service(&reference, self.conventions)
        {
            self.collect_call(node);
        }
        node.visit_children_with(self);
    }
}
