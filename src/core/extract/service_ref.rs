//! Normalized view of a call's callee, and the matchers deciding whether it
//! reaches the translation service.
//!
//! The callee shapes below all normalize to the same `ServiceReference`
//! vocabulary (receiver, name, optional method, scope capture):
//!
//! ```js
//! $translate('A');                       // bare identifier
//! $translate.instant('A');               // bare identifier, service method
//! this.$translate('A');                  // `this` from a constructor or method
//! () => this.$translate('A');            // `this` captured by an arrow
//! var _this = this;
//! list.forEach(function () { _this.$translate('A'); });   // alias of `this`
//! ```

use std::collections::HashMap;

use swc_ecma_ast::{Callee, Expr, MemberExpr, MemberProp};

use crate::core::extract::conventions::ScriptConventions;

/// Kind of function-like scope, as far as the binding of `this` is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    /// Plain `function` declaration or expression.
    Function,
    /// Class or object method, accessor, or class field initializer.
    Method,
    Constructor,
    /// Arrow function: has no `this` of its own.
    Arrow,
}

#[derive(Debug)]
struct Frame {
    kind: ScopeKind,
    /// Variables declared in this frame; `true` when initialized with `this`.
    bindings: HashMap<String, bool>,
}

/// Stack of enclosing function scopes, innermost last.
#[derive(Debug)]
pub struct ScopeChain {
    frames: Vec<Frame>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                kind: ScopeKind::Module,
                bindings: HashMap::new(),
            }],
        }
    }

    pub fn enter(&mut self, kind: ScopeKind) {
        self.frames.push(Frame {
            kind,
            bindings: HashMap::new(),
        });
    }

    pub fn exit(&mut self) {
        // The module frame is never popped.
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Record a variable declaration in the innermost scope.
    pub fn declare(&mut self, name: &str, is_this_alias: bool) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.to_string(), is_this_alias);
        }
    }

    fn innermost_is_arrow(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.kind == ScopeKind::Arrow)
    }

    /// Frame index declaring `name` as an alias of `this`. An inner
    /// declaration of the same name that is not an alias shadows it.
    fn alias_frame(&self, name: &str) -> Option<usize> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, frame)| frame.bindings.get(name).map(|alias| (index, *alias)))
            .and_then(|(index, alias)| alias.then_some(index))
    }

    /// Scope providing `this` when seen from frame `index`: the nearest
    /// enclosing frame that is not an arrow.
    fn this_origin_from(&self, index: usize) -> ScopeKind {
        self.frames[..=index]
            .iter()
            .rev()
            .map(|frame| frame.kind)
            .find(|kind| *kind != ScopeKind::Arrow)
            .unwrap_or(ScopeKind::Module)
    }

    fn this_origin(&self) -> ScopeKind {
        self.this_origin_from(self.frames.len() - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `$translate(...)`
    Bare,
    /// `this.$translate(...)`
    This,
    /// `_this.$translate(...)` where `_this` was declared as `this`.
    Alias,
}

/// A callee reduced to what the matchers need to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReference<'a> {
    pub receiver: Receiver,
    /// Accessed name: the identifier, or the property read from the receiver.
    pub name: &'a str,
    /// Method called on the named value, as in `$translate.instant`.
    pub method: Option<&'a str>,
    /// Innermost enclosing scope is an arrow function.
    pub in_arrow: bool,
    /// Scope the receiver's `this` binds to. `None` for bare references.
    pub this_origin: Option<ScopeKind>,
}

impl<'a> ServiceReference<'a> {
    /// Normalize a callee, or `None` when its shape can never be the service.
    pub fn from_callee(callee: &'a Callee, scopes: &ScopeChain) -> Option<Self> {
        let Callee::Expr(expr) = callee else {
            return None;
        };

        if let Some(reference) = Self::from_access(expr, None, scopes) {
            return Some(reference);
        }

        let Expr::Member(member) = &**expr else {
            return None;
        };
        let method = member_prop_name(member)?;
        Self::from_access(&member.obj, Some(method), scopes)
    }

    fn from_access(expr: &'a Expr, method: Option<&'a str>, scopes: &ScopeChain) -> Option<Self> {
        match expr {
            Expr::Ident(ident) => Some(Self {
                receiver: Receiver::Bare,
                name: ident.sym.as_str(),
                method,
                in_arrow: scopes.innermost_is_arrow(),
                this_origin: None,
            }),
            Expr::Member(member) => {
                let name = member_prop_name(member)?;
                match &*member.obj {
                    Expr::This(_) => Some(Self {
                        receiver: Receiver::This,
                        name,
                        method,
                        in_arrow: scopes.innermost_is_arrow(),
                        this_origin: Some(scopes.this_origin()),
                    }),
                    Expr::Ident(alias) => {
                        let frame = scopes.alias_frame(alias.sym.as_str())?;
                        Some(Self {
                            receiver: Receiver::Alias,
                            name,
                            method,
                            in_arrow: scopes.innermost_is_arrow(),
                            this_origin: Some(scopes.this_origin_from(frame)),
                        })
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn member_prop_name(member: &MemberExpr) -> Option<&str> {
    match &member.prop {
        MemberProp::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}

/// Access shapes under which the service is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Arrow,
    Constructor,
    MemberFunction,
    Bare,
}

type Matcher = fn(&ServiceReference<'_>) -> bool;

/// Tried in order; the first match wins.
const MATCHERS: &[(Capture, Matcher)] = &[
    (Capture::Arrow, is_arrow_capture),
    (Capture::Constructor, is_constructor_capture),
    (Capture::MemberFunction, is_member_function_capture),
    (Capture::Bare, is_bare_identifier),
];

fn captures_this(reference: &ServiceReference<'_>) -> bool {
    matches!(reference.receiver, Receiver::This | Receiver::Alias)
}

fn is_arrow_capture(reference: &ServiceReference<'_>) -> bool {
    captures_this(reference)
        && reference.in_arrow
        && reference
            .this_origin
            .is_some_and(|origin| origin != ScopeKind::Module)
}

fn is_constructor_capture(reference: &ServiceReference<'_>) -> bool {
    captures_this(reference) && reference.this_origin == Some(ScopeKind::Constructor)
}

fn is_member_function_capture(reference: &ServiceReference<'_>) -> bool {
    captures_this(reference)
        && matches!(
            reference.this_origin,
            Some(ScopeKind::Method | ScopeKind::Function)
        )
}

fn is_bare_identifier(reference: &ServiceReference<'_>) -> bool {
    reference.receiver == Receiver::Bare
}

/// Decide whether `reference` is a call to the translation service.
pub fn match_service(reference: &ServiceReference<'_>, conventions: &ScriptConventions) -> bool {
    matched_capture(reference, conventions).is_some()
}

fn matched_capture(
    reference: &ServiceReference<'_>,
    conventions: &ScriptConventions,
) -> Option<Capture> {
    if reference.name != conventions.service {
        return None;
    }
    if let Some(method) = reference.method
        && !conventions.service_methods.iter().any(|m| m == method)
    {
        return None;
    }
    MATCHERS
        .iter()
        .find(|(_, matcher)| matcher(reference))
        .map(|(capture, _)| *capture)
}
