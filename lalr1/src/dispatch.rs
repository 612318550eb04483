use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::grammar::AssignOp;
use crate::symbol::ProductionId;
use crate::token::Token;

/// The semantic value an action-mode [`crate::Parser`] folds its parse into.
///
/// Only consulted when a terminal or production has no action registered in
/// its [`ActionNamespace`] (spec §4.6, "If no user action is registered...").
/// Tree-mode parsers never need this trait: they build [`crate::Node`]s
/// directly and bypass it entirely.
pub trait SemanticValue: Clone {
    /// Default terminal action: the matched lexeme.
    fn from_lexeme(lexeme: &str) -> Self;
    /// Default production action when it has more than one child: collect
    /// them. (A production with exactly one child instead defaults to that
    /// child, handled by the dispatcher without calling this.)
    fn from_children(children: Vec<Self>) -> Self;
    /// Truthiness used for a `"?="` assignment (spec §3, §4.6). Most
    /// grammars never use `"?="` and can accept the default.
    fn is_truthy(&self) -> bool {
        true
    }
}

impl SemanticValue for () {
    fn from_lexeme(_lexeme: &str) -> Self {}
    fn from_children(_children: Vec<Self>) -> Self {}
}

/// A named binding's resolved argument for a production action call (spec
/// §4.6): `"="` supplies the child's value, `"?="` supplies its truthiness.
#[derive(Debug, Clone)]
pub enum Keyword<V> {
    Value(V),
    Presence(bool),
}

pub type TerminalAction<V> = Arc<dyn for<'c> Fn(&Context<'c>, Token<'c>) -> V + Send + Sync>;
pub type ProductionAction<V> =
    Arc<dyn for<'c> Fn(&Context<'c>, &[V], &[(String, Keyword<V>)]) -> V + Send + Sync>;

/// The explicit `name -> fn(context, args) -> value` mapping spec §9 asks
/// for in place of the original's dynamically-resolved-by-string-name
/// action namespace.
#[derive(Clone, Default)]
pub struct ActionNamespace<V> {
    terminal_actions: HashMap<String, TerminalAction<V>>,
    production_actions: HashMap<String, ProductionAction<V>>,
}

impl<V> ActionNamespace<V> {
    pub fn new() -> Self {
        Self {
            terminal_actions: HashMap::new(),
            production_actions: HashMap::new(),
        }
    }

    pub fn on_terminal(
        &mut self,
        name: impl Into<String>,
        action: impl for<'c> Fn(&Context<'c>, Token<'c>) -> V + Send + Sync + 'static,
    ) -> &mut Self {
        self.terminal_actions.insert(name.into(), Arc::new(action));
        self
    }

    pub fn on_production(
        &mut self,
        name: impl Into<String>,
        action: impl for<'c> Fn(&Context<'c>, &[V], &[(String, Keyword<V>)]) -> V + Send + Sync + 'static,
    ) -> &mut Self {
        self.production_actions
            .insert(name.into(), Arc::new(action));
        self
    }

    pub fn has_terminal(&self, name: &str) -> bool {
        self.terminal_actions.contains_key(name)
    }

    pub fn has_production(&self, name: &str) -> bool {
        self.production_actions.contains_key(name)
    }

    pub(crate) fn terminal(&self, name: &str) -> Option<&TerminalAction<V>> {
        self.terminal_actions.get(name)
    }

    pub(crate) fn production(&self, name: &str) -> Option<&ProductionAction<V>> {
        self.production_actions.get(name)
    }
}

impl<V> std::fmt::Debug for ActionNamespace<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ActionNamespace")
            .field("terminal_actions", &self.terminal_actions.keys().collect::<Vec<_>>())
            .field(
                "production_actions",
                &self.production_actions.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Dispatches a shift to its semantic value: the registered terminal action
/// by name if any, else the terminal's own name as a fallback action name,
/// else [`SemanticValue::from_lexeme`] (spec §4.6).
pub fn dispatch_terminal<'c, V: SemanticValue>(
    namespace: &ActionNamespace<V>,
    context: &Context<'c>,
    token: Token<'c>,
) -> V {
    let terminal = context.shared.grammar.terminal(token.symbol);
    let action_name = terminal.action_name.as_deref().unwrap_or(&terminal.name);
    if let Some(action) = namespace.terminal(action_name) {
        action(context, token)
    } else {
        V::from_lexeme(token.value)
    }
}

/// Dispatches a reduce to its semantic value (spec §4.6): the registered
/// production action by name if any (fed positional children plus resolved
/// `assignments` keyword arguments), else a single child verbatim, else
/// [`SemanticValue::from_children`].
pub fn dispatch_production<'c, V: SemanticValue>(
    namespace: &ActionNamespace<V>,
    context: &Context<'c>,
    production: ProductionId,
    children: Vec<V>,
) -> V {
    let prod = context.shared.grammar.production(production);
    let action_name = prod.action_name.as_deref().unwrap_or(context.non_terminal_name(prod.lhs));
    let keywords: Vec<(String, Keyword<V>)> = prod
        .assignments
        .iter()
        .filter_map(|assignment| {
            children.get(assignment.rhs_index).map(|child| {
                let keyword = match assignment.op {
                    AssignOp::Value => Keyword::Value(child.clone()),
                    AssignOp::Presence => Keyword::Presence(child.is_truthy()),
                };
                (assignment.name.clone(), keyword)
            })
        })
        .collect();
    if let Some(action) = namespace.production(action_name) {
        action(context, &children, &keywords)
    } else if children.len() == 1 {
        children.into_iter().next().unwrap()
    } else {
        V::from_children(children)
    }
}
