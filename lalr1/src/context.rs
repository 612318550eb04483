use std::rc::Rc;

use crate::extra::Extra;
use crate::shared::Shared;
use crate::symbol::{NonTerminalId, ProductionId, Symbol, TerminalId};
use crate::table::StateId;
use crate::token::{Node, Token};

/// Per-step snapshot threaded through the driver (spec §3, §4.2). A fresh
/// `Context` is derived from the previous one at every shift and reduce,
/// carrying `extra`, `file_name`, `input_str` and `shared` forward and
/// overwriting the positional/state fields explicitly — never as a linked
/// list of owned records (spec §9, "Context threading"), just a snapshot
/// plus the small mutable carrier (`extra`).
pub struct Context<'c> {
    pub shared: &'c Shared<'c>,
    pub state: StateId,
    pub position: usize,
    pub start_position: usize,
    pub end_position: usize,
    pub token: Option<Token<'c>>,
    pub token_ahead: Option<Token<'c>>,
    pub production: Option<ProductionId>,
    pub layout_content: &'c str,
    pub layout_content_ahead: &'c str,
    /// Set only while [`crate::Parser::call_actions`] walks a previously
    /// built tree; `None` during an ordinary parse.
    pub node: Option<Rc<Node>>,
    pub file_name: Option<Rc<str>>,
    pub input_str: &'c str,
    pub extra: Extra,
}

impl<'c> Context<'c> {
    pub fn initial(shared: &'c Shared<'c>, input_str: &'c str, file_name: Option<Rc<str>>) -> Self {
        let state = shared.table.initial_for(shared.options.start_prod_id);
        Self::initial_at(shared, state, input_str, file_name, 0)
    }

    /// Like [`Self::initial`] but at an explicit state and position; used to
    /// seed the reentrant layout sub-parser (spec §4.4) at its own start
    /// state without disturbing the main parse's position.
    pub fn initial_at(
        shared: &'c Shared<'c>,
        state: StateId,
        input_str: &'c str,
        file_name: Option<Rc<str>>,
        position: usize,
    ) -> Self {
        Self {
            shared,
            state,
            position,
            start_position: position,
            end_position: position,
            token: None,
            token_ahead: None,
            production: None,
            layout_content: "",
            layout_content_ahead: "",
            node: None,
            file_name,
            input_str,
            extra: Extra::new(),
        }
    }

    /// Derives the next step's context from `self`, per spec §4.2: carries
    /// `extra`/`file_name`/`input_str`/`shared` forward, resets the rest.
    pub fn derive(&self, state: StateId) -> Self {
        Self {
            shared: self.shared,
            state,
            position: self.position,
            start_position: self.position,
            end_position: self.position,
            token: None,
            token_ahead: self.token_ahead,
            production: None,
            layout_content: "",
            layout_content_ahead: self.layout_content_ahead,
            node: None,
            file_name: self.file_name.clone(),
            input_str: self.input_str,
            extra: self.extra.clone(),
        }
    }

    /// The symbol this context is "about": the look-ahead/shifted token's
    /// terminal, else the reduction's production's LHS, else the node being
    /// walked by `call_actions` (spec §4.2).
    pub fn symbol(&self) -> Option<Symbol> {
        if let Some(token) = &self.token {
            Some(Symbol::Terminal(token.symbol))
        } else if let Some(production) = self.production {
            Some(Symbol::NonTerminal(self.shared.grammar.production(production).lhs))
        } else if let Some(node) = &self.node {
            match node.as_ref() {
                Node::Term { token, .. } => Some(Symbol::Terminal(token.symbol)),
                Node::NonTerm { production, .. } => {
                    Some(Symbol::NonTerminal(self.shared.grammar.production(*production).lhs))
                }
            }
        } else {
            None
        }
    }

    pub fn expected_terminals(&self) -> Vec<TerminalId> {
        self.shared
            .table
            .state(self.state)
            .actions
            .iter()
            .map(|(t, _)| *t)
            .collect()
    }

    pub fn non_terminal_name(&self, id: NonTerminalId) -> &str {
        self.shared.grammar.non_terminal_name(id)
    }
}
