use crate::recognizer::Recognizer;
use crate::symbol::{NonTerminalId, ProductionId, Symbol, TerminalId, EMPTY, STOP};

/// A terminal symbol: its recognizer and the metadata the lexer's
/// disambiguation rules (spec §4.5) consult.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub id: TerminalId,
    pub name: String,
    pub recognizer: Recognizer,
    /// Higher priority terminals are attempted first at a given state.
    pub prior: i32,
    /// Breaks length ties among candidates in lexical disambiguation.
    pub prefer: bool,
    /// Whether a dynamic (syntactic) disambiguation filter may be consulted
    /// for actions keyed on this terminal.
    pub dynamic: bool,
    pub action_name: Option<String>,
    /// When set and this terminal matches, the lexer stops trying
    /// lower-priority terminals at the current position (spec §4.3, §8 B3).
    pub finish: bool,
}

impl Terminal {
    /// A terminal with only the fields that matter for ordinary grammars:
    /// no dynamic disambiguation, no finish flag, default priority.
    pub fn new(id: TerminalId, name: impl Into<String>, recognizer: Recognizer) -> Self {
        Self {
            id,
            name: name.into(),
            recognizer,
            prior: 0,
            prefer: false,
            dynamic: false,
            action_name: None,
            finish: false,
        }
    }

    pub fn with_prior(mut self, prior: i32) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_prefer(mut self, prefer: bool) -> Self {
        self.prefer = prefer;
        self
    }

    pub fn with_finish(mut self, finish: bool) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_action_name(mut self, name: impl Into<String>) -> Self {
        self.action_name = Some(name.into());
        self
    }
}

/// How a production's named binding converts its RHS argument: `"="` passes
/// the child's value, `"?="` passes whether the child is truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Value,
    Presence,
}

/// A named binding of an RHS position to a keyword argument passed to a
/// production's action (spec §3, `Production.assignments`).
#[derive(Debug, Clone)]
pub struct Assignment {
    pub name: String,
    pub rhs_index: usize,
    pub op: AssignOp,
}

/// `P = (lhs, rhs, action_name?, dynamic, assignments?, prod_symbol_id)` (spec §3).
#[derive(Debug, Clone)]
pub struct Production {
    pub id: ProductionId,
    pub lhs: NonTerminalId,
    pub rhs: Vec<Symbol>,
    pub action_name: Option<String>,
    pub dynamic: bool,
    pub assignments: Vec<Assignment>,
}

impl Production {
    pub fn new(id: ProductionId, lhs: NonTerminalId, rhs: Vec<Symbol>) -> Self {
        Self {
            id,
            lhs,
            rhs,
            action_name: None,
            dynamic: false,
            assignments: Vec::new(),
        }
    }

    pub fn with_action_name(mut self, name: impl Into<String>) -> Self {
        self.action_name = Some(name.into());
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }
}

/// A read-only description of a grammar: its terminals, non-terminal names,
/// productions, the start production and, if any, the `LAYOUT` non-terminal
/// (spec §3, "Grammar").
#[derive(Debug, Clone)]
pub struct Grammar {
    pub terminals: Vec<Terminal>,
    pub non_terminal_names: Vec<String>,
    pub productions: Vec<Production>,
    pub start_production: ProductionId,
    pub layout_non_terminal: Option<NonTerminalId>,
}

impl Grammar {
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.0 as usize]
    }

    pub fn terminal_name(&self, id: TerminalId) -> &str {
        if id == EMPTY {
            "EMPTY"
        } else if id == STOP {
            "STOP"
        } else {
            &self.terminal(id).name
        }
    }

    pub fn non_terminal_name(&self, id: NonTerminalId) -> &str {
        &self.non_terminal_names[id.0 as usize]
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.0 as usize]
    }

    pub fn symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(t) => self.terminal_name(t),
            Symbol::NonTerminal(n) => self.non_terminal_name(n),
        }
    }
}
