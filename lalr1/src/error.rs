use std::rc::Rc;

use thiserror::Error;

use crate::symbol::{Symbol, TerminalId};
use crate::table::{Conflict, StateId};

pub use lexan::Location;

/// A candidate look-ahead the lexer found but could not pick a unique
/// winner among (spec §4.3 step 3, §7 `DisambiguationError`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub terminal: TerminalId,
    pub value: String,
}

/// No applicable action at the current state/look-ahead (spec §4.8, §7).
#[derive(Debug, Clone)]
pub struct ParseError {
    pub file_name: Option<Rc<str>>,
    pub location: Location,
    pub expected: Vec<TerminalId>,
    pub tokens_ahead: Vec<Candidate>,
    pub leading_symbol: Option<Symbol>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "parse error at {}{}: expected one of {} terminal(s)",
            self.file_name.as_deref().unwrap_or("<input>"),
            self.location,
            self.expected.len()
        )
    }
}

/// The error taxonomy of spec §7. `Init` errors are fatal and abort
/// construction; all other variants may occur while parsing, and a
/// `Parse` error may be recovered from if recovery is enabled.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parser construction failed: {0}")]
    Init(#[from] InitError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("ambiguous lexical match: {0:?}")]
    Disambiguation(Vec<Candidate>),

    #[error("dynamic disambiguation left more than one hard action at state {state:?} on {terminal:?}")]
    DynamicDisambiguationConflict {
        state: StateId,
        terminal: TerminalId,
    },

    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Construction-time failures (spec §4.7, §7).
#[derive(Debug, Error)]
pub enum InitError {
    #[error("production/terminal declares action {action_name:?} which is not registered")]
    MissingAction { action_name: String },

    #[error("ws configured but input is not text")]
    WsOnNonText,

    #[error("{0} unresolved shift/reduce conflict(s), none marked dynamic or no dynamic filter configured")]
    SrConflicts(usize, Vec<Conflict>),

    #[error("{0} unresolved reduce/reduce conflict(s), none marked dynamic or no dynamic filter configured")]
    RrConflicts(usize, Vec<Conflict>),
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:?})", self.terminal, self.value)
    }
}
