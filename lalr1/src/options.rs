use std::collections::BTreeSet;
use std::sync::Arc;

use crate::context::Context;
use crate::error::ParseError;
use crate::symbol::ProductionId;
use crate::token::Token;

/// Which table flavor the caller's table was built as. Carried only for
/// diagnostics; the runtime drives both the same way (spec §6, `tables`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Slr,
    Lalr,
}

/// A custom error-recovery policy (spec §4.8, §6 `error_recovery`). Receives
/// the context at the point of failure and the error that triggered
/// recovery; returns a synthetic look-ahead token (or `None` to force
/// re-lexing) and a new position to resume at (or `None` to give up).
pub type RecoveryPolicy =
    Arc<dyn for<'c> Fn(&Context<'c>, &ParseError) -> (Option<Token<'c>>, Option<usize>) + Send + Sync>;

/// Whether, and how, the driver attempts to recover from a `ParseError`.
#[derive(Clone)]
pub enum ErrorRecovery {
    Disabled,
    /// Drop one code unit and resume (spec §4.8 default policy, scenario 5).
    Default,
    Custom(RecoveryPolicy),
}

impl ErrorRecovery {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ErrorRecovery::Disabled)
    }
}

impl std::fmt::Debug for ErrorRecovery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorRecovery::Disabled => write!(f, "ErrorRecovery::Disabled"),
            ErrorRecovery::Default => write!(f, "ErrorRecovery::Default"),
            ErrorRecovery::Custom(_) => write!(f, "ErrorRecovery::Custom(..)"),
        }
    }
}

/// A hook that may replace the lexer's recognizer-derived candidate list
/// (spec §4.3, step 1, "custom token recognition"). `default_tokens` is a
/// continuation producing what the lexer would have returned on its own;
/// the hook may call it, ignore it, or augment it.
pub type CustomTokenHook = Arc<
    dyn for<'c> Fn(&Context<'c>, &dyn Fn() -> Vec<Token<'c>>) -> Option<Vec<Token<'c>>> + Send + Sync,
>;

/// Construction options for a [`crate::Parser`] (spec §6).
#[derive(Clone)]
pub struct ParserOptions {
    pub in_layout: bool,
    pub ws: Option<BTreeSet<char>>,
    pub consume_input: bool,
    pub build_tree: bool,
    pub call_actions_during_tree_build: bool,
    pub tables: TableKind,
    pub return_position: bool,
    pub start_prod_id: Option<ProductionId>,
    pub prefer_shifts_over_empty: bool,
    pub error_recovery: ErrorRecovery,
    pub custom_token_recognition: Option<CustomTokenHook>,
    pub lexical_disambiguation: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            in_layout: false,
            ws: None,
            consume_input: true,
            build_tree: false,
            call_actions_during_tree_build: false,
            tables: TableKind::Lalr,
            return_position: false,
            start_prod_id: None,
            prefer_shifts_over_empty: true,
            error_recovery: ErrorRecovery::Disabled,
            custom_token_recognition: None,
            lexical_disambiguation: true,
        }
    }
}

/// The default whitespace characters used when the grammar has no `LAYOUT`
/// non-terminal and no explicit `ws` was configured (spec §6).
pub fn default_whitespace() -> BTreeSet<char> {
    ['\n', '\r', '\t', ' '].into_iter().collect()
}
