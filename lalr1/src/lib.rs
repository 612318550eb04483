//! A deterministic LR(1)/LALR runtime parsing engine.
//!
//! This crate is the engine half of a grammar toolkit: it does not load
//! grammars, build LR tables, or generate code. It takes a finished
//! [`Grammar`] and [`Table`] — produced elsewhere, by a compiler this crate
//! does not contain — and drives them: the shift/reduce loop, a scannerless
//! state-sensitive lexer built on [`lexan`], a reentrant layout sub-parser,
//! lexical and syntactic disambiguation, semantic dispatch to user actions
//! or a parse tree, and error recovery.
//!
//! The driver ([`Parser`]) is generic over a semantic value type `V`
//! ([`SemanticValue`]); the default `V = ()` suits a parser that only ever
//! builds a [`Node`] tree.

mod context;
mod dispatch;
mod driver;
mod error;
mod extra;
mod grammar;
mod init;
mod layout;
mod lexer;
mod options;
mod recognizer;
mod select;
mod shared;
mod symbol;
mod table;
mod token;

pub use context::Context;
pub use dispatch::{ActionNamespace, Keyword, ProductionAction, SemanticValue, TerminalAction};
pub use driver::{Output, ParseResult, Parser};
pub use error::{Candidate, Error, InitError, Location, ParseError};
pub use extra::{Extra, Value};
pub use grammar::{AssignOp, Assignment, Grammar, Production, Terminal};
pub use options::{
    default_whitespace, CustomTokenHook, ErrorRecovery, ParserOptions, RecoveryPolicy, TableKind,
};
pub use recognizer::Recognizer;
pub use select::{DynamicFilter, DynamicKind};
pub use shared::Shared;
pub use symbol::{
    NonTerminalId, ProductionId, Symbol, TerminalId, EMPTY, FIRST_USER_TERMINAL, STOP,
};
pub use table::{order_actions, Action, Conflict, State, StateId, Table};
pub use token::{Node, OwnedToken, Token, EMPTY_TOKEN, STOP_TOKEN};
