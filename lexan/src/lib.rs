//! Longest-match text scanning primitives.
//!
//! `lexan` has no notion of grammars, LR states or look-ahead policy; it
//! only answers "does this pattern match at this byte offset, and how long
//! is the match". The `lalr1` crate builds the state-sensitive, priority
//! ordered scanner described by the engine's lexer component on top of
//! these primitives.

mod error;
mod location;
mod matcher;

pub use error::LexanError;
pub use location::{pos_to_line_col, Location};
pub use matcher::{Pattern, RegexMatcher};
