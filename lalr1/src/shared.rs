use crate::grammar::Grammar;
use crate::options::ParserOptions;
use crate::table::Table;

/// The grammar, table and configuration an engine instance parses with.
/// Immutable and read-only for the duration of every `parse` call (spec §5);
/// this is the value a [`crate::Context`] borrows rather than a live handle
/// back to the driver, sidestepping the aliasing a mutable back-pointer
/// would force onto every recognizer/action callback. Deliberately
/// independent of the semantic value type `V`: a recognizer only ever needs
/// the grammar, table, options and the per-step position/state/extra data
/// that [`crate::Context`] carries, never the in-progress value stack.
pub struct Shared<'g> {
    pub grammar: &'g Grammar,
    pub table: &'g Table,
    pub options: &'g ParserOptions,
}
