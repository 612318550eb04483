use std::sync::Arc;

use crate::context::Context;
use crate::grammar::Grammar;
use crate::symbol::TerminalId;
use crate::table::Action;

/// Which kind of candidate action a [`DynamicFilter`] is being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicKind {
    Shift,
    Reduce,
}

/// A syntactic (dynamic) disambiguation predicate (spec §4.5, §4.7). Called
/// once with `(initial_context, Shift, None)` before parsing begins to let it
/// initialize, then once per dynamic-flagged candidate action thereafter;
/// `subresults` is `Some(top-k values)` for a dynamic `Reduce`, `None`
/// otherwise. The action survives iff the filter returns `true`.
pub type DynamicFilter<V> =
    Arc<dyn for<'c> Fn(&Context<'c>, DynamicKind, Option<&[V]>) -> bool + Send + Sync>;

/// Shrinks `actions` by the dynamic filter: non-dynamic candidates pass
/// through unchanged; a `Shift` whose look-ahead terminal is `dynamic`, or a
/// `Reduce` whose production is `dynamic`, is kept only if the filter
/// approves it.
pub fn filter_actions<'c, V>(
    filter: &DynamicFilter<V>,
    grammar: &Grammar,
    context: &Context<'c>,
    terminal: TerminalId,
    actions: &[Action],
    value_stack: &[V],
) -> Vec<Action> {
    actions
        .iter()
        .copied()
        .filter(|action| match action {
            Action::Shift(_) => {
                if grammar.terminal(terminal).dynamic {
                    filter(context, DynamicKind::Shift, None)
                } else {
                    true
                }
            }
            Action::Reduce(production_id) => {
                let production = grammar.production(*production_id);
                if production.dynamic {
                    let k = production.len();
                    let start = value_stack.len().saturating_sub(k);
                    filter(context, DynamicKind::Reduce, Some(&value_stack[start..]))
                } else {
                    true
                }
            }
            Action::Accept => true,
        })
        .collect()
}

/// True if the post-filter candidate shape is still resolvable without a
/// [`crate::Error::DynamicDisambiguationConflict`]: at most one action that is
/// either a `Shift` or a non-empty `Reduce` (spec §4.1 step c, §7
/// `DynamicDisambiguationConflict`). Empty-RHS reduces never count against
/// this — they are always superseded by the shift/empty preference rule in
/// [`reselect_if_empty_reduce`], so e.g. `[Reduce(empty), Reduce(non-empty)]`
/// is resolvable even though it has two candidates.
pub fn is_resolvable(grammar: &Grammar, actions: &[Action]) -> bool {
    if actions.len() <= 1 {
        return true;
    }
    let shifts = actions.iter().filter(|a| a.is_shift()).count();
    let nonempty_reduces = actions
        .iter()
        .filter(|a| matches!(a, Action::Reduce(p) if !grammar.production(*p).is_empty()))
        .count();
    shifts + nonempty_reduces <= 1
}

/// Shift/empty preference (spec §4.1 step f, §4.5): if the chosen action is
/// a reduce by an empty-RHS production and a later non-empty reduce exists
/// in the same cell, reselect that one instead. The table's action ordering
/// (one shift, then empty reduces, then non-empty reduces) guarantees any
/// such alternative is a `Reduce`, never a `Shift`.
pub fn reselect_if_empty_reduce(grammar: &Grammar, actions: &[Action], chosen: Action) -> Action {
    if let Action::Reduce(production_id) = chosen {
        if grammar.production(production_id).is_empty() {
            if let Some(alternative) = actions.iter().find(|a| {
                matches!(a, Action::Reduce(p) if !grammar.production(*p).is_empty())
            }) {
                return *alternative;
            }
        }
    }
    chosen
}
