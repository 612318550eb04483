use crate::dispatch::ActionNamespace;
use crate::error::InitError;
use crate::grammar::Grammar;
use crate::options::ParserOptions;
use crate::select::DynamicFilter;
use crate::table::Table;

/// Construction-time validation (spec §4.7): action-namespace name
/// resolution, then shift/reduce and reduce/reduce conflict surfacing. A
/// conflict marked `dynamic` only counts as resolved when `dynamic_filter`
/// is actually configured to adjudicate it at runtime (spec §4.7 (ii)/(iii));
/// dynamic-marked conflicts under a filter-less parser still fail fast here.
pub fn validate<V>(
    grammar: &Grammar,
    table: &Table,
    options: &ParserOptions,
    actions: &ActionNamespace<V>,
    dynamic_filter: Option<&DynamicFilter<V>>,
) -> Result<(), InitError> {
    // `InitError::WsOnNonText` exists for API parity with the original's
    // non-text input mode; this crate only ever parses `&str`, so the
    // condition it names can never arise here.

    for terminal in &grammar.terminals {
        if let Some(name) = &terminal.action_name {
            if name != &terminal.name && !actions.has_terminal(name) {
                return Err(InitError::MissingAction {
                    action_name: name.clone(),
                });
            }
        }
    }
    for production in &grammar.productions {
        if let Some(name) = &production.action_name {
            let lhs_name = grammar.non_terminal_name(production.lhs);
            if name != lhs_name && !actions.has_production(name) {
                return Err(InitError::MissingAction {
                    action_name: name.clone(),
                });
            }
        }
    }

    let sr_unresolved: Vec<_> = table
        .sr_conflicts
        .iter()
        .filter(|c| !c.dynamic || dynamic_filter.is_none())
        .cloned()
        .collect();
    if !sr_unresolved.is_empty() {
        return Err(InitError::SrConflicts(sr_unresolved.len(), sr_unresolved));
    }

    let rr_unresolved: Vec<_> = table
        .rr_conflicts
        .iter()
        .filter(|c| !c.dynamic || dynamic_filter.is_none())
        .cloned()
        .collect();
    if !rr_unresolved.is_empty() {
        return Err(InitError::RrConflicts(rr_unresolved.len(), rr_unresolved));
    }

    Ok(())
}
