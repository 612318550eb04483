use std::collections::BTreeSet;

use tracing::trace;

use crate::context::Context;
use crate::dispatch::{self, ActionNamespace, SemanticValue};
use crate::lexer;
use crate::shared::Shared;
use crate::table::{Action, StateId};

/// Consumes the layout (whitespace/comments) immediately preceding
/// `position`, returning `(bytes_consumed, matched_text)` (spec §4.4).
///
/// When the grammar has a `LAYOUT` non-terminal and the table carries an
/// entry state for it, layout is itself parsed by a nested run of the same
/// shift/reduce engine, reentering at that state. Otherwise this falls back
/// to a plain character-class skip over `ws` (or the default whitespace set).
///
/// `layout_actions`, when configured (spec §6 `layout_actions`), is
/// dispatched to during that nested run exactly as the main driver dispatches
/// to its own actions on every shift and reduce, so a `LAYOUT` grammar with
/// real semantic actions (collecting doc comments, say) still runs them; the
/// folded values only drive that dispatch; the engine itself keeps returning
/// the raw matched span, since that span is the only layout artifact the
/// rest of the driver has a place to keep.
pub fn consume<'c, V: SemanticValue>(
    shared: &'c Shared<'c>,
    layout_actions: Option<&ActionNamespace<V>>,
    input: &'c str,
    position: usize,
) -> (usize, String) {
    match shared.table.layout_initial {
        Some(start_state) if shared.grammar.layout_non_terminal.is_some() => {
            run_layout_parser(shared, layout_actions, start_state, input, position)
        }
        _ => {
            let ws = shared
                .options
                .ws
                .clone()
                .unwrap_or_else(crate::options::default_whitespace);
            skip_whitespace(&ws, input, position)
        }
    }
}

fn skip_whitespace(ws: &BTreeSet<char>, input: &str, position: usize) -> (usize, String) {
    let rest = &input[position..];
    let consumed: usize = rest
        .chars()
        .take_while(|c| ws.contains(c))
        .map(|c| c.len_utf8())
        .sum();
    (consumed, input[position..position + consumed].to_string())
}

/// One layout-parser stack slot: the LR state plus the folded value the
/// registered layout actions produced for it, when any are configured.
struct Frame<V> {
    state: StateId,
    value: Option<V>,
}

/// A minimal shift/reduce loop over the same table, used only to recognize
/// the longest `LAYOUT` prefix at `position`. Unlike the main driver this
/// never errors: any failure to shift or reduce just ends the layout match
/// with whatever was consumed so far, since layout is never itself
/// considered a syntax error (spec §4.4).
fn run_layout_parser<'c, V: SemanticValue>(
    shared: &'c Shared<'c>,
    layout_actions: Option<&ActionNamespace<V>>,
    start_state: StateId,
    input: &'c str,
    position: usize,
) -> (usize, String) {
    let mut stack = vec![Frame {
        state: start_state,
        value: None,
    }];
    let mut pos = position;

    loop {
        let state_id = stack.last().expect("layout stack never empties").state;
        let context = Context::initial_at(shared, state_id, input, None, pos);
        let token = match lexer::next_token(
            shared.grammar,
            false,
            shared.options.lexical_disambiguation,
            None,
            &context,
        ) {
            Ok(token) => token,
            Err(_) => break,
        };

        let state = shared.table.state(state_id);
        let action = state.actions_for(token.symbol).and_then(|a| a.first());
        match action {
            Some(Action::Shift(next)) => {
                trace!(position = pos, "layout shift");
                let start = pos;
                pos += token.length;
                let value = layout_actions.map(|actions| {
                    let ctx = Context::initial_at(shared, state_id, input, None, start);
                    dispatch::dispatch_terminal(actions, &ctx, token)
                });
                stack.push(Frame { state: *next, value });
            }
            Some(Action::Reduce(production_id)) => {
                let production = shared.grammar.production(*production_id);
                let split = stack.len().saturating_sub(production.len()).max(1);
                let popped = stack.split_off(split);
                let top = stack.last().expect("layout stack never empties").state;
                let goto_state = match shared.table.state(top).goto(production.lhs) {
                    Some(next) => next,
                    None => break,
                };
                let value = layout_actions.map(|actions| {
                    let children: Vec<V> = popped
                        .into_iter()
                        .map(|frame| {
                            frame
                                .value
                                .expect("layout_actions configured implies every child frame was dispatched")
                        })
                        .collect();
                    let ctx = Context::initial_at(shared, goto_state, input, None, pos);
                    dispatch::dispatch_production(actions, &ctx, *production_id, children)
                });
                stack.push(Frame {
                    state: goto_state,
                    value,
                });
                continue;
            }
            _ => break,
        }

        if token.is_empty() {
            break;
        }
    }

    (pos - position, input[position..pos].to_string())
}
