use tracing::trace;

use crate::context::Context;
use crate::error::{Candidate, Error};
use crate::grammar::Grammar;
use crate::options::CustomTokenHook;
use crate::symbol::{EMPTY, STOP};
use crate::token::{Token, EMPTY_TOKEN, STOP_TOKEN};

/// Computes the recognizer-derived candidate tokens at `context`'s position,
/// guided by which terminals the current LR state has any action for (spec
/// §4.3, step 1).
fn recognizer_candidates<'c>(
    grammar: &Grammar,
    consume_input: bool,
    context: &Context<'c>,
) -> Vec<Token<'c>> {
    let state = context.shared.table.state(context.state);
    let mut candidates = Vec::new();

    if state.actions_for(EMPTY).is_some() {
        candidates.push(EMPTY_TOKEN);
    }
    if state.actions_for(STOP).is_some()
        && (!consume_input || context.position == context.input_str.len())
    {
        candidates.push(STOP_TOKEN);
    }

    if context.position < context.input_str.len() {
        let mut matched = Vec::new();
        let mut last_prior: Option<i32> = None;
        for (terminal_id, finish) in state.candidate_terminals() {
            if terminal_id == EMPTY || terminal_id == STOP {
                continue;
            }
            let terminal = grammar.terminal(terminal_id);
            if let Some(previous) = last_prior {
                if terminal.prior < previous && !matched.is_empty() {
                    break;
                }
            }
            last_prior = Some(terminal.prior);
            if let Some(len) =
                terminal
                    .recognizer
                    .recognize(context, context.input_str, context.position)
            {
                if len > 0 {
                    let value = &context.input_str[context.position..context.position + len];
                    trace!(terminal = %terminal.name, %value, "lexer candidate");
                    matched.push(Token::new(terminal_id, value));
                    if finish {
                        break;
                    }
                }
            }
        }
        candidates.extend(matched);
    }

    candidates
}

/// Lexical disambiguation (spec §4.5): drop `EMPTY` once `STOP` is among the
/// candidates, keep only the longest match(es), then keep only `prefer`red
/// terminals if any survivor is preferred.
pub fn disambiguate<'c>(grammar: &Grammar, mut candidates: Vec<Token<'c>>) -> Vec<Token<'c>> {
    if candidates.len() <= 1 {
        return candidates;
    }
    if candidates.iter().any(Token::is_stop) {
        candidates.retain(|t| !t.is_empty());
    }
    if candidates.len() <= 1 {
        return candidates;
    }
    let longest = candidates.iter().map(|t| t.value.len()).max().unwrap_or(0);
    candidates.retain(|t| t.value.len() == longest);
    if candidates.len() <= 1 {
        return candidates;
    }
    let any_preferred = candidates.iter().any(|t| grammar.terminal(t.symbol).prefer);
    if any_preferred {
        candidates.retain(|t| grammar.terminal(t.symbol).prefer);
    }
    candidates
}

/// Produces the next look-ahead token (spec §4.3).
pub fn next_token<'c>(
    grammar: &Grammar,
    consume_input: bool,
    lexical_disambiguation: bool,
    custom_hook: Option<&CustomTokenHook>,
    context: &Context<'c>,
) -> Result<Token<'c>, Error> {
    let default_tokens = || recognizer_candidates(grammar, consume_input, context);
    let candidates = match custom_hook {
        Some(hook) => hook(context, &default_tokens).unwrap_or_else(default_tokens),
        None => default_tokens(),
    };

    let survivors = if lexical_disambiguation {
        disambiguate(grammar, candidates)
    } else {
        candidates
    };

    match survivors.len() {
        0 => Ok(EMPTY_TOKEN),
        1 => Ok(survivors[0]),
        _ => {
            let mut candidates: Vec<Candidate> = survivors
                .iter()
                .map(|t| Candidate {
                    terminal: t.symbol,
                    value: t.value.to_string(),
                })
                .collect();
            candidates.sort_by(|a, b| {
                grammar
                    .terminal_name(a.terminal)
                    .cmp(grammar.terminal_name(b.terminal))
            });
            Err(Error::Disambiguation(candidates))
        }
    }
}
