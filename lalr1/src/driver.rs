use std::rc::Rc;

use tracing::{debug, instrument, warn};

use crate::context::Context;
use crate::dispatch::{self, ActionNamespace};
use crate::error::{Candidate, Error, ParseError};
use crate::grammar::Grammar;
use crate::init;
use crate::layout;
use crate::lexer;
use crate::options::{ErrorRecovery, ParserOptions};
use crate::select::{self, DynamicFilter};
use crate::shared::Shared;
use crate::table::{Action, StateId, Table};
use crate::token::{Node, Token};

/// What a parse produced: a folded semantic value, or a parse tree rooted at
/// the start symbol (spec §4.1, §4.6).
#[derive(Debug, Clone)]
pub enum Output<V> {
    Value(V),
    Tree(Rc<Node>),
}

/// The full result of a `parse` call, including the final position when
/// `return_position` is configured (spec §6).
#[derive(Debug, Clone)]
pub struct ParseResult<V> {
    pub output: Output<V>,
    pub position: Option<usize>,
    /// Recovered errors, in the order they were raised (spec §4.8 scenario 5).
    pub errors: Vec<ParseError>,
}

struct StackNode<V> {
    state: StateId,
    start: usize,
    end: usize,
    node: Option<Node>,
    value: Option<V>,
}

/// A deterministic LR(1)/LALR driver over a precomputed [`Table`]: the
/// shift/reduce loop, wired to the scannerless [`lexer`], the reentrant
/// [`layout`] sub-parser, [`select`]'s syntactic disambiguation and
/// [`dispatch`]'s semantic dispatch (spec §4.1).
///
/// `V` defaults to `()` for pure tree-mode parsers that never need a folded
/// semantic value.
pub struct Parser<V: dispatch::SemanticValue = ()> {
    grammar: Grammar,
    table: Table,
    options: ParserOptions,
    actions: ActionNamespace<V>,
    layout_actions: Option<ActionNamespace<V>>,
    dynamic_filter: Option<DynamicFilter<V>>,
}

impl<V: dispatch::SemanticValue> Parser<V> {
    pub fn new(grammar: Grammar, table: Table, options: ParserOptions) -> Result<Self, Error> {
        Self::with_actions(grammar, table, options, ActionNamespace::new(), None, None)
    }

    /// Like [`Self::new`] but also registers the action namespace the
    /// reentrant layout sub-parser dispatches to (spec §6 `layout_actions`),
    /// for a `LAYOUT` grammar whose rules have real semantic actions.
    pub fn with_actions(
        grammar: Grammar,
        table: Table,
        options: ParserOptions,
        actions: ActionNamespace<V>,
        layout_actions: Option<ActionNamespace<V>>,
        dynamic_filter: Option<DynamicFilter<V>>,
    ) -> Result<Self, Error> {
        init::validate(&grammar, &table, &options, &actions, dynamic_filter.as_ref())?;
        Ok(Self {
            grammar,
            table,
            options,
            actions,
            layout_actions,
            dynamic_filter,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&self, input: &str) -> Result<ParseResult<V>, Error> {
        self.parse_at(input, 0, None, crate::extra::Extra::new())
    }

    pub fn parse_named(&self, input: &str, file_name: impl Into<Rc<str>>) -> Result<ParseResult<V>, Error> {
        self.parse_at(input, 0, Some(file_name.into()), crate::extra::Extra::new())
    }

    /// Like [`Self::parse`] but seeds `context.extra` with caller-supplied
    /// state, e.g. an indentation width a stateful recognizer reads back
    /// (spec §8, scenario 6).
    pub fn parse_with_extra(
        &self,
        input: &str,
        extra: crate::extra::Extra,
    ) -> Result<ParseResult<V>, Error> {
        self.parse_at(input, 0, None, extra)
    }

    /// Reads `path` as UTF-8 and parses its contents (spec §6, `parse_file`).
    pub fn parse_file(&self, path: impl AsRef<std::path::Path>) -> Result<ParseResult<V>, Error> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(Error::Io)?;
        let file_name: Rc<str> = Rc::from(path.to_string_lossy().as_ref());
        self.parse_at(&input, 0, Some(file_name), crate::extra::Extra::new())
    }

    /// Re-runs the semantic dispatch that built `node`, bottom-up and
    /// left-to-right, exactly as action mode would have during parsing
    /// (spec §4.6, `call_actions`).
    pub fn call_actions(&self, input: &str, node: &Node) -> V {
        let shared = Shared {
            grammar: &self.grammar,
            table: &self.table,
            options: &self.options,
        };
        let mut context = Context::initial_at(&shared, self.table.initial(), input, None, node.start());
        self.call_actions_rec(&mut context, input, node)
    }

    fn call_actions_rec(&self, context: &mut Context<'_>, input: &str, node: &Node) -> V {
        context.start_position = node.start();
        context.end_position = node.end();
        context.node = Some(Rc::new(node.clone()));
        match node {
            Node::Term { token, .. } => {
                context.production = None;
                let borrowed = Token {
                    symbol: token.symbol,
                    value: token.value.as_str(),
                    length: token.length,
                };
                dispatch::dispatch_terminal(&self.actions, context, borrowed)
            }
            Node::NonTerm {
                production,
                children,
                ..
            } => {
                let values: Vec<V> = children
                    .iter()
                    .map(|child| self.call_actions_rec(context, input, child))
                    .collect();
                context.production = Some(*production);
                context.start_position = node.start();
                context.end_position = node.end();
                context.node = Some(Rc::new(node.clone()));
                dispatch::dispatch_production(&self.actions, context, *production, values)
            }
        }
    }

    #[instrument(level = "debug", skip(self, input, file_name))]
    fn parse_at(
        &self,
        input: &str,
        start_position: usize,
        file_name: Option<Rc<str>>,
        extra: crate::extra::Extra,
    ) -> Result<ParseResult<V>, Error> {
        let shared = Shared {
            grammar: &self.grammar,
            table: &self.table,
            options: &self.options,
        };

        if let Some(filter) = &self.dynamic_filter {
            let init_context =
                Context::initial_at(&shared, self.table.initial_for(self.options.start_prod_id), input, file_name.clone(), start_position);
            filter(&init_context, select::DynamicKind::Shift, None);
        }

        let start_state = self.table.initial_for(self.options.start_prod_id);
        let mut stack: Vec<StackNode<V>> = vec![StackNode {
            state: start_state,
            start: start_position,
            end: start_position,
            node: None,
            value: None,
        }];

        let mut position = start_position;
        let mut layout_content_ahead = String::new();
        let mut token_ahead: Option<Token<'_>> = None;
        let mut in_error_recovery = false;
        let mut errors: Vec<ParseError> = Vec::new();

        loop {
            let top_state = stack.last().expect("sentinel never popped").state;

            if token_ahead.is_none() {
                if !self.options.in_layout {
                    let (consumed, text) =
                        layout::consume(&shared, self.layout_actions.as_ref(), input, position);
                    position += consumed;
                    layout_content_ahead = text;
                }
                let lookahead_ctx = Context {
                    shared: &shared,
                    state: top_state,
                    position,
                    start_position: position,
                    end_position: position,
                    token: None,
                    token_ahead: None,
                    production: None,
                    layout_content: "",
                    layout_content_ahead: &layout_content_ahead,
                    node: None,
                    file_name: file_name.clone(),
                    input_str: input,
                    extra: extra.clone(),
                };
                token_ahead = Some(lexer::next_token(
                    &self.grammar,
                    self.options.consume_input,
                    self.options.lexical_disambiguation,
                    self.options.custom_token_recognition.as_ref(),
                    &lookahead_ctx,
                )?);
            }

            let token = token_ahead.expect("set immediately above when absent");
            let state = self.table.state(top_state);
            let mut actions: Vec<Action> = match state.actions_for(token.symbol) {
                Some(a) if !a.is_empty() => a.to_vec(),
                _ => {
                    let lookahead_ctx = Context {
                        shared: &shared,
                        state: top_state,
                        position,
                        start_position: position,
                        end_position: position,
                        token: Some(token),
                        token_ahead: None,
                        production: None,
                        layout_content: "",
                        layout_content_ahead: &layout_content_ahead,
                        node: None,
                        file_name: file_name.clone(),
                        input_str: input,
                        extra: extra.clone(),
                    };
                    token_ahead = self.handle_error(
                        &lookahead_ctx,
                        &mut in_error_recovery,
                        &mut errors,
                        top_state,
                        input,
                        &mut position,
                    )?;
                    continue;
                }
            };

            if let Some(filter) = &self.dynamic_filter {
                let lookahead_ctx = Context {
                    shared: &shared,
                    state: top_state,
                    position,
                    start_position: position,
                    end_position: position,
                    token: Some(token),
                    token_ahead: None,
                    production: None,
                    layout_content: "",
                    layout_content_ahead: &layout_content_ahead,
                    node: None,
                    file_name: file_name.clone(),
                    input_str: input,
                    extra: extra.clone(),
                };
                let values: Vec<V> = if self.options.build_tree && !self.options.call_actions_during_tree_build {
                    Vec::new()
                } else {
                    stack
                        .iter()
                        .filter_map(|n| n.value.clone())
                        .collect()
                };
                actions = select::filter_actions(
                    filter,
                    &self.grammar,
                    &lookahead_ctx,
                    token.symbol,
                    &actions,
                    &values,
                );
                if !select::is_resolvable(&self.grammar, &actions) {
                    return Err(Error::DynamicDisambiguationConflict {
                        state: top_state,
                        terminal: token.symbol,
                    });
                }
                if actions.is_empty() {
                    token_ahead = self.handle_error(
                        &lookahead_ctx,
                        &mut in_error_recovery,
                        &mut errors,
                        top_state,
                        input,
                        &mut position,
                    )?;
                    continue;
                }
            }

            let chosen = match actions.first().copied() {
                Some(action) => select::reselect_if_empty_reduce(&self.grammar, &actions, action),
                None => unreachable!("emptiness handled above"),
            };

            match chosen {
                Action::Shift(next) => {
                    debug!(from = ?top_state, to = ?next, terminal = %self.grammar.terminal_name(token.symbol), "shift");
                    let start = position;
                    let end = position + token.length;
                    let owned = token.to_owned_token();

                    let value = if !self.options.build_tree || self.options.call_actions_during_tree_build {
                        let ctx = Context {
                            shared: &shared,
                            state: top_state,
                            position: start,
                            start_position: start,
                            end_position: end,
                            token: Some(token),
                            token_ahead: None,
                            production: None,
                            layout_content: &layout_content_ahead,
                            layout_content_ahead: "",
                            node: None,
                            file_name: file_name.clone(),
                            input_str: input,
                            extra: extra.clone(),
                        };
                        Some(dispatch::dispatch_terminal(&self.actions, &ctx, token))
                    } else {
                        None
                    };

                    let node = if self.options.build_tree {
                        Some(Node::Term {
                            start,
                            end,
                            token: owned,
                            layout_content: std::mem::take(&mut layout_content_ahead),
                        })
                    } else {
                        None
                    };

                    position = end;
                    in_error_recovery = false;
                    token_ahead = None;
                    stack.push(StackNode {
                        state: next,
                        start,
                        end,
                        node,
                        value,
                    });
                }
                Action::Reduce(production_id) => {
                    let production = self.grammar.production(production_id);
                    let k = production.len();
                    debug!(production = ?production_id, k, "reduce");

                    let split = stack.len() - k;
                    let popped: Vec<StackNode<V>> = stack.split_off(split);
                    let new_top_state = stack.last().expect("sentinel never popped").state;
                    let goto_state = self
                        .table
                        .state(new_top_state)
                        .goto(production.lhs)
                        .expect("table guarantees a goto for every completed production");

                    let reduce_start = if k > 0 {
                        popped[0].start
                    } else {
                        stack.last().unwrap().end
                    };
                    let reduce_end = if k > 0 {
                        popped[k - 1].end
                    } else {
                        stack.last().unwrap().end
                    };

                    let value = if !self.options.build_tree || self.options.call_actions_during_tree_build {
                        let children: Vec<V> = popped
                            .iter()
                            .map(|n| n.value.clone().expect("value tracked in this mode"))
                            .collect();
                        let ctx = Context {
                            shared: &shared,
                            state: new_top_state,
                            position,
                            start_position: reduce_start,
                            end_position: reduce_end,
                            token: None,
                            token_ahead: Some(token),
                            production: Some(production_id),
                            layout_content: "",
                            layout_content_ahead: &layout_content_ahead,
                            node: None,
                            file_name: file_name.clone(),
                            input_str: input,
                            extra: extra.clone(),
                        };
                        Some(dispatch::dispatch_production(
                            &self.actions,
                            &ctx,
                            production_id,
                            children,
                        ))
                    } else {
                        None
                    };

                    let node = if self.options.build_tree {
                        let children: Vec<Node> = popped
                            .into_iter()
                            .map(|n| n.node.expect("tree tracked in this mode"))
                            .collect();
                        Some(Node::NonTerm {
                            start: reduce_start,
                            end: reduce_end,
                            production: production_id,
                            children,
                            layout_content: String::new(),
                        })
                    } else {
                        None
                    };

                    stack.push(StackNode {
                        state: goto_state,
                        start: reduce_start,
                        end: reduce_end,
                        node,
                        value,
                    });
                }
                Action::Accept => {
                    debug_assert_eq!(stack.len(), 2, "accept only with sentinel + one result (P3)");
                    let result = stack.pop().expect("checked above");
                    return Ok(ParseResult {
                        output: if self.options.build_tree {
                            Output::Tree(Rc::new(result.node.expect("tree tracked")))
                        } else {
                            Output::Value(result.value.expect("value tracked"))
                        },
                        position: self.options.return_position.then_some(position),
                        errors,
                    });
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_error<'c>(
        &self,
        context: &Context<'c>,
        in_error_recovery: &mut bool,
        errors: &mut Vec<ParseError>,
        state: StateId,
        input: &'c str,
        position: &mut usize,
    ) -> Result<Option<Token<'c>>, Error> {
        if *in_error_recovery {
            if !self.options.error_recovery.is_enabled() {
                return Err(Error::Parse(errors.last().expect("reused below").clone()));
            }
        } else {
            let location = lexan::Location::new(*position, *position);
            let expected = context.expected_terminals();
            let tokens_ahead = self.tokens_ahead(context, input, *position);
            let leading_symbol = self.table.state(state).symbol;
            let error = ParseError {
                file_name: context.file_name.clone(),
                location,
                expected,
                tokens_ahead,
                leading_symbol,
            };
            warn!(?error, "parse error");
            errors.push(error);
        }

        if !self.options.error_recovery.is_enabled() {
            return Err(Error::Parse(errors.last().expect("just pushed").clone()));
        }

        let last = errors.last().expect("pushed above or present from prior iteration").clone();
        let (token, new_position) = match &self.options.error_recovery {
            ErrorRecovery::Disabled => (None, None),
            ErrorRecovery::Default => {
                if *position < input.len() {
                    (None, Some(*position + 1))
                } else {
                    (None, None)
                }
            }
            ErrorRecovery::Custom(policy) => policy(context, &last),
        };

        match (token, new_position) {
            (None, None) => Err(Error::Parse(last)),
            (token, new_position) => {
                if let Some(new_position) = new_position {
                    errors.last_mut().expect("present").location =
                        lexan::Location::new(last.location.start, new_position);
                    *position = new_position;
                }
                *in_error_recovery = true;
                Ok(token)
            }
        }
    }

    /// Tries every grammar terminal at `position`, ignoring which ones the
    /// current state has actions for (spec §4.8, "possible tokens ahead").
    fn tokens_ahead<'c>(&self, context: &Context<'c>, input: &'c str, position: usize) -> Vec<Candidate> {
        if position >= input.len() {
            return Vec::new();
        }
        self.grammar
            .terminals
            .iter()
            .filter_map(|terminal| {
                terminal
                    .recognizer
                    .recognize(context, input, position)
                    .filter(|len| *len > 0)
                    .map(|len| Candidate {
                        terminal: terminal.id,
                        value: input[position..position + len].to_string(),
                    })
            })
            .collect()
    }
}

