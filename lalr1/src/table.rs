use crate::symbol::{NonTerminalId, ProductionId, TerminalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

/// One table cell's action. A `Shift` carries the successor state, a
/// `Reduce` the production to collapse the stack by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
}

impl Action {
    pub fn is_shift(&self) -> bool {
        matches!(self, Action::Shift(_))
    }

    pub fn is_reduce(&self) -> bool {
        matches!(self, Action::Reduce(_))
    }
}

/// A shift/reduce or reduce/reduce conflict the table generator left for the
/// runtime to resolve via a dynamic filter (spec §3, §4.7).
#[derive(Debug, Clone)]
pub struct Conflict {
    pub state: StateId,
    pub terminal: TerminalId,
    pub dynamic: bool,
}

/// One LR automaton state: the terminal-keyed action cells (in
/// priority-descending, definition-order-stable iteration order — this
/// ordering is a contract with the driver, see spec §9 "Shift/empty
/// preference realized by cell ordering") and the non-terminal-keyed goto
/// table.
#[derive(Debug, Clone)]
pub struct State {
    pub id: StateId,
    /// The grammar symbol labeling the transition into this state; `None`
    /// only for the initial state.
    pub symbol: Option<crate::symbol::Symbol>,
    pub actions: Vec<(TerminalId, Vec<Action>)>,
    /// Parallel to `actions`: whether the terminal at the same index has its
    /// finish flag set.
    pub finish_flags: Vec<bool>,
    pub gotos: Vec<(NonTerminalId, StateId)>,
}

impl State {
    pub fn actions_for(&self, terminal: TerminalId) -> Option<&[Action]> {
        self.actions
            .iter()
            .find(|(t, _)| *t == terminal)
            .map(|(_, actions)| actions.as_slice())
    }

    pub fn goto(&self, non_terminal: NonTerminalId) -> Option<StateId> {
        self.gotos
            .iter()
            .find(|(n, _)| *n == non_terminal)
            .map(|(_, s)| *s)
    }

    /// Terminals this state has any action for, in the stored priority
    /// order, alongside their finish flag.
    pub fn candidate_terminals(&self) -> impl Iterator<Item = (TerminalId, bool)> + '_ {
        self.actions
            .iter()
            .map(|(t, _)| *t)
            .zip(self.finish_flags.iter().copied())
    }
}

/// The precomputed LR action/goto table: read-only input to the engine.
#[derive(Debug, Clone)]
pub struct Table {
    pub states: Vec<State>,
    pub sr_conflicts: Vec<Conflict>,
    pub rr_conflicts: Vec<Conflict>,
    /// Entry state for the reentrant layout sub-parser (spec §4.4), when the
    /// grammar has a `LAYOUT` non-terminal. The table builder is expected to
    /// have computed this as just another start state of the same DFA.
    pub layout_initial: Option<StateId>,
    /// Alternate start states keyed by production id, for a table built to
    /// support parsing from more than one start symbol (spec §6,
    /// `start_prod_id`). Empty for an ordinary single-start table.
    pub start_states: Vec<(ProductionId, StateId)>,
}

impl Table {
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0 as usize]
    }

    pub fn initial(&self) -> StateId {
        StateId(0)
    }

    /// The entry state for `start_prod_id`, falling back to [`Self::initial`]
    /// when unset or not found among `start_states`.
    pub fn initial_for(&self, start_prod_id: Option<ProductionId>) -> StateId {
        match start_prod_id {
            Some(id) => self
                .start_states
                .iter()
                .find(|(p, _)| *p == id)
                .map(|(_, s)| *s)
                .unwrap_or_else(|| self.initial()),
            None => self.initial(),
        }
    }
}

/// Orders one action cell the way the table generator must: one `Shift`
/// first if present, then `Reduce`s with empty-RHS reductions before
/// non-empty ones. `reduces` is `(is_empty_rhs, action)`.
pub fn order_actions(shift: Option<Action>, mut reduces: Vec<(bool, Action)>) -> Vec<Action> {
    reduces.sort_by_key(|(is_empty, _)| !is_empty);
    let mut actions: Vec<Action> = shift.into_iter().collect();
    actions.extend(reduces.into_iter().map(|(_, action)| action));
    actions
}
