//! Hand-built `Grammar`/`Table` fixtures. Grammar loading and table
//! construction are a different component's job; these fixtures stand in
//! for its output the way a generated table would arrive in production.
#![allow(dead_code)]

use lalr1::{
    Grammar, NonTerminalId, Production, ProductionId, Recognizer, State, StateId, Symbol, Table,
    Terminal, TerminalId, EMPTY, STOP,
};

pub const NUMBER: TerminalId = TerminalId(2);
pub const PLUS: TerminalId = TerminalId(3);
pub const STAR: TerminalId = TerminalId(4);
pub const LPAREN: TerminalId = TerminalId(5);
pub const RPAREN: TerminalId = TerminalId(6);

pub const START: NonTerminalId = NonTerminalId(0);
pub const E: NonTerminalId = NonTerminalId(1);
pub const T: NonTerminalId = NonTerminalId(2);
pub const F: NonTerminalId = NonTerminalId(3);

fn reserved_terminals() -> Vec<Terminal> {
    vec![
        Terminal::new(EMPTY, "EMPTY", Recognizer::stateless(|_, _| None)),
        Terminal::new(STOP, "STOP", Recognizer::stateless(|_, _| None)),
    ]
}

fn state(
    id: u32,
    symbol: Option<Symbol>,
    actions: Vec<(TerminalId, lalr1::Action)>,
    gotos: Vec<(NonTerminalId, StateId)>,
) -> State {
    let finish_flags = vec![false; actions.len()];
    State {
        id: StateId(id),
        symbol,
        actions: actions.into_iter().map(|(t, a)| (t, vec![a])).collect(),
        finish_flags,
        gotos,
    }
}

/// The textbook `E -> E + T | T; T -> T * F | F; F -> ( E ) | number` grammar
/// (spec §8 scenario 1), with its canonical 12-state LALR/SLR automaton.
pub fn arithmetic() -> (Grammar, Table) {
    use lalr1::Action::{Accept, Reduce, Shift};
    use Symbol::{NonTerminal, Terminal as Term};

    let mut terminals = reserved_terminals();
    terminals.push(Terminal::new(NUMBER, "number", Recognizer::pattern(
        lexan::Pattern::new(r"\d+(\.\d+)?").unwrap(),
    )));
    terminals.push(Terminal::new(PLUS, "+", Recognizer::literal("+")));
    terminals.push(Terminal::new(STAR, "*", Recognizer::literal("*")));
    terminals.push(Terminal::new(LPAREN, "(", Recognizer::literal("(")));
    terminals.push(Terminal::new(RPAREN, ")", Recognizer::literal(")")));

    let productions = vec![
        Production::new(ProductionId(0), START, vec![NonTerminal(E)]),
        Production::new(ProductionId(1), E, vec![NonTerminal(E), Term(PLUS), NonTerminal(T)])
            .with_action_name("add"),
        Production::new(ProductionId(2), E, vec![NonTerminal(T)]),
        Production::new(ProductionId(3), T, vec![NonTerminal(T), Term(STAR), NonTerminal(F)])
            .with_action_name("mul"),
        Production::new(ProductionId(4), T, vec![NonTerminal(F)]),
        Production::new(
            ProductionId(5),
            F,
            vec![Term(LPAREN), NonTerminal(E), Term(RPAREN)],
        )
        .with_action_name("paren"),
        Production::new(ProductionId(6), F, vec![Term(NUMBER)]),
    ];

    let grammar = Grammar {
        terminals,
        non_terminal_names: vec!["Start".into(), "E".into(), "T".into(), "F".into()],
        productions,
        start_production: ProductionId(0),
        layout_non_terminal: None,
    };

    let states = vec![
        state(
            0,
            None,
            vec![(NUMBER, Shift(StateId(5))), (LPAREN, Shift(StateId(4)))],
            vec![(E, StateId(1)), (T, StateId(2)), (F, StateId(3))],
        ),
        state(
            1,
            Some(NonTerminal(E)),
            vec![(PLUS, Shift(StateId(6))), (STOP, Accept)],
            vec![],
        ),
        state(
            2,
            Some(NonTerminal(T)),
            vec![
                (STAR, Shift(StateId(7))),
                (PLUS, Reduce(ProductionId(2))),
                (RPAREN, Reduce(ProductionId(2))),
                (STOP, Reduce(ProductionId(2))),
            ],
            vec![],
        ),
        state(
            3,
            Some(NonTerminal(F)),
            vec![
                (PLUS, Reduce(ProductionId(4))),
                (STAR, Reduce(ProductionId(4))),
                (RPAREN, Reduce(ProductionId(4))),
                (STOP, Reduce(ProductionId(4))),
            ],
            vec![],
        ),
        state(
            4,
            Some(Term(LPAREN)),
            vec![(NUMBER, Shift(StateId(5))), (LPAREN, Shift(StateId(4)))],
            vec![(E, StateId(8)), (T, StateId(2)), (F, StateId(3))],
        ),
        state(
            5,
            Some(Term(NUMBER)),
            vec![
                (PLUS, Reduce(ProductionId(6))),
                (STAR, Reduce(ProductionId(6))),
                (RPAREN, Reduce(ProductionId(6))),
                (STOP, Reduce(ProductionId(6))),
            ],
            vec![],
        ),
        state(
            6,
            Some(Term(PLUS)),
            vec![(NUMBER, Shift(StateId(5))), (LPAREN, Shift(StateId(4)))],
            vec![(T, StateId(9)), (F, StateId(3))],
        ),
        state(
            7,
            Some(Term(STAR)),
            vec![(NUMBER, Shift(StateId(5))), (LPAREN, Shift(StateId(4)))],
            vec![(F, StateId(10))],
        ),
        state(
            8,
            Some(NonTerminal(E)),
            vec![(RPAREN, Shift(StateId(11))), (PLUS, Shift(StateId(6)))],
            vec![],
        ),
        state(
            9,
            Some(NonTerminal(T)),
            vec![
                (STAR, Shift(StateId(7))),
                (PLUS, Reduce(ProductionId(1))),
                (RPAREN, Reduce(ProductionId(1))),
                (STOP, Reduce(ProductionId(1))),
            ],
            vec![],
        ),
        state(
            10,
            Some(NonTerminal(F)),
            vec![
                (PLUS, Reduce(ProductionId(3))),
                (STAR, Reduce(ProductionId(3))),
                (RPAREN, Reduce(ProductionId(3))),
                (STOP, Reduce(ProductionId(3))),
            ],
            vec![],
        ),
        state(
            11,
            Some(Term(RPAREN)),
            vec![
                (PLUS, Reduce(ProductionId(5))),
                (STAR, Reduce(ProductionId(5))),
                (RPAREN, Reduce(ProductionId(5))),
                (STOP, Reduce(ProductionId(5))),
            ],
            vec![],
        ),
    ];

    let table = Table {
        states,
        sr_conflicts: vec![],
        rr_conflicts: vec![],
        layout_initial: None,
        start_states: vec![],
    };

    (grammar, table)
}

pub const KW: TerminalId = TerminalId(2);
pub const ID: TerminalId = TerminalId(3);
pub const WORD: NonTerminalId = NonTerminalId(1);

/// `Start -> Word; Word -> KW | ID`, with `KW` a fixed literal (optionally
/// `prefer`red) and `ID` a `[a-z]+` pattern — the keyword/identifier
/// disambiguation fixture (spec §8 scenarios 2 and 3).
pub fn keyword_or_id(keyword: &str, prefer: bool) -> (Grammar, Table) {
    use lalr1::Action::{Accept, Reduce, Shift};
    use Symbol::{NonTerminal, Terminal as Term};

    let mut terminals = reserved_terminals();
    terminals.push(
        Terminal::new(KW, keyword, Recognizer::literal(keyword)).with_prefer(prefer),
    );
    terminals.push(Terminal::new(ID, "id", Recognizer::pattern(
        lexan::Pattern::new(r"[a-z]+").unwrap(),
    )));

    let productions = vec![
        Production::new(ProductionId(0), START, vec![NonTerminal(WORD)]),
        Production::new(ProductionId(1), WORD, vec![Term(KW)]),
        Production::new(ProductionId(2), WORD, vec![Term(ID)]),
    ];

    let grammar = Grammar {
        terminals,
        non_terminal_names: vec!["Start".into(), "Word".into()],
        productions,
        start_production: ProductionId(0),
        layout_non_terminal: None,
    };

    let states = vec![
        state(
            0,
            None,
            vec![(KW, Shift(StateId(1))), (ID, Shift(StateId(2)))],
            vec![(WORD, StateId(3))],
        ),
        state(1, Some(Term(KW)), vec![(STOP, Reduce(ProductionId(1)))], vec![]),
        state(2, Some(Term(ID)), vec![(STOP, Reduce(ProductionId(2)))], vec![]),
        state(3, Some(NonTerminal(WORD)), vec![(STOP, Accept)], vec![]),
    ];

    let table = Table {
        states,
        sr_conflicts: vec![],
        rr_conflicts: vec![],
        layout_initial: None,
        start_states: vec![],
    };

    (grammar, table)
}

pub const X: TerminalId = TerminalId(2);
pub const A: NonTerminalId = NonTerminalId(1);

/// `Start -> A; A -> X | <empty>`, hand-built with both actions present in
/// the same cell at the initial state, to exercise the shift/empty
/// preference (spec §4.1 step f, §8 scenario 4).
pub fn shift_over_empty() -> (Grammar, Table) {
    use lalr1::Action::{Accept, Reduce, Shift};
    use Symbol::{NonTerminal, Terminal as Term};

    let mut terminals = reserved_terminals();
    terminals.push(Terminal::new(X, "x", Recognizer::literal("x")));

    let productions = vec![
        Production::new(ProductionId(0), START, vec![NonTerminal(A)]),
        Production::new(ProductionId(1), A, vec![Term(X)]),
        Production::new(ProductionId(2), A, vec![]),
    ];

    let grammar = Grammar {
        terminals,
        non_terminal_names: vec!["Start".into(), "A".into()],
        productions,
        start_production: ProductionId(0),
        layout_non_terminal: None,
    };

    let state0 = State {
        id: StateId(0),
        symbol: None,
        actions: vec![(X, vec![Shift(StateId(1)), Reduce(ProductionId(2))])],
        finish_flags: vec![false],
        gotos: vec![(A, StateId(2))],
    };
    let states = vec![
        state0,
        state(1, Some(Term(X)), vec![(STOP, Reduce(ProductionId(1)))], vec![]),
        state(2, Some(NonTerminal(A)), vec![(STOP, Accept)], vec![]),
    ];

    let table = Table {
        states,
        sr_conflicts: vec![],
        rr_conflicts: vec![],
        layout_initial: None,
        start_states: vec![],
    };

    (grammar, table)
}

pub const NUM: TerminalId = TerminalId(2);
pub const COMMA: TerminalId = TerminalId(3);
pub const LIST: NonTerminalId = NonTerminalId(1);

/// `Start -> List; List -> List COMMA NUMBER | NUMBER`, the left-recursive
/// integer list used for the default error-recovery scenario (spec §4.8,
/// §8 scenario 5).
pub fn integer_list() -> (Grammar, Table) {
    use lalr1::Action::{Accept, Reduce, Shift};
    use Symbol::{NonTerminal, Terminal as Term};

    let mut terminals = reserved_terminals();
    terminals.push(Terminal::new(NUM, "number", Recognizer::pattern(
        lexan::Pattern::new(r"\d+").unwrap(),
    )));
    terminals.push(Terminal::new(COMMA, ",", Recognizer::literal(",")));

    let productions = vec![
        Production::new(ProductionId(0), START, vec![NonTerminal(LIST)]),
        Production::new(
            ProductionId(1),
            LIST,
            vec![NonTerminal(LIST), Term(COMMA), Term(NUM)],
        )
        .with_action_name("append"),
        Production::new(ProductionId(2), LIST, vec![Term(NUM)]),
    ];

    let grammar = Grammar {
        terminals,
        non_terminal_names: vec!["Start".into(), "List".into()],
        productions,
        start_production: ProductionId(0),
        layout_non_terminal: None,
    };

    let states = vec![
        state(
            0,
            None,
            vec![(NUM, Shift(StateId(1)))],
            vec![(LIST, StateId(2))],
        ),
        state(
            1,
            Some(Term(NUM)),
            vec![
                (COMMA, Reduce(ProductionId(2))),
                (STOP, Reduce(ProductionId(2))),
            ],
            vec![],
        ),
        state(
            2,
            Some(NonTerminal(LIST)),
            vec![(COMMA, Shift(StateId(3))), (STOP, Accept)],
            vec![],
        ),
        state(3, Some(Term(COMMA)), vec![(NUM, Shift(StateId(4)))], vec![]),
        state(
            4,
            Some(Term(NUM)),
            vec![
                (COMMA, Reduce(ProductionId(1))),
                (STOP, Reduce(ProductionId(1))),
            ],
            vec![],
        ),
    ];

    let table = Table {
        states,
        sr_conflicts: vec![],
        rr_conflicts: vec![],
        layout_initial: None,
        start_states: vec![],
    };

    (grammar, table)
}

pub const INDENT: TerminalId = TerminalId(2);
pub const START_INDENT: NonTerminalId = NonTerminalId(1);

/// `Start -> INDENT`, where `INDENT` is a stateful recognizer reading
/// `context.extra["indent"]` to decide how many leading spaces to consume
/// (spec §8 scenario 6).
pub fn indented() -> (Grammar, Table) {
    use lalr1::Action::{Accept, Reduce, Shift};
    use Symbol::{NonTerminal, Terminal as Term};

    let recognizer = Recognizer::stateful(|context, input, position| {
        let n = context.extra.get("indent")?.as_int()? as usize;
        let rest = input.as_bytes().get(position..position + n)?;
        if rest.iter().all(|&b| b == b' ') {
            Some(n)
        } else {
            None
        }
    });

    let mut terminals = reserved_terminals();
    terminals.push(Terminal::new(INDENT, "indent", recognizer));

    let productions = vec![Production::new(
        ProductionId(0),
        START_INDENT,
        vec![Term(INDENT)],
    )];

    let grammar = Grammar {
        terminals,
        non_terminal_names: vec!["Start".into()],
        productions,
        start_production: ProductionId(0),
        layout_non_terminal: None,
    };

    let states = vec![
        state(
            0,
            None,
            vec![(INDENT, Shift(StateId(1)))],
            vec![(START_INDENT, StateId(2))],
        ),
        state(1, Some(Term(INDENT)), vec![(STOP, Reduce(ProductionId(0)))], vec![]),
        state(2, Some(NonTerminal(START_INDENT)), vec![(STOP, Accept)], vec![]),
    ];

    let table = Table {
        states,
        sr_conflicts: vec![],
        rr_conflicts: vec![],
        layout_initial: None,
        start_states: vec![],
    };

    (grammar, table)
}
