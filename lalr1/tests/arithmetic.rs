mod support;

use lalr1::{ActionNamespace, Keyword, ParserOptions, Parser, SemanticValue};
use support::arithmetic;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Num(f64);

impl SemanticValue for Num {
    fn from_lexeme(lexeme: &str) -> Self {
        Num(lexeme.parse().unwrap_or(0.0))
    }

    fn from_children(children: Vec<Self>) -> Self {
        children.into_iter().next().unwrap_or(Num(0.0))
    }
}

fn parser() -> Parser<Num> {
    let (grammar, table) = arithmetic();
    let mut actions: ActionNamespace<Num> = ActionNamespace::new();
    actions.on_terminal("number", |_ctx, token| Num(token.value.parse().unwrap()));
    actions.on_production("add", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        Num(children[0].0 + children[2].0)
    });
    actions.on_production("mul", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        Num(children[0].0 * children[2].0)
    });
    actions.on_production("paren", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        children[1]
    });
    Parser::with_actions(grammar, table, ParserOptions::default(), actions, None, None)
        .expect("fixture table has no unresolved conflicts")
}

#[test]
fn evaluates_with_precedence_and_longest_match() {
    let parser = parser();
    let result = parser
        .parse("34.7+78*34 +89+\n    12.223*4")
        .expect("well-formed arithmetic input");
    let value = match result.output {
        lalr1::Output::Value(Num(v)) => v,
        lalr1::Output::Tree(_) => panic!("expected a folded value"),
    };
    assert!((value - 2824.592).abs() < 1e-9, "got {value}");
    assert!(result.errors.is_empty());
}

#[test]
fn parenthesised_grouping_overrides_precedence() {
    let parser = parser();
    let result = parser.parse("(1+2)*3").unwrap();
    match result.output {
        lalr1::Output::Value(Num(v)) => assert!((v - 9.0).abs() < 1e-9),
        lalr1::Output::Tree(_) => panic!("expected a folded value"),
    }
}

#[test]
fn tree_mode_builds_a_node_rooted_at_the_start_symbol() {
    let (grammar, table) = arithmetic();
    let options = ParserOptions {
        build_tree: true,
        ..ParserOptions::default()
    };
    let mut actions: ActionNamespace<Num> = ActionNamespace::new();
    actions.on_terminal("number", |_ctx, token| Num(token.value.parse().unwrap()));
    actions.on_production("add", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        Num(children[0].0 + children[2].0)
    });
    actions.on_production("mul", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        Num(children[0].0 * children[2].0)
    });
    actions.on_production("paren", |_ctx, children: &[Num], _kw: &[(String, Keyword<Num>)]| {
        children[1]
    });
    let parser: Parser<Num> =
        Parser::with_actions(grammar, table, options, actions, None, None).unwrap();
    let result = parser.parse("2*3").unwrap();
    match result.output {
        lalr1::Output::Tree(node) => {
            assert_eq!(node.start(), 0);
            assert_eq!(node.end(), 3);
        }
        lalr1::Output::Value(_) => panic!("expected a tree"),
    }
}
