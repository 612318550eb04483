use std::fmt;

/// Identifies a terminal symbol by its index into [`crate::Grammar::terminals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(pub u32);

/// Identifies a non-terminal symbol by its index into [`crate::Grammar::non_terminals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(pub u32);

/// Identifies a production by its index into [`crate::Grammar::productions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionId(pub u32);

/// The distinguished symbol that matches at any position with an empty value.
pub const EMPTY: TerminalId = TerminalId(0);

/// The distinguished end-of-input symbol.
pub const STOP: TerminalId = TerminalId(1);

/// The lowest terminal id a grammar may assign to a user-defined terminal;
/// ids `0` and `1` are reserved for [`EMPTY`] and [`STOP`].
pub const FIRST_USER_TERMINAL: u32 = 2;

/// A grammar symbol: either a terminal or a non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(TerminalId),
    NonTerminal(NonTerminalId),
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Display for NonTerminalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}
