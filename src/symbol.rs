//! Symbol types used to parameterize grammars.
//!
//! A grammar ranges over three disjoint categories of symbol: [`Variable`]
//! (nonterminal), [`Terminal`], and the singleton [`GrammarSymbol::Epsilon`]
//! marker. Two variables are equal iff their underlying values are equal;
//! a variable and a terminal carrying the same underlying value are never
//! equal to each other.

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A nonterminal, identified by an opaque hashable value.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Variable(Rc<str>);

/// A terminal, identified by an opaque hashable value.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Terminal(Rc<str>);

impl Variable {
    /// Creates a variable carrying the given value.
    pub fn new(value: impl Into<String>) -> Self {
        Variable(Rc::from(value.into()))
    }

    /// Returns the variable's underlying value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Terminal {
    /// Creates a terminal carrying the given value.
    pub fn new(value: impl Into<String>) -> Self {
        Terminal(Rc::from(value.into()))
    }

    /// Returns the terminal's underlying value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({:?})", self.0)
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Terminal({:?})", self.0)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The common polymorphic category ("grammar object") over which
/// production bodies range: a variable, a terminal, or the epsilon marker.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GrammarSymbol {
    /// A nonterminal.
    Variable(Variable),
    /// A terminal.
    Terminal(Terminal),
    /// The empty-string marker.
    Epsilon,
}

impl GrammarSymbol {
    /// True if this is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, GrammarSymbol::Variable(_))
    }

    /// True if this is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GrammarSymbol::Terminal(_))
    }

    /// True if this is the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, GrammarSymbol::Epsilon)
    }

    /// Returns the inner variable, if this is one.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            GrammarSymbol::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the inner terminal, if this is one.
    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            GrammarSymbol::Terminal(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Variable> for GrammarSymbol {
    fn from(v: Variable) -> Self {
        GrammarSymbol::Variable(v)
    }
}

impl From<Terminal> for GrammarSymbol {
    fn from(t: Terminal) -> Self {
        GrammarSymbol::Terminal(t)
    }
}

impl fmt::Debug for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Variable(v) => write!(f, "{:?}", v),
            GrammarSymbol::Terminal(t) => write!(f, "{:?}", t),
            GrammarSymbol::Epsilon => write!(f, "Epsilon"),
        }
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Variable(v) => write!(f, "{}", v),
            GrammarSymbol::Terminal(t) => write!(f, "{}", t),
            GrammarSymbol::Epsilon => write!(f, "epsilon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_and_terminal_with_same_value_are_distinct() {
        let v: GrammarSymbol = Variable::new("a").into();
        let t: GrammarSymbol = Terminal::new("a").into();
        assert_ne!(v, t);
    }

    #[test]
    fn variables_with_same_value_are_equal() {
        assert_eq!(Variable::new("S"), Variable::new("S"));
    }

    #[test]
    fn epsilon_is_its_own_singleton() {
        assert_eq!(GrammarSymbol::Epsilon, GrammarSymbol::Epsilon);
        assert!(GrammarSymbol::Epsilon.is_epsilon());
    }
}
