//! Grammar rules.
//!
//! A production is an ordered pair `(head, body)` where `head` is a
//! [`Variable`] and `body` is a finite ordered sequence of [`GrammarSymbol`]s.
//! A production may be "filtered" (epsilon elements stripped on
//! construction) or "unfiltered" (body preserved verbatim, needed when a
//! transformation deliberately inserts a generated auxiliary variable whose
//! presence must survive even if other body positions happen to be epsilon).

use std::fmt;

use crate::symbol::{GrammarSymbol, Variable};

/// A single grammar rule `head -> body`.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Production {
    head: Variable,
    body: Vec<GrammarSymbol>,
}

impl Production {
    /// Creates a production, stripping `Epsilon` from the body.
    ///
    /// This is the constructor ordinary callers want: `A -> a Epsilon b`
    /// collapses to `A -> a b`.
    pub fn new(head: Variable, body: impl IntoIterator<Item = GrammarSymbol>) -> Self {
        Production {
            head,
            body: body.into_iter().filter(|s| !s.is_epsilon()).collect(),
        }
    }

    /// Creates a production preserving the body verbatim, including any
    /// `Epsilon` elements. Used by transformations (e.g. epsilon removal)
    /// that insert symbols whose positions must not be silently dropped.
    pub fn new_unfiltered(head: Variable, body: Vec<GrammarSymbol>) -> Self {
        Production { head, body }
    }

    /// The rule's left-hand side.
    pub fn head(&self) -> &Variable {
        &self.head
    }

    /// The rule's right-hand side.
    pub fn body(&self) -> &[GrammarSymbol] {
        &self.body
    }

    /// True for a production with an empty body (`A -> epsilon`).
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Debug for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.head)?;
        if self.body.is_empty() {
            write!(f, "epsilon")
        } else {
            let parts: Vec<String> = self.body.iter().map(|s| s.to_string()).collect();
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Terminal;

    #[test]
    fn new_strips_epsilon() {
        let p = Production::new(
            Variable::new("A"),
            vec![
                GrammarSymbol::Terminal(Terminal::new("a")),
                GrammarSymbol::Epsilon,
                GrammarSymbol::Terminal(Terminal::new("b")),
            ],
        );
        assert_eq!(p.body().len(), 2);
    }

    #[test]
    fn unfiltered_keeps_epsilon() {
        let p = Production::new_unfiltered(Variable::new("A"), vec![GrammarSymbol::Epsilon]);
        assert_eq!(p.body().len(), 1);
    }
}
