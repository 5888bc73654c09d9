//! The external pushdown-automaton contract, plus the single-state
//! empty-stack encoding of a grammar as a PDA.

use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// Narrow interface a pushdown automaton must satisfy to receive a
/// grammar's PDA encoding.
pub trait Pda {
    type State: Clone + Eq;

    /// Builds a PDA over the given state set, input alphabet, stack
    /// alphabet, start state, and start stack symbol.
    fn new(
        states: Vec<Self::State>,
        input_alphabet: Vec<Terminal>,
        stack_alphabet: Vec<GrammarSymbol>,
        start_state: Self::State,
        start_stack_symbol: GrammarSymbol,
    ) -> Self;

    /// Adds a transition: on `input` (or epsilon, if `None`) with `from`
    /// on top of the stack, pop it and push `push`, left-to-right, so that
    /// `push[0]` ends up on top of the stack (the next symbol popped),
    /// moving from `from` to `to`.
    fn add_transition(
        &mut self,
        from: Self::State,
        input: Option<Terminal>,
        stack_top: GrammarSymbol,
        to: Self::State,
        push: Vec<GrammarSymbol>,
    );
}

/// Encodes `grammar` as a single-state PDA accepting by empty stack. The
/// input alphabet is the grammar's terminals; the stack alphabet is its
/// terminals and variables; the start stack symbol is the start variable.
/// For each production `X -> alpha`, adds an epsilon-input transition
/// popping `X` and pushing `alpha` in order. For each terminal `a`, adds
/// an `(a, a) -> pop` transition with an empty push. This encodes
/// leftmost derivation directly.
pub fn encode_pda<P>(grammar: &Cfg) -> P
where
    P: Pda<State = ()>,
{
    let input_alphabet = grammar.terminals().to_vec();
    let mut stack_alphabet: Vec<GrammarSymbol> = grammar
        .variables()
        .iter()
        .cloned()
        .map(GrammarSymbol::Variable)
        .collect();
    stack_alphabet.extend(grammar.terminals().iter().cloned().map(GrammarSymbol::Terminal));

    let start_variable = grammar.start().cloned().unwrap_or_else(|| Variable::new("S"));
    let start_stack_symbol = GrammarSymbol::Variable(start_variable);

    let mut pda = P::new(vec![()], input_alphabet, stack_alphabet, (), start_stack_symbol);

    for p in grammar.productions() {
        pda.add_transition((), None, GrammarSymbol::Variable(p.head().clone()), (), p.body().to_vec());
    }
    for t in grammar.terminals() {
        pda.add_transition((), Some(t.clone()), GrammarSymbol::Terminal(t.clone()), (), Vec::new());
    }

    pda
}

/// A minimal concrete single-state PDA, for testing [`encode_pda`]
/// without an external PDA crate.
#[derive(Default)]
pub struct StackPda {
    input_alphabet: Vec<Terminal>,
    stack_alphabet: Vec<GrammarSymbol>,
    start_stack_symbol: Option<GrammarSymbol>,
    transitions: Vec<(Option<Terminal>, GrammarSymbol, Vec<GrammarSymbol>)>,
}

impl Pda for StackPda {
    type State = ();

    fn new(
        _states: Vec<()>,
        input_alphabet: Vec<Terminal>,
        stack_alphabet: Vec<GrammarSymbol>,
        _start_state: (),
        start_stack_symbol: GrammarSymbol,
    ) -> Self {
        StackPda {
            input_alphabet,
            stack_alphabet,
            start_stack_symbol: Some(start_stack_symbol),
            transitions: Vec::new(),
        }
    }

    fn add_transition(
        &mut self,
        _from: (),
        input: Option<Terminal>,
        stack_top: GrammarSymbol,
        _to: (),
        push: Vec<GrammarSymbol>,
    ) {
        self.transitions.push((input, stack_top, push));
    }
}

impl StackPda {
    /// Accepts `word` by simulating all nondeterministic choices with an
    /// explicit stack and backtracking; returns true iff some run empties
    /// the stack exactly when the input is exhausted.
    pub fn accepts(&self, word: &[Terminal]) -> bool {
        let start = match &self.start_stack_symbol {
            Some(s) => s.clone(),
            None => return word.is_empty(),
        };
        self.run(word, vec![start])
    }

    fn run(&self, remaining: &[Terminal], stack: Vec<GrammarSymbol>) -> bool {
        if stack.is_empty() {
            return remaining.is_empty();
        }
        let top = stack.last().unwrap().clone();
        for (input, stack_top, push) in &self.transitions {
            if stack_top != &top {
                continue;
            }
            match input {
                None => {
                    let mut next_stack = stack[..stack.len() - 1].to_vec();
                    next_stack.extend(push.iter().rev().cloned());
                    if self.run(remaining, next_stack) {
                        return true;
                    }
                }
                Some(t) => {
                    if remaining.first() == Some(t) {
                        let mut next_stack = stack[..stack.len() - 1].to_vec();
                        next_stack.extend(push.iter().rev().cloned());
                        if self.run(&remaining[1..], next_stack) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::Production;
    use crate::symbol::Variable;

    fn v(s: &str) -> Variable {
        Variable::new(s)
    }
    fn st(s: &str) -> GrammarSymbol {
        GrammarSymbol::Terminal(Terminal::new(s))
    }
    fn sv(s: &str) -> GrammarSymbol {
        GrammarSymbol::Variable(Variable::new(s))
    }
    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(|c| Terminal::new(c.to_string())).collect()
    }

    #[test]
    fn encoded_pda_accepts_same_language_as_grammar() {
        // S -> a S b | a b
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), sv("S"), st("b")]))
            .production(Production::new(v("S"), vec![st("a"), st("b")]))
            .build();

        let pda: StackPda = encode_pda(&g);
        assert!(pda.accepts(&word("ab")));
        assert!(pda.accepts(&word("aabb")));
        assert!(!pda.accepts(&word("abab")));
        assert!(!pda.input_alphabet.is_empty());
        assert!(!pda.stack_alphabet.is_empty());
    }
}
