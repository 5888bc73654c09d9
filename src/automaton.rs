//! The external finite-automaton contract used by intersection and
//! recursive-state-automaton boxes, plus a minimal concrete DFA so the
//! contract is testable without an external crate.

use std::collections::{HashMap, HashSet};

use crate::symbol::Terminal;

/// Narrow interface a finite automaton must satisfy to participate in
/// CFG × automaton intersection or to serve as a recursive-state-automaton
/// box. Kept separate from any concrete automaton representation so this
/// crate does not depend on one.
pub trait FiniteAutomaton {
    type State: Clone + Eq + std::hash::Hash;

    /// The single start state. Automatons passed to intersection are
    /// expected to already be deterministic, so this returns exactly one
    /// state.
    fn start_state(&self) -> Self::State;

    /// Whether `state` is accepting.
    fn is_final(&self, state: &Self::State) -> bool;

    /// Transition on one terminal; `None` if undefined.
    fn step(&self, state: &Self::State, on: &Terminal) -> Option<Self::State>;

    /// All states.
    fn states(&self) -> Vec<Self::State>;

    /// Whether the language is empty.
    fn is_empty(&self) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![self.start_state()];
        while let Some(s) = stack.pop() {
            if self.is_final(&s) {
                return false;
            }
            if !seen.insert(s.clone()) {
                continue;
            }
            for next in self.reachable_from(&s) {
                stack.push(next);
            }
        }
        true
    }

    /// Whether the empty word is accepted.
    fn accepts_empty(&self) -> bool {
        self.is_final(&self.start_state())
    }

    /// Whether `word` is accepted.
    fn accepts(&self, word: &[Terminal]) -> bool {
        let mut state = self.start_state();
        for t in word {
            match self.step(&state, t) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(&state)
    }

    /// States reachable in one step from `state`, over every symbol this
    /// automaton transitions on. Used by [`Self::is_empty`]'s reachability
    /// search; a concrete automaton may override this for efficiency.
    fn reachable_from(&self, state: &Self::State) -> Vec<Self::State>;
}

/// A concrete, already-deterministic finite automaton over `Terminal`
/// symbols, keyed by small integer state ids.
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    start: usize,
    finals: HashSet<usize>,
    transitions: HashMap<(usize, Terminal), usize>,
    state_count: usize,
}

impl Dfa {
    pub fn builder() -> DfaBuilder {
        DfaBuilder::default()
    }
}

impl FiniteAutomaton for Dfa {
    type State = usize;

    fn start_state(&self) -> usize {
        self.start
    }

    fn is_final(&self, state: &usize) -> bool {
        self.finals.contains(state)
    }

    fn step(&self, state: &usize, on: &Terminal) -> Option<usize> {
        self.transitions.get(&(*state, on.clone())).copied()
    }

    fn states(&self) -> Vec<usize> {
        (0..self.state_count).collect()
    }

    fn reachable_from(&self, state: &usize) -> Vec<usize> {
        self.transitions
            .iter()
            .filter_map(|((s, _), dst)| if s == state { Some(*dst) } else { None })
            .collect()
    }
}

/// Builder for [`Dfa`].
#[derive(Default)]
pub struct DfaBuilder {
    start: usize,
    finals: HashSet<usize>,
    transitions: HashMap<(usize, Terminal), usize>,
    state_count: usize,
}

impl DfaBuilder {
    pub fn start(mut self, state: usize) -> Self {
        self.start = state;
        self.state_count = self.state_count.max(state + 1);
        self
    }

    pub fn accepting(mut self, state: usize) -> Self {
        self.state_count = self.state_count.max(state + 1);
        self.finals.insert(state);
        self
    }

    pub fn transition(mut self, from: usize, on: Terminal, to: usize) -> Self {
        self.state_count = self.state_count.max(from + 1).max(to + 1);
        self.transitions.insert((from, on), to);
        self
    }

    pub fn build(self) -> Dfa {
        Dfa {
            start: self.start,
            finals: self.finals,
            transitions: self.transitions,
            state_count: self.state_count,
        }
    }
}
