//! The shared bottom-up fixed-point engine used by the generating,
//! nullable, and epsilon-reachability analyses: every production's body
//! contributes a "remaining counter" and each body element an "impact"
//! entry; when a counter reaches zero its head joins the working set.
//!
//! Operates directly on [`GrammarSymbol`] values via a hash map, since
//! this crate's symbols carry arbitrary string payloads rather than small
//! integers.

use std::collections::{HashMap, HashSet};

use crate::grammar::Cfg;
use crate::symbol::GrammarSymbol;

/// Fixed-point engine shared by the generating/nullable/reachable analyses.
///
/// The engine is **side-effect free across calls**: [`Self::run`] restores
/// every counter it decremented before returning, so the same engine can be
/// reused for multiple analyses without rebuilding the impact tables.
pub(crate) struct FixedPointEngine<'g> {
    grammar: &'g Cfg,
    /// For each production (by index into `grammar.productions()`), the
    /// number of body elements not yet known to be in the working set.
    remaining: Vec<usize>,
    /// For each symbol, the productions whose body contains it (as an
    /// index into `grammar.productions()`).
    impacts: HashMap<GrammarSymbol, Vec<usize>>,
}

impl<'g> FixedPointEngine<'g> {
    /// Builds the impact tables once for `grammar`.
    pub(crate) fn new(grammar: &'g Cfg) -> Self {
        let productions = grammar.productions();
        let mut remaining = Vec::with_capacity(productions.len());
        let mut impacts: HashMap<GrammarSymbol, Vec<usize>> = HashMap::new();
        for (i, p) in productions.iter().enumerate() {
            remaining.push(p.body().len());
            for sym in p.body() {
                impacts.entry(sym.clone()).or_default().push(i);
            }
        }
        FixedPointEngine {
            grammar,
            remaining,
            impacts,
        }
    }

    /// Runs the engine to a fixed point, starting from `seed` (symbols
    /// whose membership in the working set is assumed from the start —
    /// e.g. every terminal, or the heads of empty productions). Returns the
    /// resulting working set, restricted by the caller as needed. Epsilon
    /// is a useful sentinel inside the working set during the run and is
    /// left in the result; callers strip it.
    pub(crate) fn run(&mut self, seed: impl IntoIterator<Item = GrammarSymbol>) -> HashSet<GrammarSymbol> {
        let mut in_set: HashSet<GrammarSymbol> = HashSet::new();
        let mut stack: Vec<GrammarSymbol> = Vec::new();
        let mut touched: Vec<usize> = Vec::new();

        for sym in seed {
            if in_set.insert(sym.clone()) {
                stack.push(sym);
            }
        }

        while let Some(sym) = stack.pop() {
            #[cfg(feature = "trace")]
            log::trace!("fixedpoint::run: popped {:?}, {} remaining on stack", sym, stack.len());
            if let Some(indices) = self.impacts.get(&sym) {
                for &i in indices {
                    self.remaining[i] -= 1;
                    touched.push(i);
                    if self.remaining[i] == 0 {
                        let head_sym = GrammarSymbol::Variable(
                            self.grammar.productions()[i].head().clone(),
                        );
                        #[cfg(feature = "trace")]
                        log::trace!("fixedpoint::run: production {} saturated, admitting {:?}", i, head_sym);
                        if in_set.insert(head_sym.clone()) {
                            stack.push(head_sym);
                        }
                    }
                }
            }
        }

        // Restore counters so this engine can be reused for another run.
        for i in touched {
            self.remaining[i] += 1;
        }

        in_set
    }

    /// Like [`Self::run`], but stops the instant `target` joins the working
    /// set, and operates on a private copy of the counter table so the
    /// short-circuited run cannot leave the shared tables in an
    /// inconsistent (partially decremented) state. Used by
    /// `generate_epsilon`.
    pub(crate) fn run_until(
        &self,
        seed: impl IntoIterator<Item = GrammarSymbol>,
        target: &GrammarSymbol,
    ) -> bool {
        let mut remaining = self.remaining.clone();
        let mut in_set: HashSet<GrammarSymbol> = HashSet::new();
        let mut stack: Vec<GrammarSymbol> = Vec::new();

        for sym in seed {
            if &sym == target {
                return true;
            }
            if in_set.insert(sym.clone()) {
                stack.push(sym);
            }
        }

        while let Some(sym) = stack.pop() {
            #[cfg(feature = "trace")]
            log::trace!("fixedpoint::run_until: popped {:?}, target {:?}", sym, target);
            if let Some(indices) = self.impacts.get(&sym) {
                for &i in indices {
                    remaining[i] -= 1;
                    if remaining[i] == 0 {
                        let head_sym = GrammarSymbol::Variable(
                            self.grammar.productions()[i].head().clone(),
                        );
                        if &head_sym == target {
                            return true;
                        }
                        if in_set.insert(head_sym.clone()) {
                            stack.push(head_sym);
                        }
                    }
                }
            }
        }

        false
    }
}
