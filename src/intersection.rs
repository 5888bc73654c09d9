//! CFG × DFA intersection: the triple-state product construction over
//! combined variables `⟨p, X, r⟩`, plus a dynamically-typed entry point
//! for callers that only know at runtime whether their operand is a
//! regex or a finite automaton.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::automaton::{Dfa, FiniteAutomaton};
use crate::error::{CfgError, Result};
use crate::grammar::Cfg;
use crate::production::Production;
use crate::regex::Regex;
use crate::symbol::{GrammarSymbol, Variable};

/// Lazily creates and memoises the combined variables `⟨p, X, r⟩` used by
/// the product construction.
struct Converter<S> {
    memo: HashMap<(S, Variable, S), Variable>,
}

impl<S: Clone + Eq + Hash + Debug> Converter<S> {
    fn new() -> Self {
        Converter { memo: HashMap::new() }
    }

    fn combined(&mut self, p: &S, x: &Variable, r: &S) -> Variable {
        let key = (p.clone(), x.clone(), r.clone());
        if let Some(v) = self.memo.get(&key) {
            #[cfg(feature = "trace")]
            log::trace!("intersection::combined: reused ⟨{:?},{},{:?}⟩", p, x.value(), r);
            return v.clone();
        }
        let name = format!("<{:?},{},{:?}>", p, x.value(), r);
        let fresh = Variable::new(name);
        #[cfg(feature = "trace")]
        log::trace!("intersection::combined: created fresh variable {:?}", fresh);
        self.memo.insert(key, fresh.clone());
        fresh
    }
}

/// Intersects `grammar` with `automaton`: converts the grammar to CNF and
/// builds the product grammar over combined variables `⟨p, X, r⟩`. The
/// result need not be reduced; run [`crate::cnf::remove_useless_symbols`]
/// if a minimal result is wanted.
pub fn intersect<A>(grammar: &Cfg, automaton: &A) -> Cfg
where
    A: FiniteAutomaton,
    A::State: Clone + Eq + Hash + Debug,
{
    let cnf = grammar.to_cnf();
    let states = automaton.states();
    let mut conv: Converter<A::State> = Converter::new();
    let mut productions: Vec<Production> = Vec::new();

    for p in &states {
        for r in &states {
            for prod in cnf.productions() {
                if let [GrammarSymbol::Variable(y), GrammarSymbol::Variable(z)] = prod.body() {
                    for q in &states {
                        let head = conv.combined(p, prod.head(), r);
                        let left = conv.combined(p, y, q);
                        let right = conv.combined(q, z, r);
                        productions.push(Production::new_unfiltered(
                            head,
                            vec![GrammarSymbol::Variable(left), GrammarSymbol::Variable(right)],
                        ));
                    }
                }
            }
        }
    }

    for p in &states {
        for prod in cnf.productions() {
            if let [GrammarSymbol::Terminal(a)] = prod.body() {
                if let Some(q) = automaton.step(p, a) {
                    let head = conv.combined(p, prod.head(), &q);
                    productions.push(Production::new_unfiltered(head, vec![GrammarSymbol::Terminal(a.clone())]));
                }
            }
        }
    }

    let start_symbol = Variable::new("Start");
    let mut start_productions = Vec::new();
    if let Some(cnf_start) = cnf.start() {
        let q0 = automaton.start_state();
        for f in states.iter().filter(|s| automaton.is_final(s)) {
            let combined = conv.combined(&q0, cnf_start, f);
            start_productions.push(Production::new_unfiltered(start_symbol.clone(), vec![GrammarSymbol::Variable(combined)]));
        }
        if crate::analysis::sets::generate_epsilon(&cnf) && automaton.accepts_empty() {
            start_productions.push(Production::new_unfiltered(start_symbol.clone(), vec![]));
        }
    }

    let mut builder = Cfg::builder().start(start_symbol);
    builder = builder.productions(start_productions);
    builder = builder.productions(productions);
    builder.build()
}

/// Intersects `grammar` with a regular expression: compiles it to a
/// minimal DFA first, then runs the same product construction.
pub fn intersect_regex(grammar: &Cfg, regex: &dyn Regex) -> Cfg {
    let dfa = regex.to_epsilon_nfa_minimized();
    intersect(grammar, &dfa)
}

/// Wraps a boxed regex so it can be passed through [`intersect_dynamic`],
/// whose `&dyn Any` operand must be a concrete, sized type to downcast.
pub struct AnyRegex(pub Box<dyn Regex>);

/// Intersects `grammar` with `operand`, accepting either a [`Dfa`] or an
/// [`AnyRegex`] at runtime. Fails with [`CfgError::UnsupportedOperand`] for
/// anything else, mirroring the "not implemented" failure of dynamically
/// typed callers that pass neither.
pub fn intersect_dynamic(grammar: &Cfg, operand: &dyn Any) -> Result<Cfg> {
    if let Some(dfa) = operand.downcast_ref::<Dfa>() {
        return Ok(intersect(grammar, dfa));
    }
    if let Some(AnyRegex(regex)) = operand.downcast_ref::<AnyRegex>() {
        return Ok(intersect_regex(grammar, regex.as_ref()));
    }
    Err(CfgError::UnsupportedOperand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyk::contains;
    use crate::production::Production;
    use crate::symbol::Terminal;

    fn v(s: &str) -> Variable {
        Variable::new(s)
    }
    fn st(s: &str) -> GrammarSymbol {
        GrammarSymbol::Terminal(Terminal::new(s))
    }
    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(|c| Terminal::new(c.to_string())).collect()
    }

    fn a_star_b_star() -> Dfa {
        Dfa::builder()
            .start(0)
            .accepting(0)
            .accepting(1)
            .transition(0, Terminal::new("a"), 0)
            .transition(0, Terminal::new("b"), 1)
            .transition(1, Terminal::new("b"), 1)
            .build()
    }

    #[test]
    fn g5_intersection_yields_matched_counts_language() {
        // S -> a S b | epsilon
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), GrammarSymbol::Variable(v("S")), st("b")]))
            .production(Production::new(v("S"), vec![]))
            .build();
        let dfa = a_star_b_star();

        let product = intersect(&g, &dfa);
        assert!(contains(&product, &[]));
        assert!(contains(&product, &word("ab")));
        assert!(contains(&product, &word("aabb")));
        assert!(!contains(&product, &word("aab")));
        assert!(!contains(&product, &word("ba")));
    }

    #[test]
    fn unsupported_operand_is_rejected() {
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a")]))
            .build();
        let not_an_automaton: i32 = 42;
        let err = intersect_dynamic(&g, &not_an_automaton).unwrap_err();
        assert_eq!(err, CfgError::UnsupportedOperand);
    }
}
