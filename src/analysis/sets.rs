//! Generating, nullable, reachable and unit-pair analyses over a
//! grammar's production set, built on the shared fixed-point engine.

use std::collections::{HashSet, VecDeque};

use crate::analysis::fixedpoint::FixedPointEngine;
use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Variable};

/// Symbols from which some terminal string is derivable. Seeds the fixed-point engine with every terminal
/// plus the heads of empty productions.
pub fn generating_symbols(grammar: &Cfg) -> HashSet<GrammarSymbol> {
    let mut engine = FixedPointEngine::new(grammar);
    let seed = terminal_and_nulling_seed(grammar);
    let mut result = engine.run(seed);
    result.remove(&GrammarSymbol::Epsilon);
    result
}

/// Variables that derive the empty string.
/// Seeds only with the heads of empty productions.
pub fn nullable_symbols(grammar: &Cfg) -> HashSet<Variable> {
    let mut engine = FixedPointEngine::new(grammar);
    let seed = nulling_seed(grammar);
    let result = engine.run(seed);
    result
        .into_iter()
        .filter_map(|s| match s {
            GrammarSymbol::Variable(v) => Some(v),
            _ => None,
        })
        .collect()
}

/// Whether the start symbol derives the empty string. Runs the nullable
/// engine short-circuiting the moment the start symbol joins the working
/// set, on a private copy of the counter table.
pub fn generate_epsilon(grammar: &Cfg) -> bool {
    let start = match grammar.start() {
        Some(s) => s.clone(),
        None => return false,
    };
    let engine = FixedPointEngine::new(grammar);
    let seed = nulling_seed(grammar);
    engine.run_until(seed, &GrammarSymbol::Variable(start))
}

fn nulling_seed(grammar: &Cfg) -> Vec<GrammarSymbol> {
    grammar
        .productions()
        .iter()
        .filter(|p| p.is_empty())
        .map(|p| GrammarSymbol::Variable(p.head().clone()))
        .collect()
}

fn terminal_and_nulling_seed(grammar: &Cfg) -> Vec<GrammarSymbol> {
    let mut seed: Vec<GrammarSymbol> = grammar
        .terminals()
        .iter()
        .cloned()
        .map(GrammarSymbol::Terminal)
        .collect();
    seed.extend(nulling_seed(grammar));
    seed
}

/// Symbols reachable from the start symbol: forward BFS over the
/// "head -> body element" relation, excluding epsilon edges.
pub fn reachable_symbols(grammar: &Cfg) -> HashSet<GrammarSymbol> {
    let mut reachable: HashSet<GrammarSymbol> = HashSet::new();
    let mut queue: VecDeque<GrammarSymbol> = VecDeque::new();

    if let Some(start) = grammar.start() {
        let start_sym = GrammarSymbol::Variable(start.clone());
        reachable.insert(start_sym.clone());
        queue.push_back(start_sym);
    }

    while let Some(sym) = queue.pop_front() {
        if let GrammarSymbol::Variable(v) = &sym {
            for p in grammar.productions_for(v) {
                for body_sym in p.body() {
                    if body_sym.is_epsilon() {
                        continue;
                    }
                    if reachable.insert(body_sym.clone()) {
                        queue.push_back(body_sym.clone());
                    }
                }
            }
        }
    }

    reachable
}

/// Reflexive-transitive closure of "A derives B via a single-variable
/// body", seeded with the identity pairs `(V, V)`. Returned as the set of pairs `(A, B)` with `A ⇒* B`.
pub fn unit_pairs(grammar: &Cfg) -> HashSet<(Variable, Variable)> {
    let mut pairs: HashSet<(Variable, Variable)> = grammar
        .variables()
        .iter()
        .map(|v| (v.clone(), v.clone()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        let mut additions = Vec::new();
        for (a, b) in &pairs {
            for p in grammar.productions_for(b) {
                if p.body().len() == 1 {
                    if let GrammarSymbol::Variable(c) = &p.body()[0] {
                        let pair = (a.clone(), c.clone());
                        if !pairs.contains(&pair) {
                            additions.push(pair);
                        }
                    }
                }
            }
        }
        if !additions.is_empty() {
            changed = true;
            pairs.extend(additions);
        }
    }

    pairs
}

/// Whether `L(G)` is the empty language: true iff the start symbol is not
/// generating.
pub fn is_empty_language(grammar: &Cfg) -> bool {
    match grammar.start() {
        None => true,
        Some(start) => !grammar
            .generating_set()
            .contains(&GrammarSymbol::Variable(start.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::Production;
    use crate::symbol::Terminal;

    fn v(s: &str) -> Variable {
        Variable::new(s)
    }
    fn sv(s: &str) -> GrammarSymbol {
        GrammarSymbol::Variable(Variable::new(s))
    }
    fn st(s: &str) -> GrammarSymbol {
        GrammarSymbol::Terminal(Terminal::new(s))
    }

    #[test]
    fn g4_nullable_is_b_only() {
        // S -> A B; A -> a; B -> b | epsilon
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![sv("A"), sv("B")]))
            .production(Production::new(v("A"), vec![st("a")]))
            .production(Production::new(v("B"), vec![st("b")]))
            .production(Production::new(v("B"), vec![]))
            .build();

        let nullable = nullable_symbols(&g);
        assert_eq!(nullable, HashSet::from([v("B")]));
        assert!(!generate_epsilon(&g));
    }

    #[test]
    fn g6_unit_pairs_chain_to_c() {
        // S -> A; A -> B; B -> C; C -> c
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![sv("A")]))
            .production(Production::new(v("A"), vec![sv("B")]))
            .production(Production::new(v("B"), vec![sv("C")]))
            .production(Production::new(v("C"), vec![st("c")]))
            .build();

        let pairs = unit_pairs(&g);
        assert!(pairs.contains(&(v("S"), v("C"))));
        assert!(pairs.contains(&(v("S"), v("S"))));
    }

    #[test]
    fn reachable_excludes_unreachable_symbols() {
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a")]))
            .production(Production::new(v("Unused"), vec![st("z")]))
            .build();
        let reachable = reachable_symbols(&g);
        assert!(reachable.contains(&sv("S")));
        assert!(!reachable.contains(&sv("Unused")));
    }
}
