//! Finiteness detection: converts to Chomsky Normal Form, builds the
//! digraph of binary-production edges, and checks for cycles.

use std::collections::{HashMap, HashSet};

use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Variable};

/// Whether `L(grammar)` is finite. Converts to CNF, forms the digraph
/// whose edges are `head -> body element` for every binary production
/// (unary productions terminate recursion and contribute no edge), and
/// declares the grammar finite iff that digraph is acyclic.
pub fn is_finite(grammar: &Cfg) -> bool {
    let cnf = grammar.to_cnf();
    let mut edges: HashMap<Variable, Vec<Variable>> = HashMap::new();
    for p in cnf.productions() {
        if let [GrammarSymbol::Variable(b), GrammarSymbol::Variable(c)] = p.body() {
            let adj = edges.entry(p.head().clone()).or_default();
            adj.push(b.clone());
            adj.push(c.clone());
        }
    }

    let mut color: HashMap<Variable, u8> = HashMap::new(); // 0 unvisited, 1 in-progress, 2 done
    for v in cnf.variables() {
        if color.get(v).copied().unwrap_or(0) == 0 && has_cycle(v, &edges, &mut color) {
            return false;
        }
    }
    true
}

fn has_cycle(node: &Variable, edges: &HashMap<Variable, Vec<Variable>>, color: &mut HashMap<Variable, u8>) -> bool {
    color.insert(node.clone(), 1);
    if let Some(neighbors) = edges.get(node) {
        for next in neighbors {
            match color.get(next).copied().unwrap_or(0) {
                1 => return true,
                0 => {
                    if has_cycle(next, edges, color) {
                        return true;
                    }
                }
                _ => {}
            }
        }
    }
    color.insert(node.clone(), 2);
    false
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
    fn g2_is_finite() {
        // S -> a | b
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a")]))
            .production(Production::new(v("S"), vec![st("b")]))
            .build();
        assert!(is_finite(&g));
    }

    #[test]
    fn g1_is_infinite() {
        // S -> a S b | a b
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), sv("S"), st("b")]))
            .production(Production::new(v("S"), vec![st("a"), st("b")]))
            .build();
        assert!(!is_finite(&g));
    }

    #[test]
    fn g3_is_infinite_despite_binary_self_loop() {
        // S -> S S | a
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![sv("S"), sv("S")]))
            .production(Production::new(v("S"), vec![st("a")]))
            .build();
        assert!(!is_finite(&g));
    }
}
