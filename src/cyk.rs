//! The Cocke-Younger-Kasami recognizer and leftmost/rightmost derivation
//! reconstruction.
//!
//! Builds the standard dynamic-programming membership table directly on
//! this crate's `Variable`/`Terminal` symbol model, over the Chomsky
//! Normal Form produced by [`crate::cnf`].

use std::collections::HashMap;

use crate::error::{CfgError, Result};
use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// How a variable was first admitted into a CYK table cell.
#[derive(Clone, Debug)]
enum CellOrigin {
    /// Admitted by a unary (terminal) production.
    Unary(Terminal),
    /// Admitted by a binary production `head -> left right`, split at `k`:
    /// `left` spans the substring `[i, i+k]`, `right` spans `[i+k+1, i+j]`.
    Binary {
        split: usize,
        left: Variable,
        right: Variable,
    },
}

/// A single CYK table cell: the set of variables deriving one substring,
/// in the order they were first admitted. Ties in derivation
/// reconstruction are broken by this order.
#[derive(Default, Clone)]
struct Cell {
    order: Vec<Variable>,
    origins: HashMap<Variable, CellOrigin>,
}

impl Cell {
    fn admit(&mut self, var: Variable, origin: CellOrigin) {
        if !self.origins.contains_key(&var) {
            self.order.push(var.clone());
            self.origins.insert(var, origin);
        }
    }

    fn contains(&self, var: &Variable) -> bool {
        self.origins.contains_key(var)
    }
}

/// The CYK table for a fixed CNF grammar and word. `cells[i][j]` holds
/// the variables deriving the substring of length `j + 1` starting at
/// position `i`.
struct CykTable {
    cells: Vec<Vec<Cell>>,
}

fn build_table(cnf: &Cfg, word: &[Terminal]) -> CykTable {
    let n = word.len();
    let mut cells: Vec<Vec<Cell>> = (0..n).map(|i| vec![Cell::default(); n - i]).collect();

    let mut terminal_rules: Vec<(Terminal, Variable)> = Vec::new();
    let mut binary_rules: Vec<(Variable, Variable, Variable)> = Vec::new();
    for p in cnf.productions() {
        match p.body() {
            [GrammarSymbol::Terminal(t)] => terminal_rules.push((t.clone(), p.head().clone())),
            [GrammarSymbol::Variable(b), GrammarSymbol::Variable(c)] => {
                binary_rules.push((p.head().clone(), b.clone(), c.clone()))
            }
            _ => {}
        }
    }

    for i in 0..n {
        for (t, head) in &terminal_rules {
            if t == &word[i] {
                cells[i][0].admit(head.clone(), CellOrigin::Unary(t.clone()));
            }
        }
    }

    for j in 1..n {
        for i in 0..(n - j) {
            for k in 0..j {
                for (head, b, c) in &binary_rules {
                    if cells[i][k].contains(b) && cells[i + k + 1][j - k - 1].contains(c) {
                        cells[i][j].admit(
                            head.clone(),
                            CellOrigin::Binary {
                                split: k,
                                left: b.clone(),
                                right: c.clone(),
                            },
                        );
                    }
                }
            }
        }
    }

    CykTable { cells }
}

/// Whether `word` (as a sequence of terminal values) is generated by
/// `grammar`. Converts to CNF internally, so `G.contains(w) ==
/// G.to_cnf().contains(w)` holds trivially. The
/// empty word is handled separately via `generate_epsilon`.
pub fn contains(grammar: &Cfg, word: &[Terminal]) -> bool {
    if word.is_empty() {
        return crate::analysis::sets::generate_epsilon(grammar);
    }
    let cnf = grammar.to_cnf();
    let start = match cnf.start() {
        Some(s) => s,
        None => return false,
    };
    let table = build_table(&cnf, word);
    let n = word.len();
    table.cells[0][n - 1].contains(start)
}

/// One placeholder node in a partially expanded sentential form.
#[derive(Clone)]
enum Node {
    Done(Terminal),
    Pending { var: Variable, start: usize, len: usize },
}

fn snapshot(nodes: &[Node]) -> Vec<GrammarSymbol> {
    nodes
        .iter()
        .map(|n| match n {
            Node::Done(t) => GrammarSymbol::Terminal(t.clone()),
            Node::Pending { var, .. } => GrammarSymbol::Variable(var.clone()),
        })
        .collect()
}

fn expand_at(
    nodes: &mut Vec<Node>,
    index: usize,
    table: &CykTable,
) {
    let (var, start, len) = match &nodes[index] {
        Node::Pending { var, start, len } => (var.clone(), *start, *len),
        Node::Done(_) => unreachable!("expand_at called on a terminal node"),
    };
    let origin = table.cells[start][len - 1]
        .origins
        .get(&var)
        .expect("CYK cell must contain an origin for an admitted variable")
        .clone();

    match origin {
        CellOrigin::Unary(t) => {
            nodes[index] = Node::Done(t);
        }
        CellOrigin::Binary { split, left, right } => {
            let left_len = split + 1;
            let right_len = len - 1 - split;
            let right_start = start + split + 1;
            nodes.splice(
                index..=index,
                [
                    Node::Pending { var: left, start, len: left_len },
                    Node::Pending { var: right, start: right_start, len: right_len },
                ],
            );
        }
    }
}

fn reconstruct_derivation(
    grammar: &Cfg,
    word: &[Terminal],
    leftmost: bool,
) -> Result<Vec<Vec<GrammarSymbol>>> {
    if word.is_empty() {
        return if crate::analysis::sets::generate_epsilon(grammar) {
            let start = grammar.start().cloned().expect("nullable start must exist");
            Ok(vec![vec![GrammarSymbol::Variable(start)], vec![]])
        } else {
            Err(CfgError::NoDerivation)
        };
    }

    let cnf = grammar.to_cnf();
    let start = cnf.start().ok_or(CfgError::NoDerivation)?.clone();
    let table = build_table(&cnf, word);
    let n = word.len();
    if !table.cells[0][n - 1].contains(&start) {
        return Err(CfgError::NoDerivation);
    }

    let mut nodes = vec![Node::Pending { var: start, start: 0, len: n }];
    let mut steps = vec![snapshot(&nodes)];

    loop {
        let pending_index = if leftmost {
            nodes.iter().position(|n| matches!(n, Node::Pending { .. }))
        } else {
            nodes.iter().rposition(|n| matches!(n, Node::Pending { .. }))
        };
        let index = match pending_index {
            Some(i) => i,
            None => break,
        };
        expand_at(&mut nodes, index, &table);
        steps.push(snapshot(&nodes));
    }

    Ok(steps)
}

/// Reconstructs a leftmost derivation of `word` from the grammar's start
/// symbol: emits the start symbol, then repeatedly expands the leftmost
/// unexpanded variable using the CYK table's back-pointers.
/// Fails with [`CfgError::NoDerivation`] if `word` is not in the language.
pub fn leftmost_derivation(grammar: &Cfg, word: &[Terminal]) -> Result<Vec<Vec<GrammarSymbol>>> {
    reconstruct_derivation(grammar, word, true)
}

/// Symmetric to [`leftmost_derivation`], expanding the rightmost
/// unexpanded variable at each step.
pub fn rightmost_derivation(grammar: &Cfg, word: &[Terminal]) -> Result<Vec<Vec<GrammarSymbol>>> {
    reconstruct_derivation(grammar, word, false)
}

/// Concatenates the terminal frontier of a fully expanded sentential form
/// back into a word, for round-trip checks.
pub fn frontier_to_word(form: &[GrammarSymbol]) -> Vec<Terminal> {
    form.iter()
        .filter_map(|s| s.as_terminal().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Cfg;
    use crate::production::Production;
    use crate::symbol::Variable;

    fn v(s: &str) -> Variable {
        Variable::new(s)
    }
    fn t(s: &str) -> Terminal {
        Terminal::new(s)
    }
    fn sv(s: &str) -> GrammarSymbol {
        GrammarSymbol::Variable(Variable::new(s))
    }
    fn st(s: &str) -> GrammarSymbol {
        GrammarSymbol::Terminal(Terminal::new(s))
    }
    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(|c| Terminal::new(c.to_string())).collect()
    }

    fn g1() -> Cfg {
        // S -> a S b | a b
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), sv("S"), st("b")]))
            .production(Production::new(v("S"), vec![st("a"), st("b")]))
            .build()
    }

    #[test]
    fn g1_membership() {
        let g = g1();
        assert!(contains(&g, &word("ab")));
        assert!(contains(&g, &word("aaabbb")));
        assert!(!contains(&g, &word("abab")));
    }

    #[test]
    fn g1_leftmost_round_trips() {
        let g = g1();
        let w = word("aabb");
        let derivation = leftmost_derivation(&g, &w).unwrap();
        let last = derivation.last().unwrap();
        assert_eq!(frontier_to_word(last), w);
        assert_eq!(derivation.first().unwrap(), &vec![sv("S")]);
    }

    #[test]
    fn g1_rightmost_round_trips() {
        let g = g1();
        let w = word("aaabbb");
        let derivation = rightmost_derivation(&g, &w).unwrap();
        assert_eq!(frontier_to_word(derivation.last().unwrap()), w);
    }

    #[test]
    fn no_derivation_for_rejected_word() {
        let g = g1();
        let err = leftmost_derivation(&g, &word("abab")).unwrap_err();
        assert_eq!(err, CfgError::NoDerivation);
    }

    #[test]
    fn empty_word_uses_generate_epsilon() {
        // S -> a S b | epsilon
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), sv("S"), st("b")]))
            .production(Production::new(v("S"), vec![]))
            .build();
        assert!(contains(&g, &[]));
        let derivation = leftmost_derivation(&g, &[]).unwrap();
        assert_eq!(derivation.last().unwrap(), &Vec::<GrammarSymbol>::new());
    }

    #[test]
    fn t_helper_used() {
        let _ = t("a");
    }
}
