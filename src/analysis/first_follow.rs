//! FIRST and FOLLOW set computation via worklist-driven closure.

use std::collections::{HashMap, HashSet};

use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// The end-of-input marker used to seed `FOLLOW(S)`.
pub const END_MARKER: &str = "$";

/// FIRST sets: for every symbol, the set of terminals that may begin some
/// string derivable from it, plus `Epsilon` if it is nullable.
pub type FirstSets = HashMap<GrammarSymbol, HashSet<GrammarSymbol>>;

/// FOLLOW sets: for every variable, the terminals (and possibly the end
/// marker, represented as a `Terminal`) that may immediately follow it in
/// some sentential form derivable from the start symbol.
pub type FollowSets = HashMap<Variable, HashSet<Terminal>>;

/// Computes FIRST sets for every terminal and variable in the grammar.
pub fn compute_first_sets(grammar: &Cfg) -> FirstSets {
    let mut first: FirstSets = HashMap::new();

    for t in grammar.terminals() {
        first.insert(
            GrammarSymbol::Terminal(t.clone()),
            HashSet::from([GrammarSymbol::Terminal(t.clone())]),
        );
    }
    for v in grammar.variables() {
        first.insert(GrammarSymbol::Variable(v.clone()), HashSet::new());
    }

    let mut changed = true;
    while changed {
        changed = false;
        for p in grammar.productions() {
            let head_sym = GrammarSymbol::Variable(p.head().clone());
            let rhs_first = first_of_string(&first, p.body());
            let entry = first.entry(head_sym).or_default();
            let before = entry.len();
            entry.extend(rhs_first);
            changed |= entry.len() != before;
        }
    }

    first
}

/// FIRST of a body: union of `FIRST(Y_1) \ {epsilon}, ..., FIRST(Y_i) \
/// {epsilon}` where `i` is the smallest index with `epsilon \notin
/// FIRST(Y_i)`; includes `Epsilon` only if every symbol in the body is
/// nullable (the empty body included).
pub fn first_of_string(first: &FirstSets, body: &[GrammarSymbol]) -> HashSet<GrammarSymbol> {
    let mut result = HashSet::new();
    let mut all_nullable = true;

    for sym in body {
        if sym.is_epsilon() {
            continue;
        }
        let sym_first = first.get(sym).cloned().unwrap_or_default();
        let mut nullable_here = false;
        for s in &sym_first {
            if s.is_epsilon() {
                nullable_here = true;
            } else {
                result.insert(s.clone());
            }
        }
        if !nullable_here {
            all_nullable = false;
            break;
        }
    }

    if all_nullable {
        result.insert(GrammarSymbol::Epsilon);
    }
    result
}

/// Computes FOLLOW sets for every variable. Seeds `FOLLOW(S)` with the end
/// marker; for every production `X -> alpha Y_i beta`, unions `FIRST(beta)
/// \ {epsilon}` into `FOLLOW(Y_i)`, and additionally unions `FOLLOW(X)` into
/// `FOLLOW(Y_i)` whenever every symbol in `beta` is nullable (`beta` empty
/// included).
pub fn compute_follow_sets(grammar: &Cfg, first: &FirstSets) -> FollowSets {
    let mut follow: FollowSets = HashMap::new();
    for v in grammar.variables() {
        follow.insert(v.clone(), HashSet::new());
    }
    if let Some(start) = grammar.start() {
        follow
            .entry(start.clone())
            .or_default()
            .insert(Terminal::new(END_MARKER));
    }

    let mut changed = true;
    while changed {
        changed = false;
        for p in grammar.productions() {
            let body = p.body();
            for (i, sym) in body.iter().enumerate() {
                let var = match sym {
                    GrammarSymbol::Variable(v) => v,
                    _ => continue,
                };
                let beta = &body[i + 1..];
                let beta_first = first_of_string(first, beta);

                let mut additions: Vec<Terminal> = beta_first
                    .iter()
                    .filter_map(|s| match s {
                        GrammarSymbol::Terminal(t) => Some(t.clone()),
                        _ => None,
                    })
                    .collect();

                if beta_first.contains(&GrammarSymbol::Epsilon) {
                    let head_follow: Vec<Terminal> =
                        follow.get(p.head()).cloned().unwrap_or_default().into_iter().collect();
                    additions.extend(head_follow);
                }

                let entry = follow.entry(var.clone()).or_default();
                let before = entry.len();
                entry.extend(additions);
                changed |= entry.len() != before;
            }
        }
    }

    follow
}
