//! Bounded word enumeration: `get_words(max_length)` grows per-variable,
//! per-length string lists over the Chomsky Normal Form of a grammar.

use std::collections::HashMap;

use crate::cnf::CfgConfig;
use crate::grammar::Cfg;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// Sentinel for "unbounded" passed to [`get_words`].
pub const UNBOUNDED: i64 = -1;

/// Enumerates every terminal string derivable from the start symbol whose
/// length is at most `max_length` (or unboundedly, if `max_length ==
/// UNBOUNDED`). The empty word is yielded first iff the grammar is
/// nullable. Words are returned in order of discovery, grouped by
/// non-decreasing length, without duplicates.
///
/// When `max_length` is unbounded, enumeration stops once more than
/// `ceil(len / 2) * config.enumeration_patience_factor` consecutive
/// lengths have produced no new word for the start symbol.
pub fn get_words(grammar: &Cfg, max_length: i64, config: &CfgConfig) -> Vec<Vec<Terminal>> {
    let cnf = grammar.to_cnf_with(config);
    let start = match cnf.start() {
        Some(s) => s.clone(),
        None => return Vec::new(),
    };

    let mut words: Vec<Vec<Terminal>> = Vec::new();
    if crate::analysis::sets::generate_epsilon(&cnf) {
        words.push(Vec::new());
        if max_length == 0 {
            return words;
        }
    }

    let mut terminal_rules: HashMap<Variable, Vec<Terminal>> = HashMap::new();
    let mut binary_rules: HashMap<Variable, Vec<(Variable, Variable)>> = HashMap::new();
    for p in cnf.productions() {
        match p.body() {
            [GrammarSymbol::Terminal(t)] => {
                terminal_rules.entry(p.head().clone()).or_default().push(t.clone());
            }
            [GrammarSymbol::Variable(b), GrammarSymbol::Variable(c)] => {
                binary_rules
                    .entry(p.head().clone())
                    .or_default()
                    .push((b.clone(), c.clone()));
            }
            _ => {}
        }
    }

    // by_length[var][len] = words of that length derivable from var, in
    // order of discovery; len 0 is never populated here (epsilon handled
    // above, only for the start symbol).
    let mut by_length: HashMap<Variable, Vec<Vec<Vec<Terminal>>>> = HashMap::new();
    for v in cnf.variables() {
        by_length.insert(v.clone(), vec![Vec::new()]); // index 0 unused placeholder
    }

    let unbounded = max_length == UNBOUNDED;
    let mut no_progress_run = 0usize;
    let mut len = 1usize;

    loop {
        if !unbounded && len as i64 > max_length {
            break;
        }

        for v in cnf.variables() {
            let lists = by_length.get_mut(v).unwrap();
            while lists.len() <= len {
                lists.push(Vec::new());
            }
        }

        for v in cnf.variables().to_vec().iter() {
            if len == 1 {
                if let Some(ts) = terminal_rules.get(v) {
                    let mut seen: std::collections::HashSet<Vec<Terminal>> = by_length[v][1]
                        .iter()
                        .cloned()
                        .collect();
                    for t in ts {
                        let w = vec![t.clone()];
                        if seen.insert(w.clone()) {
                            by_length.get_mut(v).unwrap()[1].push(w);
                        }
                    }
                }
            }

            if let Some(rules) = binary_rules.get(v) {
                let mut produced: Vec<Vec<Terminal>> = Vec::new();
                for (b, c) in rules {
                    for i in 1..len {
                        let j = len - i;
                        let left = by_length.get(b).map(|l| l.get(i).cloned().unwrap_or_default()).unwrap_or_default();
                        let right = by_length.get(c).map(|l| l.get(j).cloned().unwrap_or_default()).unwrap_or_default();
                        for lw in &left {
                            for rw in &right {
                                let mut w = lw.clone();
                                w.extend(rw.iter().cloned());
                                produced.push(w);
                            }
                        }
                    }
                }
                if !produced.is_empty() {
                    let existing = &mut by_length.get_mut(v).unwrap()[len];
                    let mut seen: std::collections::HashSet<Vec<Terminal>> =
                        existing.iter().cloned().collect();
                    for w in produced {
                        if seen.insert(w.clone()) {
                            existing.push(w);
                        }
                    }
                }
            }
        }

        let start_words_this_len = by_length[&start][len].clone();
        if start_words_this_len.is_empty() {
            no_progress_run += 1;
        } else {
            no_progress_run = 0;
            words.extend(start_words_this_len);
        }

        if unbounded {
            let bound = ((len + 1) / 2).max(1) * config.enumeration_patience_factor;
            if no_progress_run > bound {
                break;
            }
        }

        len += 1;
        if !unbounded && len as i64 > max_length {
            break;
        }
        // Safety valve: if every variable's lists have stopped growing for
        // a long stretch even under the unbounded heuristic, `no_progress_run`
        // will already have tripped the break above.
    }

    words
}
