//! The normal-form pipeline: useless-symbol removal, epsilon
//! removal, unit-production elimination, and Chomsky Normal Form
//! decomposition (terminal isolation + binarization).

use std::collections::{HashMap, HashSet};

use crate::analysis::sets::{nullable_symbols, reachable_symbols, unit_pairs};
use crate::grammar::Cfg;
use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// Configuration for the normal-form pipeline and the word enumerator.
///
/// There is no outer process configuration in this crate; this struct is the library-level
/// equivalent, threaded explicitly by the caller.
#[derive(Clone, Debug)]
pub struct CfgConfig {
    /// Prefix used to name the fresh variables introduced by CNF
    /// decomposition (terminal isolation and binarization). The actual
    /// name is this prefix followed by an index that skips any name
    /// already in use.
    pub fresh_variable_prefix: String,
    /// Multiplier applied to the word enumerator's `ceil(len/2)`
    /// consecutive-no-progress bound. `1` is the literal heuristic; a
    /// caller willing to trade time for completeness can raise it.
    pub enumeration_patience_factor: usize,
}

impl Default for CfgConfig {
    fn default() -> Self {
        CfgConfig {
            fresh_variable_prefix: "V#".to_string(),
            enumeration_patience_factor: 1,
        }
    }
}

/// Removes useless symbols: a production survives iff its head is both
/// generating and reachable, and every variable in its body is generating
/// (terminals are trivially generating). Preserves the grammar's language.
pub fn remove_useless_symbols(grammar: &Cfg) -> Cfg {
    let generating = grammar.generating_set().clone();
    let reachable = reachable_symbols(grammar);
    let start = grammar.start().cloned();

    let mut builder = Cfg::builder();
    if let Some(s) = &start {
        builder = builder.start(s.clone());
    }

    for p in grammar.productions() {
        let head_sym = GrammarSymbol::Variable(p.head().clone());
        if !generating.contains(&head_sym) || !reachable.contains(&head_sym) {
            continue;
        }
        let body_ok = p.body().iter().all(|s| match s {
            GrammarSymbol::Variable(_) => generating.contains(s) && reachable.contains(s),
            _ => true,
        });
        if body_ok {
            builder = builder.production(p.clone());
        }
    }

    builder.build()
}

fn is_unit_production(p: &Production) -> bool {
    p.body().len() == 1 && matches!(p.body()[0], GrammarSymbol::Variable(_))
}

/// Removes epsilon productions: for each production, emits every
/// subset-substitution obtained by independently choosing, for each
/// nullable occurrence in the body, to keep or drop it — excluding the
/// all-dropped case when the head is not the start symbol, so the empty
/// body survives only at the top level.
pub fn remove_epsilon(grammar: &Cfg) -> Cfg {
    let nullable = nullable_symbols(grammar);
    let start = grammar.start().cloned();

    let mut builder = Cfg::builder();
    if let Some(s) = &start {
        builder = builder.start(s.clone());
    }

    let mut seen: HashSet<(Variable, Vec<GrammarSymbol>)> = HashSet::new();

    for p in grammar.productions() {
        let body = p.body();
        let nullable_positions: Vec<usize> = body
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, GrammarSymbol::Variable(v) if nullable.contains(v)))
            .map(|(i, _)| i)
            .collect();
        let n = nullable_positions.len();

        for mask in 0..(1usize << n) {
            let dropped: HashSet<usize> = nullable_positions
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) == 0)
                .map(|(_, &pos)| pos)
                .collect();

            let new_body: Vec<GrammarSymbol> = body
                .iter()
                .enumerate()
                .filter(|(i, _)| !dropped.contains(i))
                .map(|(_, s)| s.clone())
                .collect();

            let is_start_head = start.as_ref() == Some(p.head());
            if new_body.is_empty() && !is_start_head {
                continue;
            }

            let key = (p.head().clone(), new_body.clone());
            if seen.insert(key) {
                builder = builder.production(Production::new_unfiltered(p.head().clone(), new_body));
            }
        }
    }

    builder.build()
}

/// Eliminates unit productions: retains non-unit productions, and for
/// every unit pair `(A, B)` and non-unit production `B ->
/// gamma`, adds `A -> gamma`.
pub fn eliminate_unit_productions(grammar: &Cfg) -> Cfg {
    let pairs = unit_pairs(grammar);
    let start = grammar.start().cloned();

    let non_unit: Vec<&Production> = grammar
        .productions()
        .iter()
        .filter(|p| !is_unit_production(p))
        .collect();

    let mut builder = Cfg::builder();
    if let Some(s) = &start {
        builder = builder.start(s.clone());
    }

    let mut seen: HashSet<(Variable, Vec<GrammarSymbol>)> = HashSet::new();

    for (a, b) in &pairs {
        for p in non_unit.iter().filter(|p| p.head() == b) {
            let key = (a.clone(), p.body().to_vec());
            if seen.insert(key) {
                builder = builder.production(Production::new_unfiltered(a.clone(), p.body().to_vec()));
            }
        }
    }

    builder.build()
}

/// True iff `grammar` already has canonical CNF shape: no epsilon
/// production except possibly at the start, no unit production (including
/// a self-loop `X -> X`), and every symbol generating and reachable.
fn is_canonical_shape(grammar: &Cfg) -> bool {
    let start = grammar.start();
    for p in grammar.productions() {
        if p.is_empty() && Some(p.head()) != start {
            return false;
        }
        if is_unit_production(p) {
            return false;
        }
    }
    let reduced = remove_useless_symbols(grammar);
    reduced.productions().len() == grammar.productions().len()
}

fn fresh_variable(existing: &mut HashSet<String>, next_index: &mut usize, prefix: &str) -> Variable {
    loop {
        let name = format!("{}{}", prefix, next_index);
        *next_index += 1;
        if existing.insert(name.clone()) {
            return Variable::new(name);
        }
    }
}

/// Recursively turns `body[start..]` into a single symbol, left-associating
/// fresh intermediates and memoising by suffix so a shared suffix across
/// productions reuses the same intermediate variable.
fn suffix_to_symbol(
    body: &[GrammarSymbol],
    start: usize,
    memo: &mut HashMap<Vec<GrammarSymbol>, Variable>,
    out: &mut Vec<Production>,
    existing: &mut HashSet<String>,
    next_index: &mut usize,
    prefix: &str,
) -> GrammarSymbol {
    if start == body.len() - 1 {
        return body[start].clone();
    }
    let suffix = body[start..].to_vec();
    if let Some(v) = memo.get(&suffix) {
        return GrammarSymbol::Variable(v.clone());
    }
    let fresh = fresh_variable(existing, next_index, prefix);
    memo.insert(suffix.clone(), fresh.clone());
    let rest = suffix_to_symbol(body, start + 1, memo, out, existing, next_index, prefix);
    out.push(Production::new_unfiltered(
        fresh.clone(),
        vec![body[start].clone(), rest],
    ));
    GrammarSymbol::Variable(fresh)
}

/// Finalises a canonical-shape grammar into strict CNF: isolates terminals
/// inside bodies of length >= 2, then binarises bodies of length >= 3.
fn finalize_cnf(grammar: &Cfg, config: &CfgConfig) -> Cfg {
    let mut existing: HashSet<String> = grammar
        .variables()
        .iter()
        .map(|v| v.value().to_string())
        .collect();
    let mut next_index = 0usize;

    // Terminal isolation: one fresh variable per distinct terminal that
    // occurs inside a body of length >= 2, shared across productions.
    let mut terminal_vars: HashMap<Terminal, Variable> = HashMap::new();
    let mut isolated: Vec<Production> = Vec::with_capacity(grammar.productions().len());
    let mut isolating_productions: Vec<Production> = Vec::new();

    for p in grammar.productions() {
        if p.body().len() < 2 {
            isolated.push(p.clone());
            continue;
        }
        let new_body: Vec<GrammarSymbol> = p
            .body()
            .iter()
            .map(|s| match s {
                GrammarSymbol::Terminal(t) => {
                    let v = terminal_vars.entry(t.clone()).or_insert_with(|| {
                        let fresh = fresh_variable(&mut existing, &mut next_index, &config.fresh_variable_prefix);
                        isolating_productions.push(Production::new_unfiltered(
                            fresh.clone(),
                            vec![GrammarSymbol::Terminal(t.clone())],
                        ));
                        fresh
                    });
                    GrammarSymbol::Variable(v.clone())
                }
                other => other.clone(),
            })
            .collect();
        isolated.push(Production::new_unfiltered(p.head().clone(), new_body));
    }
    isolated.extend(isolating_productions);

    // Binarization: bodies of length >= 3 get left-associated.
    let mut memo: HashMap<Vec<GrammarSymbol>, Variable> = HashMap::new();
    let mut out: Vec<Production> = Vec::with_capacity(isolated.len());
    for p in isolated {
        if p.body().len() <= 2 {
            out.push(p);
            continue;
        }
        let body = p.body().to_vec();
        let second = suffix_to_symbol(
            &body,
            1,
            &mut memo,
            &mut out,
            &mut existing,
            &mut next_index,
            &config.fresh_variable_prefix,
        );
        out.push(Production::new_unfiltered(
            p.head().clone(),
            vec![body[0].clone(), second],
        ));
    }

    let mut builder = Cfg::builder();
    if let Some(s) = grammar.start() {
        builder = builder.start(s.clone());
    }
    builder.productions(out).build()
}

/// Converts `grammar` to Chomsky Normal Form. Repeats
/// useless-symbol removal, epsilon removal and unit elimination until the
/// grammar is already in canonical shape, then isolates terminals and
/// binarises. Empty grammars (no productions) are already canonical and
/// returned unchanged.
///
/// Idempotent: applying this twice yields a grammar with an identical
/// production set to applying it once.
pub fn to_cnf(grammar: &Cfg, config: &CfgConfig) -> Cfg {
    if grammar.productions().is_empty() {
        return grammar.clone();
    }

    let mut g = grammar.clone();
    #[cfg(feature = "trace")]
    let mut rounds = 0usize;
    while !is_canonical_shape(&g) {
        #[cfg(feature = "trace")]
        {
            rounds += 1;
            log::debug!("to_cnf: pipeline round {}", rounds);
        }
        g = remove_useless_symbols(&g);
        g = remove_epsilon(&g);
        g = remove_useless_symbols(&g);
        g = eliminate_unit_productions(&g);
        g = remove_useless_symbols(&g);
    }

    finalize_cnf(&g, config)
}
