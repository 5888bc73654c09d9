//! Grammar algebra: union, concatenation, Kleene closure, positive
//! closure, and reversal, all expressed through one primitive,
//! [`substitute`].

use std::collections::HashMap;

use crate::grammar::Cfg;
use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// Renames every variable in `grammar` by appending `#tag`, to keep two
/// grammars' variable namespaces disjoint before combining them.
fn retag_variables(grammar: &Cfg, tag: &str) -> Cfg {
    let rename = |v: &Variable| Variable::new(format!("{}#{}", v.value(), tag));

    let mut builder = Cfg::builder();
    if let Some(s) = grammar.start() {
        builder = builder.start(rename(s));
    }
    for p in grammar.productions() {
        let new_body: Vec<GrammarSymbol> = p
            .body()
            .iter()
            .map(|sym| match sym {
                GrammarSymbol::Variable(v) => GrammarSymbol::Variable(rename(v)),
                other => other.clone(),
            })
            .collect();
        builder = builder.production(Production::new_unfiltered(rename(p.head()), new_body));
    }
    builder.build()
}

/// Replaces every occurrence of a distinguished terminal `t_i` in `host`'s
/// bodies with the (renamed) start symbol of `mapping[t_i]`, after
/// suffixing every variable of `host` and of every `mapping` grammar with
/// a unique tag so the combination introduces no name collisions.
pub fn substitute(host: &Cfg, mapping: &[(Terminal, &Cfg)]) -> Cfg {
    let retagged_host = retag_variables(host, "host");

    let mut replacements: HashMap<Terminal, GrammarSymbol> = HashMap::new();
    let mut operand_productions: Vec<Production> = Vec::new();

    for (t, g) in mapping {
        let retagged = retag_variables(g, t.value());
        if let Some(s) = retagged.start() {
            replacements.insert(t.clone(), GrammarSymbol::Variable(s.clone()));
        }
        operand_productions.extend(retagged.productions().iter().cloned());
    }

    let mut builder = Cfg::builder();
    if let Some(s) = retagged_host.start() {
        builder = builder.start(s.clone());
    }
    for p in retagged_host.productions() {
        let new_body: Vec<GrammarSymbol> = p
            .body()
            .iter()
            .map(|sym| match sym {
                GrammarSymbol::Terminal(t) => replacements.get(t).cloned().unwrap_or_else(|| sym.clone()),
                other => other.clone(),
            })
            .collect();
        builder = builder.production(Production::new_unfiltered(p.head().clone(), new_body));
    }
    builder = builder.productions(operand_productions);
    builder.build()
}

fn scaffold_terminal(index: usize) -> Terminal {
    Terminal::new(format!("t{}", index))
}

/// `L(union(g1, g2)) = L(g1) ∪ L(g2)`. Scaffold `S -> t0 | t1`.
pub fn union(g1: &Cfg, g2: &Cfg) -> Cfg {
    let t0 = scaffold_terminal(0);
    let t1 = scaffold_terminal(1);
    let scaffold = Cfg::builder()
        .start(Variable::new("S"))
        .production(Production::new_unfiltered(
            Variable::new("S"),
            vec![GrammarSymbol::Terminal(t0.clone())],
        ))
        .production(Production::new_unfiltered(
            Variable::new("S"),
            vec![GrammarSymbol::Terminal(t1.clone())],
        ))
        .build();
    substitute(&scaffold, &[(t0, g1), (t1, g2)])
}

/// `L(concatenate(g1, g2)) = { uv : u ∈ L(g1), v ∈ L(g2) }`. Scaffold
/// `S -> t0 t1`.
pub fn concatenate(g1: &Cfg, g2: &Cfg) -> Cfg {
    let t0 = scaffold_terminal(0);
    let t1 = scaffold_terminal(1);
    let scaffold = Cfg::builder()
        .start(Variable::new("S"))
        .production(Production::new_unfiltered(
            Variable::new("S"),
            vec![GrammarSymbol::Terminal(t0.clone()), GrammarSymbol::Terminal(t1.clone())],
        ))
        .build();
    substitute(&scaffold, &[(t0, g1), (t1, g2)])
}

/// `L(kleene_closure(g)) = L(g)*`. Scaffold `S -> t1 | S S | epsilon`.
pub fn kleene_closure(g: &Cfg) -> Cfg {
    let t1 = scaffold_terminal(1);
    let s = Variable::new("S");
    let scaffold = Cfg::builder()
        .start(s.clone())
        .production(Production::new_unfiltered(s.clone(), vec![GrammarSymbol::Terminal(t1.clone())]))
        .production(Production::new_unfiltered(
            s.clone(),
            vec![GrammarSymbol::Variable(s.clone()), GrammarSymbol::Variable(s.clone())],
        ))
        .production(Production::new_unfiltered(s, vec![]))
        .build();
    substitute(&scaffold, &[(t1, g)])
}

/// `L(positive_closure(g)) = L(g)+`. Scaffold `S -> t1 A; A -> A A | t1 |
/// epsilon`.
pub fn positive_closure(g: &Cfg) -> Cfg {
    let t1 = scaffold_terminal(1);
    let s = Variable::new("S");
    let a = Variable::new("A");
    let scaffold = Cfg::builder()
        .start(s.clone())
        .production(Production::new_unfiltered(
            s,
            vec![GrammarSymbol::Terminal(t1.clone()), GrammarSymbol::Variable(a.clone())],
        ))
        .production(Production::new_unfiltered(
            a.clone(),
            vec![GrammarSymbol::Variable(a.clone()), GrammarSymbol::Variable(a.clone())],
        ))
        .production(Production::new_unfiltered(a.clone(), vec![GrammarSymbol::Terminal(t1.clone())]))
        .production(Production::new_unfiltered(a, vec![]))
        .build();
    substitute(&scaffold, &[(t1, g)])
}

/// `L(reverse(g)) = { reverse(w) : w ∈ L(g) }`. Reverses the body of every
/// production in place; variables, terminals, and the start symbol are
/// unchanged.
pub fn reverse(g: &Cfg) -> Cfg {
    let mut builder = Cfg::builder();
    if let Some(s) = g.start() {
        builder = builder.start(s.clone());
    }
    for p in g.productions() {
        let mut body = p.body().to_vec();
        body.reverse();
        builder = builder.production(Production::new_unfiltered(p.head().clone(), body));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyk::contains;

    fn v(s: &str) -> Variable {
        Variable::new(s)
    }
    fn st(s: &str) -> GrammarSymbol {
        GrammarSymbol::Terminal(Terminal::new(s))
    }
    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(|c| Terminal::new(c.to_string())).collect()
    }

    fn g_a() -> Cfg {
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a")]))
            .build()
    }
    fn g_b() -> Cfg {
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("b")]))
            .build()
    }

    #[test]
    fn union_accepts_either_operand_language() {
        let u = union(&g_a(), &g_b());
        assert!(contains(&u, &word("a")));
        assert!(contains(&u, &word("b")));
        assert!(!contains(&u, &word("ab")));
    }

    #[test]
    fn concatenation_accepts_only_the_joined_word() {
        let c = concatenate(&g_a(), &g_b());
        assert!(contains(&c, &word("ab")));
        assert!(!contains(&c, &word("a")));
        assert!(!contains(&c, &word("ba")));
    }

    #[test]
    fn kleene_closure_accepts_empty_and_repetitions() {
        let k = kleene_closure(&g_a());
        assert!(contains(&k, &[]));
        assert!(contains(&k, &word("a")));
        assert!(contains(&k, &word("aaa")));
        assert!(!contains(&k, &word("b")));
    }

    #[test]
    fn positive_closure_rejects_empty_but_accepts_repetitions() {
        let p = positive_closure(&g_a());
        assert!(!contains(&p, &[]));
        assert!(contains(&p, &word("a")));
        assert!(contains(&p, &word("aaaa")));
    }

    #[test]
    fn reversal_of_palindromic_grammar_preserves_language() {
        // S -> a S a | a
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), GrammarSymbol::Variable(v("S")), st("a")]))
            .production(Production::new(v("S"), vec![st("a")]))
            .build();
        let r = reverse(&g);
        assert!(contains(&r, &word("aaa")));
        assert!(contains(&r, &word("a")));
    }

    #[test]
    fn reversal_of_asymmetric_language_reverses_words() {
        // S -> a b
        let g = Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![st("a"), st("b")]))
            .build();
        let r = reverse(&g);
        assert!(contains(&r, &word("ba")));
        assert!(!contains(&r, &word("ab")));
    }
}
