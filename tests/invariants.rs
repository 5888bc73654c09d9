//! Checks for the universal invariants that hold across every grammar
//! transformation, exercised against a handful of representative grammars
//! rather than the literal end-to-end scenarios (see `end_to_end.rs`).

use cfg_core::*;

fn v(s: &str) -> Variable {
    Variable::new(s)
}
fn t(s: &str) -> GrammarSymbol {
    GrammarSymbol::Terminal(Terminal::new(s))
}
fn var(s: &str) -> GrammarSymbol {
    GrammarSymbol::Variable(Variable::new(s))
}
fn word(s: &str) -> Vec<Terminal> {
    s.chars().map(|c| Terminal::new(c.to_string())).collect()
}

fn sample_grammars() -> Vec<Cfg> {
    vec![
        // S -> a S b | a b
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![t("a"), var("S"), t("b")]))
            .production(Production::new(v("S"), vec![t("a"), t("b")]))
            .build(),
        // S -> a | b
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![t("a")]))
            .production(Production::new(v("S"), vec![t("b")]))
            .build(),
        // S -> S S | a
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![var("S"), var("S")]))
            .production(Production::new(v("S"), vec![t("a")]))
            .build(),
        // S -> A B; A -> a; B -> b | epsilon
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![var("A"), var("B")]))
            .production(Production::new(v("A"), vec![t("a")]))
            .production(Production::new(v("B"), vec![t("b")]))
            .production(Production::new(v("B"), vec![]))
            .build(),
        // S -> A; A -> B; B -> C; C -> c (unit chain)
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![var("A")]))
            .production(Production::new(v("A"), vec![var("B")]))
            .production(Production::new(v("B"), vec![var("C")]))
            .production(Production::new(v("C"), vec![t("c")]))
            .build(),
        // grammar with an unreachable and a non-generating variable
        Cfg::builder()
            .start(v("S"))
            .production(Production::new(v("S"), vec![t("a")]))
            .production(Production::new(v("Unreachable"), vec![t("z")]))
            .production(Production::new(v("NonGenerating"), vec![var("NonGenerating")]))
            .build(),
    ]
}

fn sample_words() -> Vec<Vec<Terminal>> {
    vec![
        vec![],
        word("a"),
        word("b"),
        word("ab"),
        word("aabb"),
        word("aaabbb"),
        word("aaa"),
        word("abab"),
    ]
}

/// Invariant 1: remove_useless_symbols preserves the language and leaves no
/// non-generating or unreachable symbol.
#[test]
fn remove_useless_symbols_preserves_language_and_leaves_grammar_clean() {
    for g in sample_grammars() {
        let reduced = cnf::remove_useless_symbols(&g);
        for w in sample_words() {
            assert_eq!(contains(&g, &w), contains(&reduced, &w), "language changed for {w:?}");
        }

        let generating = generating_symbols(&reduced);
        let reachable = reachable_symbols(&reduced);
        for p in reduced.productions() {
            let head_sym = GrammarSymbol::Variable(p.head().clone());
            assert!(generating.contains(&head_sym), "non-generating head survived: {:?}", p.head());
            assert!(reachable.contains(&head_sym), "unreachable head survived: {:?}", p.head());
        }
    }
}

/// Invariant 2: remove_epsilon preserves the language except possibly the
/// empty word, and only admits the empty word back in if S itself keeps a
/// top-level empty production.
#[test]
fn remove_epsilon_preserves_language_modulo_empty_word() {
    for g in sample_grammars() {
        let reduced = cnf::remove_epsilon(&g);
        for w in sample_words().into_iter().filter(|w| !w.is_empty()) {
            assert_eq!(contains(&g, &w), contains(&reduced, &w), "non-empty-word language changed for {w:?}");
        }

        let top_level_epsilon = reduced
            .start()
            .map(|s| reduced.productions_for(s).iter().any(|p| p.body().is_empty()))
            .unwrap_or(false);
        assert_eq!(contains(&reduced, &[]), top_level_epsilon);
    }
}

/// Invariant 3: to_cnf is idempotent.
#[test]
fn to_cnf_is_idempotent() {
    for g in sample_grammars() {
        let once = g.to_cnf_with(&CfgConfig::default());
        let twice = once.to_cnf_with(&CfgConfig::default());
        assert_eq!(once.productions().len(), twice.productions().len());
        assert_eq!(once.start(), twice.start());
    }
}

/// Invariant 4: contains agrees before and after CNF conversion.
#[test]
fn contains_agrees_across_cnf_conversion() {
    for g in sample_grammars() {
        let cnf = g.to_cnf_with(&CfgConfig::default());
        for w in sample_words() {
            assert_eq!(contains(&g, &w), contains(&cnf, &w), "contains disagreed for {w:?}");
        }
    }
}

/// Invariant 5: leftmost/rightmost derivations' terminal frontier reproduces
/// the word that was parsed.
#[test]
fn derivations_round_trip_to_the_original_word() {
    let g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a"), var("S"), t("b")]))
        .production(Production::new(v("S"), vec![t("a"), t("b")]))
        .build();

    for w in [word("ab"), word("aabb"), word("aaabbb")] {
        let left = leftmost_derivation(&g, &w).unwrap();
        let right = rightmost_derivation(&g, &w).unwrap();
        assert_eq!(cyk::frontier_to_word(left.last().unwrap()), w);
        assert_eq!(cyk::frontier_to_word(right.last().unwrap()), w);
    }

    let err = leftmost_derivation(&g, &word("abab")).unwrap_err();
    assert_eq!(err, CfgError::NoDerivation);
}

/// Invariant 6: algebra laws for union, concatenation, closure, reversal.
#[test]
fn algebra_operations_satisfy_their_defining_laws() {
    let g1 = Cfg::builder().start(v("S")).production(Production::new(v("S"), vec![t("a")])).build();
    let g2 = Cfg::builder().start(v("S")).production(Production::new(v("S"), vec![t("b")])).build();

    let u = union(&g1, &g2);
    for w in [word("a"), word("b")] {
        assert!(contains(&u, &w));
    }
    assert!(!contains(&u, &word("ab")));

    let c = concatenate(&g1, &g2);
    assert!(contains(&c, &word("ab")));
    assert!(!contains(&c, &word("ba")));
    assert!(!contains(&c, &word("a")));

    let star = kleene_closure(&g1);
    assert!(contains(&star, &[]));
    assert!(contains(&star, &word("a")));
    assert!(contains(&star, &word("aaa")));
    assert!(!contains(&star, &word("b")));

    let plus = positive_closure(&g1);
    assert!(!contains(&plus, &[]));
    assert!(contains(&plus, &word("a")));
    assert!(contains(&plus, &word("aaa")));

    let ab = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a"), t("b"), t("b")]))
        .build();
    let reversed = reverse(&ab);
    assert!(contains(&reversed, &word("bba")));
    assert!(!contains(&reversed, &word("abb")));
}

/// Invariant 7: CFG × DFA intersection's language is the set intersection.
#[test]
fn intersection_language_is_set_intersection() {
    let g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a"), var("S"), t("b")]))
        .production(Production::new(v("S"), vec![]))
        .build();
    let dfa = Dfa::builder()
        .start(0)
        .accepting(0)
        .accepting(1)
        .transition(0, Terminal::new("a"), 0)
        .transition(0, Terminal::new("b"), 1)
        .transition(1, Terminal::new("b"), 1)
        .build();

    let product = intersect(&g, &dfa);
    for w in sample_words() {
        let expected = contains(&g, &w) && dfa.accepts(&w);
        assert_eq!(contains(&product, &w), expected, "mismatch for {w:?}");
    }
}

/// Invariant 8: is_finite agrees with whether the language is finite, probed
/// via bounded enumeration exhausting well past any length seen in a finite
/// sample grammar.
#[test]
fn is_finite_matches_bounded_enumeration_behavior() {
    let finite_g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a")]))
        .production(Production::new(v("S"), vec![t("b")]))
        .build();
    assert!(is_finite(&finite_g));

    let infinite_g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a"), var("S"), t("b")]))
        .production(Production::new(v("S"), vec![t("a"), t("b")]))
        .build();
    assert!(!is_finite(&infinite_g));

    let finite_words = get_words(&finite_g, 10, &CfgConfig::default());
    assert_eq!(finite_words.len(), 2);
}

/// Invariant 9: get_words enumerates without duplicates, with every result
/// respecting the length bound, in non-decreasing length order.
#[test]
fn get_words_is_duplicate_free_bounded_and_length_ordered() {
    let g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![t("a"), var("S"), t("b")]))
        .production(Production::new(v("S"), vec![t("a"), t("b")]))
        .build();

    let words = get_words(&g, 8, &CfgConfig::default());
    let mut seen = std::collections::HashSet::new();
    let mut last_len = 0usize;
    for w in &words {
        assert!(w.len() <= 8, "word exceeded bound: {w:?}");
        assert!(w.len() >= last_len, "length order violated: {w:?}");
        last_len = w.len();
        assert!(seen.insert(w.clone()), "duplicate word yielded: {w:?}");
    }
    assert!(words.contains(&word("ab")));
    assert!(words.contains(&word("aabb")));
}

/// Invariant 10: FIRST/FOLLOW satisfy the textbook closure axioms — every
/// terminal is in its own FIRST set, FIRST(X) is nullable-tagged iff X is
/// nullable, and FOLLOW(start) contains the end marker.
#[test]
fn first_follow_satisfy_closure_axioms() {
    let g = Cfg::builder()
        .start(v("S"))
        .production(Production::new(v("S"), vec![var("A"), var("B")]))
        .production(Production::new(v("A"), vec![t("a")]))
        .production(Production::new(v("A"), vec![]))
        .production(Production::new(v("B"), vec![t("b")]))
        .build();

    let first = compute_first_sets(&g);
    for terminal in g.terminals() {
        let sym = GrammarSymbol::Terminal(terminal.clone());
        assert!(first[&sym].contains(&sym));
    }

    let nullable = nullable_symbols(&g);
    assert!(nullable.contains(&v("A")));
    assert!(first[&var("A")].contains(&GrammarSymbol::Epsilon));
    assert!(!nullable.contains(&v("B")));
    assert!(!first[&var("B")].contains(&GrammarSymbol::Epsilon));

    let follow = compute_follow_sets(&g, &first);
    assert!(follow[&v("S")].contains(&Terminal::new(analysis::first_follow::END_MARKER)));
    assert!(follow[&v("A")].contains(&Terminal::new("b")));
}
