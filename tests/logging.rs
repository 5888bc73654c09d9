//! Exercises the `trace` feature's logging output at the three
//! instrumented seams (fixed-point worklist passes, the CNF pipeline's
//! repeat-until-canonical loop, and intersection's combined-variable
//! creation). Run with `cargo test --features trace -- --nocapture` to
//! see the emitted lines.

#![cfg(feature = "trace")]

use cfg_core::*;

#[test]
fn trace_feature_logs_fixed_point_and_cnf_pipeline() {
    let _ = env_logger::try_init();

    let g = Cfg::builder()
        .start(Variable::new("S"))
        .production(Production::new(
            Variable::new("S"),
            vec![GrammarSymbol::Terminal(Terminal::new("a")), GrammarSymbol::Variable(Variable::new("S"))],
        ))
        .production(Production::new(Variable::new("S"), vec![]))
        .build();

    let _ = nullable_symbols(&g);
    let _ = g.to_cnf();
}

#[test]
fn trace_feature_logs_intersection_combined_variable_creation() {
    let _ = env_logger::try_init();

    let g = Cfg::builder()
        .start(Variable::new("S"))
        .production(Production::new(Variable::new("S"), vec![GrammarSymbol::Terminal(Terminal::new("a"))]))
        .build();
    let dfa = Dfa::builder().start(0).accepting(0).transition(0, Terminal::new("a"), 0).build();

    let _ = intersect(&g, &dfa);
}
