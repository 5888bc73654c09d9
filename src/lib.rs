//! Context-free grammar core: symbol model, fixed-point analyses,
//! Chomsky Normal Form conversion, CYK recognition with derivation
//! reconstruction, bounded word enumeration, finiteness detection,
//! grammar algebra, CFG × DFA intersection, CFG → PDA encoding, and
//! recursive-state-automaton construction.
//!
//! The core is purely sequential, single-threaded, and effect-free: no
//! operation suspends, blocks, or performs I/O, and grammars are
//! value-typed and immutable once built.

pub mod algebra;
pub mod analysis;
pub mod automaton;
pub mod cnf;
pub mod cyk;
pub mod enumerate;
pub mod error;
pub mod finiteness;
pub mod grammar;
pub mod intersection;
pub mod pda;
pub mod production;
pub mod regex;
pub mod rsa;
pub mod symbol;
pub mod text;

pub use analysis::first_follow::{compute_first_sets, compute_follow_sets, FirstSets, FollowSets};
pub use analysis::sets::{generate_epsilon, generating_symbols, is_empty_language, nullable_symbols, reachable_symbols, unit_pairs};
pub use automaton::{Dfa, FiniteAutomaton};
pub use cnf::{to_cnf, CfgConfig};
pub use cyk::{contains, leftmost_derivation, rightmost_derivation};
pub use enumerate::get_words;
pub use error::{CfgError, Result};
pub use finiteness::is_finite;
pub use grammar::{Cfg, CfgBuilder};
pub use intersection::{intersect, intersect_dynamic, intersect_regex, AnyRegex};
pub use pda::{encode_pda, Pda};
pub use production::Production;
pub use regex::Regex;
pub use rsa::{build_rsa, build_rsa_from_regex, RecursiveStateAutomaton, SymbolDfa};
pub use symbol::{GrammarSymbol, Terminal, Variable};
pub use text::{from_text, to_text};
pub use algebra::{concatenate, kleene_closure, positive_closure, reverse, substitute, union};
