//! Error types for the grammar core.
//!
//! Fixed-point analyses, normalization, membership tests, enumeration and
//! grammar algebra are total on well-formed grammars and never fail. Only
//! three kinds of failure exist: malformed textual input, a derivation
//! request against a word that is not in the language, and an
//! intersection operand that is neither a regular expression nor a finite
//! automaton.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CfgError {
    /// A textual grammar line did not contain `->`.
    #[error("malformed grammar line (missing '->'): {0:?}")]
    MissingArrow(String),

    /// A textual grammar line had an empty head.
    #[error("malformed grammar line (empty head): {0:?}")]
    EmptyHead(String),

    /// A box set's labels did not match the declared label set.
    #[error("box set labels do not match the declared label set")]
    MismatchedBoxLabels,

    /// `leftmost_derivation`/`rightmost_derivation` was requested for a word
    /// that CYK determined is not in the language.
    #[error("no derivation: word is not in the language")]
    NoDerivation,

    /// Intersection was asked to combine a CFG with something that is
    /// neither a regular expression nor a finite automaton.
    #[error("not implemented: intersection operand must be a regex or a finite automaton")]
    UnsupportedOperand,
}

/// Convenience alias for `Result<T, CfgError>`.
pub type Result<T> = std::result::Result<T, CfgError>;
