//! Fixed-point analyses over a grammar's production set.

pub(crate) mod fixedpoint;
pub mod first_follow;
pub mod sets;
