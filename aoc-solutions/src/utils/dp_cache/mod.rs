//! Memoisation for dynamic programming over a DAG of sub-problems
//!
//! A [`DpProblem`] states which sub-problems an index depends on and how to
//! combine their values; [`DpCache`] resolves them lazily and stores each
//! result in a [`Backend`].
//!
//! - [`VecBackend`] for dense `usize` indices
//! - [`HashMapBackend`] for tuples and other hashable states
//!
//! The caches do not detect cycles.

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
