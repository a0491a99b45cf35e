//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Memoises a [`DpProblem`], resolving dependencies on demand.
///
/// Every index is computed at most once. The dependency graph must be
/// acyclic; a cycle recurses until the stack overflows.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, HashMapBackend};
///
/// // Lattice paths to (r, c) moving only down or right
/// let paths = ClosureProblem::new(
///     |&(r, c): &(usize, usize)| {
///         let mut deps = Vec::new();
///         if r > 0 { deps.push((r - 1, c)); }
///         if c > 0 { deps.push((r, c - 1)); }
///         deps
///     },
///     |_: &(usize, usize), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
/// );
///
/// let cache = DpCache::new(HashMapBackend::new(), paths);
/// assert_eq!(cache.get(&(4, 4)), 70);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// The value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow may be held while dependencies recurse
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();
        let value = self.problem.compute(index, dep_values);

        self.backend.borrow_mut().insert(index.clone(), value.clone());
        value
    }

    /// Number of memoised values.
    pub fn len(&self) -> usize {
        self.backend.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.borrow().is_empty()
    }

    /// The wrapped problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }
}
