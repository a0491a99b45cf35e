//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

struct Collatz;

impl DpProblem<u64, u64> for Collatz {
    fn deps(&self, n: &u64) -> Vec<u64> {
        match *n {
            0 | 1 => vec![],
            n if n % 2 == 0 => vec![n / 2],
            n => vec![3 * n + 1],
        }
    }

    fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
        deps.first().map_or(0, |d| d + 1)
    }
}

#[test]
fn fibonacci_over_vec_backend() {
    let cache = DpCache::new(VecBackend::new(), Fibonacci);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&20), 6765);
    assert_eq!(cache.len(), 21);
}

#[test]
fn collatz_over_hashmap_backend() {
    let cache = DpCache::new(HashMapBackend::new(), Collatz);
    assert_eq!(cache.get(&1), 0);
    assert_eq!(cache.get(&6), 8);
    assert_eq!(cache.get(&27), 111);
}

#[test]
fn shared_dependency_is_computed_once() {
    struct Diamond {
        computed: Rc<Cell<u32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.computed.set(self.computed.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 1,
            }
        }
    }

    let computed = Rc::new(Cell::new(0));
    let cache = DpCache::new(
        VecBackend::new(),
        Diamond {
            computed: Rc::clone(&computed),
        },
    );

    assert_eq!(cache.get(&0), 5);
    assert_eq!(computed.get(), 4);
    assert_eq!(cache.get(&0), 5);
    assert_eq!(computed.get(), 4);
}

#[test]
fn closure_problem_matches_trait_problem() {
    let closures = ClosureProblem::new(
        |n: &usize| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
        |n: &usize, deps: Vec<u64>| if *n <= 1 { *n as u64 } else { deps[0] + deps[1] },
    );
    let by_closure = DpCache::new(HashMapBackend::new(), closures);
    let by_trait = DpCache::new(VecBackend::new(), Fibonacci);

    for n in 0..40 {
        assert_eq!(by_closure.get(&n), by_trait.get(&n));
    }
}

#[test]
fn vec_backend_counts_distinct_slots() {
    let mut backend = VecBackend::with_capacity(4);
    assert!(backend.is_empty());
    backend.insert(3, 'a');
    backend.insert(3, 'b');
    backend.insert(0, 'c');
    assert_eq!(backend.len(), 2);
    assert_eq!(backend.get(&3), Some(&'b'));
    assert_eq!(backend.get(&1), None);
    assert_eq!(backend.get(&10), None);
}

fn collatz_steps(mut n: u64) -> u64 {
    let mut steps = 0;
    while n > 1 {
        n = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
        steps += 1;
    }
    steps
}

proptest! {
    #[test]
    fn cached_collatz_matches_direct_iteration(values in prop::collection::vec(1u64..10_000, 1..30)) {
        let cache = DpCache::new(HashMapBackend::new(), Collatz);
        for n in values {
            prop_assert_eq!(cache.get(&n), collatz_steps(n));
        }
    }
}
