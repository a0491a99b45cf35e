//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions live under `my_solutions::year_YYYY::day_D`. Each one derives
//! `AutoRegisterSolver`, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find it.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
