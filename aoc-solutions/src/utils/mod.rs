//! Helpers shared across puzzle solutions

pub mod disjoint_set;
pub mod dp_cache;
pub mod grid;
pub mod parse;

pub use disjoint_set::DisjointSet;
pub use grid::{Dir, Grid, Pos};
