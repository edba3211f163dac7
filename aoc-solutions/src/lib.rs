//! Advent of Code 2023 grid puzzle solutions
//!
//! [`utils`] holds the shared grid toolkit: a flat [`Grid`](utils::grid::Grid)
//! with 4-directional neighbours, a breadth-first traversal engine, a
//! least-cost search with run-length limits and an infinitely tiled view of a
//! grid. The solutions under `my_solutions` are built on it and register
//! themselves through the `AutoRegisterSolver` derive macro.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
