pub mod error;
pub mod grid;
pub mod shortest_path;
pub mod torus;
pub mod traversal;
