//! delivery-planner core
//!
//! Builds a travel-time graph from an adjacency matrix and searches for the
//! delivery sequence that collects the largest total bonus.

pub mod traits;
pub mod error;
pub mod delivery;
pub mod graph;
pub mod matrix_io;
pub mod observer;
pub mod solver;
