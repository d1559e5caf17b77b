//! Inverse-frequency selection.
//!
//! The selector module provides:
//! - An ordered key → frequency mapping
//! - Derivation of the inverse-frequency selection distribution
//! - Weighted sampling with an injectable random source

pub mod engine;
pub mod types;

pub use types::{FrequencyMap, Selection, SelectionDistribution};

pub use engine::{select, select_with_rng, selection_distribution};
