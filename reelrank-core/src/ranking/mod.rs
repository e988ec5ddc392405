//! Ranking engine for rating summaries
//!
//! This module provides:
//! - Sort key types and field markers for the values records are ranked by
//! - Composable sort strategies with deterministic tie-breaking
//! - The [`RankingEngine`] that assembles a [`Summary`](reelrank_model::Summary)

pub mod engine;
pub mod fields;
pub mod keys;
pub mod strategy;
pub mod traits;


pub use engine::{RankingEngine, summarize};
pub use fields::*;
pub use keys::*;
pub use strategy::*;
pub use traits::*;
