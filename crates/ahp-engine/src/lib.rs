//! AHP Engine
//!
//! Derives criterion weights from pairwise slider comparisons and ranks
//! candidate stocks by their weighted, set-normalized fundamentals.

pub mod ranker;
pub mod weights;

pub use ranker::{normalize_candidates, rank_candidates};
pub use weights::{derive_weights, saaty_intensity, ComparisonMatrix};
