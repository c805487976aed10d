//! Evidence aggregation
//!
//! Turns per-detector evidence into a probability ranking.
//!
//! # Aggregation
//!
//! ```text
//! adjusted[c]  = max(floor, evidence[c] × bias(c, N))
//! P(c)         = softmax(adjusted / τ)
//! winner       = argmax P, exact ties to the earlier CipherType
//! ```
//!
//! # Length bias (N = letters)
//!
//! | band   | caesar | affine | transposition | vigenere | playfair | adfgx |
//! |--------|--------|--------|---------------|----------|----------|-------|
//! | N ≤ 20 | 2.0    | 1.6    | 1.5           | 0.3      | 0.5      | 0.6   |
//! | N ≤ 50 | 1.5    | 1.3    | 1.2           | 0.6      | 0.75     | 0.8   |
//!
//! Substitution is never biased. Periodic and digraph statistics are
//! unreliable on short samples, so the bias leans toward the keyed
//! monoalphabetic families there.

mod aggregator;
mod evidence;

pub use aggregator::{Aggregate, EvidenceAggregator};
pub use evidence::{EvidenceMap, ProbabilityMap};
