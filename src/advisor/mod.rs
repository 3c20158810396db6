//! Advisory engine — pure scoring and recommendation functions.
//!
//! Consumes normalized records plus the benchmark table and produces:
//! - a 0–100 fatigue score per creative,
//! - a 0–100 performance score with a quality tier,
//! - an ordered, never-empty list of prioritized recommendations,
//! - account-wide aggregates and tips.
//!
//! Everything here is deterministic given identical inputs: no I/O, no
//! hidden state, no clock reads.

pub mod benchmarks;
pub mod recommend;
pub mod scoring;
pub mod summary;

pub use benchmarks::{Benchmarks, Range};
pub use recommend::{Priority, Recommendation, account_tips, recommendations};
pub use scoring::{PerformanceRating, Tier, fatigue_score, performance_score};
pub use summary::{Summary, aggregate};
