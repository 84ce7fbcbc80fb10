//! cafetal-core: carbon-footprint calculator for coffee farms.
//!
//! Turns one farm survey into an aggregate CO₂e figure and a per-category
//! breakdown through a fixed sequence of unit conversions and weighted sums.
//! The computation is pure and synchronous; persistence, session handling and
//! report rendering are collaborators layered on top in sibling crates.
//!
//! # Public API
//!
//! - [`compute()`] -- run the calculation with the canonical factor table
//! - [`compute_with()`] -- run it with a caller-supplied [`EmissionFactors`]
//! - [`FarmSurvey`] -- the input record (parse-or-zero deserialization)
//! - [`Assessment`] -- the immutable result + breakdown pair
//! - [`RoundedAssessment`] -- display-precision view of an assessment

pub mod compute;
pub mod error;
pub mod factors;
pub mod round;
pub mod survey;

pub use compute::{
    compute, compute_with, Assessment, BreakdownEntry, Category, EmissionBreakdown, EmissionResult,
};
pub use error::ValidationError;
pub use factors::EmissionFactors;
pub use round::{round_dp, RoundedAssessment};
pub use survey::{FarmSurvey, FertilizerKind, FuelKind, ProcessMethod};

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
