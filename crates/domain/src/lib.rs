// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod error;
mod matching;
mod similarity;
mod types;

#[cfg(test)]
mod tests;

pub use catalog::{ParsedFile, total_row_count};
pub use error::DomainError;
pub use matching::{
    EmployeeProfile, MatchOutcome, RoleCandidate, score_candidate, select_best_candidate,
};
pub use similarity::{
    CONFIDENCE_DRIFT_TOLERANCE, MAX_SIMILARITY, exceeds_drift_tolerance, similarity_confidence,
    title_similarity,
};
pub use types::{
    AssignmentStatus, ConfidenceSource, MappingStatus, REVIEW_THRESHOLD, SessionStatus,
    clamp_confidence, requires_manual_review,
};
