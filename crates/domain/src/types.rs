// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Confidence scores at or above this value exempt a mapping from manual review.
pub const REVIEW_THRESHOLD: i32 = 80;

/// Returns whether a mapping with the given confidence must be reviewed by a human.
///
/// A mapping requires manual review if and only if its confidence is below
/// [`REVIEW_THRESHOLD`].
#[must_use]
pub const fn requires_manual_review(confidence: i32) -> bool {
    confidence < REVIEW_THRESHOLD
}

/// Clamps an externally supplied confidence value into the 0-100 range.
///
/// The text-generation backend self-reports confidence as an arbitrary JSON
/// number; anything outside the range (or not a number at all) collapses to
/// the nearest bound.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clamp_confidence(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    // Rounded and clamped, so the cast cannot truncate.
    value.round().clamp(0.0, 100.0) as i32
}

/// Represents the lifecycle state of an upload session.
///
/// The session row is the canonical task-tracking entity for the
/// standardization workflow: callers poll it rather than holding a
/// connection open across the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Files are still being received. Sessions created through the upload
    /// endpoint skip this state because parsing happens before the insert.
    Uploading,
    /// Raw rows captured and persisted. Ready for standardization.
    #[default]
    Analyzing,
    /// A standardization run is in progress.
    Standardizing,
    /// Standard roles and mappings committed. Terminal.
    Completed,
    /// The most recent run failed; `error_message` carries the reason.
    Error,
}

impl FromStr for SessionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploading" => Ok(Self::Uploading),
            "analyzing" => Ok(Self::Analyzing),
            "standardizing" => Ok(Self::Standardizing),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            _ => Err(DomainError::InvalidSessionStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SessionStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Analyzing => "analyzing",
            Self::Standardizing => "standardizing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The lifecycle only moves forward:
    /// - `uploading` → `analyzing`
    /// - `analyzing` → `standardizing`
    /// - `standardizing` → `completed`
    ///
    /// Any non-terminal status may move to `error`, and `error` may move
    /// back to `standardizing` for a caller-initiated retry. `completed`
    /// is terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Uploading, Self::Analyzing)
                | (Self::Analyzing, Self::Standardizing)
                | (Self::Standardizing, Self::Completed)
                | (
                    Self::Uploading | Self::Analyzing | Self::Standardizing,
                    Self::Error
                )
                | (Self::Error, Self::Standardizing)
        )
    }

    /// Returns whether this status permits a standardization run to start.
    #[must_use]
    pub const fn allows_standardization(&self) -> bool {
        self.can_transition_to(Self::Standardizing)
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Represents the review state of a role mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// Confidence met the review threshold; no human action required.
    AutoMapped,
    /// Confidence fell below the review threshold; queued for a reviewer.
    ManualReview,
    /// A reviewer accepted the mapping.
    Approved,
    /// A reviewer rejected the mapping.
    Rejected,
}

impl FromStr for MappingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto_mapped" => Ok(Self::AutoMapped),
            "manual_review" => Ok(Self::ManualReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidMappingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MappingStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AutoMapped => "auto_mapped",
            Self::ManualReview => "manual_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the status a freshly created mapping receives for the given
    /// confidence.
    #[must_use]
    pub const fn for_confidence(confidence: i32) -> Self {
        if requires_manual_review(confidence) {
            Self::ManualReview
        } else {
            Self::AutoMapped
        }
    }

    /// Returns whether a reviewer may still decide this mapping.
    ///
    /// Only queued mappings accept a decision; approved and rejected are
    /// final, and auto-mapped rows never entered the queue.
    #[must_use]
    pub const fn accepts_decision(&self) -> bool {
        matches!(self, Self::ManualReview)
    }
}

/// Represents how an employee's standard role assignment came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// No assignment has been made yet.
    Pending,
    /// The assignment matcher picked a role; awaiting human confirmation.
    AiSuggested,
    /// A human confirmed the suggested role.
    Approved,
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ai_suggested" => Ok(Self::AiSuggested),
            "approved" => Ok(Self::Approved),
            _ => Err(DomainError::InvalidAssignmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AssignmentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AiSuggested => "ai_suggested",
            Self::Approved => "approved",
        }
    }
}

/// Records which writer produced a mapping's stored confidence value.
///
/// The model's self-reported confidence and the deterministic similarity
/// recomputation are independent writers of the same column; this tag keeps
/// the provenance unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    /// The text-generation backend's self-reported certainty.
    Model,
    /// The deterministic title-similarity recomputation.
    Heuristic,
}

impl FromStr for ConfidenceSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "model" => Ok(Self::Model),
            "heuristic" => Ok(Self::Heuristic),
            _ => Err(DomainError::InvalidConfidenceSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for ConfidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ConfidenceSource {
    /// Converts this source to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Heuristic => "heuristic",
        }
    }
}
