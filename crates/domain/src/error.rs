// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Session status string is not a recognized lifecycle state.
    InvalidSessionStatus(String),
    /// Mapping status string is not recognized.
    InvalidMappingStatus(String),
    /// Assignment status string is not recognized.
    InvalidAssignmentStatus(String),
    /// Confidence source string is not recognized.
    InvalidConfidenceSource(String),
    /// A session status transition that the lifecycle does not permit.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// Confidence value is outside the 0-100 range.
    InvalidConfidence {
        /// The rejected value.
        value: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSessionStatus(value) => {
                write!(f, "Invalid session status: '{value}'")
            }
            Self::InvalidMappingStatus(value) => {
                write!(f, "Invalid mapping status: '{value}'")
            }
            Self::InvalidAssignmentStatus(value) => {
                write!(f, "Invalid assignment status: '{value}'")
            }
            Self::InvalidConfidenceSource(value) => {
                write!(f, "Invalid confidence source: '{value}'")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Session status cannot move from '{from}' to '{to}'")
            }
            Self::InvalidConfidence { value } => {
                write!(f, "Confidence must be between 0 and 100, got {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
