// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::AuthError;
use crate::standardize::ReplyParseError;
use rolemap_llm::LlmError;
use rolemap_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from persistence and LLM errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed, the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A lifecycle rule was violated.
    LifecycleViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The AI reply could not be parsed into the required shape.
    InvalidReplyFormat {
        /// The reason the reply was rejected.
        reason: String,
    },
    /// Text generation failed.
    Generation {
        /// A description of the generation failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::LifecycleViolation { message } => {
                write!(f, "Lifecycle violation: {message}")
            }
            Self::InvalidReplyFormat { reason } => {
                write!(f, "Invalid AI reply format: {reason}")
            }
            Self::Generation { message } => {
                write!(f, "Text generation failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<ReplyParseError> for ApiError {
    fn from(err: ReplyParseError) -> Self {
        Self::InvalidReplyFormat {
            reason: err.to_string(),
        }
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures storage errors are not
/// leaked directly through the HTTP contract.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SessionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Upload session"),
            message: format!("Upload session {id} does not exist"),
        },
        PersistenceError::RoleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Standard role"),
            message: format!("Standard role {id} does not exist"),
        },
        PersistenceError::MappingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Role mapping"),
            message: format!("Role mapping {id} does not exist"),
        },
        PersistenceError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        PersistenceError::InvalidStatusTransition { from, to } => ApiError::LifecycleViolation {
            message: format!("Session cannot move from '{from}' to '{to}'"),
        },
        PersistenceError::MappingNotAwaitingReview(id) => ApiError::LifecycleViolation {
            message: format!("Role mapping {id} is not awaiting review"),
        },
        PersistenceError::AssignmentNotSuggested(id) => ApiError::LifecycleViolation {
            message: format!("Employee {id} has no suggested assignment to approve"),
        },
        PersistenceError::InvalidRoleReference { index, role_count } => ApiError::InvalidInput {
            field: String::from("mappings"),
            message: format!(
                "Mapping references role index {index} but only {role_count} roles were supplied"
            ),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a text-generation error into an API error.
///
/// The missing-API-key case keeps its own wording so callers can tell
/// a configuration failure apart from a transport failure.
#[must_use]
pub fn translate_llm_error(err: LlmError) -> ApiError {
    ApiError::Generation {
        message: err.to_string(),
    }
}
