// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the rolemap standardization service.
//!
//! This crate sits between the HTTP surface and the domain/persistence
//! layers. It owns:
//!
//! - actor authentication and role-based capability checks
//! - the catalog file parser (CSV normalization)
//! - the standardization prompt builder and the schema-validated
//!   AI-reply parser
//! - request/response DTOs and persistence-to-API error translation

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
#![allow(clippy::multiple_crate_versions)]

mod capabilities;
mod catalog;
mod error;
mod request_response;
mod standardize;

pub use capabilities::{ActorCapabilities, ApiAction, Capability, authorize, role_allows};
pub use catalog::{CatalogFileError, CatalogFileUpload, CatalogParseOutcome, parse_catalog_files};
pub use error::{ApiError, translate_llm_error, translate_persistence_error};
pub use request_response::{
    AssignmentDetail, BulkAssignResponse, CatalogUploadRequest, CatalogUploadResponse,
    CreateEmployeeRequest, DeactivateRoleRequest, FixMappingsResponse, ReviewMappingRequest,
    StandardizeRequest, StandardizeResponse, UpdateRoleRequest, WipeResponse,
};
pub use standardize::{
    MAX_SAMPLE_ROWS_PER_FILE, ReplyMapping, ReplyParseError, ReplyRole, StandardizationReply,
    build_standardization_prompt, parse_standardization_reply, reply_to_inserts,
};

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Roles apply to operators of the standardization service, never to
/// the employees being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: full authority, including destructive maintenance
    /// such as the data wipe.
    Admin,
    /// Analyst role: operators running the day-to-day standardization
    /// workflow.
    ///
    /// Analysts may upload catalogs, run standardization and
    /// assignment, review mappings, and manage standard roles and
    /// employees. They may not wipe data.
    Analyst,
}

impl Role {
    /// Returns the canonical string form of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Analyst => "analyst",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "analyst" => Ok(Self::Analyst),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}' (must be admin or analyst)"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents a service operator who has been authenticated and
/// has permission to perform certain actions based on their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub actor_id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(actor_id: String, role: Role) -> Self {
        Self { actor_id, role }
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
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
        }
    }
}

impl std::error::Error for AuthError {}

/// Stub authentication function.
///
/// This is a minimal placeholder. It does NOT implement real
/// authentication; credential validation is deferred to deployment
/// infrastructure. It does enforce that every write carries a
/// non-blank actor identity, so nothing is ever persisted anonymously.
///
/// # Errors
///
/// Returns an error if the actor id is missing or blank.
pub fn authenticate_stub(actor_id: &str, role: Role) -> Result<AuthenticatedActor, AuthError> {
    let trimmed: &str = actor_id.trim();
    if trimmed.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(String::from(trimmed), role))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_authenticate_stub_accepts_named_actor() {
        let actor = authenticate_stub("analyst-7", Role::Analyst).unwrap();
        assert_eq!(actor.actor_id, "analyst-7");
        assert_eq!(actor.role, Role::Analyst);
    }

    #[test]
    fn test_authenticate_stub_trims_and_rejects_blank() {
        let actor = authenticate_stub("  admin-1  ", Role::Admin).unwrap();
        assert_eq!(actor.actor_id, "admin-1");

        assert!(authenticate_stub("", Role::Admin).is_err());
        assert!(authenticate_stub("   ", Role::Analyst).is_err());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("Analyst").unwrap(), Role::Analyst);
        assert_eq!(Role::from_str(" ADMIN ").unwrap(), Role::Admin);
        assert!(Role::from_str("manager").is_err());
    }
}
