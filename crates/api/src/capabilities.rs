// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking domain internals. The advisory [`ActorCapabilities`]
//! table mirrors [`authorize`], which is the check the handlers
//! actually enforce.

use crate::{AuthError, AuthenticatedActor, Role};

/// Actions an actor may attempt through the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    /// Upload a role catalog and create an upload session.
    UploadCatalog,
    /// Run the standardization engine on a session.
    Standardize,
    /// Run the assignment matcher over unassigned employees.
    AssignRoles,
    /// Run the mapping-confidence recalculation.
    FixMappings,
    /// Edit or deactivate standard roles.
    ManageRoles,
    /// Approve or reject queued role mappings.
    ReviewMappings,
    /// Create employees and approve their suggested assignments.
    ManageEmployees,
    /// Delete all standardization data.
    WipeData,
}

impl ApiAction {
    /// Returns the canonical string form of this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UploadCatalog => "upload_catalog",
            Self::Standardize => "standardize",
            Self::AssignRoles => "assign_roles",
            Self::FixMappings => "fix_mappings",
            Self::ManageRoles => "manage_roles",
            Self::ReviewMappings => "review_mappings",
            Self::ManageEmployees => "manage_employees",
            Self::WipeData => "wipe_data",
        }
    }

    /// The minimum role this action requires.
    #[must_use]
    pub const fn required_role(&self) -> Role {
        match self {
            Self::WipeData => Role::Admin,
            _ => Role::Analyst,
        }
    }
}

/// Whether the given role is permitted to perform the given action.
///
/// The wipe is Admin-only; every other action is open to both roles.
#[must_use]
pub const fn role_allows(role: Role, action: ApiAction) -> bool {
    match action {
        ApiAction::WipeData => matches!(role, Role::Admin),
        _ => true,
    }
}

/// Checks that the actor may perform the action.
///
/// # Errors
///
/// Returns `AuthError::Unauthorized` naming the action and the
/// required role when the actor's role does not permit it.
pub fn authorize(actor: &AuthenticatedActor, action: ApiAction) -> Result<(), AuthError> {
    if role_allows(actor.role, action) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: String::from(action.as_str()),
            required_role: String::from(action.required_role().as_str()),
        })
    }
}

/// A single capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Converts a boolean permission into a capability flag.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    /// Whether this capability is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// The full advisory capability table for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActorCapabilities {
    /// May upload catalogs.
    pub can_upload_catalog: Capability,
    /// May run standardization.
    pub can_standardize: Capability,
    /// May run the assignment matcher.
    pub can_assign_roles: Capability,
    /// May run confidence recalculation.
    pub can_fix_mappings: Capability,
    /// May edit or deactivate standard roles.
    pub can_manage_roles: Capability,
    /// May decide queued mappings.
    pub can_review_mappings: Capability,
    /// May create employees and approve assignments.
    pub can_manage_employees: Capability,
    /// May wipe all data.
    pub can_wipe_data: Capability,
}

impl ActorCapabilities {
    /// Computes the capability table for an authenticated actor.
    #[must_use]
    pub const fn for_actor(actor: &AuthenticatedActor) -> Self {
        Self {
            can_upload_catalog: Capability::from_bool(role_allows(
                actor.role,
                ApiAction::UploadCatalog,
            )),
            can_standardize: Capability::from_bool(role_allows(actor.role, ApiAction::Standardize)),
            can_assign_roles: Capability::from_bool(role_allows(actor.role, ApiAction::AssignRoles)),
            can_fix_mappings: Capability::from_bool(role_allows(actor.role, ApiAction::FixMappings)),
            can_manage_roles: Capability::from_bool(role_allows(actor.role, ApiAction::ManageRoles)),
            can_review_mappings: Capability::from_bool(role_allows(
                actor.role,
                ApiAction::ReviewMappings,
            )),
            can_manage_employees: Capability::from_bool(role_allows(
                actor.role,
                ApiAction::ManageEmployees,
            )),
            can_wipe_data: Capability::from_bool(role_allows(actor.role, ApiAction::WipeData)),
        }
    }
}
