// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Every mutating request carries `actor_id` and `role`; handlers
//! authenticate before touching storage. Responses here are the
//! endpoint-specific payloads; the uniform `{success, ...}` envelope
//! is applied at the server edge.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogFileError, CatalogFileUpload};

/// Request body for `POST /catalog/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogUploadRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role (`admin` or `analyst`).
    pub role: String,
    /// Human-readable session name.
    pub session_name: String,
    /// The uploaded files.
    pub files: Vec<CatalogFileUpload>,
}

/// Response payload for a catalog upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogUploadResponse {
    /// The created upload session.
    pub session_id: i64,
    /// Kept data rows across all parsed files.
    pub total_rows: usize,
    /// Number of files parsed successfully.
    pub files_parsed: usize,
    /// Per-file failures, if any.
    pub file_errors: Vec<CatalogFileError>,
}

/// Request body for `POST /standardize`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StandardizeRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role.
    pub role: String,
    /// The session to standardize.
    pub session_id: i64,
    /// Optional inline catalog; when absent the session's stored raw
    /// data is used.
    #[serde(default)]
    pub parsed_data: Option<String>,
}

/// Response payload for a standardization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardizeResponse {
    /// Standard roles written in this run.
    pub standard_roles_created: usize,
    /// Role mappings written in this run.
    pub mappings_created: usize,
}

/// Per-employee outcome of an assignment-matcher run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentDetail {
    /// The employee processed.
    pub employee_name: String,
    /// `assigned` or `failed`.
    pub status: String,
    /// The assigned role title, when assignment succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_role: Option<String>,
    /// The failure reason, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response payload for `POST /bulk_assign_roles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkAssignResponse {
    /// Employees assigned a role.
    pub assigned: usize,
    /// Employees whose write failed.
    pub failed: usize,
    /// Employees processed; always `assigned + failed`.
    pub total: usize,
    /// Per-employee outcomes.
    pub details: Vec<AssignmentDetail>,
}

/// Response payload for `POST /fix_mappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixMappingsResponse {
    /// Mappings whose confidence was overwritten.
    pub mappings_fixed: usize,
    /// Mappings examined.
    pub total_mappings: usize,
}

/// Request body for `POST /standard_roles/update`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRoleRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role.
    pub role: String,
    /// The role to edit.
    pub role_id: i64,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub job_family: Option<String>,
    #[serde(default)]
    pub role_level: Option<String>,
    #[serde(default)]
    pub role_category: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience_min_years: Option<i32>,
    #[serde(default)]
    pub experience_max_years: Option<i32>,
}

/// Request body for `POST /standard_roles/deactivate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeactivateRoleRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role.
    pub role: String,
    /// The role to soft-disable.
    pub role_id: i64,
}

/// Request body for `POST /mappings/review`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewMappingRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role.
    pub role: String,
    /// The queued mapping being decided.
    pub mapping_id: i64,
    /// `approved` or `rejected`.
    pub decision: String,
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    /// The submitting actor.
    pub actor_id: String,
    /// The actor's role.
    pub role: String,
    /// The employee's name.
    pub employee_name: String,
    /// The employee's current position title.
    pub current_position: String,
    /// The employee's current department.
    pub current_department: String,
    /// The employee's current seniority band.
    pub current_level: String,
    /// The employee's skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Response payload for `POST /wipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WipeResponse {
    /// Role mappings deleted.
    pub mappings_deleted: usize,
    /// Employees whose role references were cleared.
    pub employees_cleared: usize,
    /// Standard roles deleted.
    pub roles_deleted: usize,
    /// Upload sessions deleted.
    pub sessions_deleted: usize,
}
