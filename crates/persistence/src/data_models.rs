// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Public row representations exchanged across the persistence boundary.
//!
//! List-valued columns (`file_names`, `required_skills`, `skills`, `raw_data`)
//! are stored as JSON text and decoded into typed fields here, so callers
//! never see the JSON encoding.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Serializable representation of an upload session row.
///
/// `raw_data` is the JSON-encoded parsed catalog
/// (`[{file_name, headers, rows}]`); list queries omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub id: i64,
    pub session_name: String,
    pub file_names: Vec<String>,
    pub raw_data: Option<String>,
    pub total_rows: i32,
    pub status: String,
    pub error_message: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert shape for a new upload session.
#[derive(Debug, Clone)]
pub struct NewUploadSession {
    pub session_name: String,
    pub file_names: Vec<String>,
    /// JSON-encoded parsed catalog, if parsing succeeded for any file.
    pub raw_data: Option<String>,
    pub total_rows: i32,
    pub status: String,
    pub created_by: String,
}

/// Serializable representation of a standard role row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardRoleData {
    pub id: i64,
    pub role_title: String,
    pub job_family: String,
    pub role_level: String,
    pub role_category: String,
    pub department: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_min_years: i32,
    pub experience_max_years: i32,
    pub is_active: bool,
    pub created_by: String,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert shape for a new standard role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStandardRole {
    pub role_title: String,
    pub job_family: String,
    pub role_level: String,
    pub role_category: String,
    pub department: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_min_years: i32,
    pub experience_max_years: i32,
    pub created_by: String,
}

/// Partial-update shape for a manual standard role edit.
///
/// `None` fields are left untouched; any applied edit bumps `version`.
#[derive(Debug, Clone, Default)]
pub struct StandardRoleUpdate {
    pub role_title: Option<String>,
    pub job_family: Option<String>,
    pub role_level: Option<String>,
    pub role_category: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub experience_min_years: Option<i32>,
    pub experience_max_years: Option<i32>,
}

/// Serializable representation of a role mapping row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMappingData {
    pub id: i64,
    pub session_id: i64,
    pub standard_role_id: i64,
    pub original_title: String,
    pub original_department: String,
    pub original_level: String,
    pub standardized_title: String,
    pub standardized_department: String,
    pub standardized_level: String,
    pub job_family: String,
    pub confidence: i32,
    pub confidence_source: String,
    pub status: String,
    pub requires_manual_review: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert shape for one role mapping inside a standardization write.
///
/// `role_index` points into the role slice passed to the same call; the
/// transaction resolves it to the freshly inserted role's id.
#[derive(Debug, Clone)]
pub struct NewRoleMapping {
    pub role_index: usize,
    pub original_title: String,
    pub original_department: String,
    pub original_level: String,
    pub standardized_title: String,
    pub standardized_department: String,
    pub standardized_level: String,
    pub job_family: String,
    pub confidence: i32,
}

/// Outcome of an atomic standardization write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardizationWriteResult {
    pub roles_created: usize,
    pub mappings_created: usize,
}

/// Serializable representation of an employee row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeData {
    pub id: i64,
    pub employee_name: String,
    pub current_position: String,
    pub current_department: String,
    pub current_level: String,
    pub skills: Vec<String>,
    pub standard_role_id: Option<i64>,
    pub ai_suggested_role_id: Option<i64>,
    pub role_assignment_status: String,
    pub assignment_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert shape for a new employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_name: String,
    pub current_position: String,
    pub current_department: String,
    pub current_level: String,
    pub skills: Vec<String>,
}

/// Dashboard aggregate counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardizationSummary {
    pub total_sessions: i64,
    pub completed_sessions: i64,
    pub error_sessions: i64,
    pub active_roles: i64,
    pub total_mappings: i64,
    pub mappings_needing_review: i64,
    pub total_employees: i64,
    pub assigned_employees: i64,
    pub unassigned_employees: i64,
}

/// Per-table counts reported by a full data wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WipeOutcome {
    pub mappings_deleted: usize,
    pub employees_cleared: usize,
    pub roles_deleted: usize,
    pub sessions_deleted: usize,
}

/// Returns the current UTC time as RFC 3339 text.
///
/// Every row write stamps timestamps from here so both backends store the
/// same format regardless of their `CURRENT_TIMESTAMP` rendering.
#[must_use]
pub(crate) fn current_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        // Rfc3339 formatting of a UTC timestamp cannot fail; epoch seconds
        // keep the column non-empty if it somehow does.
        .unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
}

/// Decodes a JSON-array column into a string list.
pub(crate) fn decode_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encodes a string list for storage in a JSON-array column.
pub(crate) fn encode_string_list(values: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(values)
}
