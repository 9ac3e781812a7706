// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standard role queries.
//!
//! This module contains backend-agnostic queries for retrieving standard
//! roles. All queries use Diesel DSL and work across all supported
//! database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{StandardRoleData, decode_string_list};
use crate::diesel_schema::standard_roles;
use crate::error::PersistenceError;

/// Diesel Queryable struct for standard role rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = standard_roles)]
pub(crate) struct StandardRoleRow {
    pub(crate) id: i64,
    pub(crate) role_title: String,
    pub(crate) job_family: String,
    pub(crate) role_level: String,
    pub(crate) role_category: String,
    pub(crate) department: String,
    pub(crate) description: String,
    pub(crate) required_skills: String,
    pub(crate) experience_min_years: i32,
    pub(crate) experience_max_years: i32,
    pub(crate) is_active: bool,
    pub(crate) created_by: String,
    pub(crate) version: i32,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<StandardRoleRow> for StandardRoleData {
    fn from(row: StandardRoleRow) -> Self {
        Self {
            id: row.id,
            role_title: row.role_title,
            job_family: row.job_family,
            role_level: row.role_level,
            role_category: row.role_category,
            department: row.department,
            description: row.description,
            required_skills: decode_string_list(&row.required_skills),
            experience_min_years: row.experience_min_years,
            experience_max_years: row.experience_max_years,
            is_active: row.is_active,
            created_by: row.created_by,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

backend_fn! {
/// Retrieves a standard role by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `role_id` - The role ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the role is not found.
pub fn get_standard_role(
    conn: &mut _,
    role_id: i64,
) -> Result<Option<StandardRoleData>, PersistenceError> {
    debug!("Looking up standard role by ID: {}", role_id);

    let result: Result<StandardRoleRow, diesel::result::Error> = standard_roles::table
        .filter(standard_roles::id.eq(role_id))
        .select(StandardRoleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists standard roles in id order (first-seen first).
///
/// The Assignment Matcher depends on this ordering: its deterministic
/// fallback and tie-breaking both key off the lowest-id candidate.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `include_inactive` - Whether soft-disabled roles are included
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_standard_roles(
    conn: &mut _,
    include_inactive: bool,
) -> Result<Vec<StandardRoleData>, PersistenceError> {
    debug!("Listing standard roles (include_inactive={})", include_inactive);

    let rows: Vec<StandardRoleRow> = if include_inactive {
        standard_roles::table
            .select(StandardRoleRow::as_select())
            .order_by(standard_roles::id.asc())
            .load(conn)?
    } else {
        standard_roles::table
            .filter(standard_roles::is_active.eq(true))
            .select(StandardRoleRow::as_select())
            .order_by(standard_roles::id.asc())
            .load(conn)?
    };

    Ok(rows.into_iter().map(Into::into).collect())
}
}
