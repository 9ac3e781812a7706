// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role mapping queries.
//!
//! This module contains backend-agnostic queries for retrieving role
//! mappings. All queries use Diesel DSL and work across all supported
//! database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::MappingStatus;
use tracing::debug;

use crate::data_models::RoleMappingData;
use crate::diesel_schema::role_mappings;
use crate::error::PersistenceError;

/// Diesel Queryable struct for role mapping rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = role_mappings)]
pub(crate) struct RoleMappingRow {
    pub(crate) id: i64,
    pub(crate) session_id: i64,
    pub(crate) standard_role_id: i64,
    pub(crate) original_title: String,
    pub(crate) original_department: String,
    pub(crate) original_level: String,
    pub(crate) standardized_title: String,
    pub(crate) standardized_department: String,
    pub(crate) standardized_level: String,
    pub(crate) job_family: String,
    pub(crate) confidence: i32,
    pub(crate) confidence_source: String,
    pub(crate) status: String,
    pub(crate) requires_manual_review: bool,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<RoleMappingRow> for RoleMappingData {
    fn from(row: RoleMappingRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            standard_role_id: row.standard_role_id,
            original_title: row.original_title,
            original_department: row.original_department,
            original_level: row.original_level,
            standardized_title: row.standardized_title,
            standardized_department: row.standardized_department,
            standardized_level: row.standardized_level,
            job_family: row.job_family,
            confidence: row.confidence,
            confidence_source: row.confidence_source,
            status: row.status,
            requires_manual_review: row.requires_manual_review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

backend_fn! {
/// Retrieves a role mapping by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `mapping_id` - The mapping ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the mapping is not found.
pub fn get_role_mapping(
    conn: &mut _,
    mapping_id: i64,
) -> Result<Option<RoleMappingData>, PersistenceError> {
    debug!("Looking up role mapping by ID: {}", mapping_id);

    let result: Result<RoleMappingRow, diesel::result::Error> = role_mappings::table
        .filter(role_mappings::id.eq(mapping_id))
        .select(RoleMappingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all role mappings in id order.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_role_mappings(conn: &mut _) -> Result<Vec<RoleMappingData>, PersistenceError> {
    debug!("Listing all role mappings");

    let rows: Vec<RoleMappingRow> = role_mappings::table
        .select(RoleMappingRow::as_select())
        .order_by(role_mappings::id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Lists the role mappings written for one upload session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The owning session ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_mappings_for_session(
    conn: &mut _,
    session_id: i64,
) -> Result<Vec<RoleMappingData>, PersistenceError> {
    debug!("Listing role mappings for session ID: {}", session_id);

    let rows: Vec<RoleMappingRow> = role_mappings::table
        .filter(role_mappings::session_id.eq(session_id))
        .select(RoleMappingRow::as_select())
        .order_by(role_mappings::id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Lists the mappings queued for manual review.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_review_queue(conn: &mut _) -> Result<Vec<RoleMappingData>, PersistenceError> {
    debug!("Listing role mappings awaiting manual review");

    let rows: Vec<RoleMappingRow> = role_mappings::table
        .filter(role_mappings::status.eq(MappingStatus::ManualReview.as_str()))
        .select(RoleMappingRow::as_select())
        .order_by(role_mappings::id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}
