// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard aggregation queries.

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::SessionStatus;
use tracing::debug;

use crate::data_models::StandardizationSummary;
use crate::diesel_schema::{employees, role_mappings, standard_roles, upload_sessions};
use crate::error::PersistenceError;

backend_fn! {
/// Computes the dashboard aggregate counts in one pass.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if any count query fails.
pub fn standardization_summary(
    conn: &mut _,
) -> Result<StandardizationSummary, PersistenceError> {
    debug!("Computing standardization summary");

    let total_sessions: i64 = upload_sessions::table
        .select(count(upload_sessions::id))
        .first(conn)?;
    let completed_sessions: i64 = upload_sessions::table
        .filter(upload_sessions::status.eq(SessionStatus::Completed.as_str()))
        .select(count(upload_sessions::id))
        .first(conn)?;
    let error_sessions: i64 = upload_sessions::table
        .filter(upload_sessions::status.eq(SessionStatus::Error.as_str()))
        .select(count(upload_sessions::id))
        .first(conn)?;

    let active_roles: i64 = standard_roles::table
        .filter(standard_roles::is_active.eq(true))
        .select(count(standard_roles::id))
        .first(conn)?;

    let total_mappings: i64 = role_mappings::table
        .select(count(role_mappings::id))
        .first(conn)?;
    let mappings_needing_review: i64 = role_mappings::table
        .filter(role_mappings::requires_manual_review.eq(true))
        .select(count(role_mappings::id))
        .first(conn)?;

    let total_employees: i64 = employees::table.select(count(employees::id)).first(conn)?;
    let assigned_employees: i64 = employees::table
        .filter(employees::standard_role_id.is_not_null())
        .select(count(employees::id))
        .first(conn)?;

    Ok(StandardizationSummary {
        total_sessions,
        completed_sessions,
        error_sessions,
        active_roles,
        total_mappings,
        mappings_needing_review,
        total_employees,
        assigned_employees,
        unassigned_employees: total_employees - assigned_employees,
    })
}
}
