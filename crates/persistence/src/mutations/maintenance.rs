// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Destructive maintenance operations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::AssignmentStatus;
use tracing::{info, warn};

use crate::data_models::{WipeOutcome, current_timestamp};
use crate::diesel_schema::{employees, role_mappings, standard_roles, upload_sessions};
use crate::error::PersistenceError;

backend_fn! {
/// Deletes all standardization data in one transaction.
///
/// Order matters for foreign keys: mappings go first, employee role
/// references are cleared next (employees themselves survive), then roles
/// and sessions. Any failure rolls the whole wipe back.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if any delete fails; nothing is removed in that case.
pub fn wipe_all_data(conn: &mut _) -> Result<WipeOutcome, PersistenceError> {
    warn!("Wiping all standardization data");

    conn.transaction::<WipeOutcome, PersistenceError, _>(|conn| {
        let mappings_deleted: usize = diesel::delete(role_mappings::table).execute(conn)?;

        let employees_cleared: usize = diesel::update(employees::table)
            .set((
                employees::standard_role_id.eq(None::<i64>),
                employees::ai_suggested_role_id.eq(None::<i64>),
                employees::role_assignment_status.eq(AssignmentStatus::Pending.as_str()),
                employees::assignment_notes.eq(None::<String>),
                employees::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        let roles_deleted: usize = diesel::delete(standard_roles::table).execute(conn)?;
        let sessions_deleted: usize = diesel::delete(upload_sessions::table).execute(conn)?;

        Ok(WipeOutcome {
            mappings_deleted,
            employees_cleared,
            roles_deleted,
            sessions_deleted,
        })
    })
    .inspect(|outcome| {
        info!(
            "Wipe complete: {} mappings, {} employees cleared, {} roles, {} sessions",
            outcome.mappings_deleted,
            outcome.employees_cleared,
            outcome.roles_deleted,
            outcome.sessions_deleted
        );
    })
}
}
