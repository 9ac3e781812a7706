// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload session queries.
//!
//! This module contains backend-agnostic queries for retrieving upload
//! sessions. All queries use Diesel DSL and work across all supported
//! database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{SessionData, decode_string_list};
use crate::diesel_schema::upload_sessions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = upload_sessions)]
struct SessionRow {
    id: i64,
    session_name: String,
    file_names: String,
    raw_data: Option<String>,
    total_rows: i32,
    status: String,
    error_message: Option<String>,
    created_by: String,
    created_at: String,
    updated_at: String,
}

/// Diesel Queryable struct for session list rows.
///
/// `raw_data` can hold the full parsed catalog; listings never need it,
/// so it is excluded from the select.
#[derive(Queryable, Selectable)]
#[diesel(table_name = upload_sessions)]
struct SessionListRow {
    id: i64,
    session_name: String,
    file_names: String,
    total_rows: i32,
    status: String,
    error_message: Option<String>,
    created_by: String,
    created_at: String,
    updated_at: String,
}

backend_fn! {
/// Retrieves an upload session by ID, including its raw parsed catalog.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The session ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_upload_session(
    conn: &mut _,
    session_id: i64,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up upload session by ID: {}", session_id);

    let result: Result<SessionRow, diesel::result::Error> = upload_sessions::table
        .filter(upload_sessions::id.eq(session_id))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            id: row.id,
            session_name: row.session_name,
            file_names: decode_string_list(&row.file_names),
            raw_data: row.raw_data,
            total_rows: row.total_rows,
            status: row.status,
            error_message: row.error_message,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all upload sessions, newest first, without their raw catalogs.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_upload_sessions(conn: &mut _) -> Result<Vec<SessionData>, PersistenceError> {
    debug!("Listing all upload sessions");

    let rows: Vec<SessionListRow> = upload_sessions::table
        .select(SessionListRow::as_select())
        .order_by(upload_sessions::id.desc())
        .load(conn)?;

    let sessions: Vec<SessionData> = rows
        .into_iter()
        .map(|row| SessionData {
            id: row.id,
            session_name: row.session_name,
            file_names: decode_string_list(&row.file_names),
            raw_data: None,
            total_rows: row.total_rows,
            status: row.status,
            error_message: row.error_message,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect();

    Ok(sessions)
}
}
