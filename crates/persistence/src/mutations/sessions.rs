// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload session mutations.
//!
//! This module contains backend-agnostic mutations for creating upload
//! sessions and moving them along their lifecycle. Most mutations use
//! Diesel DSL, with minimal backend-specific helpers abstracted via the
//! `PersistenceBackend` trait.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::SessionStatus;
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewUploadSession, current_timestamp, encode_string_list};
use crate::diesel_schema::upload_sessions;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new upload session.
///
/// The parsed catalog (if any) is stored as JSON text in `raw_data`; the
/// standardization engine reads it back from here.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session` - The session to insert
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn insert_upload_session(
    conn: &mut _,
    session: &NewUploadSession,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating upload session '{}' with {} files, {} rows",
        session.session_name,
        session.file_names.len(),
        session.total_rows
    );

    let file_names_json: String = encode_string_list(&session.file_names)?;
    let now: String = current_timestamp();

    diesel::insert_into(upload_sessions::table)
        .values((
            upload_sessions::session_name.eq(&session.session_name),
            upload_sessions::file_names.eq(&file_names_json),
            upload_sessions::raw_data.eq(session.raw_data.as_deref()),
            upload_sessions::total_rows.eq(session.total_rows),
            upload_sessions::status.eq(&session.status),
            upload_sessions::created_by.eq(&session.created_by),
            upload_sessions::created_at.eq(&now),
            upload_sessions::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    info!(session_id, "Upload session created");
    Ok(session_id)
}
}

backend_fn! {
/// Moves a session to a new lifecycle status.
///
/// The transition is validated against the session lifecycle; leaving the
/// `error` state clears the stored error message.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The session ID
/// * `target` - The target status
///
/// # Errors
///
/// Returns an error if the session does not exist or the transition is
/// not permitted by the lifecycle.
pub fn update_session_status(
    conn: &mut _,
    session_id: i64,
    target: SessionStatus,
) -> Result<(), PersistenceError> {
    debug!("Updating session {} status to {}", session_id, target);

    let stored_status: String = upload_sessions::table
        .filter(upload_sessions::id.eq(session_id))
        .select(upload_sessions::status)
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::SessionNotFound(session_id))?;

    let current: SessionStatus = SessionStatus::from_str(&stored_status)?;
    if !current.can_transition_to(target) {
        warn!(
            session_id,
            "Rejected session status transition {} -> {}", current, target
        );
        return Err(PersistenceError::InvalidStatusTransition {
            from: current.to_string(),
            to: target.to_string(),
        });
    }

    diesel::update(upload_sessions::table)
        .filter(upload_sessions::id.eq(session_id))
        .set((
            upload_sessions::status.eq(target.as_str()),
            upload_sessions::error_message.eq(None::<String>),
            upload_sessions::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    info!(session_id, "Session status updated to {}", target);
    Ok(())
}
}

backend_fn! {
/// Marks a session as failed, recording the failure reason.
///
/// `error` is reachable from every non-terminal status; marking a
/// completed session as failed is rejected.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The session ID
/// * `message` - The failure reason stored on the session
///
/// # Errors
///
/// Returns an error if the session does not exist or is already terminal.
pub fn set_session_error(
    conn: &mut _,
    session_id: i64,
    message: &str,
) -> Result<(), PersistenceError> {
    debug!("Marking session {} as failed", session_id);

    let stored_status: String = upload_sessions::table
        .filter(upload_sessions::id.eq(session_id))
        .select(upload_sessions::status)
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::SessionNotFound(session_id))?;

    let current: SessionStatus = SessionStatus::from_str(&stored_status)?;
    if !current.can_transition_to(SessionStatus::Error) {
        return Err(PersistenceError::InvalidStatusTransition {
            from: current.to_string(),
            to: SessionStatus::Error.to_string(),
        });
    }

    diesel::update(upload_sessions::table)
        .filter(upload_sessions::id.eq(session_id))
        .set((
            upload_sessions::status.eq(SessionStatus::Error.as_str()),
            upload_sessions::error_message.eq(Some(message)),
            upload_sessions::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    warn!(session_id, "Session marked as failed: {}", message);
    Ok(())
}
}
