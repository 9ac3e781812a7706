// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role mapping mutations: confidence rewrites and review decisions.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::{ConfidenceSource, MappingStatus, requires_manual_review};
use tracing::{debug, info};

use crate::data_models::current_timestamp;
use crate::diesel_schema::role_mappings;
use crate::error::PersistenceError;

backend_fn! {
/// Overwrites a mapping's confidence and records its provenance.
///
/// The review flag is recomputed from the new confidence. The mapping's
/// review `status` is deliberately left untouched: a reviewer's decision
/// survives a confidence recalculation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `mapping_id` - The mapping ID
/// * `confidence` - The new confidence, 0..=100
/// * `source` - Which writer produced the value
///
/// # Errors
///
/// Returns an error if the mapping does not exist or the update fails.
pub fn update_mapping_confidence(
    conn: &mut _,
    mapping_id: i64,
    confidence: i32,
    source: ConfidenceSource,
) -> Result<(), PersistenceError> {
    debug!(
        "Updating mapping {} confidence to {} ({})",
        mapping_id, confidence, source
    );

    let rows_affected: usize = diesel::update(role_mappings::table)
        .filter(role_mappings::id.eq(mapping_id))
        .set((
            role_mappings::confidence.eq(confidence),
            role_mappings::confidence_source.eq(source.as_str()),
            role_mappings::requires_manual_review.eq(requires_manual_review(confidence)),
            role_mappings::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::MappingNotFound(mapping_id));
    }

    Ok(())
}
}

backend_fn! {
/// Records a reviewer's decision on a queued mapping.
///
/// Only mappings with status `manual_review` accept a decision; approved
/// and rejected mappings are final, and auto-mapped rows never entered
/// the queue.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `mapping_id` - The mapping ID
/// * `decision` - The reviewer's decision (`Approved` or `Rejected`)
///
/// # Errors
///
/// Returns an error if the mapping does not exist or is not awaiting
/// review.
pub fn update_mapping_status(
    conn: &mut _,
    mapping_id: i64,
    decision: MappingStatus,
) -> Result<(), PersistenceError> {
    debug!("Recording review decision {} for mapping {}", decision, mapping_id);

    let stored_status: String = role_mappings::table
        .filter(role_mappings::id.eq(mapping_id))
        .select(role_mappings::status)
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::MappingNotFound(mapping_id))?;

    let current: MappingStatus = MappingStatus::from_str(&stored_status)?;
    if !current.accepts_decision() {
        return Err(PersistenceError::MappingNotAwaitingReview(mapping_id));
    }

    diesel::update(role_mappings::table)
        .filter(role_mappings::id.eq(mapping_id))
        .set((
            role_mappings::status.eq(decision.as_str()),
            role_mappings::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    info!(mapping_id, "Mapping reviewed: {}", decision);
    Ok(())
}
}
