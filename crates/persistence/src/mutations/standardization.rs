// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic standardization writes.
//!
//! A standardization run produces a consolidated role set and one mapping
//! per original catalog row. Both are committed in a single transaction:
//! each mapping's `standard_role_id` is resolved against the roles
//! inserted in the same call, so a mapping can never reference a role from
//! a different run, and any failure rolls the whole batch back.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::{ConfidenceSource, MappingStatus, requires_manual_review};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewRoleMapping, NewStandardRole, StandardizationWriteResult, current_timestamp,
    encode_string_list,
};
use crate::diesel_schema::{role_mappings, standard_roles};
use crate::error::PersistenceError;

backend_fn! {
/// Writes a standardization run's roles and mappings atomically.
///
/// Roles are inserted first, in slice order; each mapping's `role_index`
/// is then resolved to the id of the freshly inserted role at that
/// position. An out-of-range index fails the whole call and nothing is
/// committed. Mapping status and the review flag are derived from the
/// mapping's confidence; the confidence provenance is recorded as
/// model-supplied.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The owning upload session
/// * `roles` - The consolidated role set, in reply order
/// * `mappings` - One mapping per original row, indexed into `roles`
///
/// # Errors
///
/// Returns an error if any insert fails or a mapping references a role
/// index outside `roles`; the transaction is rolled back in either case.
pub fn insert_standardization_result(
    conn: &mut _,
    session_id: i64,
    roles: &[NewStandardRole],
    mappings: &[NewRoleMapping],
) -> Result<StandardizationWriteResult, PersistenceError> {
    info!(
        session_id,
        "Writing standardization result: {} roles, {} mappings",
        roles.len(),
        mappings.len()
    );

    conn.transaction::<StandardizationWriteResult, PersistenceError, _>(|conn| {
        let now: String = current_timestamp();
        let mut role_ids: Vec<i64> = Vec::with_capacity(roles.len());

        for role in roles {
            let skills_json: String = encode_string_list(&role.required_skills)?;
            diesel::insert_into(standard_roles::table)
                .values((
                    standard_roles::role_title.eq(&role.role_title),
                    standard_roles::job_family.eq(&role.job_family),
                    standard_roles::role_level.eq(&role.role_level),
                    standard_roles::role_category.eq(&role.role_category),
                    standard_roles::department.eq(&role.department),
                    standard_roles::description.eq(&role.description),
                    standard_roles::required_skills.eq(&skills_json),
                    standard_roles::experience_min_years.eq(role.experience_min_years),
                    standard_roles::experience_max_years.eq(role.experience_max_years),
                    standard_roles::is_active.eq(true),
                    standard_roles::created_by.eq(&role.created_by),
                    standard_roles::version.eq(1),
                    standard_roles::created_at.eq(&now),
                    standard_roles::updated_at.eq(&now),
                ))
                .execute(conn)?;
            role_ids.push(conn.get_last_insert_rowid()?);
        }

        for mapping in mappings {
            let standard_role_id: i64 = *role_ids.get(mapping.role_index).ok_or(
                PersistenceError::InvalidRoleReference {
                    index: mapping.role_index,
                    role_count: role_ids.len(),
                },
            )?;

            let needs_review: bool = requires_manual_review(mapping.confidence);
            let status: MappingStatus = MappingStatus::for_confidence(mapping.confidence);
            debug!(
                "Mapping '{}' -> role {} (confidence {}, status {})",
                mapping.original_title, standard_role_id, mapping.confidence, status
            );

            diesel::insert_into(role_mappings::table)
                .values((
                    role_mappings::session_id.eq(session_id),
                    role_mappings::standard_role_id.eq(standard_role_id),
                    role_mappings::original_title.eq(&mapping.original_title),
                    role_mappings::original_department.eq(&mapping.original_department),
                    role_mappings::original_level.eq(&mapping.original_level),
                    role_mappings::standardized_title.eq(&mapping.standardized_title),
                    role_mappings::standardized_department.eq(&mapping.standardized_department),
                    role_mappings::standardized_level.eq(&mapping.standardized_level),
                    role_mappings::job_family.eq(&mapping.job_family),
                    role_mappings::confidence.eq(mapping.confidence),
                    role_mappings::confidence_source.eq(ConfidenceSource::Model.as_str()),
                    role_mappings::status.eq(status.as_str()),
                    role_mappings::requires_manual_review.eq(needs_review),
                    role_mappings::created_at.eq(&now),
                    role_mappings::updated_at.eq(&now),
                ))
                .execute(conn)?;
        }

        Ok(StandardizationWriteResult {
            roles_created: roles.len(),
            mappings_created: mappings.len(),
        })
    })
}
}
