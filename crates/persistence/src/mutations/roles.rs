// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standard role mutations.
//!
//! Standard roles are the canonical catalog: manual edits bump `version`
//! and roles are soft-disabled rather than deleted, so existing mappings
//! and assignments always resolve.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewStandardRole, StandardRoleUpdate, current_timestamp, encode_string_list,
};
use crate::diesel_schema::standard_roles;
use crate::error::PersistenceError;
use crate::queries::roles::StandardRoleRow;

backend_fn! {
/// Creates a new standard role.
///
/// The role starts active at version 1.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `role` - The role to insert
///
/// # Errors
///
/// Returns an error if the role cannot be created.
pub fn insert_standard_role(
    conn: &mut _,
    role: &NewStandardRole,
) -> Result<i64, PersistenceError> {
    debug!("Creating standard role '{}'", role.role_title);

    let skills_json: String = encode_string_list(&role.required_skills)?;
    let now: String = current_timestamp();

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

    let role_id: i64 = conn.get_last_insert_rowid()?;

    info!(role_id, "Standard role created: {}", role.role_title);
    Ok(role_id)
}
}

backend_fn! {
/// Applies a manual edit to a standard role, bumping its version.
///
/// `None` fields in the update are left untouched.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `role_id` - The role ID
/// * `update` - The fields to change
///
/// # Errors
///
/// Returns an error if the role does not exist or the update fails.
pub fn update_standard_role(
    conn: &mut _,
    role_id: i64,
    update: &StandardRoleUpdate,
) -> Result<(), PersistenceError> {
    debug!("Updating standard role ID: {}", role_id);

    let existing: StandardRoleRow = standard_roles::table
        .filter(standard_roles::id.eq(role_id))
        .select(StandardRoleRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RoleNotFound(role_id))?;

    let skills_json: String = match &update.required_skills {
        Some(skills) => encode_string_list(skills)?,
        None => existing.required_skills,
    };

    diesel::update(standard_roles::table)
        .filter(standard_roles::id.eq(role_id))
        .set((
            standard_roles::role_title
                .eq(update.role_title.as_ref().unwrap_or(&existing.role_title)),
            standard_roles::job_family
                .eq(update.job_family.as_ref().unwrap_or(&existing.job_family)),
            standard_roles::role_level
                .eq(update.role_level.as_ref().unwrap_or(&existing.role_level)),
            standard_roles::role_category.eq(update
                .role_category
                .as_ref()
                .unwrap_or(&existing.role_category)),
            standard_roles::department
                .eq(update.department.as_ref().unwrap_or(&existing.department)),
            standard_roles::description
                .eq(update.description.as_ref().unwrap_or(&existing.description)),
            standard_roles::required_skills.eq(&skills_json),
            standard_roles::experience_min_years.eq(update
                .experience_min_years
                .unwrap_or(existing.experience_min_years)),
            standard_roles::experience_max_years.eq(update
                .experience_max_years
                .unwrap_or(existing.experience_max_years)),
            standard_roles::version.eq(existing.version + 1),
            standard_roles::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    info!(
        role_id,
        "Standard role updated to version {}",
        existing.version + 1
    );
    Ok(())
}
}

backend_fn! {
/// Soft-disables a standard role.
///
/// The row is kept so existing mappings and assignments still resolve;
/// it simply stops appearing as a matcher candidate.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `role_id` - The role ID
///
/// # Errors
///
/// Returns an error if the role does not exist or the update fails.
pub fn deactivate_standard_role(conn: &mut _, role_id: i64) -> Result<(), PersistenceError> {
    debug!("Deactivating standard role ID: {}", role_id);

    let rows_affected: usize = diesel::update(standard_roles::table)
        .filter(standard_roles::id.eq(role_id))
        .set((
            standard_roles::is_active.eq(false),
            standard_roles::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::RoleNotFound(role_id));
    }

    info!(role_id, "Standard role deactivated");
    Ok(())
}
}
