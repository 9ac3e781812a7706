// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rolemap_domain::AssignmentStatus;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployee, current_timestamp, encode_string_list};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new employee.
///
/// Assignment fields start empty: no standard role, no suggestion, and a
/// `pending` assignment status.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee` - The employee to insert
///
/// # Errors
///
/// Returns an error if the employee cannot be created.
pub fn insert_employee(conn: &mut _, employee: &NewEmployee) -> Result<i64, PersistenceError> {
    debug!("Creating employee '{}'", employee.employee_name);

    let skills_json: String = encode_string_list(&employee.skills)?;
    let now: String = current_timestamp();

    diesel::insert_into(employees::table)
        .values((
            employees::employee_name.eq(&employee.employee_name),
            employees::current_position.eq(&employee.current_position),
            employees::current_department.eq(&employee.current_department),
            employees::current_level.eq(&employee.current_level),
            employees::skills.eq(&skills_json),
            employees::role_assignment_status.eq(AssignmentStatus::Pending.as_str()),
            employees::created_at.eq(&now),
            employees::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;

    info!(employee_id, "Employee created: {}", employee.employee_name);
    Ok(employee_id)
}
}

backend_fn! {
/// Records the matcher's role pick for an employee.
///
/// Writes both the effective assignment and the suggestion column, moves
/// the assignment status to `ai_suggested`, and stores the note recording
/// the winning score or the fallback.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
/// * `role_id` - The selected standard role ID
/// * `note` - The assignment note
///
/// # Errors
///
/// Returns an error if the employee does not exist or the update fails.
pub fn assign_employee_role(
    conn: &mut _,
    employee_id: i64,
    role_id: i64,
    note: &str,
) -> Result<(), PersistenceError> {
    debug!("Assigning role {} to employee {}", role_id, employee_id);

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::id.eq(employee_id))
        .set((
            employees::standard_role_id.eq(Some(role_id)),
            employees::ai_suggested_role_id.eq(Some(role_id)),
            employees::role_assignment_status.eq(AssignmentStatus::AiSuggested.as_str()),
            employees::assignment_notes.eq(Some(note)),
            employees::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }

    info!(employee_id, role_id, "Employee role assigned");
    Ok(())
}
}

backend_fn! {
/// Confirms an employee's suggested role assignment.
///
/// Only employees in the `ai_suggested` state can be approved.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns an error if the employee does not exist or has no suggested
/// assignment.
pub fn approve_employee_assignment(
    conn: &mut _,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Approving assignment for employee {}", employee_id);

    let stored_status: String = employees::table
        .filter(employees::id.eq(employee_id))
        .select(employees::role_assignment_status)
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EmployeeNotFound(employee_id))?;

    let current: AssignmentStatus = AssignmentStatus::from_str(&stored_status)?;
    if current != AssignmentStatus::AiSuggested {
        return Err(PersistenceError::AssignmentNotSuggested(employee_id));
    }

    diesel::update(employees::table)
        .filter(employees::id.eq(employee_id))
        .set((
            employees::role_assignment_status.eq(AssignmentStatus::Approved.as_str()),
            employees::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    info!(employee_id, "Employee assignment approved");
    Ok(())
}
}
