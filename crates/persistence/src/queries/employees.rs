// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.
//!
//! This module contains backend-agnostic queries for retrieving employees.
//! All queries use Diesel DSL and work across all supported database
//! backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{EmployeeData, decode_string_list};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeRow {
    pub(crate) id: i64,
    pub(crate) employee_name: String,
    pub(crate) current_position: String,
    pub(crate) current_department: String,
    pub(crate) current_level: String,
    pub(crate) skills: String,
    pub(crate) standard_role_id: Option<i64>,
    pub(crate) ai_suggested_role_id: Option<i64>,
    pub(crate) role_assignment_status: String,
    pub(crate) assignment_notes: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<EmployeeRow> for EmployeeData {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            employee_name: row.employee_name,
            current_position: row.current_position,
            current_department: row.current_department,
            current_level: row.current_level,
            skills: decode_string_list(&row.skills),
            standard_role_id: row.standard_role_id,
            ai_suggested_role_id: row.ai_suggested_role_id,
            role_assignment_status: row.role_assignment_status,
            assignment_notes: row.assignment_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

backend_fn! {
/// Retrieves an employee by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!("Looking up employee by ID: {}", employee_id);

    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all employees in id order.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(conn: &mut _) -> Result<Vec<EmployeeData>, PersistenceError> {
    debug!("Listing all employees");

    let rows: Vec<EmployeeRow> = employees::table
        .select(EmployeeRow::as_select())
        .order_by(employees::id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}

backend_fn! {
/// Lists the employees with no assigned standard role.
///
/// This is exactly the population an Assignment Matcher run processes:
/// an employee with a non-null `standard_role_id` is never rescored.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_unassigned_employees(conn: &mut _) -> Result<Vec<EmployeeData>, PersistenceError> {
    debug!("Listing unassigned employees");

    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::standard_role_id.is_null())
        .select(EmployeeRow::as_select())
        .order_by(employees::id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
}
