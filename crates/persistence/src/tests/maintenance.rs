// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_standardized_session, create_test_employee, create_test_persistence, create_test_role,
};

#[test]
fn test_summary_counts() {
    let mut persistence = create_test_persistence();
    create_standardized_session(&mut persistence, &[95, 60]);
    let role_id = persistence
        .insert_standard_role(&create_test_role("HR Specialist", "People"))
        .unwrap();
    let retired = persistence
        .insert_standard_role(&create_test_role("Fax Operator", "Office Services"))
        .unwrap();
    persistence.deactivate_standard_role(retired).unwrap();

    let assigned = persistence
        .insert_employee(&create_test_employee("A", "HR Officer", "People"))
        .unwrap();
    persistence
        .insert_employee(&create_test_employee("B", "Analyst", "Finance"))
        .unwrap();
    persistence
        .assign_employee_role(assigned, role_id, "matched with score 0.40")
        .unwrap();

    let summary = persistence.standardization_summary().unwrap();
    assert_eq!(summary.total_sessions, 1);
    assert_eq!(summary.completed_sessions, 0);
    assert_eq!(summary.error_sessions, 0);
    // One from the standardization run, one manual, one deactivated.
    assert_eq!(summary.active_roles, 2);
    assert_eq!(summary.total_mappings, 2);
    assert_eq!(summary.mappings_needing_review, 1);
    assert_eq!(summary.total_employees, 2);
    assert_eq!(summary.assigned_employees, 1);
    assert_eq!(summary.unassigned_employees, 1);
}

#[test]
fn test_wipe_clears_everything_and_reports_counts() {
    let mut persistence = create_test_persistence();
    create_standardized_session(&mut persistence, &[95, 60, 40]);
    let role_id = persistence
        .insert_standard_role(&create_test_role("HR Specialist", "People"))
        .unwrap();
    let employee_id = persistence
        .insert_employee(&create_test_employee("A", "HR Officer", "People"))
        .unwrap();
    persistence
        .assign_employee_role(employee_id, role_id, "matched with score 0.40")
        .unwrap();

    let outcome = persistence.wipe_all_data().unwrap();
    assert_eq!(outcome.mappings_deleted, 3);
    assert_eq!(outcome.employees_cleared, 1);
    assert_eq!(outcome.roles_deleted, 2);
    assert_eq!(outcome.sessions_deleted, 1);

    assert!(persistence.list_role_mappings().unwrap().is_empty());
    assert!(persistence.list_standard_roles(true).unwrap().is_empty());
    assert!(persistence.list_upload_sessions().unwrap().is_empty());

    // Employees survive the wipe with their role references cleared.
    let employee = persistence.get_employee(employee_id).unwrap().unwrap();
    assert!(employee.standard_role_id.is_none());
    assert!(employee.ai_suggested_role_id.is_none());
    assert_eq!(employee.role_assignment_status, "pending");
    assert!(employee.assignment_notes.is_none());
}

#[test]
fn test_wipe_on_empty_database() {
    let mut persistence = create_test_persistence();

    let outcome = persistence.wipe_all_data().unwrap();
    assert_eq!(outcome.mappings_deleted, 0);
    assert_eq!(outcome.employees_cleared, 0);
    assert_eq!(outcome.roles_deleted, 0);
    assert_eq!(outcome.sessions_deleted, 0);
}
