// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.
//!
//! All tests run against isolated in-memory `SQLite` databases; the
//! MySQL/MariaDB backend is validated separately via `cargo xtask
//! test-mariadb`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod maintenance;
mod roles;
mod standardization;

use crate::{NewEmployee, NewRoleMapping, NewStandardRole, NewUploadSession, Persistence};
use rolemap_domain::SessionStatus;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_session(name: &str) -> NewUploadSession {
    NewUploadSession {
        session_name: name.to_string(),
        file_names: vec![String::from("roles.csv")],
        raw_data: Some(String::from(
            r#"[{"file_name":"roles.csv","headers":["Role Title","Department"],"rows":[["Network Engineer","Network Operations"]]}]"#,
        )),
        total_rows: 1,
        status: SessionStatus::Analyzing.as_str().to_string(),
        created_by: String::from("analyst-1"),
    }
}

pub fn create_test_role(title: &str, department: &str) -> NewStandardRole {
    NewStandardRole {
        role_title: title.to_string(),
        job_family: String::from("Technology"),
        role_level: String::from("Senior"),
        role_category: String::from("Technical"),
        department: department.to_string(),
        description: format!("Canonical {title} role"),
        required_skills: vec![String::from("RAN"), String::from("LTE")],
        experience_min_years: 3,
        experience_max_years: 8,
        created_by: String::from("analyst-1"),
    }
}

pub fn create_test_mapping(role_index: usize, original: &str, confidence: i32) -> NewRoleMapping {
    NewRoleMapping {
        role_index,
        original_title: original.to_string(),
        original_department: String::from("Network Operations"),
        original_level: String::from("Senior"),
        standardized_title: String::from("Network Engineer"),
        standardized_department: String::from("Network Operations"),
        standardized_level: String::from("Senior"),
        job_family: String::from("Technology"),
        confidence,
    }
}

pub fn create_test_employee(name: &str, position: &str, department: &str) -> NewEmployee {
    NewEmployee {
        employee_name: name.to_string(),
        current_position: position.to_string(),
        current_department: department.to_string(),
        current_level: String::from("Senior"),
        skills: vec![String::from("RAN"), String::from("LTE")],
    }
}

/// Inserts a session plus one standardized role with one mapping per
/// confidence value, returning the session id.
pub fn create_standardized_session(persistence: &mut Persistence, confidences: &[i32]) -> i64 {
    let session_id = persistence
        .insert_upload_session(&create_test_session("standardized"))
        .expect("session insert");
    let roles = vec![create_test_role("Network Engineer", "Network Operations")];
    let mappings: Vec<NewRoleMapping> = confidences
        .iter()
        .enumerate()
        .map(|(i, confidence)| create_test_mapping(0, &format!("Original Role {i}"), *confidence))
        .collect();
    persistence
        .insert_standardization_result(session_id, &roles, &mappings)
        .expect("standardization write");
    session_id
}
