// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()`
//! for `SQLite`).
//!
//! ## Module Organization
//!
//! - `sessions` — Upload session creation and lifecycle transitions
//! - `roles` — Standard role creation, edits, and soft-disabling
//! - `standardization` — The atomic roles-plus-mappings write
//! - `mappings` — Confidence rewrites and review decisions
//! - `employees` — Employee creation and role assignment
//! - `maintenance` — The transactional full-data wipe
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported
//! from the `backend` module. All other code uses Diesel DSL exclusively.

pub mod employees;
pub mod maintenance;
pub mod mappings;
pub mod roles;
pub mod sessions;
pub mod standardization;

// Re-export backend-specific mutation functions used by lib.rs
pub use employees::{
    approve_employee_assignment_mysql, approve_employee_assignment_sqlite,
    assign_employee_role_mysql, assign_employee_role_sqlite, insert_employee_mysql,
    insert_employee_sqlite,
};
pub use maintenance::{wipe_all_data_mysql, wipe_all_data_sqlite};
pub use mappings::{
    update_mapping_confidence_mysql, update_mapping_confidence_sqlite,
    update_mapping_status_mysql, update_mapping_status_sqlite,
};
pub use roles::{
    deactivate_standard_role_mysql, deactivate_standard_role_sqlite, insert_standard_role_mysql,
    insert_standard_role_sqlite, update_standard_role_mysql, update_standard_role_sqlite,
};
pub use sessions::{
    insert_upload_session_mysql, insert_upload_session_sqlite, set_session_error_mysql,
    set_session_error_sqlite, update_session_status_mysql, update_session_status_sqlite,
};
pub use standardization::{
    insert_standardization_result_mysql, insert_standardization_result_sqlite,
};
