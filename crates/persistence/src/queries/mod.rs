// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `sessions` — Upload session queries
//! - `roles` — Standard role queries
//! - `mappings` — Role mapping queries
//! - `employees` — Employee queries
//! - `summary` — Dashboard aggregation queries
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod employees;
pub mod mappings;
pub mod roles;
pub mod sessions;
pub mod summary;

// Re-export backend-specific query functions used by lib.rs
pub use employees::{
    get_employee_mysql, get_employee_sqlite, list_employees_mysql, list_employees_sqlite,
    list_unassigned_employees_mysql, list_unassigned_employees_sqlite,
};
pub use mappings::{
    get_role_mapping_mysql, get_role_mapping_sqlite, list_mappings_for_session_mysql,
    list_mappings_for_session_sqlite, list_review_queue_mysql, list_review_queue_sqlite,
    list_role_mappings_mysql, list_role_mappings_sqlite,
};
pub use roles::{
    get_standard_role_mysql, get_standard_role_sqlite, list_standard_roles_mysql,
    list_standard_roles_sqlite,
};
pub use sessions::{
    get_upload_session_mysql, get_upload_session_sqlite, list_upload_sessions_mysql,
    list_upload_sessions_sqlite,
};
pub use summary::{standardization_summary_mysql, standardization_summary_sqlite};
