// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested upload session was not found.
    SessionNotFound(i64),
    /// The requested standard role was not found.
    RoleNotFound(i64),
    /// The requested role mapping was not found.
    MappingNotFound(i64),
    /// The requested employee was not found.
    EmployeeNotFound(i64),
    /// A session status transition violated the lifecycle.
    InvalidStatusTransition { from: String, to: String },
    /// A mapping referenced a role index outside the inserted role set.
    InvalidRoleReference { index: usize, role_count: usize },
    /// A review decision was submitted for a mapping not in the queue.
    MappingNotAwaitingReview(i64),
    /// An approval was submitted for an employee with no suggested role.
    AssignmentNotSuggested(i64),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::SessionNotFound(id) => write!(f, "Upload session not found: {id}"),
            Self::RoleNotFound(id) => write!(f, "Standard role not found: {id}"),
            Self::MappingNotFound(id) => write!(f, "Role mapping not found: {id}"),
            Self::EmployeeNotFound(id) => write!(f, "Employee not found: {id}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid session status transition: {from} -> {to}")
            }
            Self::InvalidRoleReference { index, role_count } => {
                write!(
                    f,
                    "Mapping references role index {index} but only {role_count} roles were created"
                )
            }
            Self::MappingNotAwaitingReview(id) => {
                write!(f, "Role mapping {id} is not awaiting manual review")
            }
            Self::AssignmentNotSuggested(id) => {
                write!(
                    f,
                    "Employee {id} has no suggested role assignment to approve"
                )
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<rolemap_domain::DomainError> for PersistenceError {
    fn from(err: rolemap_domain::DomainError) -> Self {
        Self::Other(err.to_string())
    }
}
