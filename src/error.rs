//! Structured error types for store operations.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    MissingRequiredField,
    InvalidFieldValue,
    InvalidDate,
    SelfDependency,

    // Not found errors
    TaskNotFound,
    ChecklistItemNotFound,
    DependencyNotFound,

    // Conflict errors
    DuplicateDependency,
    DependencyCycle,

    // Internal errors
    DatabaseError,
    InternalError,
}

/// The contract category an error code belongs to. Transport layers map
/// these onto their own status schemes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Conflict,
    Internal,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::MissingRequiredField
            | ErrorCode::InvalidFieldValue
            | ErrorCode::InvalidDate
            | ErrorCode::SelfDependency => ErrorKind::InvalidArgument,
            ErrorCode::TaskNotFound
            | ErrorCode::ChecklistItemNotFound
            | ErrorCode::DependencyNotFound => ErrorKind::NotFound,
            ErrorCode::DuplicateDependency | ErrorCode::DependencyCycle => ErrorKind::Conflict,
            ErrorCode::DatabaseError | ErrorCode::InternalError => ErrorKind::Internal,
        }
    }
}

/// Structured error for store operations.
#[derive(Debug, Serialize, Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl StoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn invalid_date(field: &str, raw: &str) -> Self {
        Self::new(
            ErrorCode::InvalidDate,
            format!("Unparsable date '{}'", raw),
        )
        .with_field(field)
    }

    pub fn task_not_found(task_id: i64) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {}", task_id),
        )
    }

    pub fn checklist_item_not_found(item_id: i64) -> Self {
        Self::new(
            ErrorCode::ChecklistItemNotFound,
            format!("Checklist item not found: {}", item_id),
        )
    }

    pub fn dependency_not_found(dependency_id: i64) -> Self {
        Self::new(
            ErrorCode::DependencyNotFound,
            format!("Dependency not found: {}", dependency_id),
        )
    }

    pub fn self_dependency(task_id: i64) -> Self {
        Self::new(
            ErrorCode::SelfDependency,
            format!("Task {} cannot depend on itself", task_id),
        )
    }

    pub fn duplicate_dependency(task_id: i64, depends_on_id: i64) -> Self {
        Self::new(
            ErrorCode::DuplicateDependency,
            format!("Dependency {} -> {} already exists", task_id, depends_on_id),
        )
    }

    pub fn dependency_cycle(task_id: i64, depends_on_id: i64) -> Self {
        Self::new(
            ErrorCode::DependencyCycle,
            format!(
                "Dependency {} -> {} would create a cycle",
                task_id, depends_on_id
            ),
        )
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::database(err)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
