//! Registry error types.
//!
//! Every failure the engine can report is a variant of [`LmsError`]. None of
//! them is fatal: the caller reports the error and keeps accepting commands.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::course::CourseId;

/// The kind of record an operation was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Student,
    Teacher,
    Course,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Student => write!(f, "student"),
            RecordKind::Teacher => write!(f, "teacher"),
            RecordKind::Course => write!(f, "course"),
        }
    }
}

/// Errors returned by registry operations and record constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LmsError {
    /// A name or email failed its structural check.
    #[error("invalid {field} '{value}': {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A record with this id already exists in its collection.
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: i32 },

    /// The target of an update, search or lookup does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    /// Enrolment named a student or course that does not exist.
    #[error("invalid student or course id (student {student_id}, course {course_id})")]
    InvalidReference {
        student_id: i32,
        course_id: CourseId,
        missing_student: bool,
        missing_course: bool,
    },

    /// A numeric value fell outside its allowed range.
    #[error("{field} {value} out of range ({min}-{max})")]
    Range {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// There is nothing to display or rank.
    #[error("no {kind}s")]
    Empty { kind: RecordKind },
}

impl LmsError {
    pub(crate) fn validation(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        LmsError::Validation {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: RecordKind, key: impl fmt::Display) -> Self {
        LmsError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Returns `true` for malformed input the user should simply re-enter.
    pub fn is_validation(&self) -> bool {
        matches!(self, LmsError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;
