//! lms-core: record engine for students, teachers and courses.
//!
//! The [`Registry`](registry::Registry) owns every record and exposes the
//! add/update/search/ranking operations. It never reads input or prints;
//! callers pass typed descriptors in and render the results they get back.

pub mod config;
pub mod course;
pub mod error;
pub mod person;
pub mod ranking;
pub mod registry;
pub mod roster;
pub mod student;
pub mod teacher;
pub mod traits;
pub mod validate;

pub use course::{Course, CourseDraft, CourseId, CourseUpdate};
pub use error::{LmsError, RecordKind, Result};
pub use person::{Person, PersonDraft, PersonUpdate};
pub use registry::{BulkOutcome, GpaReport, Registry, RegistryOptions};
pub use student::{Marks, Student};
pub use teacher::Teacher;
