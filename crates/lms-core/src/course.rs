//! Course records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::validate_name;

pub type CourseId = i32;

/// Fields required to create a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub id: CourseId,
    pub name: String,
    pub credit_hours: u32,
    /// Free-form reference; the registry does not check it.
    #[serde(default)]
    pub teacher_id: i32,
}

/// Sparse course update. `None`, an empty name and zero credits keep the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub credit_hours: Option<u32>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: CourseId,
    name: String,
    credit_hours: u32,
    teacher_id: i32,
}

impl Course {
    pub fn new(draft: CourseDraft) -> Result<Self> {
        validate_name("course name", &draft.name)?;
        Ok(Self {
            id: draft.id,
            name: draft.name,
            credit_hours: draft.credit_hours,
            teacher_id: draft.teacher_id,
        })
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credit_hours(&self) -> u32 {
        self.credit_hours
    }

    pub fn teacher_id(&self) -> i32 {
        self.teacher_id
    }

    /// Reassign the teacher without checking that it exists.
    pub fn set_teacher(&mut self, teacher_id: i32) {
        self.teacher_id = teacher_id;
    }

    pub fn apply(&mut self, update: &CourseUpdate) -> Result<()> {
        let name = update.name.as_deref().filter(|n| !n.is_empty());
        if let Some(name) = name {
            validate_name("course name", name)?;
            self.name = name.to_string();
        }
        if let Some(credits) = update.credit_hours.filter(|&c| c > 0) {
            self.credit_hours = credits;
        }
        if let Some(teacher_id) = update.teacher_id {
            self.teacher_id = teacher_id;
        }
        Ok(())
    }

    /// Column header matching the [`Display`](fmt::Display) row layout.
    pub fn header() -> String {
        format!(
            "{:<10}{:<25}{:<10}{}",
            "CourseID", "Name", "Credits", "TeacherID"
        )
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10}{:<25}{:<10}{}",
            self.id, self.name, self.credit_hours, self.teacher_id
        )
    }
}
