//! TOML roster import.
//!
//! A roster seeds a registry with teachers, courses, students, enrolments
//! and marks in one go. Import goes through the regular registry operations,
//! so a roster can never put the registry into a state commands could not.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::course::{CourseDraft, CourseId};
use crate::person::PersonDraft;
use crate::registry::{BulkOutcome, Registry};
use crate::validate::{is_alpha_name, is_valid_email, MARKS_MAX, MARKS_MIN};

/// Intermediate TOML structure for roster files.
#[derive(Debug, Deserialize)]
struct TomlRoster {
    #[serde(default)]
    students: Vec<TomlPerson>,
    #[serde(default)]
    teachers: Vec<TomlPerson>,
    #[serde(default)]
    courses: Vec<TomlCourse>,
    #[serde(default)]
    enrollments: Vec<TomlEnrollment>,
    #[serde(default)]
    marks: Vec<TomlMarks>,
}

#[derive(Debug, Deserialize)]
struct TomlPerson {
    name: String,
    id: i32,
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    id: CourseId,
    name: String,
    credit_hours: u32,
    #[serde(default)]
    teacher_id: i32,
}

#[derive(Debug, Deserialize)]
struct TomlEnrollment {
    student_id: i32,
    course_id: CourseId,
}

#[derive(Debug, Deserialize)]
struct TomlMarks {
    student_id: i32,
    course_id: CourseId,
    marks: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enrollment {
    pub student_id: i32,
    pub course_id: CourseId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarksEntry {
    pub student_id: i32,
    pub course_id: CourseId,
    pub marks: i32,
}

/// A parsed roster, not yet applied to any registry.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub students: Vec<PersonDraft>,
    pub teachers: Vec<PersonDraft>,
    pub courses: Vec<CourseDraft>,
    pub enrollments: Vec<Enrollment>,
    pub marks: Vec<MarksEntry>,
}

/// Per-section results of [`Roster::apply`].
#[derive(Debug, Default)]
pub struct RosterSummary {
    pub teachers: BulkOutcome,
    pub courses: BulkOutcome,
    pub students: BulkOutcome,
    pub enrollments: BulkOutcome,
    pub marks: BulkOutcome,
}

impl RosterSummary {
    pub fn sections(&self) -> [(&'static str, &BulkOutcome); 5] {
        [
            ("teachers", &self.teachers),
            ("courses", &self.courses),
            ("students", &self.students),
            ("enrollments", &self.enrollments),
            ("marks", &self.marks),
        ]
    }

    pub fn rejected(&self) -> usize {
        self.sections().iter().map(|(_, o)| o.failures.len()).sum()
    }
}

impl Roster {
    /// Feed the roster through the registry: teachers, courses, students,
    /// then enrolments and marks. Rejected entries are collected, never fatal.
    pub fn apply(&self, registry: &mut Registry) -> RosterSummary {
        let teachers = registry.bulk_add_teachers(self.teachers.iter().cloned());
        let courses = registry.bulk_add_courses(self.courses.iter().cloned());
        let students = registry.bulk_add_students(self.students.iter().cloned());

        let mut enrollments = BulkOutcome::default();
        for (i, e) in self.enrollments.iter().enumerate() {
            match registry.enroll_student_in_course(e.student_id, e.course_id) {
                Ok(()) => enrollments.added += 1,
                Err(err) => enrollments.failures.push((i, err)),
            }
        }

        let mut marks = BulkOutcome::default();
        for (i, m) in self.marks.iter().enumerate() {
            match registry.set_student_marks(m.student_id, m.course_id, m.marks) {
                Ok(()) => marks.added += 1,
                Err(err) => marks.failures.push((i, err)),
            }
        }

        let summary = RosterSummary {
            teachers,
            courses,
            students,
            enrollments,
            marks,
        };
        tracing::info!("roster applied, {} entries rejected", summary.rejected());
        summary
    }
}

/// Parse a roster file.
pub fn parse_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, path)
}

/// Parse a TOML string into a `Roster` (useful for testing).
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<Roster> {
    let parsed: TomlRoster = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let person = |p: TomlPerson| PersonDraft {
        name: p.name,
        id: p.id,
        email: p.email,
        password: p.password,
    };

    Ok(Roster {
        students: parsed.students.into_iter().map(person).collect(),
        teachers: parsed.teachers.into_iter().map(person).collect(),
        courses: parsed
            .courses
            .into_iter()
            .map(|c| CourseDraft {
                id: c.id,
                name: c.name,
                credit_hours: c.credit_hours,
                teacher_id: c.teacher_id,
            })
            .collect(),
        enrollments: parsed
            .enrollments
            .into_iter()
            .map(|e| Enrollment {
                student_id: e.student_id,
                course_id: e.course_id,
            })
            .collect(),
        marks: parsed
            .marks
            .into_iter()
            .map(|m| MarksEntry {
                student_id: m.student_id,
                course_id: m.course_id,
                marks: m.marks,
            })
            .collect(),
    })
}

/// A warning from roster validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterWarning {
    /// Roster section, e.g. `"students"`.
    pub section: &'static str,
    /// 0-based position within the section.
    pub index: usize,
    pub message: String,
}

/// Check a roster for entries the registry would reject or quietly accept
/// in a surprising way.
pub fn validate_roster(roster: &Roster) -> Vec<RosterWarning> {
    let mut warnings = Vec::new();
    let mut warn = |section: &'static str, index: usize, message: String| {
        warnings.push(RosterWarning {
            section,
            index,
            message,
        })
    };

    for (section, people) in [("students", &roster.students), ("teachers", &roster.teachers)] {
        let mut seen = HashSet::new();
        for (i, p) in people.iter().enumerate() {
            if !is_alpha_name(&p.name) {
                warn(section, i, format!("name '{}' must be letters and spaces", p.name));
            }
            if !is_valid_email(&p.email) {
                warn(section, i, format!("invalid email '{}'", p.email));
            }
            if !seen.insert(p.id) {
                warn(section, i, format!("duplicate id {}", p.id));
            }
        }
    }

    let student_ids: HashSet<i32> = roster.students.iter().map(|s| s.id).collect();
    let teacher_ids: HashSet<i32> = roster.teachers.iter().map(|t| t.id).collect();
    let course_ids: HashSet<CourseId> = roster.courses.iter().map(|c| c.id).collect();

    let mut seen_courses = HashSet::new();
    for (i, c) in roster.courses.iter().enumerate() {
        if !is_alpha_name(&c.name) {
            warn("courses", i, format!("course name '{}' must be letters and spaces", c.name));
        }
        if !seen_courses.insert(c.id) {
            warn("courses", i, format!("course id {} appears more than once", c.id));
        }
        // 0 is the unassigned teacher an omitted `teacher_id` deserializes to.
        if c.teacher_id != 0 && !teacher_ids.contains(&c.teacher_id) {
            warn("courses", i, format!("teacher {} is not in this roster", c.teacher_id));
        }
    }

    for (i, e) in roster.enrollments.iter().enumerate() {
        if !student_ids.contains(&e.student_id) {
            warn("enrollments", i, format!("student {} is not in this roster", e.student_id));
        }
        if !course_ids.contains(&e.course_id) {
            warn("enrollments", i, format!("course {} is not in this roster", e.course_id));
        }
    }

    for (i, m) in roster.marks.iter().enumerate() {
        if !(MARKS_MIN..=MARKS_MAX).contains(&m.marks) {
            warn("marks", i, format!("marks {} outside {MARKS_MIN}-{MARKS_MAX}", m.marks));
        }
        if !student_ids.contains(&m.student_id) {
            warn("marks", i, format!("student {} is not in this roster", m.student_id));
        }
    }

    warnings
}
