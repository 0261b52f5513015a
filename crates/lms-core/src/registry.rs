//! The record engine.
//!
//! [`Registry`] owns every student, teacher and course, plus the credit
//! index used for GPA. Each operation either completes or returns an
//! [`LmsError`] without touching any collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::course::{Course, CourseDraft, CourseId, CourseUpdate};
use crate::error::{LmsError, RecordKind, Result};
use crate::person::{PersonDraft, PersonUpdate};
use crate::ranking::{rank_descending, RankEntry};
use crate::student::{Marks, Student};
use crate::teacher::Teacher;
use crate::traits::Member;
use crate::validate::validate_marks;

/// Behaviour switches for a [`Registry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Reject a course whose id is already taken. Off by default: course
    /// ids have always been accepted as given.
    pub unique_course_ids: bool,
}

/// Result of a bulk add. Every draft is attempted; failures are collected
/// with their 0-based position in the batch.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub added: usize,
    pub failures: Vec<(usize, LmsError)>,
}

/// A student's GPA on the 0.0-4.0 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaReport {
    pub student_id: i32,
    pub name: String,
    pub gpa: f64,
}

#[derive(Debug, Default)]
pub struct Registry {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    /// Course id -> credit hours, rewritten on every course add/update.
    course_credits: BTreeMap<CourseId, u32>,
    options: RegistryOptions,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    pub fn add_student(&mut self, draft: PersonDraft) -> Result<()> {
        let id = draft.id;
        let result = add_member(&mut self.students, draft);
        trace_outcome("add_student", id, &result);
        result
    }

    pub fn bulk_add_students<I>(&mut self, drafts: I) -> BulkOutcome
    where
        I: IntoIterator<Item = PersonDraft>,
    {
        let outcome = bulk(drafts, |d| self.add_student(d));
        tracing::info!(
            "bulk student add: {} added, {} rejected",
            outcome.added,
            outcome.failures.len()
        );
        outcome
    }

    /// All students in insertion order.
    pub fn view_students(&self) -> Result<&[Student]> {
        non_empty(&self.students, RecordKind::Student)
    }

    /// Find students by id or by case-insensitive exact name.
    ///
    /// An all-digit key is also tried as an id. Id matches come first, then
    /// name matches; a student matching both ways is returned twice.
    pub fn search_student(&self, key: &str) -> Result<Vec<&Student>> {
        let mut found = Vec::new();

        let is_id = !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit());
        if is_id {
            // A key too long for an i32 cannot name any id.
            if let Ok(id) = key.parse::<i32>() {
                found.extend(self.students.iter().filter(|s| s.id() == id));
            }
        }

        let key_lower = key.to_lowercase();
        found.extend(
            self.students
                .iter()
                .filter(|s| s.name().to_lowercase() == key_lower),
        );

        if found.is_empty() {
            return Err(LmsError::not_found(RecordKind::Student, key));
        }
        Ok(found)
    }

    /// Case-insensitive substring search on student names.
    pub fn search_student_partial(&self, fragment: &str) -> Result<Vec<&Student>> {
        let fragment_lower = fragment.to_lowercase();
        let found: Vec<_> = self
            .students
            .iter()
            .filter(|s| s.name().to_lowercase().contains(&fragment_lower))
            .collect();
        if found.is_empty() {
            return Err(LmsError::not_found(RecordKind::Student, fragment));
        }
        Ok(found)
    }

    pub fn update_student(&mut self, id: i32, update: &PersonUpdate) -> Result<()> {
        let result = update_member(&mut self.students, id, update);
        trace_outcome("update_student", id, &result);
        result
    }

    /// Enrol a student with marks 0, resetting any marks already held.
    ///
    /// Both the student and the course must exist.
    pub fn enroll_student_in_course(&mut self, student_id: i32, course_id: CourseId) -> Result<()> {
        let course_exists = self.courses.iter().any(|c| c.id() == course_id);
        let student = self.students.iter_mut().find(|s| s.id() == student_id);

        let result = match (student, course_exists) {
            (Some(student), true) => {
                student.enroll_course(course_id);
                Ok(())
            }
            (student, course_exists) => Err(LmsError::InvalidReference {
                student_id,
                course_id,
                missing_student: student.is_none(),
                missing_course: !course_exists,
            }),
        };
        trace_outcome("enroll_student_in_course", student_id, &result);
        result
    }

    pub fn student(&self, id: i32) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    // -----------------------------------------------------------------------
    // Teachers
    // -----------------------------------------------------------------------

    pub fn add_teacher(&mut self, draft: PersonDraft) -> Result<()> {
        let id = draft.id;
        let result = add_member(&mut self.teachers, draft);
        trace_outcome("add_teacher", id, &result);
        result
    }

    pub fn bulk_add_teachers<I>(&mut self, drafts: I) -> BulkOutcome
    where
        I: IntoIterator<Item = PersonDraft>,
    {
        let outcome = bulk(drafts, |d| self.add_teacher(d));
        tracing::info!(
            "bulk teacher add: {} added, {} rejected",
            outcome.added,
            outcome.failures.len()
        );
        outcome
    }

    pub fn view_teachers(&self) -> Result<&[Teacher]> {
        non_empty(&self.teachers, RecordKind::Teacher)
    }

    pub fn update_teacher(&mut self, id: i32, update: &PersonUpdate) -> Result<()> {
        let result = update_member(&mut self.teachers, id, update);
        trace_outcome("update_teacher", id, &result);
        result
    }

    pub fn teacher(&self, id: i32) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id() == id)
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    // -----------------------------------------------------------------------
    // Courses
    // -----------------------------------------------------------------------

    /// Append a course and record its credit hours in the credit index.
    ///
    /// The teacher id is not checked. Duplicate course ids are accepted
    /// unless [`RegistryOptions::unique_course_ids`] is set; the credit
    /// index then holds the credits of the latest course with that id.
    pub fn add_course(&mut self, draft: CourseDraft) -> Result<()> {
        let id = draft.id;
        let result = Course::new(draft).and_then(|course| {
            if self.options.unique_course_ids && self.course(course.id()).is_some() {
                return Err(LmsError::DuplicateId {
                    kind: RecordKind::Course,
                    id: course.id(),
                });
            }
            self.course_credits.insert(course.id(), course.credit_hours());
            self.courses.push(course);
            Ok(())
        });
        trace_outcome("add_course", id, &result);
        result
    }

    pub fn bulk_add_courses<I>(&mut self, drafts: I) -> BulkOutcome
    where
        I: IntoIterator<Item = CourseDraft>,
    {
        let outcome = bulk(drafts, |d| self.add_course(d));
        tracing::info!(
            "bulk course add: {} added, {} rejected",
            outcome.added,
            outcome.failures.len()
        );
        outcome
    }

    pub fn view_courses(&self) -> Result<&[Course]> {
        non_empty(&self.courses, RecordKind::Course)
    }

    /// Update the first course with this id and re-sync its credits.
    pub fn update_course(&mut self, id: CourseId, update: &CourseUpdate) -> Result<()> {
        let result = match self.courses.iter_mut().find(|c| c.id() == id) {
            Some(course) => course.apply(update).map(|()| {
                self.course_credits.insert(course.id(), course.credit_hours());
            }),
            None => Err(LmsError::not_found(RecordKind::Course, id)),
        };
        trace_outcome("update_course", id, &result);
        result
    }

    /// Point a course at another teacher. The teacher id is not checked.
    pub fn assign_teacher(&mut self, course_id: CourseId, teacher_id: i32) -> Result<()> {
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id() == course_id)
            .ok_or_else(|| LmsError::not_found(RecordKind::Course, course_id))?;
        course.set_teacher(teacher_id);
        tracing::debug!("course {course_id} assigned to teacher {teacher_id}");
        Ok(())
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_credits(&self) -> &BTreeMap<CourseId, u32> {
        &self.course_credits
    }

    // -----------------------------------------------------------------------
    // Marks, GPA and rankings
    // -----------------------------------------------------------------------

    /// Overwrite a student's marks for a course.
    ///
    /// Marks are range-checked before the student is looked up. The course
    /// is not required to exist.
    pub fn set_student_marks(&mut self, student_id: i32, course_id: CourseId, marks: i32) -> Result<()> {
        let result = validate_marks(marks).and_then(|marks| {
            let student = self
                .students
                .iter_mut()
                .find(|s| s.id() == student_id)
                .ok_or_else(|| LmsError::not_found(RecordKind::Student, student_id))?;
            student.set_marks(course_id, marks);
            Ok(())
        });
        trace_outcome("set_student_marks", student_id, &result);
        result
    }

    pub fn student_gpa(&self, student_id: i32) -> Result<GpaReport> {
        let student = self
            .student(student_id)
            .ok_or_else(|| LmsError::not_found(RecordKind::Student, student_id))?;
        Ok(GpaReport {
            student_id,
            name: student.name().to_string(),
            gpa: student.calculate_gpa(&self.course_credits),
        })
    }

    /// Rank the students holding marks for a course, best first.
    pub fn rank_students_in_course(&self, course_id: CourseId) -> Result<Vec<RankEntry<Marks>>> {
        let rows: Vec<_> = self
            .students
            .iter()
            .filter_map(|s| {
                s.marks(course_id)
                    .map(|m| (s.id(), s.name().to_string(), m))
            })
            .collect();
        if rows.is_empty() {
            return Err(LmsError::Empty {
                kind: RecordKind::Student,
            });
        }
        Ok(rank_descending(rows))
    }

    /// Rank every student by GPA, best first. Students without credited
    /// courses rank with GPA 0. No students gives an empty ranking.
    pub fn rank_all_students_by_gpa(&self) -> Vec<RankEntry<f64>> {
        let rows = self
            .students
            .iter()
            .map(|s| {
                (
                    s.id(),
                    s.name().to_string(),
                    s.calculate_gpa(&self.course_credits),
                )
            })
            .collect();
        rank_descending(rows)
    }
}

fn add_member<M: Member>(members: &mut Vec<M>, draft: PersonDraft) -> Result<()> {
    let member = M::from_draft(draft)?;
    let id = member.member_id();
    if members.iter().any(|m| m.member_id() == id) {
        return Err(LmsError::DuplicateId { kind: M::KIND, id });
    }
    members.push(member);
    Ok(())
}

fn update_member<M: Member>(members: &mut [M], id: i32, update: &PersonUpdate) -> Result<()> {
    let member = members
        .iter_mut()
        .find(|m| m.member_id() == id)
        .ok_or_else(|| LmsError::not_found(M::KIND, id))?;
    member.person_mut().apply(update)
}

fn non_empty<T>(items: &[T], kind: RecordKind) -> Result<&[T]> {
    if items.is_empty() {
        return Err(LmsError::Empty { kind });
    }
    Ok(items)
}

fn bulk<D>(drafts: impl IntoIterator<Item = D>, mut add: impl FnMut(D) -> Result<()>) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for (index, draft) in drafts.into_iter().enumerate() {
        match add(draft) {
            Ok(()) => outcome.added += 1,
            Err(e) => outcome.failures.push((index, e)),
        }
    }
    outcome
}

fn trace_outcome<T>(op: &str, id: i32, result: &Result<T>) {
    match result {
        Ok(_) => tracing::debug!("{op} {id}: ok"),
        Err(e) => tracing::debug!("{op} {id}: rejected: {e}"),
    }
}
