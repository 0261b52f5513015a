//! Student records: a person plus per-course marks and GPA.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::course::CourseId;
use crate::error::Result;
use crate::person::{Person, PersonDraft, LABEL_WIDTH};

/// Marks for one course, always within 0..=100.
pub type Marks = u8;

/// Divides a 0-100 weighted mark down to the 0.0-4.0 GPA scale.
pub const GPA_DIVISOR: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    #[serde(flatten)]
    person: Person,
    course_marks: BTreeMap<CourseId, Marks>,
}

impl Student {
    pub fn new(draft: PersonDraft) -> Result<Self> {
        Ok(Self {
            person: Person::new(draft)?,
            course_marks: BTreeMap::new(),
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn id(&self) -> i32 {
        self.person.id()
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn course_marks(&self) -> &BTreeMap<CourseId, Marks> {
        &self.course_marks
    }

    /// Enrol in a course with marks 0. Enrolling again resets the marks.
    pub fn enroll_course(&mut self, course_id: CourseId) {
        self.course_marks.insert(course_id, 0);
    }

    /// Overwrite the marks for a course, enrolling if needed.
    pub fn set_marks(&mut self, course_id: CourseId, marks: Marks) {
        self.course_marks.insert(course_id, marks);
    }

    /// Marks for a course, or `None` if not enrolled.
    pub fn marks(&self, course_id: CourseId) -> Option<Marks> {
        self.course_marks.get(&course_id).copied()
    }

    /// Credit-weighted average of marks, scaled to 0.0-4.0.
    ///
    /// Only courses present in both the marks map and `course_credits`
    /// count. Returns 0.0 when no credited course remains.
    pub fn calculate_gpa(&self, course_credits: &BTreeMap<CourseId, u32>) -> f64 {
        let (points, credits) = self
            .course_marks
            .iter()
            .filter_map(|(cid, &marks)| course_credits.get(cid).map(|&cr| (marks, cr)))
            .fold((0.0f64, 0u64), |(points, credits), (marks, cr)| {
                (points + f64::from(marks) * f64::from(cr), credits + u64::from(cr))
            });

        if credits == 0 {
            return 0.0;
        }
        points / credits as f64 / GPA_DIVISOR
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.person)?;
        write!(f, "{:<LABEL_WIDTH$}", "Courses:")?;
        if self.course_marks.is_empty() {
            return writeln!(f, "None");
        }
        writeln!(f)?;
        writeln!(f, "{:<10}{}", "CourseID", "Marks")?;
        writeln!(f, "{}", "-".repeat(22))?;
        for (cid, marks) in &self.course_marks {
            writeln!(f, "{:<10}{}", cid, marks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new(PersonDraft::new("Alan", 7, "alan@uni.edu", "")).unwrap()
    }

    fn credits(pairs: &[(CourseId, u32)]) -> BTreeMap<CourseId, u32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn gpa_single_course() {
        let mut s = student();
        s.set_marks(101, 80);
        let gpa = s.calculate_gpa(&credits(&[(101, 3)]));
        assert!((gpa - 3.2).abs() < 1e-9, "expected 3.20, got {gpa}");
    }

    #[test]
    fn gpa_weights_by_credits() {
        let mut s = student();
        s.set_marks(1, 100);
        s.set_marks(2, 50);
        // (100*3 + 50*1) / 4 / 25 = 3.5
        let gpa = s.calculate_gpa(&credits(&[(1, 3), (2, 1)]));
        assert!((gpa - 3.5).abs() < 1e-9, "got {gpa}");
    }

    #[test]
    fn gpa_zero_without_credited_courses() {
        let mut s = student();
        assert_eq!(s.calculate_gpa(&credits(&[(1, 3)])), 0.0);

        s.set_marks(99, 90);
        assert_eq!(s.calculate_gpa(&credits(&[(1, 3)])), 0.0);
        assert_eq!(s.calculate_gpa(&credits(&[(99, 0)])), 0.0);
    }

    #[test]
    fn reenrol_resets_marks() {
        let mut s = student();
        s.set_marks(5, 88);
        s.enroll_course(5);
        assert_eq!(s.marks(5), Some(0));
    }

    #[test]
    fn marks_absent_when_not_enrolled() {
        let mut s = student();
        assert_eq!(s.marks(5), None);
        s.set_marks(5, 40);
        assert_eq!(s.marks(5), Some(40));
    }

    #[test]
    fn display_lists_courses() {
        let mut s = student();
        assert!(s.to_string().ends_with("Courses:       None\n"));

        s.set_marks(12, 75);
        let text = s.to_string();
        assert!(text.contains("CourseID  Marks"));
        assert!(text.contains("CourseID  Marks\n"));
        assert!(text.ends_with("12        75\n"));
    }

    #[test]
    fn serializes_without_password() {
        let json = serde_json::to_value(student()).unwrap();
        assert_eq!(json["name"], "Alan");
        assert_eq!(json["id"], 7);
        assert!(json.get("password").is_none());
    }
}
