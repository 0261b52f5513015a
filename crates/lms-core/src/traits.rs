//! The seam shared by students and teachers.
//!
//! Both are a [`Person`] with a role-specific rendering. The registry adds,
//! finds and updates either collection through this one trait.

use crate::error::{RecordKind, Result};
use crate::person::{Person, PersonDraft};
use crate::student::Student;
use crate::teacher::Teacher;

pub trait Member: Sized {
    /// Which collection this member lives in, for error messages.
    const KIND: RecordKind;

    /// Validate a draft and build the member.
    fn from_draft(draft: PersonDraft) -> Result<Self>;

    fn person(&self) -> &Person;

    fn person_mut(&mut self) -> &mut Person;

    fn member_id(&self) -> i32 {
        self.person().id()
    }
}

impl Member for Student {
    const KIND: RecordKind = RecordKind::Student;

    fn from_draft(draft: PersonDraft) -> Result<Self> {
        Student::new(draft)
    }

    fn person(&self) -> &Person {
        Student::person(self)
    }

    fn person_mut(&mut self) -> &mut Person {
        Student::person_mut(self)
    }
}

impl Member for Teacher {
    const KIND: RecordKind = RecordKind::Teacher;

    fn from_draft(draft: PersonDraft) -> Result<Self> {
        Teacher::new(draft)
    }

    fn person(&self) -> &Person {
        Teacher::person(self)
    }

    fn person_mut(&mut self) -> &mut Person {
        Teacher::person_mut(self)
    }
}
