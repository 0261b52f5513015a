//! Teacher records: a person with a one-line listing.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::person::{Person, PersonDraft, LABEL_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teacher {
    #[serde(flatten)]
    person: Person,
}

impl Teacher {
    pub fn new(draft: PersonDraft) -> Result<Self> {
        Ok(Self {
            person: Person::new(draft)?,
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
}

/// One line: `Teacher:       Name | ID: 3 | Email: x@y.z`.
impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<LABEL_WIDTH$}{} | ID: {} | Email: {}",
            "Teacher:",
            self.person.name(),
            self.person.id(),
            self.person.email()
        )
    }
}
