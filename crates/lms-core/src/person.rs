//! Identity fields shared by students and teachers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::{validate_email, validate_name};

/// Width of the label column in the multi-line person block.
pub(crate) const LABEL_WIDTH: usize = 15;

/// Everything needed to create a student or teacher.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PersonDraft {
    pub name: String,
    pub id: i32,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl PersonDraft {
    pub fn new(
        name: impl Into<String>,
        id: i32,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for PersonDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonDraft")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Sparse replacement for a person's mutable fields.
///
/// `None` and empty strings both mean "keep the current value".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl PersonUpdate {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.password]
            .iter()
            .all(|v| non_empty(v).is_none())
    }
}

impl fmt::Debug for PersonUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A validated person record.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    id: i32,
    email: String,
    #[serde(skip_serializing)]
    password: String,
}

impl Person {
    /// Build a person, rejecting names that are not letters/spaces and
    /// malformed emails. The id is taken as given.
    pub fn new(draft: PersonDraft) -> Result<Self> {
        validate_name("name", &draft.name)?;
        validate_email(&draft.email)?;
        Ok(Self {
            name: draft.name,
            id: draft.id,
            email: draft.email,
            password: draft.password,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace every field the update supplies a non-empty value for.
    ///
    /// All replacements are checked before any is written, so a rejected
    /// update leaves the person untouched.
    pub fn apply(&mut self, update: &PersonUpdate) -> Result<()> {
        let name = non_empty(&update.name);
        let email = non_empty(&update.email);
        if let Some(name) = name {
            validate_name("name", name)?;
        }
        if let Some(email) = email {
            validate_email(email)?;
        }

        if let Some(name) = name {
            self.name = name.to_string();
        }
        if let Some(email) = email {
            self.email = email.to_string();
        }
        if let Some(password) = non_empty(&update.password) {
            self.password = password.to_string();
        }
        Ok(())
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Person")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<LABEL_WIDTH$}{}", "Name:", self.name)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "ID:", self.id)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "Email:", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LmsError;

    fn ada() -> Person {
        Person::new(PersonDraft::new("Ada", 1, "ada@uni.edu", "pw")).unwrap()
    }

    #[test]
    fn new_rejects_bad_name_and_email() {
        let err = Person::new(PersonDraft::new("Ada 2", 1, "ada@uni.edu", "")).unwrap_err();
        assert!(matches!(err, LmsError::Validation { field: "name", .. }));

        let err = Person::new(PersonDraft::new("Ada", 1, "ada.uni.edu", "")).unwrap_err();
        assert!(matches!(err, LmsError::Validation { field: "email", .. }));
    }

    #[test]
    fn ids_are_not_range_checked() {
        let p = Person::new(PersonDraft::new("Neg", -5, "n@x.io", "")).unwrap();
        assert_eq!(p.id(), -5);
    }

    #[test]
    fn apply_keeps_fields_given_empty_values() {
        let mut p = ada();
        p.apply(&PersonUpdate {
            name: Some(String::new()),
            email: None,
            password: Some("new".into()),
        })
        .unwrap();
        assert_eq!(p.name(), "Ada");
        assert_eq!(p.email(), "ada@uni.edu");
        assert_eq!(p.password(), "new");
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut p = ada();
        let err = p
            .apply(&PersonUpdate {
                name: Some("Grace".into()),
                email: Some("broken".into()),
                password: Some("x".into()),
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(p, ada());
    }

    #[test]
    fn debug_masks_password() {
        let dbg = format!("{:?}", ada());
        assert!(dbg.contains("***"));
        assert!(!dbg.contains("\"pw\""));
    }

    #[test]
    fn display_block() {
        let text = ada().to_string();
        assert_eq!(
            text,
            "Name:          Ada\nID:            1\nEmail:         ada@uni.edu\n"
        );
    }

    #[test]
    fn update_emptiness() {
        assert!(PersonUpdate::default().is_empty());
        assert!(PersonUpdate {
            name: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
        assert!(!PersonUpdate {
            password: Some("p".into()),
            ..Default::default()
        }
        .is_empty());
    }
}
