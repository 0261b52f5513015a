//! Structural checks applied to names and emails before a record is built.

use crate::error::{LmsError, Result};

/// Lowest and highest marks a student can hold for a course.
pub const MARKS_MIN: i32 = 0;
pub const MARKS_MAX: i32 = 100;

/// Returns `true` if `s` is non-empty and made only of letters and spaces.
pub fn is_alpha_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Returns `true` if `email` has an `@` after at least one character,
/// followed later by a `.` with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    let Some(at) = email.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let Some(dot) = email[at..].find('.').map(|i| at + i) else {
        return false;
    };
    dot > at + 1 && dot + 1 < email.len()
}

pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
    if is_alpha_name(value) {
        Ok(())
    } else {
        Err(LmsError::validation(
            field,
            value,
            "must be non-empty and contain only letters and spaces",
        ))
    }
}

pub fn validate_email(value: &str) -> Result<()> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(LmsError::validation(
            "email",
            value,
            "expected something like user@example.com",
        ))
    }
}

/// Check that `marks` lies in `MARKS_MIN..=MARKS_MAX` and narrow it.
pub fn validate_marks(marks: i32) -> Result<u8> {
    u8::try_from(marks)
        .ok()
        .filter(|&m| i32::from(m) <= MARKS_MAX)
        .ok_or_else(|| LmsError::Range {
            field: "marks",
            value: marks.into(),
            min: MARKS_MIN.into(),
            max: MARKS_MAX.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_names() {
        assert!(is_alpha_name("Ada Lovelace"));
        assert!(is_alpha_name("Zoë"));
        assert!(!is_alpha_name(""));
        assert!(is_alpha_name("   "));
        assert!(!is_alpha_name("R2D2"));
        assert!(!is_alpha_name("O'Brien"));
    }

    #[test]
    fn email_structure() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@uni.edu"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@bc"));
        assert!(!is_valid_email("a.b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn marks_bounds() {
        assert_eq!(validate_marks(0).unwrap(), 0);
        assert_eq!(validate_marks(100).unwrap(), 100);
        assert!(matches!(
            validate_marks(101),
            Err(LmsError::Range { value: 101, .. })
        ));
        assert!(matches!(
            validate_marks(-1),
            Err(LmsError::Range { value: -1, .. })
        ));
        assert!(validate_marks(255).is_err());
        assert!(validate_marks(256).is_err());
    }

    #[test]
    fn name_error_carries_field() {
        let err = validate_name("course name", "C++").unwrap_err();
        assert!(matches!(
            err,
            LmsError::Validation {
                field: "course name",
                ..
            }
        ));
    }
}
