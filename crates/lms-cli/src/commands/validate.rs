//! The `lms validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lms_core::roster::{parse_roster, validate_roster};

pub fn execute(roster_path: PathBuf) -> Result<()> {
    let roster = parse_roster(&roster_path)?;

    println!(
        "Roster: {} students, {} teachers, {} courses, {} enrollments, {} marks",
        roster.students.len(),
        roster.teachers.len(),
        roster.courses.len(),
        roster.enrollments.len(),
        roster.marks.len()
    );

    let warnings = validate_roster(&roster);
    for w in &warnings {
        println!("  [{} #{}] WARNING: {}", w.section, w.index + 1, w.message);
    }

    if warnings.is_empty() {
        println!("Roster valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
