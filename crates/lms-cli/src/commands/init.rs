//! The `lms init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lms.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("roster.toml"), EXAMPLE_ROSTER)?;

    println!("\nNext steps:");
    println!("  1. Edit roster.toml with your students, teachers and courses");
    println!("  2. Run: lms validate --roster roster.toml");
    println!("  3. Run: lms shell");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lms configuration

prompt = "lms> "
gpa_precision = 2

# Reject a course whose id is already in use.
unique_course_ids = false

# Imported at the start of every session.
roster = "roster.toml"

# Print each script line before running it.
echo_commands = false
"#;

const EXAMPLE_ROSTER: &str = r#"[[teachers]]
name = "Grace Hopper"
id = 100
email = "grace@example.edu"

[[courses]]
id = 10
name = "Compilers"
credit_hours = 3
teacher_id = 100

[[courses]]
id = 11
name = "Discrete Mathematics"
credit_hours = 4
teacher_id = 100

[[students]]
name = "Ada Lovelace"
id = 1
email = "ada@example.edu"
password = "change me"

[[students]]
name = "Alan Turing"
id = 2
email = "alan@example.edu"

[[enrollments]]
student_id = 1
course_id = 10

[[enrollments]]
student_id = 2
course_id = 11

[[marks]]
student_id = 1
course_id = 10
marks = 92

[[marks]]
student_id = 2
course_id = 11
marks = 85
"#;
