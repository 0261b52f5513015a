//! Shell line grammar.
//!
//! A line is split into words the way a POSIX shell would for simple cases
//! (quotes and backslashes) and then parsed by clap like a command line.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// One parsed shell line.
#[derive(Debug, Parser)]
#[command(
    name = "lms",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{all-args}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines
    #[default]
    Text,
    /// Bordered table
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Args)]
pub struct FormatArg {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct PersonArgs {
    /// Letters and spaces only
    #[arg(long)]
    pub name: String,

    #[arg(long, allow_negative_numbers = true)]
    pub id: i32,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct PersonUpdateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub id: i32,

    /// New name (omit to keep)
    #[arg(long)]
    pub name: Option<String>,

    /// New email (omit to keep)
    #[arg(long)]
    pub email: Option<String>,

    /// New password (omit to keep)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// One record per value, fields separated by '|'
    #[arg(long = "entry", required = true, num_args = 1..)]
    pub entries: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Add one student
    AddStudent(PersonArgs),

    /// Add several students: --entry "name|id|email|password" ...
    BulkAddStudents(BulkArgs),

    /// List all students
    ViewStudents(FormatArg),

    /// Find students by id or exact name (case-insensitive)
    SearchStudent {
        /// Student id or full name
        key: String,
    },

    /// Find students whose name contains a fragment (case-insensitive)
    SearchPartial {
        fragment: String,
    },

    /// Change a student's name, email or password
    UpdateStudent(PersonUpdateArgs),

    /// Enrol a student in a course (resets marks to 0)
    Enroll {
        #[arg(long, allow_negative_numbers = true)]
        student: i32,
        #[arg(long, allow_negative_numbers = true)]
        course: i32,
    },

    /// Add one teacher
    AddTeacher(PersonArgs),

    /// Add several teachers: --entry "name|id|email|password" ...
    BulkAddTeachers(BulkArgs),

    /// List all teachers
    ViewTeachers(FormatArg),

    /// Change a teacher's name, email or password
    UpdateTeacher(PersonUpdateArgs),

    /// Add one course
    AddCourse {
        #[arg(long, allow_negative_numbers = true)]
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        teacher: i32,
    },

    /// Add several courses: --entry "id|name|credits|teacher" ...
    BulkAddCourses(BulkArgs),

    /// List all courses
    ViewCourses(FormatArg),

    /// Change a course's name, credits or teacher
    UpdateCourse {
        #[arg(long, allow_negative_numbers = true)]
        id: i32,
        /// New name (omit to keep)
        #[arg(long)]
        name: Option<String>,
        /// New credit hours (omit or 0 to keep)
        #[arg(long)]
        credits: Option<u32>,
        /// New teacher id (omit to keep)
        #[arg(long, allow_negative_numbers = true)]
        teacher: Option<i32>,
    },

    /// Point a course at a teacher
    AssignTeacher {
        #[arg(long, allow_negative_numbers = true)]
        course: i32,
        #[arg(long, allow_negative_numbers = true)]
        teacher: i32,
    },

    /// Set a student's marks (0-100) for a course
    SetMarks {
        #[arg(long, allow_negative_numbers = true)]
        student: i32,
        #[arg(long, allow_negative_numbers = true)]
        course: i32,
        #[arg(long, allow_negative_numbers = true)]
        marks: i32,
    },

    /// Show a student's GPA
    Gpa {
        #[arg(long, allow_negative_numbers = true)]
        student: i32,
    },

    /// Rank the students of one course by marks
    RankCourse {
        #[arg(long, allow_negative_numbers = true)]
        course: i32,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Rank all students by GPA
    RankGpa(FormatArg),

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Split a line into words.
///
/// Whitespace separates words. Single quotes keep everything literally,
/// double quotes allow `\"` and `\\`, and a backslash outside quotes
/// escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => anyhow::bail!("unterminated single quote"),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => anyhow::bail!("unterminated double quote"),
                        },
                        Some(c) => current.push(c),
                        None => anyhow::bail!("unterminated double quote"),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => anyhow::bail!("trailing backslash"),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
