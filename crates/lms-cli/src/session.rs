//! A shell session: one registry, fed one command line at a time.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use lms_core::config::LmsConfig;
use lms_core::roster::parse_roster;
use lms_core::{
    BulkOutcome, CourseDraft, CourseUpdate, LmsError, PersonDraft, PersonUpdate, Registry,
};

use crate::line::{split_words, BulkArgs, PersonArgs, PersonUpdateArgs, ShellCommand, ShellLine};
use crate::render;

/// What the caller should do after a line has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    registry: Registry,
    config: LmsConfig,
}

impl Session {
    pub fn new(config: LmsConfig) -> Self {
        Self {
            registry: Registry::with_options(config.registry_options()),
            config,
        }
    }

    pub fn config(&self) -> &LmsConfig {
        &self.config
    }

    /// Import a roster file and print what was loaded and what was rejected.
    pub fn load_roster(&mut self, path: &Path, out: &mut dyn Write) -> Result<()> {
        let roster = parse_roster(path)?;
        let summary = roster.apply(&mut self.registry);

        writeln!(
            out,
            "Loaded roster {}: {} students, {} teachers, {} courses ({} rejected)",
            path.display(),
            summary.students.added,
            summary.teachers.added,
            summary.courses.added,
            summary.rejected()
        )?;
        for (section, outcome) in summary.sections() {
            for (index, err) in &outcome.failures {
                writeln!(out, "  {section} #{}: {err}", index + 1)?;
            }
        }
        Ok(())
    }

    /// Run one shell line. Engine and parse errors are printed to `out`;
    /// only write failures are returned as errors.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(out, "{e}")?
                    }
                    _ => write!(out, "{}", e.render())?,
                }
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!("command: {:?}", parsed.command);
        self.dispatch(parsed.command, out)
    }

    fn dispatch(&mut self, command: ShellCommand, out: &mut dyn Write) -> Result<Flow> {
        let precision = self.config.gpa_precision;
        let reg = &mut self.registry;

        match command {
            ShellCommand::AddStudent(args) => {
                report(out, reg.add_student(person_draft(args)), "Student added!")?
            }
            ShellCommand::BulkAddStudents(args) => {
                bulk_people(out, "student", args, |drafts| reg.bulk_add_students(drafts))?
            }
            ShellCommand::ViewStudents(f) => match reg.view_students() {
                Ok(students) => render::students(out, students, f.format)?,
                Err(e) => print_error(out, &e)?,
            },
            ShellCommand::SearchStudent { key } => match reg.search_student(&key) {
                Ok(found) => {
                    for s in found {
                        writeln!(out, "{s}")?;
                    }
                }
                Err(_) => writeln!(out, "Not found.")?,
            },
            ShellCommand::SearchPartial { fragment } => {
                match reg.search_student_partial(&fragment) {
                    Ok(found) => {
                        for s in found {
                            writeln!(out, "{s}")?;
                        }
                    }
                    Err(_) => writeln!(out, "No student found with fragment.")?,
                }
            }
            ShellCommand::UpdateStudent(args) => {
                let (id, update) = person_update(args);
                report(out, reg.update_student(id, &update), "Updated!")?
            }
            ShellCommand::Enroll { student, course } => report(
                out,
                reg.enroll_student_in_course(student, course),
                "Student enrolled!",
            )?,

            ShellCommand::AddTeacher(args) => {
                report(out, reg.add_teacher(person_draft(args)), "Teacher added!")?
            }
            ShellCommand::BulkAddTeachers(args) => {
                bulk_people(out, "teacher", args, |drafts| reg.bulk_add_teachers(drafts))?
            }
            ShellCommand::ViewTeachers(f) => match reg.view_teachers() {
                Ok(teachers) => render::teachers(out, teachers, f.format)?,
                Err(e) => print_error(out, &e)?,
            },
            ShellCommand::UpdateTeacher(args) => {
                let (id, update) = person_update(args);
                report(out, reg.update_teacher(id, &update), "Teacher updated!")?
            }

            ShellCommand::AddCourse {
                id,
                name,
                credits,
                teacher,
            } => {
                let draft = CourseDraft {
                    id,
                    name,
                    credit_hours: credits,
                    teacher_id: teacher,
                };
                report(out, reg.add_course(draft), "Course added!")?
            }
            ShellCommand::BulkAddCourses(args) => bulk_courses(out, args, reg)?,
            ShellCommand::ViewCourses(f) => match reg.view_courses() {
                Ok(courses) => render::courses(out, courses, f.format)?,
                Err(e) => print_error(out, &e)?,
            },
            ShellCommand::UpdateCourse {
                id,
                name,
                credits,
                teacher,
            } => {
                let update = CourseUpdate {
                    name,
                    credit_hours: credits,
                    teacher_id: teacher,
                };
                report(out, reg.update_course(id, &update), "Course updated!")?
            }
            ShellCommand::AssignTeacher { course, teacher } => {
                report(out, reg.assign_teacher(course, teacher), "Teacher assigned!")?
            }

            ShellCommand::SetMarks {
                student,
                course,
                marks,
            } => report(
                out,
                reg.set_student_marks(student, course, marks),
                "Marks updated!",
            )?,
            ShellCommand::Gpa { student } => match reg.student_gpa(student) {
                Ok(r) => writeln!(out, "{}'s CGPA: {:.precision$}", r.name, r.gpa)?,
                Err(e) => print_error(out, &e)?,
            },
            ShellCommand::RankCourse { course, format } => {
                match reg.rank_students_in_course(course) {
                    Ok(ranking) => render::marks_ranking(out, course, &ranking, format.format)?,
                    Err(LmsError::Empty { .. }) => {
                        writeln!(out, "No students for course {course}")?
                    }
                    Err(e) => print_error(out, &e)?,
                }
            }
            ShellCommand::RankGpa(f) => {
                let ranking = reg.rank_all_students_by_gpa();
                render::gpa_ranking(out, &ranking, precision, f.format)?
            }

            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}

fn person_draft(args: PersonArgs) -> PersonDraft {
    PersonDraft {
        name: args.name,
        id: args.id,
        email: args.email,
        password: args.password,
    }
}

fn person_update(args: PersonUpdateArgs) -> (i32, PersonUpdate) {
    (
        args.id,
        PersonUpdate {
            name: args.name,
            email: args.email,
            password: args.password,
        },
    )
}

fn report(out: &mut dyn Write, result: lms_core::Result<()>, success: &str) -> Result<()> {
    match result {
        Ok(()) => writeln!(out, "{success}")?,
        Err(e) => print_error(out, &e)?,
    }
    Ok(())
}

fn print_error(out: &mut dyn Write, err: &LmsError) -> Result<()> {
    match err {
        LmsError::Empty { kind } => writeln!(out, "No {kind}s.")?,
        e if e.is_validation() => writeln!(out, "Invalid input: {err}. Please try again.")?,
        _ => writeln!(out, "Error: {err}")?,
    }
    Ok(())
}

/// Parse `name|id|email|password`; the password may be omitted.
fn parse_person_entry(entry: &str) -> std::result::Result<PersonDraft, String> {
    let fields: Vec<&str> = entry.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [name, id, email] | [name, id, email, _] => {
            let id = id
                .parse()
                .map_err(|_| format!("id '{id}' is not an integer"))?;
            let password = fields.get(3).copied().unwrap_or_default();
            Ok(PersonDraft::new(*name, id, *email, password))
        }
        _ => Err(format!(
            "expected name|id|email|password, got {} field(s)",
            fields.len()
        )),
    }
}

/// Parse `id|name|credits|teacher`; the teacher may be omitted.
fn parse_course_entry(entry: &str) -> std::result::Result<CourseDraft, String> {
    let fields: Vec<&str> = entry.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [id, name, credits] | [id, name, credits, _] => {
            let id = id
                .parse()
                .map_err(|_| format!("id '{id}' is not an integer"))?;
            let credit_hours = credits
                .parse()
                .map_err(|_| format!("credits '{credits}' is not a non-negative integer"))?;
            let teacher_id = match fields.get(3) {
                Some(t) => t
                    .parse()
                    .map_err(|_| format!("teacher '{t}' is not an integer"))?,
                None => 0,
            };
            Ok(CourseDraft {
                id,
                name: name.to_string(),
                credit_hours,
                teacher_id,
            })
        }
        _ => Err(format!(
            "expected id|name|credits|teacher, got {} field(s)",
            fields.len()
        )),
    }
}

/// Parse every entry, hand the well-formed ones to `add`, then report each
/// entry's fate in its original position.
fn run_bulk<D>(
    out: &mut dyn Write,
    kind: &str,
    entries: &[String],
    parse: impl Fn(&str) -> std::result::Result<D, String>,
    add: impl FnOnce(Vec<D>) -> BulkOutcome,
) -> Result<()> {
    let total = entries.len();
    let mut messages: Vec<Option<String>> = vec![None; total];
    let mut drafts = Vec::new();
    let mut positions = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        match parse(entry) {
            Ok(draft) => {
                drafts.push(draft);
                positions.push(i);
            }
            Err(msg) => messages[i] = Some(format!("Invalid input: {msg}")),
        }
    }

    let outcome = add(drafts);
    for (index, err) in &outcome.failures {
        messages[positions[*index]] = Some(format!("Error: {err}"));
    }

    for (i, message) in messages.iter().enumerate() {
        match message {
            Some(msg) => writeln!(out, "Adding {kind} {}/{total}: {msg}", i + 1)?,
            None => writeln!(out, "Adding {kind} {}/{total}: added", i + 1)?,
        }
    }
    writeln!(out, "{}/{total} {kind}s added", outcome.added)?;
    Ok(())
}

fn bulk_people(
    out: &mut dyn Write,
    kind: &str,
    args: BulkArgs,
    add: impl FnOnce(Vec<PersonDraft>) -> BulkOutcome,
) -> Result<()> {
    run_bulk(out, kind, &args.entries, parse_person_entry, add)
}

fn bulk_courses(out: &mut dyn Write, args: BulkArgs, reg: &mut Registry) -> Result<()> {
    run_bulk(out, "course", &args.entries, parse_course_entry, |drafts| {
        reg.bulk_add_courses(drafts)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, lines: &[&str]) -> String {
        let mut buf = Vec::new();
        for line in lines {
            session.execute_line(line, &mut buf).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn add_and_view_student() {
        let mut s = Session::new(LmsConfig::default());
        let out = run(
            &mut s,
            &[
                r#"add-student --name "Ada Lovelace" --id 1 --email ada@uni.edu"#,
                "view-students",
            ],
        );
        assert!(out.contains("Student added!"));
        assert!(out.contains("Name:          Ada Lovelace"));
        assert!(out.contains("Courses:       None"));
    }

    #[test]
    fn errors_do_not_stop_the_session() {
        let mut s = Session::new(LmsConfig::default());
        let out = run(
            &mut s,
            &[
                "add-student --name Ada --id 1 --email ada@uni.edu",
                "add-student --name Bob --id 1 --email bob@uni.edu",
                "add-student --name B0b --id 2 --email bob@uni.edu",
                "set-marks --student 1 --course 1 --marks 150",
                "not-a-command",
                "gpa --student 1",
            ],
        );
        assert!(out.contains("Error: duplicate student id 1"));
        assert!(out.contains("Invalid input: invalid name 'B0b'"));
        assert!(out.contains("Error: marks 150 out of range (0-100)"));
        assert!(out.contains("Ada's CGPA: 0.00"));
        assert_eq!(s.registry.students().len(), 1);
    }

    #[test]
    fn exit_and_comments() {
        let mut s = Session::new(LmsConfig::default());
        let mut buf = Vec::new();
        assert_eq!(s.execute_line("# note", &mut buf).unwrap(), Flow::Continue);
        assert_eq!(s.execute_line("   ", &mut buf).unwrap(), Flow::Continue);
        assert_eq!(s.execute_line("exit", &mut buf).unwrap(), Flow::Exit);
        assert_eq!(s.execute_line("quit", &mut buf).unwrap(), Flow::Exit);
        assert!(buf.is_empty());
    }

    #[test]
    fn bulk_reports_each_entry() {
        let mut s = Session::new(LmsConfig::default());
        let out = run(
            &mut s,
            &[r#"bulk-add-students --entry "Ada|1|ada@uni.edu|pw" "Bob|x|bob@uni.edu" "Cy|1|cy@uni.edu" "Di|4|di@uni.edu""#],
        );
        assert!(out.contains("Adding student 1/4: added"));
        assert!(out.contains("Adding student 2/4: Invalid input: id 'x' is not an integer"));
        assert!(out.contains("Adding student 3/4: Error: duplicate student id 1"));
        assert!(out.contains("Adding student 4/4: added"));
        assert!(out.contains("2/4 students added"));
    }

    #[test]
    fn course_flow_and_rankings() {
        let mut s = Session::new(LmsConfig::default());
        let out = run(
            &mut s,
            &[
                r#"bulk-add-courses --entry "10|Logic|3|100" "11|Music|1""#,
                "bulk-add-students --entry 'A|1|a@u.io' 'B|2|b@u.io' 'C|3|c@u.io'",
                "rank-course --course 10",
                "set-marks --student 1 --course 10 --marks 70",
                "set-marks --student 2 --course 10 --marks 90",
                "set-marks --student 3 --course 10 --marks 70",
                "rank-course --course 10",
                "update-course --id 11 --credits 0 --teacher 7",
                "view-courses",
            ],
        );
        assert!(out.contains("2/2 courses added"));
        assert!(out.contains("No students for course 10"));
        assert!(out.contains("1. B - Marks: 90\n2. A - Marks: 70\n3. C - Marks: 70\n"));
        assert!(out.contains("Course updated!"));
        assert_eq!(s.registry.course(11).unwrap().credit_hours(), 1);
        assert_eq!(s.registry.course(11).unwrap().teacher_id(), 7);
    }

    #[test]
    fn empty_views_are_friendly() {
        let mut s = Session::new(LmsConfig::default());
        let out = run(&mut s, &["view-students", "view-teachers", "view-courses", "rank-gpa"]);
        assert!(out.contains("No students."));
        assert!(out.contains("No teachers."));
        assert!(out.contains("No courses."));
        assert!(out.contains("Ranking All Students by GPA:"));
    }

    #[test]
    fn unique_course_ids_from_config() {
        let config = LmsConfig {
            unique_course_ids: true,
            ..LmsConfig::default()
        };
        let mut s = Session::new(config);
        let out = run(
            &mut s,
            &[
                "add-course --id 1 --name Logic --credits 3",
                "add-course --id 1 --name Rhetoric --credits 2",
            ],
        );
        assert!(out.contains("Error: duplicate course id 1"));
    }

    #[test]
    fn load_roster_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(
            &path,
            r#"
[[students]]
name = "Ada"
id = 1
email = "ada@uni.edu"

[[students]]
name = "Ada Again"
id = 1
email = "ada@uni.edu"
"#,
        )
        .unwrap();

        let mut s = Session::new(LmsConfig::default());
        let mut buf = Vec::new();
        s.load_roster(&path, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("1 students, 0 teachers, 0 courses (1 rejected)"));
        assert!(out.contains("students #2: duplicate student id 1"));
    }

    #[test]
    fn entry_parsers() {
        assert!(parse_person_entry("Ada|1").is_err());
        let d = parse_person_entry(" Ada | 3 | a@b.cd ").unwrap();
        assert_eq!((d.name.as_str(), d.id, d.password.as_str()), ("Ada", 3, ""));

        let c = parse_course_entry("5|Logic|4").unwrap();
        assert_eq!((c.id, c.credit_hours, c.teacher_id), (5, 4, 0));
        assert!(parse_course_entry("5|Logic|-4").is_err());
    }
}
