//! Console rendering of registry results.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use lms_core::ranking::RankEntry;
use lms_core::{Course, Marks, Student, Teacher};

use crate::line::OutputFormat;

fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn students(out: &mut dyn Write, students: &[Student], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(out, students)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Email", "Courses"]);
            for s in students {
                table.add_row(vec![
                    Cell::new(s.id()),
                    Cell::new(s.name()),
                    Cell::new(s.person().email()),
                    Cell::new(s.course_marks().len()),
                ]);
            }
            writeln!(out, "{table}")?;
        }
        OutputFormat::Text => {
            for s in students {
                writeln!(out, "{s}")?;
            }
        }
    }
    Ok(())
}

pub fn teachers(out: &mut dyn Write, teachers: &[Teacher], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(out, teachers)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Email"]);
            for t in teachers {
                table.add_row(vec![
                    Cell::new(t.id()),
                    Cell::new(t.name()),
                    Cell::new(t.person().email()),
                ]);
            }
            writeln!(out, "{table}")?;
        }
        OutputFormat::Text => {
            for t in teachers {
                write!(out, "{t}")?;
            }
        }
    }
    Ok(())
}

pub fn courses(out: &mut dyn Write, courses: &[Course], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json(out, courses)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["CourseID", "Name", "Credits", "TeacherID"]);
            for c in courses {
                table.add_row(vec![
                    Cell::new(c.id()),
                    Cell::new(c.name()),
                    Cell::new(c.credit_hours()),
                    Cell::new(c.teacher_id()),
                ]);
            }
            writeln!(out, "{table}")?;
        }
        OutputFormat::Text => {
            let header = Course::header();
            writeln!(out, "{header}")?;
            writeln!(out, "{}", "-".repeat(header.len()))?;
            for c in courses {
                writeln!(out, "{c}")?;
            }
        }
    }
    Ok(())
}

pub fn marks_ranking(
    out: &mut dyn Write,
    course_id: i32,
    ranking: &[RankEntry<Marks>],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => json(out, ranking)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Rank", "Name", "Marks"]);
            for e in ranking {
                table.add_row(vec![Cell::new(e.rank), Cell::new(&e.name), Cell::new(e.value)]);
            }
            writeln!(out, "Ranking for Course {course_id}:")?;
            writeln!(out, "{table}")?;
        }
        OutputFormat::Text => {
            writeln!(out, "Ranking for Course {course_id}:")?;
            for e in ranking {
                writeln!(out, "{}. {} - Marks: {}", e.rank, e.name, e.value)?;
            }
        }
    }
    Ok(())
}

pub fn gpa_ranking(
    out: &mut dyn Write,
    ranking: &[RankEntry<f64>],
    precision: usize,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => json(out, ranking)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Rank", "Name", "GPA"]);
            for e in ranking {
                table.add_row(vec![
                    Cell::new(e.rank),
                    Cell::new(&e.name),
                    Cell::new(format!("{:.precision$}", e.value)),
                ]);
            }
            writeln!(out, "Ranking All Students by GPA:")?;
            writeln!(out, "{table}")?;
        }
        OutputFormat::Text => {
            writeln!(out, "Ranking All Students by GPA:")?;
            for e in ranking {
                writeln!(out, "{}. {} - GPA: {:.precision$}", e.rank, e.name, e.value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::{CourseDraft, PersonDraft, Registry};

    fn capture(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.add_course(CourseDraft {
            id: 10,
            name: "Logic".into(),
            credit_hours: 3,
            teacher_id: 1,
        })
        .unwrap();
        for (id, name, marks) in [(1, "Ada", 80), (2, "Bob", 95)] {
            reg.add_student(PersonDraft::new(name, id, "x@y.zz", ""))
                .unwrap();
            reg.set_student_marks(id, 10, marks).unwrap();
        }
        reg
    }

    #[test]
    fn course_text_has_header() {
        let reg = registry();
        let text = capture(|out| courses(out, reg.courses(), OutputFormat::Text));
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("CourseID"));
        assert!(lines.next().unwrap().starts_with("-----"));
        assert!(lines.next().unwrap().starts_with("10"));
    }

    #[test]
    fn marks_ranking_text_lines() {
        let reg = registry();
        let ranking = reg.rank_students_in_course(10).unwrap();
        let text = capture(|out| marks_ranking(out, 10, &ranking, OutputFormat::Text));
        assert_eq!(
            text,
            "Ranking for Course 10:\n1. Bob - Marks: 95\n2. Ada - Marks: 80\n"
        );
    }

    #[test]
    fn gpa_ranking_respects_precision() {
        let reg = registry();
        let ranking = reg.rank_all_students_by_gpa();
        let text = capture(|out| gpa_ranking(out, &ranking, 3, OutputFormat::Text));
        assert!(text.contains("1. Bob - GPA: 3.800"));
        assert!(text.contains("2. Ada - GPA: 3.200"));
    }

    #[test]
    fn students_json_is_an_array() {
        let reg = registry();
        let text = capture(|out| students(out, reg.students(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["course_marks"]["10"], 95);
    }

    #[test]
    fn teacher_table_lists_rows() {
        let mut reg = Registry::new();
        reg.add_teacher(PersonDraft::new("Grace", 4, "g@navy.mil", ""))
            .unwrap();
        let text = capture(|out| teachers(out, reg.teachers(), OutputFormat::Table));
        assert!(text.contains("Grace"));
        assert!(text.contains("g@navy.mil"));
    }
}
