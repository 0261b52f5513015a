use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lms_core::{CourseDraft, PersonDraft, Registry};

const NAMES: [&str; 8] = [
    "Ada", "Brian", "Cleo", "Dennis", "Edsger", "Frances", "Grace", "Hedy",
];

fn populated(students: i32, courses: i32) -> Registry {
    let mut reg = Registry::new();
    for cid in 0..courses {
        reg.add_course(CourseDraft {
            id: cid,
            name: "Seminar".into(),
            credit_hours: (cid as u32 % 4) + 1,
            teacher_id: 0,
        })
        .unwrap();
    }
    for sid in 0..students {
        let name = NAMES[sid as usize % NAMES.len()];
        reg.add_student(PersonDraft::new(name, sid, "s@uni.edu", ""))
            .unwrap();
        for cid in 0..courses {
            reg.set_student_marks(sid, cid, (sid * 7 + cid * 13) % 101)
                .unwrap();
        }
    }
    reg
}

fn bench_rank_in_course(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_students_in_course");

    for students in [10, 100, 1000] {
        let reg = populated(students, 8);
        group.bench_function(format!("students={students}"), |b| {
            b.iter(|| reg.rank_students_in_course(black_box(3)))
        });
    }

    group.finish();
}

fn bench_rank_by_gpa(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_all_students_by_gpa");

    for (students, courses) in [(100, 4), (1000, 8), (1000, 32)] {
        let reg = populated(students, courses);
        group.bench_function(format!("students={students},courses={courses}"), |b| {
            b.iter(|| black_box(&reg).rank_all_students_by_gpa())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank_in_course, bench_rank_by_gpa);
criterion_main!(benches);
