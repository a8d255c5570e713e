//! Integration tests for bulk attendance recording and reporting queries.

mod common;

use common::{day, seed_class, seed_student, seed_teacher};
use moalem_core::dates::DateWindow;
use moalem_db::is_unique_violation;
use moalem_db::models::attendance::{AttendanceEntry, CreateAttendance};
use moalem_db::repositories::{AttendanceRepo, StudentRepo};
use sqlx::PgPool;
use validator::Validate;

fn entry(student_id: uuid::Uuid, status: &str) -> AttendanceEntry {
    AttendanceEntry {
        student_id,
        status: status.to_string(),
        notes: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_inserts_every_entry(pool: PgPool) {
    let teacher = seed_teacher(&pool, "100").await;
    let class = seed_class(&pool, teacher.id, "A", 10).await;
    let s1 = seed_student(&pool, class.id, "S-001").await;
    let s2 = seed_student(&pool, class.id, "S-002").await;
    let date = day(2024, 1, 10);

    assert!(!AttendanceRepo::exists_for_class_date(&pool, class.id, date).await.unwrap());

    let ids = AttendanceRepo::create_batch(
        &pool,
        class.id,
        date,
        teacher.id,
        &[entry(s1.id, "present"), entry(s2.id, "late")],
    )
    .await
    .unwrap();
    assert_eq!(ids.len(), 2);

    assert!(AttendanceRepo::exists_for_class_date(&pool, class.id, date).await.unwrap());

    let rows = AttendanceRepo::list_for_class_date(&pool, class.id, date).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].student_number, "S-001");
    assert_eq!(rows[0].student_name, "Student S-001");
    assert_eq!(rows[1].attendance.status, "late");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_rolls_back_on_duplicate(pool: PgPool) {
    let teacher = seed_teacher(&pool, "101").await;
    let class = seed_class(&pool, teacher.id, "A", 10).await;
    let s1 = seed_student(&pool, class.id, "S-001").await;
    let s2 = seed_student(&pool, class.id, "S-002").await;
    let date = day(2024, 1, 10);

    // The last entry repeats the first student and trips the unique constraint.
    let err = AttendanceRepo::create_batch(
        &pool,
        class.id,
        date,
        teacher.id,
        &[entry(s1.id, "present"), entry(s2.id, "present"), entry(s1.id, "absent")],
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "no partial batch may survive");
    assert!(!AttendanceRepo::exists_for_class_date(&pool, class.id, date).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_notes_are_stored_as_null(pool: PgPool) {
    let teacher = seed_teacher(&pool, "102").await;
    let class = seed_class(&pool, teacher.id, "A", 10).await;
    let s1 = seed_student(&pool, class.id, "S-001").await;

    let mut e = entry(s1.id, "excused");
    e.notes = Some("  ".to_string());
    let ids = AttendanceRepo::create_batch(&pool, class.id, day(2024, 1, 10), teacher.id, &[e])
        .await
        .unwrap();

    let row = AttendanceRepo::find_owned(&pool, ids[0], teacher.id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.notes.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_owned_is_scoped_to_teacher(pool: PgPool) {
    let owner = seed_teacher(&pool, "103").await;
    let other = seed_teacher(&pool, "104").await;
    let class = seed_class(&pool, owner.id, "A", 10).await;
    let s1 = seed_student(&pool, class.id, "S-001").await;
    let entries = [entry(s1.id, "present")];
    let ids = AttendanceRepo::create_batch(&pool, class.id, day(2024, 1, 10), owner.id, &entries)
        .await
        .unwrap();

    assert!(AttendanceRepo::find_owned(&pool, ids[0], other.id).await.unwrap().is_none());

    let updated = AttendanceRepo::update(&pool, ids[0], "absent", Some("left early"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "absent");
    assert_eq!(updated.notes.as_deref(), Some("left early"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_queries_respect_window(pool: PgPool) {
    let teacher = seed_teacher(&pool, "105").await;
    let class = seed_class(&pool, teacher.id, "A", 10).await;
    let s1 = seed_student(&pool, class.id, "S-001").await;
    let s2 = seed_student(&pool, class.id, "S-002").await;

    for (date, status) in [
        (day(2024, 1, 8), "present"),
        (day(2024, 1, 9), "absent"),
        (day(2024, 1, 10), "present"),
        (day(2024, 2, 20), "present"),
    ] {
        AttendanceRepo::create_batch(&pool, class.id, date, teacher.id, &[entry(s1.id, status)])
            .await
            .unwrap();
    }

    let window = DateWindow { start: day(2024, 1, 1), end: day(2024, 1, 31) };

    let rows = AttendanceRepo::list_for_student(&pool, s1.id, &window).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, day(2024, 1, 10), "newest first");

    let counts = AttendanceRepo::status_counts_for_student(&pool, s1.id, &window)
        .await
        .unwrap();
    assert_eq!((counts.present, counts.absent, counts.late, counts.excused), (2, 1, 0, 0));

    let presence = AttendanceRepo::presence_for_class(&pool, class.id, &window).await.unwrap();
    assert_eq!(presence.len(), 2);
    let first = presence.iter().find(|p| p.student_id == s1.id).unwrap();
    assert_eq!((first.total_days, first.present_days), (3, 2));
    let second = presence.iter().find(|p| p.student_id == s2.id).unwrap();
    assert_eq!((second.total_days, second.present_days), (0, 0));

    let listed = StudentRepo::list_for_class_with_presence(&pool, class.id, &window)
        .await
        .unwrap();
    assert_eq!(listed[0].total_days, 3);
    assert_eq!(listed[0].present_days, 2);
    assert!(listed[0].class_name.is_none());
}

#[test]
fn test_submission_requires_at_least_one_record() {
    let empty = CreateAttendance {
        date: "2024-01-10".to_string(),
        records: Vec::new(),
    };
    let errors = empty.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("records"));

    let one = CreateAttendance {
        date: "2024-01-10".to_string(),
        records: vec![entry(uuid::Uuid::new_v4(), "present")],
    };
    assert!(one.validate().is_ok());
}
