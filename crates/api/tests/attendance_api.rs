//! HTTP-level integration tests for attendance recording and reporting.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_class, create_student, delete_auth, get_auth, post_json_auth,
    put_json_auth, seed_teacher, student_body,
};
use sqlx::PgPool;

fn submission(date: &str, records: &[(&str, &str)]) -> serde_json::Value {
    let records: Vec<_> = records
        .iter()
        .map(|(id, status)| serde_json::json!({ "student_id": id, "status": status }))
        .collect();
    serde_json::json!({ "date": date, "records": records })
}

async fn attendance_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Walk the whole workflow: capacity, bulk submission, resubmission,
/// correction, and the report reflecting the correction.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_end_to_end_attendance_workflow(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "600").await;
    let app = common::build_test_app(pool.clone());

    let class_id = create_class(&app, &pool, &token, "A", 2).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;
    let s2 = create_student(&app, &token, &class_id, "S-002").await;

    let third = post_json_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/students"),
        student_body("S-003", "male"),
        &token,
    )
    .await;
    assert_eq!(third.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(third).await["message"], "Class is full");

    let uri = format!("/api/classes/{class_id}/attendance");
    let body = submission("2024-01-10", &[(&s1, "present"), (&s2, "present")]);
    let response = post_json_auth(app.clone(), &uri, body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["records_count"], 2);
    assert_eq!(json["data"]["date"], "2024-01-10");
    let first_id = json["data"]["attendance_ids"][0].as_str().unwrap().to_string();

    let response = post_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "Attendance already recorded for this date"
    );

    let response = put_json_auth(
        app.clone(),
        &format!("/api/attendance/{first_id}"),
        serde_json::json!({ "status": "absent", "notes": "Sick" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["updated_at"].is_string());

    let report = body_json(
        get_auth(
            app,
            &format!("/api/students/{s1}/attendance-report?start_date=2024-01-01&end_date=2024-01-31"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(report["stats"]["total_days"], 1);
    assert_eq!(report["stats"]["present_days"], 0);
    assert_eq!(report["stats"]["absent_days"], 1);
    assert_eq!(report["stats"]["attendance_rate"], 0.0);
    assert_eq!(report["attendances"][0]["status"], "absent");
    assert_eq!(report["attendances"][0]["notes"], "Sick");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_submission_conflicts_even_with_disjoint_records(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "601").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;
    let s2 = create_student(&app, &token, &class_id, "S-002").await;
    let uri = format!("/api/classes/{class_id}/attendance");

    let response =
        post_json_auth(app.clone(), &uri, submission("2024-01-10", &[(&s1, "present")]), &token)
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        post_json_auth(app, &uri, submission("2024-01-10", &[(&s2, "late")]), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(attendance_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_student_in_one_submission_persists_nothing(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "602").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;
    let s2 = create_student(&app, &token, &class_id, "S-002").await;

    let body = submission(
        "2024-01-10",
        &[(&s1, "present"), (&s2, "present"), (&s1, "absent")],
    );
    let response =
        post_json_auth(app, &format!("/api/classes/{class_id}/attendance"), body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(attendance_count(&pool).await, 0, "batch must be all-or-nothing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_validation(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "603").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;
    let uri = format!("/api/classes/{class_id}/attendance");

    for body in [
        submission("2024-01-10T08:00:00Z", &[(&s1, "present")]),
        submission("10-01-2024", &[(&s1, "present")]),
        submission("2024-01-10", &[]),
        submission("2024-01-10", &[(&s1, "sick")]),
    ] {
        let response = post_json_auth(app.clone(), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(attendance_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_record_foreign_students(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "604").await;
    let (_, other) = seed_teacher(&pool, "605").await;
    let app = common::build_test_app(pool.clone());
    let mine = create_class(&app, &pool, &token, "A", 10).await;
    let theirs = create_class(&app, &pool, &other, "A", 10).await;
    let foreign = create_student(&app, &other, &theirs, "S-100").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/classes/{mine}/attendance"),
        submission("2024-01-10", &[(&foreign, "present")]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Recording into someone else's class looks like a missing class.
    let response = post_json_auth(
        app,
        &format!("/api/classes/{theirs}/attendance"),
        submission("2024-01-10", &[(&foreign, "present")]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_class_attendance_for_date_keeps_deleted_students(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "606").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-002").await;
    let s2 = create_student(&app, &token, &class_id, "S-001").await;

    post_json_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/attendance"),
        submission("2024-01-10", &[(&s1, "present"), (&s2, "late")]),
        &token,
    )
    .await;
    delete_auth(app.clone(), &format!("/api/students/{s1}"), &token).await;

    let response = get_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/attendance/2024-01-10"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["student_number"], "S-001");
    assert_eq!(rows[0]["student_name"], "Student S-001");
    assert_eq!(rows[1]["student_id"], s1.as_str());

    let response = get_auth(
        app,
        &format!("/api/classes/{class_id}/attendance/not-a-date"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_scoped_and_validated(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "607").await;
    let (_, intruder) = seed_teacher(&pool, "608").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;

    let json = body_json(
        post_json_auth(
            app.clone(),
            &format!("/api/classes/{class_id}/attendance"),
            submission("2024-01-10", &[(&s1, "present")]),
            &token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/attendance/{}", json["data"]["attendance_ids"][0].as_str().unwrap());

    let response =
        put_json_auth(app.clone(), &uri, serde_json::json!({ "status": "late" }), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Attendance record not found");

    let response =
        put_json_auth(app, &uri, serde_json::json!({ "status": "gone" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_window_validation(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "609").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;

    let response = get_auth(
        app.clone(),
        &format!("/api/students/{s1}/attendance-report?start_date=2024-02-01&end_date=2024-01-01"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        app.clone(),
        &format!("/api/students/{s1}/attendance-report?start_date=yesterday"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid start_date format (YYYY-MM-DD)"
    );

    // No bounds: trailing window, nothing recorded yet.
    let response =
        get_auth(app, &format!("/api/students/{s1}/attendance-report"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["stats"]["total_days"], 0);
    assert_eq!(report["stats"]["attendance_rate"], 0.0);
    assert!(report["attendances"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_class_stats_average_counts_unrecorded_students(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "610").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;
    create_student(&app, &token, &class_id, "S-002").await;

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let response = post_json_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/attendance"),
        submission(&today, &[(&s1, "present")]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stats =
        body_json(get_auth(app.clone(), &format!("/api/classes/{class_id}/stats"), &token).await)
            .await;
    assert_eq!(stats["average_attendance"], 50.0);

    let student = body_json(get_auth(app, &format!("/api/students/{s1}"), &token).await).await;
    assert_eq!(student["attendance_rate"], 100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_survives_class_deletion(pool: PgPool) {
    let (_, token) = seed_teacher(&pool, "611").await;
    let (_, other) = seed_teacher(&pool, "612").await;
    let app = common::build_test_app(pool.clone());
    let class_id = create_class(&app, &pool, &token, "A", 10).await;
    let s1 = create_student(&app, &token, &class_id, "S-001").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/classes/{class_id}/attendance"),
        submission("2024-01-10", &[(&s1, "present")]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(app.clone(), &format!("/api/classes/{class_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/students/{s1}/attendance-report?start_date=2024-01-01&end_date=2024-01-31");
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["stats"]["total_days"], 1);
    assert_eq!(report["stats"]["present_days"], 1);
    assert_eq!(report["attendances"][0]["date"], "2024-01-10");

    let response = get_auth(app.clone(), &format!("/api/students/{s1}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
