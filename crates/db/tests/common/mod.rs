//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use moalem_core::types::DbId;
use moalem_db::models::class::{Class, CreateClass};
use moalem_db::models::student::{CreateStudent, Student};
use moalem_db::models::user::{CreateUser, User};
use moalem_db::repositories::{ClassRepo, StudentRepo, UserRepo};
use sqlx::PgPool;

/// First seeded school.
pub async fn any_school(pool: &PgPool) -> DbId {
    sqlx::query_scalar("SELECT id FROM schools ORDER BY name LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// A seeded subject looked up by code.
pub async fn subject(pool: &PgPool, code: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM subjects WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_teacher(pool: &PgPool, civil_id: &str) -> User {
    let input = CreateUser {
        civil_id: civil_id.to_string(),
        full_name: "Test Teacher".to_string(),
        email: format!("{civil_id}@school.test"),
        phone: "+96550000000".to_string(),
        password_hash: "not-a-real-hash".to_string(),
        school_id: any_school(pool).await,
        primary_subject_id: subject(pool, "MATH-7").await,
        secondary_subject_id: None,
        school_type: "intermediate".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub async fn seed_class(
    pool: &PgPool,
    teacher_id: DbId,
    section: &str,
    max_students: i32,
) -> Class {
    let input = CreateClass {
        name: format!("Grade 7 {section}"),
        subject_id: subject(pool, "MATH-7").await,
        school_year: "2023-2024".to_string(),
        semester: "first".to_string(),
        class_section: section.to_string(),
        max_students,
    };
    ClassRepo::create(pool, teacher_id, &input).await.unwrap()
}

pub fn new_student(number: &str, gender: &str) -> CreateStudent {
    CreateStudent {
        student_number: number.to_string(),
        civil_id: None,
        first_name: "Student".to_string(),
        last_name: number.to_string(),
        arabic_name: "طالب".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2011, 5, 1).unwrap(),
        gender: gender.to_string(),
        nationality: "Kuwaiti".to_string(),
        address: None,
    }
}

pub async fn seed_student(pool: &PgPool, class_id: DbId, number: &str) -> Student {
    StudentRepo::create(pool, class_id, &new_student(number, "male"))
        .await
        .unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
