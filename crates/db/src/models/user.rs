//! User entity model and DTOs.

use moalem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub civil_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub school_id: DbId,
    pub primary_subject_id: DbId,
    pub secondary_subject_id: Option<DbId>,
    pub school_type: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub civil_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub school_id: DbId,
    pub primary_subject_id: DbId,
    pub secondary_subject_id: Option<DbId>,
    pub school_type: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            civil_id: user.civil_id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            school_id: user.school_id,
            primary_subject_id: user.primary_subject_id,
            secondary_subject_id: user.secondary_subject_id,
            school_type: user.school_type,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration payload as submitted by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "civil_id is required"))]
    pub civil_id: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub password: String,
    pub school_id: DbId,
    pub primary_subject_id: DbId,
    pub secondary_subject_id: Option<DbId>,
    pub school_type: String,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub civil_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub school_id: DbId,
    pub primary_subject_id: DbId,
    pub secondary_subject_id: Option<DbId>,
    pub school_type: String,
}

impl CreateUser {
    /// Build an insert DTO from a validated registration and its password hash.
    pub fn from_registration(input: RegisterUser, password_hash: String) -> Self {
        Self {
            civil_id: input.civil_id,
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            password_hash,
            school_id: input.school_id,
            primary_subject_id: input.primary_subject_id,
            secondary_subject_id: input.secondary_subject_id,
            school_type: input.school_type,
        }
    }
}
