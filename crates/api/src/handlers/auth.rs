//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use moalem_core::accounts::{validate_school_type, MIN_PASSWORD_LENGTH};
use moalem_core::error::CoreError;
use moalem_db::models::user::{CreateUser, RegisterUser, UserResponse};
use moalem_db::repositories::{SchoolRepo, SubjectRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::tokens::{issue_session, revoke, verify_refresh_token, TokenPair};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub civil_id: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response for register and login: the user plus a fresh token pair.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterUser>,
) -> AppResult<(StatusCode, AppJson<AuthResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_school_type(&input.school_type)?;

    if !SchoolRepo::exists_active(&state.pool, input.school_id).await? {
        return Err(CoreError::Validation("School not found".into()).into());
    }
    let subject_ids = std::iter::once(input.primary_subject_id).chain(input.secondary_subject_id);
    for subject_id in subject_ids {
        if !SubjectRepo::exists_active(&state.pool, subject_id).await? {
            return Err(CoreError::Validation("Subject not found".into()).into());
        }
    }

    if UserRepo::find_by_civil_id(&state.pool, &input.civil_id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("User with this civil ID already exists".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(&state.pool, &CreateUser::from_registration(input, password_hash))
        .await?;

    let tokens = issue_session(&state.pool, &state.config.jwt, user.id).await?;
    tracing::info!(user_id = %user.id, "Teacher registered");

    Ok((
        StatusCode::CREATED,
        AppJson(AuthResponse {
            user: user.into(),
            tokens,
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown civil ID, wrong password, and deactivated account all answer 401
/// with the same message.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<AppJson<AuthResponse>> {
    let user = UserRepo::find_by_civil_id(&state.pool, &input.civil_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let tokens = issue_session(&state.pool, &state.config.jwt, user.id).await?;
    tracing::info!(user_id = %user.id, "Teacher logged in");

    Ok(AppJson(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// POST /api/auth/refresh
///
/// Exchange the live refresh token for a new pair; the presented token is
/// superseded.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<AppJson<TokenPair>> {
    let user_id = verify_refresh_token(&state.pool, &state.config.jwt, &input.refresh_token).await?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired refresh token".into()))
        })?;

    let tokens = issue_session(&state.pool, &state.config.jwt, user.id).await?;
    Ok(AppJson(tokens))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<AppJson<SuccessResponse<()>>> {
    let revoked = revoke(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, revoked, "Teacher logged out");
    Ok(AppJson(SuccessResponse::message("Logged out successfully")))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<AppJson<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(AppJson(DataResponse::new(user.into())))
}
