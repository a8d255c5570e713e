//! Token service: issues token pairs and binds refresh tokens to sessions.
//!
//! A user holds at most one live refresh token. Issuing a new pair rotates
//! the session row, which makes every older refresh token unusable even
//! before its JWT expiry.

use chrono::DateTime;
use moalem_core::error::CoreError;
use moalem_core::types::DbId;
use moalem_db::models::session::CreateSession;
use moalem_db::repositories::SessionRepo;
use moalem_db::DbPool;
use serde::Serialize;

use crate::auth::jwt::{generate_token, hash_refresh_token, validate_token, JwtConfig, TokenKind};
use crate::error::{AppError, AppResult};

/// Access/refresh pair handed to the client.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Mint a fresh access and refresh token for `user_id`.
///
/// Also returns the refresh token's expiry as a Unix timestamp.
pub fn issue_token_pair(user_id: DbId, config: &JwtConfig) -> AppResult<(TokenPair, i64)> {
    let (access_token, _) = generate_token(user_id, TokenKind::Access, config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let (refresh_token, refresh_claims) = generate_token(user_id, TokenKind::Refresh, config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let pair = TokenPair {
        access_token,
        refresh_token,
        expires_in: config.lifetime_secs(TokenKind::Access),
    };
    Ok((pair, refresh_claims.exp))
}

/// Store `refresh_token` as the user's only live session.
pub async fn persist_refresh_token(
    pool: &DbPool,
    user_id: DbId,
    refresh_token: &str,
    expires_at_unix: i64,
) -> AppResult<()> {
    let expires_at = DateTime::from_timestamp(expires_at_unix, 0)
        .ok_or_else(|| AppError::InternalError("Refresh token expiry out of range".into()))?;

    let input = CreateSession {
        user_id,
        refresh_token_hash: hash_refresh_token(refresh_token),
        expires_at,
    };
    SessionRepo::rotate(pool, &input).await?;
    Ok(())
}

/// Issue a token pair and persist its refresh token in one step.
pub async fn issue_session(
    pool: &DbPool,
    config: &JwtConfig,
    user_id: DbId,
) -> AppResult<TokenPair> {
    let (pair, refresh_exp) = issue_token_pair(user_id, config)?;
    persist_refresh_token(pool, user_id, &pair.refresh_token, refresh_exp).await?;
    Ok(pair)
}

/// Resolve the user behind an access token.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> AppResult<DbId> {
    let claims = validate_token(token, TokenKind::Access, config)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;
    Ok(claims.sub)
}

/// Resolve the user behind a refresh token and spend it.
///
/// Besides a valid signature and `typ`, the token must match the user's live
/// session row; a superseded or revoked token is rejected. The session is
/// revoked on success, so each refresh token is accepted once.
pub async fn verify_refresh_token(
    pool: &DbPool,
    config: &JwtConfig,
    token: &str,
) -> AppResult<DbId> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid or expired refresh token".into()));

    let claims = validate_token(token, TokenKind::Refresh, config).map_err(|_| invalid())?;

    SessionRepo::consume(pool, claims.sub, &hash_refresh_token(token))
        .await?
        .ok_or_else(invalid)?;

    Ok(claims.sub)
}

/// Revoke every live session of the user.
pub async fn revoke(pool: &DbPool, user_id: DbId) -> AppResult<u64> {
    Ok(SessionRepo::revoke_all_for_user(pool, user_id).await?)
}
