// POST /auth/register - create an account and hand back a token

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::{self, password};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{RegisterRequest, User};
use crate::error::ApiError;

/// POST /auth/register - Register a new user
///
/// Stores a salted argon2 hash of the password, never the plaintext,
/// and returns a signed token so the client is logged in immediately.
pub async fn register_post(
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let registration = payload
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let pool = DatabaseManager::pool().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&registration.email)
        .fetch_one(&pool)
        .await
        .map_err(DatabaseError::from)?;
    if existing > 0 {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = password::hash_password(&registration.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Server error")
    })?;

    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&registration.name)
    .bind(&registration.email)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await;

    let user = match inserted {
        Ok(user) => user,
        // Unique index on email closes the check-then-insert race
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(ApiError::bad_request("User already exists"));
        }
        Err(e) => return Err(DatabaseError::from(e).into()),
    };

    tracing::info!(user_id = %user.id, "Registered new user");

    let token = auth::generate_jwt(&auth::Claims::for_user(&user)).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Server error")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": { "token": token } })),
    ))
}
