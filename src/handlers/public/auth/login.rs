// POST /auth/login - exchange credentials for a token

use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::auth::{self, password};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{LoginRequest, User};
use crate::error::ApiError;

/// POST /auth/login - Authenticate and receive a JWT
///
/// Unknown email and wrong password produce the same 401 body, so the
/// endpoint never confirms whether an address is registered.
pub async fn login_post(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let (email, plaintext) = payload
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await
        .map_err(DatabaseError::from)?;

    let user = match user {
        Some(user) if password::verify_password(&plaintext, &user.password_hash) => user,
        _ => return Err(ApiError::unauthorized("Invalid credentials")),
    };

    let token = auth::generate_jwt(&auth::Claims::for_user(&user)).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Server error")
    })?;

    Ok(Json(json!({ "success": true, "data": { "token": token } })))
}
