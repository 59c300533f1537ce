use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /api/auth/whoami - identity resolved from the bearer token
pub async fn whoami_get(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "id": user.user_id,
            "name": user.name,
            "email": user.email,
        }
    }))
}
