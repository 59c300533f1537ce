// /api/tasks - owner-scoped task CRUD

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::task::{Task, TaskCreateRequest, TaskUpdateRequest};
use crate::database::scoped::ScopedRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

async fn task_repo(user: &AuthUser) -> Result<ScopedRepository<Task>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(ScopedRepository::new("tasks", "Task", pool, user.user_id))
}

/// A dangling project reference is client-suppliable input, so the
/// foreign-key rejection comes back as a field-level 400, not a 500.
fn task_write_error(e: sqlx::Error) -> ApiError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            let mut fields = HashMap::new();
            fields.insert("project".to_string(), "Project does not exist".to_string());
            ApiError::validation_error("Validation failed", Some(fields))
        }
        e => DatabaseError::from(e).into(),
    }
}

/// GET /api/tasks - caller's tasks, newest first
pub async fn tasks_get(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let tasks = task_repo(&user).await?.list().await?;
    Ok(Json(json!({ "success": true, "data": tasks })))
}

/// POST /api/tasks - create a task bound to the caller
pub async fn tasks_post(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TaskCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, due_date) = payload
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let repo = task_repo(&user).await?;
    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, status, priority, due_date, project_id, labels, user_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(&title)
    .bind(payload.description.unwrap_or_default())
    .bind(payload.status.unwrap_or_default())
    .bind(payload.priority.unwrap_or_default())
    .bind(due_date)
    .bind(payload.project)
    .bind(payload.labels.unwrap_or_default())
    .bind(repo.owner())
    .fetch_one(repo.pool())
    .await
    .map_err(task_write_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": task })),
    ))
}

/// GET /api/tasks/:id - 404 covers both "absent" and "not yours"
pub async fn task_get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let task = task_repo(&user).await?.fetch_or_404(id).await?;
    Ok(Json(json!({ "success": true, "data": task })))
}

/// PUT /api/tasks/:id - partial update; only supplied fields change
pub async fn task_put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = task_repo(&user).await?;
    let mut task = repo.fetch_or_404(id).await?;
    if payload.is_empty() {
        return Ok(Json(json!({ "success": true, "data": task })));
    }
    payload.apply(&mut task);

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $1, description = $2, status = $3, priority = $4, \
         due_date = $5, project_id = $6, labels = $7, updated_at = now() \
         WHERE id = $8 AND user_id = $9 RETURNING *",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_date)
    .bind(task.project_id)
    .bind(&task.labels)
    .bind(task.id)
    .bind(repo.owner())
    .fetch_one(repo.pool())
    .await
    .map_err(task_write_error)?;

    Ok(Json(json!({ "success": true, "data": task })))
}

/// DELETE /api/tasks/:id
pub async fn task_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    task_repo(&user).await?.delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "message": "Task deleted successfully" }
    })))
}
