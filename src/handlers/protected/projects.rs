// /api/projects - owner-scoped project CRUD
//
// Deleting a project detaches its tasks (clears project_id) instead of
// deleting them; both statements run in one transaction.

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::project::{
    Project, ProjectCreateRequest, ProjectUpdateRequest, DEFAULT_PROJECT_COLOR,
};
use crate::database::models::task::Task;
use crate::database::scoped::ScopedRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

async fn project_repo(user: &AuthUser) -> Result<ScopedRepository<Project>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(ScopedRepository::new("projects", "Project", pool, user.user_id))
}

/// GET /api/projects - caller's projects, newest first
pub async fn projects_get(
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let projects = project_repo(&user).await?.list().await?;
    Ok(Json(json!({ "success": true, "data": projects })))
}

/// POST /api/projects - create a project bound to the caller
pub async fn projects_post(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProjectCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = payload
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let repo = project_repo(&user).await?;
    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (name, description, color, user_id) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&name)
    .bind(payload.description)
    .bind(
        payload
            .color
            .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
    )
    .bind(repo.owner())
    .fetch_one(repo.pool())
    .await
    .map_err(DatabaseError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": project })),
    ))
}

/// GET /api/projects/:id
pub async fn project_get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let project = project_repo(&user).await?.fetch_or_404(id).await?;
    Ok(Json(json!({ "success": true, "data": project })))
}

/// PUT /api/projects/:id - partial update
pub async fn project_put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = project_repo(&user).await?;
    let mut project = repo.fetch_or_404(id).await?;
    payload.apply(&mut project);

    let project = sqlx::query_as::<_, Project>(
        "UPDATE projects SET name = $1, description = $2, color = $3, updated_at = now() \
         WHERE id = $4 AND user_id = $5 RETURNING *",
    )
    .bind(&project.name)
    .bind(&project.description)
    .bind(&project.color)
    .bind(project.id)
    .bind(repo.owner())
    .fetch_one(repo.pool())
    .await
    .map_err(DatabaseError::from)?;

    Ok(Json(json!({ "success": true, "data": project })))
}

/// DELETE /api/projects/:id - detach tasks, then remove the project
pub async fn project_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = project_repo(&user).await?;
    // Ownership check up front so foreign ids 404 before any write
    let project = repo.fetch_or_404(id).await?;

    let mut tx = repo.pool().begin().await.map_err(DatabaseError::from)?;

    sqlx::query(
        "UPDATE tasks SET project_id = NULL, updated_at = now() \
         WHERE project_id = $1 AND user_id = $2",
    )
    .bind(project.id)
    .bind(repo.owner())
    .execute(&mut *tx)
    .await
    .map_err(DatabaseError::from)?;

    sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
        .bind(project.id)
        .bind(repo.owner())
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(Json(json!({
        "success": true,
        "data": { "message": "Project deleted successfully" }
    })))
}

/// GET /api/projects/:id/tasks - the project's tasks, newest first
pub async fn project_tasks_get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = project_repo(&user).await?;
    let project = repo.fetch_or_404(id).await?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE project_id = $1 AND user_id = $2 ORDER BY created_at DESC",
    )
    .bind(project.id)
    .bind(repo.owner())
    .fetch_all(repo.pool())
    .await
    .map_err(DatabaseError::from)?;

    Ok(Json(json!({ "success": true, "data": tasks })))
}
