use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use super::double_option;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "task_priority", rename_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub project_id: Option<Uuid>,
    pub labels: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskCreateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub project: Option<Uuid>,
    pub labels: Option<Vec<String>>,
}

impl TaskCreateRequest {
    /// Validate required fields, returning the trimmed title and due date.
    pub fn validate(&self) -> Result<(String, DateTime<Utc>), HashMap<String, String>> {
        let mut errors = HashMap::new();

        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if title.is_none() {
            errors.insert("title".to_string(), "Title is required".to_string());
        }

        if self.due_date.is_none() {
            errors.insert("due_date".to_string(), "Due date is required".to_string());
        }

        match (title, self.due_date) {
            (Some(title), Some(due_date)) => Ok((title, due_date)),
            _ => Err(errors),
        }
    }
}

/// Partial update: absent fields leave the stored value untouched.
/// `project` and `description` use the double-option encoding so an
/// explicit null can clear the value while omission keeps it.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdateRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project: Option<Option<Uuid>>,
    pub labels: Option<Vec<String>>,
}

impl TaskUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.project.is_none()
            && self.labels.is_none()
    }

    /// Merge supplied fields into an existing task. Blank titles are
    /// ignored rather than erasing the stored one.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                task.title = trimmed.to_string();
            }
        }
        if let Some(description) = self.description {
            // The column is non-null; explicit null resets to empty
            task.description = description.unwrap_or_default();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(project) = self.project {
            task.project_id = project;
        }
        if let Some(labels) = self.labels {
            task.labels = labels;
        }
    }
}
