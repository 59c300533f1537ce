use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use super::double_option;

/// Color assigned when the client does not pick one
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectCreateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl ProjectCreateRequest {
    /// Validate required fields, returning the trimmed name.
    pub fn validate(&self) -> Result<String, HashMap<String, String>> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match name {
            Some(name) => Ok(name),
            None => {
                let mut errors = HashMap::new();
                errors.insert("name".to_string(), "Project name is required".to_string());
                Err(errors)
            }
        }
    }
}

/// Partial update; `description` can be cleared with an explicit null.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectUpdateRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}

impl ProjectUpdateRequest {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                project.name = trimmed.to_string();
            }
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Apollo".to_string(),
            description: Some("moonshot".to_string()),
            color: DEFAULT_PROJECT_COLOR.to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_requires_name() {
        let errors = ProjectCreateRequest::default().validate().unwrap_err();
        assert_eq!(errors["name"], "Project name is required");

        let blank = ProjectCreateRequest {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let mut project = sample_project();
        let update: ProjectUpdateRequest =
            serde_json::from_value(serde_json::json!({ "color": "#FF0000" })).unwrap();
        update.apply(&mut project);

        assert_eq!(project.color, "#FF0000");
        assert_eq!(project.name, "Apollo");
        assert_eq!(project.description.as_deref(), Some("moonshot"));
    }

    #[test]
    fn explicit_null_clears_description() {
        let mut project = sample_project();
        let update: ProjectUpdateRequest =
            serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        update.apply(&mut project);
        assert_eq!(project.description, None);
    }
}
