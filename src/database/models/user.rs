use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register payload after field validation
#[derive(Debug)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<ValidRegistration, HashMap<String, String>> {
        let mut errors = HashMap::new();

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if name.is_none() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }

        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| looks_like_email(e));
        if email.is_none() {
            errors.insert("email".to_string(), "Invalid email address".to_string());
        }

        let password = self.password.filter(|p| p.len() >= MIN_PASSWORD_LEN);
        if password.is_none() {
            errors.insert(
                "password".to_string(),
                format!("Password must be at least {} characters long", MIN_PASSWORD_LEN),
            );
        }

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(ValidRegistration {
                name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), HashMap<String, String>> {
        let mut errors = HashMap::new();

        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| looks_like_email(e));
        if email.is_none() {
            errors.insert("email".to_string(), "Invalid email address".to_string());
        }

        let password = self.password.filter(|p| !p.is_empty());
        if password.is_none() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors),
        }
    }
}

/// Cheap structural check: local part, at-sign, domain with a dot.
/// Delivery problems surface at mail time, not registration time.
fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
