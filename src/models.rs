use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mock user record returned by the users endpoints. Never stored anywhere;
/// instances live exactly as long as the response that carries them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Post record. Declared alongside `User` but not served by any route yet.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/users`. Fields default to empty strings so a missing
/// key decodes the same as an explicitly empty one; the handler validates
/// both away.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Service metadata served by `GET /api/info`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub app_name: String,
    pub version: String,
    pub author: String,
    pub endpoints: Vec<String>,
    pub description: String,
}

/// Error envelope for all API error responses.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    pub message: String,
}
