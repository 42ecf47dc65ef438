//! User handlers
//!
//! Registration and the authenticated user's profile.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserRole};
use crate::error::AppError;
use crate::AppState;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    /// Grants the admin role when it matches the server's ADMIN_TOKEN
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Response body for user registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    /// API key for authenticated calls (Authorization: Bearer <api_key>)
    pub api_key: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: String,
    pub last_seen_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_string(),
            username: user.username,
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
            last_seen_at: user.last_seen_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// POST /users/register
///
/// Register a new user. Returns the API key (only shown once).
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let (user, api_key) = state
        .user_service
        .register(
            &request.firstname,
            &request.lastname,
            request.admin_token.as_deref(),
        )
        .await?;

    Ok(Json(RegisterResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        message: format!(
            "Welcome, {}! Save this API key - it won't be shown again.\n\n\
             Post a comment:\n\
               curl -H \"Authorization: Bearer {}\" -H \"Content-Type: application/json\" \\\n\
                    -d '{{\"comment\": \"...\"}}' <host>/comments",
            user.username, api_key
        ),
        api_key,
    }))
}

/// GET /users/me
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}
