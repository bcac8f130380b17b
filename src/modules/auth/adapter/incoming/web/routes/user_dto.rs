use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::UserProfile;

/// Public user representation; never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "Jane D.")]
    pub nickname: String,
    pub avatar: String,
    pub bio: String,
    #[schema(example = "user")]
    pub role: String,
    #[schema(example = "approved")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserProfile> for UserResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id.to_string(),
            email: p.email,
            username: p.username,
            nickname: p.nickname,
            avatar: p.avatar,
            bio: p.bio,
            role: p.role.to_string(),
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}
