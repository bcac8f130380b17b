use actix_web::{get, put, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::user_dto::UserResponse;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::use_cases::fetch_profile::FetchProfileError;
use crate::auth::application::use_cases::update_profile::{UpdateProfileError, UpdateProfileInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "jane_doe")]
    pub username: Option<String>,
    #[schema(example = "Jane")]
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/profile")]
pub async fn get_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .fetch_profile
        .execute(UserId::from(user.user_id))
        .await
    {
        Ok(profile) => ApiResponse::success(UserResponse::from(profile)),
        Err(FetchProfileError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchProfileError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load profile");
            ApiResponse::internal_error()
        }
    }
}

/// Update the current user's profile; empty fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
    )
)]
#[put("/api/profile")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let input = UpdateProfileInput {
        username: req.username,
        nickname: req.nickname,
        avatar: req.avatar,
        bio: req.bio,
    };

    match data
        .auth
        .update_profile
        .execute(UserId::from(user.user_id), input)
        .await
    {
        Ok(profile) => {
            info!(user_id = %user.user_id, "Profile updated");
            ApiResponse::success(UserResponse::from(profile))
        }
        Err(UpdateProfileError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdateProfileError::UsernameTaken) => {
            ApiResponse::conflict("USERNAME_TAKEN", "Username already taken")
        }
        Err(e @ UpdateProfileError::InvalidUsername(_))
        | Err(e @ UpdateProfileError::NicknameTooLong) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(UpdateProfileError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to update profile");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{Role, UserProfile};
    use crate::auth::application::use_cases::update_profile::UpdateUserProfileUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, test_token_provider};
    use crate::tests::support::stubs::sample_profile;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct EchoUpdate;

    #[async_trait]
    impl UpdateUserProfileUseCase for EchoUpdate {
        async fn execute(
            &self,
            user_id: UserId,
            input: UpdateProfileInput,
        ) -> Result<UserProfile, UpdateProfileError> {
            if input.username.as_deref() == Some("taken") {
                return Err(UpdateProfileError::UsernameTaken);
            }
            let mut profile = sample_profile();
            profile.id = user_id.value();
            if let Some(nickname) = input.nickname {
                profile.nickname = nickname;
            }
            Ok(profile)
        }
    }

    #[actix_web::test]
    async fn test_get_profile_requires_token() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(test_token_provider())
                .service(get_profile_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/profile").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_get_profile_returns_caller() {
        let provider = test_token_provider();
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(provider.clone())
                .service(get_profile_handler),
        )
        .await;

        let user_id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&provider, user_id, Role::User))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], user_id.to_string());
    }

    #[actix_web::test]
    async fn test_update_profile() {
        let provider = test_token_provider();
        let app_state = TestAppStateBuilder::default()
            .with_update_profile(EchoUpdate)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(provider.clone())
                .service(update_profile_handler),
        )
        .await;

        let user_id = Uuid::new_v4();
        let req = test::TestRequest::put()
            .uri("/api/profile")
            .insert_header(bearer(&provider, user_id, Role::User))
            .set_json(serde_json::json!({ "nickname": "Janie" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["nickname"], "Janie");

        let req = test::TestRequest::put()
            .uri("/api/profile")
            .insert_header(bearer(&provider, user_id, Role::User))
            .set_json(serde_json::json!({ "username": "taken" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
    }
}
