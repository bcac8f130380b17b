use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserId, UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::UserListFilter;
use crate::auth::application::use_cases::delete_user::{
    DeleteUserError, DeleteUserRequest, IDeleteUserUseCase,
};
use crate::auth::application::use_cases::fetch_profile::{
    FetchProfileError, FetchUserProfileUseCase,
};
use crate::auth::application::use_cases::list_users::{ListUsersError, ListUsersUseCase, UserPage};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest, RegisterUserResponse,
};
use crate::auth::application::use_cases::reset_password::{
    generate_temp_password, IResetPasswordUseCase, ResetPasswordError,
};
use crate::auth::application::use_cases::update_profile::{
    UpdateProfileError, UpdateProfileInput, UpdateUserProfileUseCase,
};
use crate::auth::application::use_cases::update_user_status::{
    UpdateUserStatusError, UpdateUserStatusInput, UpdateUserStatusUseCase,
};
use crate::shared::api::PageParams;

pub fn sample_profile() -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: Uuid::new_v4(),
        email: "jane@example.com".to_string(),
        username: "jane".to_string(),
        nickname: "Jane".to_string(),
        avatar: String::new(),
        bio: String::new(),
        role: Role::User,
        status: UserStatus::Approved,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default, Clone)]
pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(
        &self,
        _request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

/// Echoes the caller's id on a sample profile.
#[derive(Default, Clone)]
pub struct StubFetchUserProfileUseCase;

#[async_trait]
impl FetchUserProfileUseCase for StubFetchUserProfileUseCase {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchProfileError> {
        let mut profile = sample_profile();
        profile.id = user_id.value();
        Ok(profile)
    }
}

#[derive(Default, Clone)]
pub struct StubUpdateUserProfileUseCase;

#[async_trait]
impl UpdateUserProfileUseCase for StubUpdateUserProfileUseCase {
    async fn execute(
        &self,
        user_id: UserId,
        _input: UpdateProfileInput,
    ) -> Result<UserProfile, UpdateProfileError> {
        let mut profile = sample_profile();
        profile.id = user_id.value();
        Ok(profile)
    }
}

#[derive(Default, Clone)]
pub struct StubListUsersUseCase;

#[async_trait]
impl ListUsersUseCase for StubListUsersUseCase {
    async fn execute(
        &self,
        _filter: UserListFilter,
        page: PageParams,
    ) -> Result<UserPage, ListUsersError> {
        Ok(UserPage {
            items: vec![],
            total: 0,
            page: page.page,
            page_size: page.page_size,
        })
    }
}

/// Applies the requested status and role to a sample profile.
#[derive(Default, Clone)]
pub struct StubUpdateUserStatusUseCase;

#[async_trait]
impl UpdateUserStatusUseCase for StubUpdateUserStatusUseCase {
    async fn execute(
        &self,
        input: UpdateUserStatusInput,
    ) -> Result<UserProfile, UpdateUserStatusError> {
        let mut profile = sample_profile();
        profile.id = input.user_id.value();
        profile.status = input.status;
        if let Some(role) = input.role {
            profile.role = role;
        }
        Ok(profile)
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteUserUseCase;

#[async_trait]
impl IDeleteUserUseCase for StubDeleteUserUseCase {
    async fn execute(&self, _request: DeleteUserRequest) -> Result<(), DeleteUserError> {
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn execute(&self, _user_id: UserId) -> Result<String, ResetPasswordError> {
        Ok(generate_temp_password())
    }
}
