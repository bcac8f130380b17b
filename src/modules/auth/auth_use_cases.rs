use std::sync::Arc;

use crate::auth::application::use_cases::{
    delete_user::IDeleteUserUseCase, fetch_profile::FetchUserProfileUseCase,
    list_users::ListUsersUseCase, login_user::ILoginUserUseCase,
    register_user::IRegisterUserUseCase, reset_password::IResetPasswordUseCase,
    update_profile::UpdateUserProfileUseCase, update_user_status::UpdateUserStatusUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub register: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub login: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub fetch_profile: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    pub update_profile: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    pub list_users: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub update_user_status: Arc<dyn UpdateUserStatusUseCase + Send + Sync>,
    pub delete_user: Arc<dyn IDeleteUserUseCase + Send + Sync>,
    pub reset_password: Arc<dyn IResetPasswordUseCase + Send + Sync>,
}
