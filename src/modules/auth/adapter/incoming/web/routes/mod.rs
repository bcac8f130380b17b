pub mod admin_users;
pub mod login_user;
pub mod profile;
pub mod register_user;
pub mod user_dto;

pub use admin_users::{
    delete_user_handler, list_users_handler, reset_password_handler, update_user_status_handler,
};
pub use login_user::login_user_handler;
pub use profile::{get_profile_handler, update_profile_handler};
pub use register_user::register_user_handler;
