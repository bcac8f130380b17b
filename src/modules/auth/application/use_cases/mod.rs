pub mod delete_user;
pub mod fetch_profile;
pub mod list_users;
pub mod login_user;
pub mod register_user;
pub mod reset_password;
pub mod seed_admin;
pub mod update_profile;
pub mod update_user_status;
