pub mod auth;

pub use auth::{AdminUser, AuthenticatedUser, MaybeUser, Principal};
