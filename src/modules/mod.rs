pub mod auth;
pub mod moderation;
pub mod portfolio;
pub mod storage;
pub mod thumbnail;
