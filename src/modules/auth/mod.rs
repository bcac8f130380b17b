pub mod adapter;
pub mod application;
pub mod auth_use_cases;
