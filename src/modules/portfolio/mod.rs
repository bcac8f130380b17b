pub mod adapter;
pub mod application;
pub mod portfolio_use_cases;
