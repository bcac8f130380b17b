pub mod adapter;
pub mod application;
pub mod storage_use_cases;
