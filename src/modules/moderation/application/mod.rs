pub mod domain;
pub mod moderation_use_cases;
pub mod ports;
pub mod service;
