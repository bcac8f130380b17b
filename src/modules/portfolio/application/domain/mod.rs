pub mod entities;
pub mod versioning;

pub use entities::{
    Actor, PortfolioRecord, PortfolioStatus, VersionRecord, CATEGORIES, CATEGORY_WILDCARD,
};
