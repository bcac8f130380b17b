pub mod portfolio_versions;
pub mod portfolios;
