pub mod admin_portfolios;
pub mod portfolio_dto;
pub mod portfolios;
pub mod versions;

pub use admin_portfolios::{
    admin_delete_portfolio_handler, admin_list_portfolios_handler, review_portfolio_handler,
};
pub use portfolios::{
    categories_handler, create_portfolio_handler, delete_portfolio_handler,
    get_portfolio_handler, like_portfolio_handler, list_portfolios_handler,
    my_portfolios_handler, update_portfolio_handler,
};
pub use versions::{
    activate_version_handler, create_version_handler, delete_version_handler,
    get_version_handler, list_versions_handler, update_version_handler,
};
