use async_trait::async_trait;
use std::sync::Arc;

use super::{provided, with_image_url};
use crate::portfolio::application::domain::CATEGORY_WILDCARD;
use crate::portfolio::application::ports::incoming::use_cases::{
    ListPortfoliosUseCase, ListScope, PortfolioError, PortfolioListRequest, PortfolioPage,
    PortfolioView, DEFAULT_ADMIN_PORTFOLIO_PAGE_SIZE, DEFAULT_PORTFOLIO_PAGE_SIZE,
    MAX_PORTFOLIO_PAGE_SIZE,
};
use crate::portfolio::application::ports::outgoing::{
    ImageUrlResolver, PortfolioListQuery, PortfolioQuery, PortfolioSortField, Visibility,
};
use crate::shared::api::{PageParams, SortOrder};

pub struct ListPortfoliosService<Q>
where
    Q: PortfolioQuery,
{
    query: Q,
    images: Arc<dyn ImageUrlResolver>,
}

impl<Q> ListPortfoliosService<Q>
where
    Q: PortfolioQuery,
{
    pub fn new(query: Q, images: Arc<dyn ImageUrlResolver>) -> Self {
        Self { query, images }
    }
}

/// Turns a caller's request into the storage query for its scope.
fn build_query(request: PortfolioListRequest) -> PortfolioListQuery {
    let default_size = match request.scope {
        ListScope::Admin => DEFAULT_ADMIN_PORTFOLIO_PAGE_SIZE,
        _ => DEFAULT_PORTFOLIO_PAGE_SIZE,
    };
    let page = PageParams::resolve(
        request.page,
        request.page_size,
        default_size,
        MAX_PORTFOLIO_PAGE_SIZE,
    );

    let (visibility, status, owner_id) = match request.scope {
        ListScope::Admin => (Visibility::Everything, request.status, request.owner_id),
        ListScope::Public(Some(actor)) if actor.is_admin => {
            (Visibility::Everything, request.status, request.owner_id)
        }
        ListScope::Public(Some(actor)) => (
            Visibility::PublishedOrOwnedBy(actor.user_id),
            None,
            request.owner_id,
        ),
        ListScope::Public(None) => (Visibility::PublishedOnly, None, request.owner_id),
        ListScope::Mine(user_id) => (Visibility::Everything, request.status, Some(user_id)),
    };

    PortfolioListQuery {
        visibility,
        status,
        owner_id,
        category: provided(request.category)
            .map(|c| c.trim().to_string())
            .filter(|c| c != CATEGORY_WILDCARD),
        search: provided(request.search).map(|s| s.trim().to_string()),
        sort: PortfolioSortField::parse(request.sort_by.as_deref()),
        order: SortOrder::parse(request.order.as_deref()),
        page,
    }
}

#[async_trait]
impl<Q> ListPortfoliosUseCase for ListPortfoliosService<Q>
where
    Q: PortfolioQuery + Send + Sync,
{
    async fn execute(
        &self,
        request: PortfolioListRequest,
    ) -> Result<PortfolioPage, PortfolioError> {
        let query = build_query(request);
        let (rows, total) = self.query.list(&query).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(with_image_url(self.images.as_ref(), PortfolioView::bare(row)).await);
        }

        Ok(PortfolioPage {
            items,
            total,
            page: query.page.page,
            page_size: query.page.page_size,
        })
    }
}
