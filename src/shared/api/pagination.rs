use serde::Serialize;

#[derive(Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, page_size: u64) -> Self {
        Self {
            success: true,
            data,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`, zero when the page size is zero.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

const MAX_OFFSET: u64 = i64::MAX as u64;

/// 1-based page request after defaults and caps are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub page_size: u64,
}

impl PageParams {
    /// Fills missing/zero values with defaults and clamps the page size to `max_page_size`.
    pub fn resolve(
        page: Option<u64>,
        page_size: Option<u64>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s > 0)
            .unwrap_or(default_page_size)
            .min(max_page_size);

        Self { page, page_size }
    }

    /// Rows to skip, clamped to what a Postgres `OFFSET` (bigint) accepts.
    /// An out-of-range page reads nothing.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Unknown values fall back to descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_params_defaults_and_cap() {
        let p = PageParams::resolve(None, None, 12, 100);
        assert_eq!(p, PageParams { page: 1, page_size: 12 });
        assert_eq!(p.offset(), 0);

        let p = PageParams::resolve(Some(3), Some(500), 50, 100);
        assert_eq!(p.page_size, 100);
        assert_eq!(p.offset(), 200);

        let p = PageParams::resolve(Some(0), Some(0), 20, 100);
        assert_eq!(p, PageParams { page: 1, page_size: 20 });
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let p = PageParams::resolve(Some(u64::MAX), Some(12), 12, 100);
        assert_eq!(p.page, u64::MAX);
        assert_eq!(p.offset(), i64::MAX as u64);

        let p = PageParams::resolve(Some(1_000_001), Some(10), 12, 100);
        assert_eq!(p.offset(), 10_000_000);
    }

    #[test]
    fn test_sort_order_fallback() {
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }
}
