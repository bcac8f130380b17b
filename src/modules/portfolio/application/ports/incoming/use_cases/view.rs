use crate::portfolio::application::domain::{PortfolioRecord, VersionRecord};

/// A portfolio as returned to callers, with the pieces resolved outside its row.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioView {
    pub portfolio: PortfolioRecord,
    pub image_url: Option<String>,
    /// Filled on detail reads.
    pub active_version: Option<VersionRecord>,
    /// Filled on creation only.
    pub versions: Vec<VersionRecord>,
}

impl PortfolioView {
    pub fn bare(portfolio: PortfolioRecord) -> Self {
        Self {
            portfolio,
            image_url: None,
            active_version: None,
            versions: Vec::new(),
        }
    }

    /// Thumbnail of the active version, when there is one.
    pub fn thumbnail(&self) -> Option<&str> {
        self.active_version
            .as_ref()
            .map(|v| v.thumbnail.as_str())
            .filter(|t| !t.is_empty())
    }
}
