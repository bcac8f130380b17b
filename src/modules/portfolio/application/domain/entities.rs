use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioStatus {
    Draft,
    Published,
    Rejected,
    Deleted,
}

impl PortfolioStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioStatus::Draft => "draft",
            PortfolioStatus::Published => "published",
            PortfolioStatus::Rejected => "rejected",
            PortfolioStatus::Deleted => "deleted",
        }
    }
}

impl FromStr for PortfolioStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PortfolioStatus::Draft),
            "published" => Ok(PortfolioStatus::Published),
            "rejected" => Ok(PortfolioStatus::Rejected),
            "deleted" => Ok(PortfolioStatus::Deleted),
            other => Err(format!("Unknown portfolio status: {}", other)),
        }
    }
}

impl fmt::Display for PortfolioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(value, label)` pairs served by the category endpoint. `all` is a filter wildcard.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("all", "All works"),
    ("ai", "AI generated"),
    ("ui", "UI/UX"),
    ("web", "Web design"),
    ("mobile", "Mobile apps"),
    ("brand", "Brand design"),
    ("3d", "3D rendering"),
];

pub const CATEGORY_WILDCARD: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: String,
    pub likes: i32,
    pub views: i32,
    pub status: PortfolioStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecord {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub label: String,
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub thumbnail: String,
    pub change_log: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who is acting on a portfolio. `None` in a read context means anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }
}

impl PortfolioRecord {
    /// Owner or admin.
    pub fn writable_by(&self, actor: &Actor) -> bool {
        actor.is_admin || actor.user_id == self.owner_id
    }

    /// Published portfolios are public; owners see their own in any status; admins see all.
    pub fn visible_to(&self, viewer: Option<&Actor>) -> bool {
        if self.status == PortfolioStatus::Published {
            return true;
        }
        viewer.is_some_and(|a| self.writable_by(a))
    }

    pub fn author_initial(&self) -> String {
        self.author.chars().next().map(String::from).unwrap_or_default()
    }

    /// Emoji placeholder shown when no image object is attached.
    pub fn image_placeholder(&self) -> String {
        format!("🎨 {}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: PortfolioStatus, owner: Uuid) -> PortfolioRecord {
        let now = Utc::now();
        PortfolioRecord {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: "Landing".into(),
            author: "Élodie".into(),
            description: String::new(),
            content: String::new(),
            category: "web".into(),
            tags: vec![],
            image_object_id: None,
            ai_level: String::new(),
            likes: 0,
            views: 0,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_visibility_rules() {
        let owner = Uuid::new_v4();
        let stranger = Actor::user(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());

        for status in [
            PortfolioStatus::Draft,
            PortfolioStatus::Rejected,
            PortfolioStatus::Deleted,
        ] {
            let p = record(status, owner);
            assert!(!p.visible_to(None));
            assert!(!p.visible_to(Some(&stranger)));
            assert!(p.visible_to(Some(&Actor::user(owner))));
            assert!(p.visible_to(Some(&admin)));
        }

        assert!(record(PortfolioStatus::Published, owner).visible_to(None));
    }

    #[test]
    fn test_write_permission() {
        let owner = Uuid::new_v4();
        let p = record(PortfolioStatus::Published, owner);

        assert!(p.writable_by(&Actor::user(owner)));
        assert!(p.writable_by(&Actor::admin(Uuid::new_v4())));
        assert!(!p.writable_by(&Actor::user(Uuid::new_v4())));
    }

    #[test]
    fn test_display_helpers() {
        let p = record(PortfolioStatus::Draft, Uuid::new_v4());
        assert_eq!(p.author_initial(), "É");
        assert_eq!(p.image_placeholder(), "🎨 Landing");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "published".parse::<PortfolioStatus>(),
            Ok(PortfolioStatus::Published)
        );
        assert!("archived".parse::<PortfolioStatus>().is_err());
    }
}
