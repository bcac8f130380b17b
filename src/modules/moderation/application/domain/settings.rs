use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSettings {
    pub user_approval_required: bool,
    pub portfolio_approval_required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` keeps the stored flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub user_approval_required: Option<bool>,
    pub portfolio_approval_required: Option<bool>,
}

impl SettingsPatch {
    pub fn apply_to(&self, settings: &mut AdminSettings) {
        if let Some(v) = self.user_approval_required {
            settings.user_approval_required = v;
        }
        if let Some(v) = self.portfolio_approval_required {
            settings.portfolio_approval_required = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratedEntity {
    User,
    Portfolio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    AutoApproved,
    AwaitingReview,
}

/// Creation-time status decision. Later edits never pass through here.
pub fn initial_outcome(settings: &AdminSettings, entity: ModeratedEntity) -> ModerationOutcome {
    let review_required = match entity {
        ModeratedEntity::User => settings.user_approval_required,
        ModeratedEntity::Portfolio => settings.portfolio_approval_required,
    };

    if review_required {
        ModerationOutcome::AwaitingReview
    } else {
        ModerationOutcome::AutoApproved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(users: bool, portfolios: bool) -> AdminSettings {
        let now = Utc::now();
        AdminSettings {
            user_approval_required: users,
            portfolio_approval_required: portfolios,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_defaults_auto_approve_everything() {
        let s = settings(false, false);

        assert_eq!(
            initial_outcome(&s, ModeratedEntity::User),
            ModerationOutcome::AutoApproved
        );
        assert_eq!(
            initial_outcome(&s, ModeratedEntity::Portfolio),
            ModerationOutcome::AutoApproved
        );
    }

    #[test]
    fn test_flags_are_independent() {
        let s = settings(true, false);

        assert_eq!(
            initial_outcome(&s, ModeratedEntity::User),
            ModerationOutcome::AwaitingReview
        );
        assert_eq!(
            initial_outcome(&s, ModeratedEntity::Portfolio),
            ModerationOutcome::AutoApproved
        );

        let s = settings(false, true);
        assert_eq!(
            initial_outcome(&s, ModeratedEntity::Portfolio),
            ModerationOutcome::AwaitingReview
        );
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut s = settings(true, true);

        SettingsPatch {
            user_approval_required: Some(false),
            portfolio_approval_required: None,
        }
        .apply_to(&mut s);

        assert!(!s.user_approval_required);
        assert!(s.portfolio_approval_required);
    }
}
