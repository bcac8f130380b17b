//! Shared in-memory doubles for the outgoing ports.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::{
    HashError, NewUserData, PasswordHasher, ProfilePatch, UserListFilter, UserQuery,
    UserQueryError, UserRecord, UserRepository, UserRepositoryError,
};
use crate::moderation::application::domain::{AdminSettings, SettingsPatch};
use crate::moderation::application::ports::outgoing::{
    AdminSettingsRepository, AdminSettingsRepositoryError,
};
use crate::portfolio::application::domain::versioning::next_label;
use crate::portfolio::application::domain::{PortfolioRecord, PortfolioStatus, VersionRecord};
use crate::portfolio::application::ports::outgoing::{
    AuthorDirectory, AuthorDirectoryError, ImageUrlResolver, NewPortfolio, NewVersion,
    PortfolioChanges, PortfolioListQuery, PortfolioQuery, PortfolioQueryError,
    PortfolioRepository, PortfolioRepositoryError, PortfolioSortField, VersionChanges,
    VersionDraft, Visibility,
};
use crate::shared::api::SortOrder;
use crate::storage::application::domain::{
    ConnectionSettings, FileObject, NewFileObject, StorageConfig, StorageConfigDraft,
    DEFAULT_REGION,
};
use crate::storage::application::ports::outgoing::{
    ActivationHook, FileListQuery, FileObjectRepository, FileObjectRepositoryError,
    ObjectStoreClient, ObjectStoreConnector, ObjectStoreError, PutObject,
    StorageConfigRepository, StorageConfigRepositoryError,
};

/// Deterministic hasher: `hashed:{password}`.
#[derive(Debug, Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUsers {
    rows: Arc<Mutex<Vec<UserRecord>>>,
}

impl InMemoryUsers {
    pub fn insert(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
        status: UserStatus,
    ) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(UserRecord {
            id,
            email: email.to_string(),
            username: username.to_string(),
            nickname: username.to_string(),
            password_hash: format!("hashed:{password}"),
            avatar: String::new(),
            bio: String::new(),
            role,
            status,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn set_nickname(&self, user_id: Uuid, nickname: &str) {
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|u| u.id == user_id) {
            row.nickname = nickname.to_string();
        }
    }

    pub fn record_by_email(&self, email: &str) -> Option<UserRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    fn modify<F>(&self, user_id: Uuid, f: F) -> Result<UserProfile, UserRepositoryError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(row);
        row.updated_at = Utc::now();
        Ok(row.to_profile())
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserQueryError> {
        Ok(self.record_by_email(email))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(
        &self,
        filter: UserListFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), UserQueryError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<UserRecord> = rows
            .iter()
            .rev()
            .filter(|u| filter.status.is_none_or(|s| u.status == s))
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| {
                filter.search.as_deref().is_none_or(|s| {
                    let s = s.to_lowercase();
                    u.email.to_lowercase().contains(&s)
                        || u.username.to_lowercase().contains(&s)
                        || u.nickname.to_lowercase().contains(&s)
                })
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn count_all(&self) -> Result<u64, UserQueryError> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: NewUserData) -> Result<UserProfile, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|u| u.email == data.email || u.username == data.username)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: data.email,
            username: data.username,
            nickname: data.nickname,
            password_hash: data.password_hash,
            avatar: String::new(),
            bio: String::new(),
            role: data.role,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        let profile = record.to_profile();
        rows.push(record);
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<UserProfile, UserRepositoryError> {
        self.modify(user_id, |u| {
            if let Some(v) = patch.username {
                u.username = v;
            }
            if let Some(v) = patch.nickname {
                u.nickname = v;
            }
            if let Some(v) = patch.avatar {
                u.avatar = v;
            }
            if let Some(v) = patch.bio {
                u.bio = v;
            }
        })
    }

    async fn update_status_and_role(
        &self,
        user_id: Uuid,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<UserProfile, UserRepositoryError> {
        self.modify(user_id, |u| {
            u.status = status;
            if let Some(r) = role {
                u.role = r;
            }
        })
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| u.password_hash = new_password_hash)
            .map(|_| ())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != user_id);
        if rows.len() == before {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemorySettings {
    current: Arc<Mutex<AdminSettings>>,
}

impl InMemorySettings {
    pub fn new(user_approval_required: bool, portfolio_approval_required: bool) -> Self {
        let now = Utc::now();
        Self {
            current: Arc::new(Mutex::new(AdminSettings {
                user_approval_required,
                portfolio_approval_required,
                created_at: now,
                updated_at: now,
            })),
        }
    }
}

#[async_trait]
impl AdminSettingsRepository for InMemorySettings {
    async fn get_or_create(&self) -> Result<AdminSettings, AdminSettingsRepositoryError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn update(
        &self,
        patch: SettingsPatch,
    ) -> Result<AdminSettings, AdminSettingsRepositoryError> {
        let mut current = self.current.lock().unwrap();
        patch.apply_to(&mut current);
        current.updated_at = Utc::now();
        Ok(current.clone())
    }
}

// ──── Portfolios ────

#[derive(Default)]
struct PortfolioTables {
    portfolios: Vec<PortfolioRecord>,
    /// Insertion order doubles as creation order.
    versions: Vec<VersionRecord>,
}

impl PortfolioTables {
    fn portfolio_mut(&mut self, id: Uuid) -> Result<&mut PortfolioRecord, PortfolioRepositoryError> {
        self.portfolios
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PortfolioRepositoryError::NotFound)
    }

    fn make_only_active(&mut self, portfolio_id: Uuid, version_id: Uuid) {
        for v in self.versions.iter_mut().filter(|v| v.portfolio_id == portfolio_id) {
            v.is_active = v.id == version_id;
        }
    }
}

/// Portfolio store behind both the repository and the query port.
#[derive(Clone, Default)]
pub struct InMemoryPortfolios {
    tables: Arc<Mutex<PortfolioTables>>,
}

impl InMemoryPortfolios {
    pub fn seed(&self, owner_id: Uuid, status: PortfolioStatus) -> Uuid {
        let now = Utc::now();
        let record = PortfolioRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: "Seeded work".into(),
            author: "Seed".into(),
            description: "seeded description".into(),
            content: String::new(),
            category: "web".into(),
            tags: vec!["seed".into()],
            image_object_id: None,
            ai_level: "AI assisted".into(),
            likes: 0,
            views: 0,
            status,
            created_at: now,
            updated_at: now,
        };
        let id = record.id;
        self.tables.lock().unwrap().portfolios.push(record);
        id
    }

    /// Adds a version titled `"{label} title"` and returns its id.
    pub fn seed_version(&self, portfolio_id: Uuid, label: &str, active: bool) -> Uuid {
        let now = Utc::now();
        let version = VersionRecord {
            id: Uuid::new_v4(),
            portfolio_id,
            label: label.into(),
            title: format!("{label} title"),
            description: String::new(),
            html_content: String::new(),
            thumbnail: String::new(),
            change_log: String::new(),
            is_active: active,
            created_at: now,
            updated_at: now,
        };
        let id = version.id;
        let mut tables = self.tables.lock().unwrap();
        tables.versions.push(version);
        if active {
            tables.make_only_active(portfolio_id, id);
        }
        id
    }

    pub fn set_image(&self, portfolio_id: Uuid, object_id: Uuid) {
        let mut tables = self.tables.lock().unwrap();
        if let Ok(p) = tables.portfolio_mut(portfolio_id) {
            p.image_object_id = Some(object_id);
        }
    }

    pub fn portfolio(&self, id: Uuid) -> Option<PortfolioRecord> {
        self.tables
            .lock()
            .unwrap()
            .portfolios
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Oldest first.
    pub fn versions_of(&self, portfolio_id: Uuid) -> Vec<VersionRecord> {
        self.tables
            .lock()
            .unwrap()
            .versions
            .iter()
            .filter(|v| v.portfolio_id == portfolio_id)
            .cloned()
            .collect()
    }
}

fn matches_listing(p: &PortfolioRecord, q: &PortfolioListQuery) -> bool {
    let visible = match q.visibility {
        Visibility::PublishedOnly => p.status == PortfolioStatus::Published,
        Visibility::PublishedOrOwnedBy(user) => {
            p.status == PortfolioStatus::Published || p.owner_id == user
        }
        Visibility::Everything => true,
    };
    let search_hit = q.search.as_deref().is_none_or(|s| {
        let needle = s.to_lowercase();
        [&p.title, &p.author, &p.description, &p.content]
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
            || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    });

    visible
        && search_hit
        && q.status.is_none_or(|s| p.status == s)
        && q.owner_id.is_none_or(|o| p.owner_id == o)
        && q.category.as_deref().is_none_or(|c| p.category == c)
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolios {
    async fn create(
        &self,
        portfolio: NewPortfolio,
        versions: Vec<NewVersion>,
    ) -> Result<(PortfolioRecord, Vec<VersionRecord>), PortfolioRepositoryError> {
        let now = Utc::now();
        let record = PortfolioRecord {
            id: Uuid::new_v4(),
            owner_id: portfolio.owner_id,
            title: portfolio.title,
            author: portfolio.author,
            description: portfolio.description,
            content: portfolio.content,
            category: portfolio.category,
            tags: portfolio.tags,
            image_object_id: portfolio.image_object_id,
            ai_level: portfolio.ai_level,
            likes: 0,
            views: 0,
            status: portfolio.status,
            created_at: now,
            updated_at: now,
        };
        let created: Vec<VersionRecord> = versions
            .into_iter()
            .map(|v| VersionRecord {
                id: Uuid::new_v4(),
                portfolio_id: record.id,
                label: v.label,
                title: v.title,
                description: v.description,
                html_content: v.html_content,
                thumbnail: v.thumbnail,
                change_log: v.change_log,
                is_active: v.is_active,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let mut tables = self.tables.lock().unwrap();
        tables.portfolios.push(record.clone());
        tables.versions.extend(created.iter().cloned());
        Ok((record, created))
    }

    async fn update(
        &self,
        portfolio_id: Uuid,
        changes: PortfolioChanges,
    ) -> Result<PortfolioRecord, PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let p = tables.portfolio_mut(portfolio_id)?;
        if let Some(v) = changes.title {
            p.title = v;
        }
        if let Some(v) = changes.author {
            p.author = v;
        }
        if let Some(v) = changes.description {
            p.description = v;
        }
        if let Some(v) = changes.content {
            p.content = v;
        }
        if let Some(v) = changes.category {
            p.category = v;
        }
        if let Some(v) = changes.tags {
            p.tags = v;
        }
        if let Some(v) = changes.image_object_id {
            p.image_object_id = Some(v);
        }
        if let Some(v) = changes.ai_level {
            p.ai_level = v;
        }
        if let Some(v) = changes.status {
            p.status = v;
        }
        p.updated_at = Utc::now();
        Ok(p.clone())
    }

    async fn hard_delete(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.portfolio_mut(portfolio_id)?;
        tables.portfolios.retain(|p| p.id != portfolio_id);
        tables.versions.retain(|v| v.portfolio_id != portfolio_id);
        Ok(())
    }

    async fn increment_views(&self, portfolio_id: Uuid) -> Result<(), PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.portfolio_mut(portfolio_id)?.views += 1;
        Ok(())
    }

    async fn like(&self, portfolio_id: Uuid) -> Result<i32, PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let p = tables.portfolio_mut(portfolio_id)?;
        if p.status != PortfolioStatus::Published {
            return Err(PortfolioRepositoryError::NotFound);
        }
        p.likes += 1;
        Ok(p.likes)
    }

    async fn archive_by_owner(&self, owner_id: Uuid) -> Result<u64, PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for p in tables.portfolios.iter_mut().filter(|p| p.owner_id == owner_id) {
            p.status = PortfolioStatus::Deleted;
            touched += 1;
        }
        Ok(touched)
    }

    async fn append_version(
        &self,
        portfolio_id: Uuid,
        draft: VersionDraft,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.portfolio_mut(portfolio_id)?;

        let latest = tables
            .versions
            .iter()
            .rev()
            .find(|v| v.portfolio_id == portfolio_id)
            .map(|v| v.label.clone());

        let now = Utc::now();
        let version = VersionRecord {
            id: Uuid::new_v4(),
            portfolio_id,
            label: next_label(latest.as_deref()),
            title: draft.title,
            description: draft.description,
            html_content: draft.html_content,
            thumbnail: draft.thumbnail,
            change_log: draft.change_log,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.versions.push(version.clone());
        if version.is_active {
            tables.make_only_active(portfolio_id, version.id);
        }
        Ok(version)
    }

    async fn update_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
        changes: VersionChanges,
    ) -> Result<VersionRecord, PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let v = tables
            .versions
            .iter_mut()
            .find(|v| v.id == version_id && v.portfolio_id == portfolio_id)
            .ok_or(PortfolioRepositoryError::VersionNotFound)?;
        if let Some(x) = changes.title {
            v.title = x;
        }
        if let Some(x) = changes.description {
            v.description = x;
        }
        if let Some(x) = changes.html_content {
            v.html_content = x;
        }
        if let Some(x) = changes.thumbnail {
            v.thumbnail = x;
        }
        if let Some(x) = changes.change_log {
            v.change_log = x;
        }
        v.updated_at = Utc::now();

        if changes.activate {
            tables.make_only_active(portfolio_id, version_id);
        }
        tables
            .versions
            .iter()
            .find(|v| v.id == version_id)
            .cloned()
            .ok_or(PortfolioRepositoryError::VersionNotFound)
    }

    async fn activate_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables
            .versions
            .iter()
            .any(|v| v.id == version_id && v.portfolio_id == portfolio_id)
        {
            return Err(PortfolioRepositoryError::VersionNotFound);
        }
        tables.make_only_active(portfolio_id, version_id);
        Ok(())
    }

    async fn delete_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<(), PortfolioRepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let version = tables
            .versions
            .iter()
            .find(|v| v.id == version_id && v.portfolio_id == portfolio_id)
            .ok_or(PortfolioRepositoryError::VersionNotFound)?;
        if version.is_active {
            return Err(PortfolioRepositoryError::VersionActive);
        }
        tables.versions.retain(|v| v.id != version_id);
        Ok(())
    }
}

#[async_trait]
impl PortfolioQuery for InMemoryPortfolios {
    async fn find_by_id(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<PortfolioRecord>, PortfolioQueryError> {
        Ok(self.portfolio(portfolio_id))
    }

    async fn list(
        &self,
        query: &PortfolioListQuery,
    ) -> Result<(Vec<PortfolioRecord>, u64), PortfolioQueryError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<PortfolioRecord> = tables
            .portfolios
            .iter()
            .filter(|p| matches_listing(p, query))
            .cloned()
            .collect();

        rows.sort_by(|a, b| match query.sort {
            PortfolioSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            PortfolioSortField::Title => a.title.cmp(&b.title),
            PortfolioSortField::Category => a.category.cmp(&b.category),
            PortfolioSortField::Status => a.status.as_str().cmp(b.status.as_str()),
        });
        if query.order == SortOrder::Desc {
            rows.reverse();
        }

        let total = rows.len() as u64;
        let page = rows
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_versions(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Vec<VersionRecord>, PortfolioQueryError> {
        let mut versions = self.versions_of(portfolio_id);
        versions.reverse();
        Ok(versions)
    }

    async fn find_version(
        &self,
        portfolio_id: Uuid,
        version_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError> {
        Ok(self
            .versions_of(portfolio_id)
            .into_iter()
            .find(|v| v.id == version_id))
    }

    async fn find_active_version(
        &self,
        portfolio_id: Uuid,
    ) -> Result<Option<VersionRecord>, PortfolioQueryError> {
        Ok(self
            .versions_of(portfolio_id)
            .into_iter()
            .find(|v| v.is_active))
    }
}

pub struct FixedAuthors(Option<String>);

impl FixedAuthors {
    pub fn named(name: &str) -> Self {
        Self(Some(name.to_string()))
    }

    pub fn unknown() -> Self {
        Self(None)
    }
}

#[async_trait]
impl AuthorDirectory for FixedAuthors {
    async fn display_name(&self, _user_id: Uuid) -> Result<Option<String>, AuthorDirectoryError> {
        Ok(self.0.clone())
    }
}

pub struct NoImages;

#[async_trait]
impl ImageUrlResolver for NoImages {
    async fn resolve(&self, _object_id: Uuid) -> Option<String> {
        None
    }
}

/// Resolves every object to `{base}/{object_id}`.
pub struct StaticImages(pub String);

#[async_trait]
impl ImageUrlResolver for StaticImages {
    async fn resolve(&self, object_id: Uuid) -> Option<String> {
        Some(format!("{}/{}", self.0, object_id))
    }
}

// ──── Storage ────

#[derive(Default)]
struct ObjectStoreState {
    buckets: HashSet<String>,
    objects: HashMap<String, PutObject>,
    unreachable: bool,
    stall: bool,
    fail_deletes: bool,
}

/// S3 stand-in that is both the connector and every client it hands out.
#[derive(Clone, Default)]
pub struct FakeObjectStore {
    state: Arc<Mutex<ObjectStoreState>>,
}

impl FakeObjectStore {
    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.state.lock().unwrap().buckets.contains(bucket)
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().unreachable = unreachable;
    }

    /// Every request hangs forever.
    pub fn set_stall(&self, stall: bool) {
        self.state.lock().unwrap().stall = stall;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.state.lock().unwrap().fail_deletes = fail;
    }

    pub fn object(&self, key: &str) -> Option<PutObject> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    async fn reach(&self) -> Result<(), ObjectStoreError> {
        let (stall, unreachable) = {
            let state = self.state.lock().unwrap();
            (state.stall, state.unreachable)
        };
        if stall {
            std::future::pending::<()>().await;
        }
        if unreachable {
            return Err(ObjectStoreError::RequestFailed(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

impl ObjectStoreConnector for FakeObjectStore {
    fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ObjectStoreClient>, ObjectStoreError> {
        if settings.endpoint.trim().is_empty() {
            return Err(ObjectStoreError::InvalidConfig(
                "endpoint is empty".to_string(),
            ));
        }
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl ObjectStoreClient for FakeObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError> {
        self.reach().await?;
        Ok(self.has_bucket(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError> {
        self.reach().await?;
        self.state.lock().unwrap().buckets.insert(bucket.to_string());
        Ok(())
    }

    async fn put_object(&self, object: PutObject) -> Result<(), ObjectStoreError> {
        self.reach().await?;
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(object.key.clone(), object);
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ObjectStoreError> {
        self.reach().await?;
        Ok(format!(
            "presigned://{}/{}?expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, _bucket: &str, key: &str) -> Result<(), ObjectStoreError> {
        self.reach().await?;
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(ObjectStoreError::RequestFailed("delete refused".to_string()));
        }
        state.objects.remove(key);
        Ok(())
    }
}

/// Active config on `minio.local:9000`, public bucket `media`.
pub fn sample_storage_config(id: i32) -> StorageConfig {
    let now = Utc::now();
    StorageConfig {
        id,
        name: format!("minio-{id}"),
        endpoint: "minio.local:9000".to_string(),
        access_key: "ak".to_string(),
        secret_key: "sk".to_string(),
        bucket_name: "media".to_string(),
        use_ssl: false,
        is_private: false,
        region: DEFAULT_REGION.to_string(),
        url_expiry: 3600,
        is_active: true,
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
struct ConfigTable {
    rows: Vec<StorageConfig>,
    next_id: i32,
}

/// Config store whose activation hook failures restore the previous rows.
#[derive(Clone, Default)]
pub struct InMemoryStorageConfigs {
    table: Arc<Mutex<ConfigTable>>,
}

impl InMemoryStorageConfigs {
    pub fn get(&self, id: i32) -> Option<StorageConfig> {
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<StorageConfig> {
        self.table.lock().unwrap().rows.clone()
    }

    /// Stores `config` as-is; an active one deactivates the rest.
    pub fn insert(&self, config: StorageConfig) {
        let mut table = self.table.lock().unwrap();
        if config.is_active {
            table.rows.iter_mut().for_each(|c| c.is_active = false);
        }
        table.next_id = table.next_id.max(config.id);
        table.rows.push(config);
    }

    /// Applies `change` under the lock, then runs the hook with the lock released.
    async fn transact<F>(
        &self,
        hook: &dyn ActivationHook,
        change: F,
    ) -> Result<StorageConfig, StorageConfigRepositoryError>
    where
        F: FnOnce(&mut ConfigTable) -> Result<StorageConfig, StorageConfigRepositoryError>,
    {
        let (snapshot, config) = {
            let mut table = self.table.lock().unwrap();
            let snapshot = table.rows.clone();
            (snapshot, change(&mut table)?)
        };

        if config.is_active {
            if let Err(e) = hook.activated(&config).await {
                self.table.lock().unwrap().rows = snapshot;
                return Err(StorageConfigRepositoryError::ActivationFailed(e));
            }
        }
        Ok(config)
    }
}

fn apply_draft(row: &mut StorageConfig, draft: StorageConfigDraft) {
    row.name = draft.name;
    row.endpoint = draft.endpoint;
    row.access_key = draft.access_key;
    row.secret_key = draft.secret_key;
    row.bucket_name = draft.bucket_name;
    row.use_ssl = draft.use_ssl;
    row.is_private = draft.is_private;
    row.region = draft.region;
    row.url_expiry = draft.url_expiry;
    row.is_active = draft.is_active;
    row.description = draft.description;
    row.updated_at = Utc::now();
}

#[async_trait]
impl StorageConfigRepository for InMemoryStorageConfigs {
    async fn list(&self) -> Result<Vec<StorageConfig>, StorageConfigRepositoryError> {
        Ok(self.all())
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<StorageConfig>, StorageConfigRepositoryError> {
        Ok(self.get(id))
    }

    async fn find_active(&self) -> Result<Option<StorageConfig>, StorageConfigRepositoryError> {
        Ok(self.all().into_iter().find(|c| c.is_active))
    }

    async fn create(
        &self,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        self.transact(hook, |table| {
            if table.rows.iter().any(|c| c.name == draft.name) {
                return Err(StorageConfigRepositoryError::NameTaken);
            }
            if draft.is_active {
                table.rows.iter_mut().for_each(|c| c.is_active = false);
            }
            table.next_id += 1;
            let mut row = sample_storage_config(table.next_id);
            apply_draft(&mut row, draft);
            table.rows.push(row.clone());
            Ok(row)
        })
        .await
    }

    async fn update(
        &self,
        id: i32,
        draft: StorageConfigDraft,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        self.transact(hook, |table| {
            if !table.rows.iter().any(|c| c.id == id) {
                return Err(StorageConfigRepositoryError::NotFound);
            }
            if table.rows.iter().any(|c| c.id != id && c.name == draft.name) {
                return Err(StorageConfigRepositoryError::NameTaken);
            }
            if draft.is_active {
                table.rows.iter_mut().for_each(|c| c.is_active = false);
            }
            let row = table
                .rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(StorageConfigRepositoryError::NotFound)?;
            apply_draft(row, draft);
            Ok(row.clone())
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<(), StorageConfigRepositoryError> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        if table.rows.len() == before {
            return Err(StorageConfigRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn activate(
        &self,
        id: i32,
        hook: &dyn ActivationHook,
    ) -> Result<StorageConfig, StorageConfigRepositoryError> {
        self.transact(hook, |table| {
            if !table.rows.iter().any(|c| c.id == id) {
                return Err(StorageConfigRepositoryError::NotFound);
            }
            for c in table.rows.iter_mut() {
                c.is_active = c.id == id;
            }
            table
                .rows
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or(StorageConfigRepositoryError::NotFound)
        })
        .await
    }
}

#[derive(Default)]
struct FileTable {
    rows: Vec<FileObject>,
    fail_inserts: bool,
}

/// File records including soft-deleted ones; reads through the port skip those.
#[derive(Clone, Default)]
pub struct InMemoryFiles {
    table: Arc<Mutex<FileTable>>,
}

impl InMemoryFiles {
    /// Inserts a live `{id}.png` record and returns its id.
    pub fn seed(&self, config_id: i32, owner: Uuid, content_type: &str, is_public: bool) -> Uuid {
        let id = Uuid::new_v4();
        let mut table = self.table.lock().unwrap();
        let created_at = Utc::now() + chrono::Duration::milliseconds(table.rows.len() as i64);
        table.rows.push(FileObject {
            id,
            original_name: "seed.png".to_string(),
            storage_path: format!("{id}.png"),
            content_type: content_type.to_string(),
            file_size: 1024,
            md5_hash: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            config_id,
            is_public,
            tags: BTreeMap::new(),
            uploaded_by: owner,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        });
        id
    }

    pub fn get(&self, id: Uuid) -> Option<FileObject> {
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.table.lock().unwrap().fail_inserts = fail;
    }
}

#[async_trait]
impl FileObjectRepository for InMemoryFiles {
    async fn insert(&self, file: NewFileObject) -> Result<FileObject, FileObjectRepositoryError> {
        let mut table = self.table.lock().unwrap();
        if table.fail_inserts {
            return Err(FileObjectRepositoryError::DatabaseError(
                "insert refused".to_string(),
            ));
        }
        let now = Utc::now();
        let row = FileObject {
            id: file.id,
            original_name: file.original_name,
            storage_path: file.storage_path,
            content_type: file.content_type,
            file_size: file.file_size,
            md5_hash: file.md5_hash,
            config_id: file.config_id,
            is_public: file.is_public,
            tags: file.tags,
            uploaded_by: file.uploaded_by,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn find_live(&self, id: Uuid) -> Result<Option<FileObject>, FileObjectRepositoryError> {
        Ok(self.get(id).filter(|f| f.deleted_at.is_none()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), FileObjectRepositoryError> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|f| f.id == id && f.deleted_at.is_none())
            .ok_or(FileObjectRepositoryError::NotFound)?;
        let now = Utc::now();
        row.deleted_at = Some(now);
        row.updated_at = now;
        Ok(())
    }

    async fn count_by_config(&self, config_id: i32) -> Result<u64, FileObjectRepositoryError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().filter(|f| f.config_id == config_id).count() as u64)
    }

    async fn list(
        &self,
        query: &FileListQuery,
    ) -> Result<(Vec<FileObject>, u64), FileObjectRepositoryError> {
        let table = self.table.lock().unwrap();
        let mut matching: Vec<FileObject> = table
            .rows
            .iter()
            .filter(|f| f.deleted_at.is_none())
            .filter(|f| query.uploaded_by.map_or(true, |u| f.uploaded_by == u))
            .filter(|f| {
                query
                    .content_type
                    .as_deref()
                    .map_or(true, |p| f.content_type.starts_with(p.trim()))
            })
            .filter(|f| query.is_public.map_or(true, |p| f.is_public == p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.page_size as usize)
            .collect();
        Ok((items, total))
    }
}
