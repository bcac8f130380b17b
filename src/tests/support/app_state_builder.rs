use std::sync::Arc;

use actix_web::web;

use crate::auth::application::use_cases::{
    delete_user::{DeleteUserUseCase, IDeleteUserUseCase},
    fetch_profile::FetchUserProfileService,
    list_users::{ListUsersService, ListUsersUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
    reset_password::ResetPasswordUseCase,
    update_profile::{UpdateUserProfileService, UpdateUserProfileUseCase},
    update_user_status::UpdateUserStatusService,
};
use crate::auth::auth_use_cases::AuthUseCases;
use crate::moderation::application::moderation_use_cases::ModerationUseCases;
use crate::moderation::application::service::{GetSettingsService, UpdateSettingsService};
use crate::portfolio::adapter::outgoing::{PortfolioArchiverAdapter, UserAuthorDirectory};
use crate::portfolio::application::ports::outgoing::ImageUrlResolver;
use crate::portfolio::application::service::{
    CreatePortfolioService, CreateVersionService, DeleteVersionService, GetPortfolioService,
    GetVersionService, HardDeletePortfolioService, LikePortfolioService, ListPortfoliosService,
    ListVersionsService, ReviewPortfolioService, SetActiveVersionService,
    SoftDeletePortfolioService, UpdatePortfolioService, UpdateVersionService,
};
use crate::portfolio::portfolio_use_cases::PortfolioUseCases;
use crate::storage::application::domain::StorageConfig;
use crate::storage::application::service::{
    ActivateStorageConfigService, CreateStorageConfigService, DeleteFileService,
    DeleteStorageConfigService, GetFileUrlService, GetStorageConfigService, ListFilesService,
    ListStorageConfigsService, StorageGateway, TestConnectionService, TestStoredConfigService,
    UpdateStorageConfigService, UploadFileService,
};
use crate::storage::storage_use_cases::StorageUseCases;
use crate::tests::support::auth_helper::test_jwt_service;
use crate::tests::support::in_memory::{
    FakeObjectStore, InMemoryFiles, InMemoryPortfolios, InMemorySettings,
    InMemoryStorageConfigs, InMemoryUsers, NoImages, PlainHasher,
};
use crate::tests::support::stubs::*;
use crate::AppState;

/// Auth use cases default to stubs; moderation, portfolio and storage run the real services
/// over in-memory ports so handler tests observe actual behaviour.
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    account_services: bool,
    settings: InMemorySettings,
    users: InMemoryUsers,
    portfolios: InMemoryPortfolios,
    images: Arc<dyn ImageUrlResolver>,
    configs: InMemoryStorageConfigs,
    files: InMemoryFiles,
    gateway: Arc<StorageGateway>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auth: AuthUseCases {
                register: Arc::new(StubRegisterUserUseCase),
                login: Arc::new(StubLoginUserUseCase),
                fetch_profile: Arc::new(StubFetchUserProfileUseCase),
                update_profile: Arc::new(StubUpdateUserProfileUseCase),
                list_users: Arc::new(StubListUsersUseCase),
                update_user_status: Arc::new(StubUpdateUserStatusUseCase),
                delete_user: Arc::new(StubDeleteUserUseCase),
                reset_password: Arc::new(StubResetPasswordUseCase),
            },
            account_services: false,
            settings: InMemorySettings::new(false, false),
            users: InMemoryUsers::default(),
            portfolios: InMemoryPortfolios::default(),
            images: Arc::new(NoImages),
            configs: InMemoryStorageConfigs::default(),
            files: InMemoryFiles::default(),
            gateway: Arc::new(StorageGateway::new(Arc::new(FakeObjectStore::default()))),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.auth.register = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.auth.login = Arc::new(uc);
        self
    }

    pub fn with_update_profile(
        mut self,
        uc: impl UpdateUserProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.auth.update_profile = Arc::new(uc);
        self
    }

    pub fn with_list_users(mut self, uc: impl ListUsersUseCase + Send + Sync + 'static) -> Self {
        self.auth.list_users = Arc::new(uc);
        self
    }

    pub fn with_delete_user(mut self, uc: impl IDeleteUserUseCase + Send + Sync + 'static) -> Self {
        self.auth.delete_user = Arc::new(uc);
        self
    }

    /// Swaps every auth stub for the real use case over the in-memory users,
    /// `PlainHasher` and the test JWT service.
    pub fn with_account_services(mut self) -> Self {
        self.account_services = true;
        self
    }

    pub fn with_settings(mut self, settings: InMemorySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Accounts the portfolio services resolve authors from.
    pub fn with_users(mut self, users: InMemoryUsers) -> Self {
        self.users = users;
        self
    }

    pub fn with_portfolios(mut self, portfolios: InMemoryPortfolios) -> Self {
        self.portfolios = portfolios;
        self
    }

    pub fn with_files(mut self, files: InMemoryFiles) -> Self {
        self.files = files;
        self
    }

    /// Replaces the object store; any client initialized before is dropped.
    pub fn with_object_store(mut self, store: FakeObjectStore) -> Self {
        self.gateway = Arc::new(StorageGateway::new(Arc::new(store)));
        self
    }

    /// Stores `config` and brings the gateway up on it.
    pub async fn with_active_storage(self, config: StorageConfig) -> Self {
        self.configs.insert(config.clone());
        self.gateway
            .initialize(config)
            .await
            .expect("fake object store should initialize");
        self
    }

    fn account_use_cases(&self) -> AuthUseCases {
        let users = self.users.clone();
        let hasher = Arc::new(PlainHasher);
        let archiver = PortfolioArchiverAdapter::new(Arc::new(self.portfolios.clone()));

        AuthUseCases {
            register: Arc::new(RegisterUserUseCase::new(
                users.clone(),
                users.clone(),
                hasher.clone(),
                Arc::new(self.settings.clone()),
            )),
            login: Arc::new(LoginUserUseCase::new(
                users.clone(),
                hasher.clone(),
                Arc::new(test_jwt_service()),
            )),
            fetch_profile: Arc::new(FetchUserProfileService::new(users.clone())),
            update_profile: Arc::new(UpdateUserProfileService::new(users.clone(), users.clone())),
            list_users: Arc::new(ListUsersService::new(users.clone())),
            update_user_status: Arc::new(UpdateUserStatusService::new(users.clone())),
            delete_user: Arc::new(DeleteUserUseCase::new(
                users.clone(),
                users.clone(),
                Arc::new(archiver),
            )),
            reset_password: Arc::new(ResetPasswordUseCase::new(users, hasher)),
        }
    }

    pub fn build(self) -> web::Data<AppState> {
        let auth = if self.account_services {
            self.account_use_cases()
        } else {
            self.auth.clone()
        };
        let settings = Arc::new(self.settings.clone());
        let authors = Arc::new(UserAuthorDirectory::new(Arc::new(self.users)));
        let repo = self.portfolios.clone();
        let query = self.portfolios;
        let gateway = self.gateway;

        let moderation = ModerationUseCases {
            get_settings: Arc::new(GetSettingsService::new(self.settings.clone())),
            update_settings: Arc::new(UpdateSettingsService::new(self.settings)),
        };

        let portfolio = PortfolioUseCases {
            create: Arc::new(CreatePortfolioService::new(
                repo.clone(),
                authors.clone(),
                settings,
                self.images.clone(),
            )),
            get: Arc::new(GetPortfolioService::new(
                query.clone(),
                repo.clone(),
                self.images.clone(),
            )),
            list: Arc::new(ListPortfoliosService::new(query.clone(), self.images.clone())),
            update: Arc::new(UpdatePortfolioService::new(
                query.clone(),
                repo.clone(),
                authors,
                self.images.clone(),
            )),
            soft_delete: Arc::new(SoftDeletePortfolioService::new(query.clone(), repo.clone())),
            hard_delete: Arc::new(HardDeletePortfolioService::new(repo.clone())),
            review: Arc::new(ReviewPortfolioService::new(repo.clone(), self.images)),
            like: Arc::new(LikePortfolioService::new(repo.clone())),
            create_version: Arc::new(CreateVersionService::new(query.clone(), repo.clone())),
            list_versions: Arc::new(ListVersionsService::new(query.clone())),
            get_version: Arc::new(GetVersionService::new(query.clone())),
            update_version: Arc::new(UpdateVersionService::new(query.clone(), repo.clone())),
            set_active_version: Arc::new(SetActiveVersionService::new(
                query.clone(),
                repo.clone(),
            )),
            delete_version: Arc::new(DeleteVersionService::new(query, repo)),
        };

        let configs = self.configs;
        let files = self.files;
        let storage = StorageUseCases {
            create_config: Arc::new(CreateStorageConfigService::new(
                configs.clone(),
                gateway.clone(),
            )),
            list_configs: Arc::new(ListStorageConfigsService::new(configs.clone())),
            get_config: Arc::new(GetStorageConfigService::new(configs.clone())),
            update_config: Arc::new(UpdateStorageConfigService::new(
                configs.clone(),
                gateway.clone(),
            )),
            delete_config: Arc::new(DeleteStorageConfigService::new(
                configs.clone(),
                files.clone(),
            )),
            activate_config: Arc::new(ActivateStorageConfigService::new(
                configs.clone(),
                gateway.clone(),
            )),
            test_connection: Arc::new(TestConnectionService::new(gateway.clone())),
            test_stored_config: Arc::new(TestStoredConfigService::new(configs, gateway.clone())),
            upload_file: Arc::new(UploadFileService::new(files.clone(), gateway.clone())),
            file_url: Arc::new(GetFileUrlService::new(files.clone(), gateway.clone())),
            delete_file: Arc::new(DeleteFileService::new(files.clone(), gateway.clone())),
            list_files: Arc::new(ListFilesService::new(files, gateway)),
        };

        web::Data::new(AppState {
            auth,
            moderation,
            portfolio,
            storage,
        })
    }
}
