use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::user_repository::{
    NewUserData, ProfilePatch, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_profile(model: UserModel) -> Result<UserProfile, UserRepositoryError> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(UserRepositoryError::DatabaseError)?;
        let status = model
            .status
            .parse::<UserStatus>()
            .map_err(UserRepositoryError::DatabaseError)?;

        Ok(UserProfile {
            id: model.id,
            email: model.email,
            username: model.username,
            nickname: model.nickname,
            avatar: model.avatar,
            bio: model.bio,
            role,
            status,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        })
    }

    fn map_write_error(e: DbErr) -> UserRepositoryError {
        let err_str = e.to_string().to_lowercase();
        if err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
        {
            return UserRepositoryError::UserAlreadyExists;
        }
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn load(&self, user_id: Uuid) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, data: NewUserData) -> Result<UserProfile, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(data.email),
            username: Set(data.username),
            nickname: Set(data.nickname),
            password_hash: Set(data.password_hash),
            avatar: Set(String::new()),
            bio: Set(String::new()),
            role: Set(data.role.as_str().to_string()),
            status: Set(data.status.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user
            .insert(&*self.db)
            .await
            .map_err(Self::map_write_error)?;

        Self::to_profile(inserted)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<UserProfile, UserRepositoryError> {
        let user = self.load(user_id).await?;

        let mut active_user: UserActiveModel = user.into();
        if let Some(username) = patch.username {
            active_user.username = Set(username);
        }
        if let Some(nickname) = patch.nickname {
            active_user.nickname = Set(nickname);
        }
        if let Some(avatar) = patch.avatar {
            active_user.avatar = Set(avatar);
        }
        if let Some(bio) = patch.bio {
            active_user.bio = Set(bio);
        }

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::map_write_error)?;

        Self::to_profile(updated)
    }

    async fn update_status_and_role(
        &self,
        user_id: Uuid,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<UserProfile, UserRepositoryError> {
        let user = self.load(user_id).await?;

        let mut active_user: UserActiveModel = user.into();
        active_user.status = Set(status.as_str().to_string());
        if let Some(role) = role {
            active_user.role = Set(role.as_str().to_string());
        }

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Self::to_profile(updated)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let user = self.load(user_id).await?;

        let mut active_user: UserActiveModel = user.into();
        active_user.password_hash = Set(new_password_hash);

        active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let result = UserEntity::delete_by_id(user_id)
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }
}
