use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::{Role, UserStatus};
use crate::auth::application::ports::outgoing::user_query::{
    UserListFilter, UserQuery, UserQueryError, UserRecord,
};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_record(model: UserModel) -> Result<UserRecord, UserQueryError> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(UserQueryError::CorruptRow)?;
        let status = model
            .status
            .parse::<UserStatus>()
            .map_err(UserQueryError::CorruptRow)?;

        Ok(UserRecord {
            id: model.id,
            email: model.email,
            username: model.username,
            nickname: model.nickname,
            password_hash: model.password_hash,
            avatar: model.avatar,
            bio: model.bio,
            role,
            status,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        })
    }
}

fn map_db_err(e: DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserQueryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Self::to_record)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserQueryError> {
        UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Self::to_record)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserQueryError> {
        UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Self::to_record)
            .transpose()
    }

    async fn list(
        &self,
        filter: UserListFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), UserQueryError> {
        let mut query = UserEntity::find();

        if let Some(status) = filter.status {
            query = query.filter(UserColumn::Status.eq(status.as_str()));
        }
        if let Some(role) = filter.role {
            query = query.filter(UserColumn::Role.eq(role.as_str()));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                let pattern = format!("%{}%", search);
                query = query.filter(
                    Condition::any()
                        .add(Expr::col(UserColumn::Email).ilike(&pattern))
                        .add(Expr::col(UserColumn::Username).ilike(&pattern))
                        .add(Expr::col(UserColumn::Nickname).ilike(&pattern)),
                );
            }
        }

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let rows = query
            .order_by_desc(UserColumn::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let records = rows
            .into_iter()
            .map(Self::to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total))
    }

    async fn count_all(&self) -> Result<u64, UserQueryError> {
        UserEntity::find()
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}
