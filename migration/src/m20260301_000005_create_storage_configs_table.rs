use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StorageConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StorageConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::Endpoint)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::AccessKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::SecretKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::BucketName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::UseSsl)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::Region)
                            .string_len(50)
                            .not_null()
                            .default("us-east-1"),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::UrlExpiry)
                            .integer()
                            .not_null()
                            .default(3600),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(StorageConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one active configuration
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_storage_configs_one_active
                ON storage_configs (is_active)
                WHERE is_active = true;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_storage_configs_updated_at
                BEFORE UPDATE ON storage_configs
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS update_storage_configs_updated_at ON storage_configs",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StorageConfigs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StorageConfigs {
    Table,
    Id,
    Name,
    Endpoint,
    AccessKey,
    SecretKey,
    BucketName,
    UseSsl,
    IsPrivate,
    Region,
    UrlExpiry,
    IsActive,
    Description,
    CreatedAt,
    UpdatedAt,
}
