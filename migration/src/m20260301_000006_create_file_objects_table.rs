use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FileObjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileObjects::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(FileObjects::OriginalName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileObjects::StoragePath)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileObjects::ContentType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FileObjects::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(FileObjects::Md5Hash).string_len(32).not_null())
                    .col(ColumnDef::new(FileObjects::ConfigId).integer().not_null())
                    .col(
                        ColumnDef::new(FileObjects::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FileObjects::Tags)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(ColumnDef::new(FileObjects::UploadedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(FileObjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FileObjects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FileObjects::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // Configs referenced by files cannot be dropped
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_file_objects_config_id")
                            .from(FileObjects::Table, FileObjects::ConfigId)
                            .to(StorageConfigs::Table, StorageConfigs::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing skips soft-deleted rows
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_file_objects_live
                ON file_objects (created_at DESC)
                WHERE deleted_at IS NULL;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_file_objects_uploaded_by
                ON file_objects (uploaded_by);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_file_objects_config_id
                ON file_objects (config_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_file_objects_updated_at
                BEFORE UPDATE ON file_objects
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
                "DROP TRIGGER IF EXISTS update_file_objects_updated_at ON file_objects",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FileObjects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FileObjects {
    Table,
    Id,
    OriginalName,
    StoragePath,
    ContentType,
    FileSize,
    Md5Hash,
    ConfigId,
    IsPublic,
    Tags,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum StorageConfigs {
    Table,
    Id,
}
