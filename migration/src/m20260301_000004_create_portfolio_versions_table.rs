use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioVersions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::PortfolioId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::Version)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioVersions::Title).text().not_null())
                    .col(
                        ColumnDef::new(PortfolioVersions::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::HtmlContent)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::Thumbnail)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::ChangeLog)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PortfolioVersions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_versions_portfolio_id")
                            .from(PortfolioVersions::Table, PortfolioVersions::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one active version per portfolio
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_portfolio_versions_one_active
                ON portfolio_versions (portfolio_id)
                WHERE is_active = true;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_portfolio_versions_created_at
                ON portfolio_versions (portfolio_id, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_portfolio_versions_updated_at
                BEFORE UPDATE ON portfolio_versions
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
                "DROP TRIGGER IF EXISTS update_portfolio_versions_updated_at ON portfolio_versions",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PortfolioVersions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PortfolioVersions {
    Table,
    Id,
    PortfolioId,
    Version,
    Title,
    Description,
    HtmlContent,
    Thumbnail,
    ChangeLog,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
}
