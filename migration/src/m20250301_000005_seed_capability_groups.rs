use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Groups {
    Table,
    Name,
}

const CAPABILITY_GROUPS: [&str; 2] = ["moderators", "staff"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in CAPABILITY_GROUPS {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Groups::Table)
                        .columns([Groups::Name])
                        .values_panic([name.into()])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Groups::Table)
                    .and_where(Expr::col(Groups::Name).is_in(CAPABILITY_GROUPS))
                    .to_owned(),
            )
            .await
    }
}
