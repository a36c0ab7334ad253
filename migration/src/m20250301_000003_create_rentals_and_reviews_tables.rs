use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum DressRentals {
    Table,
    Id,
    StartDate,
    ReturnDate,
    DressId,
    UserId,
    SizeId,
    Status,
    Version,
}

#[derive(DeriveIden)]
enum DressReviews {
    Table,
    Id,
    DateCreated,
    Content,
    DressId,
    ReviewerId,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Dresses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sizes {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Rental history outlives the renting account and the chosen size,
        // but not the dress itself.
        manager
            .create_table(
                Table::create()
                    .table(DressRentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DressRentals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DressRentals::StartDate).date().null())
                    .col(ColumnDef::new(DressRentals::ReturnDate).date().null())
                    .col(ColumnDef::new(DressRentals::DressId).integer().not_null())
                    .col(ColumnDef::new(DressRentals::UserId).integer().null())
                    .col(ColumnDef::new(DressRentals::SizeId).integer().null())
                    .col(
                        ColumnDef::new(DressRentals::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(DressRentals::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_rentals_dress_id")
                            .from(DressRentals::Table, DressRentals::DressId)
                            .to(Dresses::Table, Dresses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_rentals_user_id")
                            .from(DressRentals::Table, DressRentals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_rentals_size_id")
                            .from(DressRentals::Table, DressRentals::SizeId)
                            .to(Sizes::Table, Sizes::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DressReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DressReviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DressReviews::DateCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DressReviews::Content).text().not_null())
                    .col(ColumnDef::new(DressReviews::DressId).integer().not_null())
                    .col(ColumnDef::new(DressReviews::ReviewerId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_reviews_dress_id")
                            .from(DressReviews::Table, DressReviews::DressId)
                            .to(Dresses::Table, Dresses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_reviews_reviewer_id")
                            .from(DressReviews::Table, DressReviews::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DressReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DressRentals::Table).to_owned())
            .await
    }
}
