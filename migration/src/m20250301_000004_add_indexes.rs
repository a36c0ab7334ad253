use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum DressRentals {
    Table,
    DressId,
    UserId,
    Status,
}

#[derive(DeriveIden)]
enum DressReviews {
    Table,
    DressId,
}

#[derive(DeriveIden)]
enum Dresses {
    Table,
    DesignerId,
}

#[derive(DeriveIden)]
enum Designers {
    Table,
    Name,
    Surname,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on dress_rentals.user_id for the "my dresses" listing
        manager
            .create_index(
                Index::create()
                    .name("idx_dress_rentals_user_id")
                    .table(DressRentals::Table)
                    .col(DressRentals::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dress_rentals_dress_id")
                    .table(DressRentals::Table)
                    .col(DressRentals::DressId)
                    .to_owned(),
            )
            .await?;

        // Dashboard counts filter on status
        manager
            .create_index(
                Index::create()
                    .name("idx_dress_rentals_status")
                    .table(DressRentals::Table)
                    .col(DressRentals::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dress_reviews_dress_id")
                    .table(DressReviews::Table)
                    .col(DressReviews::DressId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dresses_designer_id")
                    .table(Dresses::Table)
                    .col(Dresses::DesignerId)
                    .to_owned(),
            )
            .await?;

        // Designer listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_designers_name_surname")
                    .table(Designers::Table)
                    .col(Designers::Name)
                    .col(Designers::Surname)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_dress_rentals_user_id",
            "idx_dress_rentals_dress_id",
            "idx_dress_rentals_status",
            "idx_dress_reviews_dress_id",
            "idx_dresses_designer_id",
            "idx_designers_name_surname",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
