use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Designers {
    Table,
    Id,
    Name,
    Surname,
    Description,
    Photo,
}

#[derive(DeriveIden)]
enum Sizes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Styles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Dresses {
    Table,
    Id,
    Color,
    ItemCode,
    Description,
    Photo,
    DesignerId,
}

#[derive(DeriveIden)]
enum DressSizes {
    Table,
    DressId,
    SizeId,
}

#[derive(DeriveIden)]
enum DressStyles {
    Table,
    DressId,
    StyleId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Designers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Designers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Designers::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Designers::Surname).string_len(50).not_null())
                    .col(ColumnDef::new(Designers::Description).text().null())
                    .col(ColumnDef::new(Designers::Photo).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sizes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sizes::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Styles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Styles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Styles::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Dresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dresses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dresses::Color).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Dresses::ItemCode)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Dresses::Description).text().null())
                    .col(ColumnDef::new(Dresses::Photo).string().null())
                    .col(ColumnDef::new(Dresses::DesignerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dresses_designer_id")
                            .from(Dresses::Table, Dresses::DesignerId)
                            .to(Designers::Table, Designers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DressSizes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DressSizes::DressId).integer().not_null())
                    .col(ColumnDef::new(DressSizes::SizeId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(DressSizes::DressId)
                            .col(DressSizes::SizeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_sizes_dress_id")
                            .from(DressSizes::Table, DressSizes::DressId)
                            .to(Dresses::Table, Dresses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_sizes_size_id")
                            .from(DressSizes::Table, DressSizes::SizeId)
                            .to(Sizes::Table, Sizes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DressStyles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DressStyles::DressId).integer().not_null())
                    .col(ColumnDef::new(DressStyles::StyleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(DressStyles::DressId)
                            .col(DressStyles::StyleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_styles_dress_id")
                            .from(DressStyles::Table, DressStyles::DressId)
                            .to(Dresses::Table, Dresses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dress_styles_style_id")
                            .from(DressStyles::Table, DressStyles::StyleId)
                            .to(Styles::Table, Styles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DressStyles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DressSizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dresses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Styles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Designers::Table).to_owned())
            .await
    }
}
