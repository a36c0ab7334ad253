use sea_orm::entity::prelude::*;

/// Join table between `dresses` and `sizes`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dress_sizes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dress_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub size_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dresses::Entity",
        from = "Column::DressId",
        to = "super::dresses::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Dress,
    #[sea_orm(
        belongs_to = "super::sizes::Entity",
        from = "Column::SizeId",
        to = "super::sizes::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Size,
}

impl ActiveModelBehavior for ActiveModel {}
