use sea_orm::entity::prelude::*;

/// Join table between `dresses` and `styles`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dress_styles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dress_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub style_id: i32,
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
        belongs_to = "super::styles::Entity",
        from = "Column::StyleId",
        to = "super::styles::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Style,
}

impl ActiveModelBehavior for ActiveModel {}
