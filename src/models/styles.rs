use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `styles` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "styles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::dresses::Entity> for Entity {
    fn to() -> RelationDef {
        super::dress_styles::Relation::Dress.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dress_styles::Relation::Style.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Request body shared by the size and style admin endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNamed {
    pub name: String,
}
