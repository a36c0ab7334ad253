use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `dresses` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub color: String,
    #[sea_orm(unique)]
    pub item_code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub photo: Option<String>,
    pub designer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::designers::Entity",
        from = "Column::DesignerId",
        to = "super::designers::Column::Id",
        on_delete = "Cascade"
    )]
    Designer,
    #[sea_orm(has_many = "super::dress_rentals::Entity")]
    Rentals,
    #[sea_orm(has_many = "super::dress_reviews::Entity")]
    Reviews,
}

impl Related<super::designers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designer.def()
    }
}

impl Related<super::dress_rentals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rentals.def()
    }
}

impl Related<super::dress_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::sizes::Entity> for Entity {
    fn to() -> RelationDef {
        super::dress_sizes::Relation::Size.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dress_sizes::Relation::Dress.def().rev())
    }
}

impl Related<super::styles::Entity> for Entity {
    fn to() -> RelationDef {
        super::dress_styles::Relation::Style.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dress_styles::Relation::Dress.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDress {
    pub color: String,
    pub item_code: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub designer_id: i32,
    #[serde(default)]
    pub size_ids: Vec<i32>,
    #[serde(default)]
    pub style_ids: Vec<i32>,
}

/// Detail view of a dress: the dress plus everything the detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct DressDetail {
    pub dress: Model,
    pub designer: Option<super::designers::Model>,
    pub sizes: Vec<super::sizes::Model>,
    pub styles: Vec<super::styles::Model>,
    pub display_sizes: String,
    pub display_styles: String,
    pub reviews: Vec<super::dress_reviews::Model>,
}

/// Comma-joined names, the way sizes and styles are listed next to a dress.
pub fn display_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().collect::<Vec<_>>().join(", ")
}
