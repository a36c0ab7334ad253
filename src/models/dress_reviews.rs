use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Longest review body accepted, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// SeaORM entity for the `dress_reviews` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dress_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date_created: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub dress_id: i32,
    pub reviewer_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dresses::Entity",
        from = "Column::DressId",
        to = "super::dresses::Column::Id",
        on_delete = "Cascade"
    )]
    Dress,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReviewerId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Reviewer,
}

impl Related<super::dresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dress.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub content: String,
}

impl CreateReview {
    /// Checks the body the same way the review form does: required, bounded length.
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Comment: This field is required.".to_string());
        }
        let len = self.content.chars().count();
        if len > MAX_CONTENT_CHARS {
            return Err(format!(
                "Comment: Ensure this value has at most {MAX_CONTENT_CHARS} characters (it has {len})."
            ));
        }
        Ok(())
    }
}
