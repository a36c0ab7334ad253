use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lifecycle;

/// Rental status stored as a lowercase string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rented")]
    Rented,
    #[sea_orm(string_value = "returned")]
    Returned,
}

/// SeaORM entity for the `dress_rentals` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dress_rentals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_date: Option<Date>,
    pub return_date: Option<Date>,
    pub dress_id: i32,
    pub user_id: Option<i32>,
    pub size_id: Option<i32>,
    pub status: RentalStatus,
    /// Bumped on every write; used as a compare-and-set token by moderators.
    pub version: i32,
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
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::sizes::Entity",
        from = "Column::SizeId",
        to = "super::sizes::Column::Id",
        on_delete = "SetNull"
    )]
    Size,
}

impl Related<super::dresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dress.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sizes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Size.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the return date has already passed, evaluated against today's date.
    pub fn is_overdue(&self) -> bool {
        lifecycle::is_overdue(self.return_date, lifecycle::today())
    }
}

// ── DTOs ──

/// Self-service rental request. Any `status` in the submission is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRental {
    pub dress_id: i32,
    pub size_id: Option<i32>,
    pub start_date: Option<Date>,
    pub return_date: Option<Date>,
}

/// Self-service update. Dress, start date and size are fixed after the first save,
/// so only the return date is taken from the submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOwnRental {
    pub return_date: Option<Date>,
}

/// Moderator status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRentalStatus {
    pub status: RentalStatus,
    pub expected_version: Option<i32>,
}

/// Query string for the rental creation form.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalFormQuery {
    pub dress_id: Option<i32>,
}

/// What the rental form needs to render: the dress being rented and its size choices.
#[derive(Debug, Clone, Serialize)]
pub struct RentalFormContext {
    pub dress: Option<super::dresses::Model>,
    pub size_choices: Vec<super::sizes::Model>,
    pub rental: Option<RentalResponse>,
}

/// Rental as returned by the API, with the derived overdue flag.
#[derive(Debug, Clone, Serialize)]
pub struct RentalResponse {
    pub id: i32,
    pub start_date: Option<Date>,
    pub return_date: Option<Date>,
    pub dress_id: i32,
    pub user_id: Option<i32>,
    pub size_id: Option<i32>,
    pub status: RentalStatus,
    pub version: i32,
    pub is_overdue: bool,
}

impl From<Model> for RentalResponse {
    fn from(m: Model) -> Self {
        let is_overdue = m.is_overdue();
        Self {
            id: m.id,
            start_date: m.start_date,
            return_date: m.return_date,
            dress_id: m.dress_id,
            user_id: m.user_id,
            size_id: m.size_id,
            status: m.status,
            version: m.version,
            is_overdue,
        }
    }
}
