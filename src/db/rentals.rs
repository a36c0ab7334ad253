use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, SimpleExpr};
use sea_orm::*;

use crate::models::dress_rentals::{self, CreateRental, RentalStatus, UpdateOwnRental};

/// Insert a new rental for `user_id`. Always starts out Pending.
pub async fn insert_rental(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreateRental,
) -> Result<dress_rentals::Model, DbErr> {
    dress_rentals::ActiveModel {
        start_date: Set(input.start_date),
        return_date: Set(input.return_date),
        dress_id: Set(input.dress_id),
        user_id: Set(Some(user_id)),
        size_id: Set(input.size_id),
        status: Set(RentalStatus::Pending),
        version: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Fetch a single rental by ID.
pub async fn get_rental_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<dress_rentals::Model>, DbErr> {
    dress_rentals::Entity::find_by_id(id).one(db).await
}

/// Fetch all rentals made by an account.
pub async fn get_rentals_by_user_id(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<dress_rentals::Model>, DbErr> {
    dress_rentals::Entity::find()
        .filter(dress_rentals::Column::UserId.eq(user_id))
        .order_by_asc(dress_rentals::Column::Id)
        .all(db)
        .await
}

/// Fetch all rentals.
pub async fn get_all_rentals(db: &DatabaseConnection) -> Result<Vec<dress_rentals::Model>, DbErr> {
    dress_rentals::Entity::find()
        .order_by_asc(dress_rentals::Column::Id)
        .all(db)
        .await
}

/// Count rentals, optionally only those in `status`.
pub async fn count_rentals(
    db: &DatabaseConnection,
    status: Option<RentalStatus>,
) -> Result<u64, DbErr> {
    let mut query = dress_rentals::Entity::find();
    if let Some(status) = status {
        query = query.filter(dress_rentals::Column::Status.eq(status));
    }
    query.count(db).await
}

/// Apply a self-service update: new return date, back to Pending.
///
/// The version is bumped in the same statement, so a moderator holding the
/// version read before this write is refused afterwards. Returns `None` when
/// the rental no longer exists or is not rented by `user_id`.
pub async fn update_own_rental(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: UpdateOwnRental,
) -> Result<Option<dress_rentals::Model>, DbErr> {
    let result = dress_rentals::Entity::update_many()
        .col_expr(dress_rentals::Column::ReturnDate, Expr::value(input.return_date))
        .col_expr(
            dress_rentals::Column::Status,
            Expr::value(RentalStatus::Pending.as_str()),
        )
        .col_expr(dress_rentals::Column::Version, next_version())
        .filter(dress_rentals::Column::Id.eq(id))
        .filter(dress_rentals::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }

    get_rental_by_id(db, id).await
}

/// Set the status of a rental only if it is still at `expected_version`.
///
/// Returns the updated rental, or `None` when the row was changed (or removed)
/// since the caller read it.
pub async fn update_status_if_version(
    db: &DatabaseConnection,
    id: i32,
    status: RentalStatus,
    expected_version: i32,
) -> Result<Option<dress_rentals::Model>, DbErr> {
    let result = dress_rentals::Entity::update_many()
        .col_expr(dress_rentals::Column::Status, Expr::value(status.as_str()))
        .col_expr(dress_rentals::Column::Version, next_version())
        .filter(dress_rentals::Column::Id.eq(id))
        .filter(dress_rentals::Column::Version.eq(expected_version))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }

    get_rental_by_id(db, id).await
}

/// `version + 1`, evaluated by the database against the row being written.
fn next_version() -> SimpleExpr {
    Expr::col(dress_rentals::Column::Version).add(1)
}

/// Delete a rental by ID.
pub async fn delete_rental(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    dress_rentals::Entity::delete_by_id(id).exec(db).await
}
