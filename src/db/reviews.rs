use sea_orm::*;

use crate::models::dress_reviews;

/// Insert a review. `date_created` is stamped here and never changed afterwards.
pub async fn insert_review(
    db: &DatabaseConnection,
    dress_id: i32,
    reviewer_id: i32,
    content: String,
) -> Result<dress_reviews::Model, DbErr> {
    dress_reviews::ActiveModel {
        date_created: Set(chrono::Utc::now()),
        content: Set(content),
        dress_id: Set(dress_id),
        reviewer_id: Set(Some(reviewer_id)),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Reviews of a dress, oldest first.
pub async fn get_reviews_by_dress_id(
    db: &DatabaseConnection,
    dress_id: i32,
) -> Result<Vec<dress_reviews::Model>, DbErr> {
    dress_reviews::Entity::find()
        .filter(dress_reviews::Column::DressId.eq(dress_id))
        .order_by_asc(dress_reviews::Column::DateCreated)
        .order_by_asc(dress_reviews::Column::Id)
        .all(db)
        .await
}

pub async fn get_review_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<dress_reviews::Model>, DbErr> {
    dress_reviews::Entity::find_by_id(id).one(db).await
}

pub async fn delete_review(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    dress_reviews::Entity::delete_by_id(id).exec(db).await
}
