use sea_orm::*;

use crate::models::profiles::{self, DEFAULT_PICTURE};

/// Create the profile row for a freshly created account.
pub async fn create_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<profiles::Model, DbErr> {
    profiles::ActiveModel {
        user_id: Set(user_id),
        picture: Set(DEFAULT_PICTURE.to_string()),
        iban: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn get_profile_by_user_id(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Number of profile rows belonging to an account (exactly one for a live account).
pub async fn count_profiles_for_user(db: &DatabaseConnection, user_id: i32) -> Result<u64, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .count(db)
        .await
}

/// Persist profile changes. `picture` is the stored path of a new upload.
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    profile: profiles::Model,
    iban: Option<String>,
    picture: Option<String>,
) -> Result<profiles::Model, DbErr> {
    let mut active: profiles::ActiveModel = profile.clone().into();

    if let Some(iban) = iban {
        active.iban = Set(iban);
    }
    if let Some(picture) = picture {
        active.picture = Set(picture);
    }

    if !active.is_changed() {
        return Ok(profile);
    }

    active.update(db).await
}
