use sea_orm::*;

use crate::db::profiles as profile_db;
use crate::models::users::{self, NewAccount};
use crate::models::{groups, profiles, user_groups};

/// Whether an account already uses this username.
pub async fn username_exists(db: &DatabaseConnection, username: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Whether another account already uses this email. `except` skips the
/// caller's own account when it is changing its profile.
pub async fn email_taken(
    db: &DatabaseConnection,
    email: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(users::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Create an account together with its profile, in one transaction.
///
/// The profile is created as an explicit step right after the account row,
/// then filled with the IBAN given at registration.
pub async fn create_account(
    db: &DatabaseConnection,
    input: NewAccount,
    iban: String,
) -> Result<(users::Model, profiles::Model), DbErr> {
    let txn = db.begin().await?;

    let user = users::ActiveModel {
        username: Set(input.username),
        email: Set(input.email),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        password_hash: Set(input.password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let profile = profile_db::create_for_user(&txn, user.id).await?;
    let profile = profile_db::update_profile(&txn, profile, Some(iban), None).await?;

    txn.commit().await?;
    Ok((user, profile))
}

/// Fetch a single account by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Names of every group the account belongs to.
pub async fn group_names_for_user(
    db: &DatabaseConnection,
    user: &users::Model,
) -> Result<Vec<String>, DbErr> {
    let groups = user.find_related(groups::Entity).all(db).await?;
    Ok(groups.into_iter().map(|g| g.name).collect())
}

/// Put an account into a group, creating the group if needed. Idempotent.
pub async fn add_user_to_group(
    db: &DatabaseConnection,
    user_id: i32,
    group_name: &str,
) -> Result<groups::Model, DbErr> {
    let group = match groups::Entity::find()
        .filter(groups::Column::Name.eq(group_name))
        .one(db)
        .await?
    {
        Some(group) => group,
        None => {
            groups::ActiveModel {
                name: Set(group_name.to_string()),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    let already_member = user_groups::Entity::find_by_id((user_id, group.id))
        .one(db)
        .await?
        .is_some();

    if !already_member {
        user_groups::Entity::insert(user_groups::ActiveModel {
            user_id: Set(user_id),
            group_id: Set(group.id),
        })
        .exec_without_returning(db)
        .await?;
    }

    Ok(group)
}

/// Update the account fields editable from the profile page.
pub async fn update_account<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.clone().into();

    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(first_name) = first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = last_name {
        active.last_name = Set(last_name);
    }

    if !active.is_changed() {
        return Ok(user);
    }

    active.update(db).await
}

/// Delete an account. Its profile and memberships go with it; rentals and
/// reviews stay with their account reference cleared.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}
