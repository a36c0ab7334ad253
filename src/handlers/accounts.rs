use std::path::Path;

use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::auth::jwt;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password::{check_password, hash_password, verify_password};
use crate::config::Config;
use crate::db::profiles as profile_db;
use crate::db::users as user_db;
use crate::error::AppError;
use crate::media::{self, DecodedPicture, PROFILE_PICTURE_BOUNDS};
use crate::models::users::{
    LoginForm, NewAccount, ProfileResponse, ProfileUpdateForm, RegisterForm, UserResponse,
};

const MAX_IBAN_CHARS: usize = 50;

/// GET /register — the fields the registration form expects.
pub async fn registration_form() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "fields": [
            "first_name",
            "last_name",
            "username",
            "email",
            "iban",
            "password",
            "password2",
        ],
    }))
}

/// POST /register — create an account and its profile.
///
/// Checks run in a fixed order and stop at the first failure: password
/// length, password confirmation, username, email, IBAN.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let form = body.into_inner();
    let username = form.username.trim().to_string();
    let email = form.email.trim().to_string();

    // 1. Password rules.
    if !check_password(&form.password) {
        return Err(AppError::Validation(
            "Password is minimum 8 symbols!!!".to_string(),
        ));
    }
    if form.password != form.password2 {
        return Err(AppError::Validation(
            "Passwords do not match, please retype passwords!".to_string(),
        ));
    }

    // 2. Username and email must be free.
    if username.is_empty() {
        return Err(AppError::Validation(
            "Username: This field is required.".to_string(),
        ));
    }
    if user_db::username_exists(db.get_ref(), &username).await? {
        return Err(AppError::Conflict(format!("Username {username} already exists")));
    }
    if user_db::email_taken(db.get_ref(), &email, None).await? {
        return Err(AppError::Conflict(format!("Email {email} already exists")));
    }

    // 3. Payment details.
    let iban = form.iban.trim().to_string();
    if iban.is_empty() {
        return Err(AppError::Validation(
            "You must enter IBAN number!".to_string(),
        ));
    }
    if iban.chars().count() > MAX_IBAN_CHARS {
        return Err(AppError::Validation(format!(
            "IBAN: Ensure this value has at most {MAX_IBAN_CHARS} characters."
        )));
    }

    // 4. Account and profile in one transaction.
    let account = NewAccount {
        username: username.clone(),
        email: email.clone(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        password_hash: hash_password(&form.password).map_err(AppError::Internal)?,
    };

    let (user, profile) = user_db::create_account(db.get_ref(), account, iban)
        .await
        .map_err(|e| duplicate_account(e, &username, &email))?;

    tracing::info!("Registered user {} (id {})", user.username, user.id);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": format!("Username {} is successfully registered!", user.username),
        "user": UserResponse::from(user),
        "profile": profile,
    })))
}

/// A concurrent registration can slip past the checks above; the unique
/// constraints catch it and it is reported the same way.
fn duplicate_account(err: DbErr, username: &str, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AppError::Conflict(format!("Email {email} already exists"))
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("Username {username} already exists"))
        }
        _ => AppError::Database(err),
    }
}

/// POST /login — exchange username and password for a bearer token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let form = body.into_inner();

    let user = match user_db::get_user_by_username(db.get_ref(), &form.username).await? {
        Some(user) if verify_password(&form.password, &user.password_hash).unwrap_or(false) => user,
        _ => {
            tracing::warn!("Failed login for {}", form.username);
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
    };

    let token = jwt::mint_token(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.token_ttl_hours,
    )
    .map_err(AppError::Internal)?;

    tracing::info!("User {} logged in", user.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// GET /profile — account fields, profile and group memberships.
pub async fn get_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let profile = profile_db::get_profile_by_user_id(db.get_ref(), user.id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    let groups = user_db::group_names_for_user(db.get_ref(), &user.user).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: UserResponse::from(user.user),
        profile,
        groups,
    }))
}

/// POST|PUT /profile — update account fields, IBAN and optionally the picture.
///
/// Both the account part and the profile part are validated before anything
/// is written. A new picture is shrunk to fit the profile bounds after the
/// profile has been saved.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<ProfileUpdateForm>,
) -> Result<HttpResponse, AppError> {
    let form = body.into_inner();
    let not_updated =
        |reason: String| AppError::Validation(format!("Profile NOT updated: {reason}"));

    // 1. Validate the account part.
    let email = form.email.map(|e| e.trim().to_string());
    if let Some(email) = &email {
        if email.is_empty() {
            return Err(not_updated("Email: This field is required.".to_string()));
        }
        if user_db::email_taken(db.get_ref(), email, Some(user.id())).await? {
            return Err(not_updated(format!("Email {email} already exists")));
        }
    }

    // 2. Validate the profile part.
    let iban = form.iban.map(|i| i.trim().to_string());
    if let Some(iban) = &iban {
        if iban.is_empty() {
            return Err(not_updated("You must enter IBAN number!".to_string()));
        }
        if iban.chars().count() > MAX_IBAN_CHARS {
            return Err(not_updated(format!(
                "IBAN: Ensure this value has at most {MAX_IBAN_CHARS} characters."
            )));
        }
    }
    let picture = match form.picture.as_deref() {
        Some(encoded) => {
            let decoded = DecodedPicture::from_base64(encoded)
                .map_err(|e| not_updated(e.to_string()))?;
            Some(decoded)
        }
        None => None,
    };

    let profile = profile_db::get_profile_by_user_id(db.get_ref(), user.id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    // 3. Write the picture file, then both rows together.
    let stored_picture = match &picture {
        Some(picture) => Some(picture.store_profile_picture(&config.media_root)?),
        None => None,
    };

    let conn = db.get_ref();
    let (first_name, last_name) = (form.first_name, form.last_name);
    let new_picture = stored_picture.clone();
    let saved = async move {
        let txn = conn.begin().await?;
        let account = user_db::update_account(&txn, user.user, email, first_name, last_name)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    not_updated("Email already exists".to_string())
                }
                _ => AppError::Database(e),
            })?;
        let profile = profile_db::update_profile(&txn, profile, iban, new_picture).await?;
        txn.commit().await?;
        Ok::<_, AppError>((account, profile))
    }
    .await;

    let (account, profile) = match saved {
        Ok(rows) => rows,
        Err(e) => {
            if let Some(stored) = &stored_picture {
                media::discard(&config.media_root, stored);
            }
            return Err(e);
        }
    };

    // 4. Post-save step: keep the stored picture within bounds.
    shrink_profile_picture(&config.media_root, &profile.picture)?;

    tracing::info!("User {} updated their profile", account.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated!",
        "user": UserResponse::from(account),
        "profile": profile,
    })))
}

/// DELETE /profile — remove the account.
///
/// The profile and group memberships go with it; rentals and reviews stay
/// with their account reference cleared.
pub async fn delete_account(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    user_db::delete_user(db.get_ref(), user.id()).await?;
    tracing::info!("User {} deleted their account", user.user.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Account {} deleted", user.user.username),
    })))
}

fn shrink_profile_picture(media_root: &Path, stored: &str) -> Result<(), AppError> {
    let path = media::media_path(media_root, stored);
    if !path.is_file() {
        tracing::debug!("No picture file at {}, nothing to shrink", path.display());
        return Ok(());
    }

    let (width, height) = PROFILE_PICTURE_BOUNDS;
    media::shrink_to_fit(&path, width, height)?;
    Ok(())
}
