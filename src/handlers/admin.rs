use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::auth::middleware::AuthenticatedUser;
use crate::db::catalog as catalog_db;
use crate::db::users as user_db;
use crate::error::AppError;
use crate::handlers::moderation::require_staff;
use crate::models::designers::CreateDesigner;
use crate::models::dresses::CreateDress;
use crate::models::styles::CreateNamed;

const MAX_COLOR_CHARS: usize = 50;
const MAX_ITEM_CODE_CHARS: usize = 10;
const MAX_NAME_CHARS: usize = 50;

/// POST /admin/designers — add a designer to the catalog.
pub async fn create_designer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateDesigner>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let input = body.into_inner();
    required("Name", &input.name, MAX_NAME_CHARS)?;
    required("Surname", &input.surname, MAX_NAME_CHARS)?;

    let designer = catalog_db::insert_designer(db.get_ref(), input).await?;
    tracing::info!("Staff {} added designer {}", user.user.username, designer.id);
    Ok(HttpResponse::Created().json(designer))
}

/// POST /admin/sizes
pub async fn create_size(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateNamed>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let name = body.into_inner().name.trim().to_string();
    required("Name", &name, MAX_NAME_CHARS)?;

    let size = catalog_db::insert_size(db.get_ref(), name).await?;
    tracing::info!("Staff {} added size {}", user.user.username, size.name);
    Ok(HttpResponse::Created().json(size))
}

/// POST /admin/styles
pub async fn create_style(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateNamed>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let name = body.into_inner().name.trim().to_string();
    required("Name", &name, MAX_NAME_CHARS)?;

    let style = catalog_db::insert_style(db.get_ref(), name).await?;
    tracing::info!("Staff {} added style {}", user.user.username, style.name);
    Ok(HttpResponse::Created().json(style))
}

/// POST /admin/dresses — add a dress with its sizes and styles.
///
/// Item codes are unique; a duplicate is a `409`.
pub async fn create_dress(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateDress>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let mut input = body.into_inner();
    input.color = input.color.trim().to_string();
    input.item_code = input.item_code.trim().to_string();
    required("Color", &input.color, MAX_COLOR_CHARS)?;
    required("Item code", &input.item_code, MAX_ITEM_CODE_CHARS)?;

    if catalog_db::get_designer_by_id(db.get_ref(), input.designer_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(
            "Designer: Select a valid choice. That choice is not one of the available choices."
                .to_string(),
        ));
    }
    if catalog_db::item_code_exists(db.get_ref(), &input.item_code).await? {
        return Err(duplicate_item_code());
    }

    let dress = catalog_db::insert_dress(db.get_ref(), input)
        .await
        .map_err(dress_insert_error)?;
    tracing::info!("Staff {} added dress {}", user.user.username, dress.item_code);
    Ok(HttpResponse::Created().json(dress))
}

/// DELETE /admin/dresses/{id} — remove a dress with its rentals and reviews.
pub async fn delete_dress(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let id = path.into_inner();
    let dress = catalog_db::get_dress_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dress {id} not found")))?;

    catalog_db::delete_dress(db.get_ref(), dress.id).await?;
    tracing::info!("Staff {} deleted dress {}", user.user.username, dress.item_code);
    Ok(HttpResponse::NoContent().finish())
}

/// POST /admin/groups/{name}/members/{user_id} — put an account in a group.
///
/// Granting a membership the account already has is a no-op.
pub async fn add_group_member(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let (group_name, member_id) = path.into_inner();

    let member = user_db::get_user_by_id(db.get_ref(), member_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {member_id} not found")))?;
    let group = user_db::add_user_to_group(db.get_ref(), member.id, &group_name).await?;

    tracing::info!(
        "Staff {} added {} to group {}",
        user.user.username,
        member.username,
        group.name
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} is now a member of {}", member.username, group.name),
        "group": group,
    })))
}

// ── Helpers ──

fn required(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{field}: This field is required."
        )));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field}: Ensure this value has at most {max_chars} characters."
        )));
    }
    Ok(())
}

fn duplicate_item_code() -> AppError {
    AppError::Conflict("Dress with this Item code already exists.".to_string())
}

fn dress_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("item_code") => {
            duplicate_item_code()
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::Validation("Sizes and styles must refer to existing entries.".to_string())
        }
        _ => AppError::Database(err),
    }
}
