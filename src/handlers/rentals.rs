use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::authorization::verify_rental_owner;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::catalog as catalog_db;
use crate::db::rentals as rental_db;
use crate::error::AppError;
use crate::models::dress_rentals::{
    CreateRental, RentalFormContext, RentalFormQuery, RentalResponse, UpdateOwnRental,
};

const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// GET /mydresses — rentals of the authenticated account.
pub async fn my_rentals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let rentals = rental_db::get_rentals_by_user_id(db.get_ref(), user.id()).await?;
    let body: Vec<RentalResponse> = rentals.into_iter().map(RentalResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /mydresses/new?dress_id=N — form context for a new rental.
///
/// Size choices are the sizes the dress is offered in; without a dress there
/// are none.
pub async fn new_rental_form(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<RentalFormQuery>,
) -> Result<HttpResponse, AppError> {
    let context = match query.dress_id {
        Some(dress_id) => {
            let dress = catalog_db::get_dress_by_id(db.get_ref(), dress_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Dress {dress_id} not found")))?;
            let size_choices = catalog_db::get_sizes_for_dress(db.get_ref(), &dress).await?;
            RentalFormContext {
                dress: Some(dress),
                size_choices,
                rental: None,
            }
        }
        None => RentalFormContext {
            dress: None,
            size_choices: Vec::new(),
            rental: None,
        },
    };

    Ok(HttpResponse::Ok().json(context))
}

/// POST /mydresses/new — request a rental.
///
/// The renter is the authenticated account and the status always starts as
/// `pending`, whatever the submission says.
pub async fn create_rental(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRental>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();

    // 1. The dress must exist.
    let dress = catalog_db::get_dress_by_id(db.get_ref(), input.dress_id)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Dress: {INVALID_CHOICE}")))?;

    // 2. A size is required and must be one the dress is offered in.
    let size_id = input
        .size_id
        .ok_or_else(|| AppError::Validation("Size: This field is required.".to_string()))?;
    if !catalog_db::size_offered_for_dress(db.get_ref(), dress.id, size_id).await? {
        return Err(AppError::Validation(format!("Size: {INVALID_CHOICE}")));
    }

    // 3. Store it.
    let rental = rental_db::insert_rental(db.get_ref(), user.id(), input).await?;
    tracing::info!(
        "User {} requested dress {} (rental {})",
        user.user.username,
        dress.item_code,
        rental.id
    );

    Ok(HttpResponse::Created().json(RentalResponse::from(rental)))
}

/// GET /mydresses/update/{id} — form context for one of the account's own rentals.
///
/// The dress and size are fixed once a rental exists, so the only size choice
/// offered is the one already stored.
pub async fn update_rental_form(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rental = owned_rental(&user, db.get_ref(), path.into_inner()).await?;

    let dress = catalog_db::get_dress_by_id(db.get_ref(), rental.dress_id).await?;
    let size_choices = match (&dress, rental.size_id) {
        (Some(dress), Some(size_id)) => catalog_db::get_sizes_for_dress(db.get_ref(), dress)
            .await?
            .into_iter()
            .filter(|size| size.id == size_id)
            .collect(),
        _ => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(RentalFormContext {
        dress,
        size_choices,
        rental: Some(RentalResponse::from(rental)),
    }))
}

/// POST|PUT /mydresses/update/{id} — change the return date of an owned rental.
///
/// Ownership is checked before the body is parsed, so a non-owner is refused
/// even when the submission is malformed. Dress, start date, size and status
/// in the submission are ignored; the rental goes back to `pending`.
pub async fn update_rental(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let rental = owned_rental(&user, db.get_ref(), path.into_inner()).await?;

    let input: UpdateOwnRental = if body.is_empty() {
        UpdateOwnRental::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid rental form: {e}")))?
    };

    let updated = rental_db::update_own_rental(db.get_ref(), rental.id, user.id(), input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rental {} not found", rental.id)))?;
    tracing::info!("User {} updated rental {}", user.user.username, updated.id);

    Ok(HttpResponse::Ok().json(RentalResponse::from(updated)))
}

/// Load a rental and make sure it belongs to `user`.
async fn owned_rental(
    user: &AuthenticatedUser,
    db: &DatabaseConnection,
    id: i32,
) -> Result<crate::models::dress_rentals::Model, AppError> {
    let rental = rental_db::get_rental_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rental {id} not found")))?;

    if let Err(e) = verify_rental_owner(&rental, user.id()) {
        tracing::warn!(
            "User {} tried to change rental {} owned by {:?}",
            user.user.username,
            rental.id,
            rental.user_id
        );
        return Err(e);
    }

    Ok(rental)
}
