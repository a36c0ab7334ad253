use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::config::Config;
use crate::db::rentals as rental_db;
use crate::db::reviews as review_db;
use crate::error::AppError;
use crate::handlers::see_other;
use crate::models::dress_rentals::{self, RentalResponse, UpdateRentalStatus};

// ── Rentals (moderators) ──

/// GET /allrents — every rental.
pub async fn all_rents(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    require_moderator(&user)?;

    let rentals = rental_db::get_all_rentals(db.get_ref()).await?;
    let body: Vec<RentalResponse> = rentals.into_iter().map(RentalResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /rent/update/{id} — a rental and the statuses it may move to.
pub async fn update_rent_form(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_moderator(&user)?;
    let rental = find_rental(db.get_ref(), path.into_inner()).await?;
    let allowed = config.rental_transitions.allowed_targets(rental.status);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "rental": RentalResponse::from(rental),
        "allowed_statuses": allowed,
    })))
}

/// POST|PUT /rent/update/{id} — set a rental's status.
///
/// The move must be allowed by the configured transition policy. When
/// `expected_version` is given and the rental has been written since, the
/// update is refused with `409` and nothing changes.
pub async fn update_rent(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    path: web::Path<i32>,
    body: web::Json<UpdateRentalStatus>,
) -> Result<HttpResponse, AppError> {
    require_moderator(&user)?;
    let rental = find_rental(db.get_ref(), path.into_inner()).await?;
    let UpdateRentalStatus {
        status,
        expected_version,
    } = body.into_inner();

    if !config.rental_transitions.permits(rental.status, status) {
        return Err(AppError::Conflict(format!(
            "A {} rental cannot be moved to {}",
            rental.status.as_str(),
            status.as_str()
        )));
    }

    let expected = expected_version.unwrap_or(rental.version);
    let updated = rental_db::update_status_if_version(db.get_ref(), rental.id, status, expected)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "Rental {} was changed by someone else; reload and try again",
                rental.id
            ))
        })?;

    tracing::info!(
        "Moderator {} moved rental {} from {} to {}",
        user.user.username,
        updated.id,
        rental.status.as_str(),
        updated.status.as_str()
    );

    Ok(see_other("/allrents"))
}

/// GET /rent/delete/{id} — confirmation context for deleting a rental.
pub async fn delete_rent_confirmation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_moderator(&user)?;
    let rental = find_rental(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(RentalResponse::from(rental)))
}

/// POST|DELETE /rent/delete/{id} — delete a rental.
pub async fn delete_rent(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_moderator(&user)?;
    let rental = find_rental(db.get_ref(), path.into_inner()).await?;

    rental_db::delete_rental(db.get_ref(), rental.id).await?;
    tracing::info!("Moderator {} deleted rental {}", user.user.username, rental.id);

    Ok(see_other("/allrents"))
}

// ── Reviews (staff) ──

/// GET /dresses/reviews/{id} — confirmation context for deleting a review.
pub async fn review_delete_confirmation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let id = path.into_inner();
    let review = review_db::get_review_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {id} not found")))?;
    Ok(HttpResponse::Ok().json(review))
}

/// POST|DELETE /dresses/reviews/{id} — delete a review and go back to its dress.
pub async fn delete_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    require_staff(&user)?;
    let id = path.into_inner();
    let review = review_db::get_review_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {id} not found")))?;

    review_db::delete_review(db.get_ref(), review.id).await?;
    tracing::info!(
        "Staff {} deleted review {} on dress {}",
        user.user.username,
        review.id,
        review.dress_id
    );

    Ok(see_other(format!("/dresses/{}", review.dress_id)))
}

// ── Helpers ──

async fn find_rental(db: &DatabaseConnection, id: i32) -> Result<dress_rentals::Model, AppError> {
    rental_db::get_rental_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rental {id} not found")))
}

fn require_moderator(user: &AuthenticatedUser) -> Result<(), AppError> {
    user.capabilities.require_moderator().inspect_err(|_| {
        tracing::warn!("User {} is not a moderator", user.user.username);
    })
}

pub(crate) fn require_staff(user: &AuthenticatedUser) -> Result<(), AppError> {
    user.capabilities.require_staff().inspect_err(|_| {
        tracing::warn!("User {} is not staff", user.user.username);
    })
}
