use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::catalog as catalog_db;
use crate::db::rentals as rental_db;
use crate::error::AppError;
use crate::handlers::see_other;
use crate::models::dress_rentals::RentalStatus;

/// GET / — catalog and rental counts for signed-in accounts.
///
/// Anonymous visitors are sent to the registration page instead.
pub async fn dashboard(
    user: Option<AuthenticatedUser>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    if user.is_none() {
        return Ok(see_other("/register"));
    }

    let db = db.get_ref();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "num_designers": catalog_db::count_designers(db).await?,
        "num_dresses": catalog_db::count_dresses(db).await?,
        "num_dress_rentals": rental_db::count_rentals(db, None).await?,
        "num_dresses_rented": rental_db::count_rentals(db, Some(RentalStatus::Rented)).await?,
        "num_dresses_returned": rental_db::count_rentals(db, Some(RentalStatus::Returned)).await?,
    })))
}
