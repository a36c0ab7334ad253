use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::catalog as catalog_db;
use crate::db::reviews as review_db;
use crate::error::AppError;
use crate::models::PageQuery;
use crate::models::dress_reviews::CreateReview;
use crate::models::dresses::{DressDetail, display_names};

/// GET /designers?page=N — designers ordered by name, two per page.
pub async fn get_designers(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = catalog_db::get_designers_page(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /designers/{id} — a designer and the dresses they made.
pub async fn get_designer(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let designer = catalog_db::get_designer_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Designer {id} not found")))?;
    let dresses = catalog_db::get_dresses_by_designer(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "designer": designer,
        "dresses": dresses,
    })))
}

/// GET /dresses?page=N — dresses in catalog order, four per page.
pub async fn get_dresses(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = catalog_db::get_dresses_page(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /dresses/{id} — dress detail with designer, sizes, styles and reviews.
pub async fn get_dress(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let db = db.get_ref();
    let dress = catalog_db::get_dress_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dress {id} not found")))?;

    let designer = catalog_db::get_designer_by_id(db, dress.designer_id).await?;
    let sizes = catalog_db::get_sizes_for_dress(db, &dress).await?;
    let styles = catalog_db::get_styles_for_dress(db, &dress).await?;
    let reviews = review_db::get_reviews_by_dress_id(db, dress.id).await?;

    Ok(HttpResponse::Ok().json(DressDetail {
        display_sizes: display_names(sizes.iter().map(|s| s.name.as_str())),
        display_styles: display_names(styles.iter().map(|s| s.name.as_str())),
        dress,
        designer,
        sizes,
        styles,
        reviews,
    }))
}

/// POST /dresses/{id} — leave a review on a dress.
///
/// The reviewer is the signed-in account and the creation time is stamped
/// server-side.
pub async fn create_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, AppError> {
    let dress_id = path.into_inner();
    let dress = catalog_db::get_dress_by_id(db.get_ref(), dress_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dress {dress_id} not found")))?;

    let input = body.into_inner();
    input.validate().map_err(AppError::Validation)?;

    let review = review_db::insert_review(db.get_ref(), dress.id, user.id(), input.content).await?;
    tracing::info!(
        "User {} reviewed dress {} (review {})",
        user.user.username,
        dress.item_code,
        review.id
    );

    Ok(HttpResponse::Created().json(review))
}

// ── Search ──

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search_text: Option<String>,
}

/// GET /search?search_text=... — dresses whose color, item code or any style
/// name contains the text, case-insensitively.
///
/// A missing `search_text` is treated as empty and matches every dress.
pub async fn search(
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let text = query.search_text.as_deref().unwrap_or("").trim();

    let dress_list = catalog_db::search_dresses(db.get_ref(), text).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "query_text": text,
        "dress_list": dress_list,
    })))
}
