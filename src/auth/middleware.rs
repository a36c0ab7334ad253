use actix_web::FromRequest;
use actix_web::http::header::Header;
use actix_web::{HttpRequest, dev::Payload, web};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::authorization::Capabilities;
use crate::auth::jwt;
use crate::config::Config;
use crate::db::users as user_db;
use crate::error::AppError;
use crate::models::users;

/// The signed-in account for the current request, with its capabilities
/// already resolved from group membership.
///
/// Use `Option<AuthenticatedUser>` on routes that are public but behave
/// differently for signed-in accounts.
pub struct AuthenticatedUser {
    pub user: users::Model,
    pub capabilities: Capabilities,
}

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let bearer = Authorization::<Bearer>::parse(&req)
                .map_err(|_| {
                    AppError::Unauthorized(
                        "Authorization header must be: Bearer <token>".to_string(),
                    )
                })?
                .into_scheme();

            // 2. Validate it against the configured secret.
            let config = req
                .app_data::<web::Data<Config>>()
                .ok_or_else(|| AppError::Internal("Configuration not available".to_string()))?;

            let claims = jwt::validate_token(bearer.token(), &config.jwt_secret)
                .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(AppError::Unauthorized)?;

            // 3. Load the account and its groups.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| AppError::Internal("Database not configured".to_string()))?;

            let user = user_db::get_user_by_id(db.get_ref(), user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

            let groups = user_db::group_names_for_user(db.get_ref(), &user).await?;

            Ok(AuthenticatedUser {
                capabilities: Capabilities::from_group_names(&groups),
                user,
            })
        })
    }
}
