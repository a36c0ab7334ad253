//! Shared fixtures for the HTTP tests: an in-memory SQLite database with the
//! real migrations applied, a test configuration, and seed helpers.
#![allow(dead_code)]

use std::path::PathBuf;

use dresscode_backend::auth::jwt::mint_token;
use dresscode_backend::config::Config;
use dresscode_backend::db::catalog as catalog_db;
use dresscode_backend::db::rentals as rental_db;
use dresscode_backend::db::users as user_db;
use dresscode_backend::lifecycle::TransitionPolicy;
use dresscode_backend::models::designers::{self, CreateDesigner};
use dresscode_backend::models::dress_rentals::{self, CreateRental};
use dresscode_backend::models::dresses::{self, CreateDress};
use dresscode_backend::models::users::{self, NewAccount};
use dresscode_backend::models::{sizes, styles};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A fake secret for testing — never use the real one in tests committed to git.
pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Build the app the same way `main` does, minus CORS and static files.
#[macro_export]
macro_rules! test_app {
    ($db:expr, $config:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new($config.clone()))
                .configure(dresscode_backend::handlers::init_routes),
        )
        .await
    };
}

// Helper to create a migrated test database
pub async fn setup_test_db() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open test DB");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn test_config() -> Config {
    test_config_with(TransitionPolicy::FreeForm)
}

pub fn test_config_with(rental_transitions: TransitionPolicy) -> Config {
    let media_root: PathBuf =
        std::env::temp_dir().join(format!("dresscode-test-media-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&media_root).expect("Failed to create media root");

    Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_hours: 1,
        media_root,
        rental_transitions,
    }
}

/// Insert an account directly, with its profile. The password hash is a
/// placeholder; use `POST /register` when a real login is needed.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> users::Model {
    let account = NewAccount {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        password_hash: "not-a-real-hash".to_string(),
    };
    let (user, _profile) = user_db::create_account(db, account, "GB00TEST0000".to_string())
        .await
        .expect("Failed to create user");
    user
}

pub async fn create_moderator(db: &DatabaseConnection, username: &str) -> users::Model {
    let user = create_test_user(db, username).await;
    user_db::add_user_to_group(db, user.id, "moderators")
        .await
        .expect("Failed to grant moderators");
    user
}

pub async fn create_staff(db: &DatabaseConnection, username: &str) -> users::Model {
    let user = create_test_user(db, username).await;
    user_db::add_user_to_group(db, user.id, "staff")
        .await
        .expect("Failed to grant staff");
    user
}

/// `Authorization` header value for `user`.
pub fn bearer(user: &users::Model) -> String {
    let token = mint_token(user.id, &user.username, TEST_SECRET, 1).expect("Failed to mint token");
    format!("Bearer {token}")
}

pub async fn create_test_designer(
    db: &DatabaseConnection,
    name: &str,
    surname: &str,
) -> designers::Model {
    catalog_db::insert_designer(
        db,
        CreateDesigner {
            name: name.to_string(),
            surname: surname.to_string(),
            description: None,
            photo: None,
        },
    )
    .await
    .expect("Failed to create designer")
}

/// A small catalog used by most tests.
pub struct Catalog {
    pub designer: designers::Model,
    pub small: sizes::Model,
    pub medium: sizes::Model,
    pub large: sizes::Model,
    pub evening: styles::Model,
    pub casual: styles::Model,
    /// Red, AB12, sizes S and M, evening style.
    pub red_dress: dresses::Model,
    /// Green, CD34, size L, casual style.
    pub green_dress: dresses::Model,
}

pub async fn seed_catalog(db: &DatabaseConnection) -> Catalog {
    let designer = create_test_designer(db, "Coco", "Chanel").await;
    let small = catalog_db::insert_size(db, "S".to_string()).await.unwrap();
    let medium = catalog_db::insert_size(db, "M".to_string()).await.unwrap();
    let large = catalog_db::insert_size(db, "L".to_string()).await.unwrap();
    let evening = catalog_db::insert_style(db, "Evening".to_string()).await.unwrap();
    let casual = catalog_db::insert_style(db, "Casual".to_string()).await.unwrap();

    let red_dress = catalog_db::insert_dress(
        db,
        CreateDress {
            color: "Red".to_string(),
            item_code: "AB12".to_string(),
            description: Some("Silk gown".to_string()),
            photo: None,
            designer_id: designer.id,
            size_ids: vec![small.id, medium.id],
            style_ids: vec![evening.id],
        },
    )
    .await
    .expect("Failed to create red dress");

    let green_dress = catalog_db::insert_dress(
        db,
        CreateDress {
            color: "Green".to_string(),
            item_code: "CD34".to_string(),
            description: None,
            photo: None,
            designer_id: designer.id,
            size_ids: vec![large.id],
            style_ids: vec![casual.id],
        },
    )
    .await
    .expect("Failed to create green dress");

    Catalog {
        designer,
        small,
        medium,
        large,
        evening,
        casual,
        red_dress,
        green_dress,
    }
}

pub async fn create_test_rental(
    db: &DatabaseConnection,
    user: &users::Model,
    dress: &dresses::Model,
    size: &sizes::Model,
) -> dress_rentals::Model {
    rental_db::insert_rental(
        db,
        user.id,
        CreateRental {
            dress_id: dress.id,
            size_id: Some(size.id),
            start_date: chrono::NaiveDate::from_ymd_opt(2030, 6, 1),
            return_date: chrono::NaiveDate::from_ymd_opt(2030, 6, 8),
        },
    )
    .await
    .expect("Failed to create rental")
}
