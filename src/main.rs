use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use dresscode_backend::config::Config;
use dresscode_backend::create_pool;
use dresscode_backend::handlers;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to connect to database: {e}")))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    tracing::info!("Database ready");

    std::fs::create_dir_all(&config.media_root)?;
    tracing::info!(
        "Serving media from {} with {:?} rental transitions",
        config.media_root.display(),
        config.rental_transitions
    );

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    let media_root = config.media_root.clone();
    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .service(Files::new("/media", media_root.clone()))
            .configure(handlers::init_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
