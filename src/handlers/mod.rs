pub mod accounts;
pub mod admin;
pub mod catalog;
pub mod index;
pub mod moderation;
pub mod rentals;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::error::AppError;

/// Routes are registered without trailing slashes; the app is wrapped in
/// `NormalizePath::trim()` so `/designers/` and `/designers` are the same.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Extractor errors use the same JSON body as handler errors ──
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    );

    // ── Dashboard ──
    cfg.route("/", web::get().to(index::dashboard));

    // ── Accounts ──
    cfg.service(
        web::resource("/register")
            .route(web::get().to(accounts::registration_form))
            .route(web::post().to(accounts::register)),
    );
    cfg.route("/login", web::post().to(accounts::login));
    cfg.service(
        web::resource("/profile")
            .route(web::get().to(accounts::get_profile))
            .route(web::post().to(accounts::update_profile))
            .route(web::put().to(accounts::update_profile))
            .route(web::delete().to(accounts::delete_account)),
    );

    // ── Catalog (public read) ──
    cfg.service(
        web::scope("/designers")
            .route("", web::get().to(catalog::get_designers))
            .route("/{id}", web::get().to(catalog::get_designer)),
    );
    cfg.service(
        web::scope("/dresses")
            .route("", web::get().to(catalog::get_dresses))
            .route("/{id}", web::get().to(catalog::get_dress))
            .route("/{id}", web::post().to(catalog::create_review))
            .route(
                "/reviews/{id}",
                web::get().to(moderation::review_delete_confirmation),
            )
            .route("/reviews/{id}", web::post().to(moderation::delete_review))
            .route("/reviews/{id}", web::delete().to(moderation::delete_review)),
    );
    cfg.route("/search", web::get().to(catalog::search));

    // ── Self-service rentals ──
    cfg.service(
        web::scope("/mydresses")
            .route("", web::get().to(rentals::my_rentals))
            .route("/new", web::get().to(rentals::new_rental_form))
            .route("/new", web::post().to(rentals::create_rental))
            .route("/update/{id}", web::get().to(rentals::update_rental_form))
            .route("/update/{id}", web::post().to(rentals::update_rental))
            .route("/update/{id}", web::put().to(rentals::update_rental)),
    );

    // ── Moderation (moderators group) ──
    cfg.route("/allrents", web::get().to(moderation::all_rents));
    cfg.service(
        web::scope("/rent")
            .route("/update/{id}", web::get().to(moderation::update_rent_form))
            .route("/update/{id}", web::post().to(moderation::update_rent))
            .route("/update/{id}", web::put().to(moderation::update_rent))
            .route(
                "/delete/{id}",
                web::get().to(moderation::delete_rent_confirmation),
            )
            .route("/delete/{id}", web::post().to(moderation::delete_rent))
            .route("/delete/{id}", web::delete().to(moderation::delete_rent)),
    );

    // ── Catalog administration (staff group) ──
    cfg.service(
        web::scope("/admin")
            .route("/designers", web::post().to(admin::create_designer))
            .route("/sizes", web::post().to(admin::create_size))
            .route("/styles", web::post().to(admin::create_style))
            .route("/dresses", web::post().to(admin::create_dress))
            .route("/dresses/{id}", web::delete().to(admin::delete_dress))
            .route(
                "/groups/{name}/members/{user_id}",
                web::post().to(admin::add_group_member),
            ),
    );
}

/// `303 See Other` to `location`, used where a finished action sends the
/// actor back to a listing or detail page.
pub(crate) fn see_other(location: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}
