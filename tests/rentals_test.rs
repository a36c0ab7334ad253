//! Self-service rentals and rental moderation.
//!
//! Run with: `cargo test --test rentals_test`
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use chrono::NaiveDate;
use serde_json::{Value, json};

use common::*;
use dresscode_backend::db::rentals as rental_db;
use dresscode_backend::lifecycle::TransitionPolicy;
use dresscode_backend::models::dress_rentals::{RentalStatus, UpdateOwnRental};

async fn error_message(resp: actix_web::dev::ServiceResponse) -> String {
    let body: Value = test::read_body_json(resp).await;
    body["error"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn test_new_rental_is_always_pending() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::post()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({
            "dress_id": catalog.red_dress.id,
            "size_id": catalog.medium.id,
            "start_date": "2030-06-01",
            "return_date": "2030-06-08",
            "status": "approved",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["user_id"], alice.id);
    assert_eq!(body["size_id"], catalog.medium.id);
    assert_eq!(body["is_overdue"], false);

    let stored = rental_db::get_rentals_by_user_id(&db, alice.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, RentalStatus::Pending);
}

#[actix_web::test]
async fn test_rental_size_must_belong_to_dress() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let app = test_app!(db, test_config());

    // Large is only offered for the green dress.
    let req = test::TestRequest::post()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({
            "dress_id": catalog.red_dress.id,
            "size_id": catalog.large.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("Select a valid choice"));

    let req = test::TestRequest::post()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({ "dress_id": catalog.red_dress.id }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({ "dress_id": 9999, "size_id": catalog.small.id }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    assert!(rental_db::get_rentals_by_user_id(&db, alice.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_rental_form_offers_dress_sizes() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get()
        .uri(&format!("/mydresses/new?dress_id={}", catalog.red_dress.id))
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["dress"]["item_code"], "AB12");
    let sizes: Vec<&str> = body["size_choices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(sizes, ["S", "M"]);

    let req = test::TestRequest::get()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body["dress"].is_null());
    assert!(body["size_choices"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/mydresses/new?dress_id=9999")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_my_rentals_lists_only_own() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    create_test_rental(&db, &bob, &catalog.green_dress, &catalog.large).await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get()
        .uri("/mydresses/")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let rentals = body.as_array().unwrap();
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0]["dress_id"], catalog.red_dress.id);
}

#[actix_web::test]
async fn test_past_return_date_is_overdue() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    rental_db::update_own_rental(
        &db,
        rental.id,
        alice.id,
        UpdateOwnRental {
            return_date: NaiveDate::from_ymd_opt(2001, 1, 1),
        },
    )
    .await
    .unwrap()
    .expect("alice rents this dress");
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get()
        .uri("/mydresses")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body[0]["is_overdue"], true);
}

#[actix_web::test]
async fn test_non_owner_cannot_update_rental() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let app = test_app!(db, test_config());
    let uri = format!("/mydresses/update/{}", rental.id);

    // Refused even though the body is not a valid form at all.
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&bob)))
        .set_payload("this is not a rental form")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&bob)))
        .set_json(json!({ "return_date": "2030-07-01" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&bob)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let unchanged = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(unchanged, rental);
}

#[actix_web::test]
async fn test_owner_update_only_changes_return_date() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let moderator = create_moderator(&db, "mod").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let app = test_app!(db, test_config());

    // A moderator approves it first.
    let req = test::TestRequest::post()
        .uri(&format!("/rent/update/{}", rental.id))
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::SEE_OTHER
    );

    let req = test::TestRequest::get()
        .uri(&format!("/mydresses/update/{}", rental.id))
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["rental"]["status"], "approved");
    assert_eq!(body["size_choices"].as_array().unwrap().len(), 1);
    assert_eq!(body["size_choices"][0]["name"], "S");

    let req = test::TestRequest::post()
        .uri(&format!("/mydresses/update/{}", rental.id))
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({
            "return_date": "2030-06-15",
            "dress_id": catalog.green_dress.id,
            "size_id": catalog.large.id,
            "start_date": "2030-01-01",
            "status": "returned",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(updated.return_date, NaiveDate::from_ymd_opt(2030, 6, 15));
    assert_eq!(updated.dress_id, catalog.red_dress.id);
    assert_eq!(updated.size_id, Some(catalog.small.id));
    assert_eq!(updated.start_date, rental.start_date);
    assert_eq!(updated.status, RentalStatus::Pending);
    assert_eq!(updated.version, 3);
}

#[actix_web::test]
async fn test_rental_moderation_requires_moderators_group() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let staff = create_staff(&db, "sam").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let app = test_app!(db, test_config());

    for user in [&alice, &staff] {
        let req = test::TestRequest::get()
            .uri("/allrents")
            .insert_header((header::AUTHORIZATION, bearer(user)))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::post()
            .uri(&format!("/rent/update/{}", rental.id))
            .insert_header((header::AUTHORIZATION, bearer(user)))
            .set_json(json!({ "status": "approved" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/rent/delete/{}", rental.id))
            .insert_header((header::AUTHORIZATION, bearer(user)))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    let stored = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RentalStatus::Pending);
}

#[actix_web::test]
async fn test_moderator_manages_rentals() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let moderator = create_moderator(&db, "mod").await;
    let first = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let second = create_test_rental(&db, &bob, &catalog.green_dress, &catalog.large).await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get()
        .uri("/allrents")
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Free-form: straight from pending to returned.
    let req = test::TestRequest::put()
        .uri(&format!("/rent/update/{}", first.id))
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "returned" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/allrents");

    let updated = rental_db::get_rental_by_id(&db, first.id).await.unwrap().unwrap();
    assert_eq!(updated.status, RentalStatus::Returned);
    assert_eq!(updated.version, first.version + 1);
    assert_eq!(updated.user_id, Some(alice.id));

    let req = test::TestRequest::get()
        .uri(&format!("/rent/delete/{}", second.id))
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/rent/delete/{}", second.id))
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/allrents");
    assert!(rental_db::get_rental_by_id(&db, second.id).await.unwrap().is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/rent/update/{}", second.id))
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_stale_version_is_refused() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let moderator = create_moderator(&db, "mod").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let app = test_app!(db, test_config());
    let uri = format!("/rent/update/{}", rental.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "approved", "expected_version": rental.version }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::SEE_OTHER
    );

    // A second moderator still holding the old version.
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "returned", "expected_version": rental.version }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let stored = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RentalStatus::Approved);
    assert_eq!(stored.version, rental.version + 1);
}

#[actix_web::test]
async fn test_sequential_policy_blocks_skipping_states() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let moderator = create_moderator(&db, "mod").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    let app = test_app!(db, test_config_with(TransitionPolicy::Sequential));
    let uri = format!("/rent/update/{}", rental.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["allowed_statuses"], json!(["pending", "approved"]));

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "rented" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(&moderator)))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::SEE_OTHER
    );

    let stored = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RentalStatus::Approved);
}

#[actix_web::test]
async fn test_renter_write_between_moderator_reads_bumps_version() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;
    assert_eq!(rental.version, 1);

    // First moderator approves from version 1.
    let approved = rental_db::update_status_if_version(&db, rental.id, RentalStatus::Approved, 1)
        .await
        .unwrap()
        .expect("version 1 is current");
    assert_eq!(approved.version, 2);

    // The renter saves a form opened before the approval.
    let resubmitted = rental_db::update_own_rental(
        &db,
        rental.id,
        alice.id,
        UpdateOwnRental {
            return_date: NaiveDate::from_ymd_opt(2030, 6, 20),
        },
    )
    .await
    .unwrap()
    .expect("alice rents this dress");
    assert_eq!(resubmitted.status, RentalStatus::Pending);
    assert_eq!(resubmitted.version, 3);

    // A second moderator who read version 2 is now stale.
    let stale = rental_db::update_status_if_version(&db, rental.id, RentalStatus::Rented, 2)
        .await
        .unwrap();
    assert!(stale.is_none());

    let current = rental_db::update_status_if_version(&db, rental.id, RentalStatus::Rented, 3)
        .await
        .unwrap()
        .expect("version 3 is current");
    assert_eq!(current.status, RentalStatus::Rented);
    assert_eq!(current.version, 4);
}

#[actix_web::test]
async fn test_self_service_update_only_touches_own_rental() {
    let db = setup_test_db().await;
    let catalog = seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let rental = create_test_rental(&db, &alice, &catalog.red_dress, &catalog.small).await;

    let result = rental_db::update_own_rental(&db, rental.id, bob.id, UpdateOwnRental::default())
        .await
        .unwrap();
    assert!(result.is_none());

    let unchanged = rental_db::get_rental_by_id(&db, rental.id).await.unwrap().unwrap();
    assert_eq!(unchanged, rental);
}

#[actix_web::test]
async fn test_malformed_rental_form_gets_json_error() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;
    let alice = create_test_user(&db, "alice").await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::post()
        .uri("/mydresses/new")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(resp).await.contains("dress_id"));

    let req = test::TestRequest::get()
        .uri("/rent/update/not-a-number")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!error_message(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri("/mydresses/new?dress_id=abc")
        .insert_header((header::AUTHORIZATION, bearer(&alice)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(resp).await.is_empty());
}
