use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{test, App};
use campaign_server::{CampaignBody, CreateCampaignBody, Envelope, UpdateCampaignBody};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;

async fn seeded_database() -> campaign_server::SqliteDatabase {
    // every connection to `sqlite::memory:` opens its own empty database, so the
    // pool must hold exactly one connection and never close it
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    campaign_server::initialize(pool).await.unwrap()
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new().configure(campaign_server::configure(Box::new(seeded_database().await))),
        )
        .await
    };
}

#[actix_web::test]
async fn root_says_hello() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, serde_json::json!({ "message": "Hello World" }));
}

#[actix_web::test]
async fn fresh_store_lists_seeded_campaigns() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/campaigns").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Envelope<Vec<CampaignBody>> = test::read_body_json(resp).await;
    let names: Vec<_> = body.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Summer Launch", "Black Friday"]);
    assert!(body.data.iter().all(|c| c.due_date.is_some()));
}

#[actix_web::test]
async fn create_campaign_then_get_it() {
    let app = init_app!();
    let due_date: DateTime<Utc> = "2025-03-01T00:00:00Z".parse().unwrap();

    let before = Utc::now();
    let req = test::TestRequest::post()
        .uri("/api/v1/campaigns")
        .insert_header(ContentType::json())
        .set_payload(r#"{"name":"Spring Sale","due_date":"2025-03-01T00:00:00Z"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let after = Utc::now();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Envelope<CampaignBody> = test::read_body_json(resp).await;
    let created = created.data;
    assert!(i64::from(created.campaign_id) > 0);
    assert_eq!(created.name, "Spring Sale");
    assert_eq!(created.due_date, Some(due_date));
    assert!(before <= created.created_at && created.created_at <= after);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/campaigns/{}", created.campaign_id))
        .to_request();
    let fetched: Envelope<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.data.campaign_id, created.campaign_id);
    assert_eq!(fetched.data.name, created.name);
    assert_eq!(fetched.data.due_date, created.due_date);
    assert_eq!(fetched.data.created_at, created.created_at);
}

#[actix_web::test]
async fn successive_creates_get_distinct_ids() {
    let app = init_app!();
    let body = CreateCampaignBody {
        name: "Spring Sale".into(),
        due_date: None,
    };

    let mut ids = vec![];
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .set_json(&body)
            .to_request();
        let created: Envelope<CampaignBody> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.data.due_date, None);
        ids.push(created.data.campaign_id);
    }

    assert_ne!(ids[0], ids[1]);
}

#[actix_web::test]
async fn get_unknown_campaign_is_not_found_with_empty_body() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/campaigns/9999")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn update_replaces_name_and_clears_due_date() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/campaigns/1").to_request();
    let original: Envelope<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert!(original.data.due_date.is_some());

    let req = test::TestRequest::put()
        .uri("/api/v1/campaigns/1")
        .insert_header(ContentType::json())
        .set_payload(r#"{"name":"Renamed"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Envelope<CampaignBody> = test::read_body_json(resp).await;
    assert_eq!(updated.data.campaign_id, original.data.campaign_id);
    assert_eq!(updated.data.created_at, original.data.created_at);
    assert_eq!(updated.data.name, "Renamed");
    assert_eq!(updated.data.due_date, None);

    let req = test::TestRequest::get().uri("/api/v1/campaigns/1").to_request();
    let fetched: Envelope<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.data.name, "Renamed");
    assert_eq!(fetched.data.due_date, None);
}

#[actix_web::test]
async fn update_unknown_campaign_is_not_found() {
    let app = init_app!();
    let body = UpdateCampaignBody {
        name: "Renamed".into(),
        due_date: None,
    };

    let req = test::TestRequest::put()
        .uri("/api/v1/campaigns/9999")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let app = init_app!();

    let req = test::TestRequest::delete()
        .uri("/api/v1/campaigns/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get().uri("/api/v1/campaigns/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri("/api/v1/campaigns/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn deleting_every_campaign_does_not_reseed_or_reuse_ids() {
    let app = init_app!();

    for id in 1..=2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/campaigns/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get().uri("/api/v1/campaigns").to_request();
    let listed: Envelope<Vec<CampaignBody>> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.data.is_empty());

    let req = test::TestRequest::post()
        .uri("/api/v1/campaigns")
        .insert_header(ContentType::json())
        .set_payload(r#"{"name":"Spring Sale"}"#)
        .to_request();
    let created: Envelope<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(i64::from(created.data.campaign_id), 3);
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = init_app!();

    for payload in [
        r#"{"due_date":"2025-03-01T00:00:00Z"}"#,
        r#"{"name":"Spring Sale","due_date":"next tuesday"}"#,
        r#"not json"#,
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .insert_header(ContentType::json())
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error_code"], "E4001000");
    }
}

#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/campaigns/spring")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001001");
}

#[actix_web::test]
async fn unknown_path_is_not_found_with_error_body() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/planets").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4041000");
}

#[actix_web::test]
async fn due_date_accepts_space_separated_and_unix_seconds() {
    let app = init_app!();
    let expected: DateTime<Utc> = "2025-03-01T00:00:00Z".parse().unwrap();

    for payload in [
        r#"{"name":"Spring Sale","due_date":"2025-03-01 00:00:00"}"#,
        r#"{"name":"Spring Sale","due_date":1740787200}"#,
        r#"{"name":"Spring Sale","due_date":"2025-03-01T02:00:00+02:00"}"#,
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/campaigns")
            .insert_header(ContentType::json())
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "payload: {}", payload);

        let created: Envelope<CampaignBody> = test::read_body_json(resp).await;
        assert_eq!(created.data.due_date, Some(expected), "payload: {}", payload);
    }
}

#[actix_web::test]
async fn invalid_due_date_error_names_the_input() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/campaigns/1")
        .insert_header(ContentType::json())
        .set_payload(r#"{"name":"Spring Sale","due_date":"next tuesday"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001000");
    let meta = body["error_meta"].as_str().unwrap();
    assert!(meta.contains("invalid timestamp `next tuesday`"), "meta: {}", meta);
}

#[actix_web::test]
async fn path_outside_api_root_is_not_found_with_error_body() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/campaigns").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4041000");
}
