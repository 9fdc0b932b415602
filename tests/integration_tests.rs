use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use lingo_sync::lang::LanguageCode;
use lingo_sync::server::types::{
    ContentResponse, CurrentLanguageResponse, InvalidLanguageResponse, SetLanguageResponse,
};
use lingo_sync::server::{json_config, routes};

macro_rules! api_app {
    () => {
        test::init_service(
            App::new()
                .app_data(json_config())
                .configure(routes::register),
        )
        .await
    };
}

#[actix_web::test]
async fn current_language_defaults_to_italian_without_cookie() {
    let app = api_app!();

    let req = test::TestRequest::get()
        .uri("/api/current-language")
        .to_request();
    let body: CurrentLanguageResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.language, LanguageCode::It);
    assert_eq!(body.default_language, LanguageCode::It);
    assert_eq!(body.supported.len(), 6);
}

#[actix_web::test]
async fn set_then_get_round_trips_every_supported_code() {
    let app = api_app!();

    for lang in LanguageCode::ALL {
        let req = test::TestRequest::post()
            .uri("/api/language")
            .set_json(serde_json::json!({ "language": lang.as_str() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "lang")
            .expect("set-language response must carry the lang cookie");
        assert_eq!(cookie.value(), lang.as_str());

        let req = test::TestRequest::get()
            .uri("/api/current-language")
            .cookie(Cookie::new("lang", lang.as_str()))
            .to_request();
        let body: CurrentLanguageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.language, lang);
    }
}

#[actix_web::test]
async fn lang_cookie_attributes_match_the_contract() {
    let app = api_app!();

    let req = test::TestRequest::post()
        .uri("/api/language")
        .set_json(serde_json::json!({ "language": "de" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "lang")
        .unwrap();
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(false));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::days(365))
    );
}

#[actix_web::test]
async fn invalid_language_is_rejected_and_leaves_cookie_alone() {
    let app = api_app!();

    let req = test::TestRequest::post()
        .uri("/api/language")
        .cookie(Cookie::new("lang", "es"))
        .set_json(serde_json::json!({ "language": "klingon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    // No Set-Cookie means the previously stored preference is untouched.
    assert!(resp.response().cookies().next().is_none());

    let body: InvalidLanguageResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "Invalid language");
    assert_eq!(body.supported, LanguageCode::ALL.to_vec());
}

#[actix_web::test]
async fn malformed_json_body_yields_the_same_400_shape() {
    let app = api_app!();

    let req = test::TestRequest::post()
        .uri("/api/language")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: InvalidLanguageResponse = test::read_body_json(resp).await;
    assert_eq!(body.supported.len(), 6);
}

#[actix_web::test]
async fn content_without_cookie_serves_the_italian_record() {
    let app = api_app!();

    let req = test::TestRequest::get().uri("/api/content").to_request();
    let body: ContentResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.language, LanguageCode::It);
    let expected = lingo_sync::content::store().unwrap().get(LanguageCode::It);
    assert_eq!(&body.content, expected);
}

#[actix_web::test]
async fn content_matches_the_cookie_language_with_non_empty_fields() {
    let app = api_app!();

    for lang in LanguageCode::ALL {
        let req = test::TestRequest::get()
            .uri("/api/content")
            .cookie(Cookie::new("lang", lang.as_str()))
            .to_request();
        let body: ContentResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.language, lang);
        let expected = lingo_sync::content::store().unwrap().get(lang);
        assert_eq!(&body.content, expected);
        assert!(!body.content.title.is_empty());
        assert!(!body.content.subtitle.is_empty());
        assert!(!body.content.welcome_message.is_empty());
        assert!(!body.content.current_language.is_empty());
        assert!(!body.content.instructions.is_empty());
    }
}

#[actix_web::test]
async fn content_with_garbage_cookie_falls_back_to_default() {
    let app = api_app!();

    let req = test::TestRequest::get()
        .uri("/api/content")
        .cookie(Cookie::new("lang", "zz"))
        .to_request();
    let body: ContentResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.language, LanguageCode::It);
}

#[actix_web::test]
async fn setting_the_same_language_twice_is_idempotent() {
    let app = api_app!();

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/language")
            .set_json(serde_json::json!({ "language": "pt" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "lang")
            .unwrap();
        assert_eq!(cookie.value(), "pt");

        let body: SetLanguageResponse = test::read_body_json(resp).await;
        assert!(body.success);
        assert_eq!(body.language, LanguageCode::Pt);
        assert!(body.message.contains("pt"));
    }
}

#[actix_web::test]
async fn health_reports_service_and_version() {
    let app = api_app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
