use actix_web::{http::StatusCode, test, web, App};

use sheet_quiz_server::{app_state::AppState, config::Config, handlers};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Config::test_config()).expect("state builds offline"))
}

#[actix_web::test]
async fn test_health_route_is_registered() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_create_test_without_session_is_unauthorized() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let req = test::TestRequest::post()
        .uri("/create_test")
        .set_json(serde_json::json!({
            "sheet_url": "https://docs.google.com/spreadsheets/d/abc/edit"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "UNAUTHORIZED");
    assert_eq!(body["code"], 401);
}

#[actix_web::test]
async fn test_blank_link_is_a_bad_request() {
    let state = state();
    let token = state
        .jwt_service
        .create_session("u@x.com", None, "ya29.token")
        .unwrap();
    let app = test::init_service(App::new().app_data(state).configure(handlers::configure)).await;

    let req = test::TestRequest::post()
        .uri("/create_test")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_form([("sheet_url", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_logout_redirects_home() {
    let app = test::init_service(App::new().app_data(state()).configure(handlers::configure)).await;

    let req = test::TestRequest::get().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("location").unwrap(), "/");
}
