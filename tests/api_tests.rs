//! Rule-base and system endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use agroexpert::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<agroexpert::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("agroexpert-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = Some(format!("sqlite:{}?mode=rwc", db_path.display()));
    config.observability.metrics_enabled = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = agroexpert::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = agroexpert::api::router(state.clone());
    (state, router)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn create_factor(app: &Router, nombre: &str, categoria: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/factores/",
            &json!({ "nombre": nombre, "categoria": categoria }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_hecho(app: &Router, descripcion: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json("/hechos/", &json!({ "descripcion": descripcion })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_regla(app: &Router, factor_id: i64, hecho_id: i64, valor: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/reglas/",
            &json!({
                "factor_id": factor_id,
                "hecho_id": hecho_id,
                "operador": "=",
                "valor": valor,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_create_factor_echoes_row() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/factores/",
            &json!({ "nombre": "pH del suelo", "categoria": "suelo" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["nombre"], "pH del suelo");
    assert_eq!(body["categoria"], "suelo");
}

#[tokio::test]
async fn test_create_factor_without_trailing_slash() {
    let (_state, app) = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/factores",
            &json!({ "nombre": "Altitud", "categoria": "clima" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_factor_validation() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/factores/", &json!({ "nombre": "Altitud" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let response = app
        .clone()
        .oneshot(post_json(
            "/factores/",
            &json!({ "nombre": "   ", "categoria": "clima" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/factores/")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_hecho_echoes_row() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/hechos/",
            &json!({ "descripcion": "Riesgo de helada" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["descripcion"], "Riesgo de helada");

    let response = app
        .oneshot(post_json("/hechos/", &json!({ "descripcion": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_regla_links_factor_and_hecho() {
    let (_state, app) = spawn_app().await;

    let factor_id = create_factor(&app, "Temperatura", "clima").await;
    let hecho_id = create_hecho(&app, "Riesgo de helada").await;

    let body = create_regla(&app, factor_id, hecho_id, "baja").await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["factor_id"].as_i64(), Some(factor_id));
    assert_eq!(body["hecho_id"].as_i64(), Some(hecho_id));
    assert_eq!(body["operador"], "=");
    assert_eq!(body["valor"], "baja");
}

#[tokio::test]
async fn test_create_regla_with_missing_reference_is_validation_error() {
    let (_state, app) = spawn_app().await;

    let hecho_id = create_hecho(&app, "Riesgo de helada").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/reglas/",
            &json!({
                "factor_id": 9999,
                "hecho_id": hecho_id,
                "operador": "=",
                "valor": "baja",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    // Nothing was left behind by the failed insert.
    let response = app.oneshot(get("/factors-values")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_factors_values_grouping_and_order() {
    let (_state, app) = spawn_app().await;

    // Inserted out of name order on purpose.
    let humedad = create_factor(&app, "Humedad", "clima").await;
    let altitud = create_factor(&app, "Altitud", "terreno").await;
    let hecho_id = create_hecho(&app, "Cultivo apto").await;

    let first = create_regla(&app, altitud, hecho_id, "alta").await;
    let second = create_regla(&app, altitud, hecho_id, "media").await;

    let response = app.oneshot(get("/factors-values")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["factor_id"].as_i64(), Some(altitud));
    assert_eq!(entries[0]["nombre"], "Altitud");
    assert_eq!(entries[0]["categoria"], "terreno");
    assert_eq!(
        entries[0]["valores"],
        json!([
            { "factor_hecho_id": first["id"], "valor": "alta" },
            { "factor_hecho_id": second["id"], "valor": "media" },
        ])
    );

    assert_eq!(entries[1]["factor_id"].as_i64(), Some(humedad));
    assert_eq!(entries[1]["valores"], json!([]));
}

#[tokio::test]
async fn test_health_reports_database_up() {
    let (_state, app) = spawn_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true, "db": "up" }));
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let (state, app) = spawn_app().await;

    state.store().conn.clone().close().await.unwrap();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_metrics_disabled_note() {
    let (_state, app) = spawn_app().await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Metrics not enabled");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (_state, app) = spawn_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}
