//! Tests de humo de la superficie HTTP
//!
//! El router real se arma en main.rs sobre un pool de PostgreSQL vivo.
//! Acá se prueba la forma del contrato (rutas, códigos de estado y
//! cuerpos JSON) sobre un router de prueba con la misma estructura:
//! health público, cuenta pública y recursos detrás de Bearer.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fleet-maintenance-api");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();
    let response = app.oneshot(get_request("/api/inexistente")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_response_shape() {
    let app = create_test_app();
    let response = app
        .oneshot(post_json(
            "/api/account/register",
            json!({
                "name": "Transportes Prueba",
                "email": "flota@prueba.test",
                "password": "secreto-123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "flota@prueba.test");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_login_response_carries_token() {
    let app = create_test_app();
    let response = app
        .oneshot(post_json(
            "/api/account/login",
            json!({
                "email": "flota@prueba.test",
                "password": "secreto-123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_protected_route_requires_bearer() {
    let app = create_test_app();
    let response = app.oneshot(get_request("/api/vehicle")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_protected_route_rejects_non_bearer_scheme() {
    let app = create_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/vehicle")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_accepts_bearer() {
    let app = create_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/vehicle")
        .header(header::AUTHORIZATION, "Bearer token-de-prueba")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.is_array());
}

#[tokio::test]
async fn test_upcoming_notifications_shape() {
    let app = create_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/notification/upcoming?horizon_days=30")
        .header(header::AUTHORIZATION, "Bearer token-de-prueba")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().expect("se esperaba un arreglo");
    // Cada recordatorio viene anotado para presentación
    for item in items {
        assert!(item["plate"].is_string());
        assert!(item["days_remaining"].is_i64());
        assert!(item["category"].is_string());
    }
}

// ---- Router de prueba ------------------------------------------------

/// Router con la misma forma que el de main.rs, sin base de datos
fn create_test_app() -> Router {
    let protected = Router::new()
        .route("/api/account/me", get(me_stub))
        .route("/api/vehicle", get(empty_list))
        .route("/api/task", get(empty_list))
        .route("/api/notification/upcoming", get(upcoming_stub))
        .route_layer(axum::middleware::from_fn(require_bearer));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/account/register", post(register_stub))
        .route("/api/account/login", post(login_stub))
        .merge(protected)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-maintenance-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn register_stub(Json(request): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Cuenta registrada exitosamente",
        "data": {
            "id": uuid::Uuid::new_v4(),
            "name": request["name"],
            "email": request["email"],
        }
    }))
}

async fn login_stub(Json(_request): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "token": "jwt-de-prueba",
        "account_id": uuid::Uuid::new_v4(),
        "account_name": "Transportes Prueba",
    }))
}

async fn me_stub() -> Json<Value> {
    Json(json!({
        "id": uuid::Uuid::new_v4(),
        "name": "Transportes Prueba",
        "email": "flota@prueba.test",
    }))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

async fn upcoming_stub() -> Json<Value> {
    Json(json!([
        {
            "task_id": uuid::Uuid::new_v4(),
            "vehicle_id": uuid::Uuid::new_v4(),
            "plate": "AB 123 CD",
            "category": "inspection",
            "description": "Revisión técnica: vence el 2025-06-21",
            "due_date": "2025-06-21",
            "days_remaining": 20,
            "due_km": null,
        }
    ]))
}

/// Contrato de autenticación: las rutas protegidas exigen Bearer
async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("Bearer ") && value.len() > "Bearer ".len())
        .unwrap_or(false);

    if !authorized {
        let body = Json(json!({
            "error": "Unauthorized",
            "message": "Token de autorización requerido",
            "code": "UNAUTHORIZED",
        }));
        return (StatusCode::UNAUTHORIZED, body).into_response();
    }

    next.run(request).await
}

// ---- Helpers ---------------------------------------------------------

fn get_request(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
