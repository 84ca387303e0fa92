mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use config::environment::EnvironmentConfig;
use config::reminders::ReminderConfig;
use database::connection::{create_pool, run_migrations};
use middleware::auth::auth_middleware;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fleet_maintenance=debug,info")),
        )
        .init();

    info!("🚚 Fleet Maintenance API");
    info!("========================");

    let config = EnvironmentConfig::from_env();
    let reminders = ReminderConfig::from_env();

    // Inicializar base de datos
    let pool = create_pool(None).await?;
    run_migrations(&pool).await?;
    info!("✅ Base de datos conectada");

    let state = AppState::new(pool, config.clone(), reminders);

    // Rutas protegidas: requieren Authorization: Bearer <jwt>
    let protected_routes = Router::new()
        .nest(
            "/api/account",
            routes::account_routes::create_account_protected_router(),
        )
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/tire", routes::tire_routes::create_tire_router())
        .nest(
            "/api/service-record",
            routes::service_record_routes::create_service_record_router(),
        )
        .nest(
            "/api/fuel-record",
            routes::fuel_record_routes::create_fuel_record_router(),
        )
        .nest("/api/task", routes::task_routes::create_task_router())
        .nest(
            "/api/notification",
            routes::notification_routes::create_notification_router(),
        )
        .nest("/api/report", routes::report_routes::create_report_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/account",
            routes::account_routes::create_account_public_router(),
        )
        .merge(protected_routes)
        .layer(cors_middleware())
        .with_state(state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Cuenta:");
    info!("   POST /api/account/register - Registrar cuenta");
    info!("   POST /api/account/login - Login");
    info!("   GET  /api/account/me - Cuenta actual");
    info!("🚚 Vehículos:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   PUT  /api/vehicle/:id/mileage - Actualizar kilometraje");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("🛞 Neumáticos:");
    info!("   GET  /api/tire/vehicle/:vehicle_id - Neumáticos del vehículo");
    info!("   PUT  /api/tire/:id - Actualizar neumático");
    info!("🔧 Servicios:");
    info!("   POST /api/service-record - Registrar servicio");
    info!("   GET  /api/service-record - Listar servicios");
    info!("   GET|PUT|DELETE /api/service-record/:id");
    info!("⛽ Combustible:");
    info!("   POST /api/fuel-record - Registrar carga");
    info!("   GET  /api/fuel-record - Listar cargas");
    info!("   GET|PUT|DELETE /api/fuel-record/:id");
    info!("📌 Tareas:");
    info!("   GET  /api/task - Listar tareas");
    info!("   POST /api/task - Crear tarea manual");
    info!("   PUT  /api/task/:id/complete - Completar tarea");
    info!("🔔 Notificaciones:");
    info!("   GET  /api/notification/upcoming - Próximos vencimientos");
    info!("   POST /api/notification/sync - Resincronizar cuenta");
    info!("📊 Reportes:");
    info!("   GET  /api/report/fuel - Reporte de combustible");
    info!("   GET  /api/report/dashboard - Resumen de flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-maintenance-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
