use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, Registry, TextEncoder};

use crate::actors::{SystemHealth, SystemHealthCell};

/// Start the metrics HTTP server
/// This should be called in a separate thread/runtime to avoid conflicts
pub async fn start_metrics_server(
    registry: Arc<Registry>,
    health: Arc<SystemHealthCell>,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!(
        "📊 Starting metrics server on http://0.0.0.0:{}/metrics",
        port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(health.clone()))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn metrics_handler(registry: web::Data<Arc<Registry>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler(health: web::Data<Arc<SystemHealthCell>>) -> impl Responder {
    let snapshot: SystemHealth = health.snapshot();

    // 503 lets load balancers see persistent fetch failure; a merely
    // degraded dashboard still serves its (stale) list
    if snapshot.overall_status.is_unhealthy() {
        HttpResponse::ServiceUnavailable().json(snapshot)
    } else {
        HttpResponse::Ok().json(snapshot)
    }
}
