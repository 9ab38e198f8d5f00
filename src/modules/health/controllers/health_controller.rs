use actix_web::{web, HttpResponse};

/// GET /health
///
/// Liveness probe; no dependency checks.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "salespulse"
    }))
}

/// Configure routes for the health module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
