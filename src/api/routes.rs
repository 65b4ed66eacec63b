// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/levels", web::get().to(handlers::get_levels))
            .route("/ws", web::get().to(handlers::ws_handler))
            .service(
                web::scope("/essays")
                    .route("/grade", web::post().to(handlers::grade_essay))
                    .route("/batch", web::post().to(handlers::grade_batch))
                    .route("/export", web::post().to(handlers::export_results)),
            ),
    );
}
