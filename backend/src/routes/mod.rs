//! Route definitions for AgroRegistro

use axum::{
    routing::get,
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Banana wrapping lots
        .nest("/wrappings", wrapping_routes())
        // Banana sales (linked to wrapping lots)
        .nest("/banana-sales", banana_sale_routes())
        // Cacao sales
        .nest("/cacao-sales", cacao_sale_routes())
        // Fertilizer applications
        .nest("/fertilizers", fertilizer_routes())
        // Reports and dashboard
        .nest("/reports", reporting_routes())
}

/// Banana wrapping routes
fn wrapping_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_wrappings).post(handlers::create_wrapping),
        )
        .route("/available", get(handlers::list_available_wrappings))
        .route("/tape-colors", get(handlers::list_tape_colors))
        .route(
            "/:wrapping_id",
            get(handlers::get_wrapping)
                .put(handlers::update_wrapping)
                .delete(handlers::delete_wrapping),
        )
}

/// Banana sale routes
fn banana_sale_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_banana_sales).post(handlers::create_banana_sale),
        )
        .route(
            "/:sale_id",
            get(handlers::get_banana_sale)
                .put(handlers::update_banana_sale)
                .delete(handlers::delete_banana_sale),
        )
}

/// Cacao sale routes
fn cacao_sale_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_cacao_sales).post(handlers::create_cacao_sale),
        )
        .route(
            "/:sale_id",
            get(handlers::get_cacao_sale)
                .put(handlers::update_cacao_sale)
                .delete(handlers::delete_cacao_sale),
        )
}

/// Fertilizer application routes
fn fertilizer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fertilizers).post(handlers::create_fertilizer),
        )
        .route(
            "/:application_id",
            get(handlers::get_fertilizer)
                .put(handlers::update_fertilizer)
                .delete(handlers::delete_fertilizer),
        )
}

/// Reporting routes
fn reporting_routes() -> Router<AppState> {
    Router::new()
        .route("/monthly", get(handlers::get_monthly_report))
        .route("/dashboard", get(handlers::get_dashboard))
}
