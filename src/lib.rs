//! Sales Tracking API Library
//!
//! REST backend for sellers, sales, sale transactions and their audit log.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod criteria;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod mappers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod pagination;
pub mod queries;
pub mod services;
pub mod tracing;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Entity resources, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sellers", handlers::sellers::seller_routes())
        .nest("/sales", handlers::sales::sale_routes())
        .nest(
            "/sale-transactions",
            handlers::sale_transactions::sale_transaction_routes(),
        )
        .nest(
            "/transaction-logs",
            handlers::transaction_logs::transaction_log_routes(),
        )
}

/// Full application router without the deployment-specific outer layers
/// (CORS, compression, timeouts) that `main` adds.
pub fn app_router(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/api", api_routes())
        .nest("/health", handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
