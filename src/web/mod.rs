//! HTTP front-end for the grocery list
//!
//! Exposes list/add/remove over a local port. Every request re-runs the
//! same whole-file `load()`/`save()` pair the CLI commands use, so
//! concurrent requests against one file race exactly like concurrent CLI
//! invocations. Known limitation, kept as-is.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::domain::GroceryItem;
use crate::storage::GroceryStore;

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: Arc<dyn GroceryStore>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Body of `POST /groceries`
#[derive(Deserialize)]
struct NewItem {
    name: String,
    quantity: i64,
    #[serde(default)]
    category: Option<String>,
}

/// Payload of `GET /runtime`
#[derive(Serialize)]
struct RuntimeInfo {
    date: String,
    version: String,
    os: String,
}

/// Starts the HTTP server and blocks until it exits
pub fn serve(store: Box<dyn GroceryStore>, port: u16) -> Result<()> {
    let state = AppState {
        store: Arc::from(store),
    };

    let app = Router::new()
        .route("/groceries", get(list_items).post(add_item))
        .route("/groceries/:name", delete(remove_item))
        .route("/runtime", get(runtime_info))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("Failed to bind port {}", port))?;

        println!("Grocery server started at http://127.0.0.1:{}", port);

        axum::serve(listener, app).await.context("Server error")
    })
}

async fn list_items(State(state): State<AppState>) -> Response {
    match state.store.load() {
        Ok(items) => Json(ApiResponse::ok(items)).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn add_item(State(state): State<AppState>, Json(new): Json<NewItem>) -> Response {
    let result = state.store.load().and_then(|mut items| {
        items.push(GroceryItem::new(
            new.name,
            new.quantity,
            new.category.unwrap_or_default(),
        ));
        state.store.save(&items)
    });

    match result {
        Ok(()) => (StatusCode::CREATED, Json(ApiResponse::ok(()))).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn remove_item(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let result = state.store.load().and_then(|mut items| {
        items.retain(|item| item.name() != name);
        state.store.save(&items)
    });

    match result {
        Ok(()) => Json(ApiResponse::ok(())).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn runtime_info() -> Json<ApiResponse<RuntimeInfo>> {
    Json(ApiResponse::ok(RuntimeInfo {
        date: Local::now().format("%Y-%m-%d").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        os: std::env::consts::OS.to_string(),
    }))
}

fn storage_error(e: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "success": false, "error": format!("{:#}", e) })),
    )
        .into_response()
}
