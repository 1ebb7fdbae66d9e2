//! HTTP server mode for REST API access to the tables

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::filter::Qual;
use crate::plugin::{Plugin, QueryContext, QueryRequest, TableSchema};

/// Request body for the get endpoint
#[derive(Debug, Deserialize)]
struct GetRequest {
    /// Object id
    id: String,
    /// Columns to return (default all)
    #[serde(default)]
    columns: Option<Vec<String>>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// HTTP status for an error returned by the plugin
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::TableNotFound { .. } => StatusCode::NOT_FOUND,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        Error::Config { .. } | Error::MissingConfigField { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(error: &Error) -> Response {
    (status_for(error), Json(ApiResponse::<()>::error(error.to_string()))).into_response()
}

/// Build the router over a plugin
pub fn router(plugin: Arc<Plugin>) -> Router {
    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tables", get(list_tables))
        .route("/tables/:name", get(describe_table))
        .route("/tables/:name/list", post(list_rows))
        .route("/tables/:name/get", post(get_row))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(plugin)
}

/// Start the HTTP server
pub async fn serve(plugin: Plugin, port: u16) -> Result<()> {
    let app = router(Arc::new(plugin));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Schemas of every table
async fn list_tables(State(plugin): State<Arc<Plugin>>) -> impl IntoResponse {
    let tables: Vec<TableSchema> = plugin.tables().map(|t| t.schema()).collect();
    Json(ApiResponse::success(tables))
}

/// Schema of one table
async fn describe_table(
    State(plugin): State<Arc<Plugin>>,
    Path(name): Path<String>,
) -> Response {
    match plugin.table(&name) {
        Ok(def) => Json(ApiResponse::success(def.schema())).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Stream matching rows as newline-delimited JSON
///
/// The first error ends the body with an `{"error": ...}` line.
async fn list_rows(
    State(plugin): State<Arc<Plugin>>,
    Path(name): Path<String>,
    body: Option<Json<QueryRequest>>,
) -> Response {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let rows = plugin
        .table(&name)
        .and_then(|def| request.into_context(&def))
        .and_then(|ctx| plugin.list(&name, ctx));
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => return error_response(&e),
    };

    let lines = rows.map(|row| {
        let mut line = match row {
            Ok(row) => serde_json::to_vec(&row).unwrap_or_default(),
            Err(e) => serde_json::to_vec(&json!({ "error": e.to_string() })).unwrap_or_default(),
        };
        line.push(b'\n');
        Ok::<_, Infallible>(Bytes::from(line))
    });

    Response::builder()
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(Body::from_stream(lines))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Fetch one row by id
async fn get_row(
    State(plugin): State<Arc<Plugin>>,
    Path(name): Path<String>,
    Json(req): Json<GetRequest>,
) -> Response {
    let ctx = QueryContext {
        quals: vec![Qual::eq_str("id", req.id.clone())],
        limit: None,
        columns: req.columns,
    };
    match plugin.get(&name, ctx).await {
        Ok(Some(row)) => Json(ApiResponse::success(row)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(format!("{name} '{}' not found", req.id))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
