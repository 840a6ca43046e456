// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use clap::Parser;
use serde::{Deserialize, Serialize};
use stayline_api::{
    ApiError, CheckInTimesRequest, CheckInTimesResponse, ResolveRequest, ValidateRequest,
    ValidateResponse, WindowInfo, check_in_times, resolve_stay, validate_stay,
};
use stayline_domain::Tz;
use stayline_domain::calendar_date::parse_timezone;
use tracing::{info, warn};

/// Stayline Server - stay-window decision service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone used when a request names none
    #[arg(short, long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Reference timezone for requests that do not carry one.
    default_timezone: Tz,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` while the server is up.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        warn!(%status, error = %err, "Request refused");
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Malformed request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/check_in_times` endpoint.
///
/// Lists the legal check-in slots for a date against the supplied calendar.
async fn handle_check_in_times(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CheckInTimesRequest>, JsonRejection>,
) -> Result<Json<CheckInTimesResponse>, HttpError> {
    let Json(request) = payload?;
    info!(date = %request.date, records = request.records.len(), "Handling check_in_times request");

    let response: CheckInTimesResponse =
        check_in_times(&request, app_state.default_timezone, Utc::now())?;

    Ok(Json(response))
}

/// Handler for POST `/resolve` endpoint.
///
/// Resolves the check-in and check-out instants of a stay.
async fn handle_resolve(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Json<WindowInfo>, HttpError> {
    let Json(request) = payload?;
    info!(
        check_in = %request.check_in_date,
        check_out = %request.check_out_date,
        "Handling resolve request"
    );

    let response: WindowInfo = resolve_stay(&request, app_state.default_timezone)?;

    Ok(Json(response))
}

/// Handler for POST `/validate` endpoint.
///
/// Booking rule rejections are successful responses with `valid: false`.
async fn handle_validate(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, HttpError> {
    let Json(request) = payload?;
    info!(records = request.records.len(), "Handling validate request");

    let response: ValidateResponse =
        validate_stay(&request, app_state.default_timezone, Utc::now())?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/check_in_times", post(handle_check_in_times))
        .route("/resolve", post(handle_resolve))
        .route("/validate", post(handle_validate))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Stayline Server");

    let default_timezone: Tz = parse_timezone(&args.timezone)?;
    info!(timezone = %default_timezone, "Using default listing timezone");

    let app_state: AppState = AppState { default_timezone };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
