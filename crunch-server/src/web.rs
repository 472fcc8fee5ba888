//! HTTP API
//!
//! | Endpoint | Description |
//! |----------|-------------|
//! | `POST /api/v1/compare` | Comparison report as JSON |
//! | `POST /api/v1/track-map` | Track map as SVG |
//! | `POST /api/v1/corner-analysis` | Corner analysis chart as SVG |
//! | `GET /api/v1/version` | Server version |
//!
//! Requests carry both laps in the body. Input the engine rejects, and bodies
//! that do not deserialize, are answered with `422 Unprocessable Entity` and
//! `{ "error": ..., "kind": ... }`.

use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use crunch_core::{Comparison, DistanceWindow, DriverTelemetry, InvalidInputError, OverlayMode};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_graceful_shutdown::SubsystemHandle;

use crate::config::{resize_canvas, ConfigError, RenderSettings};
use crate::svg::{corner_analysis_svg, track_map_svg, RenderError};
use crate::VERSION;

const COMPARE_URI: &str = "/api/v1/compare";
const TRACK_MAP_URI: &str = "/api/v1/track-map";
const CORNER_ANALYSIS_URI: &str = "/api/v1/corner-analysis";
const VERSION_URI: &str = "/api/v1/version";

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Socket operation failed")]
    Io(#[from] io::Error),
}

/// Errors answered to the client
#[derive(Error, Debug)]
enum ApiError {
    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Invalid(e) => e.kind(),
            ApiError::Config(_) => "invalid-canvas",
            ApiError::Render(RenderError::Color(_)) => "invalid-color",
            ApiError::Render(_) => "render-failed",
            ApiError::Body(_) => "malformed-body",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Render(RenderError::Color(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("Rejecting request: {}", self);
        (
            self.status(),
            Json(json!({ "error": self.to_string(), "kind": self.kind() })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareRequest {
    drivers: [DriverTelemetry; 2],
    #[serde(default)]
    window: Option<DistanceWindow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackMapRequest {
    drivers: [DriverTelemetry; 2],
    #[serde(default)]
    overlay: Option<OverlayMode>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CornerAnalysisRequest {
    drivers: [DriverTelemetry; 2],
    window: DistanceWindow,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Clone)]
pub struct Web {
    settings: Arc<RenderSettings>,
}

impl Web {
    pub fn new(settings: RenderSettings) -> Self {
        Web {
            settings: Arc::new(settings),
        }
    }

    pub fn router(self) -> Router {
        Router::new()
            .route(COMPARE_URI, post(compare))
            .route(TRACK_MAP_URI, post(track_map))
            .route(CORNER_ANALYSIS_URI, post(corner_analysis))
            .route(VERSION_URI, get(version))
            .layer(middleware::from_fn(no_cache_middleware))
            .with_state(self)
    }

    pub async fn run(self, port: u16, subsys: SubsystemHandle) -> Result<(), WebError> {
        let listener =
            TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), port))
                .await
                .map_err(WebError::Io)?;

        let app = self.router();

        info!("Starting HTTP web server on port {}", port);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                subsys.on_shutdown_requested().await;
                info!("HTTP web server shutting down");
            })
            .await
            .map_err(WebError::Io)
    }
}

/// Middleware to add no-cache headers and log each request
async fn no_cache_middleware(request: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let mut response = next.run(request).await;
    debug!("{} {} -> {}", method, uri, response.status());
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    response
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}

async fn compare(payload: Result<Json<CompareRequest>, JsonRejection>) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let [reference, other] = &request.drivers;
    let comparison = Comparison::new(reference, other)?;
    let report = comparison.report(request.window)?;
    Ok(Json(report).into_response())
}

async fn track_map(
    State(web): State<Web>,
    payload: Result<Json<TrackMapRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let canvas = resize_canvas(&web.settings.track_map, request.width, request.height)?;
    let [reference, other] = &request.drivers;
    let comparison = Comparison::new(reference, other)?;
    let layout = comparison.track_map(&canvas, request.overlay.unwrap_or(web.settings.overlay));
    Ok(svg_response(track_map_svg(&layout, &web.settings)?))
}

async fn corner_analysis(
    State(web): State<Web>,
    payload: Result<Json<CornerAnalysisRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    request.window.validate()?;
    let canvas = resize_canvas(&web.settings.corner_analysis, request.width, request.height)?;
    let [reference, other] = &request.drivers;
    let comparison = Comparison::new(reference, other)?;
    let layout = comparison.corner_analysis(&canvas, &request.window);
    Ok(svg_response(corner_analysis_svg(&layout, &web.settings)?))
}

async fn version() -> impl IntoResponse {
    Json(json!({ "version": VERSION }))
}
