use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

use crate::core::{Calculator, FormFields, LocaleCurrency, ProjectionInput, ProjectionReport};
use crate::error::{ProjectionError, check_horizon};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

/// A form value as sent by the page (text) or by a JSON client (number).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_capital: Option<FieldValue>,
    current_age: Option<FieldValue>,
    annual_interest: Option<FieldValue>,
    monthly_contribution: Option<FieldValue>,
}

impl From<ProjectPayload> for FormFields {
    fn from(payload: ProjectPayload) -> Self {
        FormFields {
            initial_capital: payload.initial_capital.map(FieldValue::into_text),
            current_age: payload.current_age.map(FieldValue::into_text),
            annual_interest: payload.annual_interest.map(FieldValue::into_text),
            monthly_contribution: payload.monthly_contribution.map(FieldValue::into_text),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(config: ServerConfig) -> Result<(), ProjectionError> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("nestegg HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{}/", config.port);

    axum::serve(listener, router()).await?;
    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => rejected(ProjectionError::InvalidPayload(rejection.body_text())),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => rejected(ProjectionError::InvalidPayload(rejection.body_text())),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let input = match input_from_payload(payload) {
        Ok(input) => input,
        Err(err) => return rejected(err),
    };

    let report = build_project_response(&input);
    debug!(
        "projected {input:?}: {} points, final balance {}",
        report.timeline.labels.len(),
        report.final_balance
    );
    json_response(StatusCode::OK, report)
}

fn rejected(err: ProjectionError) -> Response {
    warn!("rejected projection request: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn input_from_json(json: &str) -> Result<ProjectionInput, ProjectionError> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| ProjectionError::InvalidPayload(format!("Invalid API JSON payload: {e}")))?;
    input_from_payload(payload)
}

fn input_from_payload(payload: ProjectPayload) -> Result<ProjectionInput, ProjectionError> {
    let input = FormFields::from(payload).normalize();
    check_horizon(&input)?;
    Ok(input)
}

fn build_project_response(input: &ProjectionInput) -> ProjectionReport {
    Calculator::new(LocaleCurrency::es_euro()).run(input)
}
