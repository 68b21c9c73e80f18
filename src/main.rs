use axum::{
    body::Bytes,
    extract::{
        rejection::BytesRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
        DefaultBodyLimit, Json, Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{
    env,
    fs::OpenOptions,
    io::Write,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    path::{Path as FsPath, PathBuf},
    sync::{Arc, Mutex},
};
use subtle::ConstantTimeEq;
use tokio::signal;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

use shieldy::commands::{invoke_command, AppContext};
use shieldy::models::Settings;
use shieldy::services::{
    prune_logs, EventSink, FileStore, KeyValueStore, SettingsManager, MAX_LOGO_BYTES, THEME_KEY,
};

// ============================================================================
// Constants
// ============================================================================

const LOG_FILE_NAME: &str = "shieldy-server.log";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 600;
const EVENT_CHANNEL_CAPACITY: usize = 256;
/// Room for a base64 logo at the upload limit plus the JSON envelope
const INVOKE_BODY_LIMIT: usize = MAX_LOGO_BYTES.div_ceil(3) * 4 + 64 * 1024;

// ============================================================================
// Event System
// ============================================================================

#[derive(Clone, Serialize)]
struct ServerEvent {
    event: String,
    payload: Value,
}

#[derive(Clone)]
struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &str, payload: Value) {
        // No subscribers is not an error
        let _ = self.sender.send(ServerEvent {
            event: event.to_string(),
            payload,
        });
    }
}

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
struct AppState {
    ctx: Arc<AppContext>,
    store: Arc<FileStore>,
    event_bus: EventBus,
    auth_token: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

#[derive(Serialize)]
struct InvokeResponse {
    ok: bool,
    data: Option<Value>,
    error: Option<String>,
}

impl InvokeResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

struct ServerLogger {
    file: Mutex<std::fs::File>,
    event_bus: EventBus,
    level: LevelFilter,
}

impl ServerLogger {
    fn new(log_dir: &FsPath, event_bus: EventBus, level: LevelFilter) -> Result<Self, Box<dyn std::error::Error>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join(LOG_FILE_NAME))?;
        Ok(Self {
            file: Mutex::new(file),
            event_bus,
            level,
        })
    }
}

impl Log for ServerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now();
        let date = timestamp.format("%Y-%m-%d");
        let time = timestamp.format("%H:%M:%S");
        let target = record.target();
        let level = record.level();
        let message = format!("{}", record.args());
        let line = format!("[{date}][{time}][{target}][{level}] {message}");

        if let Ok(mut file) = self.file.try_lock() {
            let _ = writeln!(file, "{line}");
        }

        let level_number = match level {
            Level::Error => 1,
            Level::Warn => 2,
            Level::Info => 3,
            Level::Debug => 4,
            Level::Trace => 5,
        };

        self.event_bus.emit(
            "log://log",
            json!({ "level": level_number, "message": message, "target": target }),
        );
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logger(log_dir: &FsPath, event_bus: EventBus, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let logger = ServerLogger::new(log_dir, event_bus, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// `SHIELDY_LOG` wins over the saved log level
fn resolve_log_level(settings: Option<&Settings>) -> LevelFilter {
    env::var("SHIELDY_LOG")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .or_else(|| settings.map(Settings::level_filter))
        .unwrap_or(LevelFilter::Info)
}

// ============================================================================
// Security Utilities
// ============================================================================

/// Constant-time token comparison to prevent timing attacks
fn verify_token(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Extract bearer token from Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Map internal failures onto client-safe messages.
///
/// Validation messages meant for the user (missing parameters, upload limits,
/// duplicate favorites) pass through unchanged.
fn sanitize_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.starts_with("missing required parameters")
        || lower.starts_with("file size must be")
        || lower.starts_with("please select an image")
        || lower.starts_with("generate a badge first")
        || lower.starts_with("badge already in favorites")
        || lower.starts_with("no favorites to clear")
        || lower.starts_with("clearing favorites requires")
        || lower.starts_with("unknown command")
        || lower.starts_with("missing argument")
    {
        return error.to_string();
    }

    if lower.contains("failed to read") || lower.contains("no such file") || lower.contains("not found") {
        return "Resource not found".to_string();
    }
    if lower.contains("parse") || lower.contains("invalid") {
        return "Invalid request format".to_string();
    }
    if lower.contains("permission") || lower.contains("access") || lower.contains("denied") {
        return "Access denied".to_string();
    }
    if lower.contains("traversal") || lower.contains("outside") {
        return "Invalid path".to_string();
    }

    log::debug!("Sanitized error: {error}");
    "Operation failed".to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_host(host: &str) -> IpAddr {
    host.parse().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// CORS Configuration
// ============================================================================

fn origin_allowed(allowed_origins: &[String], origin: &str) -> bool {
    allowed_origins.iter().any(|allowed| {
        if let Some(prefix) = allowed.strip_suffix(":*") {
            // Wildcard port matching
            origin.starts_with(prefix) && origin[prefix.len()..].starts_with(':')
        } else {
            origin == allowed
        }
    })
}

fn build_cors_layer() -> CorsLayer {
    let cors_origins = env::var("SHIELDY_CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:*,http://127.0.0.1:*".to_string());

    let allowed_origins: Vec<String> = cors_origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(&allowed_origins, origin))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// ============================================================================
// Middleware
// ============================================================================

/// Bearer token check for the invoke API
async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.auth_token.as_deref() else {
        return next.run(request).await;
    };

    if bearer_token(&headers).is_some_and(|token| verify_token(expected, token)) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(InvokeResponse::failure("Authentication required")),
    )
        .into_response()
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match state.rate_limiter.check() {
        Ok(_) => next.run(request).await,
        Err(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(InvokeResponse::failure("Rate limit exceeded. Please try again later.")),
        )
            .into_response(),
    }
}

// ============================================================================
// Request Handlers
// ============================================================================

async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Readiness check: settings load and the key-value store answers
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks = [
        ("settings", state.ctx.settings().is_ok()),
        ("storage", state.store.get(THEME_KEY).is_ok()),
    ];

    let failed: Vec<&str> = checks
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();

    if failed.is_empty() {
        Json(json!({ "ready": true })).into_response()
    } else {
        log::warn!("Readiness check failed: {failed:?}");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ready": false, "failed": failed })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct AuthQuery {
    token: Option<String>,
}

/// Browsers cannot set headers on websocket upgrades, so `?token=` is accepted too
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AuthQuery>,
) -> impl IntoResponse {
    let authenticated = match state.auth_token.as_deref() {
        None => true,
        Some(expected) => bearer_token(&headers)
            .or(query.token.as_deref())
            .is_some_and(|token| verify_token(expected, token)),
    };

    if !authenticated {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state.event_bus.subscribe()))
}

async fn handle_socket(mut socket: WebSocket, mut receiver: broadcast::Receiver<ServerEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                let Ok(payload) = serde_json::to_string(&event) else {
                    continue;
                };
                if socket.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                log::debug!("Websocket client lagged, dropped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Empty bodies are allowed for commands without arguments
fn parse_payload(body: Result<Bytes, BytesRejection>) -> Result<Value, (StatusCode, String)> {
    let body = body.map_err(|rejection| {
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            format!("Request body exceeds {INVOKE_BODY_LIMIT} bytes")
        } else {
            "Invalid request format".to_string()
        };
        (status, message)
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&body).map_err(|e| {
        log::debug!("Rejected invoke body: {e}");
        (StatusCode::BAD_REQUEST, "Invalid request format".to_string())
    })
}

async fn invoke(
    Path(command): Path<String>,
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let payload = match parse_payload(body) {
        Ok(payload) => payload,
        Err((status, error)) => {
            return (status, Json(InvokeResponse::failure(error))).into_response();
        }
    };

    match invoke_command(&state.ctx, &command, payload).await {
        Ok(data) => {
            let response = InvokeResponse {
                ok: true,
                data: Some(data),
                error: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            log::debug!("Command '{command}' failed: {error}");
            (
                StatusCode::BAD_REQUEST,
                Json(InvokeResponse::failure(sanitize_error(&error))),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received, server shutting down");
    log::logger().flush();
}

/// API and event routes with auth and rate limiting applied
fn api_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/invoke/:command", post(invoke))
        .layer(DefaultBodyLimit::max(INVOKE_BODY_LIMIT))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/ws", get(ws_handler));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .map(|dir| dir.join("shieldy"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let data_dir = env::var("SHIELDY_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_data_dir());
    let log_dir = env::var("SHIELDY_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("logs"));
    let ui_dir = env::var("SHIELDY_UI_DIR").unwrap_or_else(|_| "dist".to_string());
    let env_host = env::var("SHIELDY_HOST").ok();
    let env_port: Option<u16> = env::var("SHIELDY_PORT")
        .ok()
        .and_then(|value| value.parse().ok());
    let env_auth_token = env::var("SHIELDY_API_TOKEN")
        .ok()
        .and_then(|value| non_empty(&value));

    std::fs::create_dir_all(&data_dir)?;
    std::fs::create_dir_all(&log_dir)?;

    let settings = SettingsManager::new(data_dir.clone()).load().ok();

    let event_bus = EventBus::new();
    init_logger(&log_dir, event_bus.clone(), resolve_log_level(settings.as_ref()))?;
    log::info!("Data directory: {data_dir:?}");

    if let Some(settings) = settings.as_ref() {
        if let Err(e) = prune_logs(&log_dir, settings.log_retention_days) {
            log::warn!("Failed to prune logs: {e}");
        }
    }

    let ui_enabled = env::var("SHIELDY_UI_ENABLED")
        .ok()
        .and_then(|value| parse_bool(&value))
        .unwrap_or_else(|| settings.as_ref().is_some_and(|s| s.backend_ui_enabled));
    let auth_token = env_auth_token.or_else(|| settings.as_ref().and_then(|s| non_empty(&s.backend_token)));

    // Env vars take precedence, then settings, then defaults.
    // Without remote access the server stays on localhost unless SHIELDY_HOST is set.
    let (host, port) = {
        let defaults = Settings::default();
        let settings = settings.as_ref().unwrap_or(&defaults);
        let env_host_was_set = env_host.is_some();
        let configured_host = env_host.unwrap_or_else(|| settings.backend_host.clone());
        let port = env_port.unwrap_or(settings.backend_port);

        let host = if !settings.backend_remote_enabled && !env_host_was_set {
            "127.0.0.1".to_string()
        } else {
            configured_host
        };
        (host, port)
    };

    let store = Arc::new(FileStore::new(data_dir.clone()));
    let ctx = AppContext::new(
        data_dir.clone(),
        log_dir.clone(),
        store.clone(),
        Arc::new(event_bus.clone()),
    )?;

    let rate_limit = env::var("SHIELDY_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .or_else(|| settings.as_ref().map(|s| s.rate_limit_per_minute))
        .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(
        NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN),
    )));

    let state = AppState {
        ctx: Arc::new(ctx),
        store,
        event_bus,
        auth_token,
        rate_limiter,
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; \
         script-src 'self'; \
         style-src 'self' 'unsafe-inline'; \
         connect-src 'self' ws://localhost:* ws://127.0.0.1:* http://localhost:* http://127.0.0.1:*; \
         img-src 'self' data: https:",
    );

    let mut app = api_router(state.clone())
        .layer(build_cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    let ui_path = PathBuf::from(ui_dir);
    if ui_enabled && ui_path.exists() {
        log::info!("Serving UI from {ui_path:?}");
        app = app.fallback_service(
            ServeDir::new(&ui_path).fallback(ServeFile::new(ui_path.join("index.html"))),
        );
    }

    let address = SocketAddr::new(parse_host(&host), port);
    log::info!("Shieldy backend listening on http://{address}");
    if state.auth_token.is_some() {
        log::info!("  Authentication: enabled");
    } else {
        log::info!("  Authentication: disabled (no token configured)");
    }

    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    struct TestServer {
        _dir: tempfile::TempDir,
        base: String,
        client: reqwest::Client,
    }

    impl TestServer {
        async fn start() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(FileStore::new(dir.path().to_path_buf()));
            let event_bus = EventBus::new();
            let ctx = AppContext::new(
                dir.path().to_path_buf(),
                dir.path().join("logs"),
                store.clone(),
                Arc::new(event_bus.clone()),
            )
            .unwrap();
            let state = AppState {
                ctx: Arc::new(ctx),
                store,
                event_bus,
                auth_token: None,
                rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(NonZeroU32::MAX))),
            };

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, api_router(state)).await.unwrap();
            });

            Self {
                _dir: dir,
                base: format!("http://{address}"),
                client: reqwest::Client::builder().no_proxy().build().unwrap(),
            }
        }

        async fn invoke(&self, command: &str, body: reqwest::Body) -> (reqwest::StatusCode, Value) {
            let response = self
                .client
                .post(format!("{}/api/invoke/{command}", self.base))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            let status = response.status();
            (status, response.json().await.unwrap())
        }
    }

    fn upload_body(bytes: usize) -> reqwest::Body {
        json!({
            "fileName": "logo.png",
            "mimeType": "image/png",
            "data": STANDARD.encode(vec![0u8; bytes]),
        })
        .to_string()
        .into()
    }

    #[test]
    fn test_body_limit_fits_largest_logo() {
        let encoded = STANDARD.encode(vec![0u8; MAX_LOGO_BYTES]).len();
        assert!(encoded + 1024 < INVOKE_BODY_LIMIT);
    }

    #[tokio::test]
    async fn test_large_logo_upload_over_http() {
        let server = TestServer::start().await;

        let (status, body) = server.invoke("upload_logo", upload_body(1_887_437)).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["logo"]["size"], 1_887_437);

        let (status, body) = server.invoke("upload_logo", upload_body(MAX_LOGO_BYTES + 1)).await;
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("File size must be less than 2MB"));
    }

    #[tokio::test]
    async fn test_invoke_body_handling() {
        let server = TestServer::start().await;

        let (status, body) = server.invoke("get_theme", reqwest::Body::from("")).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(body["data"], "light");

        let (status, body) = server.invoke("switch_mode", reqwest::Body::from("{\"mode\":")).await;
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request format");
    }

    #[test]
    fn test_verify_token() {
        assert!(verify_token("secret", "secret"));
        assert!(!verify_token("secret", "secreT"));
        assert!(!verify_token("secret", ""));
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  abc "));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_sanitize_error() {
        assert_eq!(
            sanitize_error("Missing required parameters for github/stars: repo"),
            "Missing required parameters for github/stars: repo"
        );
        assert_eq!(sanitize_error("Favorite not found: 12"), "Resource not found");
        assert_eq!(sanitize_error("Invalid mode: unknown variant"), "Invalid request format");
        assert_eq!(sanitize_error("Session lock poisoned"), "Operation failed");
    }

    #[test]
    fn test_origin_allowed() {
        let allowed = vec!["http://localhost:*".to_string(), "https://app.example.com".to_string()];
        assert!(origin_allowed(&allowed, "http://localhost:5173"));
        assert!(origin_allowed(&allowed, "https://app.example.com"));
        assert!(!origin_allowed(&allowed, "http://localhost.evil.com"));
        assert!(!origin_allowed(&allowed, "https://app.example.com:8443"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" Yes "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
