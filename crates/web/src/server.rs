//! Web server implementation

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use storycase_common::intake::criteria_lines;
use storycase_common::{
    generate_cases, render_pdf, CompletionClient, GeneratorConfig, OpenAiClient, TestDesign,
};

use crate::pages::{form_page, html, login_page};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "storycase_session";

/// Sampling temperature for form exports.
pub const WEB_TEMPERATURE: f32 = 0.2;

/// How long a session stays valid after login.
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Live sessions kept at once; the oldest is evicted past this.
pub const MAX_SESSIONS: usize = 1024;

/// File name offered for the download.
pub const PDF_FILE_NAME: &str = "testcases.pdf";

const WRONG_PASSWORD: &str = "Wrong password";
const EMPTY_FORM: &str = "Enter a user story or at least one acceptance criterion.";

#[derive(Clone, Debug)]
pub struct WebServerConfig {
    /// Shared password for the form. Without one nobody can log in.
    pub password: Option<String>,
    /// Completion API settings for export generation.
    pub generator: GeneratorConfig,
    /// Session lifetime
    pub session_ttl: Duration,
}

impl WebServerConfig {
    pub fn new(password: Option<String>, generator: GeneratorConfig) -> Self {
        Self {
            password,
            generator,
            session_ttl: SESSION_TTL,
        }
    }
}

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    cfg: WebServerConfig,
    /// Issued session tokens and when they were issued
    sessions: RwLock<HashMap<String, Instant>>,
    /// Absent when no API key is configured
    client: Option<Arc<dyn CompletionClient>>,
}

pub async fn serve(addr: SocketAddr, cfg: WebServerConfig) -> anyhow::Result<()> {
    let server = WebServer::new(cfg);
    server.serve(addr).await
}

impl WebServer {
    /// Create a new web server. The completion client is built from the
    /// generator config when it carries an API key.
    pub fn new(cfg: WebServerConfig) -> Self {
        let client = match OpenAiClient::new(cfg.generator.clone()) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn CompletionClient>),
            Err(e) => {
                debug!("generation disabled: {}", e);
                None
            }
        };
        Self::with_client(cfg, client)
    }

    /// Create a web server around an explicit completion client.
    pub fn with_client(cfg: WebServerConfig, client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            state: Arc::new(WebServerState {
                cfg,
                sessions: RwLock::new(HashMap::new()),
                client,
            }),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        let state = self.state.clone();
        let session_layer = middleware::from_fn(move |req, next| {
            let state = state.clone();
            async move { session_middleware(state, req, next).await }
        });

        // Protected routes (require a session)
        let protected_routes = Router::new()
            .route("/export", post(export_handler))
            .layer(session_layer)
            .with_state(self.state.clone());

        // Public routes
        Router::new()
            .route("/", get(index_handler))
            .route("/login", post(login_handler))
            .route("/logout", post(logout_handler))
            .route("/api/health", get(health_handler))
            .merge(protected_routes)
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("Web form listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

impl WebServerState {
    async fn has_session(&self, jar: &CookieJar) -> bool {
        match jar.get(SESSION_COOKIE) {
            Some(cookie) => self
                .sessions
                .read()
                .await
                .get(cookie.value())
                .is_some_and(|issued| issued.elapsed() < self.cfg.session_ttl),
            None => false,
        }
    }

    /// Record a new session, dropping expired ones and evicting the oldest
    /// when the table is full.
    async fn start_session(&self, token: String) {
        let mut sessions = self.sessions.write().await;
        let ttl = self.cfg.session_ttl;
        sessions.retain(|_, issued| issued.elapsed() < ttl);
        if sessions.len() >= MAX_SESSIONS {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, issued)| **issued)
                .map(|(token, _)| token.clone());
            if let Some(oldest) = oldest {
                debug!("session table full, evicting oldest session");
                sessions.remove(&oldest);
            }
        }
        sessions.insert(token, Instant::now());
    }

    fn password_matches(&self, provided: &str) -> bool {
        match &self.cfg.password {
            Some(expected) => !expected.is_empty() && provided == expected,
            None => false,
        }
    }
}

async fn session_middleware(
    state: Arc<WebServerState>,
    req: Request,
    next: middleware::Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    if state.has_session(&jar).await {
        return next.run(req).await;
    }
    debug!("no session for {}, redirecting to login", req.uri().path());
    Redirect::to("/").into_response()
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "storycase-web",
        "version": storycase_common::VERSION,
    }))
}

async fn index_handler(State(state): State<Arc<WebServerState>>, jar: CookieJar) -> Response {
    if state.has_session(&jar).await {
        html(StatusCode::OK, form_page("", "", None))
    } else {
        html(StatusCode::OK, login_page(None))
    }
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    password: String,
}

async fn login_handler(
    State(state): State<Arc<WebServerState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.password_matches(&form.password) {
        warn!("rejected login attempt");
        return html(StatusCode::UNAUTHORIZED, login_page(Some(WRONG_PASSWORD)));
    }

    let token = hex::encode(rand::random::<[u8; 16]>());
    state.start_session(token.clone()).await;
    info!("session started");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);
    (jar.add(cookie), Redirect::to("/")).into_response()
}

async fn logout_handler(State(state): State<Arc<WebServerState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.write().await.remove(cookie.value());
        info!("session ended");
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/")).into_response()
}

#[derive(Debug, Deserialize)]
struct ExportForm {
    #[serde(default)]
    story: String,
    #[serde(default)]
    criteria: String,
}

async fn export_handler(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<ExportForm>,
) -> Response {
    if form.story.trim().is_empty() && form.criteria.trim().is_empty() {
        return html(
            StatusCode::BAD_REQUEST,
            form_page(&form.story, &form.criteria, Some(EMPTY_FORM)),
        );
    }

    let cases = generate_cases(state.client.as_deref(), &form.story, &form.criteria).await;
    let design = TestDesign::from_cases(cases);
    let criteria = criteria_lines(&form.criteria);
    let story = form.story;

    let rendered =
        tokio::task::spawn_blocking(move || render_pdf(&story, &criteria, &design)).await;

    match rendered {
        Ok(Ok(bytes)) => {
            info!("exported PDF ({} bytes)", bytes.len());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", PDF_FILE_NAME),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Ok(Err(e)) => {
            error!("PDF rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "PDF rendering failed").into_response()
        }
        Err(e) => {
            error!("PDF rendering task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "PDF rendering failed").into_response()
        }
    }
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
