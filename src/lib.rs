pub mod config;
pub mod email;
pub mod error;
pub mod net;
pub mod routes;
pub mod state;
pub mod sweeper;
pub mod tokens;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{ResetMailer, SmtpMailer};
use crate::state::{AppState, SharedState};
use crate::tokens::{MemoryTokenStore, TokenStore};

/// Build the SMTP mailer from config, or `None` when SMTP is not configured.
pub fn system_mailer(config: &Config) -> Option<Arc<dyn ResetMailer>> {
    let smtp = config.smtp.as_ref()?;
    match SmtpMailer::new(smtp, config.token_ttl) {
        Ok(mailer) => {
            tracing::info!("SMTP configured ({}:{})", smtp.host, smtp.port);
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::warn!("SMTP not available: {e}");
            None
        }
    }
}

/// Build the router with an in-memory token store and the configured mailer.
pub fn build_app(config: Config) -> (Router, SharedState) {
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new(config.token_ttl));
    let mailer = system_mailer(&config);
    build_app_with(config, tokens, mailer)
}

pub fn build_app_with(
    config: Config,
    tokens: Arc<dyn TokenStore>,
    mailer: Option<Arc<dyn ResetMailer>>,
) -> (Router, SharedState) {
    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState {
        config,
        tokens,
        mailer,
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
