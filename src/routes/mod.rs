pub mod reset;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    let forgot = Router::new()
        .route(
            "/api/forgot-password",
            post(reset::forgot_password)
                .options(reset::forgot_password_options)
                .fallback(reset::post_only),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    let validate = Router::new().route(
        "/api/validate-reset-token",
        get(reset::validate_reset_token).fallback(reset::get_only),
    );

    forgot
        .merge(validate)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}
