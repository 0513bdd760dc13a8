#![allow(clippy::needless_for_each)]

use crate::{cli::globals::GlobalArgs, i18n::TranslationStore, identity::IdentityClient};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;

use handlers::{health, login, oauth, pages, register, session, translations};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        login::login,
        register::register,
        oauth::oauth,
        session::session,
        translations::messages,
        translations::translate,
    ),
    components(
        schemas(
            health::Health,
            handlers::ErrorBody,
            login::LoginRequest,
            login::LoginResponse,
            register::RegisterRequest,
            register::RegisterResponse,
            session::SessionRequest,
            session::SessionResponse,
            translations::Translation,
        )
    ),
    tags(
        (name = "auth", description = "Sign-in, sign-up and OAuth session API"),
        (name = "i18n", description = "Translation dictionaries"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router.
#[must_use]
pub fn router(
    globals: GlobalArgs,
    store: Arc<TranslationStore>,
    identity: IdentityClient,
) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/login", get(pages::redirect_to_locale))
        .route("/register", get(pages::redirect_to_locale))
        .route("/:locale", get(pages::localized_landing))
        .route("/:locale/login", get(pages::login))
        .route("/:locale/register", get(pages::register))
        .route(oauth::CALLBACK_PATH, get(pages::callback))
        .route("/:locale/auth/callback", get(pages::localized_callback))
        .route("/auth/error", get(pages::auth_error))
        .route("/:locale/auth/error", get(pages::localized_auth_error))
        .route("/api/login", post(login::login))
        .route("/api/register", post(register::register))
        .route("/api/auth/oauth/:provider", get(oauth::oauth))
        .route("/api/auth/session", post(session::session))
        .route("/api/i18n/:locale", get(translations::messages))
        .route("/api/i18n/:locale/:key", get(translations::translate))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
        .route("/health", get(health::health).options(health::health))
        .layer(Extension(globals))
        .layer(Extension(store))
        .layer(Extension(identity))
}

/// Serve the application until ctrl-c.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails
pub async fn new(
    port: u16,
    globals: GlobalArgs,
    store: Arc<TranslationStore>,
    identity: IdentityClient,
) -> Result<()> {
    let app = router(globals, store, identity);

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", err);
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
