use super::{error_response, request_locale, ErrorBody};
use crate::{cli::globals::GlobalArgs, i18n::TranslationStore, identity::IdentityClient};
use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Page the identity provider sends the browser back to.
pub const CALLBACK_PATH: &str = "/auth/callback";

#[utoipa::path(
    get,
    path= "/api/auth/oauth/{provider}",
    params(
        ("provider" = String, Path, description = "OAuth provider name, e.g. google"),
    ),
    responses (
        (status = 303, description = "Redirect to the provider's consent screen"),
        (status = 400, description = "Unsupported provider name", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler to start an OAuth sign-in
#[instrument(skip(headers, globals, store, identity))]
pub async fn oauth(
    Path(provider): Path<String>,
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
    identity: Extension<IdentityClient>,
) -> Response {
    let redirect_to = globals.site_link(CALLBACK_PATH);

    match identity.authorize_url(&provider, &redirect_to) {
        Ok(url) => {
            debug!("Redirecting to {}", url);

            Redirect::to(url.as_str()).into_response()
        }

        Err(err) => {
            debug!("OAuth redirect refused: {}", err);

            let locale = request_locale(&headers, globals.default_locale);
            error_response(
                StatusCode::BAD_REQUEST,
                store.resolve(locale, "auth.error.default"),
                Some(err.to_string()),
            )
        }
    }
}
