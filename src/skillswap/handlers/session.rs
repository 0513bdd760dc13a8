use super::{error_response, filled, request_locale, ErrorBody};
use crate::{
    cli::globals::GlobalArgs,
    i18n::TranslationStore,
    identity::{IdentityClient, IdentityError, UserProfile},
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SessionResponse {
    user: UserProfile,
}

#[utoipa::path(
    post,
    path= "/api/auth/session",
    request_body = SessionRequest,
    responses (
        (status = 200, description = "Session is valid", body = SessionResponse, content_type = "application/json"),
        (status = 400, description = "Missing access token", body = ErrorBody),
        (status = 401, description = "Token rejected by the identity provider", body = ErrorBody),
        (status = 500, description = "Identity provider unreachable", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler that reads back the user behind an OAuth session
#[instrument(skip_all)]
pub async fn session(
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
    identity: Extension<IdentityClient>,
    payload: Option<Json<SessionRequest>>,
) -> Response {
    let locale = request_locale(&headers, globals.default_locale);
    let t = |key: &'static str| store.resolve(locale, key);

    let Some(access_token) = payload
        .as_ref()
        .and_then(|Json(request)| filled(request.access_token.as_ref()))
    else {
        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.sessionFailed"), None);
    };

    match identity.user(access_token).await {
        Ok(user) => {
            debug!("Session verified for user {}", user.id);

            let body = SessionResponse {
                user: UserProfile::from(&user),
            };

            (StatusCode::OK, Json(body)).into_response()
        }

        Err(IdentityError::Rejected { status, message }) => {
            debug!("Session rejected ({}): {}", status, message);

            error_response(
                StatusCode::UNAUTHORIZED,
                t("auth.errors.sessionFailed"),
                Some(message),
            )
        }

        Err(err) => {
            error!("Session check failed: {}", err);

            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                t("auth.errors.sessionFailed"),
                None,
            )
        }
    }
}
