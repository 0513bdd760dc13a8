use super::{error_response, filled, request_locale, valid_email, ErrorBody, MIN_PASSWORD_LENGTH};
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
pub struct RegisterRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct RegisterResponse {
    message: String,
    user: UserProfile,
    /// True until the account's e-mail address is confirmed.
    pending_verification: bool,
}

#[utoipa::path(
    post,
    path= "/api/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "Registration successful", body = RegisterResponse, content_type = "application/json"),
        (status = 400, description = "Missing fields, short password or sign-up rejected by the identity provider", body = ErrorBody),
        (status = 500, description = "Identity provider unreachable", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler for sign-up
#[instrument(skip_all)]
pub async fn register(
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
    identity: Extension<IdentityClient>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let locale = request_locale(&headers, globals.default_locale);
    let t = |key: &'static str| store.resolve(locale, key);

    let request = payload.map(|Json(request)| request);
    debug!("register request: {:?}", request);

    let Some(request) = request else {
        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.missingFields"), None);
    };

    let (Some(name), Some(email), Some(password)) = (
        filled(request.name.as_ref()),
        filled(request.email.as_ref()),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.missingFields"), None);
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        debug!("Password too short");

        return error_response(
            StatusCode::BAD_REQUEST,
            t("auth.errors.passwordTooShort"),
            None,
        );
    }

    if !valid_email(email) {
        debug!("Invalid email");

        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.invalidEmail"), None);
    }

    match identity.sign_up(name, email, password).await {
        Ok(outcome) => {
            debug!(
                "Registration successful, pending verification: {}",
                outcome.pending_verification()
            );

            let body = RegisterResponse {
                message: t("auth.success.register").to_string(),
                user: UserProfile::from(&outcome.user),
                pending_verification: outcome.pending_verification(),
            };

            (StatusCode::CREATED, Json(body)).into_response()
        }

        Err(IdentityError::Rejected { status, message }) => {
            debug!("Registration rejected ({}): {}", status, message);

            error_response(
                StatusCode::BAD_REQUEST,
                t("auth.errors.registerFailed"),
                Some(message),
            )
        }

        Err(err) => {
            error!("Registration failed: {}", err);

            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                t("auth.errors.registerFailed"),
                None,
            )
        }
    }
}
