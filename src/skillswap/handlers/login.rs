use super::{error_response, filled, request_locale, valid_email, ErrorBody};
use crate::{
    cli::globals::GlobalArgs,
    i18n::TranslationStore,
    identity::{IdentityClient, IdentityError, Session, UserProfile},
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
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

// Keep the password out of the logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct LoginResponse {
    message: String,
    user: UserProfile,
    session: Session,
}

#[utoipa::path(
    post,
    path= "/api/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Signed in", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Missing fields or credentials rejected by the identity provider", body = ErrorBody),
        (status = 500, description = "Identity provider unreachable", body = ErrorBody),
    ),
    tag= "auth"
)]
// axum handler for password sign-in
#[instrument(skip_all)]
pub async fn login(
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
    identity: Extension<IdentityClient>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let locale = request_locale(&headers, globals.default_locale);
    let t = |key: &'static str| store.resolve(locale, key);

    let request = payload.map(|Json(request)| request);
    debug!("login request: {:?}", request);

    let (Some(email), Some(password)) = (
        request.as_ref().and_then(|r| filled(r.email.as_ref())),
        request
            .as_ref()
            .and_then(|r| r.password.as_deref())
            .filter(|p| !p.is_empty()),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.missingCredentials"), None);
    };

    if !valid_email(email) {
        debug!("Invalid email");

        return error_response(StatusCode::BAD_REQUEST, t("auth.errors.invalidEmail"), None);
    }

    match identity.sign_in(email, password).await {
        Ok(session) => {
            debug!("Login successful");

            let body = LoginResponse {
                message: t("auth.success.login").to_string(),
                user: UserProfile::from(&session.user),
                session,
            };

            (StatusCode::OK, Json(body)).into_response()
        }

        Err(IdentityError::Rejected { status, message }) => {
            debug!("Login rejected ({}): {}", status, message);

            error_response(
                StatusCode::BAD_REQUEST,
                t("auth.errors.invalidCredentials"),
                Some(message),
            )
        }

        Err(err) => {
            error!("Login failed: {}", err);

            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                t("auth.errors.loginFailed"),
                None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::skillswap::handlers::test_support::{app, body_json, offline_app};
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    async fn spawn_provider() -> String {
        let app = Router::new().route(
            "/auth/v1/token",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret123" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "access_token": "access",
                            "token_type": "bearer",
                            "user": { "id": "u1", "email": body["email"] }
                        })),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error_description": "Invalid login credentials" })),
                    )
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn login_request(body: &Value, accept_language: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/login")
            .header(CONTENT_TYPE, "application/json")
            .header("accept-language", accept_language)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = app(&spawn_provider().await);
        let response = app
            .oneshot(login_request(
                &json!({ "email": "mehmet@example.com", "password": "secret123" }),
                "en",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Signed in successfully!");
        assert_eq!(body["user"]["id"], "u1");
        assert_eq!(body["user"]["name"], "mehmet");
        assert_eq!(body["session"]["access_token"], "access");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let app = app(&spawn_provider().await);
        let response = app
            .oneshot(login_request(
                &json!({ "email": "mehmet@example.com", "password": "wrong" }),
                "tr",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "E-posta veya şifre hatalı");
        assert_eq!(body["detail"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let response = offline_app()
            .oneshot(login_request(&json!({ "email": "mehmet@example.com" }), "de"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "E-Mail und Passwort sind erforderlich");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_login_without_body() {
        let response = offline_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "E-posta ve şifre gerekli");
    }

    #[tokio::test]
    async fn test_login_invalid_email() {
        let response = offline_app()
            .oneshot(login_request(
                &json!({ "email": "not-an-email", "password": "secret123" }),
                "en",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Enter a valid email address");
    }

    #[tokio::test]
    async fn test_login_provider_unreachable() {
        let response = offline_app()
            .oneshot(login_request(
                &json!({ "email": "mehmet@example.com", "password": "secret123" }),
                "en",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An error occurred while signing in");
    }
}
