use super::{error_response, ErrorBody};
use crate::i18n::{Locale, TranslationStore};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Translation {
    locale: Locale,
    key: String,
    /// Resolved text; the key itself when no dictionary has it.
    value: String,
}

fn unknown_locale(code: &str) -> Response {
    debug!("Unknown locale: {}", code);

    error_response(StatusCode::NOT_FOUND, "unknown locale", Some(code.to_string()))
}

#[utoipa::path(
    get,
    path= "/api/i18n/{locale}",
    params(
        ("locale" = String, Path, description = "Locale code: tr, en or de"),
    ),
    responses (
        (status = 200, description = "Full dictionary of the locale", body = Object, content_type = "application/json"),
        (status = 404, description = "Unknown locale", body = ErrorBody),
    ),
    tag= "i18n"
)]
// axum handler returning one locale's dictionary
#[instrument(skip(store))]
pub async fn messages(
    Path(code): Path<String>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let Some(locale) = Locale::from_code(&code) else {
        return unknown_locale(&code);
    };

    Json(store.messages(locale)).into_response()
}

#[utoipa::path(
    get,
    path= "/api/i18n/{locale}/{key}",
    params(
        ("locale" = String, Path, description = "Locale code: tr, en or de"),
        ("key" = String, Path, description = "Dot separated key, e.g. auth.signIn"),
    ),
    responses (
        (status = 200, description = "Resolved translation", body = Translation, content_type = "application/json"),
        (status = 404, description = "Unknown locale", body = ErrorBody),
    ),
    tag= "i18n"
)]
// axum handler resolving a single key
#[instrument(skip(store))]
pub async fn translate(
    Path((code, key)): Path<(String, String)>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let Some(locale) = Locale::from_code(&code) else {
        return unknown_locale(&code);
    };

    let value = store.resolve(locale, &key).to_string();

    Json(Translation { locale, key, value }).into_response()
}

#[cfg(test)]
mod tests {
    use super::Translation;
    use crate::{
        i18n::Locale,
        skillswap::handlers::test_support::{body_json, offline_app},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get(uri: &str) -> axum::response::Response {
        offline_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_messages() {
        let response = get("/api/i18n/en").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["auth"]["signIn"], "Sign In");
        assert_eq!(body["footer"]["language"], "English");
    }

    #[tokio::test]
    async fn test_messages_unknown_locale() {
        assert_eq!(get("/api/i18n/fr").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get("/api/i18n/EN").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_translate() {
        let body = body_json(get("/api/i18n/de/auth.signIn").await).await;
        let translation: Translation = serde_json::from_value(body).unwrap();
        assert_eq!(
            translation,
            Translation {
                locale: Locale::De,
                key: "auth.signIn".to_string(),
                value: "Anmelden".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_translate_falls_back() {
        let body = body_json(get("/api/i18n/de/auth.callback.title").await).await;
        assert_eq!(body["value"], "Giriş Yapılıyor");

        let body = body_json(get("/api/i18n/en/does.not.exist").await).await;
        assert_eq!(body["value"], "does.not.exist");

        // a Node is not a translation
        let body = body_json(get("/api/i18n/en/auth").await).await;
        assert_eq!(body["value"], "auth");
    }
}
