use super::types::{IdentityUser, Session, SignUpOutcome};
use crate::APP_USER_AGENT;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};
use url::Url;

const API_KEY_HEADER: &str = "apikey";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identity provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported OAuth provider: {0:?}")]
    UnsupportedProvider(String),

    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected identity provider response: {0}")]
    Decode(String),
}

/// HTTP client for a GoTrue-compatible identity provider.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: Url,
    anon_key: SecretString,
}

impl IdentityClient {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, anon_key: SecretString) -> Result<Self, IdentityError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            anon_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        Ok(self.base_url.join(path)?)
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, self.anon_key.expose_secret())
    }

    /// Password sign-in.
    ///
    /// # Errors
    /// Returns [`IdentityError::Rejected`] for wrong credentials, or a transport error.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .with_api_key(self.http.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        decode(response).await
    }

    /// Create an account; the display name travels as user metadata.
    ///
    /// # Errors
    /// Returns [`IdentityError::Rejected`] if the provider refuses the sign-up.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        let url = self.endpoint("auth/v1/signup")?;

        let response = self
            .with_api_key(self.http.post(url))
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "name": name },
            }))
            .send()
            .await?;

        let body: Value = decode(response).await?;
        sign_up_outcome(body)
    }

    /// Where to send the browser to start an OAuth sign-in.
    ///
    /// # Errors
    /// Returns an error for provider names that are not plain identifiers.
    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<Url, IdentityError> {
        let valid = !provider.is_empty()
            && provider
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid {
            return Err(IdentityError::UnsupportedProvider(provider.to_string()));
        }

        let mut url = self.endpoint("auth/v1/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);

        Ok(url)
    }

    /// Read back the user behind an access token.
    ///
    /// # Errors
    /// Returns [`IdentityError::Rejected`] if the token is not accepted.
    #[instrument(skip_all)]
    pub async fn user(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
        let url = self.endpoint("auth/v1/user")?;

        let response = self
            .with_api_key(self.http.get(url))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;

        decode(response).await
    }

    /// Probe the provider's health endpoint.
    ///
    /// # Errors
    /// Returns an error if the provider is unreachable or unhealthy.
    #[instrument(skip_all)]
    pub async fn health(&self) -> Result<(), IdentityError> {
        let url = self.endpoint("auth/v1/health")?;

        let response = self.with_api_key(self.http.get(url)).send().await?;
        let _: Value = decode(response).await?;

        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, IdentityError> {
    let status = response.status();

    if status.is_success() {
        debug!("Identity provider answered {}", status);
        return response.json::<T>().await.map_err(|err| {
            error!("Failed to decode identity provider response: {}", err);
            IdentityError::Decode(err.to_string())
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });

    debug!("Identity provider rejected request: {} {}", status, message);

    Err(IdentityError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// GoTrue reports errors under different field names depending on the endpoint.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|field| {
            value
                .get(field)
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        })
        .map(str::to_string)
}

/// Sign-up returns a bare user while verification is pending, or a session
/// (with the user nested) when auto-confirm is on.
fn sign_up_outcome(body: Value) -> Result<SignUpOutcome, IdentityError> {
    if body.get("access_token").is_some() {
        let session: Session =
            serde_json::from_value(body).map_err(|err| IdentityError::Decode(err.to_string()))?;
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user = match body.get("user") {
        Some(user) => user.clone(),
        None => body,
    };
    let user: IdentityUser =
        serde_json::from_value(user).map_err(|err| IdentityError::Decode(err.to_string()))?;

    Ok(SignUpOutcome {
        user,
        session: None,
    })
}
