use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::AuthError;
use crate::catalog::client::parse_base;

/// An authenticated (or pending-confirmation) session.
///
/// Sign-up on a project that requires email confirmation returns only the
/// user, so every token field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

/// Email/password client for a Supabase-style (GoTrue) auth endpoint.
pub struct AuthClient {
    base_url: Url,
    anon_key: String,
    http: Client,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Bare user object returned by sign-up when confirmation is pending.
#[derive(Deserialize)]
struct SignUpUser {
    id: String,
    email: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            anon_key: anon_key.into(),
            http: Client::new(),
        })
    }

    /// Register a new account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self.base_url.join("auth/v1/signup")?;
        let body = self.post(url, email, password).await?;

        // Either a full session or just the created user.
        if let Ok(session) = serde_json::from_str::<Session>(&body) {
            if session.access_token.is_some() || session.user.is_some() {
                return Ok(session);
            }
        }
        let user: SignUpUser =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(Session {
            access_token: None,
            refresh_token: None,
            expires_in: None,
            user: Some(AuthUser {
                id: user.id,
                email: user.email,
            }),
        })
    }

    /// Sign in with an email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let mut url = self.base_url.join("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let body = self.post(url, email, password).await?;
        serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))
    }

    async fn post(&self, url: Url, email: &str, password: &str) -> Result<String, AuthError> {
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "auth request rejected");
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

/// Pull a human-readable message out of an auth error body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
