use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_USER_URL: &str = "https://api.github.com/user";

/// Basic GitHub profile fields, used for confirmation messages only.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Checks a provider token against the identity endpoint.
///
/// Fails soft by design: every failure mode collapses to `false`/`None`.
/// A negative answer means "not currently usable", not "permanently
/// revoked"; this is a diagnostic, never an authorization gate.
pub struct TokenVerifier {
    client: reqwest::Client,
    user_url: String,
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenVerifier {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
            user_url: DEFAULT_USER_URL.to_string(),
        }
    }

    pub fn with_user_url(mut self, url: impl Into<String>) -> Self {
        self.user_url = url.into();
        self
    }

    /// True only when the identity endpoint accepts the token outright.
    pub async fn verify(&self, token: &str) -> bool {
        match self.whoami(token).await {
            Ok(resp) => resp.status() == StatusCode::OK,
            Err(err) => {
                debug!(error = %err, "token verification failed");
                false
            }
        }
    }

    /// Fetch the profile behind a token, or `None` on any failure.
    pub async fn get_identity(&self, token: &str) -> Option<Profile> {
        let resp = self.whoami(token).await.ok()?;
        if resp.status() != StatusCode::OK {
            return None;
        }
        resp.json().await.ok()
    }

    async fn whoami(&self, token: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .get(&self.user_url)
            .header("Accept", "application/json")
            .header("Authorization", format!("token {token}"))
            .send()
            .await
    }
}
