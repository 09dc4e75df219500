use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use super::device_code::{DeviceAuthorizationGrant, PollOutcome};
use super::error::AuthError;
use super::token::ProviderToken;

/// Sleep hook for the poll loop, injectable so tests can simulate the
/// passage of time without real delays.
pub trait PollSleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}

/// Real sleeping via the tokio timer. Cancellable, so a Ctrl-C raced
/// against the poll loop unwinds cleanly mid-sleep.
pub struct TokioSleeper;

impl PollSleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// GitHub CLI OAuth app, usable by any device-flow client.
pub const DEFAULT_CLIENT_ID: &str = "178c6fc778ccc68e1d6a";
pub const DEFAULT_SCOPE: &str = "read:user user:email";

const DEFAULT_DEVICE_CODE_URL: &str = "https://github.com/login/device/code";
const DEFAULT_ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Added to the polling interval on every `slow_down`; never removed.
const SLOW_DOWN_INCREMENT: Duration = Duration::from_secs(5);

/// Drives the OAuth 2.0 device authorization grant against GitHub.
///
/// # Example
/// ```no_run
/// use clipilot::auth::DeviceFlowAuthenticator;
///
/// # async fn example() -> Result<(), clipilot::auth::AuthError> {
/// let auth = DeviceFlowAuthenticator::new();
/// let grant = auth.request_device_code().await?;
/// println!("visit {} and enter {}", grant.verification_uri, grant.user_code);
/// let token = auth.poll_for_token(&grant).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeviceFlowAuthenticator {
    client: reqwest::Client,
    client_id: String,
    scope: String,
    device_code_url: String,
    access_token_url: String,
    sleeper: Arc<dyn PollSleeper>,
}

impl Default for DeviceFlowAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceFlowAuthenticator {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            device_code_url: DEFAULT_DEVICE_CODE_URL.to_string(),
            access_token_url: DEFAULT_ACCESS_TOKEN_URL.to_string(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn PollSleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_device_code_url(mut self, url: impl Into<String>) -> Self {
        self.device_code_url = url.into();
        self
    }

    pub fn with_access_token_url(mut self, url: impl Into<String>) -> Self {
        self.access_token_url = url.into();
        self
    }

    /// Request a device/user code pair. Single attempt, no retry.
    pub async fn request_device_code(&self) -> Result<DeviceAuthorizationGrant, AuthError> {
        let resp = self
            .client
            .post(&self.device_code_url)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::DeviceCodeRequestFailed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AuthError::DeviceCodeRequestFailed(format!(
                "status {}",
                resp.status()
            )));
        }
        let payload: DeviceCodeResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::DeviceCodeRequestFailed(format!("malformed body: {e}")))?;
        debug!(user_code = %payload.user_code, interval = payload.interval, "device code issued");
        Ok(DeviceAuthorizationGrant {
            device_code: payload.device_code,
            user_code: payload.user_code,
            verification_uri: payload.verification_uri,
            expires_in: payload.expires_in,
            interval: payload.interval,
            created_at: Utc::now(),
        })
    }

    /// Poll the access-token endpoint once and classify the response.
    pub async fn poll_once(
        &self,
        grant: &DeviceAuthorizationGrant,
    ) -> Result<PollOutcome, AuthError> {
        if grant.is_expired(Utc::now()) {
            return Ok(PollOutcome::Expired);
        }
        let resp = self
            .client
            .post(&self.access_token_url)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("device_code", grant.device_code.as_str()),
                ("grant_type", DEVICE_CODE_GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(|e| AuthError::PollFailed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AuthError::PollFailed(format!("status {}", resp.status())));
        }
        let payload: AccessTokenResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::PollFailed(format!("malformed body: {e}")))?;
        if let Some(access_token) = payload.access_token {
            return Ok(PollOutcome::Authorized(ProviderToken {
                access_token,
                scope: payload.scope,
            }));
        }
        match payload.error.as_deref() {
            Some("authorization_pending") => Ok(PollOutcome::Pending),
            Some("slow_down") => Ok(PollOutcome::SlowDown),
            Some("expired_token") => Ok(PollOutcome::Expired),
            Some("access_denied") => Ok(PollOutcome::Denied),
            Some(other) => Err(AuthError::PollFailed(
                payload
                    .error_description
                    .unwrap_or_else(|| other.to_string()),
            )),
            None => Err(AuthError::PollFailed(
                "response carried neither token nor error".to_string(),
            )),
        }
    }

    /// Poll until the user authorizes, the flow terminates, or the grant's
    /// time budget runs out.
    ///
    /// Sleeps at least `grant.interval` between polls; the interval grows by
    /// 5 seconds on every `slow_down` and never shrinks within a session.
    pub async fn poll_for_token(
        &self,
        grant: &DeviceAuthorizationGrant,
    ) -> Result<ProviderToken, AuthError> {
        let budget = Duration::from_secs(grant.expires_in);
        let mut interval = Duration::from_secs(grant.interval.max(1));
        let mut elapsed = Duration::ZERO;
        loop {
            if elapsed >= budget {
                return Err(AuthError::Timeout);
            }
            match self.poll_once(grant).await? {
                PollOutcome::Authorized(token) => {
                    debug!("device flow authorized");
                    return Ok(token);
                }
                PollOutcome::Pending => {}
                PollOutcome::SlowDown => {
                    interval += SLOW_DOWN_INCREMENT;
                    debug!(interval_secs = interval.as_secs(), "server asked to slow down");
                }
                PollOutcome::Denied => return Err(AuthError::Denied),
                PollOutcome::Expired => return Err(AuthError::Expired),
            }
            self.sleeper.sleep(interval).await;
            elapsed += interval;
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: u64,
    interval: u64,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}
