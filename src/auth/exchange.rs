use std::sync::Mutex;

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::error::AuthError;
use super::token::{ProviderToken, ServiceToken};

const DEFAULT_EXCHANGE_URL: &str = "https://api.github.com/copilot_internal/v2/token";

/// Maintains at most one live service token per process, re-minting lazily
/// once the safety-margined expiry watermark is crossed.
///
/// Freshness is re-evaluated against the current clock on every call, never
/// against a clock captured earlier. Duplicate in-flight exchanges are
/// tolerated; the last write to the cache wins.
pub struct CopilotTokenExchanger {
    client: reqwest::Client,
    exchange_url: String,
    cache: Mutex<Option<ServiceToken>>,
}

impl Default for CopilotTokenExchanger {
    fn default() -> Self {
        Self::new()
    }
}

impl CopilotTokenExchanger {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
            exchange_url: DEFAULT_EXCHANGE_URL.to_string(),
            cache: Mutex::new(None),
        }
    }

    pub fn with_exchange_url(mut self, url: impl Into<String>) -> Self {
        self.exchange_url = url.into();
        self
    }

    /// Return the cached service token while it is fresh, otherwise exchange
    /// the provider token for a new one.
    pub async fn get_service_token(
        &self,
        provider_token: &ProviderToken,
    ) -> Result<ServiceToken, AuthError> {
        if let Some(cached) = self.cached_token() {
            debug!("service token cache hit");
            return Ok(cached);
        }
        let resp = self
            .client
            .post(&self.exchange_url)
            .header("Accept", "application/json")
            .bearer_auth(&provider_token.access_token)
            .send()
            .await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::ProviderTokenInvalid);
        }
        if status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            if body.to_ascii_lowercase().contains("rate limit") {
                return Err(AuthError::RateLimited);
            }
            return Err(AuthError::NoSubscription);
        }
        if !status.is_success() {
            return Err(AuthError::ExchangeFailed(status.as_u16()));
        }
        let payload: ExchangeResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("exchange body: {e}")))?;
        let token = ServiceToken {
            token: payload.token,
            expires_at: Utc::now() + Duration::seconds(payload.expires_in as i64),
        };
        debug!(expires_at = %token.expires_at, "service token minted");
        self.store_token(token.clone());
        Ok(token)
    }

    /// Whether a fresh service token is currently cached.
    pub fn has_cached_token(&self) -> bool {
        self.cached_token().is_some()
    }

    fn cached_token(&self) -> Option<ServiceToken> {
        let guard = self.cache.lock().ok()?;
        let cached = guard.as_ref()?;
        if !cached.is_fresh(Utc::now()) {
            return None;
        }
        Some(cached.clone())
    }

    fn store_token(&self, token: ServiceToken) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(token);
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    token: String,
    expires_in: u64,
}
