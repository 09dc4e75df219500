use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Buffer subtracted from a service token's stated expiry so a token is
/// never handed out right as it lapses mid-request.
pub const SAFETY_MARGIN_SECS: i64 = 300;

/// Bearer credential issued by GitHub after device-flow completion.
///
/// Carries no expiry of its own; callers must re-verify it live before
/// trusting it for downstream exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub scope: Option<String>,
}

impl ProviderToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scope: None,
        }
    }
}

/// Short-lived Copilot credential minted from a provider token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl ServiceToken {
    /// Whether the token may still be handed to a caller at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(SAFETY_MARGIN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_token_fresh_outside_safety_margin() {
        let token = ServiceToken {
            token: "svc".to_string(),
            expires_at: Utc::now() + Duration::seconds(SAFETY_MARGIN_SECS + 60),
        };
        assert!(token.is_fresh(Utc::now()));
    }

    #[test]
    fn service_token_stale_inside_safety_margin() {
        let token = ServiceToken {
            token: "svc".to_string(),
            expires_at: Utc::now() + Duration::seconds(SAFETY_MARGIN_SECS - 100),
        };
        assert!(!token.is_fresh(Utc::now()));
    }

    #[test]
    fn service_token_stale_past_expiry() {
        let token = ServiceToken {
            token: "svc".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        assert!(!token.is_fresh(Utc::now()));
    }
}
