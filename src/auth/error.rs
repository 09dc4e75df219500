use thiserror::Error;

/// Authentication and token-exchange errors.
///
/// Every variant is terminal for the operation that produced it; nothing in
/// this module retries beyond the device-flow poll loop itself.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("device code request failed: {0}")]
    DeviceCodeRequestFailed(String),
    #[error("token poll failed: {0}")]
    PollFailed(String),
    #[error("device flow timed out before authorization")]
    Timeout,
    #[error("authorization was denied")]
    Denied,
    #[error("device code expired before authorization")]
    Expired,
    #[error("provider token rejected by the token exchange")]
    ProviderTokenInvalid,
    #[error("rate limited by the token exchange")]
    RateLimited,
    #[error("account has no Copilot subscription")]
    NoSubscription,
    #[error("token exchange failed with status {0}")]
    ExchangeFailed(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
}

impl AuthError {
    /// Remedial command or action the CLI prints next to the error text.
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::Timeout | Self::Denied | Self::Expired => {
                "run `clipilot auth login` to restart the flow"
            }
            Self::ProviderTokenInvalid => "run `clipilot auth login` to re-authenticate",
            Self::NoSubscription => "check your GitHub Copilot subscription",
            Self::RateLimited => "wait a minute before retrying",
            Self::Network(_) => "check your network connection and retry",
            _ => "retry, or re-run with --verbose for transport details",
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
