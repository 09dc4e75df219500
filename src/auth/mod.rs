//! GitHub device-flow authentication and Copilot token exchange.

pub mod authenticator;
pub mod device_code;
pub mod error;
pub mod exchange;
pub mod prompt;
pub mod service;
pub mod token;
pub mod verifier;

pub use authenticator::{DeviceFlowAuthenticator, PollSleeper, TokioSleeper};
pub use device_code::{DeviceAuthorizationGrant, PollOutcome};
pub use error::AuthError;
pub use exchange::CopilotTokenExchanger;
pub use prompt::{ConsolePrompt, SilentPrompt, UserPrompt};
pub use service::{AuthService, AuthenticationStatus};
pub use token::{ProviderToken, ServiceToken};
pub use verifier::{Profile, TokenVerifier};

const USER_AGENT: &str = concat!("clipilot/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout applied to every network call in this module.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}
