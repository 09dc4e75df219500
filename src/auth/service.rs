use std::sync::Arc;

use super::authenticator::DeviceFlowAuthenticator;
use super::error::AuthError;
use super::exchange::CopilotTokenExchanger;
use super::prompt::{ConsolePrompt, UserPrompt};
use super::token::{ProviderToken, ServiceToken};
use super::verifier::{Profile, TokenVerifier};

/// Derived, read-only authentication view. Computed on demand from the two
/// token states, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationStatus {
    pub has_provider_token: bool,
    pub has_service_token: bool,
    pub authenticated: bool,
}

impl AuthenticationStatus {
    pub fn derive(has_provider_token: bool, has_service_token: bool) -> Self {
        Self {
            has_provider_token,
            has_service_token,
            authenticated: has_provider_token,
        }
    }
}

/// Facade over the device flow, verifier, and exchanger.
///
/// All printing, prompting, and exit-code decisions belong to the caller;
/// this type only returns typed results and errors.
///
/// # Example
/// ```no_run
/// use clipilot::auth::AuthService;
///
/// # async fn example() -> Result<(), clipilot::auth::AuthError> {
/// let auth = AuthService::new();
/// let provider_token = auth.authenticate().await?;
/// let service_token = auth.get_service_token(&provider_token).await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthService {
    authenticator: DeviceFlowAuthenticator,
    verifier: TokenVerifier,
    exchanger: CopilotTokenExchanger,
    prompt: Arc<dyn UserPrompt>,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            authenticator: DeviceFlowAuthenticator::new(),
            verifier: TokenVerifier::new(),
            exchanger: CopilotTokenExchanger::new(),
            prompt: Arc::new(ConsolePrompt::default()),
        }
    }

    pub fn with_authenticator(mut self, authenticator: DeviceFlowAuthenticator) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn with_verifier(mut self, verifier: TokenVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_exchanger(mut self, exchanger: CopilotTokenExchanger) -> Self {
        self.exchanger = exchanger;
        self
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn UserPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run the full device flow: request a grant, present it, poll to
    /// completion.
    pub async fn authenticate(&self) -> Result<ProviderToken, AuthError> {
        let grant = self.authenticator.request_device_code().await?;
        self.prompt.display(&grant);
        self.authenticator.poll_for_token(&grant).await
    }

    /// Live check of a provider token. Fails soft.
    pub async fn verify_token(&self, token: &str) -> bool {
        self.verifier.verify(token).await
    }

    /// Profile behind a provider token, for confirmation messages only.
    pub async fn identity(&self, token: &str) -> Option<Profile> {
        self.verifier.get_identity(token).await
    }

    /// Current service token, minting or refreshing as needed.
    pub async fn get_service_token(
        &self,
        provider_token: &ProviderToken,
    ) -> Result<ServiceToken, AuthError> {
        self.exchanger.get_service_token(provider_token).await
    }

    pub fn status(&self, has_provider_token: bool) -> AuthenticationStatus {
        AuthenticationStatus::derive(has_provider_token, self.exchanger.has_cached_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_authenticated_with_provider_token() {
        let status = AuthenticationStatus::derive(true, false);
        assert!(status.authenticated);
        assert!(status.has_provider_token);
        assert!(!status.has_service_token);
    }

    #[test]
    fn status_not_authenticated_without_provider_token() {
        let status = AuthenticationStatus::derive(false, true);
        assert!(!status.authenticated);
    }

    #[test]
    fn fresh_service_status_has_no_cached_token() {
        let svc = AuthService::new();
        let status = svc.status(false);
        assert!(!status.has_service_token);
        assert!(!status.authenticated);
    }
}
