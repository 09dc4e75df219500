#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use clipilot::auth::{
    CopilotTokenExchanger, DeviceAuthorizationGrant, DeviceFlowAuthenticator, PollSleeper,
    TokenVerifier,
};
use wiremock::MockServer;

pub fn grant(interval: u64, expires_in: u64) -> DeviceAuthorizationGrant {
    DeviceAuthorizationGrant {
        device_code: "D1".to_string(),
        user_code: "ABCD-1234".to_string(),
        verification_uri: "https://example/device".to_string(),
        expires_in,
        interval,
        created_at: Utc::now(),
    }
}

pub fn authenticator(server: &MockServer) -> DeviceFlowAuthenticator {
    DeviceFlowAuthenticator::new()
        .with_device_code_url(format!("{}/login/device/code", server.uri()))
        .with_access_token_url(format!("{}/login/oauth/access_token", server.uri()))
}

pub fn verifier(server: &MockServer) -> TokenVerifier {
    TokenVerifier::new().with_user_url(format!("{}/user", server.uri()))
}

pub fn exchanger(server: &MockServer) -> CopilotTokenExchanger {
    CopilotTokenExchanger::new()
        .with_exchange_url(format!("{}/copilot_internal/v2/token", server.uri()))
}

/// Records requested sleeps and returns immediately, so poll-loop tests run
/// on simulated time.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleeper lock poisoned").clone()
    }

    /// Total simulated time spent sleeping.
    pub fn elapsed(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl PollSleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        self.sleeps
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
        Box::pin(std::future::ready(()))
    }
}
