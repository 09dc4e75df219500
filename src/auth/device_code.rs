use chrono::{DateTime, Duration, Utc};

use super::token::ProviderToken;

/// Device authorization grant returned by the device-code endpoint.
///
/// Immutable once created; consumed exactly once by the poll loop and
/// invalid after `expires_in` seconds from `created_at`.
#[derive(Debug, Clone)]
pub struct DeviceAuthorizationGrant {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: u64,
    pub interval: u64,
    pub created_at: DateTime<Utc>,
}

impl DeviceAuthorizationGrant {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(self.expires_in as i64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Outcome of a single poll of the access-token endpoint.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Authorization still pending; keep polling.
    Pending,
    /// Server asked for a longer gap between polls.
    SlowDown,
    /// User authorized; the provider token is ready.
    Authorized(ProviderToken),
    /// User denied the request.
    Denied,
    /// The device code lapsed before the user authorized.
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(expires_in: u64) -> DeviceAuthorizationGrant {
        DeviceAuthorizationGrant {
            device_code: "device-1".to_string(),
            user_code: "ABCD-1234".to_string(),
            verification_uri: "https://github.com/login/device".to_string(),
            expires_in,
            interval: 5,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn grant_not_expired_within_window() {
        let grant = grant(900);
        assert!(!grant.is_expired(Utc::now()));
    }

    #[test]
    fn grant_expired_after_window() {
        let grant = grant(900);
        assert!(grant.is_expired(grant.created_at + Duration::seconds(901)));
    }

    #[test]
    fn grant_expired_exactly_at_window_edge() {
        let grant = grant(900);
        assert!(grant.is_expired(grant.created_at + Duration::seconds(900)));
    }
}
