use tracing::debug;

use super::device_code::DeviceAuthorizationGrant;

/// How a device-flow grant is presented to the human.
///
/// Decoupled from the poll loop so the flow runs without a terminal or
/// browser present.
pub trait UserPrompt: Send + Sync {
    fn display(&self, grant: &DeviceAuthorizationGrant);
}

/// Prints the verification URL and user code, then tries to open a browser.
/// Browser failures are ignored; the user can always navigate manually.
#[derive(Debug, Default)]
pub struct ConsolePrompt {
    pub skip_browser: bool,
}

impl UserPrompt for ConsolePrompt {
    fn display(&self, grant: &DeviceAuthorizationGrant) {
        println!();
        println!("{}", "=".repeat(60));
        println!("GitHub Authentication Required");
        println!("{}", "=".repeat(60));
        println!("1. Open this URL in your browser: {}", grant.verification_uri);
        println!("2. Enter this code: {}", grant.user_code);
        println!("{}", "=".repeat(60));
        if !self.skip_browser {
            if webbrowser::open(&grant.verification_uri).is_ok() {
                println!("Browser opened automatically");
            } else {
                debug!("could not open browser automatically");
            }
        }
        println!("Waiting for authorization (Ctrl-C to cancel)...");
    }
}

/// No-op prompt for non-interactive callers.
#[derive(Debug, Default)]
pub struct SilentPrompt;

impl UserPrompt for SilentPrompt {
    fn display(&self, _grant: &DeviceAuthorizationGrant) {}
}
