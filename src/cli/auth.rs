//! CLI auth command handlers for login, status, and logout.

use crate::auth::{AuthService, DeviceFlowAuthenticator};
use crate::config::Config;
use crate::error::Result;

/// Handle `clipilot auth login`.
pub async fn handle_login(config: &mut Config, client_id: Option<String>) -> Result<()> {
    println!("Starting GitHub authentication...");

    let mut authenticator = DeviceFlowAuthenticator::new();
    if let Some(client_id) = client_id {
        authenticator = authenticator.with_client_id(client_id);
    }
    let service = AuthService::new().with_authenticator(authenticator);

    // Ctrl-C lands on the poll loop's sleep and aborts the flow without
    // persisting anything.
    let token = tokio::select! {
        result = service.authenticate() => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("\nAuthentication cancelled.");
            std::process::exit(130);
        }
    };

    config.set_token(Some(token.access_token.clone()))?;

    match service.identity(&token.access_token).await {
        Some(profile) => {
            let name = profile.name.unwrap_or_else(|| profile.login.clone());
            println!("Successfully authenticated as {} ({})", name, profile.login);
        }
        None => println!("Authentication successful!"),
    }

    // Exchange for a Copilot token right away to confirm the account has
    // access; a failure here is a warning, not a failed login.
    match service.get_service_token(&token).await {
        Ok(service_token) => println!(
            "Copilot access verified (token expires {})",
            service_token.expires_at.format("%Y-%m-%d %H:%M")
        ),
        Err(err) => {
            println!("Warning: Copilot token exchange failed: {err}");
            println!("Hint: {}", err.remedy());
        }
    }
    Ok(())
}

/// Handle `clipilot auth status`.
pub async fn handle_status(config: &Config) -> Result<()> {
    let Some(token) = config.token() else {
        println!("Not authenticated. Run `clipilot auth login` to authenticate.");
        std::process::exit(1);
    };

    println!("Checking authentication status...");
    let service = AuthService::new();

    if !service.verify_token(token).await {
        println!("Authentication Status: Invalid or expired");
        println!("Run `clipilot auth login` to re-authenticate.");
        std::process::exit(1);
    }

    match service.identity(token).await {
        Some(profile) => {
            let name = profile.name.unwrap_or_else(|| profile.login.clone());
            println!("Authentication Status: Valid");
            println!("  User: {} ({})", name, profile.login);
            println!("  Profile: https://github.com/{}", profile.login);
        }
        None => println!("Authentication Status: Valid (unable to get user details)"),
    }

    let status = service.status(true);
    println!(
        "  Service token: {}",
        if status.has_service_token {
            "cached"
        } else {
            "minted on next chat request"
        }
    );
    Ok(())
}

/// Handle `clipilot auth logout`.
pub async fn handle_logout(config: &mut Config) -> Result<()> {
    if config.token().is_none() {
        println!("Not currently authenticated.");
        return Ok(());
    }
    config.set_token(None)?;
    println!("Successfully logged out. Authentication token removed.");
    Ok(())
}
