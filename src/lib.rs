//! clipilot: GitHub Copilot Chat for the terminal.
//!
//! Runs the Copilot chat experience without an editor: GitHub device-flow
//! authentication, Copilot token exchange, workspace context gathering, and
//! agent-persona chat (simulated locally).
//!
//! # Quick Start
//!
//! ```no_run
//! use clipilot::auth::AuthService;
//!
//! # async fn example() -> Result<(), clipilot::auth::AuthError> {
//! let auth = AuthService::new();
//! let provider_token = auth.authenticate().await?;
//! let service_token = auth.get_service_token(&provider_token).await?;
//! println!("Copilot token expires at {}", service_token.expires_at);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod chat;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod prelude;
pub mod session;
