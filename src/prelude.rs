//! Convenience re-exports for common use.

pub use crate::auth::{AuthError, AuthService, ProviderToken, ServiceToken};
pub use crate::chat::{ChatClient, ChatResponse};
pub use crate::config::Config;
pub use crate::context::{ChatContext, WorkspaceScanner};
pub use crate::error::{ClipilotError, Result};
