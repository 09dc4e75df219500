//! CLI handlers for chat, interactive sessions, and manual setup.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::auth::AuthService;
use crate::chat::{ChatClient, ChatResponse};
use crate::cli::{ChatArgs, InteractiveArgs, SetupArgs};
use crate::config::Config;
use crate::context::{ChatContext, ContextFile, WorkspaceScanner};
use crate::error::Result;
use crate::session::InteractiveSession;

/// Handle `clipilot chat <message>`.
pub async fn handle_chat(config: &Config, workspace: &Path, args: ChatArgs) -> Result<()> {
    require_auth(config).await;

    let scanner = WorkspaceScanner::new(workspace);
    let context = gather_context(&scanner, &args.file, args.context);
    let mut chat = ChatClient::new(config);
    let response = chat.send_message(
        &args.message,
        context,
        args.agent.as_deref(),
        args.model.as_deref(),
    );
    display_response(&response);
    Ok(())
}

/// Handle `clipilot interactive`.
pub async fn handle_interactive(
    config: &Config,
    workspace: &Path,
    args: InteractiveArgs,
) -> Result<()> {
    require_auth(config).await;

    let chat = ChatClient::new(config);
    let scanner = WorkspaceScanner::new(workspace);
    let mut session = InteractiveSession::new(chat, scanner, args.agent, args.model);
    session.run()?;
    Ok(())
}

/// Handle `clipilot setup [--token <t>]`.
pub async fn handle_setup(config: &mut Config, args: SetupArgs) -> Result<()> {
    println!("Setting up CLI Pilot manually...");
    println!("Note: for OAuth authentication, use `clipilot auth login` instead.");

    let token = match args.token {
        Some(token) => token,
        None => {
            print!("Enter your GitHub token: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    if token.is_empty() {
        println!("Error: token is required");
        std::process::exit(1);
    }

    let service = AuthService::new();
    if !service.verify_token(&token).await {
        println!("Token verification failed. Please check your token.");
        std::process::exit(1);
    }

    config.set_token(Some(token.clone()))?;
    println!("Token verified and saved successfully!");

    if let Some(profile) = service.identity(&token).await {
        let name = profile.name.unwrap_or_else(|| profile.login.clone());
        println!("Authenticated as {} ({})", name, profile.login);
    }
    Ok(())
}

/// Verify the stored token before any chat work. Prints remedial commands
/// and exits when the user is not (or no longer) authenticated.
async fn require_auth(config: &Config) {
    let Some(token) = config.token() else {
        println!("Not authenticated. Please run one of the following:");
        println!("  clipilot auth login          # OAuth authentication");
        println!("  clipilot setup --token ...   # Manual token setup");
        std::process::exit(1);
    };
    // A stored token may have been revoked since it was saved; always check.
    let service = AuthService::new();
    if !service.verify_token(token).await {
        println!("Authentication token is invalid or expired.");
        println!("Please re-authenticate with: clipilot auth login");
        std::process::exit(1);
    }
}

fn gather_context(scanner: &WorkspaceScanner, files: &[String], include_workspace: bool) -> ChatContext {
    let mut context = ChatContext {
        workspace: scanner.root().display().to_string(),
        files: Vec::new(),
        workspace_info: None,
    };
    for file in files {
        let full_path = scanner.root().join(file);
        match std::fs::read_to_string(&full_path) {
            Ok(content) => {
                debug!(path = %file, "added file to context");
                context.files.push(ContextFile {
                    path: file.clone(),
                    size: content.len(),
                    content,
                });
            }
            Err(err) => println!("Warning: could not read file {file}: {err}"),
        }
    }
    if include_workspace {
        context.workspace_info = Some(scanner.workspace_context());
    }
    context
}

fn display_response(response: &ChatResponse) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Copilot Response:");
    println!("{}", "=".repeat(60));
    println!("{}", response.content);
    println!("{}", "=".repeat(60));
    if !response.references.is_empty() {
        println!("References:");
        for reference in &response.references {
            println!("  - {reference}");
        }
    }
    println!();
}
