//! CLI entry point for clipilot.

pub mod auth;
pub mod chat;
pub mod registry;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI Pilot: GitHub Copilot Chat without the editor.
#[derive(Parser, Debug)]
#[command(
    name = "clipilot",
    version,
    about = "Run GitHub Copilot Chat from the terminal"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// GitHub authentication management
    Auth(AuthArgs),
    /// Send a chat message to Copilot
    Chat(ChatArgs),
    /// Start an interactive chat session
    Interactive(InteractiveArgs),
    /// List available models
    ListModels,
    /// Set the default model
    SetModel(SetModelArgs),
    /// List available agents
    ListAgents,
    /// Set the default agent
    SetAgent(SetAgentArgs),
    /// Manage MCP (Model Context Protocol) servers
    Mcp(McpArgs),
    /// Set up configuration manually with an existing token
    Setup(SetupArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login with GitHub OAuth device flow
    Login(LoginArgs),
    /// Check authentication status
    Status,
    /// Remove stored authentication
    Logout,
}

/// Arguments for `clipilot auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Custom GitHub OAuth client ID
    #[arg(long)]
    pub client_id: Option<String>,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// The message to send to Copilot
    pub message: String,

    /// File to include as context (repeatable)
    #[arg(short, long = "file")]
    pub file: Vec<String>,

    /// Include workspace context
    #[arg(short, long)]
    pub context: bool,

    /// Specific agent to use (workspace, vscode, terminal, agent)
    #[arg(long)]
    pub agent: Option<String>,

    /// Specific model to use (e.g. claude-3.5-sonnet, o1-mini)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the `interactive` subcommand.
#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    /// Specific agent to use
    #[arg(long)]
    pub agent: Option<String>,

    /// Specific model to use
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for `clipilot set-model`.
#[derive(Parser, Debug)]
pub struct SetModelArgs {
    /// Model ID to set as default
    pub model_id: String,
}

/// Arguments for `clipilot set-agent`.
#[derive(Parser, Debug)]
pub struct SetAgentArgs {
    /// Agent ID to set as default
    pub agent_id: String,
}

/// Arguments for the `mcp` subcommand group.
#[derive(Parser, Debug)]
pub struct McpArgs {
    #[command(subcommand)]
    pub command: McpCommands,
}

/// MCP registry subcommands.
#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// List MCP servers
    List,
    /// Enable an MCP server
    Enable(McpServerArgs),
    /// Disable an MCP server
    Disable(McpServerArgs),
}

/// Arguments naming an MCP server.
#[derive(Parser, Debug)]
pub struct McpServerArgs {
    /// MCP server ID
    pub server_id: String,
}

/// Arguments for the `setup` subcommand.
#[derive(Parser, Debug)]
pub struct SetupArgs {
    /// GitHub token to store (prompted when omitted)
    #[arg(long)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_auth_login() {
        let cli = Cli::try_parse_from(["clipilot", "auth", "login"]).unwrap();
        match cli.command {
            Commands::Auth(auth) => match auth.command {
                AuthCommands::Login(args) => assert!(args.client_id.is_none()),
                other => panic!("expected Login, got {other:?}"),
            },
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_auth_login_with_client_id() {
        let cli =
            Cli::try_parse_from(["clipilot", "auth", "login", "--client-id", "abc123"]).unwrap();
        match cli.command {
            Commands::Auth(auth) => match auth.command {
                AuthCommands::Login(args) => assert_eq!(args.client_id.as_deref(), Some("abc123")),
                other => panic!("expected Login, got {other:?}"),
            },
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_auth_status() {
        let cli = Cli::try_parse_from(["clipilot", "auth", "status"]).unwrap();
        match cli.command {
            Commands::Auth(auth) => assert!(matches!(auth.command, AuthCommands::Status)),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_chat_with_files_and_flags() {
        let cli = Cli::try_parse_from([
            "clipilot",
            "chat",
            "explain this",
            "-f",
            "src/app.py",
            "-f",
            "src/db.py",
            "--context",
            "--agent",
            "workspace",
            "-m",
            "claude-3.5-sonnet",
        ])
        .unwrap();
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.message, "explain this");
                assert_eq!(args.file, vec!["src/app.py", "src/db.py"]);
                assert!(args.context);
                assert_eq!(args.agent.as_deref(), Some("workspace"));
                assert_eq!(args.model.as_deref(), Some("claude-3.5-sonnet"));
            }
            other => panic!("expected Chat, got {other:?}"),
        }
    }

    #[test]
    fn parse_chat_requires_message() {
        assert!(Cli::try_parse_from(["clipilot", "chat"]).is_err());
    }

    #[test]
    fn parse_interactive_defaults() {
        let cli = Cli::try_parse_from(["clipilot", "interactive"]).unwrap();
        match cli.command {
            Commands::Interactive(args) => {
                assert!(args.agent.is_none());
                assert!(args.model.is_none());
            }
            other => panic!("expected Interactive, got {other:?}"),
        }
    }

    #[test]
    fn parse_set_model() {
        let cli = Cli::try_parse_from(["clipilot", "set-model", "o1-mini"]).unwrap();
        match cli.command {
            Commands::SetModel(args) => assert_eq!(args.model_id, "o1-mini"),
            other => panic!("expected SetModel, got {other:?}"),
        }
    }

    #[test]
    fn parse_mcp_enable() {
        let cli = Cli::try_parse_from(["clipilot", "mcp", "enable", "filesystem"]).unwrap();
        match cli.command {
            Commands::Mcp(mcp) => match mcp.command {
                McpCommands::Enable(args) => assert_eq!(args.server_id, "filesystem"),
                other => panic!("expected Enable, got {other:?}"),
            },
            other => panic!("expected Mcp, got {other:?}"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "clipilot",
            "--workspace",
            "/tmp/project",
            "--verbose",
            "list-models",
        ])
        .unwrap();
        assert_eq!(cli.workspace, PathBuf::from("/tmp/project"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::ListModels));
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["clipilot"]).is_err());
    }
}
