//! clipilot CLI binary entry point.

use clap::Parser;
use clipilot::cli::{self, AuthCommands, Cli, Commands, McpCommands};
use clipilot::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.clone());
    let workspace = cli.workspace.clone();

    let result = match cli.command {
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login(args) => {
                cli::auth::handle_login(&mut config, args.client_id).await
            }
            AuthCommands::Status => cli::auth::handle_status(&config).await,
            AuthCommands::Logout => cli::auth::handle_logout(&mut config).await,
        },
        Commands::Chat(args) => cli::chat::handle_chat(&config, &workspace, args).await,
        Commands::Interactive(args) => {
            cli::chat::handle_interactive(&config, &workspace, args).await
        }
        Commands::Setup(args) => cli::chat::handle_setup(&mut config, args).await,
        Commands::ListModels => cli::registry::handle_list_models(&config),
        Commands::SetModel(args) => cli::registry::handle_set_model(&mut config, &args.model_id),
        Commands::ListAgents => cli::registry::handle_list_agents(&config),
        Commands::SetAgent(args) => cli::registry::handle_set_agent(&mut config, &args.agent_id),
        Commands::Mcp(mcp_args) => match mcp_args.command {
            McpCommands::List => cli::registry::handle_mcp_list(&config),
            McpCommands::Enable(args) => {
                cli::registry::handle_mcp_set_enabled(&mut config, &args.server_id, true)
            }
            McpCommands::Disable(args) => {
                cli::registry::handle_mcp_set_enabled(&mut config, &args.server_id, false)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        eprintln!("Hint: {}", e.remedy());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "clipilot=debug"
    } else {
        "clipilot=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
