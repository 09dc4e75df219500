//! CLI handlers for the model, agent, and MCP server registries.

use crate::config::Config;
use crate::error::Result;

/// Handle `clipilot list-models`.
pub fn handle_list_models(config: &Config) -> Result<()> {
    println!();
    println!("Available Models:");
    println!("{}", "=".repeat(80));
    for (id, model) in config.models() {
        let default_marker = if id == config.default_model() {
            " (default)"
        } else {
            ""
        };
        println!();
        println!("{}{default_marker}", model.name);
        println!("  ID: {id}");
        println!("  Family: {}", model.family);
        println!("  Description: {}", model.description);
        println!("  Max Tokens: {}", model.max_tokens);
        println!(
            "  Supports Tools: {}",
            if model.supports_tools { "Yes" } else { "No" }
        );
        println!(
            "  Supports Vision: {}",
            if model.supports_vision { "Yes" } else { "No" }
        );
    }
    println!();
    println!("{}", "=".repeat(80));
    println!("Current default model: {}", config.default_model());
    println!();
    println!("To change the default model:   clipilot set-model <model-id>");
    println!("To use a model for one chat:   clipilot chat \"...\" --model <model-id>");
    Ok(())
}

/// Handle `clipilot set-model <id>`.
pub fn handle_set_model(config: &mut Config, model_id: &str) -> Result<()> {
    config.set_default_model(model_id)?;
    let name = config
        .model_info(model_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| model_id.to_string());
    println!("Default model set to: {name} ({model_id})");
    Ok(())
}

/// Handle `clipilot list-agents`.
pub fn handle_list_agents(config: &Config) -> Result<()> {
    println!();
    println!("Available Agents:");
    println!("{}", "=".repeat(80));
    for (id, agent) in config.agents() {
        let default_marker = if id == config.default_agent() {
            " (default)"
        } else {
            ""
        };
        println!();
        println!("{}{default_marker}", agent.name);
        println!("  ID: {id}");
        println!("  Description: {}", agent.description);
        println!("  Icon: {}", agent.icon);
        println!("  Capabilities: {}", agent.capabilities.join(", "));
    }
    println!();
    println!("{}", "=".repeat(80));
    println!("Current default agent: {}", config.default_agent());
    println!();
    println!("To change the default agent:   clipilot set-agent <agent-id>");
    println!("To use an agent for one chat:  clipilot chat \"...\" --agent <agent-id>");
    Ok(())
}

/// Handle `clipilot set-agent <id>`.
pub fn handle_set_agent(config: &mut Config, agent_id: &str) -> Result<()> {
    config.set_default_agent(agent_id)?;
    let name = config
        .agent_info(agent_id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| agent_id.to_string());
    println!("Default agent set to: {name} ({agent_id})");
    Ok(())
}

/// Handle `clipilot mcp list`.
pub fn handle_mcp_list(config: &Config) -> Result<()> {
    if !config.mcp_enabled() {
        println!("MCP (Model Context Protocol) is disabled.");
        println!("To enable MCP, set 'mcp.enabled' to true in your configuration.");
        std::process::exit(1);
    }

    println!();
    println!("MCP Servers:");
    println!("{}", "=".repeat(80));
    let mut enabled_count = 0;
    for (id, server) in config.mcp_servers() {
        let status = if server.enabled {
            enabled_count += 1;
            "enabled"
        } else {
            "disabled"
        };
        println!();
        println!("{} ({status})", server.name);
        println!("  ID: {id}");
        println!("  Description: {}", server.description);
        println!("  Command: {} {}", server.command, server.args.join(" "));
        println!("  Type: {}", server.transport);
        println!("  Capabilities: {}", server.capabilities.join(", "));
        if !server.env.is_empty() {
            let keys: Vec<&str> = server.env.keys().map(String::as_str).collect();
            println!("  Environment: {}", keys.join(", "));
        }
    }
    println!();
    println!("{}", "=".repeat(80));
    println!(
        "Enabled servers: {enabled_count}/{}",
        config.mcp_servers().len()
    );
    println!();
    println!("To enable or disable a server:");
    println!("  clipilot mcp enable <server-id>");
    println!("  clipilot mcp disable <server-id>");
    Ok(())
}

/// Handle `clipilot mcp enable|disable <id>`.
pub fn handle_mcp_set_enabled(config: &mut Config, server_id: &str, enabled: bool) -> Result<()> {
    config.set_mcp_server_enabled(server_id, enabled)?;
    let name = config
        .mcp_servers()
        .get(server_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| server_id.to_string());
    let action = if enabled { "Enabled" } else { "Disabled" };
    println!("{action} MCP server: {name} ({server_id})");
    Ok(())
}
