use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A chat model selectable with `--model` or `set-model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub family: String,
    pub description: String,
    pub max_tokens: u32,
    pub supports_tools: bool,
    pub supports_vision: bool,
}

/// An agent persona selectable with `--agent` or `set-agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub capabilities: Vec<String>,
}

/// A registered MCP server. Registry only; nothing here spawns processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServer {
    pub name: String,
    pub description: String,
    pub command: String,
    pub args: Vec<String>,
    #[serde(rename = "type")]
    pub transport: String,
    pub enabled: bool,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub capabilities: Vec<String>,
}

fn model(
    name: &str,
    family: &str,
    description: &str,
    max_tokens: u32,
    supports_tools: bool,
    supports_vision: bool,
) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        family: family.to_string(),
        description: description.to_string(),
        max_tokens,
        supports_tools,
        supports_vision,
    }
}

pub(crate) fn default_models() -> BTreeMap<String, ModelInfo> {
    let mut models = BTreeMap::new();
    models.insert(
        "gpt-4.1-2025-04-14".to_string(),
        model(
            "GPT-4.1",
            "gpt-4.1",
            "Latest GPT-4.1 model with enhanced reasoning",
            4096,
            true,
            true,
        ),
    );
    models.insert(
        "gpt-4o-mini".to_string(),
        model(
            "GPT-4o Mini",
            "gpt-4o-mini",
            "Fast and efficient model for most tasks",
            16384,
            true,
            true,
        ),
    );
    models.insert(
        "claude-3.5-sonnet".to_string(),
        model(
            "Claude 3.5 Sonnet",
            "claude-3.5-sonnet",
            "Anthropic's Claude with excellent code understanding",
            8192,
            true,
            true,
        ),
    );
    models.insert(
        "claude-3.7-sonnet".to_string(),
        model(
            "Claude 3.7 Sonnet",
            "claude-3.7-sonnet",
            "Latest Claude model with thinking capabilities",
            8192,
            true,
            true,
        ),
    );
    models.insert(
        "gemini-2.0-flash-001".to_string(),
        model(
            "Gemini 2.0 Flash",
            "gemini-2.0-flash",
            "Google's fast and capable Gemini model",
            8192,
            true,
            true,
        ),
    );
    models.insert(
        "o1".to_string(),
        model(
            "OpenAI o1",
            "o1",
            "Advanced reasoning model for complex problems",
            32768,
            false,
            false,
        ),
    );
    models.insert(
        "o1-mini".to_string(),
        model(
            "OpenAI o1-mini",
            "o1-mini",
            "Smaller reasoning model for faster responses",
            65536,
            false,
            false,
        ),
    );
    models
}

fn agent(name: &str, description: &str, icon: &str, capabilities: &[&str]) -> AgentInfo {
    AgentInfo {
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
    }
}

pub(crate) fn default_agents() -> BTreeMap<String, AgentInfo> {
    let mut agents = BTreeMap::new();
    agents.insert(
        "workspace".to_string(),
        agent(
            "Workspace Agent",
            "Specializes in workspace-wide operations, file analysis, and project understanding",
            "code",
            &[
                "file_analysis",
                "workspace_context",
                "project_structure",
                "code_navigation",
            ],
        ),
    );
    agents.insert(
        "vscode".to_string(),
        agent(
            "VS Code Agent",
            "Helps with VS Code features, extensions, settings, and editor functionality",
            "vscode",
            &[
                "editor_features",
                "extension_help",
                "settings_config",
                "debugging",
            ],
        ),
    );
    agents.insert(
        "terminal".to_string(),
        agent(
            "Terminal Agent",
            "Assists with command-line operations, shell commands, and terminal workflows",
            "terminal",
            &[
                "shell_commands",
                "command_line",
                "scripting",
                "process_management",
            ],
        ),
    );
    agents.insert(
        "agent".to_string(),
        agent(
            "Agent Mode",
            "Autonomous multi-step task execution with tool calling capabilities",
            "copilot",
            &[
                "autonomous_tasks",
                "tool_calling",
                "multi_step_planning",
                "mcp_integration",
            ],
        ),
    );
    agents
}

pub(crate) fn default_mcp_servers() -> BTreeMap<String, McpServer> {
    let mut servers = BTreeMap::new();
    servers.insert(
        "filesystem".to_string(),
        McpServer {
            name: "Filesystem MCP Server".to_string(),
            description: "Provides file system operations".to_string(),
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-filesystem".to_string(),
                "/".to_string(),
            ],
            transport: "stdio".to_string(),
            enabled: true,
            env: BTreeMap::new(),
            capabilities: vec![
                "file_read".to_string(),
                "file_write".to_string(),
                "directory_list".to_string(),
            ],
        },
    );
    servers.insert(
        "brave-search".to_string(),
        McpServer {
            name: "Brave Search MCP Server".to_string(),
            description: "Web search capabilities via Brave Search".to_string(),
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-brave-search".to_string(),
            ],
            transport: "stdio".to_string(),
            enabled: false,
            env: BTreeMap::from([(
                "BRAVE_API_KEY".to_string(),
                "${env:BRAVE_API_KEY}".to_string(),
            )]),
            capabilities: vec!["web_search".to_string(), "search_results".to_string()],
        },
    );
    servers.insert(
        "github".to_string(),
        McpServer {
            name: "GitHub MCP Server".to_string(),
            description: "GitHub repository operations".to_string(),
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-github".to_string(),
            ],
            transport: "stdio".to_string(),
            enabled: false,
            env: BTreeMap::from([(
                "GITHUB_PERSONAL_ACCESS_TOKEN".to_string(),
                "${env:GITHUB_TOKEN}".to_string(),
            )]),
            capabilities: vec![
                "repo_access".to_string(),
                "issue_management".to_string(),
                "pr_operations".to_string(),
            ],
        },
    );
    servers
}
