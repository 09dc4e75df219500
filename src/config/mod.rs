//! Configuration persisted as JSON under `~/.clipilot/`.

pub mod registry;

pub use registry::{AgentInfo, McpServer, ModelInfo};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClipilotError, Result};

const CONFIG_FILE: &str = "config.json";

/// Configuration for clipilot, loaded from and saved to a single JSON file.
///
/// Loading merges the file over built-in defaults (missing sections and
/// fields fall back individually), so config files from older versions keep
/// working.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigData {
    pub version: String,
    pub auth: AuthSection,
    pub chat: ChatSection,
    pub mcp: McpSection,
    pub workspace: WorkspaceSection,
    pub ui: UiSection,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            auth: AuthSection::default(),
            chat: ChatSection::default(),
            mcp: McpSection::default(),
            workspace: WorkspaceSection::default(),
            ui: UiSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub token: Option<String>,
    pub token_type: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            token: None,
            token_type: "github_copilot".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    pub default_agent: String,
    pub default_model: String,
    pub temperature: f32,
    pub max_context_size: u32,
    pub available_agents: BTreeMap<String, AgentInfo>,
    pub available_models: BTreeMap<String, ModelInfo>,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            default_agent: "workspace".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_context_size: 4096,
            available_agents: registry::default_agents(),
            available_models: registry::default_models(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpSection {
    pub enabled: bool,
    pub servers: BTreeMap<String, McpServer>,
}

impl Default for McpSection {
    fn default() -> Self {
        Self {
            enabled: true,
            servers: registry::default_mcp_servers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSection {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_file_size: u64,
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            include_patterns: ["*.py", "*.js", "*.ts", "*.java", "*.cpp", "*.c", "*.h"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            exclude_patterns: ["node_modules/**", ".git/**", "__pycache__/**", "*.pyc"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_file_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub color_output: bool,
    pub show_typing_indicator: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            color_output: true,
            show_typing_indicator: true,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults; an unreadable or corrupt file logs a
    /// warning and also yields defaults rather than aborting.
    pub fn load(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_config_path);
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<ConfigData>(&raw) {
                Ok(data) => data,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "corrupt config, using defaults");
                    ConfigData::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => ConfigData::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable config, using defaults");
                ConfigData::default()
            }
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &ConfigData {
        &self.data
    }

    /// Write the config file, creating parent directories as needed.
    /// The file holds the provider token, so permissions are tightened.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    // -- auth ---------------------------------------------------------------

    pub fn token(&self) -> Option<&str> {
        self.data.auth.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        self.data.auth.token = token;
        self.save()
    }

    pub fn is_configured(&self) -> bool {
        self.data.auth.token.is_some()
    }

    // -- models -------------------------------------------------------------

    pub fn default_model(&self) -> &str {
        &self.data.chat.default_model
    }

    pub fn model_info(&self, model_id: &str) -> Option<&ModelInfo> {
        self.data.chat.available_models.get(model_id)
    }

    pub fn models(&self) -> &BTreeMap<String, ModelInfo> {
        &self.data.chat.available_models
    }

    pub fn set_default_model(&mut self, model_id: &str) -> Result<()> {
        if !self.data.chat.available_models.contains_key(model_id) {
            return Err(ClipilotError::InvalidArgument(format!(
                "unknown model '{model_id}' (available: {})",
                self.model_ids().join(", ")
            )));
        }
        self.data.chat.default_model = model_id.to_string();
        self.save()
    }

    pub fn model_ids(&self) -> Vec<String> {
        self.data.chat.available_models.keys().cloned().collect()
    }

    // -- agents -------------------------------------------------------------

    pub fn default_agent(&self) -> &str {
        &self.data.chat.default_agent
    }

    pub fn agent_info(&self, agent_id: &str) -> Option<&AgentInfo> {
        self.data.chat.available_agents.get(agent_id)
    }

    pub fn agents(&self) -> &BTreeMap<String, AgentInfo> {
        &self.data.chat.available_agents
    }

    pub fn set_default_agent(&mut self, agent_id: &str) -> Result<()> {
        if !self.data.chat.available_agents.contains_key(agent_id) {
            return Err(ClipilotError::InvalidArgument(format!(
                "unknown agent '{agent_id}' (available: {})",
                self.agent_ids().join(", ")
            )));
        }
        self.data.chat.default_agent = agent_id.to_string();
        self.save()
    }

    pub fn agent_ids(&self) -> Vec<String> {
        self.data.chat.available_agents.keys().cloned().collect()
    }

    // -- mcp ----------------------------------------------------------------

    pub fn mcp_enabled(&self) -> bool {
        self.data.mcp.enabled
    }

    pub fn mcp_servers(&self) -> &BTreeMap<String, McpServer> {
        &self.data.mcp.servers
    }

    pub fn set_mcp_server_enabled(&mut self, server_id: &str, enabled: bool) -> Result<()> {
        let server = self.data.mcp.servers.get_mut(server_id).ok_or_else(|| {
            ClipilotError::InvalidArgument(format!("unknown MCP server '{server_id}'"))
        })?;
        server.enabled = enabled;
        self.save()
    }
}

fn default_config_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".clipilot"))
        .unwrap_or_else(|| PathBuf::from(".clipilot"))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("config.json")));
        (dir, config)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_dir, config) = temp_config();
        assert_eq!(config.default_model(), "gpt-4o-mini");
        assert_eq!(config.default_agent(), "workspace");
        assert!(config.token().is_none());
        assert!(!config.is_configured());
    }

    #[test]
    fn token_round_trip() {
        let (dir, mut config) = temp_config();
        config.set_token(Some("gho_abc".to_string())).unwrap();

        let reloaded = Config::load(Some(dir.path().join("config.json")));
        assert_eq!(reloaded.token(), Some("gho_abc"));
        assert!(reloaded.is_configured());
    }

    #[test]
    fn clearing_token_persists() {
        let (dir, mut config) = temp_config();
        config.set_token(Some("gho_abc".to_string())).unwrap();
        config.set_token(None).unwrap();

        let reloaded = Config::load(Some(dir.path().join("config.json")));
        assert!(reloaded.token().is_none());
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"chat": {"default_model": "o1-mini"}}"#).unwrap();

        let config = Config::load(Some(path));
        assert_eq!(config.default_model(), "o1-mini");
        // untouched sections keep their defaults
        assert_eq!(config.default_agent(), "workspace");
        assert!(config.model_info("claude-3.5-sonnet").is_some());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = Config::load(Some(path));
        assert_eq!(config.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn set_default_model_rejects_unknown() {
        let (_dir, mut config) = temp_config();
        let result = config.set_default_model("made-up-model");
        assert!(matches!(result, Err(ClipilotError::InvalidArgument(_))));
        assert_eq!(config.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn set_default_model_accepts_known() {
        let (dir, mut config) = temp_config();
        config.set_default_model("claude-3.5-sonnet").unwrap();

        let reloaded = Config::load(Some(dir.path().join("config.json")));
        assert_eq!(reloaded.default_model(), "claude-3.5-sonnet");
    }

    #[test]
    fn set_default_agent_rejects_unknown() {
        let (_dir, mut config) = temp_config();
        assert!(config.set_default_agent("nonexistent").is_err());
    }

    #[test]
    fn mcp_enable_disable_round_trip() {
        let (dir, mut config) = temp_config();
        assert!(config.mcp_servers()["filesystem"].enabled);
        config.set_mcp_server_enabled("filesystem", false).unwrap();

        let reloaded = Config::load(Some(dir.path().join("config.json")));
        assert!(!reloaded.mcp_servers()["filesystem"].enabled);
    }

    #[test]
    fn mcp_unknown_server_is_rejected() {
        let (_dir, mut config) = temp_config();
        assert!(config.set_mcp_server_enabled("bogus", true).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn saved_config_is_user_only() {
        use std::os::unix::fs::PermissionsExt;
        let (dir, mut config) = temp_config();
        config.set_token(Some("gho_abc".to_string())).unwrap();

        let mode = fs::metadata(dir.path().join("config.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
