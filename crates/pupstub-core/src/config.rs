use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used for the project-level config
pub const PROJECT_CONFIG_FILE: &str = ".pupstub.toml";

/// Global pupstub configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reply socket configuration
    pub socket: SocketConfig,

    /// Child process launched by `pupstub launch`
    pub launcher: LauncherConfig,

    /// Operator prompt
    pub prompt: PromptConfig,

    /// Request/reply transcript
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// Loopback address to bind; the port is always chosen by the OS
    pub host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Program and arguments for the add-on under test
    pub command: Vec<String>,

    /// Client log file name, resolved against the current directory
    pub log_file: PathBuf,

    /// Ask the add-on to print watchdog ticks
    pub watchdog: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Marker printed before each response field
    pub marker: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Append every request and reply to this file (disabled when unset)
    pub path: Option<PathBuf>,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "gnome-terminal".into(),
                "-x".into(),
                "cfx".into(),
                "run".into(),
            ],
            log_file: PathBuf::from("puppeteer-client-log.txt"),
            watchdog: false,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            marker: "--> ".into(),
        }
    }
}

impl Config {
    /// Load config from default locations (in order of precedence):
    /// 1. $PWD/.pupstub.toml
    /// 2. $XDG_CONFIG_HOME/pupstub/config.toml
    /// 3. Built-in defaults
    ///
    /// A file that exists but cannot be parsed is an error rather than a
    /// silent fall-through to the next layer.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layered(Path::new("."), dirs::config_dir().as_deref())
    }

    /// Layered lookup with explicit project and user config directories
    pub fn load_layered(
        project_dir: &Path,
        user_config_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut candidates = vec![project_dir.join(PROJECT_CONFIG_FILE)];
        if let Some(config_dir) = user_config_dir {
            candidates.push(config_dir.join("pupstub").join("config.toml"));
        }

        for path in candidates {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let config = toml::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The `tcp://` endpoint to bind, with port 0 so the OS picks one
    pub fn bind_endpoint(&self) -> String {
        format!("tcp://{}:0", self.socket.host)
    }

    /// Absolute path handed to the add-on as `PUPPETEER_LOG`
    pub fn client_log_path(&self) -> std::io::Result<PathBuf> {
        if self.launcher.log_file.is_absolute() {
            return Ok(self.launcher.log_file.clone());
        }
        Ok(std::env::current_dir()?.join(&self.launcher.log_file))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
