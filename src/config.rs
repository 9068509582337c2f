use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default base URL of the ReSim API
pub const DEFAULT_API_URL: &str = "https://api.resim.ai/v1/";

/// Default base URL of the authorization server
pub const DEFAULT_AUTH_URL: &str = "https://resim.us.auth0.com/";

/// Directory under the user's home holding the config file and token cache
pub const CONFIG_DIR: &str = ".resim";

const CONFIG_FILE: &str = "config.toml";
const CACHE_FILE: &str = "cache.json";

/// Connection options shared by every command.
///
/// clap resolves flag over environment; anything still unset falls back to
/// the config file and then to the built-in defaults in [`Config::resolve`].
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Base URL of the ReSim API
    #[arg(long, env = "RESIM_URL", global = true)]
    pub url: Option<String>,

    /// Base URL of the authorization server
    #[arg(long, env = "RESIM_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// OAuth2 client ID
    #[arg(long, env = "RESIM_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "RESIM_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Path to the config file (defaults to ~/.resim/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Optional on-disk settings, lowest precedence above the defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub url: Option<String>,
    pub auth_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl FileConfig {
    /// Load the config file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// Fully resolved view of the recognized options
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub cache_path: PathBuf,
}

impl Config {
    /// Directory holding `config.toml` and `cache.json`
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .context("Failed to get home directory")?
            .join(CONFIG_DIR))
    }

    /// Merge flags/environment, the config file, and defaults.
    ///
    /// Credentials may come out empty here; they are checked when the API
    /// client is built so commands that fail validation earlier never need them.
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let config_dir = Self::config_dir()?;
        let file_path = args
            .config
            .clone()
            .unwrap_or_else(|| config_dir.join(CONFIG_FILE));
        let file = FileConfig::load(&file_path)?;

        Ok(Self::merge(args, file, config_dir.join(CACHE_FILE)))
    }

    fn merge(args: &GlobalArgs, file: FileConfig, cache_path: PathBuf) -> Self {
        let pick = |flag: &Option<String>, from_file: Option<String>| {
            flag.clone().filter(|v| !v.is_empty()).or(from_file)
        };

        let config = Self {
            api_url: pick(&args.url, file.url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            auth_url: pick(&args.auth_url, file.auth_url)
                .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            client_id: pick(&args.client_id, file.client_id).unwrap_or_default(),
            client_secret: pick(&args.client_secret, file.client_secret).unwrap_or_default(),
            cache_path,
        };

        debug!(
            "Resolved config: url={} auth_url={} client_id={}",
            config.api_url, config.auth_url, config.client_id
        );
        config
    }
}
