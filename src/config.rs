use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};

/// File name of the database inside the config directory
const DATABASE_FILE_NAME: &str = "lostfound.db";

/// Configuration for the lostfound server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Duration between periodic backups in minutes
    pub backup_interval_minutes: u64,
    /// Number of periodic backups to keep
    pub backup_count: u32,
    /// Directory the backups are written to
    pub backup_dir: PathBuf,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the listening port
    #[serde(default)]
    pub port: Option<u16>,
    /// Optional update for backup interval (in minutes)
    #[serde(default)]
    pub backup_interval_minutes: Option<u64>,
    /// Optional update for backup count
    #[serde(default)]
    pub backup_count: Option<u32>,
    /// Optional update for the backup directory
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    /// Server URL used by the CLI client; the server ignores it
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug)]
#[clap(name = "lostfound", about = "Lost-and-found tracking server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Port to listen on
    #[clap(long, env = "LOSTFOUND_PORT")]
    pub port: Option<u16>,

    /// Backup interval in minutes (0 disables backups)
    #[clap(long, env = "BACKUP_INTERVAL_MINUTES")]
    pub backup_interval_minutes: Option<u64>,

    /// Number of backups to keep (0 disables backups)
    #[clap(long, env = "BACKUP_COUNT")]
    pub backup_count: Option<u32>,

    /// Directory to write backups to
    #[clap(long, env = "BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Debug mode
    #[clap(long, env = "LOSTFOUND_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            port: update.port.unwrap_or(self.port),
            backup_interval_minutes: update.backup_interval_minutes.unwrap_or(self.backup_interval_minutes),
            backup_count: update.backup_count.unwrap_or(self.backup_count),
            backup_dir: update.backup_dir.unwrap_or(self.backup_dir),
        }
    }

    /// Returns the backup interval as a Duration
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup_interval_minutes.saturating_mul(60))
    }

    /// Whether periodic backups should run at all
    pub fn backups_enabled(&self) -> bool {
        self.backup_interval_minutes > 0 && self.backup_count > 0
    }
}

/// Default port: 3001 for debug builds so a development server can run next to a release one
pub fn default_port() -> u16 {
    if cfg!(debug_assertions) { 3001 } else { 3000 }
}

/// Returns the base (default) configuration
///
/// When a config directory is known, the database and backups live inside it;
/// otherwise they are placed relative to the working directory.
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.as_ref().map_or(DATABASE_FILE_NAME.to_string(), |path| {
        path.join(DATABASE_FILE_NAME).to_string_lossy().to_string()
    });
    let backup_dir = config_path.map_or(PathBuf::from("backups"), |path| path.join("backups"));

    Config {
        database_url,
        port: default_port(),
        backup_interval_minutes: 20,
        backup_count: 10,
        backup_dir,
    }
}

/// Returns the platform config directory for lostfound, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "lostfound", "lostfound") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Returns the directory log files are written to, if one can be determined
pub fn get_log_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "lostfound", "lostfound").map(|proj_dirs| proj_dirs.data_dir().join("logs"))
}

/// Loads configuration from a TOML file
///
/// A missing path or file yields an empty update; an unreadable or invalid
/// file is an error.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        port: args.port,
        backup_interval_minutes: args.backup_interval_minutes,
        backup_count: args.backup_count,
        backup_dir: args.backup_dir,
        server_url: None,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_path = get_config_dir_path().and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path)
        }
    });

    let base = base_config(config_path.clone());
    let file_update = config_from_file(config_path.map(|path| path.join("config.toml")))
        .unwrap_or_default();

    let config = base
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    info!("Final configuration: database_url={}, port={}, backup_interval={}min, backup_count={}, backup_dir={:?}",
          config.database_url, config.port, config.backup_interval_minutes, config.backup_count, config.backup_dir);

    config
}
