use clap::builder::TypedValueParser as _;
use clap::Parser;
use directories::ProjectDirs;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Backend used when `BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Path under the backend origin where every API route lives.
pub const DEFAULT_API_ROOT: &str = "/api";

// Directory used when the platform reports no data directory at all.
const FALLBACK_DATA_DIR: &str = ".igams";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Origin of the IGAMS backend (scheme, host and port).
    #[arg(short, long, env, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Path prefix of the REST API on the backend.
    #[arg(long, env, default_value = DEFAULT_API_ROOT)]
    api_root: String,

    /// Directory holding the persisted session. Defaults to the platform's
    /// per-user data directory.
    #[arg(long, env)]
    data_dir: Option<PathBuf>,

    /// Timeout in seconds applied to every request to the backend
    #[arg(long, env, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Warn,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

/// Loads a `.env` file, if present, so every `env` flag can read it.
pub fn load_dotenv() {
    dotenv().ok();
}

impl Default for Config {
    fn default() -> Self {
        // Defaults plus whatever the environment provides, ignoring the
        // process's own command line.
        load_dotenv();
        Config::parse_from(["igams"])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        load_dotenv();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    pub fn set_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = Some(data_dir);
        self
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Base URL every API path is appended to, e.g. `http://localhost:8000/api`.
    pub fn api_base_url(&self) -> String {
        let origin = self.backend_url.trim_end_matches('/');
        let root = self.api_root.trim_matches('/');
        if root.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{root}")
        }
    }

    /// Directory for durable client state.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", "igams")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["igams"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn test_rust_env_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    #[serial]
    fn test_api_base_url_joins_origin_and_root() {
        let config = parse(&["--backend-url", "http://example.test:9000/", "--api-root", "/api/"]);
        assert_eq!(config.api_base_url(), "http://example.test:9000/api");
    }

    #[test]
    #[serial]
    fn test_api_base_url_with_empty_root() {
        let config = parse(&["--backend-url", "http://example.test", "--api-root", "/"]);
        assert_eq!(config.api_base_url(), "http://example.test");
    }

    #[test]
    #[serial]
    fn test_explicit_data_dir_wins() {
        let config = parse(&[]).set_data_dir(PathBuf::from("/tmp/igams-test"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/igams-test"));
    }

    #[test]
    #[serial]
    fn test_log_level_flag() {
        let config = parse(&["--log-level-filter", "DEBUG"]);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
