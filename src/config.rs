use std::{
    fmt, io,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;

use crate::model::{
    openai::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    profile::Profile,
};

const DEFAULT_TIMELINE_MAX_TOKENS: u32 = 1000;
const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Raw configuration as it comes from flags and the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// API key of the model service
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Directory for activity logs and saved timelines
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// Prompt, interval and token budget preset [default: detailed]
    #[arg(long, global = true, env = "SCREENLOG_PROFILE", value_enum)]
    pub profile: Option<Profile>,
    /// Seconds between captures. Overrides the profile
    #[arg(long, global = true)]
    pub interval_secs: Option<f64>,
    /// Token budget of a screenshot description. Overrides the profile
    #[arg(long, global = true)]
    pub describe_max_tokens: Option<u32>,
    /// Token budget of a timeline [default: 1000]
    #[arg(long, global = true)]
    pub timeline_max_tokens: Option<u32>,
    /// Model identifier [default: gpt-4o-mini]
    #[arg(long, global = true, env = "SCREENLOG_MODEL")]
    pub model: Option<String>,
    /// Base URL of an OpenAI compatible API
    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,
    /// JPEG quality of screenshots, 1-100 [default: 100]
    #[arg(long, global = true)]
    pub jpeg_quality: Option<u8>,
    /// Seconds to wait for a model answer. Waits forever by default
    #[arg(long, global = true)]
    pub request_timeout: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API key is missing. Set OPENAI_API_KEY or pass --api-key")]
    MissingApiKey,
    #[error("Log directory is missing. Set LOG_DIR or pass --log-dir")]
    MissingLogDir,
    #[error("Log directory {path:?} can't be used: {source}")]
    LogDir { path: PathBuf, source: io::Error },
    #[error("Interval must be a positive number of seconds, got {0}")]
    Interval(f64),
    #[error("JPEG quality must be within 1..=100, got {0}")]
    JpegQuality(u8),
    #[error("Token budget must be positive")]
    ZeroTokens,
}

/// Validated configuration. Built once at startup and handed to whoever needs it.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub log_dir: PathBuf,
    pub profile: Profile,
    pub interval: Duration,
    pub describe_max_tokens: u32,
    pub timeline_max_tokens: u32,
    pub model: String,
    pub base_url: String,
    pub jpeg_quality: u8,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let log_dir = args
            .log_dir
            .filter(|v| !v.as_os_str().is_empty())
            .ok_or(ConfigError::MissingLogDir)?;
        prepare_log_dir(&log_dir)?;

        let profile = args.profile.unwrap_or(Profile::Detailed);

        let interval = match args.interval_secs {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|v| !v.is_zero())
                .ok_or(ConfigError::Interval(secs))?,
            None => profile.interval(),
        };

        let describe_max_tokens = args
            .describe_max_tokens
            .unwrap_or_else(|| profile.describe_max_tokens());
        let timeline_max_tokens = args
            .timeline_max_tokens
            .unwrap_or(DEFAULT_TIMELINE_MAX_TOKENS);
        if describe_max_tokens == 0 || timeline_max_tokens == 0 {
            return Err(ConfigError::ZeroTokens);
        }

        let jpeg_quality = args.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY);
        if !(1..=100).contains(&jpeg_quality) {
            return Err(ConfigError::JpegQuality(jpeg_quality));
        }

        Ok(Self {
            api_key,
            log_dir,
            profile,
            interval,
            describe_max_tokens,
            timeline_max_tokens,
            model: args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: args.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            jpeg_quality,
            request_timeout: args.request_timeout.map(Duration::from_secs),
        })
    }
}

fn prepare_log_dir(path: &Path) -> Result<(), ConfigError> {
    let to_error = |source| ConfigError::LogDir {
        path: path.to_path_buf(),
        source,
    };
    std::fs::create_dir_all(path).map_err(to_error)?;
    if !std::fs::metadata(path).map_err(to_error)?.is_dir() {
        return Err(to_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    Ok(())
}

// The key must never end up in diagnostics.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("log_dir", &self.log_dir)
            .field("profile", &self.profile)
            .field("interval", &self.interval)
            .field("describe_max_tokens", &self.describe_max_tokens)
            .field("timeline_max_tokens", &self.timeline_max_tokens)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
