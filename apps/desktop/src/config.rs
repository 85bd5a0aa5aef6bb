use std::{collections::HashMap, fs, io, num::NonZeroU32, path::Path, time::Duration};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use shared::protocol::MAX_LIMIT;

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: NonZeroU32,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3001".into(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

pub fn load_settings(config_path: &Path, cli: &CliOverrides) -> Result<Settings> {
    let file_cfg = match fs::read_to_string(config_path) {
        Ok(raw) => toml::from_str::<FileConfig>(&raw)
            .with_context(|| format!("invalid config file '{}'", config_path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => FileConfig::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", config_path.display()))
        }
    };
    let env: HashMap<String, String> = std::env::vars().collect();
    resolve_settings(file_cfg, &env, cli)
}

fn resolve_settings(
    file_cfg: FileConfig,
    env: &HashMap<String, String>,
    cli: &CliOverrides,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = positive_page_size(v, "page_size in config file")?;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(v);
    }

    if let Some(v) = env.get("APP__API_URL") {
        settings.api_url = v.clone();
    }
    if let Some(v) = env.get("APP__PAGE_SIZE") {
        let parsed = v
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("APP__PAGE_SIZE must be a positive integer, got '{v}'"))?;
        settings.page_size = positive_page_size(parsed, "APP__PAGE_SIZE")?;
    }
    if let Some(v) = env.get("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v.trim().parse::<u64>().map_err(|_| {
            anyhow!("APP__REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{v}'")
        })?;
        settings.request_timeout = Duration::from_secs(secs);
    }

    if let Some(v) = &cli.api_url {
        settings.api_url = v.clone();
    }
    if let Some(v) = cli.page_size {
        settings.page_size = positive_page_size(v, "--page-size")?;
    }
    if let Some(v) = cli.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(v);
    }

    Ok(settings)
}

/// The listing endpoint rejects `_limit` above [`MAX_LIMIT`], so larger sizes are refused here.
fn positive_page_size(value: u32, source: &str) -> Result<NonZeroU32> {
    if value > MAX_LIMIT {
        return Err(anyhow!("{source} must be at most {MAX_LIMIT}, got {value}"));
    }
    NonZeroU32::new(value).ok_or_else(|| anyhow!("{source} must be greater than zero"))
}
