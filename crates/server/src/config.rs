use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use server_api::ApiContext;
use tracing::info;

const BUNDLED_CATALOGUE: &str = include_str!("../data/applications.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3001".into(),
            data_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let file_cfg = fs::read_to_string("server.toml")
        .ok()
        .and_then(|raw| toml::from_str::<HashMap<String, String>>(&raw).ok())
        .unwrap_or_default();
    let env: HashMap<String, String> = std::env::vars().collect();
    resolve_settings(&file_cfg, &env)
}

/// File values override defaults and environment values override both.
fn resolve_settings(
    file_cfg: &HashMap<String, String>,
    env: &HashMap<String, String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("data_path") {
        settings.data_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env.get("SERVER_BIND") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = env.get("APP__BIND_ADDR") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = env.get("APP__DATA_PATH") {
        let v = v.trim();
        settings.data_path = (!v.is_empty()).then(|| PathBuf::from(v));
    }

    settings
}

pub fn load_catalogue(settings: &Settings) -> anyhow::Result<ApiContext> {
    let Some(path) = &settings.data_path else {
        info!("serving bundled application catalogue");
        return ApiContext::from_json(BUNDLED_CATALOGUE);
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalogue '{}'", path.display()))?;
    let ctx = ApiContext::from_json(&raw)
        .with_context(|| format!("failed to parse catalogue '{}'", path.display()))?;
    info!(
        path = %path.display(),
        applications = ctx.applications.len(),
        "loaded application catalogue"
    );
    Ok(ctx)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
