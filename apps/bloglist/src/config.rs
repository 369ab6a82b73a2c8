use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use client_core::{SortOrder, DEFAULT_SERVER_URL};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "bloglist.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub session_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub sort_order: SortOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            session_dir: default_session_dir(),
            request_timeout_secs: 30,
            sort_order: SortOrder::default(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn apply_overrides(&mut self, server_url: Option<String>, session_dir: Option<PathBuf>) {
        if let Some(v) = server_url {
            self.server_url = v;
        }
        if let Some(v) = session_dir {
            self.session_dir = v;
        }
    }
}

fn default_session_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("bloglist"))
        .unwrap_or_else(|| PathBuf::from(".bloglist"))
}

/// Defaults, then the toml file at `path` (if readable), then the environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let table = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "config: ignoring unparsable settings file");
            return;
        }
    };

    if let Some(v) = table.get("server_url").and_then(|v| v.as_str()) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = table.get("session_dir").and_then(|v| v.as_str()) {
        settings.session_dir = PathBuf::from(v);
    }
    if let Some(v) = table.get("request_timeout_secs").and_then(|v| v.as_integer()) {
        match u64::try_from(v) {
            Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
            _ => warn!(value = v, "config: ignoring non-positive request_timeout_secs"),
        }
    }
    if let Some(v) = table.get("sort_order").and_then(|v| v.as_str()) {
        apply_sort_order(settings, v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("BLOGLIST_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__SESSION_DIR") {
        settings.session_dir = PathBuf::from(v);
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
            _ => warn!(value = %v, "config: ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = var("APP__SORT_ORDER") {
        apply_sort_order(settings, &v);
    }
}

fn apply_sort_order(settings: &mut Settings, raw: &str) {
    match raw.parse::<SortOrder>() {
        Ok(order) => settings.sort_order = order,
        Err(err) => warn!(error = %err, "config: keeping default sort order"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
