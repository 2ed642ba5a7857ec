use std::{collections::HashMap, fs, path::Path};

use client_core::{BinderOptions, SubmitPolicy};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub submit_policy: SubmitPolicy,
    pub dedupe_likes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            submit_policy: SubmitPolicy::FireAndForget,
            dedupe_likes: true,
        }
    }
}

impl Settings {
    pub fn binder_options(&self) -> BinderOptions {
        BinderOptions {
            submit_policy: self.submit_policy,
            dedupe_likes: self.dedupe_likes,
        }
    }
}

/// Defaults, then `path` if it exists, then the environment.
pub fn load_settings(path: &Path) -> Settings {
    let file = fs::read_to_string(path).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    settings.server_url = v.clone();
                }
                if let Some(v) = file_cfg.get("submit_policy") {
                    apply_submit_policy(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("dedupe_likes") {
                    apply_dedupe_likes(&mut settings, v);
                }
            }
            Err(err) => warn!("ignoring unreadable config file: {err}"),
        }
    }

    if let Some(v) = env("WARBLER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SUBMIT_POLICY") {
        apply_submit_policy(&mut settings, &v);
    }
    if let Some(v) = env("APP__DEDUPE_LIKES") {
        apply_dedupe_likes(&mut settings, &v);
    }

    settings
}

fn apply_submit_policy(settings: &mut Settings, raw: &str) {
    match raw.parse() {
        Ok(policy) => settings.submit_policy = policy,
        Err(err) => warn!("{err}; keeping {}", settings.submit_policy),
    }
}

fn apply_dedupe_likes(settings: &mut Settings, raw: &str) {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => settings.dedupe_likes = true,
        "0" | "false" | "no" | "off" => settings.dedupe_likes = false,
        other => warn!("invalid dedupe_likes value {other:?}; keeping {}", settings.dedupe_likes),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
