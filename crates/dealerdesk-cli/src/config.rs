// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use dealerdesk_app::{ReportId, UserId};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "dealerdesk";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_AUTOSAVE_DELAY: &str = "300ms";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            report: Report::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub user_id: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            user_id: None,
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub autosave_delay: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            autosave_delay: Some(DEFAULT_AUTOSAVE_DELAY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("DEALERDESK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set DEALERDESK_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and keep values under [api], [report], [ui], and [log]",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.api.base_url
            && base_url.trim().is_empty()
        {
            bail!("api.base_url in {} must not be empty", path.display());
        }
        if let Some(user_id) = &self.api.user_id
            && user_id.trim().is_empty()
        {
            bail!(
                "api.user_id in {} must not be empty -- remove it or set your dealer user id",
                path.display()
            );
        }

        for (key, value) in [
            ("api.timeout", &self.api.timeout),
            ("ui.autosave_delay", &self.ui.autosave_delay),
        ] {
            if let Some(raw) = value {
                let parsed = parse_duration(raw)
                    .with_context(|| format!("{key} in {}", path.display()))?;
                if parsed.is_zero() {
                    bail!(
                        "{key} in {} must be positive, got {raw}",
                        path.display()
                    );
                }
            }
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {level:?}",
                path.display(),
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn user_id(&self) -> Result<UserId> {
        self.api
            .user_id
            .as_deref()
            .map(UserId::new)
            .ok_or_else(|| anyhow!("api.user_id is not set -- add it under [api] in the config"))
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn autosave_delay(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .autosave_delay
                .as_deref()
                .unwrap_or(DEFAULT_AUTOSAVE_DELAY),
        )
    }

    /// `--report` wins over `[report].id`.
    pub fn report_id(&self, cli_override: Option<&str>) -> Result<ReportId> {
        cli_override
            .or(self.report.id.as_deref())
            .filter(|id| !id.trim().is_empty())
            .map(ReportId::new)
            .ok_or_else(|| anyhow!("no report selected -- pass --report <id> or set [report].id"))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file to a writable path")
        })?;
        let app_dir = data_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create data directory {}", app_dir.display()))?;
        Ok(app_dir.join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# dealerdesk config\n# Place this file at: {}\n\nversion = 1\n\n[api]\nbase_url = \"{}\"\n# Dealer user whose column catalog is offered; required outside --demo.\n# user_id = \"\"\ntimeout = \"{}\"\n\n[report]\n# Report whose columns are edited; --report overrides.\n# id = \"\"\n\n[ui]\n# Quiet period before a column change is saved.\nautosave_delay = \"{}\"\n\n[log]\n# off, error, warn, info, debug or trace; DEALERDESK_LOG overrides.\nlevel = \"{}\"\n# file = \"/absolute/path/to/dealerdesk.log\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_AUTOSAVE_DELAY,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let (digits, scale) = if let Some(value) = raw.strip_suffix("ms") {
        (value, Duration::from_millis(1))
    } else if let Some(value) = raw.strip_suffix('s') {
        (value, Duration::from_secs(1))
    } else if let Some(value) = raw.strip_suffix('m') {
        (value, Duration::from_secs(60))
    } else {
        bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 300ms or 5s)")
    };

    let count: u32 = digits
        .parse()
        .with_context(|| format!("invalid duration {raw:?}"))?;
    Ok(scale * count)
}
