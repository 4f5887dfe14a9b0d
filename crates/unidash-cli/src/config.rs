// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use unidash_app::{Locale, ProvinceFilter};

use crate::logging;

pub const APP_NAME: &str = "unidash";
pub const CONFIG_PATH_ENV: &str = "UNIDASH_CONFIG_PATH";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "unidash.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            data: Data::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub locale: Option<String>,
    pub province: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
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
                    "config file {} is not versioned. Add `version = 1` and keep values under [ui], [data], and [log]",
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
        if let Some(locale) = &self.ui.locale
            && Locale::parse(locale).is_none()
        {
            bail!(
                "ui.locale in {} must be \"en\" or \"fr\", got {:?}",
                path.display(),
                locale
            );
        }

        if let Some(province) = &self.ui.province
            && province.trim().is_empty()
        {
            bail!(
                "ui.province in {} must be a province name or \"All\"",
                path.display()
            );
        }

        if let Some(data_path) = &self.data.path
            && data_path.trim().is_empty()
        {
            bail!(
                "data.path in {} must not be empty; remove it to use the built-in dataset",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            logging::parse_filter(level)
                .with_context(|| format!("invalid log.level in {}", path.display()))?;
        }

        if let Some(log_path) = &self.log.path
            && log_path.trim().is_empty()
        {
            bail!("log.path in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn locale(&self) -> Locale {
        self.ui
            .locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or_default()
    }

    pub fn province(&self) -> ProvinceFilter {
        self.ui
            .province
            .as_deref()
            .map(|province| ProvinceFilter::parse(province.trim()))
            .unwrap_or_default()
    }

    /// `None` means the built-in dataset.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.data.path.as_ref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }

        let cache_root = dirs::cache_dir()
            .ok_or_else(|| anyhow!("cannot resolve cache directory; set [log].path"))?;
        Ok(cache_root.join(APP_NAME).join(LOG_FILE_NAME))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# unidash config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# en | fr\nlocale = \"en\"\n# \"All\" or a province exactly as it appears in the dataset\nprovince = \"All\"\n\n[data]\n# Optional. Default is the built-in dataset.\n# path = \"/absolute/path/to/universities.json\"\n\n[log]\n# tracing filter directive; {} overrides it\nlevel = \"{}\"\n# Optional. Default is the platform cache dir (for example ~/.cache/unidash/{})\n# path = \"/absolute/path/to/unidash.log\"\n",
            path.display(),
            logging::LOG_ENV,
            DEFAULT_LOG_LEVEL,
            LOG_FILE_NAME,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use unidash_app::{Locale, ProvinceFilter};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.locale(), Locale::En);
        assert_eq!(config.province(), ProvinceFilter::All);
        assert_eq!(config.dataset_path(), None);
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nlocale = \"fr\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui], [data], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nlocale = \"FR\"\nprovince = \"Quebec\"\n[data]\npath = \"/srv/unidash/universities.json\"\n[log]\nlevel = \"unidash_app=debug,info\"\npath = \"/tmp/unidash-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.locale(), Locale::Fr);
        assert_eq!(config.province(), ProvinceFilter::parse("Quebec"));
        assert_eq!(
            config.dataset_path(),
            Some(PathBuf::from("/srv/unidash/universities.json"))
        );
        assert_eq!(config.log_level(), "unidash_app=debug,info");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/unidash-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_locale_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nlocale = \"de\"\n")?;
        let error = Config::load(&path).expect_err("unknown locale should fail");
        assert!(error.to_string().contains("ui.locale"));
        Ok(())
    }

    #[test]
    fn empty_paths_and_provinces_are_rejected() -> Result<()> {
        for content in [
            "version = 1\n[ui]\nprovince = \"  \"\n",
            "version = 1\n[data]\npath = \"\"\n",
            "version = 1\n[log]\npath = \"\"\n",
        ] {
            let (_temp, path) = write_config(content)?;
            let error = Config::load(&path).expect_err("empty value should fail");
            assert!(
                error.to_string().contains("must"),
                "unexpected message: {error}"
            );
        }
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"unidash=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad directive should fail");
        assert!(error.to_string().contains("invalid log.level"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("unidash/config.toml"));
        Ok(())
    }

    #[test]
    fn log_path_defaults_to_cache_dir() -> Result<()> {
        let config = Config::default();
        let path = config.log_path()?;
        assert!(path.ends_with("unidash/unidash.log"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn example_config_loads_and_names_every_section() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[data]"));
        assert!(example.contains("[log]"));
        assert!(example.contains("UNIDASH_LOG"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.locale(), Locale::En);
        assert_eq!(config.province(), ProvinceFilter::All);
        Ok(())
    }
}
