use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use url::Url;

use crate::notifications::DEFAULT_NOTIFICATION_TTL;

pub const SETTINGS_FILE: &str = "negotiation_desk.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("server url '{url}' is not valid: {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub download_dir: Option<PathBuf>,
    pub notification_ttl: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            download_dir: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl ClientSettings {
    pub fn validated_server_url(&self) -> Result<Url, SettingsError> {
        let url = Url::parse(self.server_url.trim()).map_err(|source| {
            SettingsError::InvalidServerUrl {
                url: self.server_url.clone(),
                source,
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(self.server_url.clone()));
        }
        Ok(url)
    }
}

/// Defaults, then `negotiation_desk.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(file: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => {
                tracing::warn!(file = %file.display(), "ignoring unreadable settings file: {err}")
            }
        }
    }

    if let Some(v) = env("NEGOTIATION_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("NEGOTIATION_DOWNLOAD_DIR") {
        settings.download_dir = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__NOTIFICATION_TTL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.notification_ttl = Duration::from_secs(parsed);
        }
    }

    settings
}

fn apply_file_values(settings: &mut ClientSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("download_dir").and_then(toml::Value::as_str) {
        settings.download_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg
        .get("notification_ttl_secs")
        .and_then(toml::Value::as_integer)
    {
        if let Ok(secs) = u64::try_from(v) {
            settings.notification_ttl = Duration::from_secs(secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("negotiation_desk_settings_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        let settings = load_settings_from(Path::new("/definitely/missing.toml"), |_| None);
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn file_values_then_env_overrides() {
        let path = temp_file(
            "server_url = \"http://file:8000\"\ndownload_dir = \"/tmp/reports\"\nnotification_ttl_secs = 9\n",
        );

        let from_file = load_settings_from(&path, |_| None);
        assert_eq!(from_file.server_url, "http://file:8000");
        assert_eq!(from_file.download_dir, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(from_file.notification_ttl, Duration::from_secs(9));

        let overridden = load_settings_from(&path, |name| match name {
            "NEGOTIATION_SERVER_URL" => Some("http://legacy:1".to_string()),
            "APP__SERVER_URL" => Some("http://app:2".to_string()),
            "APP__NOTIFICATION_TTL_SECS" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(overridden.server_url, "http://app:2");
        assert_eq!(overridden.notification_ttl, Duration::from_secs(9));

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn rejects_non_http_server_urls() {
        let settings = ClientSettings {
            server_url: "ftp://example.com".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.validated_server_url(),
            Err(SettingsError::UnsupportedScheme(_))
        ));

        let settings = ClientSettings {
            server_url: "not a url".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.validated_server_url(),
            Err(SettingsError::InvalidServerUrl { .. })
        ));
    }
}
