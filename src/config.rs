//! Installer configuration
//!
//! Every field has a default matching a stock Amazon Linux 2023 instance,
//! so the config file is optional. Lookup order:
//! 1. `--config <path>` / `HTTPD_SETUP_CONFIG`
//! 2. `$XDG_CONFIG_HOME/httpd-setup/config.toml`, if it exists
//! 3. built-in defaults

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Package providing the web server
    pub package: String,
    /// systemd unit name
    pub service: String,
    /// Tree whose ownership and modes are fixed
    pub web_root: PathBuf,
    /// Where the test page is written
    pub document_root: PathBuf,
    /// Login user that gets write access to the web root
    pub web_user: String,
    /// Group the web server runs as
    pub web_group: String,
    pub platform: PlatformConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    /// `ID` in os-release
    pub id: String,
    /// `VERSION_ID` in os-release
    pub version_id: String,
    pub os_release_path: PathBuf,
    /// Fallback when os-release is missing
    pub system_release_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Instance metadata base URL
    pub metadata_endpoint: String,
    /// URL probed to confirm the server answers
    pub local_url: String,
    pub timeout_secs: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            package: "httpd".to_string(),
            service: "httpd".to_string(),
            web_root: PathBuf::from("/var/www"),
            document_root: PathBuf::from("/var/www/html"),
            web_user: "ec2-user".to_string(),
            web_group: "apache".to_string(),
            platform: PlatformConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            id: "amzn".to_string(),
            version_id: "2023".to_string(),
            os_release_path: PathBuf::from("/etc/os-release"),
            system_release_path: PathBuf::from("/etc/system-release"),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            metadata_endpoint: "http://169.254.169.254/latest".to_string(),
            local_url: "http://localhost/".to_string(),
            timeout_secs: 5,
        }
    }
}

impl InstallerConfig {
    /// Load from an explicit path, the default location, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would turn into malformed commands
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("package", &self.package),
            ("service", &self.service),
            ("web_user", &self.web_user),
            ("web_group", &self.web_group),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must not contain whitespace: '{value}'"
                )));
            }
        }

        for (field, path) in [
            ("web_root", &self.web_root),
            ("document_root", &self.document_root),
        ] {
            if !path.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be an absolute path: {}",
                    path.display()
                )));
            }
        }

        if !self.document_root.starts_with(&self.web_root) {
            return Err(ConfigError::Invalid(format!(
                "document_root {} must be inside web_root {}",
                self.document_root.display(),
                self.web_root.display()
            )));
        }

        if self.network.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "network.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Full path of the generated test page
    pub fn test_page_path(&self) -> PathBuf {
        self.document_root.join("index.html")
    }

    /// `user:group` for chown
    pub fn owner_spec(&self) -> String {
        format!("{}:{}", self.web_user, self.web_group)
    }
}

/// `$XDG_CONFIG_HOME/httpd-setup/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("httpd-setup").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn test_defaults_target_amazon_linux() {
        let config = InstallerConfig::default();
        assert_eq!(config.package, "httpd");
        assert_eq!(config.platform.id, "amzn");
        assert_eq!(config.platform.version_id, "2023");
        assert_eq!(config.test_page_path(), PathBuf::from("/var/www/html/index.html"));
        assert_eq!(config.owner_spec(), "ec2-user:apache");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_temp, path) = write_config(
            r#"
web_user = "deploy"

[network]
timeout_secs = 2
"#,
        );

        let config = InstallerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.web_user, "deploy");
        assert_eq!(config.network.timeout_secs, 2);
        assert_eq!(config.package, "httpd");
        assert_eq!(
            config.network.metadata_endpoint,
            "http://169.254.169.254/latest"
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let (_temp, path) = write_config("pakage = \"nginx\"\n");
        let err = InstallerConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = InstallerConfig::load(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = InstallerConfig {
            web_group: "web admins".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = InstallerConfig {
            web_root: PathBuf::from("var/www"),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = InstallerConfig {
            document_root: PathBuf::from("/srv/html"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
