//! Platform verification.
//!
//! Confirms the host is the one distribution/version the pipeline's package
//! and service commands are written for. Read-only: facts come from
//! `/etc/os-release`, falling back to `/etc/system-release`.

use provision::{Host, ProvisionError};

use crate::config::PlatformConfig;

/// Host identity facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub version_id: Option<String>,
    pub pretty_name: Option<String>,
}

impl OsRelease {
    /// Parse `os-release(5)` content (`KEY=value`, optionally quoted).
    pub fn parse(content: &str) -> Self {
        let mut release = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim()).to_string();
            match key.trim() {
                "ID" => release.id = Some(value),
                "VERSION_ID" => release.version_id = Some(value),
                "PRETTY_NAME" => release.pretty_name = Some(value),
                _ => {}
            }
        }

        release
    }

    /// Parse the free-text `/etc/system-release` line,
    /// e.g. "Amazon Linux release 2023 (Amazon Linux)".
    pub fn from_system_release(text: &str) -> Self {
        let text = text.trim();
        let id = text
            .starts_with("Amazon Linux")
            .then(|| "amzn".to_string());
        let version_id = text
            .split_whitespace()
            .skip_while(|word| *word != "release")
            .nth(1)
            .map(str::to_string);

        Self {
            id,
            version_id,
            pretty_name: (!text.is_empty()).then(|| text.to_string()),
        }
    }

    /// Best human-readable name.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.pretty_name {
            return name.clone();
        }
        format!(
            "{} {}",
            self.id.as_deref().unwrap_or("unknown"),
            self.version_id.as_deref().unwrap_or("unknown")
        )
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

/// Compatibility verdict with the reason shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVerdict {
    pub supported: bool,
    pub reason: String,
}

/// Compare detected facts against the supported platform.
pub fn evaluate(release: &OsRelease, expected: &PlatformConfig) -> PlatformVerdict {
    let id_ok = release.id.as_deref() == Some(expected.id.as_str());
    let version_ok = release.version_id.as_deref() == Some(expected.version_id.as_str());
    let detected = release.display_name();

    if id_ok && version_ok {
        PlatformVerdict {
            supported: true,
            reason: format!("{detected} detected"),
        }
    } else {
        PlatformVerdict {
            supported: false,
            reason: format!(
                "detected {detected} (id={}, version={}), expected id={} version={}",
                release.id.as_deref().unwrap_or("?"),
                release.version_id.as_deref().unwrap_or("?"),
                expected.id,
                expected.version_id
            ),
        }
    }
}

/// Read host identity and evaluate it. No side effects.
pub fn verify(host: &dyn Host, config: &PlatformConfig) -> PlatformVerdict {
    match detect(host, config) {
        Some(release) => evaluate(&release, config),
        None => PlatformVerdict {
            supported: false,
            reason: format!(
                "could not determine OS: neither {} nor {} is readable",
                config.os_release_path.display(),
                config.system_release_path.display()
            ),
        },
    }
}

fn detect(host: &dyn Host, config: &PlatformConfig) -> Option<OsRelease> {
    let read = |path: &std::path::Path| match host.read_file(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("{e:#}");
            None
        }
    };

    if let Some(content) = read(&config.os_release_path) {
        return Some(OsRelease::parse(&content));
    }
    read(&config.system_release_path).map(|text| OsRelease::from_system_release(&text))
}

/// Verify and convert an unsupported verdict into the run error.
pub fn ensure_supported(
    host: &dyn Host,
    config: &PlatformConfig,
) -> Result<PlatformVerdict, ProvisionError> {
    let verdict = verify(host, config);
    if verdict.supported {
        log::info!("platform: {}", verdict.reason);
        Ok(verdict)
    } else {
        Err(ProvisionError::UnsupportedPlatform {
            reason: verdict.reason,
        })
    }
}
