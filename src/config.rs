use std::{path::PathBuf, time::Duration};

use directories::UserDirs;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DOWNLOAD_FILE_NAME: &str = "room-vision-result.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub step_interval: Duration,
    pub completion_delay: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(1200),
            completion_delay: Duration::from_millis(500),
        }
    }
}

/// Process-wide settings, built once at startup and handed to whoever needs them.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub estimate_model: String,
    pub download_dir: PathBuf,
    pub request_timeout: Option<Duration>,
    pub animation: AnimationTiming,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            estimate_model: DEFAULT_MODEL.to_string(),
            download_dir: default_download_dir(),
            request_timeout: None,
            animation: AnimationTiming::default(),
        }
    }
}

impl Config {
    /// Reads the environment. A missing API key is not an error here; calls
    /// made without one fail like any other call.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env_or("GEMINI_API_KEY", defaults.api_key),
            base_url: env_or("ROOMVISION_BASE_URL", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: env_or("ROOMVISION_MODEL", defaults.model),
            estimate_model: env_or("ROOMVISION_ESTIMATE_MODEL", defaults.estimate_model),
            download_dir: std::env::var_os("ROOMVISION_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            request_timeout: std::env::var("ROOMVISION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            animation: defaults.animation,
        }
    }

    pub fn download_path(&self) -> PathBuf {
        self.download_dir.join(DOWNLOAD_FILE_NAME)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "***" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("estimate_model", &self.estimate_model)
            .field("download_dir", &self.download_dir)
            .field("request_timeout", &self.request_timeout)
            .field("animation", &self.animation)
            .finish()
    }
}

fn env_or(key: &str, default: String) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default,
    }
}

fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_processing_pacing() {
        let timing = AnimationTiming::default();
        assert_eq!(timing.step_interval, Duration::from_millis(1200));
        assert_eq!(timing.completion_delay, Duration::from_millis(500));
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = Config {
            api_key: "super-secret".to_string(),
            ..Config::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn download_path_uses_fixed_file_name() {
        let config = Config {
            download_dir: PathBuf::from("/tmp/out"),
            ..Config::default()
        };
        assert_eq!(
            config.download_path(),
            PathBuf::from("/tmp/out/room-vision-result.png")
        );
    }
}
