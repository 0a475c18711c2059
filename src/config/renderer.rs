//! Rendering engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// wkhtmltopdf executable, looked up on PATH when not absolute
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Per-render process timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RendererConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.binary.trim().is_empty() {
            return Err(ValidationError::MissingRendererBinary);
        }
        if !(72..=600).contains(&self.dpi) {
            return Err(ValidationError::InvalidDpi);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            dpi: default_dpi(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_binary() -> String {
    "wkhtmltopdf".to_string()
}

fn default_dpi() -> u32 {
    96
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.binary, "wkhtmltopdf");
        assert_eq!(config.dpi, 96);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let blank = RendererConfig {
            binary: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(ValidationError::MissingRendererBinary));

        let dpi = RendererConfig {
            dpi: 10,
            ..Default::default()
        };
        assert_eq!(dpi.validate(), Err(ValidationError::InvalidDpi));

        let timeout = RendererConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(timeout.validate(), Err(ValidationError::InvalidTimeout));
    }
}
