//! Runtime configuration from the environment (and `.env`).

use log::warn;
use std::env;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_PLACE: &str = "Jakarta";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where rendered pages are written.
    pub output_dir: PathBuf,
    /// Viewport width the preview scale is computed for.
    pub viewport_width: u32,
    /// Place printed before letter dates.
    pub default_place: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            default_place: DEFAULT_PLACE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read `SURAT_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unusable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("SURAT_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("SURAT_VIEWPORT_WIDTH") {
            match raw.trim().parse::<u32>() {
                Ok(width) if width > 0 => config.viewport_width = width,
                _ => warn!(
                    "SURAT_VIEWPORT_WIDTH '{}' is not a positive number, using {}",
                    raw, DEFAULT_VIEWPORT_WIDTH
                ),
            }
        }

        if let Some(place) = lookup("SURAT_KOTA").filter(|v| !v.trim().is_empty()) {
            config.default_place = place.trim().to_string();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SURAT_OUTPUT_DIR", "/tmp/surat"),
            ("SURAT_VIEWPORT_WIDTH", "390"),
            ("SURAT_KOTA", " Bekasi "),
        ]));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/surat"));
        assert_eq!(config.viewport_width, 390);
        assert_eq!(config.default_place, "Bekasi");
    }

    #[test]
    fn test_bad_width_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[("SURAT_VIEWPORT_WIDTH", "lebar")]));
        assert_eq!(config.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        let config = AppConfig::from_lookup(lookup(&[("SURAT_VIEWPORT_WIDTH", "0")]));
        assert_eq!(config.viewport_width, DEFAULT_VIEWPORT_WIDTH);
    }
}
