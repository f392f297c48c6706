use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "billbook.toml";

/// Fixed text printed on every invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Centred line above the company block.
    pub brand_line: String,
    pub company_name: String,
    /// Printed under the company name when the logo is unavailable.
    pub tagline: String,
    /// Right-aligned under the "INVOICE" title.
    pub address_lines: Vec<String>,
    pub thank_you: String,
    pub contact_prompt: String,
    pub contact_line: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand_line: "Jai Shree Ganesh".to_string(),
            company_name: "SUPER SON ENTERPRISE".to_string(),
            tagline: "Quality Products at Best Rates".to_string(),
            address_lines: vec![
                "Gandhi Nagar".to_string(),
                "Aligarh".to_string(),
                "202001".to_string(),
            ],
            thank_you: "Thank you for your business!".to_string(),
            contact_prompt: "If you have any questions about this invoice, please contact"
                .to_string(),
            contact_line: "[Mob: 0000000000, email: accounts@example.com]".to_string(),
        }
    }
}

/// Where the two branding images are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub logo: PathBuf,
    pub signature: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("Our Logo.jpg"),
            signature: PathBuf::from("sign.png"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub branding: Branding,
    pub assets: AssetPaths,
    /// JSON file holding saved invoices.
    pub store_path: PathBuf,
    /// Directory rendered PDFs are written to.
    pub output_dir: PathBuf,
    /// Flate-compress page content.
    pub compress: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            assets: AssetPaths::default(),
            store_path: PathBuf::from("invoices.json"),
            output_dir: PathBuf::from("."),
            compress: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))
    }

    /// Load `./billbook.toml` if present, otherwise the defaults.
    pub fn load() -> Self {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./{}: {}", LOCAL_CONFIG_FILE, e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            output_dir = "out"

            [branding]
            company_name = "ACME TRADERS"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.branding.company_name, "ACME TRADERS");
        assert_eq!(config.branding.brand_line, "Jai Shree Ganesh");
        assert_eq!(config.assets.logo, PathBuf::from("Our Logo.jpg"));
        assert!(config.compress);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = AppConfig::from_file("/nonexistent/billbook.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billbook.toml");
        std::fs::write(&path, "store_path = [").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(Error::ConfigLoad(_))
        ));
    }
}
