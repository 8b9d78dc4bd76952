//! # Shop Configuration
//!
//! Optional TOML file holding the form defaults, report header details and
//! drawing size. Every section and key may be omitted.
//!
//! ```toml
//! [defaults]
//! opening_height_in = 30.0
//! opening_width_in = 24.0
//! num_doors = 2
//!
//! [report]
//! shop_name = "Maple Street Woodworks"
//! job_id = "K-104"
//!
//! [drawing]
//! canvas_width_px = 800.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::cabinet::CabinetInput;
use crate::errors::{CalcError, CalcResult};

/// Root of the shop config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Values used for any input not given on the command line
    pub defaults: CabinetInput,
    pub report: ReportMeta,
    pub drawing: DrawingSettings,
}

/// Header details printed on reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportMeta {
    pub shop_name: String,
    pub job_id: String,
}

impl Default for ReportMeta {
    fn default() -> Self {
        ReportMeta {
            shop_name: "Shaker Door Shop".to_string(),
            job_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Width of the schematic surface in px
    pub canvas_width_px: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        DrawingSettings {
            canvas_width_px: 800.0,
        }
    }
}

impl ShopConfig {
    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        toml::from_str(contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid shop config: {}", e),
        })
    }

    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ShopConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShopConfig::default());
        assert_eq!(config.defaults.num_doors, 2);
        assert_eq!(config.drawing.canvas_width_px, 800.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = ShopConfig::from_toml_str(
            r#"
            [defaults]
            opening_width_in = 36.0
            num_doors = 3

            [report]
            job_id = "K-104"
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.opening_width_in, 36.0);
        assert_eq!(config.defaults.num_doors, 3);
        // untouched keys keep their defaults
        assert_eq!(config.defaults.stile_rail_width_in, 2.25);
        assert_eq!(config.report.job_id, "K-104");
        assert_eq!(config.report.shop_name, "Shaker Door Shop");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ShopConfig::from_toml_str("[defaults]\nnum_doors = \"two\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ShopConfig::default();
        config.report.shop_name = "Maple Street Woodworks".to_string();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[defaults]"));
        let roundtrip = ShopConfig::from_toml_str(&text).unwrap();
        assert_eq!(roundtrip, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drawing]\ncanvas_width_px = 1024.0").unwrap();

        let config = ShopConfig::load(file.path()).unwrap();
        assert_eq!(config.drawing.canvas_width_px, 1024.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ShopConfig::load("/nonexistent/shop.toml").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
