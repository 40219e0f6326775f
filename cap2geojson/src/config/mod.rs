//! Configuration de la conversion

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

use crate::geometry::{DEFAULT_CIRCLE_POINTS, MIN_CIRCLE_POINTS};
use crate::ConvertOptions;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Nombre de points pour approximer un cercle
    pub n_points: usize,

    /// Émettre `null` pour les champs absents au lieu d'échouer
    pub lenient: bool,

    /// JSON indenté en sortie
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_CIRCLE_POINTS,
            lenient: false,
            pretty: false,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_json(&content)
    }

    fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Charge la configuration depuis les variables d'environnement
    ///
    /// CAP2GEOJSON_POINTS, CAP2GEOJSON_LENIENT, CAP2GEOJSON_PRETTY
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            n_points: std::env::var("CAP2GEOJSON_POINTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.n_points),
            lenient: std::env::var("CAP2GEOJSON_LENIENT")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.lenient),
            pretty: std::env::var("CAP2GEOJSON_PRETTY")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.pretty),
        }
    }

    /// Vérifie la cohérence des valeurs
    pub fn validate(&self) -> Result<()> {
        if self.n_points < MIN_CIRCLE_POINTS {
            anyhow::bail!(
                "n_points must be at least {}, got {}",
                MIN_CIRCLE_POINTS,
                self.n_points
            );
        }
        Ok(())
    }

    /// Options passées à la conversion
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            n_points: self.n_points,
            lenient: self.lenient,
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.n_points, 32);
        assert!(!config.lenient);
        assert_eq!(config.options(), ConvertOptions::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"n_points": 64}"#).unwrap();
        assert_eq!(config.n_points, 64);
        assert!(!config.pretty);
    }

    #[test]
    fn test_invalid_points_rejected() {
        assert!(Config::from_json(r#"{"n_points": 2}"#).is_err());
        assert!(Config::from_json(r#"{"n_points": "many"}"#).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("cap2geojson_test_config.json");
        std::fs::write(&path, r#"{"n_points": 12, "lenient": true}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.n_points, 12);
        assert!(config.lenient);

        std::fs::remove_file(path).ok();
        assert!(Config::load(Path::new("/nonexistent/cap2geojson.json")).is_err());
    }
}
