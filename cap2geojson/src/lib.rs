//! # cap2geojson
//!
//! Conversion d'alertes CAP (Common Alerting Protocol) en GeoJSON.
//!
//! ## Features
//!
//! - Une FeatureCollection à une Feature par alerte, géométrie `MultiPolygon`
//! - Polygones CAP (lat,lon) convertis en rings GeoJSON (lon,lat)
//! - Cercles approximés par des polygones (nombre de points configurable)
//! - 21 propriétés extraites de l'alerte (mode strict ou tolérant)
//! - CLI avec conversion par lot en parallèle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cap2geojson::{to_geojson, ConvertOptions};
//!
//! let xml = std::fs::read("alert.xml")?;
//! let collection = to_geojson(&xml, &ConvertOptions::default())?;
//! println!("{}", collection);
//! ```
//!
//! ## Usage CLI
//!
//! ```bash
//! cap2geojson convert --path ./alerts/ --output ./geojson/ --points 64
//! cap2geojson print --path ./alert.xml --pretty
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod properties;
pub mod report;

pub use config::Config;
pub use error::ConvertError;
pub use geometry::{translate_areas, DEFAULT_CIRCLE_POINTS};
pub use report::{ConvertReport, ConvertStatus};

use cap::Alert;
use geojson::FeatureCollection;
use tracing::{debug, warn};

/// Options d'une conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Nombre de points pour approximer un cercle
    pub n_points: usize,

    /// Champs absents émis à `null` au lieu de `MissingField`
    pub lenient: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_CIRCLE_POINTS,
            lenient: false,
        }
    }
}

/// Convertit un document CAP brut en FeatureCollection.
///
/// # Errors
///
/// `ConvertError::Parse` si le document est illisible, puis les erreurs de
/// [`convert_alert`].
pub fn to_geojson(xml: &[u8], options: &ConvertOptions) -> Result<FeatureCollection, ConvertError> {
    let alert = cap::parse(xml)?;
    convert_alert(&alert, options)
}

/// Convertit une alerte déjà parsée.
///
/// Seul le premier bloc `info` est converti.
///
/// # Errors
///
/// `MissingField` (dont `info` absent), `MalformedGeometry`, `UnrecognizedPrimitive`,
/// `EmptyGeometry`, `InvalidOptions`.
pub fn convert_alert(alert: &Alert, options: &ConvertOptions) -> Result<FeatureCollection, ConvertError> {
    let info = alert.info().ok_or_else(|| ConvertError::missing("info"))?;

    if alert.infos.len() > 1 {
        warn!(
            identifier = alert.identifier.as_deref().unwrap_or(""),
            ignored = alert.infos.len() - 1,
            "Alert has several info blocks, only the first one is converted"
        );
    }

    let properties = properties::extract(alert, info, options.lenient)?;
    let geometry = geometry::translate_areas(&info.areas, options.n_points)?;

    debug!(
        identifier = alert.identifier.as_deref().unwrap_or(""),
        polygons = geometry.0.len(),
        "Converted alert"
    );

    Ok(export::assemble(properties, &geometry))
}
