//! Modules d'export (GeoJSON)

pub mod geojson;

pub use self::geojson::{assemble, export_to_geojson};
