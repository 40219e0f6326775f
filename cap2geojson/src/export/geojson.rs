//! Assemblage et export de la FeatureCollection

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

/// Enveloppe les propriétés et la géométrie dans une FeatureCollection à une seule Feature
pub fn assemble(properties: JsonObject, geometry: &MultiPolygon<f64>) -> FeatureCollection {
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

/// Nombre de polygones de la géométrie MultiPolygon de chaque Feature
pub fn polygon_count(collection: &FeatureCollection) -> usize {
    collection
        .features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .map(|g| match &g.value {
            Value::MultiPolygon(polygons) => polygons.len(),
            _ => 0,
        })
        .sum()
}

/// Sérialise la collection en JSON
pub fn to_string(collection: &FeatureCollection, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(collection)?
    } else {
        serde_json::to_string(collection)?
    };
    Ok(json)
}

/// Écrit la collection dans un fichier GeoJSON
pub fn export_to_geojson(collection: &FeatureCollection, output_path: &Path, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, collection)?;
    } else {
        serde_json::to_writer(&mut writer, collection)?;
    }
    writer.flush()?;

    Ok(())
}
