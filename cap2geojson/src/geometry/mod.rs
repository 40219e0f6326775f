//! Traduction des zones CAP en coordonnées MultiPolygon
//!
//! Chaque primitive (`polygon` ou `circle`) de chaque zone produit un polygone à
//! un seul ring extérieur, dans l'ordre du document: ordre des zones, puis ordre
//! des primitives dans la zone. Pas de fusion ni de déduplication.
//!
//! CAP donne les coordonnées en "lat,lon", GeoJSON attend (x = lon, y = lat).

pub mod circle;
pub mod polygon;

use cap::{Area, Shape};
use geo::{Coord, MultiPolygon, Polygon};
use tracing::debug;

use crate::ConvertError;

/// Nombre de points par défaut pour approximer un cercle
pub const DEFAULT_CIRCLE_POINTS: usize = 32;

/// En dessous, l'approximation n'est plus un ring valide
pub const MIN_CIRCLE_POINTS: usize = 3;

/// Construit les coordonnées MultiPolygon de toutes les zones d'un bloc `info`.
///
/// Accepte toute séquence de zones: `&Vec<Area>`, `&[Area]`, `&OneOrMany<Area>`...
/// Une zone seule et une séquence d'un élément donnent le même résultat.
///
/// # Errors
///
/// - `InvalidOptions` si `n_points < MIN_CIRCLE_POINTS`
/// - `MalformedGeometry` / `UnrecognizedPrimitive` à la première primitive invalide
/// - `EmptyGeometry` si aucune zone ne contient de primitive
pub fn translate_areas<'a, I>(areas: I, n_points: usize) -> Result<MultiPolygon<f64>, ConvertError>
where
    I: IntoIterator<Item = &'a Area>,
{
    if n_points < MIN_CIRCLE_POINTS {
        return Err(ConvertError::InvalidOptions(format!(
            "n_points must be at least {}, got {}",
            MIN_CIRCLE_POINTS, n_points
        )));
    }

    let mut polygons = Vec::new();

    for area in areas {
        for shape in &area.shapes {
            polygons.push(translate_shape(shape, area.label(), n_points)?);
        }
    }

    if polygons.is_empty() {
        return Err(ConvertError::EmptyGeometry);
    }

    Ok(MultiPolygon::new(polygons))
}

/// Dispatch polygon / circle
fn translate_shape(shape: &Shape, area: &str, n_points: usize) -> Result<Polygon<f64>, ConvertError> {
    let ring = match shape {
        Shape::Polygon(value) => polygon::parse_ring(value, area)?,
        Shape::Circle(value) => {
            let (center, radius) = circle::parse(value, area)?;
            circle::tessellate(center, radius, n_points)
        }
        Shape::Unrecognized(element) => {
            return Err(ConvertError::UnrecognizedPrimitive {
                area: area.to_string(),
                element: element.clone(),
            })
        }
    };

    debug!(area = area, points = ring.0.len(), "Translated area primitive");

    Ok(Polygon::new(ring, Vec::new()))
}

/// Parse une paire CAP "lat,lon" en coordonnée GeoJSON (x = lon, y = lat)
pub(crate) fn parse_lat_lon(pair: &str) -> Option<Coord> {
    let (lat, lon) = pair.split_once(',')?;
    let lat: f64 = fast_float::parse(lat.trim()).ok()?;
    let lon: f64 = fast_float::parse(lon.trim()).ok()?;

    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    Some(Coord { x: lon, y: lat })
}
