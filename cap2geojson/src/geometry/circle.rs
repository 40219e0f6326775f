//! Approximation des `circle` CAP par des polygones
//!
//! Échantillonnage angulaire uniforme: pour `i` dans `[0, n_points)`,
//! `theta_i = i / n_points * 2π` et le point vaut
//! `(r·cos(theta_i) + x, r·sin(theta_i) + y)`, arrondi à 5 décimales.
//! Le rayon est appliqué tel quel dans l'espace des coordonnées.

use std::f64::consts::TAU;

use geo::{Coord, LineString};

use super::parse_lat_lon;
use crate::ConvertError;

/// Décimales conservées pour les points issus d'un cercle
pub const CIRCLE_PRECISION: i32 = 5;

/// Parse un `circle` CAP ("lat,lon rayon") en centre GeoJSON et rayon
pub fn parse(value: &str, area: &str) -> Result<(Coord, f64), ConvertError> {
    let mut tokens = value.split_whitespace();

    let center = tokens
        .next()
        .ok_or_else(|| ConvertError::malformed(area, "circle has no center"))?;
    let center = parse_lat_lon(center).ok_or_else(|| {
        ConvertError::malformed(area, format!("invalid circle center '{}'", center))
    })?;

    let radius = tokens
        .next()
        .ok_or_else(|| ConvertError::malformed(area, "circle has no radius"))?;
    let radius: f64 = fast_float::parse(radius).map_err(|_| {
        ConvertError::malformed(area, format!("invalid circle radius '{}'", radius))
    })?;

    if let Some(extra) = tokens.next() {
        return Err(ConvertError::malformed(
            area,
            format!("unexpected data after circle radius: '{}'", extra),
        ));
    }

    // Un rayon nul donnerait un ring dégénéré
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConvertError::malformed(
            area,
            format!("circle radius must be positive, got {}", radius),
        ));
    }

    Ok((center, radius))
}

/// Échantillonne `n_points` points sur le cercle et ferme le ring.
///
/// Le résultat contient `n_points + 1` coordonnées, la dernière égale à la première.
/// Déterministe: mêmes entrées, mêmes points.
///
/// `radius` est appliqué tel quel en unités de coordonnées (degrés), sans
/// conversion depuis les kilomètres du `<circle>` CAP. Les points sont arrondis
/// à `CIRCLE_PRECISION` décimales, contrairement aux polygones qui gardent la
/// précision source.
pub fn tessellate(center: Coord, radius: f64, n_points: usize) -> LineString {
    let mut coords: Vec<Coord> = (0..n_points)
        .map(|i| {
            let theta = i as f64 / n_points as f64 * TAU;
            Coord {
                x: round(radius * theta.cos() + center.x),
                y: round(radius * theta.sin() + center.y),
            }
        })
        .collect();

    if let Some(&first) = coords.first() {
        coords.push(first);
    }

    LineString::new(coords)
}

/// Arrondi à `CIRCLE_PRECISION` décimales
fn round(value: f64) -> f64 {
    let factor = 10f64.powi(CIRCLE_PRECISION);
    (value * factor).round() / factor
}
