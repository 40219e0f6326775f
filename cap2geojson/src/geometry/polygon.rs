//! Parsing des rings `polygon`

use geo::{Coord, LineString};
use tracing::warn;

use super::parse_lat_lon;
use crate::ConvertError;

/// Nombre minimal de points d'un ring (point de fermeture inclus)
const MIN_RING_POINTS: usize = 3;

/// Parse un `polygon` CAP ("lat,lon lat,lon ...") en ring GeoJSON.
///
/// La précision source est conservée (pas d'arrondi). Un ring non fermé est
/// fermé en répétant son premier point.
pub fn parse_ring(value: &str, area: &str) -> Result<LineString, ConvertError> {
    let values = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .count();
    if values % 2 != 0 {
        return Err(ConvertError::malformed(
            area,
            format!("polygon has an odd number of coordinate values ({})", values),
        ));
    }

    let mut coords: Vec<Coord> = Vec::with_capacity(values / 2 + 1);
    for pair in value.split_whitespace() {
        let coord = parse_lat_lon(pair).ok_or_else(|| {
            ConvertError::malformed(area, format!("invalid polygon coordinate pair '{}'", pair))
        })?;
        coords.push(coord);
    }

    if coords.len() < MIN_RING_POINTS {
        return Err(ConvertError::malformed(
            area,
            format!(
                "polygon needs at least {} points, got {}",
                MIN_RING_POINTS,
                coords.len()
            ),
        ));
    }

    let first = coords[0];
    if coords[coords.len() - 1] != first {
        warn!(area = area, points = coords.len(), "Auto-closing unclosed polygon ring");
        coords.push(first);
    }

    Ok(LineString::new(coords))
}
