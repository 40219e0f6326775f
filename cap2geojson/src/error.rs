//! Types d'erreurs de la conversion CAP → GeoJSON

use cap::CapError;
use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion
///
/// Toutes sont terminales pour l'alerte concernée: aucune sortie partielle.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Document CAP illisible
    #[error("CAP parse error: {0}")]
    Parse(#[from] CapError),

    /// Coordonnées ou rayon invalides
    #[error("Malformed geometry in area '{area}': {reason}")]
    MalformedGeometry { area: String, reason: String },

    /// Champ requis absent (nom de la propriété GeoJSON)
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Aucune primitive géométrique dans l'ensemble des zones
    #[error("No polygon or circle found in any area of the alert")]
    EmptyGeometry,

    /// Élément enfant de `area` qui n'est ni `polygon` ni `circle`
    #[error("Unrecognized geometry primitive '{element}' in area '{area}'")]
    UnrecognizedPrimitive { area: String, element: String },

    /// Options de conversion incohérentes
    #[error("Invalid conversion options: {0}")]
    InvalidOptions(String),
}

impl ConvertError {
    /// Crée une erreur de géométrie malformée
    pub fn malformed(area: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            area: area.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de champ manquant
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}
