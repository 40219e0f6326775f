//! # cap
//!
//! Parser pour les alertes Common Alerting Protocol (CAP v1.2).
//!
//! ## Features
//!
//! - Décodage selon l'encodage déclaré (`encoding_rs`), validation UTF-8 SIMD (`simdutf8`)
//! - Lecture XML en streaming avec `quick-xml`, préfixes de namespace (`cap:`) ignorés
//! - Normalisation des cardinalités ambiguës (une `area` ou plusieurs)
//!
//! ## Usage
//!
//! ```rust,ignore
//! let alert = cap::parse(&std::fs::read("alert.xml")?)?;
//! println!("Identifiant: {:?}", alert.identifier);
//!
//! for area in &alert.info().unwrap().areas {
//!     println!("{}: {} primitives", area.label(), area.shapes.len());
//! }
//! ```

pub mod encoding;
pub mod error;
pub mod parser;
pub mod types;

pub use error::CapError;
pub use types::{Alert, Area, Info, OneOrMany, Shape};

/// Parse un document CAP brut.
///
/// # Errors
///
/// Retourne `CapError` si l'encodage déclaré est inconnu, si le XML est illisible
/// ou si la racine n'est pas un élément `alert`.
pub fn parse(xml: &[u8]) -> Result<Alert, CapError> {
    let text = encoding::decode(xml)?;
    parse_str(&text)
}

/// Parse un document CAP déjà décodé
pub fn parse_str(xml: &str) -> Result<Alert, CapError> {
    let tree = parser::xml::parse(xml)?;
    parser::alert::from_tree(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_alert() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<alert xmlns="urn:oasis:names:tc:emergency:cap:1.2">
  <identifier>TEST-1</identifier>
  <info>
    <event>Flood</event>
    <area>
      <areaDesc>River banks</areaDesc>
      <circle>45.0,5.0 2.5</circle>
    </area>
  </info>
</alert>"#;

        let alert = parse(xml).unwrap();
        assert_eq!(alert.identifier.as_deref(), Some("TEST-1"));

        let info = alert.info().unwrap();
        assert_eq!(info.event.as_deref(), Some("Flood"));
        assert_eq!(info.areas[0].label(), "River banks");
        assert_eq!(info.areas[0].shapes, vec![Shape::Circle("45.0,5.0 2.5".to_string())]);
    }

    #[test]
    fn test_parse_not_xml() {
        assert!(parse(b"not an alert").is_err());
    }
}
