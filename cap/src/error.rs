//! Types d'erreurs pour le crate cap

use thiserror::Error;

/// Erreurs pouvant survenir lors du parsing d'une alerte CAP
#[derive(Debug, Error)]
pub enum CapError {
    /// Erreur du lecteur XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Encodage déclaré inconnu
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Document structurellement inutilisable (pas de racine alert, balises orphelines)
    #[error("Invalid CAP document: {0}")]
    InvalidDocument(String),
}

impl CapError {
    /// Crée une erreur de document invalide
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument(reason.into())
    }
}
