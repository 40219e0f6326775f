//! Rapport de conversion
//!
//! Collecte les résultats d'une conversion par lot: une alerte en échec est
//! consignée et n'interrompt pas les autres.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::ConvertError;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConvertStatus {
    /// Toutes les alertes converties
    Success,
    /// Certaines alertes en échec
    PartialSuccess,
    /// Aucune alerte convertie
    Failed,
}

/// Catégorie d'erreur d'une alerte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Parse,
    MalformedGeometry,
    MissingField,
    EmptyGeometry,
    UnrecognizedPrimitive,
    InvalidOptions,
    /// Lecture / écriture de fichier
    Io,
}

impl From<&ConvertError> for ErrorKind {
    fn from(error: &ConvertError) -> Self {
        match error {
            ConvertError::Parse(_) => Self::Parse,
            ConvertError::MalformedGeometry { .. } => Self::MalformedGeometry,
            ConvertError::MissingField(_) => Self::MissingField,
            ConvertError::EmptyGeometry => Self::EmptyGeometry,
            ConvertError::UnrecognizedPrimitive { .. } => Self::UnrecognizedPrimitive,
            ConvertError::InvalidOptions(_) => Self::InvalidOptions,
        }
    }
}

impl ErrorKind {
    /// Classe une erreur de fichier (ConvertError enveloppée ou erreur d'I/O)
    pub fn classify(error: &anyhow::Error) -> Self {
        error
            .downcast_ref::<ConvertError>()
            .map(Self::from)
            .unwrap_or(Self::Io)
    }
}

/// Échec de conversion d'un fichier
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    /// Fichier source
    pub file: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConvertStatus,

    /// Nombre de fichiers traités
    pub files_processed: usize,
    /// Nombre de fichiers en erreur
    pub files_failed: usize,
    /// Nombre de polygones écrits (cercles inclus)
    pub polygons_written: usize,

    /// Erreurs par catégorie
    pub by_kind: HashMap<ErrorKind, usize>,
    /// Liste des erreurs
    pub errors: Vec<FileError>,
}

impl Default for ConvertReport {
    fn default() -> Self {
        Self {
            duration_secs: 0.0,
            status: ConvertStatus::Success,
            files_processed: 0,
            files_failed: 0,
            polygons_written: 0,
            by_kind: HashMap::new(),
            errors: Vec::new(),
        }
    }
}

impl ConvertReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un fichier converti
    pub fn record_success(&mut self, polygons: usize) {
        self.files_processed += 1;
        self.polygons_written += polygons;
    }

    /// Enregistre un fichier en échec
    pub fn record_failure(&mut self, file: &str, kind: ErrorKind, message: &str) {
        self.files_processed += 1;
        self.files_failed += 1;
        *self.by_kind.entry(kind).or_default() += 1;
        self.errors.push(FileError {
            file: file.to_string(),
            kind,
            message: message.to_string(),
        });
    }

    /// Nombre de fichiers convertis
    pub fn files_converted(&self) -> usize {
        self.files_processed - self.files_failed
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.files_failed == 0 {
            ConvertStatus::Success
        } else if self.files_converted() > 0 {
            ConvertStatus::PartialSuccess
        } else {
            ConvertStatus::Failed
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Files: {} processed, {} converted, {} failed",
            self.files_processed,
            self.files_converted(),
            self.files_failed
        );
        println!("Polygons: {}", self.polygons_written);

        if !self.by_kind.is_empty() {
            println!("\n--- BY KIND ---");
            let mut kinds: Vec<_> = self.by_kind.iter().collect();
            kinds.sort_by_key(|(k, _)| format!("{:?}", k));
            for (kind, count) in kinds {
                println!("  {:?}: {}", kind, count);
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  [{}] {:?}: {}", e.file, e.kind, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}/{} alerts converted, {} polygons, {} errors",
            self.files_converted(),
            self.files_processed,
            self.polygons_written,
            self.errors.len()
        )
    }
}
