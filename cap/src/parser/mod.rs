//! Parsers: XML brut → arbre d'éléments → modèle CAP typé

pub mod alert;
pub mod xml;
