//! Lecture du XML en arbre d'éléments générique
//!
//! Les noms sont conservés tels qu'ils apparaissent dans le document
//! (`cap:area`, `area`...). L'accès par nom local ignore le préfixe.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::types::OneOrMany;
use crate::CapError;

/// Élément XML avec son texte et ses enfants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Nom qualifié (préfixe de namespace inclus)
    pub name: String,

    /// Texte concaténé de l'élément (déséchappé)
    pub text: String,

    /// Enfants dans l'ordre du document
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Nom sans préfixe de namespace
    pub fn local_name(&self) -> &str {
        match self.name.rfind(':') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// Enfants portant ce nom local
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.local_name() == local)
    }

    /// Premier enfant portant ce nom local
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    /// Accès "mapping": une occurrence, plusieurs, ou aucune
    pub fn field(&self, local: &str) -> Option<OneOrMany<&Element>> {
        let mut matches: Vec<&Element> = self
            .children
            .iter()
            .filter(|c| c.local_name() == local)
            .collect();
        match matches.len() {
            0 => None,
            1 => matches.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(matches)),
        }
    }

    /// Texte du premier enfant portant ce nom local
    pub fn child_text(&self, local: &str) -> Option<String> {
        self.child(local).map(|c| c.text.clone())
    }
}

/// Parse un document XML décodé en arbre
pub fn parse(text: &str) -> Result<Element, CapError> {
    // Texte brut accumulé, trim à la fermeture de l'élément seulement
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::new(qualified_name(start.name()))),
            Event::Empty(start) => {
                attach(&mut stack, &mut root, Element::new(qualified_name(start.name())))?
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = t.unescape().map_err(quick_xml::Error::from)?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| CapError::invalid_document("unexpected closing tag"))?;
                let trimmed = element.text.trim();
                if trimmed.len() != element.text.len() {
                    element.text = trimmed.to_string();
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            // Prologue, commentaires, instructions de traitement
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(CapError::invalid_document(format!(
            "unclosed element '{}'",
            open.name
        )));
    }

    root.ok_or_else(|| CapError::invalid_document("document has no root element"))
}

/// Rattache un élément fermé à son parent, ou en fait la racine
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), CapError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(CapError::invalid_document(format!(
            "multiple root elements ('{}')",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn qualified_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}
