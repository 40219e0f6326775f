//! Types de données pour le crate cap

/// Alerte CAP parsée (élément racine `alert`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub identifier: Option<String>,
    pub sender: Option<String>,
    pub sent: Option<String>,
    pub status: Option<String>,
    pub msg_type: Option<String>,
    pub scope: Option<String>,

    /// Blocs `info` dans l'ordre du document
    pub infos: Vec<Info>,
}

impl Alert {
    /// Premier bloc `info`, celui utilisé pour la conversion
    pub fn info(&self) -> Option<&Info> {
        self.infos.first()
    }
}

/// Bloc `info` d'une alerte
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    /// Catégories (CAP en autorise plusieurs)
    pub categories: Vec<String>,
    pub event: Option<String>,
    pub urgency: Option<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub effective: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
    pub sender_name: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub web: Option<String>,
    pub contact: Option<String>,

    /// Zones, toujours normalisées en séquence
    pub areas: Vec<Area>,
}

/// Zone géographique (`area`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Area {
    /// Description lisible (`areaDesc`)
    pub area_desc: Option<String>,

    /// Primitives géométriques dans l'ordre du document
    pub shapes: Vec<Shape>,
}

impl Area {
    /// Libellé utilisé dans les logs et les erreurs
    pub fn label(&self) -> &str {
        self.area_desc.as_deref().unwrap_or("<unnamed area>")
    }
}

/// Primitive géométrique brute d'une zone
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Contenu texte de `polygon`: paires "lat,lon" séparées par des espaces
    Polygon(String),

    /// Contenu texte de `circle`: "lat,lon rayon"
    Circle(String),

    /// Élément enfant inconnu (nom local)
    Unrecognized(String),
}

/// Cardinalité ambiguë d'un élément XML: une occurrence ou plusieurs
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Nombre d'éléments
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Itère sur les éléments quelle que soit la forme
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(item) => std::slice::from_ref(item).iter(),
            Self::Many(items) => items.iter(),
        }
    }

    /// Convertit en séquence uniforme
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
