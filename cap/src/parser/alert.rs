//! Construction du modèle typé depuis l'arbre XML

use tracing::debug;

use crate::parser::xml::Element;
use crate::types::{Alert, Area, Info, OneOrMany, Shape};
use crate::CapError;

/// Enfants de `area` qui ne sont pas des primitives géométriques
const AREA_METADATA: &[&str] = &["areaDesc", "geocode", "altitude", "ceiling"];

/// Construit une `Alert` depuis la racine du document
pub fn from_tree(root: &Element) -> Result<Alert, CapError> {
    if root.local_name() != "alert" {
        return Err(CapError::invalid_document(format!(
            "root element is '{}', expected 'alert'",
            root.name
        )));
    }

    let infos: Vec<Info> = sequence(root, "info").into_iter().map(build_info).collect();

    let alert = Alert {
        identifier: root.child_text("identifier"),
        sender: root.child_text("sender"),
        sent: root.child_text("sent"),
        status: root.child_text("status"),
        msg_type: root.child_text("msgType"),
        scope: root.child_text("scope"),
        infos,
    };

    debug!(
        identifier = alert.identifier.as_deref().unwrap_or(""),
        infos = alert.infos.len(),
        "Parsed CAP alert"
    );

    Ok(alert)
}

/// Normalise un champ à cardinalité variable en séquence
fn sequence<'a>(element: &'a Element, local: &str) -> Vec<&'a Element> {
    element
        .field(local)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
}

fn build_info(element: &Element) -> Info {
    Info {
        categories: element
            .children_named("category")
            .map(|c| c.text.clone())
            .collect(),
        event: element.child_text("event"),
        urgency: element.child_text("urgency"),
        severity: element.child_text("severity"),
        certainty: element.child_text("certainty"),
        effective: element.child_text("effective"),
        onset: element.child_text("onset"),
        expires: element.child_text("expires"),
        sender_name: element.child_text("senderName"),
        headline: element.child_text("headline"),
        description: element.child_text("description"),
        instruction: element.child_text("instruction"),
        web: element.child_text("web"),
        contact: element.child_text("contact"),
        areas: sequence(element, "area").into_iter().map(build_area).collect(),
    }
}

fn build_area(element: &Element) -> Area {
    let shapes = element
        .children
        .iter()
        .filter(|child| !AREA_METADATA.contains(&child.local_name()))
        .map(|child| match child.local_name() {
            "polygon" => Shape::Polygon(child.text.clone()),
            "circle" => Shape::Circle(child.text.clone()),
            other => Shape::Unrecognized(other.to_string()),
        })
        .collect();

    Area {
        area_desc: element.child_text("areaDesc"),
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xml;

    fn tree(xml: &str) -> Element {
        xml::parse(xml).unwrap()
    }

    #[test]
    fn test_strip_namespace_prefix() {
        let root = tree(
            "<cap:alert><cap:identifier>A1</cap:identifier><cap:msgType>Alert</cap:msgType></cap:alert>",
        );
        let alert = from_tree(&root).unwrap();
        assert_eq!(alert.identifier.as_deref(), Some("A1"));
        assert_eq!(alert.msg_type.as_deref(), Some("Alert"));
        assert!(alert.sender.is_none());
        assert!(alert.infos.is_empty());
    }

    #[test]
    fn test_single_and_multiple_areas() {
        let single = tree(
            "<alert><info><area><areaDesc>A</areaDesc><polygon>1,2 3,4 1,2</polygon></area></info></alert>",
        );
        let alert = from_tree(&single).unwrap();
        assert_eq!(alert.infos[0].areas.len(), 1);

        let multiple = tree(
            "<alert><info><area><areaDesc>A</areaDesc></area><area><areaDesc>B</areaDesc></area></info></alert>",
        );
        let alert = from_tree(&multiple).unwrap();
        let descs: Vec<_> = alert.infos[0]
            .areas
            .iter()
            .map(|a| a.area_desc.as_deref().unwrap())
            .collect();
        assert_eq!(descs, vec!["A", "B"]);
    }

    #[test]
    fn test_shapes_in_document_order() {
        let root = tree(
            "<alert><info><area>\
                <areaDesc>Mixed</areaDesc>\
                <polygon>1,2 3,4 5,6 1,2</polygon>\
                <geocode><valueName>FIPS6</valueName><value>006113</value></geocode>\
                <circle>1,2 3</circle>\
                <polygon>7,8 9,10 11,12 7,8</polygon>\
                <altitude>100</altitude>\
                <line>1,2 3,4</line>\
            </area></info></alert>",
        );
        let alert = from_tree(&root).unwrap();
        let area = &alert.infos[0].areas[0];

        assert_eq!(
            area.shapes,
            vec![
                Shape::Polygon("1,2 3,4 5,6 1,2".to_string()),
                Shape::Circle("1,2 3".to_string()),
                Shape::Polygon("7,8 9,10 11,12 7,8".to_string()),
                Shape::Unrecognized("line".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiple_categories_and_infos() {
        let root = tree(
            "<alert><info><category>Met</category><category>Safety</category></info>\
             <info><category>Met</category></info></alert>",
        );
        let alert = from_tree(&root).unwrap();
        assert_eq!(alert.infos.len(), 2);
        assert_eq!(alert.info().unwrap().categories, vec!["Met", "Safety"]);
    }

    #[test]
    fn test_wrong_root_element() {
        let root = tree("<feed><entry/></feed>");
        assert!(matches!(
            from_tree(&root),
            Err(CapError::InvalidDocument(msg)) if msg.contains("feed")
        ));
    }
}
