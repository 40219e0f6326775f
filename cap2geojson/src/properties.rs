//! Extraction des propriétés GeoJSON depuis l'alerte

use cap::{Alert, Info};
use geojson::{JsonObject, JsonValue};

use crate::ConvertError;

/// Clés produites, dans l'ordre d'insertion
pub const PROPERTY_KEYS: [&str; 21] = [
    "identifier",
    "sender",
    "sent",
    "status",
    "msgType",
    "scope",
    "category",
    "event",
    "urgency",
    "severity",
    "certainty",
    "effective",
    "onset",
    "expires",
    "senderName",
    "headline",
    "description",
    "instruction",
    "web",
    "contact",
    "areaDesc",
];

/// Construit l'objet `properties` de la Feature.
///
/// En mode strict, un champ absent donne `MissingField` avec le nom de la clé.
/// En mode `lenient`, il est émis à `null`.
pub fn extract(alert: &Alert, info: &Info, lenient: bool) -> Result<JsonObject, ConvertError> {
    let values: [Option<JsonValue>; 21] = [
        text(&alert.identifier),
        text(&alert.sender),
        text(&alert.sent),
        text(&alert.status),
        text(&alert.msg_type),
        text(&alert.scope),
        category(&info.categories),
        text(&info.event),
        text(&info.urgency),
        text(&info.severity),
        text(&info.certainty),
        text(&info.effective),
        text(&info.onset),
        text(&info.expires),
        text(&info.sender_name),
        text(&info.headline),
        text(&info.description),
        text(&info.instruction),
        text(&info.web),
        text(&info.contact),
        area_desc(info).map(JsonValue::from),
    ];

    let mut properties = JsonObject::new();
    for (key, value) in PROPERTY_KEYS.into_iter().zip(values) {
        let value = match value {
            Some(value) => value,
            None if lenient => JsonValue::Null,
            None => return Err(ConvertError::missing(key)),
        };
        properties.insert(key.to_string(), value);
    }

    Ok(properties)
}

/// Descriptions des zones jointes par ", "
///
/// `None` si aucune zone, ou si une zone n'a pas de description.
pub fn area_desc(info: &Info) -> Option<String> {
    if info.areas.is_empty() {
        return None;
    }

    let descs = info
        .areas
        .iter()
        .map(|area| area.area_desc.as_deref())
        .collect::<Option<Vec<&str>>>()?;

    Some(descs.join(", "))
}

fn text(value: &Option<String>) -> Option<JsonValue> {
    value.as_deref().map(JsonValue::from)
}

/// Une catégorie: chaîne. Plusieurs: tableau.
fn category(categories: &[String]) -> Option<JsonValue> {
    match categories {
        [] => None,
        [single] => Some(JsonValue::from(single.as_str())),
        many => Some(JsonValue::from(many.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap::Area;

    fn sample_alert() -> Alert {
        let info = Info {
            categories: vec!["Met".to_string()],
            event: Some("Thunderstorm".to_string()),
            urgency: Some("Expected".to_string()),
            severity: Some("Moderate".to_string()),
            certainty: Some("Likely".to_string()),
            effective: Some("2024-07-01T10:00:00+02:00".to_string()),
            onset: Some("2024-07-01T14:00:00+02:00".to_string()),
            expires: Some("2024-07-01T22:00:00+02:00".to_string()),
            sender_name: Some("Météo-France".to_string()),
            headline: Some("Orages".to_string()),
            description: Some("Orages localement forts.".to_string()),
            instruction: Some("Abritez-vous.".to_string()),
            web: Some("https://vigilance.meteofrance.fr".to_string()),
            contact: Some("Météo-France".to_string()),
            areas: vec![Area {
                area_desc: Some("Isère".to_string()),
                shapes: Vec::new(),
            }],
        };

        Alert {
            identifier: Some("MF-2024-0701".to_string()),
            sender: Some("vigilance@meteo.fr".to_string()),
            sent: Some("2024-07-01T10:00:00+02:00".to_string()),
            status: Some("Actual".to_string()),
            msg_type: Some("Alert".to_string()),
            scope: Some("Public".to_string()),
            infos: vec![info],
        }
    }

    #[test]
    fn test_extract_all_keys_in_order() {
        let alert = sample_alert();
        let properties = extract(&alert, &alert.infos[0], false).unwrap();

        let keys: Vec<&str> = properties.keys().map(|k| k.as_str()).collect();
        let mut expected = PROPERTY_KEYS.to_vec();
        // serde_json::Map conserve l'ordre d'insertion (feature preserve_order)
        assert_eq!(keys, expected);

        expected.sort_unstable();
        expected.dedup();
        assert_eq!(expected.len(), 21);

        assert_eq!(properties["msgType"], "Alert");
        assert_eq!(properties["senderName"], "Météo-France");
        assert_eq!(properties["category"], "Met");
        assert_eq!(properties["areaDesc"], "Isère");
    }

    #[test]
    fn test_area_desc_joined() {
        let mut alert = sample_alert();
        alert.infos[0].areas.push(Area {
            area_desc: Some("Savoie".to_string()),
            shapes: Vec::new(),
        });

        let properties = extract(&alert, &alert.infos[0], false).unwrap();
        assert_eq!(properties["areaDesc"], "Isère, Savoie");
    }

    #[test]
    fn test_multiple_categories() {
        let mut alert = sample_alert();
        alert.infos[0].categories.push("Safety".to_string());

        let properties = extract(&alert, &alert.infos[0], false).unwrap();
        assert_eq!(properties["category"], serde_json::json!(["Met", "Safety"]));
    }

    #[test]
    fn test_missing_field_strict() {
        let mut alert = sample_alert();
        alert.infos[0].web = None;

        match extract(&alert, &alert.infos[0], false) {
            Err(ConvertError::MissingField(field)) => assert_eq!(field, "web"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_area_desc() {
        let mut alert = sample_alert();
        alert.infos[0].areas.push(Area::default());

        assert!(matches!(
            extract(&alert, &alert.infos[0], false),
            Err(ConvertError::MissingField(field)) if field == "areaDesc"
        ));
    }

    #[test]
    fn test_missing_field_lenient() {
        let mut alert = sample_alert();
        alert.sender = None;
        alert.infos[0].categories.clear();

        let properties = extract(&alert, &alert.infos[0], true).unwrap();
        assert_eq!(properties.len(), 21);
        assert!(properties["sender"].is_null());
        assert!(properties["category"].is_null());
        assert_eq!(properties["identifier"], "MF-2024-0701");
    }
}
