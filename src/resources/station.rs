use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Resource;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub available_ports: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStation {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(range(min = 0, message = "availablePorts must not be negative"))]
    pub available_ports: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StationChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "availablePorts must not be negative"))]
    pub available_ports: Option<i64>,
}

impl Resource for ChargingStation {
    const COLLECTION: Collection = Collection::ChargingStations;
    const PATH: &'static str = "/charging-stations";
    const NOT_FOUND: &'static str = "Station not found";
    const DELETED: &'static str = "Station deleted";

    type New = NewStation;
    type Changes = StationChanges;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::to_document;
    use serde_json::json;

    #[test]
    fn new_station_requires_all_fields() {
        let err = serde_json::from_value::<NewStation>(json!({"name": "A", "location": "L"}))
            .unwrap_err();
        assert!(err.to_string().contains("availablePorts"));
    }

    #[test]
    fn negative_ports_fail_validation() {
        let station = NewStation {
            name: "A".into(),
            location: "L".into(),
            available_ports: -1,
        };
        let errors = station.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("available_ports"));
    }

    #[test]
    fn empty_name_fails_validation() {
        let station = NewStation {
            name: String::new(),
            location: "L".into(),
            available_ports: 2,
        };
        assert!(station.validate().is_err());
    }

    #[test]
    fn changes_only_carry_present_fields() {
        let changes: StationChanges =
            serde_json::from_value(json!({"availablePorts": 2})).unwrap();
        assert!(changes.validate().is_ok());

        let doc = to_document(&changes).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["availablePorts"], json!(2));
    }

    #[test]
    fn changes_cannot_touch_identity() {
        let changes: StationChanges =
            serde_json::from_value(json!({"id": "nope", "createdAt": "x", "name": "B"}))
                .unwrap();
        let doc = to_document(&changes).unwrap();
        assert!(!doc.contains_key("id"));
        assert!(!doc.contains_key("createdAt"));
        assert_eq!(doc["name"], json!("B"));
    }

    #[test]
    fn serializes_camel_case() {
        let station = ChargingStation {
            id: Uuid::nil(),
            name: "A".into(),
            location: "L".into(),
            available_ports: 4,
        };
        let value = serde_json::to_value(&station).unwrap();
        assert_eq!(value["availablePorts"], json!(4));
    }
}
