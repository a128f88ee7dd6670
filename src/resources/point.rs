use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use super::Resource;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingPoint {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub price_per_hour: f64,
    pub available: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(range(min = 0.0, message = "pricePerHour must not be negative"))]
    pub price_per_hour: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PointChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "pricePerHour must not be negative"))]
    pub price_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Resource for ChargingPoint {
    const COLLECTION: Collection = Collection::ChargingPoints;
    const PATH: &'static str = "/charging-points";
    const NOT_FOUND: &'static str = "Charging point not found";
    const DELETED: &'static str = "Charging point deleted successfully";

    type New = NewPoint;
    type Changes = PointChanges;
}
