//! Lots, their zones, and the lot-owner request bodies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

/// Most zones a single lot may be split into.
pub const MAX_ZONES: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "lot_status")]
pub enum LotStatus {
    Open,
    Closed,
    Full,
    Maintenance,
}

/// Row of the paginated owner dashboard (`view_my_lots`).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct LotSummary {
    #[serde(rename = "LotID")]
    pub lot_id: i32,
    pub lot_name: String,
    pub total_zones: i32,
    pub total_capacity: i32,
    pub space_available: i32,
    pub status: LotStatus,
    pub city: String,
    pub country: String,
}

/// Lot picker entry.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LotRef {
    #[serde(rename = "LotID")]
    pub lot_id: i32,
    #[serde(rename = "LotName")]
    pub lot_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_zone_capacity"))]
pub struct NewLot {
    #[validate(length(min = 1, max = 100))]
    pub lot_name: String,
    #[validate(range(min = 1))]
    pub total_capacity: i32,
    #[validate(length(min = 1, max = 20))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 255))]
    pub address_l1: String,
    #[validate(length(max = 255))]
    pub address_l2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    /// Capacity of each zone, in zone order.
    #[serde(rename = "zones")]
    #[validate(length(min = 1, max = 50), custom(function = "validate_zone_sizes"))]
    pub zones: Vec<i32>,
}

fn validate_zone_sizes(zones: &[i32]) -> Result<(), ValidationError> {
    if zones.iter().any(|&capacity| capacity < 1) {
        return Err(ValidationError::new("zone_capacity_not_positive"));
    }
    Ok(())
}

fn validate_zone_capacity(lot: &NewLot) -> Result<(), ValidationError> {
    let zoned: i64 = lot.zones.iter().map(|&c| i64::from(c)).sum();
    if zoned > i64::from(lot.total_capacity) {
        return Err(ValidationError::new("zones_exceed_total_capacity"));
    }
    Ok(())
}

impl NewLot {
    pub fn total_zones(&self) -> i32 {
        self.zones.len() as i32
    }
}

/// One `add_lot_zone` call: zone ids run 1..=N in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneSpec {
    #[serde(rename = "ZoneID")]
    pub zone_id: i32,
    #[serde(rename = "Capacity")]
    pub capacity: i32,
}

/// Expand a capacity list into numbered zones.
pub fn zone_plan(zones: &[i32]) -> Vec<ZoneSpec> {
    zones
        .iter()
        .enumerate()
        .map(|(i, &capacity)| ZoneSpec {
            zone_id: i as i32 + 1,
            capacity,
        })
        .collect()
}

/// Result of `add_lot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotCreation {
    Created { lot_id: i32, zones: Vec<ZoneSpec> },
    /// The database returned lot id 0; no zones were written.
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedLot {
    #[serde(rename = "LotID")]
    pub lot_id: i32,
    #[serde(rename = "Zones")]
    pub zones: Vec<ZoneSpec>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLotStatus {
    #[serde(rename = "LotID")]
    #[validate(range(min = 1))]
    pub lot_id: i32,
    #[serde(rename = "Status")]
    pub status: LotStatus,
}

/// Outcome of a conditional update whose SQL answers 1 (updated) or 0 (no
/// such row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

impl UpdateOutcome {
    pub fn from_sentinel(value: i32) -> Result<Self, AppError> {
        match value {
            1 => Ok(Self::Updated),
            0 => Ok(Self::NotFound),
            other => Err(AppError::Internal(format!(
                "Unexpected update sentinel: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lot(zones: Vec<i32>, total_capacity: i32) -> NewLot {
        NewLot {
            lot_name: "Harbour Front".to_string(),
            total_capacity,
            postal_code: "54000".to_string(),
            address_l1: "1 Mall Road".to_string(),
            address_l2: None,
            city: "Lahore".to_string(),
            country: "Pakistan".to_string(),
            zones,
        }
    }

    #[test]
    fn zones_numbered_from_one_in_order() {
        let plan = zone_plan(&[10, 20, 30]);
        assert_eq!(
            plan,
            vec![
                ZoneSpec { zone_id: 1, capacity: 10 },
                ZoneSpec { zone_id: 2, capacity: 20 },
                ZoneSpec { zone_id: 3, capacity: 30 },
            ]
        );
        assert!(zone_plan(&[]).is_empty());
    }

    #[test]
    fn sentinel_mapping() {
        assert_eq!(UpdateOutcome::from_sentinel(1).unwrap(), UpdateOutcome::Updated);
        assert_eq!(UpdateOutcome::from_sentinel(0).unwrap(), UpdateOutcome::NotFound);
        assert!(matches!(
            UpdateOutcome::from_sentinel(2),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn new_lot_validation() {
        let lot = new_lot(vec![10, 20, 30], 60);
        assert!(lot.validate().is_ok());
        assert_eq!(lot.total_zones(), 3);

        assert!(new_lot(vec![], 60).validate().is_err());
        assert!(new_lot(vec![10, 0], 60).validate().is_err());
        assert!(new_lot(vec![50, 50], 60).validate().is_err());
        assert!(new_lot(vec![1; MAX_ZONES + 1], 1000).validate().is_err());
    }

    #[test]
    fn parses_add_lot_body() {
        let lot: NewLot = serde_json::from_str(
            r#"{
                "LotName": "Harbour Front",
                "TotalCapacity": 60,
                "PostalCode": "54000",
                "AddressL1": "1 Mall Road",
                "City": "Lahore",
                "Country": "Pakistan",
                "zones": [10, 20, 30]
            }"#,
        )
        .unwrap();
        assert_eq!(lot.zones, vec![10, 20, 30]);
        assert!(lot.address_l2.is_none());
    }

    #[test]
    fn parses_status_update() {
        let body: UpdateLotStatus =
            serde_json::from_str(r#"{"LotID": 4, "Status": "Maintenance"}"#).unwrap();
        assert_eq!(body.lot_id, 4);
        assert_eq!(body.status, LotStatus::Maintenance);
        assert!(serde_json::from_str::<UpdateLotStatus>(r#"{"LotID": 4, "Status": "Gone"}"#)
            .is_err());
    }
}
