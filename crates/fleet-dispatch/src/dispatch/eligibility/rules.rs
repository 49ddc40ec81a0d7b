use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{Driver, Trip, Vehicle};
use super::super::reject::RejectReason;
use super::super::status::{DriverStatus, VehicleStatus};

/// Dispatch rules, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    VehicleAvailable,
    DriverAvailable,
    CargoWithinCapacity,
    LicenseCurrent,
    LicenseCategoryMatches,
}

impl EligibilityRule {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VehicleAvailable,
            Self::DriverAvailable,
            Self::CargoWithinCapacity,
            Self::LicenseCurrent,
            Self::LicenseCategoryMatches,
        ]
    }
}

/// Result of one rule, kept so callers can show every failing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: EligibilityRule,
    pub failure: Option<RejectReason>,
    pub notes: String,
}

impl RuleCheck {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

pub(crate) fn evaluate_rule(
    rule: EligibilityRule,
    trip: &Trip,
    vehicle: &Vehicle,
    driver: &Driver,
    today: NaiveDate,
) -> RuleCheck {
    let (failure, notes) = match rule {
        EligibilityRule::VehicleAvailable => match vehicle.status {
            VehicleStatus::Available => (None, "vehicle is available".to_string()),
            other => (
                Some(RejectReason::VehicleUnavailable),
                format!("vehicle is {}", other.label()),
            ),
        },
        EligibilityRule::DriverAvailable => match driver.status {
            DriverStatus::Available => (None, "driver is available".to_string()),
            DriverStatus::Suspended => (
                Some(RejectReason::DriverSuspended),
                "driver is suspended".to_string(),
            ),
            other => (
                Some(RejectReason::DriverUnavailable),
                format!("driver is {}", other.label()),
            ),
        },
        EligibilityRule::CargoWithinCapacity => {
            if trip.cargo_weight_kg <= vehicle.max_load_capacity_kg {
                (
                    None,
                    format!(
                        "cargo {} kg within capacity {} kg",
                        trip.cargo_weight_kg, vehicle.max_load_capacity_kg
                    ),
                )
            } else {
                (
                    Some(RejectReason::OverCapacity),
                    format!(
                        "cargo {} kg exceeds capacity {} kg",
                        trip.cargo_weight_kg, vehicle.max_load_capacity_kg
                    ),
                )
            }
        }
        EligibilityRule::LicenseCurrent => {
            if driver.license_valid_on(today) {
                (None, format!("license valid until {}", driver.license_expiry))
            } else {
                (
                    Some(RejectReason::LicenseExpired),
                    format!("license expired on {}", driver.license_expiry),
                )
            }
        }
        EligibilityRule::LicenseCategoryMatches => {
            if driver.license_category == trip.required_license_category {
                (
                    None,
                    format!("license category {}", driver.license_category.label()),
                )
            } else {
                (
                    Some(RejectReason::LicenseCategoryMismatch),
                    format!(
                        "trip requires {}, driver holds {}",
                        trip.required_license_category.label(),
                        driver.license_category.label()
                    ),
                )
            }
        }
    };

    RuleCheck {
        rule,
        failure,
        notes,
    }
}
