use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::{DriverStatus, ShipmentStatus, TripStatus, VehicleStatus};

/// Identifier wrapper for registered vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub String);

/// Identifier wrapper for driver profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipmentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceLogId(pub String);

/// Identifier shared by the append-only fuel and maintenance ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Driving license classes a driver can hold and a trip can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseCategory {
    A,
    B,
    C,
    Ce,
    D,
}

impl LicenseCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Ce => "CE",
            Self::D => "D",
        }
    }
}

/// Fleet registry entry. Status is mutated only by the dispatch service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name_model: String,
    pub license_plate: String,
    pub region: Option<String>,
    pub max_load_capacity_kg: Decimal,
    pub odometer_km: u32,
    pub acquisition_cost: Decimal,
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub full_name: String,
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry: NaiveDate,
    pub safety_score: Decimal,
    pub status: DriverStatus,
}

impl Driver {
    /// A license is valid through its expiry date inclusive.
    pub fn license_valid_on(&self, today: NaiveDate) -> bool {
        self.license_expiry >= today
    }
}

/// Cargo consignment that a trip can carry from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub reference_code: String,
    pub origin: String,
    pub destination: String,
    pub cargo_weight_kg: Decimal,
    pub status: ShipmentStatus,
}

/// A trip holds weak references to its vehicle and driver; both stay unset while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub trip_code: String,
    pub cargo_weight_kg: Decimal,
    pub required_license_category: LicenseCategory,
    pub vehicle: Option<VehicleId>,
    pub driver: Option<DriverId>,
    pub shipment: Option<ShipmentId>,
    pub planned_distance_km: u32,
    pub revenue: Decimal,
    pub final_odometer_km: Option<u32>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Vehicle and driver bound at dispatch, if any.
    pub fn assignment(&self) -> Option<(&VehicleId, &DriverId)> {
        self.vehicle.as_ref().zip(self.driver.as_ref())
    }
}

/// Maintenance visit bounding a vehicle's `InShop` window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLog {
    pub id: ServiceLogId,
    pub vehicle: VehicleId,
    pub service_type: String,
    pub notes: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub cost: Decimal,
}

impl ServiceLog {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub id: RecordId,
    pub vehicle: VehicleId,
    pub trip: Option<TripId>,
    pub liters: Decimal,
    pub cost: Decimal,
    pub odometer_km: u32,
    pub logged_on: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: RecordId,
    pub vehicle: VehicleId,
    pub service_log: Option<ServiceLogId>,
    pub description: String,
    pub cost: Decimal,
    pub performed_on: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

/// Administrative request to add a vehicle to the fleet registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name_model: String,
    pub license_plate: String,
    #[serde(default)]
    pub region: Option<String>,
    pub max_load_capacity_kg: Decimal,
    #[serde(default)]
    pub odometer_km: u32,
    #[serde(default)]
    pub acquisition_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDriver {
    pub full_name: String,
    pub license_number: String,
    pub license_category: LicenseCategory,
    pub license_expiry: NaiveDate,
    #[serde(default = "default_safety_score")]
    pub safety_score: Decimal,
}

fn default_safety_score() -> Decimal {
    Decimal::ONE_HUNDRED
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShipment {
    pub reference_code: String,
    pub origin: String,
    pub destination: String,
    pub cargo_weight_kg: Decimal,
}

/// Trip draft. Cargo defaults to the shipment weight when a shipment is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrip {
    pub trip_code: String,
    #[serde(default)]
    pub cargo_weight_kg: Option<Decimal>,
    pub required_license_category: LicenseCategory,
    #[serde(default)]
    pub shipment: Option<ShipmentId>,
    #[serde(default = "default_planned_distance")]
    pub planned_distance_km: u32,
    #[serde(default)]
    pub revenue: Decimal,
}

fn default_planned_distance() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFuelRecord {
    pub vehicle: VehicleId,
    #[serde(default)]
    pub trip: Option<TripId>,
    pub liters: Decimal,
    pub cost: Decimal,
    #[serde(default)]
    pub odometer_km: u32,
    pub logged_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
    pub vehicle: VehicleId,
    pub description: String,
    pub cost: Decimal,
    pub performed_on: NaiveDate,
}
