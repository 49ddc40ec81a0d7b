//! Validation of administrative input before it reaches the registry.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::domain::{
    Driver, DriverId, FuelRecord, MaintenanceRecord, NewDriver, NewFuelRecord,
    NewMaintenanceRecord, NewShipment, NewTrip, NewVehicle, RecordId, ServiceRequest, Shipment,
    ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
use super::status::{DriverStatus, ShipmentStatus, TripStatus, VehicleStatus};

/// Malformed administrative input. Distinct from rule-based rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("license plate can contain letters, numbers, and hyphen only")]
    InvalidLicensePlate,
    #[error("{field} must be greater than zero (found {found})")]
    NotPositive { field: &'static str, found: Decimal },
    #[error("{field} must not be negative (found {found})")]
    Negative { field: &'static str, found: Decimal },
    #[error("safety score must be between 0 and 100 (found {0})")]
    SafetyScoreOutOfRange(Decimal),
    #[error("origin and destination cannot be the same")]
    SameOriginAndDestination,
    #[error("planned distance must be at least 1 km")]
    PlannedDistanceTooShort,
    #[error("cargo weight is required when the trip carries no shipment")]
    MissingCargoWeight,
    #[error("fuel log date cannot be in the future ({0})")]
    FutureFuelDate(NaiveDate),
    #[error("fuel log vehicle must match trip vehicle")]
    FuelTripVehicleMismatch,
    #[error("final odometer {found} km cannot be less than the vehicle odometer {current} km")]
    OdometerRegression { current: u32, found: u32 },
}

fn require_text(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}

fn require_positive(value: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive {
            field,
            found: value,
        });
    }
    Ok(value)
}

pub(crate) fn require_non_negative(
    value: Decimal,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field,
            found: value,
        });
    }
    Ok(value)
}

pub(crate) fn vehicle_from_request(
    request: NewVehicle,
    id: VehicleId,
) -> Result<Vehicle, ValidationError> {
    let license_plate = require_text(request.license_plate, "license_plate")?;
    if !license_plate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidLicensePlate);
    }

    Ok(Vehicle {
        id,
        name_model: require_text(request.name_model, "name_model")?,
        license_plate,
        region: request
            .region
            .map(|region| region.trim().to_string())
            .filter(|region| !region.is_empty()),
        max_load_capacity_kg: require_positive(
            request.max_load_capacity_kg,
            "max_load_capacity_kg",
        )?,
        odometer_km: request.odometer_km,
        acquisition_cost: require_non_negative(request.acquisition_cost, "acquisition_cost")?,
        status: VehicleStatus::Available,
    })
}

pub(crate) fn driver_from_request(
    request: NewDriver,
    id: DriverId,
) -> Result<Driver, ValidationError> {
    if request.safety_score < Decimal::ZERO || request.safety_score > Decimal::ONE_HUNDRED {
        return Err(ValidationError::SafetyScoreOutOfRange(request.safety_score));
    }

    Ok(Driver {
        id,
        full_name: require_text(request.full_name, "full_name")?,
        license_number: require_text(request.license_number, "license_number")?,
        license_category: request.license_category,
        license_expiry: request.license_expiry,
        safety_score: request.safety_score,
        status: DriverStatus::Available,
    })
}

pub(crate) fn shipment_from_request(
    request: NewShipment,
    id: ShipmentId,
) -> Result<Shipment, ValidationError> {
    let origin = require_text(request.origin, "origin")?;
    let destination = require_text(request.destination, "destination")?;
    if origin.to_lowercase() == destination.to_lowercase() {
        return Err(ValidationError::SameOriginAndDestination);
    }

    Ok(Shipment {
        id,
        reference_code: require_text(request.reference_code, "reference_code")?,
        origin,
        destination,
        cargo_weight_kg: require_positive(request.cargo_weight_kg, "cargo_weight_kg")?,
        status: ShipmentStatus::Pending,
    })
}

/// `shipment_weight` is the weight of the attached shipment, when there is one.
pub(crate) fn trip_from_request(
    request: NewTrip,
    id: TripId,
    shipment_weight: Option<Decimal>,
    created_at: DateTime<Utc>,
) -> Result<Trip, ValidationError> {
    let cargo_weight_kg = request
        .cargo_weight_kg
        .or(shipment_weight)
        .ok_or(ValidationError::MissingCargoWeight)?;
    if request.planned_distance_km == 0 {
        return Err(ValidationError::PlannedDistanceTooShort);
    }

    Ok(Trip {
        id,
        trip_code: require_text(request.trip_code, "trip_code")?,
        cargo_weight_kg: require_non_negative(cargo_weight_kg, "cargo_weight_kg")?,
        required_license_category: request.required_license_category,
        vehicle: None,
        driver: None,
        shipment: request.shipment,
        planned_distance_km: request.planned_distance_km,
        revenue: require_non_negative(request.revenue, "revenue")?,
        final_odometer_km: None,
        status: TripStatus::Pending,
        created_at,
        completed_at: None,
    })
}

pub(crate) fn service_request(request: ServiceRequest) -> Result<ServiceRequest, ValidationError> {
    Ok(ServiceRequest {
        service_type: require_text(request.service_type, "service_type")?,
        notes: request
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty()),
    })
}

/// `trip_vehicle` is the vehicle bound to the referenced trip, when a trip is given.
pub(crate) fn fuel_record_from_request(
    request: NewFuelRecord,
    id: RecordId,
    trip_vehicle: Option<&VehicleId>,
    today: NaiveDate,
    recorded_at: DateTime<Utc>,
) -> Result<FuelRecord, ValidationError> {
    if request.logged_on > today {
        return Err(ValidationError::FutureFuelDate(request.logged_on));
    }
    if request.trip.is_some() && trip_vehicle != Some(&request.vehicle) {
        return Err(ValidationError::FuelTripVehicleMismatch);
    }

    Ok(FuelRecord {
        id,
        vehicle: request.vehicle,
        trip: request.trip,
        liters: require_positive(request.liters, "liters")?,
        cost: require_non_negative(request.cost, "cost")?,
        odometer_km: request.odometer_km,
        logged_on: request.logged_on,
        recorded_at,
    })
}

pub(crate) fn maintenance_record_from_request(
    request: NewMaintenanceRecord,
    id: RecordId,
    recorded_at: DateTime<Utc>,
) -> Result<MaintenanceRecord, ValidationError> {
    Ok(MaintenanceRecord {
        id,
        vehicle: request.vehicle,
        service_log: None,
        description: require_text(request.description, "description")?,
        cost: require_non_negative(request.cost, "cost")?,
        performed_on: request.performed_on,
        recorded_at,
    })
}

pub(crate) fn check_final_odometer(current: u32, found: u32) -> Result<u32, ValidationError> {
    if found < current {
        return Err(ValidationError::OdometerRegression { current, found });
    }
    Ok(found)
}
