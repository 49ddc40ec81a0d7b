//! Dispatch and validation engine.
//!
//! Decides whether a trip may be assigned to a vehicle and driver, keeps
//! vehicle, driver, trip and shipment statuses consistent as trips and service
//! visits progress, and aggregates per-vehicle operational cost.

pub mod config;
pub mod cost;
pub mod domain;
pub mod eligibility;
pub(crate) mod intake;
pub mod lifecycle;
pub mod locks;
pub mod memory;
pub mod reject;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use config::DispatchConfig;
pub use cost::{CostAggregator, OperationalCost};
pub use domain::{
    Driver, DriverId, FuelRecord, LicenseCategory, MaintenanceRecord, NewDriver, NewFuelRecord,
    NewMaintenanceRecord, NewShipment, NewTrip, NewVehicle, RecordId, ServiceLog, ServiceLogId,
    ServiceRequest, Shipment, ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
pub use eligibility::{
    EligibilityAssessment, EligibilityChecker, EligibilityDecision, EligibilityRule, RuleCheck,
};
pub use intake::ValidationError;
pub use lifecycle::VehicleHolds;
pub use locks::{LockContention, ResourceGuard, ResourceKey, ResourceLocks};
pub use memory::{InMemoryEventPublisher, InMemoryFleetRepository};
pub use reject::RejectReason;
pub use repository::{
    ChangeSet, CostLedger, DispatchEvent, EventPublisher, FleetRepository, PublishError,
    RepositoryError,
};
pub use router::dispatch_router;
pub use service::{DispatchError, DispatchService};
pub use status::{
    DriverEvent, DriverStatus, InvalidTransition, ShipmentEvent, ShipmentStatus, TripEvent,
    TripStatus, VehicleEvent, VehicleStatus,
};
