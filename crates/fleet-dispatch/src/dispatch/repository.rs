use serde::Serialize;

use super::domain::{
    Driver, DriverId, FuelRecord, MaintenanceRecord, ServiceLog, ServiceLogId, Shipment,
    ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
use super::status::{DriverStatus, VehicleStatus};

/// Entity updates committed together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub shipments: Vec<Shipment>,
    /// Upserted: opening a visit inserts, closing replaces.
    pub service_logs: Vec<ServiceLog>,
    /// Appended to the maintenance ledger.
    pub maintenance: Vec<MaintenanceRecord>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn trip(mut self, trip: Trip) -> Self {
        self.trips.push(trip);
        self
    }

    pub fn shipment(mut self, shipment: Shipment) -> Self {
        self.shipments.push(shipment);
        self
    }

    pub fn service_log(mut self, log: ServiceLog) -> Self {
        self.service_logs.push(log);
        self
    }

    pub fn maintenance(mut self, record: MaintenanceRecord) -> Self {
        self.maintenance.push(record);
        self
    }
}

/// A vehicle's fuel and maintenance records, read as one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostLedger {
    pub fuel: Vec<FuelRecord>,
    pub maintenance: Vec<MaintenanceRecord>,
}

/// Storage abstraction so the dispatch service can be exercised in isolation.
pub trait FleetRepository: Send + Sync {
    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError>;
    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError>;
    fn insert_driver(&self, driver: Driver) -> Result<Driver, RepositoryError>;
    fn driver(&self, id: &DriverId) -> Result<Option<Driver>, RepositoryError>;
    fn insert_shipment(&self, shipment: Shipment) -> Result<Shipment, RepositoryError>;
    fn shipment(&self, id: &ShipmentId) -> Result<Option<Shipment>, RepositoryError>;
    fn insert_trip(&self, trip: Trip) -> Result<Trip, RepositoryError>;
    fn trip(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError>;
    fn service_log(&self, id: &ServiceLogId) -> Result<Option<ServiceLog>, RepositoryError>;
    fn open_service_logs(&self, vehicle: &VehicleId) -> Result<Vec<ServiceLog>, RepositoryError>;
    /// The `Dispatched` trip bound to `vehicle`, if one exists.
    fn active_trip(&self, vehicle: &VehicleId) -> Result<Option<Trip>, RepositoryError>;
    fn append_fuel(&self, record: FuelRecord) -> Result<(), RepositoryError>;
    fn append_maintenance(&self, record: MaintenanceRecord) -> Result<(), RepositoryError>;
    fn cost_ledger(&self, vehicle: &VehicleId) -> Result<CostLedger, RepositoryError>;
    /// Apply every change in the set atomically. Vehicles, drivers, trips and
    /// shipments must already exist.
    fn commit(&self, changes: ChangeSet) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} conflicts with an existing record: {detail}")]
    Conflict { entity: &'static str, detail: String },
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Outbound hook for the notification layer.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DispatchEvent) -> Result<(), PublishError>;
}

/// State changes announced after they are committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DispatchEvent {
    TripDispatched {
        trip: TripId,
        vehicle: VehicleId,
        driver: DriverId,
    },
    TripCompleted {
        trip: TripId,
    },
    TripCancelled {
        trip: TripId,
    },
    VehicleStatusChanged {
        vehicle: VehicleId,
        from: VehicleStatus,
        to: VehicleStatus,
    },
    DriverStatusChanged {
        driver: DriverId,
        from: DriverStatus,
        to: DriverStatus,
    },
    ServiceLogOpened {
        log: ServiceLogId,
        vehicle: VehicleId,
    },
    ServiceLogClosed {
        log: ServiceLogId,
        vehicle: VehicleId,
    },
}

impl DispatchEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            DispatchEvent::TripDispatched { .. } => "trip_dispatched",
            DispatchEvent::TripCompleted { .. } => "trip_completed",
            DispatchEvent::TripCancelled { .. } => "trip_cancelled",
            DispatchEvent::VehicleStatusChanged { .. } => "vehicle_status_changed",
            DispatchEvent::DriverStatusChanged { .. } => "driver_status_changed",
            DispatchEvent::ServiceLogOpened { .. } => "service_log_opened",
            DispatchEvent::ServiceLogClosed { .. } => "service_log_closed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}
