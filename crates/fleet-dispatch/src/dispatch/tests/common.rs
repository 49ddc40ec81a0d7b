use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::dispatch::domain::{
    Driver, DriverId, FuelRecord, LicenseCategory, MaintenanceRecord, NewDriver, NewTrip,
    NewVehicle, ServiceLog, ServiceLogId, Shipment, ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
use crate::dispatch::memory::{InMemoryEventPublisher, InMemoryFleetRepository};
use crate::dispatch::repository::{
    ChangeSet, CostLedger, DispatchEvent, EventPublisher, FleetRepository, PublishError,
    RepositoryError,
};
use crate::dispatch::status::{DriverStatus, TripStatus, VehicleStatus};
use crate::dispatch::{DispatchConfig, DispatchService};

pub(super) type MemoryService = DispatchService<InMemoryFleetRepository, InMemoryEventPublisher>;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

pub(super) fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn kg(value: i64) -> Decimal {
    Decimal::from(value)
}

pub(super) fn vehicle(id: &str, capacity_kg: i64, status: VehicleStatus) -> Vehicle {
    Vehicle {
        id: VehicleId(id.to_string()),
        name_model: "Volvo FH16".to_string(),
        license_plate: format!("PLT-{id}"),
        region: Some("North".to_string()),
        max_load_capacity_kg: kg(capacity_kg),
        odometer_km: 12_000,
        acquisition_cost: Decimal::from(85_000),
        status,
    }
}

pub(super) fn driver(
    id: &str,
    category: LicenseCategory,
    expiry: NaiveDate,
    status: DriverStatus,
) -> Driver {
    Driver {
        id: DriverId(id.to_string()),
        full_name: "Alex Morgan".to_string(),
        license_number: format!("LIC-{id}"),
        license_category: category,
        license_expiry: expiry,
        safety_score: Decimal::from(92),
        status,
    }
}

pub(super) fn trip(id: &str, cargo_kg: i64, category: LicenseCategory) -> Trip {
    Trip {
        id: TripId(id.to_string()),
        trip_code: format!("TRP-{id}"),
        cargo_weight_kg: kg(cargo_kg),
        required_license_category: category,
        vehicle: None,
        driver: None,
        shipment: None,
        planned_distance_km: 120,
        revenue: Decimal::from(1_500),
        final_odometer_km: None,
        status: TripStatus::Pending,
        created_at: instant(),
        completed_at: None,
    }
}

pub(super) fn service_log(id: &str, vehicle: &str) -> ServiceLog {
    ServiceLog {
        id: ServiceLogId(id.to_string()),
        vehicle: VehicleId(vehicle.to_string()),
        service_type: "Oil change".to_string(),
        notes: None,
        opened_at: instant(),
        closed_at: None,
        cost: Decimal::ZERO,
    }
}

pub(super) fn far_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 12, 31).expect("valid date")
}

pub(super) fn new_vehicle(plate: &str, capacity_kg: i64) -> NewVehicle {
    NewVehicle {
        name_model: "Scania R450".to_string(),
        license_plate: plate.to_string(),
        region: Some("West".to_string()),
        max_load_capacity_kg: kg(capacity_kg),
        odometer_km: 40_000,
        acquisition_cost: Decimal::from(120_000),
    }
}

pub(super) fn new_driver(license: &str, category: LicenseCategory, expiry: NaiveDate) -> NewDriver {
    NewDriver {
        full_name: "Sam Rivera".to_string(),
        license_number: license.to_string(),
        license_category: category,
        license_expiry: expiry,
        safety_score: Decimal::from(88),
    }
}

pub(super) fn new_trip(code: &str, cargo_kg: i64, category: LicenseCategory) -> NewTrip {
    NewTrip {
        trip_code: code.to_string(),
        cargo_weight_kg: Some(kg(cargo_kg)),
        required_license_category: category,
        shipment: None,
        planned_distance_km: 250,
        revenue: Decimal::from(2_400),
    }
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryFleetRepository>,
    Arc<InMemoryEventPublisher>,
) {
    let repository = Arc::new(InMemoryFleetRepository::new());
    let events = Arc::new(InMemoryEventPublisher::new());
    let service = DispatchService::new(
        repository.clone(),
        events.clone(),
        DispatchConfig {
            lock_timeout: Duration::from_millis(50),
        },
    );
    (service, repository, events)
}

/// A registered 1000 kg vehicle, a category C driver, and a pending 800 kg trip.
pub(super) struct Fleet {
    pub(super) vehicle: VehicleId,
    pub(super) driver: DriverId,
    pub(super) trip: TripId,
}

pub(super) fn seed(service: &MemoryService) -> Fleet {
    let vehicle = service
        .register_vehicle(new_vehicle("TRK-100", 1_000))
        .expect("vehicle registers");
    let driver = service
        .register_driver(new_driver("DL-100", LicenseCategory::C, far_expiry()))
        .expect("driver registers");
    let trip = service
        .create_trip(new_trip("T-100", 800, LicenseCategory::C))
        .expect("trip created");
    Fleet {
        vehicle: vehicle.id,
        driver: driver.id,
        trip: trip.id,
    }
}

pub(super) fn dispatched(service: &MemoryService) -> Fleet {
    let fleet = seed(service);
    service
        .dispatch_on(&fleet.trip, &fleet.vehicle, &fleet.driver, today())
        .expect("dispatch accepted");
    fleet
}

/// Repository whose storage is offline.
pub(super) struct UnavailableRepository;

impl UnavailableRepository {
    fn offline<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl FleetRepository for UnavailableRepository {
    fn insert_vehicle(&self, _vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        Self::offline()
    }
    fn vehicle(&self, _id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Self::offline()
    }
    fn insert_driver(&self, _driver: Driver) -> Result<Driver, RepositoryError> {
        Self::offline()
    }
    fn driver(&self, _id: &DriverId) -> Result<Option<Driver>, RepositoryError> {
        Self::offline()
    }
    fn insert_shipment(&self, _shipment: Shipment) -> Result<Shipment, RepositoryError> {
        Self::offline()
    }
    fn shipment(&self, _id: &ShipmentId) -> Result<Option<Shipment>, RepositoryError> {
        Self::offline()
    }
    fn insert_trip(&self, _trip: Trip) -> Result<Trip, RepositoryError> {
        Self::offline()
    }
    fn trip(&self, _id: &TripId) -> Result<Option<Trip>, RepositoryError> {
        Self::offline()
    }
    fn service_log(&self, _id: &ServiceLogId) -> Result<Option<ServiceLog>, RepositoryError> {
        Self::offline()
    }
    fn open_service_logs(&self, _vehicle: &VehicleId) -> Result<Vec<ServiceLog>, RepositoryError> {
        Self::offline()
    }
    fn active_trip(&self, _vehicle: &VehicleId) -> Result<Option<Trip>, RepositoryError> {
        Self::offline()
    }
    fn append_fuel(&self, _record: FuelRecord) -> Result<(), RepositoryError> {
        Self::offline()
    }
    fn append_maintenance(&self, _record: MaintenanceRecord) -> Result<(), RepositoryError> {
        Self::offline()
    }
    fn cost_ledger(&self, _vehicle: &VehicleId) -> Result<CostLedger, RepositoryError> {
        Self::offline()
    }
    fn commit(&self, _changes: ChangeSet) -> Result<(), RepositoryError> {
        Self::offline()
    }
}

/// In-memory repository that pauses inside `commit` so a second request can
/// observe the first one's locks.
pub(super) struct SlowCommitRepository {
    inner: InMemoryFleetRepository,
    delay: Duration,
    entered: Mutex<Option<Sender<()>>>,
}

impl SlowCommitRepository {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryFleetRepository::new(),
            delay,
            entered: Mutex::new(None),
        }
    }

    /// The next commit reports on `entered`, then sleeps for the delay.
    pub(super) fn signal_next_commit(&self, entered: Sender<()>) {
        *self.entered.lock().expect("signal mutex") = Some(entered);
    }
}

impl FleetRepository for SlowCommitRepository {
    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        self.inner.insert_vehicle(vehicle)
    }
    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        self.inner.vehicle(id)
    }
    fn insert_driver(&self, driver: Driver) -> Result<Driver, RepositoryError> {
        self.inner.insert_driver(driver)
    }
    fn driver(&self, id: &DriverId) -> Result<Option<Driver>, RepositoryError> {
        self.inner.driver(id)
    }
    fn insert_shipment(&self, shipment: Shipment) -> Result<Shipment, RepositoryError> {
        self.inner.insert_shipment(shipment)
    }
    fn shipment(&self, id: &ShipmentId) -> Result<Option<Shipment>, RepositoryError> {
        self.inner.shipment(id)
    }
    fn insert_trip(&self, trip: Trip) -> Result<Trip, RepositoryError> {
        self.inner.insert_trip(trip)
    }
    fn trip(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError> {
        self.inner.trip(id)
    }
    fn service_log(&self, id: &ServiceLogId) -> Result<Option<ServiceLog>, RepositoryError> {
        self.inner.service_log(id)
    }
    fn open_service_logs(&self, vehicle: &VehicleId) -> Result<Vec<ServiceLog>, RepositoryError> {
        self.inner.open_service_logs(vehicle)
    }
    fn active_trip(&self, vehicle: &VehicleId) -> Result<Option<Trip>, RepositoryError> {
        self.inner.active_trip(vehicle)
    }
    fn append_fuel(&self, record: FuelRecord) -> Result<(), RepositoryError> {
        self.inner.append_fuel(record)
    }
    fn append_maintenance(&self, record: MaintenanceRecord) -> Result<(), RepositoryError> {
        self.inner.append_maintenance(record)
    }
    fn cost_ledger(&self, vehicle: &VehicleId) -> Result<CostLedger, RepositoryError> {
        self.inner.cost_ledger(vehicle)
    }
    fn commit(&self, changes: ChangeSet) -> Result<(), RepositoryError> {
        if let Some(entered) = self.entered.lock().expect("signal mutex").take() {
            entered.send(()).expect("signal commit");
            thread::sleep(self.delay);
        }
        self.inner.commit(changes)
    }
}

/// Publisher whose transport always fails.
#[derive(Default)]
pub(super) struct BrokenPublisher;

impl EventPublisher for BrokenPublisher {
    fn publish(&self, _event: DispatchEvent) -> Result<(), PublishError> {
        Err(PublishError::Transport("broker unreachable".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
