use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::config::DispatchConfig;
use super::cost::{CostAggregator, OperationalCost};
use super::domain::{
    Driver, DriverId, FuelRecord, MaintenanceRecord, NewDriver, NewFuelRecord,
    NewMaintenanceRecord, NewShipment, NewTrip, NewVehicle, RecordId, ServiceLog, ServiceLogId,
    ServiceRequest, Shipment, ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
use super::eligibility::{EligibilityAssessment, EligibilityChecker, EligibilityDecision};
use super::intake::{self, ValidationError};
use super::lifecycle::{self, VehicleHolds};
use super::locks::{LockContention, ResourceGuard, ResourceKey, ResourceLocks};
use super::reject::RejectReason;
use super::repository::{ChangeSet, DispatchEvent, EventPublisher, FleetRepository, RepositoryError};
use super::status::{
    DriverEvent, DriverStatus, ShipmentEvent, TripEvent, TripStatus, VehicleEvent, VehicleStatus,
};
use super::status::InvalidTransition;

/// Assignment orchestrator: runs the eligibility rules, serializes commits per
/// resource, and reconciles statuses as trips and service visits progress.
pub struct DispatchService<R, P> {
    repository: Arc<R>,
    events: Arc<P>,
    locks: ResourceLocks,
    checker: EligibilityChecker,
    costs: CostAggregator,
    sequence: AtomicU64,
}

impl<R, P> DispatchService<R, P>
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    pub fn new(repository: Arc<R>, events: Arc<P>, config: DispatchConfig) -> Self {
        Self {
            repository,
            events,
            locks: ResourceLocks::new(config.lock_timeout),
            checker: EligibilityChecker::new(),
            costs: CostAggregator::new(),
            sequence: AtomicU64::new(1),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{id:06}")
    }

    fn lock<I>(&self, keys: I) -> Result<ResourceGuard, DispatchError>
    where
        I: IntoIterator<Item = ResourceKey>,
    {
        self.locks.acquire(keys).map_err(|contention: LockContention| {
            warn!(key = ?contention.key, waited = ?contention.waited, "resource busy");
            DispatchError::from(contention)
        })
    }

    /// Log the outcome class of a public operation and pass it through.
    fn observe<T>(
        &self,
        operation: &'static str,
        result: Result<T, DispatchError>,
    ) -> Result<T, DispatchError> {
        match &result {
            Err(DispatchError::Rejected(reason)) => {
                info!(operation, reason = reason.code(), "request rejected");
            }
            Err(DispatchError::Validation(err)) => {
                info!(operation, error = %err, "request failed validation");
            }
            Err(DispatchError::Repository(RepositoryError::NotFound { entity, id })) => {
                info!(operation, entity, id = %id, "referenced record not found");
            }
            Err(DispatchError::Repository(err)) => {
                error!(operation, error = %err, "repository failure");
            }
            Ok(_) => {}
        }
        result
    }

    fn publish(&self, event: DispatchEvent) {
        let name = event.name();
        if let Err(err) = self.events.publish(event) {
            warn!(event = name, error = %err, "dispatch event not delivered");
        }
    }

    fn publish_vehicle_change(&self, before: VehicleStatus, vehicle: &Vehicle) {
        if before != vehicle.status {
            self.publish(DispatchEvent::VehicleStatusChanged {
                vehicle: vehicle.id.clone(),
                from: before,
                to: vehicle.status,
            });
        }
    }

    fn publish_driver_change(&self, before: DriverStatus, driver: &Driver) {
        if before != driver.status {
            self.publish(DispatchEvent::DriverStatusChanged {
                driver: driver.id.clone(),
                from: before,
                to: driver.status,
            });
        }
    }

    fn load_vehicle(&self, id: &VehicleId) -> Result<Vehicle, DispatchError> {
        let vehicle = self
            .repository
            .vehicle(id)?
            .ok_or_else(|| RepositoryError::not_found("vehicle", id.0.clone()))?;
        Ok(vehicle)
    }

    fn load_driver(&self, id: &DriverId) -> Result<Driver, DispatchError> {
        let driver = self
            .repository
            .driver(id)?
            .ok_or_else(|| RepositoryError::not_found("driver", id.0.clone()))?;
        Ok(driver)
    }

    fn load_trip(&self, id: &TripId) -> Result<Trip, DispatchError> {
        let trip = self
            .repository
            .trip(id)?
            .ok_or_else(|| RepositoryError::not_found("trip", id.0.clone()))?;
        Ok(trip)
    }

    fn load_shipment(&self, id: &ShipmentId) -> Result<Shipment, DispatchError> {
        let shipment = self
            .repository
            .shipment(id)?
            .ok_or_else(|| RepositoryError::not_found("shipment", id.0.clone()))?;
        Ok(shipment)
    }

    fn load_service_log(&self, id: &ServiceLogId) -> Result<ServiceLog, DispatchError> {
        let log = self
            .repository
            .service_log(id)?
            .ok_or_else(|| RepositoryError::not_found("service log", id.0.clone()))?;
        Ok(log)
    }

    /// Register a vehicle; new vehicles start `Available`.
    pub fn register_vehicle(&self, request: NewVehicle) -> Result<Vehicle, DispatchError> {
        let result = intake::vehicle_from_request(request, VehicleId(self.next_id("veh")))
            .map_err(DispatchError::from)
            .and_then(|vehicle| Ok(self.repository.insert_vehicle(vehicle)?));
        if let Ok(vehicle) = &result {
            info!(vehicle = %vehicle.id.0, plate = %vehicle.license_plate, "vehicle registered");
        }
        self.observe("register_vehicle", result)
    }

    pub fn register_driver(&self, request: NewDriver) -> Result<Driver, DispatchError> {
        let result = intake::driver_from_request(request, DriverId(self.next_id("drv")))
            .map_err(DispatchError::from)
            .and_then(|driver| Ok(self.repository.insert_driver(driver)?));
        if let Ok(driver) = &result {
            info!(driver = %driver.id.0, category = driver.license_category.label(), "driver registered");
        }
        self.observe("register_driver", result)
    }

    pub fn create_shipment(&self, request: NewShipment) -> Result<Shipment, DispatchError> {
        let result = intake::shipment_from_request(request, ShipmentId(self.next_id("shp")))
            .map_err(DispatchError::from)
            .and_then(|shipment| Ok(self.repository.insert_shipment(shipment)?));
        self.observe("create_shipment", result)
    }

    /// Create a pending trip. Pending trips hold no resource locks.
    pub fn create_trip(&self, request: NewTrip) -> Result<Trip, DispatchError> {
        let result = self.create_trip_inner(request);
        if let Ok(trip) = &result {
            info!(trip = %trip.id.0, code = %trip.trip_code, "trip created");
        }
        self.observe("create_trip", result)
    }

    fn create_trip_inner(&self, request: NewTrip) -> Result<Trip, DispatchError> {
        let shipment_weight = match &request.shipment {
            Some(id) => Some(self.load_shipment(id)?.cargo_weight_kg),
            None => None,
        };
        let trip = intake::trip_from_request(
            request,
            TripId(self.next_id("trip")),
            shipment_weight,
            Utc::now(),
        )?;
        Ok(self.repository.insert_trip(trip)?)
    }

    pub fn vehicle(&self, id: &VehicleId) -> Result<Vehicle, DispatchError> {
        self.load_vehicle(id)
    }

    pub fn driver(&self, id: &DriverId) -> Result<Driver, DispatchError> {
        self.load_driver(id)
    }

    pub fn trip(&self, id: &TripId) -> Result<Trip, DispatchError> {
        self.load_trip(id)
    }

    pub fn shipment(&self, id: &ShipmentId) -> Result<Shipment, DispatchError> {
        self.load_shipment(id)
    }

    pub fn service_log(&self, id: &ServiceLogId) -> Result<ServiceLog, DispatchError> {
        self.load_service_log(id)
    }

    /// Run the eligibility rules against current state without committing anything.
    pub fn preview(
        &self,
        trip: &TripId,
        vehicle: &VehicleId,
        driver: &DriverId,
        today: NaiveDate,
    ) -> Result<EligibilityAssessment, DispatchError> {
        let trip = self.load_trip(trip)?;
        let vehicle = self.load_vehicle(vehicle)?;
        let driver = self.load_driver(driver)?;
        Ok(self.checker.assess(&trip, &vehicle, &driver, today))
    }

    /// Dispatch a pending trip to a vehicle and driver, checking licenses against today.
    pub fn dispatch(
        &self,
        trip: &TripId,
        vehicle: &VehicleId,
        driver: &DriverId,
    ) -> Result<Trip, DispatchError> {
        self.dispatch_on(trip, vehicle, driver, Local::now().date_naive())
    }

    pub fn dispatch_on(
        &self,
        trip: &TripId,
        vehicle: &VehicleId,
        driver: &DriverId,
        today: NaiveDate,
    ) -> Result<Trip, DispatchError> {
        let result = self.dispatch_inner(trip, vehicle, driver, today);
        self.observe("dispatch", result)
    }

    fn dispatch_inner(
        &self,
        trip_id: &TripId,
        vehicle_id: &VehicleId,
        driver_id: &DriverId,
        today: NaiveDate,
    ) -> Result<Trip, DispatchError> {
        // the shipment reference is fixed at creation, so it is safe to read unlocked
        let shipment_id = self.load_trip(trip_id)?.shipment;
        let mut keys = vec![
            ResourceKey::Vehicle(vehicle_id.clone()),
            ResourceKey::Driver(driver_id.clone()),
            ResourceKey::Trip(trip_id.clone()),
        ];
        keys.extend(shipment_id.clone().map(ResourceKey::Shipment));
        let _guard = self.lock(keys)?;

        let mut trip = self.load_trip(trip_id)?;
        match trip.status {
            TripStatus::Pending => {}
            TripStatus::Dispatched => return Err(RejectReason::AlreadyDispatched.into()),
            TripStatus::Completed | TripStatus::Cancelled => {
                return Err(RejectReason::InvalidTripState.into())
            }
        }

        let mut vehicle = self.load_vehicle(vehicle_id)?;
        let mut driver = self.load_driver(driver_id)?;
        if let EligibilityDecision::Reject(reason) =
            self.checker.check(&trip, &vehicle, &driver, today)
        {
            return Err(reason.into());
        }

        let vehicle_before = vehicle.status;
        let driver_before = driver.status;
        vehicle.status = vehicle.status.apply(VehicleEvent::Dispatch)?;
        driver.status = driver.status.apply(DriverEvent::Assign)?;
        trip.status = trip.status.apply(TripEvent::Dispatch)?;
        trip.vehicle = Some(vehicle.id.clone());
        trip.driver = Some(driver.id.clone());

        let mut changes = ChangeSet::new();
        if let Some(id) = &shipment_id {
            let mut shipment = self.load_shipment(id)?;
            shipment.status = shipment.status.apply(ShipmentEvent::Assign)?;
            changes = changes.shipment(shipment);
        }
        self.repository.commit(
            changes
                .vehicle(vehicle.clone())
                .driver(driver.clone())
                .trip(trip.clone()),
        )?;

        info!(
            trip = %trip.id.0,
            vehicle = %vehicle.id.0,
            driver = %driver.id.0,
            cargo_kg = %trip.cargo_weight_kg,
            "trip dispatched"
        );
        self.publish(DispatchEvent::TripDispatched {
            trip: trip.id.clone(),
            vehicle: vehicle.id.clone(),
            driver: driver.id.clone(),
        });
        self.publish_vehicle_change(vehicle_before, &vehicle);
        self.publish_driver_change(driver_before, &driver);

        Ok(trip)
    }

    pub fn complete_trip(&self, trip: &TripId) -> Result<Trip, DispatchError> {
        let result = self.finish_trip(trip, TripEvent::Complete, None);
        self.observe("complete_trip", result)
    }

    /// Complete a trip and advance the vehicle odometer to the reading at arrival.
    pub fn complete_trip_with_odometer(
        &self,
        trip: &TripId,
        final_odometer_km: u32,
    ) -> Result<Trip, DispatchError> {
        let result = self.finish_trip(trip, TripEvent::Complete, Some(final_odometer_km));
        self.observe("complete_trip", result)
    }

    pub fn cancel_trip(&self, trip: &TripId) -> Result<Trip, DispatchError> {
        let result = self.finish_trip(trip, TripEvent::Cancel, None);
        self.observe("cancel_trip", result)
    }

    fn finish_trip(
        &self,
        trip_id: &TripId,
        event: TripEvent,
        final_odometer_km: Option<u32>,
    ) -> Result<Trip, DispatchError> {
        let peek = self.load_trip(trip_id)?;
        let (vehicle_id, driver_id) = match (peek.status, peek.assignment()) {
            (TripStatus::Dispatched, Some((vehicle, driver))) => (vehicle.clone(), driver.clone()),
            _ => return Err(RejectReason::InvalidTripState.into()),
        };
        let mut keys = vec![
            ResourceKey::Vehicle(vehicle_id.clone()),
            ResourceKey::Driver(driver_id.clone()),
            ResourceKey::Trip(trip_id.clone()),
        ];
        keys.extend(peek.shipment.clone().map(ResourceKey::Shipment));
        let _guard = self.lock(keys)?;

        // a concurrent completion may have won the race for the locks
        let mut trip = self.load_trip(trip_id)?;
        if trip.status != TripStatus::Dispatched {
            return Err(RejectReason::InvalidTripState.into());
        }

        let mut vehicle = self.load_vehicle(&vehicle_id)?;
        let mut driver = self.load_driver(&driver_id)?;
        let vehicle_before = vehicle.status;
        let driver_before = driver.status;

        if let Some(reading) = final_odometer_km {
            let reading = intake::check_final_odometer(vehicle.odometer_km, reading)?;
            trip.final_odometer_km = Some(reading);
            vehicle.odometer_km = reading;
        }

        let open_logs = self.repository.open_service_logs(&vehicle_id)?.len();
        lifecycle::release_resources(&mut vehicle, &mut driver, open_logs)?;
        trip.status = trip.status.apply(event)?;
        if trip.status == TripStatus::Completed && trip.completed_at.is_none() {
            trip.completed_at = Some(Utc::now());
        }

        let mut changes = ChangeSet::new();
        if let Some(id) = &trip.shipment {
            let mut shipment = self.load_shipment(id)?;
            let shipment_event = match event {
                TripEvent::Complete => ShipmentEvent::Deliver,
                _ => ShipmentEvent::Cancel,
            };
            shipment.status = shipment.status.apply(shipment_event)?;
            changes = changes.shipment(shipment);
        }
        self.repository.commit(
            changes
                .vehicle(vehicle.clone())
                .driver(driver.clone())
                .trip(trip.clone()),
        )?;

        info!(
            trip = %trip.id.0,
            status = trip.status.label(),
            vehicle_status = vehicle.status.label(),
            "trip finished"
        );
        self.publish(match event {
            TripEvent::Complete => DispatchEvent::TripCompleted {
                trip: trip.id.clone(),
            },
            _ => DispatchEvent::TripCancelled {
                trip: trip.id.clone(),
            },
        });
        self.publish_vehicle_change(vehicle_before, &vehicle);
        self.publish_driver_change(driver_before, &driver);

        Ok(trip)
    }

    /// Open a service visit; the vehicle goes `InShop` unless it is retired.
    pub fn open_service_log(
        &self,
        vehicle: &VehicleId,
        request: ServiceRequest,
    ) -> Result<ServiceLog, DispatchError> {
        let result = self.open_service_log_inner(vehicle, request);
        self.observe("open_service_log", result)
    }

    fn open_service_log_inner(
        &self,
        vehicle_id: &VehicleId,
        request: ServiceRequest,
    ) -> Result<ServiceLog, DispatchError> {
        let request = intake::service_request(request)?;
        let _guard = self.lock([ResourceKey::Vehicle(vehicle_id.clone())])?;

        let mut vehicle = self.load_vehicle(vehicle_id)?;
        let before = vehicle.status;
        let log = lifecycle::open_service(
            &mut vehicle,
            ServiceLogId(self.next_id("svc")),
            request,
            Utc::now(),
        )?;
        self.repository.commit(
            ChangeSet::new()
                .vehicle(vehicle.clone())
                .service_log(log.clone()),
        )?;

        info!(log = %log.id.0, vehicle = %vehicle.id.0, service = %log.service_type, "service log opened");
        self.publish(DispatchEvent::ServiceLogOpened {
            log: log.id.clone(),
            vehicle: vehicle.id.clone(),
        });
        self.publish_vehicle_change(before, &vehicle);

        Ok(log)
    }

    /// Close a service visit. A non-zero cost lands in the maintenance ledger.
    pub fn close_service_log(
        &self,
        log: &ServiceLogId,
        cost: Decimal,
    ) -> Result<ServiceLog, DispatchError> {
        let result = self.close_service_log_inner(log, cost);
        self.observe("close_service_log", result)
    }

    fn close_service_log_inner(
        &self,
        log_id: &ServiceLogId,
        cost: Decimal,
    ) -> Result<ServiceLog, DispatchError> {
        let cost = intake::require_non_negative(cost, "cost")?;
        let vehicle_id = self.load_service_log(log_id)?.vehicle;
        let _guard = self.lock([ResourceKey::Vehicle(vehicle_id.clone())])?;

        let mut log = self.load_service_log(log_id)?;
        let mut vehicle = self.load_vehicle(&vehicle_id)?;
        let before = vehicle.status;
        let others = VehicleHolds {
            open_service_logs: self
                .repository
                .open_service_logs(&vehicle_id)?
                .iter()
                .filter(|open| open.id != log.id)
                .count(),
            active_trip: self.repository.active_trip(&vehicle_id)?.map(|trip| trip.id),
        };

        let closed_at = Utc::now();
        lifecycle::close_service(&mut log, &mut vehicle, &others, cost, closed_at)?;

        let mut changes = ChangeSet::new()
            .vehicle(vehicle.clone())
            .service_log(log.clone());
        let has_cost = cost > Decimal::ZERO;
        if has_cost {
            changes = changes.maintenance(MaintenanceRecord {
                id: RecordId(self.next_id("mnt")),
                vehicle: vehicle_id.clone(),
                service_log: Some(log.id.clone()),
                description: log.service_type.clone(),
                cost,
                performed_on: closed_at.date_naive(),
                recorded_at: closed_at,
            });
        }
        self.repository.commit(changes)?;
        if has_cost {
            self.costs.invalidate(&vehicle_id);
        }

        info!(
            log = %log.id.0,
            vehicle = %vehicle_id.0,
            cost = %cost,
            vehicle_status = vehicle.status.label(),
            "service log closed"
        );
        self.publish(DispatchEvent::ServiceLogClosed {
            log: log.id.clone(),
            vehicle: vehicle_id,
        });
        self.publish_vehicle_change(before, &vehicle);

        Ok(log)
    }

    /// Administratively take a vehicle out of service from any status.
    pub fn retire_vehicle(&self, vehicle: &VehicleId) -> Result<Vehicle, DispatchError> {
        let result = self.update_vehicle(vehicle, |vehicle, _| lifecycle::retire_vehicle(vehicle));
        self.observe("retire_vehicle", result)
    }

    pub fn reinstate_vehicle(&self, vehicle: &VehicleId) -> Result<Vehicle, DispatchError> {
        let result = self.update_vehicle(vehicle, lifecycle::reinstate_vehicle);
        self.observe("reinstate_vehicle", result)
    }

    fn update_vehicle<F>(&self, vehicle_id: &VehicleId, change: F) -> Result<Vehicle, DispatchError>
    where
        F: FnOnce(&mut Vehicle, &VehicleHolds) -> Result<(), RejectReason>,
    {
        let _guard = self.lock([ResourceKey::Vehicle(vehicle_id.clone())])?;
        let mut vehicle = self.load_vehicle(vehicle_id)?;
        let before = vehicle.status;
        let holds = VehicleHolds {
            open_service_logs: self.repository.open_service_logs(vehicle_id)?.len(),
            active_trip: self.repository.active_trip(vehicle_id)?.map(|trip| trip.id),
        };
        change(&mut vehicle, &holds)?;
        self.repository
            .commit(ChangeSet::new().vehicle(vehicle.clone()))?;

        info!(vehicle = %vehicle.id.0, from = before.label(), to = vehicle.status.label(), "vehicle status updated");
        self.publish_vehicle_change(before, &vehicle);
        Ok(vehicle)
    }

    pub fn suspend_driver(&self, driver: &DriverId) -> Result<Driver, DispatchError> {
        let result = self.update_driver(driver, lifecycle::suspend_driver);
        self.observe("suspend_driver", result)
    }

    pub fn reinstate_driver(&self, driver: &DriverId) -> Result<Driver, DispatchError> {
        let result = self.update_driver(driver, lifecycle::reinstate_driver);
        self.observe("reinstate_driver", result)
    }

    fn update_driver<F>(&self, driver_id: &DriverId, change: F) -> Result<Driver, DispatchError>
    where
        F: FnOnce(&mut Driver) -> Result<(), RejectReason>,
    {
        let _guard = self.lock([ResourceKey::Driver(driver_id.clone())])?;
        let mut driver = self.load_driver(driver_id)?;
        let before = driver.status;
        change(&mut driver)?;
        self.repository.commit(ChangeSet::new().driver(driver.clone()))?;

        info!(driver = %driver.id.0, from = before.label(), to = driver.status.label(), "driver status updated");
        self.publish_driver_change(before, &driver);
        Ok(driver)
    }

    pub fn record_fuel(&self, request: NewFuelRecord) -> Result<FuelRecord, DispatchError> {
        let result = self.record_fuel_inner(request);
        self.observe("record_fuel", result)
    }

    fn record_fuel_inner(&self, request: NewFuelRecord) -> Result<FuelRecord, DispatchError> {
        self.load_vehicle(&request.vehicle)?;
        let trip_vehicle = match &request.trip {
            Some(trip) => self.load_trip(trip)?.vehicle,
            None => None,
        };
        let now = Utc::now();
        let record = intake::fuel_record_from_request(
            request,
            RecordId(self.next_id("fuel")),
            trip_vehicle.as_ref(),
            Local::now().date_naive(),
            now,
        )?;
        self.repository.append_fuel(record.clone())?;
        self.costs.invalidate(&record.vehicle);

        info!(vehicle = %record.vehicle.0, cost = %record.cost, liters = %record.liters, "fuel recorded");
        Ok(record)
    }

    pub fn record_maintenance(
        &self,
        request: NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DispatchError> {
        let result = self.record_maintenance_inner(request);
        self.observe("record_maintenance", result)
    }

    fn record_maintenance_inner(
        &self,
        request: NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DispatchError> {
        self.load_vehicle(&request.vehicle)?;
        let record = intake::maintenance_record_from_request(
            request,
            RecordId(self.next_id("mnt")),
            Utc::now(),
        )?;
        self.repository.append_maintenance(record.clone())?;
        self.costs.invalidate(&record.vehicle);

        info!(vehicle = %record.vehicle.0, cost = %record.cost, "maintenance recorded");
        Ok(record)
    }

    /// Fuel, maintenance and total spending for one vehicle.
    pub fn operational_cost(&self, vehicle: &VehicleId) -> Result<OperationalCost, DispatchError> {
        let result = self
            .load_vehicle(vehicle)
            .and_then(|_| Ok(self.costs.operational_cost(self.repository.as_ref(), vehicle)?));
        self.observe("operational_cost", result)
    }

    pub fn total_operational_cost(&self, vehicle: &VehicleId) -> Result<Decimal, DispatchError> {
        Ok(self.operational_cost(vehicle)?.total)
    }
}

/// Error raised by the dispatch service.
///
/// `Rejected` carries ordinary business-rule outcomes. `Repository` failures
/// other than `NotFound` are system faults.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("rejected: {0}")]
    Rejected(RejectReason),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DispatchError {
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            DispatchError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<RejectReason> for DispatchError {
    fn from(value: RejectReason) -> Self {
        Self::Rejected(value)
    }
}

impl From<InvalidTransition> for DispatchError {
    fn from(value: InvalidTransition) -> Self {
        Self::Rejected(value.into())
    }
}

impl From<LockContention> for DispatchError {
    fn from(value: LockContention) -> Self {
        Self::Rejected(value.into())
    }
}
