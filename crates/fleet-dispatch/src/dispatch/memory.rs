//! In-process storage backing the service binary, demos and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::domain::{
    Driver, DriverId, FuelRecord, MaintenanceRecord, ServiceLog, ServiceLogId, Shipment,
    ShipmentId, Trip, TripId, Vehicle, VehicleId,
};
use super::repository::{
    ChangeSet, CostLedger, DispatchEvent, EventPublisher, FleetRepository, PublishError,
    RepositoryError,
};
use super::status::TripStatus;

#[derive(Debug, Default)]
struct FleetStore {
    vehicles: BTreeMap<VehicleId, Vehicle>,
    drivers: BTreeMap<DriverId, Driver>,
    shipments: BTreeMap<ShipmentId, Shipment>,
    trips: BTreeMap<TripId, Trip>,
    service_logs: BTreeMap<ServiceLogId, ServiceLog>,
    fuel: Vec<FuelRecord>,
    maintenance: Vec<MaintenanceRecord>,
}

impl FleetStore {
    fn ensure_exists(&self, changes: &ChangeSet) -> Result<(), RepositoryError> {
        if let Some(vehicle) = changes
            .vehicles
            .iter()
            .find(|vehicle| !self.vehicles.contains_key(&vehicle.id))
        {
            return Err(RepositoryError::not_found("vehicle", vehicle.id.0.clone()));
        }
        if let Some(driver) = changes
            .drivers
            .iter()
            .find(|driver| !self.drivers.contains_key(&driver.id))
        {
            return Err(RepositoryError::not_found("driver", driver.id.0.clone()));
        }
        if let Some(trip) = changes
            .trips
            .iter()
            .find(|trip| !self.trips.contains_key(&trip.id))
        {
            return Err(RepositoryError::not_found("trip", trip.id.0.clone()));
        }
        if let Some(shipment) = changes
            .shipments
            .iter()
            .find(|shipment| !self.shipments.contains_key(&shipment.id))
        {
            return Err(RepositoryError::not_found("shipment", shipment.id.0.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryFleetRepository {
    store: Arc<Mutex<FleetStore>>,
}

impl InMemoryFleetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FleetRepository for InMemoryFleetRepository {
    fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, RepositoryError> {
        let mut store = self.store.lock();
        if store.vehicles.contains_key(&vehicle.id) {
            return Err(RepositoryError::Conflict {
                entity: "vehicle",
                detail: format!("id '{}' already registered", vehicle.id.0),
            });
        }
        if store
            .vehicles
            .values()
            .any(|existing| existing.license_plate.eq_ignore_ascii_case(&vehicle.license_plate))
        {
            return Err(RepositoryError::Conflict {
                entity: "vehicle",
                detail: format!("license plate '{}' already registered", vehicle.license_plate),
            });
        }
        store.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(vehicle)
    }

    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Ok(self.store.lock().vehicles.get(id).cloned())
    }

    fn insert_driver(&self, driver: Driver) -> Result<Driver, RepositoryError> {
        let mut store = self.store.lock();
        if store.drivers.contains_key(&driver.id)
            || store
                .drivers
                .values()
                .any(|existing| existing.license_number == driver.license_number)
        {
            return Err(RepositoryError::Conflict {
                entity: "driver",
                detail: format!("license number '{}' already registered", driver.license_number),
            });
        }
        store.drivers.insert(driver.id.clone(), driver.clone());
        Ok(driver)
    }

    fn driver(&self, id: &DriverId) -> Result<Option<Driver>, RepositoryError> {
        Ok(self.store.lock().drivers.get(id).cloned())
    }

    fn insert_shipment(&self, shipment: Shipment) -> Result<Shipment, RepositoryError> {
        let mut store = self.store.lock();
        if store.shipments.contains_key(&shipment.id)
            || store
                .shipments
                .values()
                .any(|existing| existing.reference_code == shipment.reference_code)
        {
            return Err(RepositoryError::Conflict {
                entity: "shipment",
                detail: format!("reference code '{}' already exists", shipment.reference_code),
            });
        }
        store.shipments.insert(shipment.id.clone(), shipment.clone());
        Ok(shipment)
    }

    fn shipment(&self, id: &ShipmentId) -> Result<Option<Shipment>, RepositoryError> {
        Ok(self.store.lock().shipments.get(id).cloned())
    }

    fn insert_trip(&self, trip: Trip) -> Result<Trip, RepositoryError> {
        let mut store = self.store.lock();
        if store.trips.contains_key(&trip.id)
            || store
                .trips
                .values()
                .any(|existing| existing.trip_code == trip.trip_code)
        {
            return Err(RepositoryError::Conflict {
                entity: "trip",
                detail: format!("trip code '{}' already exists", trip.trip_code),
            });
        }
        store.trips.insert(trip.id.clone(), trip.clone());
        Ok(trip)
    }

    fn trip(&self, id: &TripId) -> Result<Option<Trip>, RepositoryError> {
        Ok(self.store.lock().trips.get(id).cloned())
    }

    fn service_log(&self, id: &ServiceLogId) -> Result<Option<ServiceLog>, RepositoryError> {
        Ok(self.store.lock().service_logs.get(id).cloned())
    }

    fn open_service_logs(&self, vehicle: &VehicleId) -> Result<Vec<ServiceLog>, RepositoryError> {
        let store = self.store.lock();
        Ok(store
            .service_logs
            .values()
            .filter(|log| &log.vehicle == vehicle && log.is_open())
            .cloned()
            .collect())
    }

    fn active_trip(&self, vehicle: &VehicleId) -> Result<Option<Trip>, RepositoryError> {
        let store = self.store.lock();
        Ok(store
            .trips
            .values()
            .find(|trip| {
                trip.status == TripStatus::Dispatched && trip.vehicle.as_ref() == Some(vehicle)
            })
            .cloned())
    }

    fn append_fuel(&self, record: FuelRecord) -> Result<(), RepositoryError> {
        self.store.lock().fuel.push(record);
        Ok(())
    }

    fn append_maintenance(&self, record: MaintenanceRecord) -> Result<(), RepositoryError> {
        self.store.lock().maintenance.push(record);
        Ok(())
    }

    fn cost_ledger(&self, vehicle: &VehicleId) -> Result<CostLedger, RepositoryError> {
        let store = self.store.lock();
        Ok(CostLedger {
            fuel: store
                .fuel
                .iter()
                .filter(|record| &record.vehicle == vehicle)
                .cloned()
                .collect(),
            maintenance: store
                .maintenance
                .iter()
                .filter(|record| &record.vehicle == vehicle)
                .cloned()
                .collect(),
        })
    }

    fn commit(&self, changes: ChangeSet) -> Result<(), RepositoryError> {
        let mut store = self.store.lock();
        store.ensure_exists(&changes)?;

        for vehicle in changes.vehicles {
            store.vehicles.insert(vehicle.id.clone(), vehicle);
        }
        for driver in changes.drivers {
            store.drivers.insert(driver.id.clone(), driver);
        }
        for trip in changes.trips {
            store.trips.insert(trip.id.clone(), trip);
        }
        for shipment in changes.shipments {
            store.shipments.insert(shipment.id.clone(), shipment);
        }
        for log in changes.service_logs {
            store.service_logs.insert(log.id.clone(), log);
        }
        store.maintenance.extend(changes.maintenance);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<DispatchEvent>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: DispatchEvent) -> Result<(), PublishError> {
        self.events.lock().push(event);
        Ok(())
    }
}
