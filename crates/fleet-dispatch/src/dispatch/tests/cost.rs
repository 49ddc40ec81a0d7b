use chrono::Duration;
use rust_decimal::Decimal;

use super::common::*;
use crate::dispatch::cost::{CostAggregator, OperationalCost};
use crate::dispatch::domain::{
    FuelRecord, MaintenanceRecord, NewFuelRecord, NewMaintenanceRecord, RecordId, VehicleId,
};
use crate::dispatch::memory::InMemoryFleetRepository;
use crate::dispatch::repository::{CostLedger, FleetRepository};
use crate::dispatch::service::DispatchError;

fn fuel_record(id: &str, vehicle: &str, cost: Decimal) -> FuelRecord {
    FuelRecord {
        id: RecordId(id.to_string()),
        vehicle: VehicleId(vehicle.to_string()),
        trip: None,
        liters: Decimal::from(40),
        cost,
        odometer_km: 10_000,
        logged_on: today(),
        recorded_at: instant(),
    }
}

fn maintenance_record(id: &str, vehicle: &str, cost: Decimal) -> MaintenanceRecord {
    MaintenanceRecord {
        id: RecordId(id.to_string()),
        vehicle: VehicleId(vehicle.to_string()),
        service_log: None,
        description: "Brake pads".to_string(),
        cost,
        performed_on: today(),
        recorded_at: instant(),
    }
}

#[test]
fn empty_ledger_costs_nothing() {
    assert_eq!(CostLedger::default().summarize(), OperationalCost::default());
}

#[test]
fn ledger_sums_fuel_and_maintenance() {
    let ledger = CostLedger {
        fuel: vec![
            fuel_record("f1", "v1", Decimal::new(12_050, 2)),
            fuel_record("f2", "v1", Decimal::new(7_925, 2)),
        ],
        maintenance: vec![maintenance_record("m1", "v1", Decimal::from(300))],
    };

    let cost = ledger.summarize();
    assert_eq!(cost.fuel, Decimal::new(19_975, 2));
    assert_eq!(cost.maintenance, Decimal::from(300));
    assert_eq!(cost.total, Decimal::new(49_975, 2));
}

#[test]
fn aggregator_caches_until_invalidated() {
    let repository = InMemoryFleetRepository::new();
    let aggregator = CostAggregator::new();
    let vehicle = VehicleId("v1".to_string());

    repository
        .append_fuel(fuel_record("f1", "v1", Decimal::from(50)))
        .expect("append");
    assert_eq!(
        aggregator
            .operational_cost(&repository, &vehicle)
            .expect("cost")
            .total,
        Decimal::from(50)
    );

    // appended without invalidation: the cached figure is still served
    repository
        .append_maintenance(maintenance_record("m1", "v1", Decimal::from(25)))
        .expect("append");
    assert_eq!(
        aggregator
            .operational_cost(&repository, &vehicle)
            .expect("cost")
            .total,
        Decimal::from(50)
    );

    aggregator.invalidate(&vehicle);
    assert_eq!(
        aggregator
            .operational_cost(&repository, &vehicle)
            .expect("cost")
            .total,
        Decimal::from(75)
    );
}

#[test]
fn aggregator_separates_vehicles() {
    let repository = InMemoryFleetRepository::new();
    let aggregator = CostAggregator::new();
    repository
        .append_fuel(fuel_record("f1", "v1", Decimal::from(50)))
        .expect("append");
    repository
        .append_fuel(fuel_record("f2", "v2", Decimal::from(80)))
        .expect("append");

    let v2 = aggregator
        .operational_cost(&repository, &VehicleId("v2".to_string()))
        .expect("cost");
    assert_eq!(v2.fuel, Decimal::from(80));
    assert_eq!(v2.maintenance, Decimal::ZERO);
}

#[test]
fn service_reflects_backdated_records_immediately() {
    let (service, _, _) = build_service();
    let vehicle = service
        .register_vehicle(new_vehicle("TRK-9", 3_000))
        .expect("vehicle");

    assert_eq!(
        service.total_operational_cost(&vehicle.id).expect("cost"),
        Decimal::ZERO
    );

    service
        .record_fuel(NewFuelRecord {
            vehicle: vehicle.id.clone(),
            trip: None,
            liters: Decimal::from(80),
            cost: Decimal::new(14_400, 2),
            odometer_km: 40_100,
            logged_on: today() - Duration::days(90),
        })
        .expect("fuel recorded");
    service
        .record_maintenance(NewMaintenanceRecord {
            vehicle: vehicle.id.clone(),
            description: "Tyre rotation".to_string(),
            cost: Decimal::from(60),
            performed_on: today() - Duration::days(400),
        })
        .expect("maintenance recorded");

    let cost = service.operational_cost(&vehicle.id).expect("cost");
    assert_eq!(cost.fuel, Decimal::from(144));
    assert_eq!(cost.maintenance, Decimal::from(60));
    assert_eq!(
        service.total_operational_cost(&vehicle.id).expect("cost"),
        Decimal::from(204)
    );
}

#[test]
fn cost_for_unknown_vehicle_is_not_found() {
    let (service, _, _) = build_service();
    match service.operational_cost(&VehicleId("ghost".to_string())) {
        Err(DispatchError::Repository(err)) => {
            assert_eq!(err.to_string(), "vehicle 'ghost' not found")
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn fuel_for_unknown_vehicle_is_not_recorded() {
    let (service, repository, _) = build_service();
    let result = service.record_fuel(NewFuelRecord {
        vehicle: VehicleId("ghost".to_string()),
        trip: None,
        liters: Decimal::from(10),
        cost: Decimal::from(20),
        odometer_km: 0,
        logged_on: today() - Duration::days(1),
    });

    assert!(matches!(result, Err(DispatchError::Repository(_))));
    assert!(repository
        .cost_ledger(&VehicleId("ghost".to_string()))
        .expect("ledger")
        .fuel
        .is_empty());
}
