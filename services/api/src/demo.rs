use chrono::{Local, NaiveDate};
use clap::Args;
use fleet_dispatch::dispatch::{
    DispatchConfig, DispatchError, DispatchEvent, DispatchService, InMemoryEventPublisher,
    InMemoryFleetRepository, LicenseCategory, NewDriver, NewFuelRecord, NewTrip, NewVehicle,
    ServiceRequest, Trip,
};
use fleet_dispatch::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the date used for license checks (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let events = Arc::new(InMemoryEventPublisher::new());
    let service = DispatchService::new(
        Arc::new(InMemoryFleetRepository::new()),
        events.clone(),
        DispatchConfig::default(),
    );

    println!("Fleet dispatch demo ({today})");
    println!("==============================");

    let van = service.register_vehicle(NewVehicle {
        name_model: "Ford Transit".to_string(),
        license_plate: "VAN-05".to_string(),
        region: Some("North".to_string()),
        max_load_capacity_kg: Decimal::from(1_000),
        odometer_km: 48_200,
        acquisition_cost: Decimal::from(38_000),
    })?;
    let truck = service.register_vehicle(NewVehicle {
        name_model: "Scania P280".to_string(),
        license_plate: "TRK-12".to_string(),
        region: Some("North".to_string()),
        max_load_capacity_kg: Decimal::from(8_000),
        odometer_km: 131_900,
        acquisition_cost: Decimal::from(96_000),
    })?;
    let alex = service.register_driver(NewDriver {
        full_name: "Alex Moreau".to_string(),
        license_number: "DL-2231".to_string(),
        license_category: LicenseCategory::B,
        license_expiry: today + chrono::Duration::days(400),
        safety_score: Decimal::from(97),
    })?;
    let casey = service.register_driver(NewDriver {
        full_name: "Casey Nwosu".to_string(),
        license_number: "DL-7810".to_string(),
        license_category: LicenseCategory::C,
        license_expiry: today + chrono::Duration::days(90),
        safety_score: Decimal::from(91),
    })?;

    println!(
        "Registered {} ({} kg) and {} ({} kg); drivers {} [{}] and {} [{}]",
        van.license_plate,
        van.max_load_capacity_kg,
        truck.license_plate,
        truck.max_load_capacity_kg,
        alex.full_name,
        alex.license_category.label(),
        casey.full_name,
        casey.license_category.label(),
    );

    println!("\n1. Capacity check");
    let heavy = service.create_trip(trip("NORTH-001", 1_200, LicenseCategory::B))?;
    report_dispatch(
        &heavy,
        service.dispatch_on(&heavy.id, &van.id, &alex.id, today),
    )?;
    let light = service.create_trip(trip("NORTH-002", 900, LicenseCategory::B))?;
    report_dispatch(
        &light,
        service.dispatch_on(&light.id, &van.id, &alex.id, today),
    )?;

    println!("\n2. Shop visit");
    let inspection = service.open_service_log(
        &truck.id,
        ServiceRequest {
            service_type: "Brake inspection".to_string(),
            notes: Some("Front pads worn".to_string()),
        },
    )?;
    println!(
        "  Opened {} on {}: vehicle is now {}",
        inspection.id.0,
        truck.license_plate,
        service.vehicle(&truck.id)?.status.label()
    );
    let haul = service.create_trip(trip("NORTH-003", 6_500, LicenseCategory::C))?;
    report_dispatch(
        &haul,
        service.dispatch_on(&haul.id, &truck.id, &casey.id, today),
    )?;
    let closed = service.close_service_log(&inspection.id, Decimal::new(18_050, 2))?;
    println!(
        "  Closed {} at {}: vehicle is now {}",
        closed.id.0,
        closed.cost,
        service.vehicle(&truck.id)?.status.label()
    );
    report_dispatch(
        &haul,
        service.dispatch_on(&haul.id, &truck.id, &casey.id, today),
    )?;

    println!("\n3. Completion");
    let completed = service.complete_trip_with_odometer(&light.id, 48_460)?;
    println!(
        "  {} -> {}; {} odometer {} km, status {}",
        completed.trip_code,
        completed.status.label(),
        van.license_plate,
        service.vehicle(&van.id)?.odometer_km,
        service.vehicle(&van.id)?.status.label()
    );
    match service.complete_trip(&light.id) {
        Ok(_) => println!("  unexpected: trip completed twice"),
        Err(err) => report_rejection(&light, err)?,
    }

    println!("\n4. Operational cost");
    service.record_fuel(NewFuelRecord {
        vehicle: van.id.clone(),
        trip: Some(light.id.clone()),
        liters: Decimal::new(4_250, 2),
        cost: Decimal::new(7_905, 2),
        odometer_km: 48_460,
        logged_on: today.min(Local::now().date_naive()),
    })?;
    for vehicle in [&van, &truck] {
        let cost = service.operational_cost(&vehicle.id)?;
        println!(
            "  {:<8} fuel {:>8}  maintenance {:>8}  total {:>8}",
            vehicle.license_plate,
            cost.fuel.to_string(),
            cost.maintenance.to_string(),
            cost.total.to_string()
        );
    }

    println!("\n5. Published events");
    for event in events.events() {
        println!("  - {}", describe(&event));
    }

    Ok(())
}

fn trip(code: &str, cargo_kg: i64, category: LicenseCategory) -> NewTrip {
    NewTrip {
        trip_code: code.to_string(),
        cargo_weight_kg: Some(Decimal::from(cargo_kg)),
        required_license_category: category,
        shipment: None,
        planned_distance_km: 120,
        revenue: Decimal::from(450),
    }
}

fn report_dispatch(trip: &Trip, outcome: Result<Trip, DispatchError>) -> Result<(), AppError> {
    match outcome {
        Ok(dispatched) => {
            println!(
                "  {} ({} kg) accepted: {}",
                dispatched.trip_code,
                dispatched.cargo_weight_kg,
                dispatched.status.label()
            );
            Ok(())
        }
        Err(err) => report_rejection(trip, err),
    }
}

/// Print business rejections; anything else is a real failure and ends the demo.
fn report_rejection(trip: &Trip, err: DispatchError) -> Result<(), AppError> {
    match err.reject_reason() {
        Some(reason) => {
            println!(
                "  {} ({} kg) rejected: {} ({})",
                trip.trip_code,
                trip.cargo_weight_kg,
                reason.code(),
                reason.summary()
            );
            Ok(())
        }
        None => Err(err.into()),
    }
}

fn describe(event: &DispatchEvent) -> String {
    match event {
        DispatchEvent::TripDispatched {
            trip,
            vehicle,
            driver,
        } => format!(
            "{}: {} with {} and {}",
            event.name(),
            trip.0,
            vehicle.0,
            driver.0
        ),
        DispatchEvent::TripCompleted { trip } | DispatchEvent::TripCancelled { trip } => {
            format!("{}: {}", event.name(), trip.0)
        }
        DispatchEvent::VehicleStatusChanged { vehicle, from, to } => format!(
            "{}: {} {} -> {}",
            event.name(),
            vehicle.0,
            from.label(),
            to.label()
        ),
        DispatchEvent::DriverStatusChanged { driver, from, to } => format!(
            "{}: {} {} -> {}",
            event.name(),
            driver.0,
            from.label(),
            to.label()
        ),
        DispatchEvent::ServiceLogOpened { log, vehicle }
        | DispatchEvent::ServiceLogClosed { log, vehicle } => {
            format!("{}: {} on {}", event.name(), log.0, vehicle.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_to_completion_on_a_fixed_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
        run_demo(DemoArgs { today: Some(today) }).expect("demo completes");
    }

    #[test]
    fn describe_names_every_event() {
        let event = DispatchEvent::TripCompleted {
            trip: fleet_dispatch::dispatch::TripId("trip-000001".to_string()),
        };
        assert_eq!(describe(&event), "trip_completed: trip-000001");
    }
}
