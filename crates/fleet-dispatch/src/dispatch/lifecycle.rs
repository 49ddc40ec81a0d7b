//! Status reconciliation for trip release and service visits.
//!
//! These functions mutate entities that the caller has already loaded under the
//! relevant resource locks. Nothing here touches storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::domain::{Driver, ServiceLog, ServiceLogId, ServiceRequest, TripId, Vehicle};
use super::reject::RejectReason;
use super::status::{DriverEvent, DriverStatus, VehicleEvent, VehicleStatus};

/// Claims on a vehicle other than the one the current operation releases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleHolds {
    pub open_service_logs: usize,
    /// Trip still dispatched on the vehicle, if any.
    pub active_trip: Option<TripId>,
}

impl VehicleHolds {
    pub fn on_trip(&self) -> bool {
        self.active_trip.is_some()
    }
}

/// Free the driver and, when nothing else holds it, the vehicle.
///
/// `open_service_logs` counts the vehicle's logs that are still open. An
/// administratively retired vehicle is never freed here; reinstatement is a
/// separate, explicit act.
pub fn release_resources(
    vehicle: &mut Vehicle,
    driver: &mut Driver,
    open_service_logs: usize,
) -> Result<(), RejectReason> {
    if driver.status != DriverStatus::Available {
        driver.status = driver.status.apply(DriverEvent::Release)?;
    }

    if vehicle.status == VehicleStatus::Dispatched {
        let released = vehicle.status.apply(VehicleEvent::Release)?;
        vehicle.status = if open_service_logs > 0 {
            released.apply(VehicleEvent::OpenService)?
        } else {
            released
        };
    }

    Ok(())
}

/// Open a service visit. A vehicle on a trip cannot be serviced.
///
/// A retired vehicle keeps `OutOfService` while the log is open.
pub fn open_service(
    vehicle: &mut Vehicle,
    id: ServiceLogId,
    request: ServiceRequest,
    opened_at: DateTime<Utc>,
) -> Result<ServiceLog, RejectReason> {
    match vehicle.status {
        VehicleStatus::Dispatched => return Err(RejectReason::VehicleDispatched),
        VehicleStatus::OutOfService => {}
        status => vehicle.status = status.apply(VehicleEvent::OpenService)?,
    }

    Ok(ServiceLog {
        id,
        vehicle: vehicle.id.clone(),
        service_type: request.service_type,
        notes: request.notes,
        opened_at,
        closed_at: None,
        cost: Decimal::ZERO,
    })
}

/// Close a service visit and return the vehicle to service when no other
/// visit remains open and no trip still holds it. `others.open_service_logs`
/// excludes `log` itself.
pub fn close_service(
    log: &mut ServiceLog,
    vehicle: &mut Vehicle,
    others: &VehicleHolds,
    cost: Decimal,
    closed_at: DateTime<Utc>,
) -> Result<(), RejectReason> {
    if !log.is_open() {
        return Err(RejectReason::AlreadyClosed);
    }

    log.closed_at = Some(closed_at);
    log.cost = cost;

    if vehicle.status == VehicleStatus::InShop
        && others.open_service_logs == 0
        && !others.on_trip()
    {
        vehicle.status = vehicle.status.apply(VehicleEvent::CloseService)?;
    }

    Ok(())
}

/// Administrative retirement, legal from every status.
pub fn retire_vehicle(vehicle: &mut Vehicle) -> Result<(), RejectReason> {
    vehicle.status = vehicle.status.apply(VehicleEvent::Retire)?;
    Ok(())
}

/// Administrative reinstatement. Open service visits send the vehicle straight
/// back to the shop.
///
/// A vehicle retired mid-trip stays `OutOfService` until that trip is
/// completed or cancelled; otherwise it could be dispatched a second time.
pub fn reinstate_vehicle(vehicle: &mut Vehicle, holds: &VehicleHolds) -> Result<(), RejectReason> {
    if holds.on_trip() {
        return Err(RejectReason::InvalidTransition);
    }
    let reinstated = vehicle.status.apply(VehicleEvent::Reinstate)?;
    vehicle.status = if holds.open_service_logs > 0 {
        reinstated.apply(VehicleEvent::OpenService)?
    } else {
        reinstated
    };
    Ok(())
}

pub fn suspend_driver(driver: &mut Driver) -> Result<(), RejectReason> {
    driver.status = driver.status.apply(DriverEvent::Suspend)?;
    Ok(())
}

pub fn reinstate_driver(driver: &mut Driver) -> Result<(), RejectReason> {
    driver.status = driver.status.apply(DriverEvent::Reinstate)?;
    Ok(())
}
