//! Status enumerations and their legal-transition tables.
//!
//! Every status change in the engine goes through `apply`, which looks the
//! `(from, event)` pair up in the entity's table. Pairs that are not listed fail
//! with [`InvalidTransition`].

use serde::{Deserialize, Serialize};

use super::reject::RejectReason;

/// Raised when an event is not legal for the entity's current status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} cannot apply `{event}` while {from}")]
pub struct InvalidTransition {
    pub entity: &'static str,
    pub from: &'static str,
    pub event: &'static str,
}

impl From<InvalidTransition> for RejectReason {
    fn from(_: InvalidTransition) -> Self {
        RejectReason::InvalidTransition
    }
}

fn lookup<S, E>(table: &[(S, E, S)], from: S, event: E) -> Option<S>
where
    S: Copy + PartialEq,
    E: Copy + PartialEq,
{
    table
        .iter()
        .find(|(source, trigger, _)| *source == from && *trigger == event)
        .map(|(_, _, target)| *target)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Dispatched,
    InShop,
    OutOfService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleEvent {
    Dispatch,
    Release,
    OpenService,
    CloseService,
    Retire,
    Reinstate,
}

const VEHICLE_TRANSITIONS: &[(VehicleStatus, VehicleEvent, VehicleStatus)] = &[
    (VehicleStatus::Available, VehicleEvent::Dispatch, VehicleStatus::Dispatched),
    (VehicleStatus::Dispatched, VehicleEvent::Release, VehicleStatus::Available),
    (VehicleStatus::Available, VehicleEvent::OpenService, VehicleStatus::InShop),
    // a second concurrent service visit keeps the vehicle in the shop
    (VehicleStatus::InShop, VehicleEvent::OpenService, VehicleStatus::InShop),
    (VehicleStatus::InShop, VehicleEvent::CloseService, VehicleStatus::Available),
    (VehicleStatus::Available, VehicleEvent::Retire, VehicleStatus::OutOfService),
    (VehicleStatus::Dispatched, VehicleEvent::Retire, VehicleStatus::OutOfService),
    (VehicleStatus::InShop, VehicleEvent::Retire, VehicleStatus::OutOfService),
    (VehicleStatus::OutOfService, VehicleEvent::Retire, VehicleStatus::OutOfService),
    (VehicleStatus::OutOfService, VehicleEvent::Reinstate, VehicleStatus::Available),
];

impl VehicleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Dispatched => "dispatched",
            Self::InShop => "in_shop",
            Self::OutOfService => "out_of_service",
        }
    }

    pub fn apply(self, event: VehicleEvent) -> Result<Self, InvalidTransition> {
        lookup(VEHICLE_TRANSITIONS, self, event).ok_or(InvalidTransition {
            entity: "vehicle",
            from: self.label(),
            event: event.label(),
        })
    }
}

impl VehicleEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dispatch => "dispatch",
            Self::Release => "release",
            Self::OpenService => "open_service",
            Self::CloseService => "close_service",
            Self::Retire => "retire",
            Self::Reinstate => "reinstate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    OnTrip,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverEvent {
    Assign,
    Release,
    Suspend,
    Reinstate,
}

const DRIVER_TRANSITIONS: &[(DriverStatus, DriverEvent, DriverStatus)] = &[
    (DriverStatus::Available, DriverEvent::Assign, DriverStatus::OnTrip),
    (DriverStatus::OnTrip, DriverEvent::Release, DriverStatus::Available),
    (DriverStatus::Available, DriverEvent::Suspend, DriverStatus::Suspended),
    (DriverStatus::Suspended, DriverEvent::Reinstate, DriverStatus::Available),
];

impl DriverStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnTrip => "on_trip",
            Self::Suspended => "suspended",
        }
    }

    pub fn apply(self, event: DriverEvent) -> Result<Self, InvalidTransition> {
        lookup(DRIVER_TRANSITIONS, self, event).ok_or(InvalidTransition {
            entity: "driver",
            from: self.label(),
            event: event.label(),
        })
    }
}

impl DriverEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Release => "release",
            Self::Suspend => "suspend",
            Self::Reinstate => "reinstate",
        }
    }
}

/// Trips only move forward; `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Pending,
    Dispatched,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripEvent {
    Dispatch,
    Complete,
    Cancel,
}

const TRIP_TRANSITIONS: &[(TripStatus, TripEvent, TripStatus)] = &[
    (TripStatus::Pending, TripEvent::Dispatch, TripStatus::Dispatched),
    (TripStatus::Dispatched, TripEvent::Complete, TripStatus::Completed),
    (TripStatus::Dispatched, TripEvent::Cancel, TripStatus::Cancelled),
];

impl TripStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn apply(self, event: TripEvent) -> Result<Self, InvalidTransition> {
        lookup(TRIP_TRANSITIONS, self, event).ok_or(InvalidTransition {
            entity: "trip",
            from: self.label(),
            event: event.label(),
        })
    }
}

impl TripEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dispatch => "dispatch",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Assigned,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentEvent {
    Assign,
    Deliver,
    Cancel,
}

const SHIPMENT_TRANSITIONS: &[(ShipmentStatus, ShipmentEvent, ShipmentStatus)] = &[
    (ShipmentStatus::Pending, ShipmentEvent::Assign, ShipmentStatus::Assigned),
    (ShipmentStatus::Assigned, ShipmentEvent::Deliver, ShipmentStatus::Delivered),
    (ShipmentStatus::Assigned, ShipmentEvent::Cancel, ShipmentStatus::Cancelled),
];

impl ShipmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn apply(self, event: ShipmentEvent) -> Result<Self, InvalidTransition> {
        lookup(SHIPMENT_TRANSITIONS, self, event).ok_or(InvalidTransition {
            entity: "shipment",
            from: self.label(),
            event: event.label(),
        })
    }
}

impl ShipmentEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Deliver => "deliver",
            Self::Cancel => "cancel",
        }
    }
}
