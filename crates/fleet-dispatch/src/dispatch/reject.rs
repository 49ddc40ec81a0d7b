use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of reasons a dispatch or lifecycle request can be turned down.
///
/// Rejections are ordinary outcomes of the business rules; they are returned to
/// callers and never raised as system faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    VehicleUnavailable,
    DriverUnavailable,
    DriverSuspended,
    OverCapacity,
    LicenseExpired,
    LicenseCategoryMismatch,
    AlreadyDispatched,
    InvalidTripState,
    VehicleDispatched,
    AlreadyClosed,
    InvalidTransition,
    Busy,
}

impl RejectReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::VehicleUnavailable => "vehicle_unavailable",
            Self::DriverUnavailable => "driver_unavailable",
            Self::DriverSuspended => "driver_suspended",
            Self::OverCapacity => "over_capacity",
            Self::LicenseExpired => "license_expired",
            Self::LicenseCategoryMismatch => "license_category_mismatch",
            Self::AlreadyDispatched => "already_dispatched",
            Self::InvalidTripState => "invalid_trip_state",
            Self::VehicleDispatched => "vehicle_dispatched",
            Self::AlreadyClosed => "already_closed",
            Self::InvalidTransition => "invalid_transition",
            Self::Busy => "busy",
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::VehicleUnavailable => "vehicle is not available for dispatch",
            Self::DriverUnavailable => "driver is not available for dispatch",
            Self::DriverSuspended => "suspended drivers cannot be assigned",
            Self::OverCapacity => "cargo exceeds vehicle max capacity",
            Self::LicenseExpired => "driver license is expired",
            Self::LicenseCategoryMismatch => "driver license category does not match the trip",
            Self::AlreadyDispatched => "trip has already been dispatched",
            Self::InvalidTripState => "trip is not in a state that allows this operation",
            Self::VehicleDispatched => "vehicle is on a trip and cannot be serviced",
            Self::AlreadyClosed => "service log is already closed",
            Self::InvalidTransition => "status transition is not permitted",
            Self::Busy => "resource is locked by another request, retry later",
        }
    }

    /// Only lock contention is worth retrying; every other reason is deterministic.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Busy)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}
