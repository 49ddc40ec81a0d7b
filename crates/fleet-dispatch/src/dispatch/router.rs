use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{DriverId, ServiceLogId, ServiceRequest, TripId, VehicleId};
use super::reject::RejectReason;
use super::repository::{EventPublisher, FleetRepository, RepositoryError};
use super::service::{DispatchError, DispatchService};

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchBody {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteBody {
    #[serde(default)]
    pub final_odometer_km: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseServiceBody {
    pub cost: Decimal,
}

/// Router exposing the dispatch operations as JSON endpoints.
pub fn dispatch_router<R, P>(service: Arc<DispatchService<R, P>>) -> Router
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/trips/:trip_id/dispatch",
            post(dispatch_handler::<R, P>),
        )
        .route(
            "/api/v1/trips/:trip_id/complete",
            post(complete_handler::<R, P>),
        )
        .route("/api/v1/trips/:trip_id/cancel", post(cancel_handler::<R, P>))
        .route(
            "/api/v1/vehicles/:vehicle_id/service-logs",
            post(open_service_handler::<R, P>),
        )
        .route(
            "/api/v1/service-logs/:log_id/close",
            post(close_service_handler::<R, P>),
        )
        .route(
            "/api/v1/vehicles/:vehicle_id/operational-cost",
            get(operational_cost_handler::<R, P>),
        )
        .with_state(service)
}

/// HTTP status for a service error. Contention is the only retryable outcome.
pub fn status_for(error: &DispatchError) -> StatusCode {
    match error {
        DispatchError::Rejected(RejectReason::Busy) => StatusCode::SERVICE_UNAVAILABLE,
        DispatchError::Rejected(_) => StatusCode::CONFLICT,
        DispatchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DispatchError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
        DispatchError::Repository(RepositoryError::Conflict { .. }) => StatusCode::CONFLICT,
        DispatchError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Run a service call on tokio's blocking pool. Lock acquisition can wait up to
/// the configured timeout and must not stall the async workers meanwhile.
async fn run_blocking<R, P, T, F>(
    service: Arc<DispatchService<R, P>>,
    call: F,
) -> Result<T, DispatchError>
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
    T: Send + 'static,
    F: FnOnce(&DispatchService<R, P>) -> Result<T, DispatchError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&service)).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(error = %join_error, "dispatch task did not finish");
            Err(RepositoryError::Unavailable(format!(
                "dispatch task did not finish: {join_error}"
            ))
            .into())
        }
    }
}

fn error_response(error: DispatchError) -> Response {
    let status = status_for(&error);
    let payload = match &error {
        DispatchError::Rejected(reason) => json!({
            "status": "rejected",
            "reason": reason.code(),
            "message": reason.summary(),
        }),
        other => json!({
            "error": other.to_string(),
        }),
    };
    (status, Json(payload)).into_response()
}

pub(crate) async fn dispatch_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(trip_id): Path<String>,
    Json(body): Json<DispatchBody>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let result = run_blocking(service, move |service| {
        service.dispatch(&TripId(trip_id), &body.vehicle_id, &body.driver_id)
    })
    .await;
    match result {
        Ok(trip) => (
            StatusCode::OK,
            Json(json!({ "status": "accepted", "trip": trip })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(trip_id): Path<String>,
    body: Option<Json<CompleteBody>>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let trip_id = TripId(trip_id);
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let result = run_blocking(service, move |service| match body.final_odometer_km {
        Some(reading) => service.complete_trip_with_odometer(&trip_id, reading),
        None => service.complete_trip(&trip_id),
    })
    .await;
    match result {
        Ok(trip) => (StatusCode::OK, Json(trip)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cancel_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(trip_id): Path<String>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let result =
        run_blocking(service, move |service| service.cancel_trip(&TripId(trip_id))).await;
    match result {
        Ok(trip) => (StatusCode::OK, Json(trip)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_service_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(vehicle_id): Path<String>,
    Json(request): Json<ServiceRequest>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let result = run_blocking(service, move |service| {
        service.open_service_log(&VehicleId(vehicle_id), request)
    })
    .await;
    match result {
        Ok(log) => (StatusCode::CREATED, Json(json!({ "log_id": log.id }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_service_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(log_id): Path<String>,
    Json(body): Json<CloseServiceBody>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let result = run_blocking(service, move |service| {
        service.close_service_log(&ServiceLogId(log_id), body.cost)
    })
    .await;
    match result {
        Ok(log) => (StatusCode::OK, Json(log)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn operational_cost_handler<R, P>(
    State(service): State<Arc<DispatchService<R, P>>>,
    Path(vehicle_id): Path<String>,
) -> Response
where
    R: FleetRepository + 'static,
    P: EventPublisher + 'static,
{
    let vehicle_id = VehicleId(vehicle_id);
    let lookup = vehicle_id.clone();
    let result = run_blocking(service, move |service| service.operational_cost(&lookup)).await;
    match result {
        Ok(cost) => (
            StatusCode::OK,
            Json(json!({
                "vehicle_id": vehicle_id,
                "fuel": cost.fuel,
                "maintenance": cost.maintenance,
                "total_operational_cost": cost.total,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
