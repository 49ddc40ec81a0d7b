//! Per-resource mutual exclusion for the commit paths.
//!
//! Each vehicle, driver, trip and shipment has one logical lock. Callers name
//! every resource they need up front; the registry sorts the keys into the
//! global order (`Vehicle < Driver < Trip < Shipment`, then identifier) and
//! acquires them one by one against a shared deadline. Contention past the
//! deadline releases whatever was taken and reports the key that could not be
//! obtained.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use serde::Serialize;
use tracing::debug;

use super::domain::{DriverId, ShipmentId, TripId, VehicleId};
use super::reject::RejectReason;

/// Lockable resource. Variant order is the global acquisition order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResourceKey {
    Vehicle(VehicleId),
    Driver(DriverId),
    Trip(TripId),
    Shipment(ShipmentId),
}

/// The lock on `key` could not be taken before the deadline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {waited:?} waiting for {key:?}")]
pub struct LockContention {
    pub key: ResourceKey,
    pub waited: Duration,
}

impl From<LockContention> for RejectReason {
    fn from(_: LockContention) -> Self {
        RejectReason::Busy
    }
}

type Registry = Arc<Mutex<HashMap<ResourceKey, Arc<Mutex<()>>>>>;

/// Registry of resource locks. An entry exists only while some request holds
/// or waits for its lock.
pub struct ResourceLocks {
    registry: Registry,
    timeout: Duration,
}

impl ResourceLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of resources that currently have a lock entry.
    pub fn tracked(&self) -> usize {
        self.registry.lock().len()
    }

    fn handle(&self, key: &ResourceKey) -> Arc<Mutex<()>> {
        let mut registry = self.registry.lock();
        registry
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire every key, in global order, or none of them.
    pub fn acquire<I>(&self, keys: I) -> Result<ResourceGuard, LockContention>
    where
        I: IntoIterator<Item = ResourceKey>,
    {
        let mut keys: Vec<ResourceKey> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();

        let started = Instant::now();
        let deadline = started + self.timeout;
        let mut guards = Vec::with_capacity(keys.len());

        for key in &keys {
            let handle = self.handle(key);
            let remaining = deadline.saturating_duration_since(Instant::now());
            match handle.try_lock_arc_for(remaining) {
                Some(guard) => guards.push(guard),
                None => {
                    debug!(?key, "resource lock contended");
                    drop(handle);
                    drop(guards);
                    prune(&self.registry, &keys);
                    return Err(LockContention {
                        key: key.clone(),
                        waited: started.elapsed(),
                    });
                }
            }
        }

        Ok(ResourceGuard {
            keys,
            guards,
            registry: Arc::clone(&self.registry),
        })
    }
}

/// Drop entries for `keys` that nobody holds or waits on. A waiter owns a
/// clone of the entry, so the registry's own reference is the only one left
/// when the resource is idle.
fn prune(registry: &Registry, keys: &[ResourceKey]) {
    let mut registry = registry.lock();
    for key in keys {
        if registry
            .get(key)
            .is_some_and(|handle| Arc::strong_count(handle) == 1)
        {
            registry.remove(key);
        }
    }
}

/// Holds a set of resource locks until dropped.
pub struct ResourceGuard {
    keys: Vec<ResourceKey>,
    guards: Vec<ArcMutexGuard<RawMutex, ()>>,
    registry: Registry,
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.guards.clear();
        prune(&self.registry, &self.keys);
    }
}

impl ResourceGuard {
    pub fn keys(&self) -> &[ResourceKey] {
        &self.keys
    }
}

impl std::fmt::Debug for ResourceGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuard")
            .field("keys", &self.keys)
            .finish()
    }
}
