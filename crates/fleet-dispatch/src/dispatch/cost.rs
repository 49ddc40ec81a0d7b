//! Operational cost per vehicle: fuel plus maintenance spending.
//!
//! Totals are always recomputed from the full ledger snapshot, so backdated or
//! out-of-order records are counted the same as any other. Results are cached
//! per vehicle until a record insert invalidates them.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::VehicleId;
use super::repository::{CostLedger, FleetRepository, RepositoryError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalCost {
    pub fuel: Decimal,
    pub maintenance: Decimal,
    pub total: Decimal,
}

impl CostLedger {
    pub fn summarize(&self) -> OperationalCost {
        let fuel: Decimal = self.fuel.iter().map(|record| record.cost).sum();
        let maintenance: Decimal = self.maintenance.iter().map(|record| record.cost).sum();
        OperationalCost {
            fuel,
            maintenance,
            total: fuel + maintenance,
        }
    }
}

#[derive(Debug, Default)]
struct CacheEntry {
    generation: u64,
    cost: Option<OperationalCost>,
}

#[derive(Debug, Default)]
pub struct CostAggregator {
    cache: RwLock<HashMap<VehicleId, CacheEntry>>,
}

impl CostAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operational_cost<R>(
        &self,
        repository: &R,
        vehicle: &VehicleId,
    ) -> Result<OperationalCost, RepositoryError>
    where
        R: FleetRepository + ?Sized,
    {
        let generation = {
            let cache = self.cache.read();
            match cache.get(vehicle) {
                Some(CacheEntry {
                    cost: Some(cost), ..
                }) => return Ok(*cost),
                Some(entry) => entry.generation,
                None => 0,
            }
        };

        let cost = repository.cost_ledger(vehicle)?.summarize();

        // an invalidation that raced the ledger read wins; skip caching then
        let mut cache = self.cache.write();
        let entry = cache.entry(vehicle.clone()).or_default();
        if entry.generation == generation {
            entry.cost = Some(cost);
        }
        Ok(cost)
    }

    /// Drop the cached total. Call after the record is durably appended.
    pub fn invalidate(&self, vehicle: &VehicleId) {
        let mut cache = self.cache.write();
        let entry = cache.entry(vehicle.clone()).or_default();
        entry.generation += 1;
        entry.cost = None;
    }
}
