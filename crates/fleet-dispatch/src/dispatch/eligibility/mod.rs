mod decision;
mod rules;

pub use decision::EligibilityDecision;
pub use rules::{EligibilityRule, RuleCheck};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Driver, Trip, Vehicle};
use decision::decide;

/// Stateless checker applying the dispatch rules to a candidate triple.
///
/// Reads its inputs only, so it is safe to call repeatedly and from many
/// threads without holding any resource lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityChecker;

impl EligibilityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(
        &self,
        trip: &Trip,
        vehicle: &Vehicle,
        driver: &Driver,
        today: NaiveDate,
    ) -> EligibilityDecision {
        for rule in EligibilityRule::ordered() {
            let check = rules::evaluate_rule(rule, trip, vehicle, driver, today);
            if let Some(reason) = check.failure {
                return EligibilityDecision::Reject(reason);
            }
        }
        EligibilityDecision::Accept
    }

    /// Evaluate every rule and keep the per-rule trail alongside the decision.
    pub fn assess(
        &self,
        trip: &Trip,
        vehicle: &Vehicle,
        driver: &Driver,
        today: NaiveDate,
    ) -> EligibilityAssessment {
        let checks: Vec<RuleCheck> = EligibilityRule::ordered()
            .into_iter()
            .map(|rule| rules::evaluate_rule(rule, trip, vehicle, driver, today))
            .collect();

        EligibilityAssessment {
            decision: decide(&checks),
            checks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub decision: EligibilityDecision,
    pub checks: Vec<RuleCheck>,
}

impl EligibilityAssessment {
    pub fn failed_rules(&self) -> impl Iterator<Item = &RuleCheck> {
        self.checks.iter().filter(|check| !check.passed())
    }
}
