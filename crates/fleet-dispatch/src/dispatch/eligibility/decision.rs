use serde::{Deserialize, Serialize};

use super::super::reject::RejectReason;
use super::rules::RuleCheck;

/// Adjudication for a candidate (trip, vehicle, driver) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum EligibilityDecision {
    Accept,
    Reject(RejectReason),
}

impl EligibilityDecision {
    pub fn is_accept(&self) -> bool {
        matches!(self, EligibilityDecision::Accept)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Accept => "assignment accepted".to_string(),
            EligibilityDecision::Reject(reason) => {
                format!("assignment rejected: {}", reason.summary())
            }
        }
    }
}

/// First failing rule wins; checks arrive in rule order.
pub(crate) fn decide(checks: &[RuleCheck]) -> EligibilityDecision {
    checks
        .iter()
        .find_map(|check| check.failure)
        .map_or(EligibilityDecision::Accept, EligibilityDecision::Reject)
}
