//! Per-run API cost accounting.

use serde::{Deserialize, Serialize};

/// Running call count and estimated spend for one generation run.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::CostLedger;
///
/// let mut ledger = CostLedger::default();
/// ledger.record_call(0.001);
/// ledger.record_research(0.01);
///
/// assert_eq!(*ledger.api_call_count(), 1);
/// assert_eq!(ledger.cost_label(), "$0.01");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CostLedger {
    /// Number of model invocations, failed ones included.
    api_call_count: u32,
    /// Estimated spend in USD.
    api_cost_estimate: f64,
}

impl CostLedger {
    /// Account for one model invocation.
    pub fn record_call(&mut self, cost: f64) {
        self.api_call_count += 1;
        self.api_cost_estimate += cost;
    }

    /// Account for a research lookup; not counted as a model call.
    pub fn record_research(&mut self, cost: f64) {
        self.api_cost_estimate += cost;
    }

    /// Spend formatted as dollars with two decimals.
    pub fn cost_label(&self) -> String {
        format!("${:.2}", self.api_cost_estimate)
    }
}
