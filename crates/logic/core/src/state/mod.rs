//! The simulated state evaluations run against.
//!
//! State is value-like: every hypothetical evaluation clones it, failed
//! branches are discarded, and only the succeeding branch's clone is kept.
//! Nothing in the engine mutates a caller-owned state in place.
mod visit;

pub use visit::{VisitEntry, VisitLog};

use logic_graph::{Capacity, LogicGraph, ResourceKind, SpotId};

use crate::inventory::Inventory;
use crate::resource::ResourceLedger;

/// One hypothetical world: resources, inventory, and the current location's
/// visit history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatedState {
    pub ledger: ResourceLedger,
    pub inventory: Inventory,
    pub visit: VisitLog,
}

impl SimulatedState {
    /// A fresh state with an empty inventory and the given base maximums.
    pub fn new(graph: &LogicGraph, base_maximums: [Capacity; ResourceKind::COUNT]) -> Self {
        Self {
            ledger: ResourceLedger::new(base_maximums),
            inventory: Inventory::empty(graph),
            visit: VisitLog::new(graph),
        }
    }

    /// Recomputes resource maximums as `base + expansion contributions` and
    /// refills everything; called after pickups change the inventory.
    pub fn apply_expansions(
        &mut self,
        graph: &LogicGraph,
        base_maximums: [Capacity; ResourceKind::COUNT],
    ) {
        for kind in ResourceKind::all() {
            let base = base_maximums[kind.as_index()];
            let bonus = self.inventory.max_contribution(graph, kind);
            self.ledger.set_max(kind, base + bonus);
        }
    }

    /// Starts a new location visit at the given entry spot.
    pub fn enter_location(&mut self, spot: SpotId) {
        self.visit.reset();
        self.visit.record_step(spot, None);
    }
}
