//! Capability and expansion tracking.
//!
//! Capabilities are unique and non-stacking; expansions stack and only
//! matter through the resource-maximum contribution they carry. A
//! capability can be disabled without removal: it still counts for
//! set-difference purposes ([`Inventory::contains`]) but no longer answers
//! [`Inventory::has`].

use logic_graph::{Capacity, CapabilityId, ExpansionId, LogicGraph, ResourceKind};

/// Held capabilities and expansion pickups, arena-indexed against one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    owned: Vec<bool>,
    disabled: Vec<bool>,
    expansions: Vec<u16>,
}

impl Inventory {
    /// An empty inventory sized for the given graph's catalogs.
    pub fn empty(graph: &LogicGraph) -> Self {
        Self {
            owned: vec![false; graph.capability_count()],
            disabled: vec![false; graph.capability_count()],
            expansions: vec![0; graph.expansion_count()],
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    /// True iff the capability is held and enabled.
    #[inline]
    pub fn has(&self, capability: CapabilityId) -> bool {
        self.owned[capability.index()] && !self.disabled[capability.index()]
    }

    /// True iff the capability is held, enabled or not.
    #[inline]
    pub fn contains(&self, capability: CapabilityId) -> bool {
        self.owned[capability.index()]
    }

    /// Adds a capability. Collecting twice is a no-op.
    pub fn collect(&mut self, capability: CapabilityId) {
        self.owned[capability.index()] = true;
    }

    /// Removes a capability entirely.
    pub fn remove(&mut self, capability: CapabilityId) {
        self.owned[capability.index()] = false;
        self.disabled[capability.index()] = false;
    }

    /// Disables a held capability without removing it.
    pub fn disable(&mut self, capability: CapabilityId) {
        self.disabled[capability.index()] = true;
    }

    /// Re-enables a previously disabled capability.
    pub fn enable(&mut self, capability: CapabilityId) {
        self.disabled[capability.index()] = false;
    }

    // ========================================================================
    // Expansions
    // ========================================================================

    /// Number of copies of an expansion held.
    #[inline]
    pub fn expansion_count(&self, expansion: ExpansionId) -> u16 {
        self.expansions[expansion.index()]
    }

    /// Collects one more copy of an expansion.
    pub fn collect_expansion(&mut self, expansion: ExpansionId) {
        self.expansions[expansion.index()] += 1;
    }

    /// Total maximum contribution of held expansions for one resource kind.
    ///
    /// Resource maximums are always `base + this`; base maximums come from
    /// outside and are never mutated by pickups.
    pub fn max_contribution(&self, graph: &LogicGraph, resource: ResourceKind) -> Capacity {
        graph
            .expansions()
            .filter(|(_, def)| def.resource == resource)
            .map(|(id, def)| Capacity::from(self.expansion_count(id)) * def.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_graph::{CapabilityDef, ExpansionDef, GraphBuilder};

    fn sample_graph() -> (LogicGraph, CapabilityId, ExpansionId) {
        let mut builder = GraphBuilder::new();
        let cap = builder.push_capability(CapabilityDef::plain("drill"));
        let tank = builder.push_expansion(ExpansionDef {
            name: "energy_tank".into(),
            resource: ResourceKind::Energy,
            amount: 100,
        });
        (builder.finish().unwrap(), cap, tank)
    }

    #[test]
    fn disabled_capability_still_contained() {
        let (graph, cap, _) = sample_graph();
        let mut inventory = Inventory::empty(&graph);
        inventory.collect(cap);
        assert!(inventory.has(cap));
        inventory.disable(cap);
        assert!(!inventory.has(cap));
        assert!(inventory.contains(cap));
        inventory.enable(cap);
        assert!(inventory.has(cap));
    }

    #[test]
    fn expansions_stack_into_max_contribution() {
        let (graph, _, tank) = sample_graph();
        let mut inventory = Inventory::empty(&graph);
        assert_eq!(inventory.max_contribution(&graph, ResourceKind::Energy), 0);
        inventory.collect_expansion(tank);
        inventory.collect_expansion(tank);
        assert_eq!(
            inventory.max_contribution(&graph, ResourceKind::Energy),
            200
        );
        assert_eq!(inventory.max_contribution(&graph, ResourceKind::Missiles), 0);
    }
}
