//! The frozen, index-addressed graph.
//!
//! [`LogicGraph`] is produced once by [`GraphBuilder`](crate::GraphBuilder)
//! and never mutated afterwards. All references were validated at build
//! time, so arena accessors index directly; an out-of-range id here is a
//! foreign id from another graph and aborts loudly.

use std::collections::HashMap;

use crate::catalog::{
    CapabilityDef, DamageTable, EnemyDef, ExpansionDef, HelperDef, HitSourceDef, TechniqueDef,
};
use crate::ids::{
    CapabilityId, EdgeId, EnemyId, ExpansionId, HelperId, HitSourceId, LocationId, LockId,
    ObstacleId, RequirementId, SpotId, StratId, TechniqueId,
};
use crate::requirement::Requirement;
use crate::topology::{Edge, Location, Lock, Obstacle, Spot, Strat};

/// The immutable traversal graph: topology, catalogs, and the requirement
/// arena, fully cross-linked by integer indices.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicGraph {
    pub(crate) locations: Vec<Location>,
    pub(crate) spots: Vec<Spot>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) strats: Vec<Strat>,
    pub(crate) locks: Vec<Lock>,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) requirements: Vec<Requirement>,

    pub(crate) capabilities: Vec<CapabilityDef>,
    pub(crate) techniques: Vec<TechniqueDef>,
    pub(crate) helpers: Vec<HelperDef>,
    pub(crate) expansions: Vec<ExpansionDef>,
    pub(crate) enemies: Vec<EnemyDef>,
    pub(crate) hit_sources: Vec<HitSourceDef>,

    pub(crate) damage_table: DamageTable,

    // Name lookups for resolving rule-configuration entries.
    pub(crate) capability_names: HashMap<String, CapabilityId>,
    pub(crate) technique_names: HashMap<String, TechniqueId>,
    pub(crate) strat_names: HashMap<String, StratId>,
}

impl LogicGraph {
    // ========================================================================
    // Topology accessors
    // ========================================================================

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.index()]
    }

    pub fn spot(&self, id: SpotId) -> &Spot {
        &self.spots[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn strat(&self, id: StratId) -> &Strat {
        &self.strats[id.index()]
    }

    pub fn lock(&self, id: LockId) -> &Lock {
        &self.locks[id.index()]
    }

    pub fn obstacle(&self, id: ObstacleId) -> &Obstacle {
        &self.obstacles[id.index()]
    }

    pub fn requirement(&self, id: RequirementId) -> &Requirement {
        &self.requirements[id.index()]
    }

    // ========================================================================
    // Catalog accessors
    // ========================================================================

    pub fn capability(&self, id: CapabilityId) -> &CapabilityDef {
        &self.capabilities[id.index()]
    }

    pub fn technique(&self, id: TechniqueId) -> &TechniqueDef {
        &self.techniques[id.index()]
    }

    pub fn helper(&self, id: HelperId) -> &HelperDef {
        &self.helpers[id.index()]
    }

    pub fn expansion(&self, id: ExpansionId) -> &ExpansionDef {
        &self.expansions[id.index()]
    }

    pub fn enemy(&self, id: EnemyId) -> &EnemyDef {
        &self.enemies[id.index()]
    }

    pub fn hit_source(&self, id: HitSourceId) -> &HitSourceDef {
        &self.hit_sources[id.index()]
    }

    pub fn damage_table(&self) -> &DamageTable {
        &self.damage_table
    }

    // ========================================================================
    // Arena sizes (side tables in the engine are allocated from these)
    // ========================================================================

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn strat_count(&self) -> usize {
        self.strats.len()
    }

    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    pub fn capability_count(&self) -> usize {
        self.capabilities.len()
    }

    pub fn expansion_count(&self) -> usize {
        self.expansions.len()
    }

    pub fn technique_count(&self) -> usize {
        self.techniques.len()
    }

    // ========================================================================
    // Iteration and name resolution
    // ========================================================================

    /// Iterates all capability definitions with their ids.
    pub fn capabilities(&self) -> impl Iterator<Item = (CapabilityId, &CapabilityDef)> {
        self.capabilities
            .iter()
            .enumerate()
            .map(|(index, def)| (CapabilityId::from(index), def))
    }

    /// Iterates all expansion definitions with their ids.
    pub fn expansions(&self) -> impl Iterator<Item = (ExpansionId, &ExpansionDef)> {
        self.expansions
            .iter()
            .enumerate()
            .map(|(index, def)| (ExpansionId::from(index), def))
    }

    /// Resolves a capability by authoring name.
    pub fn capability_by_name(&self, name: &str) -> Option<CapabilityId> {
        self.capability_names.get(name).copied()
    }

    /// Resolves a technique by authoring name.
    pub fn technique_by_name(&self, name: &str) -> Option<TechniqueId> {
        self.technique_names.get(name).copied()
    }

    /// Resolves a strat by authoring name.
    pub fn strat_by_name(&self, name: &str) -> Option<StratId> {
        self.strat_names.get(name).copied()
    }
}
