//! Static data model of the traversal graph.
//!
//! `logic-graph` defines the index-addressed arenas (locations, spots,
//! edges, strats, locks, obstacles, requirement trees, and the definition
//! catalogs) plus the single-pass [`GraphBuilder`] that validates all
//! cross-references and freezes them into an immutable [`LogicGraph`].
//! Evaluation and static analysis live in `logic-core`; this crate is pure
//! data.
pub mod builder;
pub mod catalog;
pub mod graph;
pub mod ids;
pub mod kinds;
pub mod requirement;
pub mod topology;

pub use builder::{GraphBuilder, GraphError};
pub use catalog::{
    CapabilityDef, DamageRate, DamageTable, EnemyDef, ExpansionDef, HelperDef, HitSourceDef,
    Mitigation, TechniqueDef,
};
pub use graph::LogicGraph;
pub use ids::{
    CapabilityId, EdgeId, EnemyId, ExpansionId, HelperId, HitSourceId, LocationId, LockId,
    ObstacleId, RequirementId, SpotId, StratId, TechniqueId,
};
pub use kinds::{AmmoKind, Capacity, ConsumableKind, DotKind, ResourceKind};
pub use requirement::{MAX_ENTRY_SPOTS, Requirement};
pub use topology::{Edge, Location, Lock, Obstacle, Spot, Strat};
