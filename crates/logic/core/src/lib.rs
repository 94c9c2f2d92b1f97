//! Deterministic requirement-evaluation engine for traversal graphs.
//!
//! `logic-core` answers two questions about a guard expression: whether it
//! can be satisfied from a given [`SimulatedState`] (and at what cost), and
//! whether it is statically Never/Always/Free satisfiable under a rule
//! configuration, independent of any state. Evaluation flows through
//! [`EvalContext::evaluate`]; static classification is recomputed by
//! [`AppliedLogic::apply`] whenever the configuration changes. The graph
//! itself comes from `logic-graph`, re-exported here.
pub mod compare;
pub mod evaluate;
pub mod inventory;
pub mod options;
pub mod propagate;
pub mod resource;
pub mod result;
pub mod rules;
pub mod search;
pub mod state;

pub use compare::{ResourceWeights, best_choice};
pub use evaluate::EvalContext;
pub use inventory::Inventory;
pub use options::{Baseline, LogicOptions, ResolvedOptions};
pub use propagate::{AppliedLogic, FlagSet, StaticFlags};
pub use resource::ResourceLedger;
pub use result::{ExecutionLog, ExecutionResult, chain};
pub use search::LockPassage;
pub use state::{SimulatedState, VisitEntry, VisitLog};

// The data model this engine runs over.
pub use logic_graph as graph;
pub use logic_graph::{
    AmmoKind, Capacity, CapabilityDef, CapabilityId, ConsumableKind, DamageRate, DamageTable,
    DotKind, EdgeId, EnemyDef, EnemyId, ExpansionDef, ExpansionId, GraphBuilder, GraphError,
    HelperDef, HelperId, HitSourceDef, HitSourceId, LocationId, LockId, LogicGraph, Mitigation,
    ObstacleId, Requirement, RequirementId, ResourceKind, SpotId, StratId, TechniqueDef,
    TechniqueId,
};
