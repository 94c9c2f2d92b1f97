//! The requirement tree node.
//!
//! Every edge, lock, and obstacle guard is a tree of [`Requirement`] nodes
//! stored in the graph's requirement arena. Composites reference children by
//! [`RequirementId`]; there is exactly one representation, dispatched by
//! pattern match in the evaluation and propagation passes, so adding a leaf
//! kind is a compile error until both passes handle it.

use arrayvec::ArrayVec;

use crate::ids::{
    CapabilityId, EnemyId, HelperId, HitSourceId, ObstacleId, RequirementId, SpotId, TechniqueId,
};
use crate::kinds::{AmmoKind, Capacity, DotKind};

/// Maximum predecessor spots an entry predicate may list.
pub const MAX_ENTRY_SPOTS: usize = 4;

/// One node of a requirement tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    /// Trivially satisfied, at no cost.
    Always,

    /// Never satisfiable.
    Never,

    /// Spend a fixed amount of ammunition.
    Ammo { kind: AmmoKind, count: Capacity },

    /// Drain primary energy down to at most `limit`.
    ///
    /// A no-op when already at or under the limit; never touches reserves
    /// and can never kill (the target is at least 1).
    EnergyAtMost { limit: Capacity },

    /// Endure environmental damage-over-time for a frame count.
    ///
    /// The configured leniency multiplier and held mitigation apply.
    DamageFrames { kind: DotKind, frames: u32 },

    /// Take a number of hits from a contact-damage source.
    EnemyHits { source: HitSourceId, hits: u32 },

    /// Defeat a group of enemies, free via a held weapon capability or by
    /// spending ammunition greedily.
    DefeatEnemy { enemy: EnemyId, count: u32 },

    /// A capability is held and enabled.
    Capability(CapabilityId),

    /// A technique is enabled by the rule configuration.
    Technique(TechniqueId),

    /// A named sub-requirement holds.
    Helper(HelperId),

    /// The obstacle was destroyed earlier in this location visit.
    ObstacleCleared(ObstacleId),

    /// Destroy the obstacle now by paying its destroy requirement.
    ///
    /// Free success if it was already destroyed this visit.
    ClearObstacle(ObstacleId),

    /// The current spot was entered from one of the listed spots.
    EnteredFrom {
        spots: ArrayVec<SpotId, MAX_ENTRY_SPOTS>,
    },

    /// All children, evaluated strictly in declared order.
    And(Vec<RequirementId>),

    /// Any child; the cheapest success wins.
    Or(Vec<RequirementId>),
}

impl Requirement {
    /// Returns the composite children, or an empty slice for leaves.
    pub fn children(&self) -> &[RequirementId] {
        match self {
            Requirement::And(children) | Requirement::Or(children) => children,
            _ => &[],
        }
    }

    /// True for `And`/`Or` nodes.
    pub const fn is_composite(&self) -> bool {
        matches!(self, Requirement::And(_) | Requirement::Or(_))
    }
}
