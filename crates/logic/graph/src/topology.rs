//! Static topology: locations, spots, edges, strats, locks, obstacles.
//!
//! The topology is pure data. Which guards can actually be satisfied is the
//! engine's business; the types here only say what exists and how it is
//! wired together.

use crate::ids::{LocationId, ObstacleId, RequirementId, SpotId, StratId};

/// A room-scale region. Visit history (path, destroyed obstacles, lock
/// states) is scoped to one location visit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Authoring name, unique within the graph.
    pub name: String,
    /// Spots contained in this location, in insertion order.
    pub spots: Vec<SpotId>,
}

/// A sub-location: the endpoint of edges and the anchor of locks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spot {
    /// Authoring name, unique within its location.
    pub name: String,
    /// Back-reference to the containing location.
    pub location: LocationId,
}

/// A directed connection between two spots, traversable through any of its
/// strats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: SpotId,
    pub to: SpotId,
    /// Alternative methods of traversal, in declaration order. Never empty.
    pub strats: Vec<StratId>,
}

/// A named alternative method of satisfying a traversal or unlock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strat {
    /// Authoring name, unique within the graph.
    pub name: String,
    /// Guard that must be satisfied to execute the strat.
    pub requirement: RequirementId,
    /// Obstacles destroyed as a side effect of executing the strat.
    pub clears_obstacles: Vec<ObstacleId>,
}

/// A lock guarding a spot. Passing it means opening it through one of the
/// unlock strats or bypassing it through the bypass requirement; the two
/// are recorded distinctly in the visit history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lock {
    /// Authoring name, unique within the graph.
    pub name: String,
    /// The spot this lock guards.
    pub spot: SpotId,
    /// Ways to open the lock permanently-for-this-visit. Never empty.
    pub unlock_strats: Vec<StratId>,
    /// Optional way through without opening.
    pub bypass: Option<RequirementId>,
}

/// A destructible obstacle inside a location. Destruction persists for the
/// rest of the visit and is observable by later requirement nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    /// Authoring name, unique within the graph.
    pub name: String,
    /// Back-reference to the containing location.
    pub location: LocationId,
    /// Guard paid to destroy the obstacle.
    pub destroy: RequirementId,
    /// Optional guard to slip past without destroying.
    pub bypass: Option<RequirementId>,
}
