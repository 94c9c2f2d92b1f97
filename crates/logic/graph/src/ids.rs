//! Index-based identifiers into the graph arenas.
//!
//! Every cross-reference in the graph is a plain integer index into one of
//! the [`LogicGraph`](crate::LogicGraph) arenas. Back-references (a spot to
//! its location, a lock to its spot) use the same indices, so the object
//! graph contains no ownership cycles.

/// Declares a typed arena index.
///
/// Ids are created by [`GraphBuilder`](crate::GraphBuilder) in insertion
/// order and are only meaningful for the graph that allocated them.
macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

arena_id!(
    /// A location (a room-scale region containing spots).
    LocationId
);
arena_id!(
    /// A spot: a sub-location inside a location, the endpoint of edges.
    SpotId
);
arena_id!(
    /// A directed edge between two spots.
    EdgeId
);
arena_id!(
    /// A named alternative method of satisfying a traversal or unlock.
    StratId
);
arena_id!(
    /// A lock guarding a spot.
    LockId
);
arena_id!(
    /// A destructible or bypassable obstacle inside a location.
    ObstacleId
);
arena_id!(
    /// A node of a requirement tree.
    RequirementId
);
arena_id!(
    /// An abstract capability (item-like, non-stacking).
    CapabilityId
);
arena_id!(
    /// A named technique that the rule configuration can disable.
    TechniqueId
);
arena_id!(
    /// A named reusable sub-requirement.
    HelperId
);
arena_id!(
    /// A stacking pickup that raises one resource maximum.
    ExpansionId
);
arena_id!(
    /// An enemy kind that kill requirements refer to.
    EnemyId
);
arena_id!(
    /// A named contact-damage source.
    HitSourceId
);
