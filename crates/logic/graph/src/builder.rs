//! Single-pass graph construction.
//!
//! The loader pushes definitions in any order (forward references are fine,
//! ids are just indices) and calls [`GraphBuilder::finish`], which validates
//! every cross-reference and freezes the arenas into a [`LogicGraph`].
//! Integrity violations are fatal: a dangling index or a helper cycle means
//! the authored data is inconsistent, which is a bug to surface, not a
//! reachability question.

use std::collections::HashMap;

use crate::catalog::{
    CapabilityDef, DamageTable, EnemyDef, ExpansionDef, HelperDef, HitSourceDef, TechniqueDef,
};
use crate::graph::LogicGraph;
use crate::ids::{
    CapabilityId, EdgeId, EnemyId, ExpansionId, HelperId, HitSourceId, LocationId, LockId,
    ObstacleId, RequirementId, SpotId, StratId, TechniqueId,
};
use crate::requirement::Requirement;
use crate::topology::{Edge, Location, Lock, Obstacle, Spot, Strat};

/// Fatal graph-integrity error reported by [`GraphBuilder::finish`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An id points past the end of its arena.
    #[error("{referrer} references {arena} index {index}, but only {len} exist")]
    DanglingReference {
        referrer: &'static str,
        arena: &'static str,
        index: u32,
        len: usize,
    },

    /// An `And`/`Or` node with no children.
    #[error("requirement {0:?} is a composite with no children")]
    EmptyComposite(RequirementId),

    /// An edge with no strats can never be traversed and is authoring junk.
    #[error("edge {0:?} has no strats")]
    EdgeWithoutStrats(EdgeId),

    /// A lock with no unlock strats and no bypass is a dead end by
    /// construction.
    #[error("lock {0:?} has no unlock strats")]
    LockWithoutStrats(LockId),

    /// Helper trees may share subtrees but must not reference themselves,
    /// directly or through other helpers.
    #[error("helper '{0}' participates in a reference cycle")]
    HelperCycle(String),

    /// Catalog names resolve rule-configuration entries and must be unique.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// A spot was attached to a location that does not exist yet.
    #[error("spot '{name}' references unknown location index {location}")]
    UnknownLocation { name: String, location: u32 },

    /// An enemy's ammo-free kill list may only name weapon capabilities.
    #[error("enemy '{enemy}' lists non-weapon capability '{capability}' as a kill")]
    NotAWeapon { enemy: String, capability: String },
}

/// Mutable construction phase of the graph.
///
/// The builder is the only way to create a [`LogicGraph`]; once `finish`
/// returns, the read-only phase begins and nothing is mutated again.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    locations: Vec<Location>,
    spots: Vec<Spot>,
    edges: Vec<Edge>,
    strats: Vec<Strat>,
    locks: Vec<Lock>,
    obstacles: Vec<Obstacle>,
    requirements: Vec<Requirement>,

    capabilities: Vec<CapabilityDef>,
    techniques: Vec<TechniqueDef>,
    helpers: Vec<HelperDef>,
    expansions: Vec<ExpansionDef>,
    enemies: Vec<EnemyDef>,
    hit_sources: Vec<HitSourceDef>,

    damage_table: DamageTable,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default damage-over-time table.
    pub fn set_damage_table(&mut self, table: DamageTable) {
        self.damage_table = table;
    }

    // ========================================================================
    // Topology
    // ========================================================================

    pub fn push_location(&mut self, name: impl Into<String>) -> LocationId {
        let id = LocationId::from(self.locations.len());
        self.locations.push(Location {
            name: name.into(),
            spots: Vec::new(),
        });
        id
    }

    /// Adds a spot to an existing location.
    pub fn push_spot(&mut self, location: LocationId, name: impl Into<String>) -> SpotId {
        let id = SpotId::from(self.spots.len());
        self.spots.push(Spot {
            name: name.into(),
            location,
        });
        if let Some(owner) = self.locations.get_mut(location.index()) {
            owner.spots.push(id);
        }
        id
    }

    pub fn push_edge(&mut self, from: SpotId, to: SpotId, strats: Vec<StratId>) -> EdgeId {
        let id = EdgeId::from(self.edges.len());
        self.edges.push(Edge { from, to, strats });
        id
    }

    pub fn push_strat(
        &mut self,
        name: impl Into<String>,
        requirement: RequirementId,
        clears_obstacles: Vec<ObstacleId>,
    ) -> StratId {
        let id = StratId::from(self.strats.len());
        self.strats.push(Strat {
            name: name.into(),
            requirement,
            clears_obstacles,
        });
        id
    }

    pub fn push_lock(
        &mut self,
        name: impl Into<String>,
        spot: SpotId,
        unlock_strats: Vec<StratId>,
        bypass: Option<RequirementId>,
    ) -> LockId {
        let id = LockId::from(self.locks.len());
        self.locks.push(Lock {
            name: name.into(),
            spot,
            unlock_strats,
            bypass,
        });
        id
    }

    pub fn push_obstacle(
        &mut self,
        name: impl Into<String>,
        location: LocationId,
        destroy: RequirementId,
        bypass: Option<RequirementId>,
    ) -> ObstacleId {
        let id = ObstacleId::from(self.obstacles.len());
        self.obstacles.push(Obstacle {
            name: name.into(),
            location,
            destroy,
            bypass,
        });
        id
    }

    pub fn push_requirement(&mut self, requirement: Requirement) -> RequirementId {
        let id = RequirementId::from(self.requirements.len());
        self.requirements.push(requirement);
        id
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    pub fn push_capability(&mut self, def: CapabilityDef) -> CapabilityId {
        let id = CapabilityId::from(self.capabilities.len());
        self.capabilities.push(def);
        id
    }

    pub fn push_technique(&mut self, name: impl Into<String>) -> TechniqueId {
        let id = TechniqueId::from(self.techniques.len());
        self.techniques.push(TechniqueDef { name: name.into() });
        id
    }

    pub fn push_helper(
        &mut self,
        name: impl Into<String>,
        requirement: RequirementId,
    ) -> HelperId {
        let id = HelperId::from(self.helpers.len());
        self.helpers.push(HelperDef {
            name: name.into(),
            requirement,
        });
        id
    }

    pub fn push_expansion(&mut self, def: ExpansionDef) -> ExpansionId {
        let id = ExpansionId::from(self.expansions.len());
        self.expansions.push(def);
        id
    }

    pub fn push_enemy(&mut self, def: EnemyDef) -> EnemyId {
        let id = EnemyId::from(self.enemies.len());
        self.enemies.push(def);
        id
    }

    pub fn push_hit_source(&mut self, def: HitSourceDef) -> HitSourceId {
        let id = HitSourceId::from(self.hit_sources.len());
        self.hit_sources.push(def);
        id
    }

    // ========================================================================
    // Freeze
    // ========================================================================

    /// Validates every cross-reference and freezes the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found; a graph that fails validation
    /// must be treated as unusable.
    pub fn finish(self) -> Result<LogicGraph, GraphError> {
        self.validate_spots()?;
        self.validate_requirements()?;
        self.validate_topology()?;
        self.validate_helpers()?;
        self.validate_enemies()?;

        let capability_names =
            Self::name_index("capability", self.capabilities.iter().map(|def| &def.name))?;
        let technique_names =
            Self::name_index("technique", self.techniques.iter().map(|def| &def.name))?;
        let strat_names = Self::name_index("strat", self.strats.iter().map(|def| &def.name))?;

        Ok(LogicGraph {
            locations: self.locations,
            spots: self.spots,
            edges: self.edges,
            strats: self.strats,
            locks: self.locks,
            obstacles: self.obstacles,
            requirements: self.requirements,
            capabilities: self.capabilities,
            techniques: self.techniques,
            helpers: self.helpers,
            expansions: self.expansions,
            enemies: self.enemies,
            hit_sources: self.hit_sources,
            damage_table: self.damage_table,
            capability_names,
            technique_names,
            strat_names,
        })
    }

    fn check<T>(
        referrer: &'static str,
        arena: &'static str,
        items: &[T],
        index: u32,
    ) -> Result<(), GraphError> {
        if (index as usize) < items.len() {
            Ok(())
        } else {
            Err(GraphError::DanglingReference {
                referrer,
                arena,
                index,
                len: items.len(),
            })
        }
    }

    fn validate_spots(&self) -> Result<(), GraphError> {
        for spot in &self.spots {
            if spot.location.index() >= self.locations.len() {
                return Err(GraphError::UnknownLocation {
                    name: spot.name.clone(),
                    location: spot.location.0,
                });
            }
        }
        Ok(())
    }

    fn validate_requirements(&self) -> Result<(), GraphError> {
        for (index, requirement) in self.requirements.iter().enumerate() {
            match requirement {
                Requirement::And(children) | Requirement::Or(children) => {
                    if children.is_empty() {
                        return Err(GraphError::EmptyComposite(RequirementId::from(index)));
                    }
                    for child in children {
                        Self::check("requirement", "requirement", &self.requirements, child.0)?;
                    }
                }
                Requirement::Capability(id) => {
                    Self::check("requirement", "capability", &self.capabilities, id.0)?;
                }
                Requirement::Technique(id) => {
                    Self::check("requirement", "technique", &self.techniques, id.0)?;
                }
                Requirement::Helper(id) => {
                    Self::check("requirement", "helper", &self.helpers, id.0)?;
                }
                Requirement::ObstacleCleared(id) | Requirement::ClearObstacle(id) => {
                    Self::check("requirement", "obstacle", &self.obstacles, id.0)?;
                }
                Requirement::EnemyHits { source, .. } => {
                    Self::check("requirement", "hit source", &self.hit_sources, source.0)?;
                }
                Requirement::DefeatEnemy { enemy, .. } => {
                    Self::check("requirement", "enemy", &self.enemies, enemy.0)?;
                }
                Requirement::EnteredFrom { spots } => {
                    for spot in spots {
                        Self::check("requirement", "spot", &self.spots, spot.0)?;
                    }
                }
                Requirement::Always
                | Requirement::Never
                | Requirement::Ammo { .. }
                | Requirement::EnergyAtMost { .. }
                | Requirement::DamageFrames { .. } => {}
            }
        }
        Ok(())
    }

    fn validate_topology(&self) -> Result<(), GraphError> {
        for (index, edge) in self.edges.iter().enumerate() {
            Self::check("edge", "spot", &self.spots, edge.from.0)?;
            Self::check("edge", "spot", &self.spots, edge.to.0)?;
            if edge.strats.is_empty() {
                return Err(GraphError::EdgeWithoutStrats(EdgeId::from(index)));
            }
            for strat in &edge.strats {
                Self::check("edge", "strat", &self.strats, strat.0)?;
            }
        }
        for strat in &self.strats {
            Self::check("strat", "requirement", &self.requirements, strat.requirement.0)?;
            for obstacle in &strat.clears_obstacles {
                Self::check("strat", "obstacle", &self.obstacles, obstacle.0)?;
            }
        }
        for (index, lock) in self.locks.iter().enumerate() {
            Self::check("lock", "spot", &self.spots, lock.spot.0)?;
            if lock.unlock_strats.is_empty() {
                return Err(GraphError::LockWithoutStrats(LockId::from(index)));
            }
            for strat in &lock.unlock_strats {
                Self::check("lock", "strat", &self.strats, strat.0)?;
            }
            if let Some(bypass) = lock.bypass {
                Self::check("lock", "requirement", &self.requirements, bypass.0)?;
            }
        }
        for obstacle in &self.obstacles {
            Self::check("obstacle", "location", &self.locations, obstacle.location.0)?;
            Self::check("obstacle", "requirement", &self.requirements, obstacle.destroy.0)?;
            if let Some(bypass) = obstacle.bypass {
                Self::check("obstacle", "requirement", &self.requirements, bypass.0)?;
            }
        }
        Ok(())
    }

    /// Rejects helper reference cycles.
    ///
    /// The propagation pass recurses through helper references; a cycle
    /// would make the fixpoint ill-defined, so it is rejected here where the
    /// author can still see it.
    fn validate_helpers(&self) -> Result<(), GraphError> {
        for (index, helper) in self.helpers.iter().enumerate() {
            Self::check("helper", "requirement", &self.requirements, helper.requirement.0)?;
            let mut visiting = vec![false; self.helpers.len()];
            if self.helper_reaches(index, index, &mut visiting) {
                return Err(GraphError::HelperCycle(self.helpers[index].name.clone()));
            }
        }
        Ok(())
    }

    fn helper_reaches(&self, start: usize, current: usize, visiting: &mut [bool]) -> bool {
        if visiting[current] {
            return false;
        }
        visiting[current] = true;
        let mut stack = vec![self.helpers[current].requirement];
        while let Some(req) = stack.pop() {
            match &self.requirements[req.index()] {
                Requirement::Helper(helper) => {
                    if helper.index() == start {
                        return true;
                    }
                    if self.helper_reaches(start, helper.index(), visiting) {
                        return true;
                    }
                }
                Requirement::And(children) | Requirement::Or(children) => {
                    stack.extend(children.iter().copied());
                }
                _ => {}
            }
        }
        false
    }

    fn validate_enemies(&self) -> Result<(), GraphError> {
        for enemy in &self.enemies {
            for weapon in &enemy.weapon_kills {
                Self::check("enemy", "capability", &self.capabilities, weapon.0)?;
                let capability = &self.capabilities[weapon.index()];
                if !capability.weapon {
                    return Err(GraphError::NotAWeapon {
                        enemy: enemy.name.clone(),
                        capability: capability.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn name_index<'a, I, T>(kind: &'static str, names: I) -> Result<HashMap<String, T>, GraphError>
    where
        I: Iterator<Item = &'a String>,
        T: From<usize>,
    {
        let mut index = HashMap::new();
        for (position, name) in names.enumerate() {
            if index.insert(name.clone(), T::from(position)).is_some() {
                return Err(GraphError::DuplicateName {
                    kind,
                    name: name.clone(),
                });
            }
        }
        Ok(index)
    }
}
