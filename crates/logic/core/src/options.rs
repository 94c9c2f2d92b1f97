//! The rule-configuration profile ("logical options").
//!
//! Options are authored by name so a profile survives catalog drift:
//! resolving against a graph silently skips unknown names (logged at debug
//! level) instead of failing. Resolution happens once per
//! [`apply`](crate::propagate::AppliedLogic::apply) and produces the
//! id-indexed tables the engine actually consults.

use logic_graph::{Capacity, LogicGraph, ResourceKind};
use tracing::debug;

use crate::compare::ResourceWeights;
use crate::state::SimulatedState;

/// Baseline inventory and resource snapshot used for static feasibility
/// analysis and as the conventional starting state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    /// Base resource maximums before expansion contributions.
    pub base_maximums: [Capacity; ResourceKind::COUNT],
    /// Capability names held from the start.
    pub capabilities: Vec<String>,
}

impl Baseline {
    /// Conventional base energy.
    pub const DEFAULT_ENERGY: Capacity = 99;
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            base_maximums: [Self::DEFAULT_ENERGY, 0, 0, 0, 0],
            capabilities: Vec::new(),
        }
    }
}

/// The externally authored rule profile.
///
/// Any value is valid input: unknown names are tolerated, multipliers are
/// clamped to at least 1, try counts to at least 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicOptions {
    /// Capabilities removed from the game entirely.
    pub removed_capabilities: Vec<String>,
    /// Techniques the player is not expected to perform.
    pub disabled_techniques: Vec<String>,
    /// Strats excluded from consideration.
    pub disabled_strats: Vec<String>,
    /// Per-strat forced retry counts; costs scale multiplicatively.
    pub strat_tries: Vec<(String, u32)>,
    /// Multiplier on damage-over-time frame counts.
    pub dot_leniency: f32,
    /// Multiplier on contact-hit damage.
    pub hit_leniency: f32,
    /// Resource weighting for picking among successful alternatives;
    /// `None` means first-success order.
    pub weights: Option<ResourceWeights>,
    /// Feasibility baseline.
    pub baseline: Baseline,
}

impl LogicOptions {
    pub fn new() -> Self {
        Self {
            removed_capabilities: Vec::new(),
            disabled_techniques: Vec::new(),
            disabled_strats: Vec::new(),
            strat_tries: Vec::new(),
            dot_leniency: 1.0,
            hit_leniency: 1.0,
            weights: None,
            baseline: Baseline::default(),
        }
    }

    pub fn with_removed_capability(mut self, name: impl Into<String>) -> Self {
        self.removed_capabilities.push(name.into());
        self
    }

    pub fn with_disabled_technique(mut self, name: impl Into<String>) -> Self {
        self.disabled_techniques.push(name.into());
        self
    }

    pub fn with_disabled_strat(mut self, name: impl Into<String>) -> Self {
        self.disabled_strats.push(name.into());
        self
    }

    pub fn with_strat_tries(mut self, name: impl Into<String>, tries: u32) -> Self {
        self.strat_tries.push((name.into(), tries));
        self
    }

    pub fn with_dot_leniency(mut self, multiplier: f32) -> Self {
        self.dot_leniency = multiplier;
        self
    }

    pub fn with_hit_leniency(mut self, multiplier: f32) -> Self {
        self.hit_leniency = multiplier;
        self
    }

    pub fn with_weights(mut self, weights: ResourceWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }
}

impl Default for LogicOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Id-indexed option tables resolved against one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub(crate) removed: Vec<bool>,
    pub(crate) technique_disabled: Vec<bool>,
    pub(crate) strat_disabled: Vec<bool>,
    pub(crate) strat_tries: Vec<u32>,
    pub(crate) dot_leniency: f32,
    pub(crate) hit_leniency: f32,
    pub(crate) weights: Option<ResourceWeights>,
    pub(crate) starting: SimulatedState,
}

impl ResolvedOptions {
    /// Resolves named entries to arena ids, skipping names the graph does
    /// not know.
    pub fn resolve(graph: &LogicGraph, options: &LogicOptions) -> Self {
        let mut removed = vec![false; graph.capability_count()];
        for name in &options.removed_capabilities {
            match graph.capability_by_name(name) {
                Some(id) => removed[id.index()] = true,
                None => debug!(name = %name, "ignoring unknown removed capability"),
            }
        }

        let mut technique_disabled = vec![false; graph.technique_count()];
        for name in &options.disabled_techniques {
            match graph.technique_by_name(name) {
                Some(id) => technique_disabled[id.index()] = true,
                None => debug!(name = %name, "ignoring unknown disabled technique"),
            }
        }

        let mut strat_disabled = vec![false; graph.strat_count()];
        for name in &options.disabled_strats {
            match graph.strat_by_name(name) {
                Some(id) => strat_disabled[id.index()] = true,
                None => debug!(name = %name, "ignoring unknown disabled strat"),
            }
        }

        let mut strat_tries = vec![1u32; graph.strat_count()];
        for (name, tries) in &options.strat_tries {
            match graph.strat_by_name(name) {
                Some(id) => strat_tries[id.index()] = (*tries).max(1),
                None => debug!(name = %name, "ignoring tries for unknown strat"),
            }
        }

        let mut starting = SimulatedState::new(graph, options.baseline.base_maximums);
        for name in &options.baseline.capabilities {
            match graph.capability_by_name(name) {
                Some(id) if !removed[id.index()] => starting.inventory.collect(id),
                Some(_) => debug!(name = %name, "baseline capability is removed by options"),
                None => debug!(name = %name, "ignoring unknown baseline capability"),
            }
        }

        Self {
            removed,
            technique_disabled,
            strat_disabled,
            strat_tries,
            dot_leniency: options.dot_leniency.max(1.0),
            hit_leniency: options.hit_leniency.max(1.0),
            weights: options.weights,
            starting,
        }
    }

    /// True iff the capability was removed by the profile.
    #[inline]
    pub fn is_removed(&self, capability: logic_graph::CapabilityId) -> bool {
        self.removed[capability.index()]
    }

    /// True iff the technique is disabled by the profile.
    #[inline]
    pub fn is_technique_disabled(&self, technique: logic_graph::TechniqueId) -> bool {
        self.technique_disabled[technique.index()]
    }

    /// True iff the strat is disabled by the profile.
    #[inline]
    pub fn is_strat_disabled(&self, strat: logic_graph::StratId) -> bool {
        self.strat_disabled[strat.index()]
    }

    /// Forced try count for a strat, at least 1.
    #[inline]
    pub fn tries(&self, strat: logic_graph::StratId) -> u32 {
        self.strat_tries[strat.index()]
    }

    /// Damage-over-time leniency multiplier, at least 1.
    #[inline]
    pub fn dot_leniency(&self) -> f32 {
        self.dot_leniency
    }

    /// Contact-hit leniency multiplier, at least 1.
    #[inline]
    pub fn hit_leniency(&self) -> f32 {
        self.hit_leniency
    }

    /// Configured alternative weighting, if any.
    #[inline]
    pub fn weights(&self) -> Option<&ResourceWeights> {
        self.weights.as_ref()
    }

    /// The baseline starting state (inventory already reflects removals).
    #[inline]
    pub fn starting_state(&self) -> &SimulatedState {
        &self.starting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_graph::{CapabilityDef, GraphBuilder, Requirement};

    fn graph_with_names() -> LogicGraph {
        let mut builder = GraphBuilder::new();
        builder.push_capability(CapabilityDef::plain("drill"));
        builder.push_technique("wall_kick");
        let req = builder.push_requirement(Requirement::Always);
        builder.push_strat("front_door", req, Vec::new());
        builder.finish().unwrap()
    }

    #[test]
    fn unknown_names_are_tolerated() {
        let graph = graph_with_names();
        let options = LogicOptions::new()
            .with_removed_capability("no_such_thing")
            .with_disabled_technique("wall_kick")
            .with_strat_tries("front_door", 3)
            .with_strat_tries("no_such_strat", 9);
        let resolved = ResolvedOptions::resolve(&graph, &options);
        let technique = graph.technique_by_name("wall_kick").unwrap();
        let strat = graph.strat_by_name("front_door").unwrap();
        assert!(resolved.is_technique_disabled(technique));
        assert_eq!(resolved.tries(strat), 3);
    }

    #[test]
    fn removal_beats_baseline_grant() {
        let graph = graph_with_names();
        let options = LogicOptions::new()
            .with_removed_capability("drill")
            .with_baseline(Baseline {
                base_maximums: [99, 0, 0, 0, 0],
                capabilities: vec!["drill".into()],
            });
        let resolved = ResolvedOptions::resolve(&graph, &options);
        let drill = graph.capability_by_name("drill").unwrap();
        assert!(!resolved.starting_state().inventory.has(drill));
    }

    #[test]
    fn multipliers_clamp_to_one() {
        let graph = graph_with_names();
        let options = LogicOptions::new().with_dot_leniency(0.25);
        let resolved = ResolvedOptions::resolve(&graph, &options);
        assert_eq!(resolved.dot_leniency(), 1.0);
    }
}
