//! The configuration-application pass.
//!
//! [`AppliedLogic::apply`] resolves a [`LogicOptions`] profile against a
//! graph and re-derives the Never/Always/Free flags for every requirement
//! node, strat, edge, lock, and obstacle, in dependency order: requirement
//! trees bottom-up (through helper references, which the builder guarantees
//! are acyclic), then the objects that embed them. The flag tables live in
//! this value rather than on the nodes, and the value cannot exist before
//! the pass has run to completion — there is no window where stale flags
//! are readable.

use logic_graph::{
    ConsumableKind, EdgeId, LockId, LogicGraph, ObstacleId, Requirement, RequirementId,
    ResourceKind, StratId,
};
use tracing::{debug, debug_span};

use crate::inventory::Inventory;
use crate::options::{LogicOptions, ResolvedOptions};
use crate::propagate::flags::FlagSet;
use crate::rules::{dot_damage, hit_damage, kill_cost};
use crate::state::SimulatedState;

/// Flag side tables, indexed by arena id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticFlags {
    requirements: Vec<FlagSet>,
    strats: Vec<FlagSet>,
    edges: Vec<FlagSet>,
    locks: Vec<FlagSet>,
    obstacles: Vec<FlagSet>,
}

/// A fully applied rule configuration: resolved option tables plus the
/// derived flags, valid until the next application.
#[derive(Clone, Debug)]
pub struct AppliedLogic {
    options: ResolvedOptions,
    flags: StaticFlags,
}

impl AppliedLogic {
    /// Resolves and propagates a configuration profile.
    ///
    /// Never fails: any profile is valid input, and unknown names were
    /// already dropped during resolution.
    pub fn apply(graph: &LogicGraph, profile: &LogicOptions) -> Self {
        let span = debug_span!("apply_options");
        let _guard = span.enter();

        let options = ResolvedOptions::resolve(graph, profile);
        let flags = propagate(graph, &options);
        debug!(
            requirements = flags.requirements.len(),
            strats = flags.strats.len(),
            edges = flags.edges.len(),
            "static flags recomputed"
        );
        Self { options, flags }
    }

    /// The resolved option tables.
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// A fresh copy of the baseline starting state.
    pub fn starting_state(&self) -> SimulatedState {
        self.options.starting_state().clone()
    }

    // ========================================================================
    // Flag reads
    // ========================================================================

    pub fn requirement_flags(&self, id: RequirementId) -> FlagSet {
        self.flags.requirements[id.index()]
    }

    pub fn strat_flags(&self, id: StratId) -> FlagSet {
        self.flags.strats[id.index()]
    }

    pub fn edge_flags(&self, id: EdgeId) -> FlagSet {
        self.flags.edges[id.index()]
    }

    pub fn lock_flags(&self, id: LockId) -> FlagSet {
        self.flags.locks[id.index()]
    }

    pub fn obstacle_flags(&self, id: ObstacleId) -> FlagSet {
        self.flags.obstacles[id.index()]
    }
}

// ============================================================================
// Propagation
// ============================================================================

fn propagate(graph: &LogicGraph, options: &ResolvedOptions) -> StaticFlags {
    let analysis = LeafAnalysis::new(graph, options);

    // Requirement trees, bottom-up through the memo table.
    let mut requirements = vec![None; graph.requirement_count()];
    for index in 0..graph.requirement_count() {
        requirement_flags(graph, &analysis, &mut requirements, RequirementId::from(index));
    }
    let requirements: Vec<FlagSet> = requirements
        .into_iter()
        .map(|flags| flags.unwrap_or_default())
        .collect();

    // Strats embed requirement trees.
    let strats: Vec<FlagSet> = (0..graph.strat_count())
        .map(|index| {
            let id = StratId::from(index);
            if options.is_strat_disabled(id) {
                FlagSet::compose(true, false, false)
            } else {
                requirements[graph.strat(id).requirement.index()]
            }
        })
        .collect();

    // Edges embed strats: any strat will do.
    let edges: Vec<FlagSet> = (0..graph.edge_count())
        .map(|index| {
            let edge = graph.edge(EdgeId::from(index));
            any_of(edge.strats.iter().map(|strat| strats[strat.index()]))
        })
        .collect();

    // Locks: opened through any unlock strat, or slipped past through the
    // bypass requirement.
    let locks: Vec<FlagSet> = (0..graph.lock_count())
        .map(|index| {
            let lock = graph.lock(LockId::from(index));
            let open = any_of(lock.unlock_strats.iter().map(|strat| strats[strat.index()]));
            match lock.bypass {
                Some(bypass) => any_of([open, requirements[bypass.index()]]),
                None => open,
            }
        })
        .collect();

    // Obstacles: Never only if both the destroy and bypass paths are Never.
    let obstacles: Vec<FlagSet> = (0..graph.obstacle_count())
        .map(|index| {
            let obstacle = graph.obstacle(ObstacleId::from(index));
            let destroy = requirements[obstacle.destroy.index()];
            match obstacle.bypass {
                Some(bypass) => any_of([destroy, requirements[bypass.index()]]),
                None => destroy,
            }
        })
        .collect();

    StaticFlags {
        requirements,
        strats,
        edges,
        locks,
        obstacles,
    }
}

/// OR-combination: Never only if every branch is Never; Always/Free if any
/// branch is.
fn any_of(branches: impl IntoIterator<Item = FlagSet>) -> FlagSet {
    let mut never = true;
    let mut always = false;
    let mut free = false;
    for flags in branches {
        never &= flags.never();
        always |= flags.always();
        free |= flags.free();
    }
    FlagSet::compose(never, always, free)
}

/// AND-combination: Never if any branch is; Always/Free only if all are.
fn all_of(branches: impl IntoIterator<Item = FlagSet>) -> FlagSet {
    let mut never = false;
    let mut always = true;
    let mut free = true;
    for flags in branches {
        never |= flags.never();
        always &= flags.always();
        free &= flags.free();
    }
    FlagSet::compose(never, always, free)
}

/// Precomputed inputs for classifying cost leaves against the baseline.
struct LeafAnalysis<'a> {
    options: &'a ResolvedOptions,
    /// No capabilities at all: the worst case for damage costs.
    bare: Inventory,
    /// Every non-removed capability held: the best case.
    outfitted: Inventory,
}

impl<'a> LeafAnalysis<'a> {
    fn new(graph: &LogicGraph, options: &'a ResolvedOptions) -> Self {
        let bare = Inventory::empty(graph);
        let mut outfitted = Inventory::empty(graph);
        for (id, _) in graph.capabilities() {
            if !options.is_removed(id) {
                outfitted.collect(id);
            }
        }
        Self {
            options,
            bare,
            outfitted,
        }
    }
}

fn requirement_flags(
    graph: &LogicGraph,
    analysis: &LeafAnalysis<'_>,
    memo: &mut Vec<Option<FlagSet>>,
    id: RequirementId,
) -> FlagSet {
    if let Some(flags) = memo[id.index()] {
        return flags;
    }
    let flags = compute_requirement_flags(graph, analysis, memo, id);
    memo[id.index()] = Some(flags);
    flags
}

fn compute_requirement_flags(
    graph: &LogicGraph,
    analysis: &LeafAnalysis<'_>,
    memo: &mut Vec<Option<FlagSet>>,
    id: RequirementId,
) -> FlagSet {
    // The baseline is judged with a full ledger, so `is_available` directly
    // answers "payable at baseline capacity".
    let options = analysis.options;
    match graph.requirement(id) {
        Requirement::Always => FlagSet::compose(false, true, true),
        Requirement::Never => FlagSet::compose(true, false, false),

        Requirement::Ammo { kind, count } => {
            let payable = options
                .starting_state()
                .ledger
                .is_available(kind.consumable(), *count);
            FlagSet::compose(!payable, *count == 0, *count == 0)
        }

        Requirement::EnergyAtMost { limit } => {
            let impossible = *limit < 1;
            let already_under = options.starting_state().ledger.max_amount(ResourceKind::Energy)
                <= *limit;
            FlagSet::compose(impossible, !impossible, already_under)
        }

        Requirement::DamageFrames { kind, frames } => {
            let worst =
                dot_damage(graph, *kind, *frames, &analysis.bare, options.dot_leniency()).cost;
            let best = dot_damage(
                graph,
                *kind,
                *frames,
                &analysis.outfitted,
                options.dot_leniency(),
            )
            .cost;
            let payable = options
                .starting_state()
                .ledger
                .is_available(ConsumableKind::Energy, best);
            FlagSet::compose(!payable, worst == 0, worst == 0)
        }

        Requirement::EnemyHits { source, hits } => {
            let worst =
                hit_damage(graph, *source, *hits, &analysis.bare, options.hit_leniency()).cost;
            let best = hit_damage(
                graph,
                *source,
                *hits,
                &analysis.outfitted,
                options.hit_leniency(),
            )
            .cost;
            let payable = options
                .starting_state()
                .ledger
                .is_available(ConsumableKind::Energy, best);
            FlagSet::compose(!payable, worst == 0, worst == 0)
        }

        Requirement::DefeatEnemy { enemy, count } => {
            let baseline = options.starting_state();
            let weapon_at_baseline = graph
                .enemy(*enemy)
                .weapon_kills
                .iter()
                .any(|cap| baseline.inventory.has(*cap));
            // Acquirable weapons keep the leaf possible even with no ammo.
            let weapon_acquirable = graph
                .enemy(*enemy)
                .weapon_kills
                .iter()
                .any(|cap| !options.is_removed(*cap));
            let ammo_kill = kill_cost(
                graph,
                *enemy,
                *count,
                &analysis.bare,
                &baseline.ledger,
            )
            .is_some();
            FlagSet::compose(
                !weapon_acquirable && !ammo_kill,
                weapon_at_baseline,
                weapon_at_baseline,
            )
        }

        Requirement::Capability(capability) => {
            let removed = options.is_removed(*capability);
            let at_baseline = options.starting_state().inventory.has(*capability);
            FlagSet::compose(removed, at_baseline, at_baseline)
        }

        Requirement::Technique(technique) => {
            let disabled = options.is_technique_disabled(*technique);
            FlagSet::compose(disabled, !disabled, !disabled)
        }

        Requirement::Helper(helper) => {
            requirement_flags(graph, analysis, memo, graph.helper(*helper).requirement)
        }

        // Visit-history predicates are situational: no static claim holds
        // in either direction.
        Requirement::ObstacleCleared(_)
        | Requirement::ClearObstacle(_)
        | Requirement::EnteredFrom { .. } => FlagSet::empty(),

        Requirement::And(children) => {
            let child_flags: Vec<FlagSet> = children
                .iter()
                .map(|child| requirement_flags(graph, analysis, memo, *child))
                .collect();
            all_of(child_flags)
        }

        Requirement::Or(children) => {
            let child_flags: Vec<FlagSet> = children
                .iter()
                .map(|child| requirement_flags(graph, analysis, memo, *child))
                .collect();
            any_of(child_flags)
        }
    }
}
