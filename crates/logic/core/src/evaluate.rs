//! Requirement tree evaluation.
//!
//! `evaluate` answers "can this requirement be satisfied from this state,
//! and what does the world look like afterwards". Infeasibility is `None`;
//! errors do not exist at this layer (an inconsistent graph was already
//! rejected by the builder).
//!
//! Evaluation never mutates the caller's state: cost leaves clone it,
//! apply their delta to the clone, and hand the clone back inside the
//! result. AND nodes thread the clone forward so later children observe
//! earlier children's side effects; OR branches each start from the
//! original state and the cheapest success wins.

use logic_graph::{
    AmmoKind, Capacity, CapabilityId, ConsumableKind, LogicGraph, Requirement, RequirementId,
};

use crate::compare::best_choice;
use crate::propagate::AppliedLogic;
use crate::result::{ExecutionResult, chain};
use crate::rules::{dot_damage, hit_damage, kill_cost};
use crate::state::SimulatedState;

/// Borrowed evaluation context: the frozen graph plus one applied
/// configuration. Read-only for the duration of any evaluation.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub graph: &'a LogicGraph,
    pub applied: &'a AppliedLogic,
}

impl<'a> EvalContext<'a> {
    pub fn new(graph: &'a LogicGraph, applied: &'a AppliedLogic) -> Self {
        Self { graph, applied }
    }

    /// Evaluates a requirement tree against a state.
    ///
    /// `repeat` models forced retries: it scales the resource-consuming
    /// leaves multiplicatively while reference leaves are still checked
    /// exactly once. A `repeat` of 0 is treated as 1.
    pub fn evaluate(
        &self,
        id: RequirementId,
        state: &SimulatedState,
        repeat: u32,
    ) -> Option<ExecutionResult> {
        let repeat = repeat.max(1);
        match self.graph.requirement(id) {
            Requirement::Always => Some(ExecutionResult::free(state.clone())),
            Requirement::Never => None,

            Requirement::Ammo { kind, count } => {
                let pool = kind.consumable();
                let total = *count * repeat as Capacity;
                if !state.ledger.is_available(pool, total) {
                    return None;
                }
                let mut result = ExecutionResult::free(state.clone());
                result.state.ledger.consume(pool, total);
                result.log.record_spent(pool, total);
                Some(result)
            }

            Requirement::EnergyAtMost { limit } => {
                // Drains toward a target, so repetition changes nothing and
                // a state already under the target pays zero.
                if *limit < 1 {
                    return None;
                }
                let mut result = ExecutionResult::free(state.clone());
                let spent = result.state.ledger.drain_energy_to(*limit);
                result.log.record_spent(ConsumableKind::Energy, spent);
                Some(result)
            }

            Requirement::DamageFrames { kind, frames } => {
                let outcome = dot_damage(
                    self.graph,
                    *kind,
                    *frames,
                    &state.inventory,
                    self.applied.options().dot_leniency(),
                );
                self.apply_damage(state, outcome.cost * repeat as Capacity, outcome.mitigation)
            }

            Requirement::EnemyHits { source, hits } => {
                let outcome = hit_damage(
                    self.graph,
                    *source,
                    *hits,
                    &state.inventory,
                    self.applied.options().hit_leniency(),
                );
                self.apply_damage(state, outcome.cost * repeat as Capacity, outcome.mitigation)
            }

            Requirement::DefeatEnemy { enemy, count } => {
                let total = count * repeat;
                let outcome =
                    kill_cost(self.graph, *enemy, total, &state.inventory, &state.ledger)?;
                let mut result = ExecutionResult::free(state.clone());
                for kind in AmmoKind::all() {
                    let spent = outcome.spent(kind);
                    if spent > 0 {
                        result.state.ledger.consume(kind.consumable(), spent);
                        result.log.record_spent(kind.consumable(), spent);
                    }
                }
                if let Some(weapon) = outcome.weapon {
                    result.log.record_capability(weapon);
                }
                result.log.record_enemies(*enemy, total);
                Some(result)
            }

            Requirement::Capability(capability) => {
                if self.applied.options().is_removed(*capability)
                    || !state.inventory.has(*capability)
                {
                    return None;
                }
                let mut result = ExecutionResult::free(state.clone());
                result.log.record_capability(*capability);
                Some(result)
            }

            Requirement::Technique(technique) => {
                if self.applied.options().is_technique_disabled(*technique) {
                    None
                } else {
                    Some(ExecutionResult::free(state.clone()))
                }
            }

            Requirement::Helper(helper) => {
                // The reference itself is checked once; repeat still reaches
                // the cost leaves inside the shared tree.
                self.evaluate(self.graph.helper(*helper).requirement, state, repeat)
            }

            Requirement::ObstacleCleared(obstacle) => {
                if state.visit.is_destroyed(*obstacle) {
                    Some(ExecutionResult::free(state.clone()))
                } else {
                    None
                }
            }

            Requirement::ClearObstacle(obstacle) => {
                if state.visit.is_destroyed(*obstacle) {
                    return Some(ExecutionResult::free(state.clone()));
                }
                let destroy = self.graph.obstacle(*obstacle).destroy;
                let mut result = self.evaluate(destroy, state, repeat)?;
                result.state.visit.record_destroyed(*obstacle);
                result.log.record_obstacle(*obstacle);
                Some(result)
            }

            Requirement::EnteredFrom { spots } => {
                let previous = state.visit.previous_spot()?;
                if spots.contains(&previous) {
                    Some(ExecutionResult::free(state.clone()))
                } else {
                    None
                }
            }

            Requirement::And(children) => {
                let mut result = Some(ExecutionResult::free(state.clone()));
                for child in children {
                    result = chain(result, |current| self.evaluate(*child, current, repeat));
                    if result.is_none() {
                        return None;
                    }
                }
                result
            }

            Requirement::Or(children) => best_choice(
                children.len(),
                self.applied.options().weights(),
                |index| self.evaluate(children[index], state, repeat),
            )
            .map(|(_, result)| result),
        }
    }

    /// Pre-checks and applies an energy delta, crediting the mitigating
    /// capability.
    fn apply_damage(
        &self,
        state: &SimulatedState,
        cost: Capacity,
        mitigation: Option<CapabilityId>,
    ) -> Option<ExecutionResult> {
        let pool = ConsumableKind::Energy;
        if !state.ledger.is_available(pool, cost) {
            return None;
        }
        let mut result = ExecutionResult::free(state.clone());
        if cost > 0 {
            result.state.ledger.consume(pool, cost);
            result.log.record_spent(pool, cost);
        }
        if let Some(capability) = mitigation {
            result.log.record_capability(capability);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Baseline, LogicOptions};
    use logic_graph::{
        AmmoKind, CapabilityDef, ConsumableKind, DotKind, GraphBuilder, Mitigation, Requirement,
        ResourceKind,
    };

    struct Fixture {
        graph: LogicGraph,
        applied: AppliedLogic,
    }

    impl Fixture {
        fn new(build: impl FnOnce(&mut GraphBuilder), options: LogicOptions) -> Self {
            let mut builder = GraphBuilder::new();
            build(&mut builder);
            let graph = builder.finish().unwrap();
            let applied = AppliedLogic::apply(&graph, &options);
            Self { graph, applied }
        }

        fn ctx(&self) -> EvalContext<'_> {
            EvalContext::new(&self.graph, &self.applied)
        }
    }

    fn baseline_99_with_ammo() -> LogicOptions {
        LogicOptions::new().with_baseline(Baseline {
            base_maximums: [99, 0, 10, 0, 5],
            capabilities: Vec::new(),
        })
    }

    #[test]
    fn ammo_leaf_spends_and_logs() {
        let fixture = Fixture::new(
            |builder| {
                builder.push_requirement(Requirement::Ammo {
                    kind: AmmoKind::Missiles,
                    count: 4,
                });
            },
            baseline_99_with_ammo(),
        );
        let state = fixture.applied.starting_state();
        let result = fixture
            .ctx()
            .evaluate(RequirementId::from(0usize), &state, 1)
            .unwrap();
        assert_eq!(result.log.spent(ConsumableKind::Missiles), 4);
        assert_eq!(result.state.ledger.amount(ResourceKind::Missiles), 6);
        // Caller's state is untouched.
        assert_eq!(state.ledger.amount(ResourceKind::Missiles), 10);
    }

    #[test]
    fn repeat_scales_cost_leaves() {
        let fixture = Fixture::new(
            |builder| {
                builder.push_requirement(Requirement::Ammo {
                    kind: AmmoKind::Missiles,
                    count: 4,
                });
            },
            baseline_99_with_ammo(),
        );
        let state = fixture.applied.starting_state();
        let ctx = fixture.ctx();
        assert!(ctx.evaluate(RequirementId::from(0usize), &state, 2).is_some());
        assert!(ctx.evaluate(RequirementId::from(0usize), &state, 3).is_none());
    }

    #[test]
    fn energy_at_most_is_a_noop_below_target() {
        let fixture = Fixture::new(
            |builder| {
                builder.push_requirement(Requirement::EnergyAtMost { limit: 50 });
            },
            baseline_99_with_ammo(),
        );
        let ctx = fixture.ctx();
        let state = fixture.applied.starting_state();

        let result = ctx.evaluate(RequirementId::from(0usize), &state, 1).unwrap();
        assert_eq!(result.state.ledger.amount(ResourceKind::Energy), 50);
        assert_eq!(result.log.spent(ConsumableKind::Energy), 49);

        // Already below the target: nothing is subtracted.
        let mut low = result.state.clone();
        low.ledger.consume(ConsumableKind::Energy, 10);
        let again = ctx.evaluate(RequirementId::from(0usize), &low, 1).unwrap();
        assert_eq!(again.log.spent(ConsumableKind::Energy), 0);
        assert_eq!(again.state.ledger.amount(ResourceKind::Energy), 40);
    }

    #[test]
    fn damage_leaf_respects_the_health_floor() {
        let fixture = Fixture::new(
            |builder| {
                builder.push_requirement(Requirement::DamageFrames {
                    kind: DotKind::Electricity,
                    frames: 99,
                });
            },
            baseline_99_with_ammo(),
        );
        let ctx = fixture.ctx();
        let state = fixture.applied.starting_state();
        // 99 damage from 99 energy would hit zero: refused.
        assert!(ctx.evaluate(RequirementId::from(0usize), &state, 1).is_none());
    }

    #[test]
    fn mitigation_reduces_and_is_logged() {
        let fixture = Fixture::new(
            |builder| {
                builder.push_capability(CapabilityDef::shield("thermal_suit", Mitigation::HALF));
                builder.push_requirement(Requirement::DamageFrames {
                    kind: DotKind::Heat,
                    frames: 400,
                });
            },
            LogicOptions::new().with_baseline(Baseline {
                base_maximums: [99, 0, 0, 0, 0],
                capabilities: vec!["thermal_suit".into()],
            }),
        );
        let ctx = fixture.ctx();
        let state = fixture.applied.starting_state();
        let result = ctx.evaluate(RequirementId::from(0usize), &state, 1).unwrap();
        assert_eq!(result.log.spent(ConsumableKind::Energy), 50);
        let suit = fixture.graph.capability_by_name("thermal_suit").unwrap();
        assert_eq!(result.log.capabilities_used(), &[suit]);
    }

    #[test]
    fn and_threads_state_in_order() {
        let fixture = Fixture::new(
            |builder| {
                let location = builder.push_location("shaft");
                let first = builder.push_requirement(Requirement::Ammo {
                    kind: AmmoKind::PowerBombs,
                    count: 1,
                });
                let gate = builder.push_obstacle("grate", location, first, None);
                let destroy = builder.push_requirement(Requirement::ClearObstacle(gate));
                let check = builder.push_requirement(Requirement::ObstacleCleared(gate));
                builder.push_requirement(Requirement::And(vec![destroy, check]));
            },
            baseline_99_with_ammo(),
        );
        let ctx = fixture.ctx();
        let state = fixture.applied.starting_state();
        // The ObstacleCleared reference alone fails from a fresh state...
        assert!(ctx.evaluate(RequirementId::from(2usize), &state, 1).is_none());
        // ...but the AND destroys first, so the reference sees the wreck.
        let result = ctx.evaluate(RequirementId::from(3usize), &state, 1).unwrap();
        assert_eq!(result.log.obstacles_destroyed().len(), 1);
        assert_eq!(result.log.spent(ConsumableKind::PowerBombs), 1);
    }

    #[test]
    fn or_picks_the_cheapest_branch() {
        let fixture = Fixture::new(
            |builder| {
                let expensive = builder.push_requirement(Requirement::DamageFrames {
                    kind: DotKind::Electricity,
                    frames: 30,
                });
                let cheap = builder.push_requirement(Requirement::DamageFrames {
                    kind: DotKind::Electricity,
                    frames: 20,
                });
                builder.push_requirement(Requirement::Or(vec![expensive, cheap]));
            },
            baseline_99_with_ammo().with_weights(crate::compare::ResourceWeights::ENERGY_ONLY),
        );
        let ctx = fixture.ctx();
        let state = fixture.applied.starting_state();
        let result = ctx.evaluate(RequirementId::from(2usize), &state, 1).unwrap();
        assert_eq!(result.log.spent(ConsumableKind::Energy), 20);
        assert_eq!(result.state.ledger.amount(ResourceKind::Energy), 79);
    }

    #[test]
    fn or_fails_only_when_all_branches_fail() {
        let fixture = Fixture::new(
            |builder| {
                let never = builder.push_requirement(Requirement::Never);
                let also_never = builder.push_requirement(Requirement::Never);
                builder.push_requirement(Requirement::Or(vec![never, also_never]));
            },
            baseline_99_with_ammo(),
        );
        let state = fixture.applied.starting_state();
        assert!(fixture
            .ctx()
            .evaluate(RequirementId::from(2usize), &state, 1)
            .is_none());
    }
}
