//! Damage rule functions.
//!
//! Pure translations from abstract damage sources into concrete energy
//! costs, parameterized by the current inventory (shield-equivalent
//! mitigation) and a configurable leniency multiplier. The leniency scales
//! the exposure (frames or hits) before the base rate applies; mitigation
//! divides the result, using the single best divisor among held
//! capabilities.

use logic_graph::{Capacity, CapabilityId, DotKind, HitSourceId, LogicGraph};

use crate::inventory::Inventory;

/// A computed energy cost and the capability credited for reducing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Energy to consume.
    pub cost: Capacity,
    /// The mitigating capability applied, if any reduced the cost.
    pub mitigation: Option<CapabilityId>,
}

/// The best mitigation divisor among held, enabled capabilities.
///
/// Divisors do not stack; a single best shield applies.
pub fn best_mitigation(graph: &LogicGraph, inventory: &Inventory) -> (u32, Option<CapabilityId>) {
    let mut divisor = 1u32;
    let mut source = None;
    for (id, def) in graph.capabilities() {
        if let Some(mitigation) = def.mitigation
            && inventory.has(id)
            && mitigation.divisor > divisor
        {
            divisor = mitigation.divisor;
            source = Some(id);
        }
    }
    (divisor, source)
}

/// Energy cost of enduring damage-over-time for a frame count.
pub fn dot_damage(
    graph: &LogicGraph,
    kind: DotKind,
    frames: u32,
    inventory: &Inventory,
    leniency: f32,
) -> DamageOutcome {
    let lenient_frames = (frames as f32 * leniency).ceil() as u32;
    let raw = graph.damage_table().damage(kind, lenient_frames);
    mitigate(graph, inventory, raw)
}

/// Energy cost of taking `hits` from a contact-damage source.
pub fn hit_damage(
    graph: &LogicGraph,
    source: HitSourceId,
    hits: u32,
    inventory: &Inventory,
    leniency: f32,
) -> DamageOutcome {
    let lenient_hits = (hits as f32 * leniency).ceil() as u32;
    let raw = graph.hit_source(source).damage * lenient_hits as Capacity;
    mitigate(graph, inventory, raw)
}

fn mitigate(graph: &LogicGraph, inventory: &Inventory, raw: Capacity) -> DamageOutcome {
    let (divisor, source) = best_mitigation(graph, inventory);
    let cost = raw / divisor as Capacity;
    DamageOutcome {
        cost,
        // Only credit the shield when it actually changed the outcome.
        mitigation: if divisor > 1 && raw > 0 { source } else { None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_graph::{CapabilityDef, GraphBuilder, HitSourceDef, Mitigation};

    fn shield_graph() -> (LogicGraph, CapabilityId, CapabilityId, HitSourceId) {
        let mut builder = GraphBuilder::new();
        let half = builder.push_capability(CapabilityDef::shield("thermal_suit", Mitigation::HALF));
        let quarter =
            builder.push_capability(CapabilityDef::shield("pressure_suit", Mitigation::QUARTER));
        let thorns = builder.push_hit_source(HitSourceDef {
            name: "thorns".into(),
            damage: 60,
        });
        (builder.finish().unwrap(), half, quarter, thorns)
    }

    #[test]
    fn unshielded_dot_uses_base_rate() {
        let (graph, _, _, _) = shield_graph();
        let inventory = Inventory::empty(&graph);
        let outcome = dot_damage(&graph, DotKind::Heat, 400, &inventory, 1.0);
        assert_eq!(outcome.cost, 100);
        assert_eq!(outcome.mitigation, None);
    }

    #[test]
    fn best_shield_wins_and_is_credited() {
        let (graph, half, quarter, _) = shield_graph();
        let mut inventory = Inventory::empty(&graph);
        inventory.collect(half);
        inventory.collect(quarter);
        let outcome = dot_damage(&graph, DotKind::Heat, 400, &inventory, 1.0);
        assert_eq!(outcome.cost, 25);
        assert_eq!(outcome.mitigation, Some(quarter));
    }

    #[test]
    fn disabled_shield_does_not_mitigate() {
        let (graph, half, _, _) = shield_graph();
        let mut inventory = Inventory::empty(&graph);
        inventory.collect(half);
        inventory.disable(half);
        let outcome = dot_damage(&graph, DotKind::Heat, 400, &inventory, 1.0);
        assert_eq!(outcome.cost, 100);
    }

    #[test]
    fn leniency_stretches_exposure() {
        let (graph, _, _, thorns) = shield_graph();
        let inventory = Inventory::empty(&graph);
        let strict = hit_damage(&graph, thorns, 2, &inventory, 1.0);
        let lenient = hit_damage(&graph, thorns, 2, &inventory, 1.5);
        assert_eq!(strict.cost, 120);
        assert_eq!(lenient.cost, 180);
    }
}
