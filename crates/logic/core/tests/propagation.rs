//! Static flag propagation: invariants, idempotence, and change
//! propagation from leaves to the objects that embed them.

use logic_core::{
    AmmoKind, AppliedLogic, Baseline, CapabilityDef, DotKind, EdgeId, GraphBuilder, LockId,
    LogicGraph, LogicOptions, Mitigation, ObstacleId, Requirement, RequirementId, StratId,
};

/// A small but representative graph: every leaf kind, shared helpers,
/// strats on an edge, a lock, and an obstacle.
fn fixture() -> LogicGraph {
    let mut builder = GraphBuilder::new();

    let suit = builder.push_capability(CapabilityDef::shield("thermal_suit", Mitigation::HALF));
    let drill = builder.push_capability(CapabilityDef::plain("drill"));
    let beam = builder.push_capability(CapabilityDef::weapon("plasma_beam"));
    let kick = builder.push_technique("wall_kick");

    let enemy = builder.push_enemy(logic_core::EnemyDef {
        name: "sentry".into(),
        hit_points: 200,
        missile_damage: 100,
        super_damage: 300,
        power_bomb_damage: 200,
        weapon_kills: vec![beam],
    });
    let thorns = builder.push_hit_source(logic_core::HitSourceDef {
        name: "thorns".into(),
        damage: 30,
    });

    let location = builder.push_location("boiler_room");
    let west = builder.push_spot(location, "west");
    let east = builder.push_spot(location, "east");

    let has_suit = builder.push_requirement(Requirement::Capability(suit));
    let has_drill = builder.push_requirement(Requirement::Capability(drill));
    let knows_kick = builder.push_requirement(Requirement::Technique(kick));
    let heat_run = builder.push_requirement(Requirement::DamageFrames {
        kind: DotKind::Heat,
        frames: 200,
    });
    let thorn_brush = builder.push_requirement(Requirement::EnemyHits {
        source: thorns,
        hits: 2,
    });
    let spend = builder.push_requirement(Requirement::Ammo {
        kind: AmmoKind::Missiles,
        count: 3,
    });
    let fight = builder.push_requirement(Requirement::DefeatEnemy { enemy, count: 1 });
    let ceiling = builder.push_requirement(Requirement::EnergyAtMost { limit: 40 });
    let gifted = builder.push_requirement(Requirement::Always);
    let cursed = builder.push_requirement(Requirement::Never);

    let drill_or_kick = builder.push_requirement(Requirement::Or(vec![has_drill, knows_kick]));
    let hot_entry = builder.push_requirement(Requirement::And(vec![
        has_suit,
        heat_run,
        drill_or_kick,
    ]));
    let anything = builder.push_requirement(Requirement::Or(vec![
        gifted, cursed, thorn_brush, spend, fight, ceiling,
    ]));
    let everything = builder.push_requirement(Requirement::And(vec![hot_entry, anything]));
    let helper = builder.push_helper("hot_entry", hot_entry);
    let via_helper = builder.push_requirement(Requirement::Helper(helper));

    let main_strat = builder.push_strat("suited_run", everything, Vec::new());
    let alt_strat = builder.push_strat("helper_run", via_helper, Vec::new());
    builder.push_edge(west, east, vec![main_strat, alt_strat]);

    let bomb = builder.push_requirement(Requirement::Ammo {
        kind: AmmoKind::PowerBombs,
        count: 1,
    });
    let crawl = builder.push_requirement(Requirement::Technique(kick));
    builder.push_obstacle("grate", location, bomb, Some(crawl));

    let open_req = builder.push_requirement(Requirement::Capability(drill));
    let open_strat = builder.push_strat("drill_open", open_req, Vec::new());
    builder.push_lock("gate", east, vec![open_strat], Some(knows_kick));

    builder.finish().unwrap()
}

fn profiles() -> Vec<LogicOptions> {
    let rich = Baseline {
        base_maximums: [99, 100, 10, 5, 5],
        capabilities: vec!["thermal_suit".into(), "drill".into(), "plasma_beam".into()],
    };
    let poor = Baseline {
        base_maximums: [99, 0, 0, 0, 0],
        capabilities: Vec::new(),
    };
    vec![
        LogicOptions::new().with_baseline(rich.clone()),
        LogicOptions::new().with_baseline(poor),
        LogicOptions::new()
            .with_baseline(rich.clone())
            .with_removed_capability("drill")
            .with_disabled_technique("wall_kick"),
        LogicOptions::new()
            .with_baseline(rich)
            .with_removed_capability("thermal_suit")
            .with_disabled_strat("suited_run")
            .with_dot_leniency(1.5),
    ]
}

#[test]
fn flag_implications_hold_for_every_node_and_profile() {
    let graph = fixture();
    for options in profiles() {
        let applied = AppliedLogic::apply(&graph, &options);
        let check = |flags: logic_core::FlagSet| {
            assert!(!(flags.always() && flags.never()));
            assert!(!flags.free() || flags.always());
            assert_eq!(flags.relevant(), !flags.never());
        };
        for index in 0..graph.requirement_count() {
            check(applied.requirement_flags(RequirementId::from(index)));
        }
        for index in 0..graph.strat_count() {
            check(applied.strat_flags(StratId::from(index)));
        }
        for index in 0..graph.edge_count() {
            check(applied.edge_flags(EdgeId::from(index)));
        }
        for index in 0..graph.lock_count() {
            check(applied.lock_flags(LockId::from(index)));
        }
        for index in 0..graph.obstacle_count() {
            check(applied.obstacle_flags(ObstacleId::from(index)));
        }
    }
}

#[test]
fn applying_the_same_profile_twice_is_idempotent() {
    let graph = fixture();
    for options in profiles() {
        let first = AppliedLogic::apply(&graph, &options);
        let second = AppliedLogic::apply(&graph, &options);
        for index in 0..graph.requirement_count() {
            let id = RequirementId::from(index);
            assert_eq!(first.requirement_flags(id), second.requirement_flags(id));
        }
        for index in 0..graph.strat_count() {
            let id = StratId::from(index);
            assert_eq!(first.strat_flags(id), second.strat_flags(id));
        }
        for index in 0..graph.edge_count() {
            let id = EdgeId::from(index);
            assert_eq!(first.edge_flags(id), second.edge_flags(id));
        }
    }
}

#[test]
fn capability_removal_propagates_to_the_root() {
    // A two-branch OR whose branches are a capability and a technique.
    // Removing the capability and disabling the technique drives the OR to
    // Never, and the parent AND with it, all the way to strat and edge.
    let mut builder = GraphBuilder::new();
    let drill = builder.push_capability(CapabilityDef::plain("drill"));
    let kick = builder.push_technique("wall_kick");
    let location = builder.push_location("hall");
    let west = builder.push_spot(location, "west");
    let east = builder.push_spot(location, "east");

    let has_drill = builder.push_requirement(Requirement::Capability(drill));
    let knows_kick = builder.push_requirement(Requirement::Technique(kick));
    let either = builder.push_requirement(Requirement::Or(vec![has_drill, knows_kick]));
    let free_part = builder.push_requirement(Requirement::Always);
    let root = builder.push_requirement(Requirement::And(vec![free_part, either]));
    let strat = builder.push_strat("only_way", root, Vec::new());
    let edge = builder.push_edge(west, east, vec![strat]);
    let graph = builder.finish().unwrap();

    let permissive = AppliedLogic::apply(&graph, &LogicOptions::new());
    assert!(!permissive.requirement_flags(either).never());
    assert!(!permissive.edge_flags(edge).never());

    let stripped = AppliedLogic::apply(
        &graph,
        &LogicOptions::new()
            .with_removed_capability("drill")
            .with_disabled_technique("wall_kick"),
    );
    assert!(stripped.requirement_flags(has_drill).never());
    assert!(stripped.requirement_flags(knows_kick).never());
    assert!(stripped.requirement_flags(either).never());
    assert!(stripped.requirement_flags(root).never());
    assert!(stripped.strat_flags(strat).never());
    assert!(stripped.edge_flags(edge).never());
    // The Always sibling alone must not rescue the AND.
    assert!(stripped.requirement_flags(free_part).always());
}

#[test]
fn free_is_strictly_stronger_than_always() {
    let mut builder = GraphBuilder::new();
    let gifted = builder.push_requirement(Requirement::Always);
    let ceiling = builder.push_requirement(Requirement::EnergyAtMost { limit: 40 });
    let both = builder.push_requirement(Requirement::And(vec![gifted, ceiling]));
    let graph = builder.finish().unwrap();

    let applied = AppliedLogic::apply(&graph, &LogicOptions::new());
    // The ceiling is always satisfiable but may cost energy: not free.
    assert!(applied.requirement_flags(ceiling).always());
    assert!(!applied.requirement_flags(ceiling).free());
    // The AND inherits always-but-not-free.
    assert!(applied.requirement_flags(both).always());
    assert!(!applied.requirement_flags(both).free());
    // A pure Always leaf is free.
    assert!(applied.requirement_flags(gifted).free());
}

#[test]
fn obstacle_is_never_only_if_both_paths_are() {
    let mut builder = GraphBuilder::new();
    let kick = builder.push_technique("wall_kick");
    let location = builder.push_location("shaft");
    let bomb = builder.push_requirement(Requirement::Ammo {
        kind: AmmoKind::PowerBombs,
        count: 1,
    });
    let crawl = builder.push_requirement(Requirement::Technique(kick));
    let grate = builder.push_obstacle("grate", location, bomb, Some(crawl));
    let graph = builder.finish().unwrap();

    // No power bombs at baseline: the destroy path is Never, the bypass is
    // not, so the obstacle stays relevant.
    let options = LogicOptions::new();
    let applied = AppliedLogic::apply(&graph, &options);
    assert!(applied.requirement_flags(bomb).never());
    assert!(!applied.obstacle_flags(grate).never());

    // Disabling the bypass technique too makes the obstacle Never.
    let sealed = AppliedLogic::apply(
        &graph,
        &LogicOptions::new().with_disabled_technique("wall_kick"),
    );
    assert!(sealed.obstacle_flags(grate).never());
}

#[test]
fn leniency_can_push_a_damage_leaf_to_never() {
    let mut builder = GraphBuilder::new();
    let run = builder.push_requirement(Requirement::DamageFrames {
        kind: DotKind::Electricity,
        frames: 70,
    });
    let graph = builder.finish().unwrap();

    let strict = AppliedLogic::apply(&graph, &LogicOptions::new());
    assert!(!strict.requirement_flags(run).never());

    // 70 frames at 1.5 leniency is 105 damage against a 99-energy pool.
    let lenient = AppliedLogic::apply(
        &graph,
        &LogicOptions::new().with_dot_leniency(1.5),
    );
    assert!(lenient.requirement_flags(run).never());
}
