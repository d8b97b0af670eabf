use platnav_core::{Aabb, NavConfig, OccupancyOracle, ProbeConfig, SolidBoxes, TickContext, Vec2};
use platnav_grid::{DecisionSource, GridNavigator, MovementAction};
use proptest::prelude::*;

type Nav = GridNavigator<OccupancyOracle<SolidBoxes>>;

fn navigator(solids: Vec<Aabb>) -> Nav {
    let oracle = OccupancyOracle::new(SolidBoxes::new(solids), ProbeConfig::default());
    GridNavigator::new(oracle, &NavConfig::default())
}

fn flat_ground() -> Nav {
    let mut nav = navigator(vec![Aabb::new(
        Vec2::new(-10.0, -1.0),
        Vec2::new(10.0, 0.0),
    )]);
    nav.rebuild(Aabb::new(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)));
    nav
}

#[test]
fn agent_walks_right_until_it_reaches_the_goal() {
    let mut nav = flat_ground();
    let goal = Vec2::new(8.0, 1.0);
    let mut agent = Vec2::new(0.0, 1.0);

    let first = nav.decide(agent, goal);
    assert_eq!(first.action, MovementAction::MoveRight);
    assert_eq!(first.source, DecisionSource::Field);

    let mut steps = 0;
    loop {
        match nav.movement_action(agent, goal) {
            MovementAction::MoveRight => agent.x += 0.5,
            MovementAction::Idle => break,
            other => panic!("unexpected action {other:?} at {agent:?}"),
        }
        steps += 1;
        assert!(steps < 100, "agent never arrived");
    }

    assert!((agent.x - 8.0).abs() <= 0.3, "stopped at {agent:?}");
}

#[test]
fn agent_walks_left_toward_a_goal_on_the_left() {
    let mut nav = flat_ground();

    let decision = nav.decide(Vec2::new(8.0, 1.0), Vec2::new(-8.0, 1.0));

    assert_eq!(decision.action, MovementAction::MoveLeft);
    assert_eq!(decision.source, DecisionSource::Field);
    assert_eq!(decision.height_difference, 0);
}

#[test]
fn distant_goal_falls_back_without_densifying() {
    let mut nav = flat_ground();
    let cells = nav.graph().len();
    let revision = nav.graph().revision();

    let decision = nav.decide(Vec2::new(0.0, 1.0), Vec2::new(100.0, 1.0));

    assert_eq!(decision.action, MovementAction::MoveRight);
    assert_eq!(decision.source, DecisionSource::Fallback);
    assert_eq!(nav.graph().len(), cells);
    assert_eq!(nav.graph().revision(), revision);
    assert!(nav.last_field().is_none());
}

#[test]
fn uncovered_goal_in_range_is_densified() {
    let mut nav = navigator(vec![Aabb::new(
        Vec2::new(-10.0, -1.0),
        Vec2::new(40.0, 0.0),
    )]);
    nav.rebuild(Aabb::new(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)));
    let goal = Vec2::new(30.0, 1.0);
    let goal_cell = nav.graph().world_to_grid(goal);
    assert!(!nav.graph().contains(goal_cell));

    let decision = nav.decide(Vec2::new(0.0, 1.0), goal);

    assert!(nav.graph().contains(goal_cell));
    assert_eq!(nav.last_field().map(|f| f.goal()), Some(goal_cell));
    // The densified island is not connected to the agent yet.
    assert_eq!(decision.action, MovementAction::MoveRight);
    assert_eq!(decision.source, DecisionSource::Fallback);

    let near = nav.decide(Vec2::new(26.0, 1.0), goal);
    assert_eq!(near.action, MovementAction::MoveRight);
    assert_eq!(near.source, DecisionSource::Field);
}

#[test]
fn height_difference_is_reported_but_never_jumps() {
    let mut nav = flat_ground();

    let decision = nav.decide(Vec2::new(0.0, 1.0), Vec2::new(8.0, 2.0));

    assert_eq!(decision.height_difference, 1);
    assert_eq!(decision.action, MovementAction::MoveRight);
}

#[test]
fn repeated_queries_are_pure() {
    let mut nav = flat_ground();
    let agent = Vec2::new(-6.0, 1.0);
    let goal = Vec2::new(4.0, 1.0);

    let a = nav.decide(agent, goal);
    let revision = nav.graph().revision();
    let cached = nav.cache().len();
    let b = nav.decide(agent, goal);

    assert_eq!(a, b);
    assert_eq!(nav.graph().revision(), revision);
    assert_eq!(nav.cache().len(), cached);
}

#[test]
fn tick_populates_an_empty_navigator() {
    let mut nav = navigator(vec![Aabb::new(
        Vec2::new(-10.0, -1.0),
        Vec2::new(10.0, 0.0),
    )]);
    assert!(nav.graph().is_empty());

    let report = nav.tick(&TickContext::new(0, 1.0 / 60.0), Vec2::new(0.0, 1.0));

    assert!(report.window_generated);
    assert_eq!(report.cells_added, nav.graph().len());
    assert_eq!(
        nav.movement_action(Vec2::new(-4.0, 1.0), Vec2::new(4.0, 1.0)),
        MovementAction::MoveRight
    );
}

#[test]
fn reset_rebuilds_around_reference() {
    let mut nav = navigator(vec![Aabb::new(
        Vec2::new(-10.0, -1.0),
        Vec2::new(10.0, 0.0),
    )]);

    let created = nav.reset(Vec2::new(0.0, 1.0));

    assert_eq!(created, 22);
    assert_eq!(nav.maintainer().last_generation(), Some(Vec2::new(0.0, 1.0)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn only_horizontal_actions_are_emitted(
        ax in -20.0f32..20.0, ay in 0.0f32..4.0,
        gx in -20.0f32..20.0, gy in 0.0f32..4.0,
    ) {
        let mut nav = flat_ground();
        let decision = nav.decide(Vec2::new(ax, ay), Vec2::new(gx, gy));
        prop_assert!(matches!(
            decision.action,
            MovementAction::Idle | MovementAction::MoveLeft | MovementAction::MoveRight
        ));
    }
}
