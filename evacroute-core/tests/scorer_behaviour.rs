//! Behaviour tests for route ranking.

use std::cell::RefCell;

use geo::{Coord, polygon};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use evacroute_core::{
    Candidate, GeoHazardAnalyzer, HazardZone, Ranking, RiskFallback, RouteScorer,
};

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

#[derive(Debug, Default)]
struct World {
    candidates: Vec<Candidate>,
    zones: Vec<HazardZone>,
    fallback: Option<RiskFallback>,
}

#[fixture]
fn world() -> RefCell<World> {
    RefCell::new(World::default())
}

#[fixture]
fn ranking() -> RefCell<Option<Ranking>> {
    RefCell::new(None)
}

/// Straight route heading north, offset east by `lane` so routes never overlap.
fn direct(name: &str, lane: f64, distance: f64, duration: f64) -> Candidate {
    let start = Coord { x: lane, y: 0.0 };
    let end = Coord { x: lane, y: 0.005 };
    Candidate::new(name, end, vec![start, end], distance, duration)
}

fn cost_of(ranking: &RefCell<Option<Ranking>>, name: &str) -> f64 {
    let ranking = ranking.borrow();
    ranking
        .as_ref()
        .and_then(|r| r.candidates().iter().find(|s| s.candidate.name == name))
        .map(|scored| scored.cost)
        .expect("route should be ranked")
}

#[given("routes \"A\" and \"C\" of 500 metres taking 600 seconds with no turns")]
fn given_direct_pair(#[from(world)] world: &RefCell<World>) {
    let mut world = world.borrow_mut();
    world.candidates.push(direct("A", 0.0, 500.0, 600.0));
    world.candidates.push(direct("C", 0.01, 500.0, 600.0));
}

#[given("route \"B\" of 1000 metres taking 2000 seconds with two turns")]
fn given_winding(#[from(world)] world: &RefCell<World>) {
    let path = vec![
        Coord { x: 0.02, y: 0.0 },
        Coord { x: 0.03, y: 0.0 },
        Coord { x: 0.03, y: 0.01 },
        Coord { x: 0.04, y: 0.01 },
    ];
    let end = Coord { x: 0.04, y: 0.01 };
    world
        .borrow_mut()
        .candidates
        .insert(1, Candidate::new("B", end, path, 1_000.0, 2_000.0));
}

#[given("no candidate routes")]
fn given_no_routes(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().candidates.clear();
}

#[given("no hazard zones")]
fn given_no_zones(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().zones.clear();
}

#[given("route \"A\" crosses a hazard zone")]
fn given_hazard_on_a(#[from(world)] world: &RefCell<World>) {
    let zone = polygon![
        (x: -0.001, y: 0.002),
        (x: 0.001, y: 0.002),
        (x: 0.001, y: 0.003),
        (x: -0.001, y: 0.003),
    ];
    world
        .borrow_mut()
        .zones
        .push(HazardZone::new(Some("Lahar".to_owned()), zone));
}

#[given("no hazard analyzer with seed {seed}")]
fn given_no_analyzer(seed: u64, #[from(world)] world: &RefCell<World>) {
    world.borrow_mut().fallback = Some(RiskFallback::Random { seed: Some(seed) });
}

#[when("I rank the routes")]
fn when_rank(
    #[from(world)] world: &RefCell<World>,
    #[from(ranking)] ranking: &RefCell<Option<Ranking>>,
) {
    let world = world.borrow();
    let scorer = world.fallback.map_or_else(
        || RouteScorer::new(GeoHazardAnalyzer),
        RouteScorer::without_analyzer,
    );
    let result = scorer
        .evaluate(ORIGIN, world.candidates.clone(), &world.zones)
        .expect("ranking should succeed");
    *ranking.borrow_mut() = Some(result);
}

#[then("the order is {order}")]
fn then_order(order: String, #[from(ranking)] ranking: &RefCell<Option<Ranking>>) {
    let ranking = ranking.borrow();
    let names: Vec<&str> = ranking
        .as_ref()
        .expect("routes should be ranked")
        .candidates()
        .iter()
        .map(|scored| scored.candidate.name.as_str())
        .collect();
    assert_eq!(names.join(", "), order.trim_matches('"'));
}

#[then("route {name} costs {expected}")]
fn then_cost(name: String, expected: f64, #[from(ranking)] ranking: &RefCell<Option<Ranking>>) {
    let cost = cost_of(ranking, name.trim_matches('"'));
    assert!((cost - expected).abs() <= 1e-9, "expected {expected}, got {cost}");
}

#[then("the ranking is empty")]
fn then_empty(#[from(ranking)] ranking: &RefCell<Option<Ranking>>) {
    let ranking = ranking.borrow();
    assert!(ranking.as_ref().is_some_and(Ranking::is_empty));
}

#[then("the ranking is marked degraded")]
fn then_degraded(#[from(ranking)] ranking: &RefCell<Option<Ranking>>) {
    let ranking = ranking.borrow();
    assert!(ranking.as_ref().is_some_and(Ranking::is_degraded));
}

#[scenario(path = "tests/features/scorer.feature", index = 0)]
fn winding_route_ranks_last(world: RefCell<World>, ranking: RefCell<Option<Ranking>>) {
    let _ = (world, ranking);
}

#[scenario(path = "tests/features/scorer.feature", index = 1)]
fn empty_input(world: RefCell<World>, ranking: RefCell<Option<Ranking>>) {
    let _ = (world, ranking);
}

#[scenario(path = "tests/features/scorer.feature", index = 2)]
fn hazard_crossing(world: RefCell<World>, ranking: RefCell<Option<Ranking>>) {
    let _ = (world, ranking);
}

#[scenario(path = "tests/features/scorer.feature", index = 3)]
fn degraded_analysis(world: RefCell<World>, ranking: RefCell<Option<Ranking>>) {
    let _ = (world, ranking);
}
