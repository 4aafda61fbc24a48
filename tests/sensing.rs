mod common;

use common::{zero_rng, WorldBuilder};
use living_matrix_lib::model::systems::perception::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_reports_every_feature() {
    let mut world = WorldBuilder::new()
        .with_agent(2.5, 2.5, 60.0)
        .with_agent(3.5, 2.5, 60.0)
        .with_food(2, 1)
        .with_food(3, 2)
        .with_pheromone(2, 2, 100)
        .with_pheromone(3, 2, 200)
        .with_pheromone(1, 2, 50)
        .build();
    world.tick = OSC_PERIOD / 4.0;

    let inputs = world.sense(0, &mut zero_rng()).expect("agent exists");

    assert_eq!(inputs[INPUT_FOOD_N], 1.0);
    assert_eq!(inputs[INPUT_FOOD_S], 0.0);
    assert_eq!(inputs[INPUT_FOOD_E], 1.0);
    assert_eq!(inputs[INPUT_FOOD_W], 0.0);
    assert!(close(inputs[INPUT_PROXIMITY], 0.96));
    assert!(close(inputs[INPUT_PHEROMONE], 100.0 / 255.0));
    assert!(close(inputs[INPUT_GRAD_X], 150.0 / 255.0));
    assert_eq!(inputs[INPUT_GRAD_Y], 0.0);
    assert!(close(inputs[INPUT_WALL], 0.4));
    assert!(close(inputs[INPUT_ENERGY], 0.5));
    assert!(close(inputs[INPUT_OSC], 1.0));
    assert_eq!(inputs[INPUT_NOISE], 0.0);
}

#[test]
fn test_alone_means_zero_proximity() {
    let world = WorldBuilder::new().with_agent(2.5, 2.5, 60.0).build();
    let inputs = world.sense(0, &mut zero_rng()).expect("agent exists");
    assert_eq!(inputs[INPUT_PROXIMITY], 0.0);
}

#[test]
fn test_dead_and_distant_agents_ignored() {
    let mut world = WorldBuilder::new()
        .with_size(20, 20)
        .with_agent(2.5, 2.5, 60.0)
        .with_agent(3.0, 2.5, 60.0)
        .with_agent(9.5, 2.5, 60.0)
        .build();
    world.agents[1].alive = false;
    let inputs = world.sense(0, &mut zero_rng()).expect("agent exists");
    assert_eq!(inputs[INPUT_PROXIMITY], 0.0, "nearest live agent is 7 cells away");
}

#[test]
fn test_boundary_reads() {
    let world = WorldBuilder::new()
        .with_agent(0.5, 0.5, 0.0)
        .with_food(1, 0)
        .with_pheromone(0, 0, 90)
        .with_pheromone(0, 1, 255)
        .build();
    let inputs = world.sense(0, &mut zero_rng()).expect("agent exists");

    assert_eq!(inputs[INPUT_FOOD_N], 0.0);
    assert_eq!(inputs[INPUT_FOOD_W], 0.0);
    assert_eq!(inputs[INPUT_FOOD_E], 1.0);
    // West and north fall back to the agent's own cell.
    assert!(close(inputs[INPUT_GRAD_X], -90.0 / 255.0));
    assert!(close(inputs[INPUT_GRAD_Y], (255.0 - 90.0) / 255.0));
    assert_eq!(inputs[INPUT_WALL], 0.0);
    assert_eq!(inputs[INPUT_ENERGY], 0.0);
}

#[test]
fn test_sensing_reads_only() {
    let world = WorldBuilder::new()
        .with_agent(1.5, 1.5, 60.0)
        .with_agent(2.5, 1.5, 60.0)
        .with_food(1, 0)
        .with_pheromone(1, 1, 40)
        .build();
    let food = world.field.food.cells().to_vec();
    let scent = world.field.pheromones.cells().to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for i in 0..2 {
        world.sense(i, &mut rng).expect("agent exists");
    }
    assert_eq!(world.field.food.cells(), food.as_slice());
    assert_eq!(world.field.pheromones.cells(), scent.as_slice());
}

#[test]
fn test_energy_clamped_above_max() {
    let world = WorldBuilder::new().with_agent(2.5, 2.5, 500.0).build();
    let inputs = world.sense(0, &mut zero_rng()).expect("agent exists");
    assert_eq!(inputs[INPUT_ENERGY], 1.0);
}

proptest! {
    #[test]
    fn prop_features_in_documented_ranges(
        ax in 0.25f64..9.75,
        ay in 0.25f64..7.75,
        bx in 0.25f64..9.75,
        by in 0.25f64..7.75,
        energy in 0.0f64..200.0,
        tick in 0.0f64..1000.0,
        seed in any::<u64>(),
    ) {
        let mut world = WorldBuilder::new()
            .with_size(10, 8)
            .with_agent(ax, ay, energy)
            .with_agent(bx, by, 60.0)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        world.seed_food(0.5, &mut rng);
        for i in 0..80 {
            world.field.pheromones.set(i % 10, i / 10, ((i * 37) % 256) as u8);
        }
        world.tick = tick;

        let inputs = world.sense(0, &mut rng).expect("agent exists");
        for &f in &inputs[INPUT_FOOD_N..=INPUT_FOOD_W] {
            prop_assert!(f == 0.0 || f == 1.0);
        }
        for idx in [INPUT_PROXIMITY, INPUT_PHEROMONE, INPUT_WALL, INPUT_ENERGY, INPUT_OSC] {
            prop_assert!((0.0..=1.0).contains(&inputs[idx]), "feature {} = {}", idx, inputs[idx]);
        }
        prop_assert!((-1.0..=1.0).contains(&inputs[INPUT_GRAD_X]));
        prop_assert!((-1.0..=1.0).contains(&inputs[INPUT_GRAD_Y]));
        prop_assert!((0.0..1.0).contains(&inputs[INPUT_NOISE]));
        prop_assert!(inputs[INPUT_WALL] <= 0.5);
    }
}
