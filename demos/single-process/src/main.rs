//! Fixed-scenario illustration of the `gw-sim` library API: one agent,
//! one item type, a handful of ticks, no configuration surface of its own.

use std::f64::consts::TAU;

use gw_agent::Action;
use gw_core::{Direction, Position};
use gw_item::{IntensityFn, InteractionFn, ItemType};
use gw_sim::{CollisionPolicy, NoopObserver, Simulator, SimulatorConfigBuilder};

const TICK_COUNT: u64 = 20;

fn food_item_type() -> ItemType {
    ItemType {
        name: "food".to_string(),
        scent: vec![1.0, 0.0],
        color: vec![0.2, 0.8, 0.2],
        required_item_counts: vec![0],
        required_item_costs: vec![0],
        blocks_movement: false,
        visual_occlusion: 0.0,
        intensity_fn: IntensityFn::Constant(3.0),
        interaction_fns: vec![InteractionFn::piecewise_box(1, 4, -2.0, 0.0)],
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SimulatorConfigBuilder::new()
        .max_steps_per_movement(1)
        .scent_dimension(2)
        .color_dimension(3)
        .vision_range(3)
        .agent_color(vec![0.9, 0.9, 0.9])
        .agent_field_of_view(TAU)
        .patch_size(16)
        .mcmc_iterations(20)
        .item_types(vec![food_item_type()])
        .collision_policy(CollisionPolicy::NoCollisions)
        .decay_param(0.5)
        .diffusion_param(0.3)
        .deleted_item_lifetime(50)
        .seed(42)
        .build()
        .expect("a fixed scenario's own config is always valid");

    let sim = Simulator::new(config, NoopObserver).expect("simulator initializes");
    let agent_id = sim.add_agent(Position { x: 0, y: 0 }, Direction::Up).expect("agent spawns");

    tracing::info!(?agent_id, "spawned agent");

    for tick in 0..TICK_COUNT {
        let direction = if tick % 2 == 0 { Direction::Up } else { Direction::Right };
        let code = sim.request_action(agent_id, Action::Move(direction)).expect("action accepted");
        tracing::debug!(?tick, ?code, "requested move");
    }

    let final_state = sim.agent_state(agent_id).expect("agent still exists");
    println!("ran {TICK_COUNT} ticks, simulator clock at {}", sim.current_time());
    println!(
        "agent {agent_id} ended at {:?} facing {:?}, collected_items = {:?}",
        final_state.position, final_state.facing, final_state.collected_items
    );
}
