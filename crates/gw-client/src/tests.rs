use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use gw_core::{Direction, Position};
use gw_item::{IntensityFn, InteractionFn, ItemType};
use gw_proto::ResponseCode;
use gw_server::server::{Server, ServerConfig};
use gw_sim::{CollisionPolicy, SimulatorConfig, SimulatorConfigBuilder};

use crate::callbacks::Callbacks;
use crate::client::Client;

fn food_item() -> ItemType {
    ItemType {
        name: "food".to_string(),
        scent: vec![1.0],
        color: vec![1.0],
        required_item_counts: vec![0],
        required_item_costs: vec![0],
        blocks_movement: false,
        visual_occlusion: 0.0,
        intensity_fn: IntensityFn::Constant(5.0),
        interaction_fns: vec![InteractionFn::Zero],
    }
}

fn base_sim_config() -> SimulatorConfig {
    SimulatorConfigBuilder::new()
        .max_steps_per_movement(1)
        .scent_dimension(1)
        .color_dimension(1)
        .vision_range(1)
        .agent_field_of_view(TAU)
        .agent_color(vec![0.5])
        .patch_size(8)
        .mcmc_iterations(2)
        .item_types(vec![food_item()])
        .collision_policy(CollisionPolicy::NoCollisions)
        .seed(5)
        .build()
        .unwrap()
}

fn start_server() -> Server {
    let config = ServerConfig {
        addr: "127.0.0.1:0".to_string(),
        worker_count: 2,
        connection_queue_capacity: 16,
    };
    Server::start(config, base_sim_config()).expect("server starts")
}

fn wait_for<F: Fn() -> bool>(cond: F, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn connect_performs_the_handshake_and_exposes_a_client_id() {
    let server = start_server();
    let addr = server.local_addr().to_string();

    let client = Client::connect(addr, Callbacks::new()).expect("client connects");
    assert_ne!(client.client_id().0, gw_proto::NEW_CLIENT_REQUEST);
    assert_eq!(client.config().seed, base_sim_config().seed);

    server.stop();
}

#[test]
fn add_agent_reply_is_routed_to_the_on_add_agent_callback() {
    let server = start_server();
    let addr = server.local_addr().to_string();

    let got_code = Arc::new(AtomicBool::new(false));
    let got_code2 = got_code.clone();
    let callbacks = Callbacks::new().on_add_agent(move |code, agent_id| {
        if code == ResponseCode::Success && agent_id.is_some() {
            got_code2.store(true, Ordering::Release);
        }
    });

    let client = Client::connect(addr, callbacks).expect("client connects");
    client.add_agent(Position { x: 0, y: 0 }, Direction::Up).expect("request sent");

    assert!(wait_for(|| got_code.load(Ordering::Acquire), Duration::from_secs(2)));
    server.stop();
}

#[test]
fn step_broadcast_reaches_the_on_step_callback_after_the_lone_agent_acts() {
    let server = start_server();
    let addr = server.local_addr().to_string();

    let ticks_seen = Arc::new(AtomicU64::new(0));
    let ticks_seen2 = ticks_seen.clone();
    let added_agent = Arc::new(std::sync::Mutex::new(None));
    let added_agent2 = added_agent.clone();

    let callbacks = Callbacks::new()
        .on_add_agent(move |code, id| {
            if code == ResponseCode::Success {
                *added_agent2.lock().unwrap() = id;
            }
        })
        .on_step(move |_tick, _agents| {
            ticks_seen2.fetch_add(1, Ordering::Release);
        });

    let client = Client::connect(addr, callbacks).expect("client connects");
    client.add_agent(Position { x: 0, y: 0 }, Direction::Up).expect("request sent");
    assert!(wait_for(|| added_agent.lock().unwrap().is_some(), Duration::from_secs(2)));

    let agent_id = added_agent.lock().unwrap().unwrap();
    client.do_nothing(agent_id).expect("request sent");

    assert!(wait_for(|| ticks_seen.load(Ordering::Acquire) > 0, Duration::from_secs(2)));
    server.stop();
}
