use std::f64::consts::TAU;
use std::net::TcpStream;

use gw_core::{AgentId, ClientId, Direction, Position};
use gw_item::{IntensityFn, InteractionFn, ItemType};
use gw_proto::{Decode, Encode, MessageKind, ResponseCode, NEW_CLIENT_REQUEST};
use gw_sim::{CollisionPolicy, SimulatorConfig, SimulatorConfigBuilder};

use crate::protocol::{Request, Response};
use crate::server::{Server, ServerConfig};

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
        .seed(11)
        .build()
        .unwrap()
}

fn handshake_new_client(stream: &mut TcpStream) -> (ClientId, SimulatorConfig) {
    NEW_CLIENT_REQUEST.encode(stream).unwrap();
    let code = ResponseCode::decode(stream).unwrap();
    assert_eq!(code, ResponseCode::Success);
    let _time = gw_core::Tick::decode(stream).unwrap();
    let config = SimulatorConfig::decode(stream).unwrap();
    let client_id = ClientId::decode(stream).unwrap();
    (client_id, config)
}

#[test]
fn permissions_allow_all_grants_every_action() {
    let perms = crate::permissions::Permissions::allow_all();
    assert!(perms.add_agent);
    assert!(perms.move_);
    assert!(perms.manage_clients);
}

#[test]
fn request_round_trips_through_the_wire() {
    let mut buf = Vec::new();
    MessageKind::Move.encode(&mut buf).unwrap();
    AgentId(3).encode(&mut buf).unwrap();
    Direction::Up.encode(&mut buf).unwrap();

    let mut cursor = std::io::Cursor::new(buf);
    let decoded = Request::read_from(&mut cursor).unwrap();
    match decoded {
        Request::Move { agent_id, direction } => {
            assert_eq!(agent_id, AgentId(3));
            assert_eq!(direction, Direction::Up);
        }
        other => panic!("expected Move, got {other:?}"),
    }
}

#[test]
fn response_round_trips_code_and_payload() {
    let response = Response::AgentId {
        code: ResponseCode::Success,
        agent_id: Some(AgentId(9)),
    };
    let mut buf = Vec::new();
    response.write_to(MessageKind::AddAgent, &mut buf).unwrap();

    let mut cursor = std::io::Cursor::new(buf);
    let kind = MessageKind::decode(&mut cursor).unwrap();
    let code = ResponseCode::decode(&mut cursor).unwrap();
    let agent_id = AgentId::decode(&mut cursor).unwrap();
    assert_eq!(kind, MessageKind::AddAgent);
    assert_eq!(code, ResponseCode::Success);
    assert_eq!(agent_id, AgentId(9));
}

#[test]
fn new_client_handshake_assigns_a_nonzero_id_and_echoes_config() {
    let config = ServerConfig {
        addr: "127.0.0.1:0".to_string(),
        worker_count: 2,
        connection_queue_capacity: 16,
    };
    let server = Server::start(config, base_sim_config()).expect("server starts");
    let addr = local_addr_of(&server);

    let mut stream = TcpStream::connect(addr).expect("connect");
    let (client_id, echoed_config) = handshake_new_client(&mut stream);
    assert_ne!(client_id.0, NEW_CLIENT_REQUEST);
    assert_eq!(echoed_config.seed, base_sim_config().seed);

    server.stop();
}

#[test]
fn add_agent_request_returns_a_fresh_agent_id() {
    let config = ServerConfig {
        addr: "127.0.0.1:0".to_string(),
        worker_count: 2,
        connection_queue_capacity: 16,
    };
    let server = Server::start(config, base_sim_config()).expect("server starts");
    let addr = local_addr_of(&server);

    let mut stream = TcpStream::connect(addr).expect("connect");
    handshake_new_client(&mut stream);

    MessageKind::AddAgent.encode(&mut stream).unwrap();
    Position { x: 0, y: 0 }.encode(&mut stream).unwrap();
    Direction::Up.encode(&mut stream).unwrap();

    let kind = MessageKind::decode(&mut stream).unwrap();
    let code = ResponseCode::decode(&mut stream).unwrap();
    assert_eq!(kind, MessageKind::AddAgent);
    assert_eq!(code, ResponseCode::Success);
    let agent_id = AgentId::decode(&mut stream).unwrap();
    assert_ne!(agent_id, AgentId::INVALID);

    server.stop();
}

fn local_addr_of(server: &Server) -> std::net::SocketAddr {
    server.local_addr()
}
