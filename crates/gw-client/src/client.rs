//! The connected client: handshake, request senders, background listener
//! thread with automatic reconnection (§4.9).

use std::io;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use gw_core::{AgentId, ClientId, Direction, Position};
use gw_proto::{Decode, Encode, MessageKind, NEW_CLIENT_REQUEST};
use gw_sim::SimulatorConfig;
use tracing::{info, warn};

use crate::callbacks::Callbacks;
use crate::error::{ClientError, ClientResult};
use crate::protocol::ServerMessage;

const RECONNECT_BACKOFF: Duration = Duration::from_millis(200);

/// A live connection to a `gw-server` instance.
///
/// Sending a request (`add_agent`, `move_to`, ...) only writes the frame;
/// the matching reply arrives later on the background listener thread and
/// is routed to the caller's [`Callbacks`]. There is no per-call future.
pub struct Client {
    addr: String,
    write: Mutex<TcpStream>,
    client_id: ClientId,
    config: SimulatorConfig,
    connected: Arc<AtomicBool>,
    _listener: thread::JoinHandle<()>,
}

impl Client {
    /// Connect as a brand new client.
    pub fn connect(addr: impl Into<String>, callbacks: Callbacks) -> ClientResult<Self> {
        Self::connect_as(addr, None, callbacks)
    }

    /// Connect (or reconnect) claiming a specific client id, recovering
    /// that id's owned agent states from the handshake reply.
    pub fn connect_with_id(addr: impl Into<String>, client_id: ClientId, callbacks: Callbacks) -> ClientResult<Self> {
        Self::connect_as(addr, Some(client_id), callbacks)
    }

    fn connect_as(addr: impl Into<String>, requested: Option<ClientId>, callbacks: Callbacks) -> ClientResult<Self> {
        let addr = addr.into();
        let mut stream = TcpStream::connect(&addr)?;
        let (client_id, config, recovered) = do_handshake(&mut stream, requested)?;
        info!(?client_id, %addr, "connected");

        let connected = Arc::new(AtomicBool::new(true));
        let read_stream = stream.try_clone()?;
        let callbacks = Arc::new(callbacks);
        if !recovered.is_empty() {
            callbacks.dispatch(ServerMessage::GetAgentStates {
                code: gw_proto::ResponseCode::Success,
                states: recovered,
            });
        }
        let listener = spawn_listener(addr.clone(), read_stream, client_id, connected.clone(), callbacks);

        Ok(Self {
            addr,
            write: Mutex::new(stream),
            client_id,
            config,
            connected,
            _listener: listener,
        })
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn add_agent(&self, position: Position, facing: Direction) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::AddAgent.encode(w)?;
            position.encode(w)?;
            facing.encode(w)
        })
    }

    pub fn move_agent(&self, agent_id: AgentId, direction: Direction) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::Move.encode(w)?;
            agent_id.encode(w)?;
            direction.encode(w)
        })
    }

    pub fn turn_agent(&self, agent_id: AgentId, direction: Direction) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::Turn.encode(w)?;
            agent_id.encode(w)?;
            direction.encode(w)
        })
    }

    pub fn do_nothing(&self, agent_id: AgentId) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::DoNothing.encode(w)?;
            agent_id.encode(w)
        })
    }

    pub fn get_map(&self, center: Position, radius: i64) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::GetMap.encode(w)?;
            center.encode(w)?;
            radius.encode(w)
        })
    }

    pub fn get_agent_ids(&self) -> ClientResult<()> {
        self.send(|w| MessageKind::GetAgentIds.encode(w))
    }

    pub fn get_agent_states(&self, agent_ids: &[AgentId]) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::GetAgentStates.encode(w)?;
            agent_ids.to_vec().encode(w)
        })
    }

    pub fn set_active(&self, agent_id: AgentId, active: bool) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::SetActive.encode(w)?;
            agent_id.encode(w)?;
            active.encode(w)
        })
    }

    pub fn is_active(&self, agent_id: AgentId) -> ClientResult<()> {
        self.send(|w| {
            MessageKind::IsActive.encode(w)?;
            agent_id.encode(w)
        })
    }

    fn send(&self, write_frame: impl FnOnce(&mut TcpStream) -> io::Result<()>) -> ClientResult<()> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        let mut stream = self.write.lock().unwrap();
        write_frame(&mut stream)?;
        Ok(())
    }
}

/// `u64` request, `{u8 code, u64 time, config, new_client_id | (agent_count, (id, state)*)}` reply (§6 "Handshake").
fn do_handshake(
    stream: &mut TcpStream,
    requested: Option<ClientId>,
) -> ClientResult<(ClientId, SimulatorConfig, Vec<gw_agent::AgentState>)> {
    let requested_value = requested.map(|c| c.0).unwrap_or(NEW_CLIENT_REQUEST);
    requested_value.encode(stream)?;

    let code = gw_proto::ResponseCode::decode(stream)?;
    if code != gw_proto::ResponseCode::Success {
        return Err(ClientError::Protocol(format!("handshake failed with code {code:?}")));
    }
    let _time = gw_core::Tick::decode(stream)?;
    let config = SimulatorConfig::decode(stream)?;

    let (client_id, recovered) = match requested {
        None => (ClientId::decode(stream)?, Vec::new()),
        Some(id) => {
            let count = u32::decode(stream)?;
            let mut states = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let _echoed_id = AgentId::decode(stream)?;
                states.push(gw_agent::AgentState::decode(stream)?);
            }
            (id, states)
        }
    };
    Ok((client_id, config, recovered))
}

fn spawn_listener(
    addr: String,
    mut read_stream: TcpStream,
    client_id: ClientId,
    connected: Arc<AtomicBool>,
    callbacks: Arc<Callbacks>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match MessageKind::decode(&mut read_stream).and_then(|kind| ServerMessage::read_from(kind, &mut read_stream)) {
            Ok(msg) => callbacks.dispatch(msg),
            Err(e) => {
                warn!(?client_id, error = %e, "connection lost");
                connected.store(false, Ordering::Release);
                callbacks.lost_connection();
                let (new_stream, recovered) = reconnect_loop(&addr, client_id);
                read_stream = new_stream;
                connected.store(true, Ordering::Release);
                info!(?client_id, recovered_agents = recovered.len(), "reconnected");
                if !recovered.is_empty() {
                    callbacks.dispatch(ServerMessage::GetAgentStates {
                        code: gw_proto::ResponseCode::Success,
                        states: recovered,
                    });
                }
            }
        }
    })
}

/// Retries the handshake with the original client id until it succeeds.
/// No bounded retry count: outage duration is open-ended, and a
/// client-side timeout here would just convert a recoverable stall into
/// silent data loss.
fn reconnect_loop(addr: &str, client_id: ClientId) -> (TcpStream, Vec<gw_agent::AgentState>) {
    loop {
        thread::sleep(RECONNECT_BACKOFF);
        let Ok(mut stream) = TcpStream::connect(addr) else {
            continue;
        };
        if let Ok((_id, _config, recovered)) = do_handshake(&mut stream, Some(client_id)) {
            return (stream, recovered);
        }
    }
}
