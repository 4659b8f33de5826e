//! TCP listener, worker pool, connection table, step broadcast (§4.8).

use std::collections::HashMap;
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use gw_agent::Action;
use gw_core::ClientId;
use gw_proto::{Decode, Encode, ResponseCode, NEW_CLIENT_REQUEST};
use gw_sim::{Simulator, SimulatorConfig, StepObserver};

use crate::error::{ServerError, ServerResult};
use crate::protocol::{Request, Response};
use crate::session::Session;
use crate::state::{ServerState, StateLatch};

pub struct ServerConfig {
    pub addr: String,
    pub worker_count: usize,
    /// Desired accept backlog. `std::net::TcpListener` has no portable way
    /// to set this, so it is currently advisory only and not applied.
    pub connection_queue_capacity: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:0".to_string(),
            worker_count: 4,
            connection_queue_capacity: 128,
        }
    }
}

type Sessions = Arc<Mutex<HashMap<ClientId, Session>>>;

/// A decoded request plus everything a worker needs to answer it: which
/// connection it came from and where to write the reply. `done` is
/// signalled once the reply has been written, so the owning connection's
/// reader thread (which sent this job and is blocked on `done`) knows it is
/// safe to read the next request — this is what keeps per-connection
/// responses in request order while still spreading work across the pool
/// (§5 "Ordering guarantees").
struct Job {
    client_id: ClientId,
    request: Request,
    reply_to: TcpStream,
    done: Sender<()>,
}

/// Broadcasts each tick's updated agent state to every connected client,
/// filtered to the agents that client owns (§4.8 "On step").
struct Broadcaster {
    sessions: Sessions,
}

impl StepObserver for Broadcaster {
    fn on_step(&mut self, tick: gw_core::Tick, agents: &[gw_agent::AgentState]) {
        let mut sessions = self.sessions.lock().unwrap();
        for session in sessions.values_mut() {
            let Some(stream) = session.stream.as_mut() else {
                continue;
            };
            let mine: Vec<gw_agent::AgentState> =
                agents.iter().filter(|a| session.owned_agent_ids.contains(&a.id)).cloned().collect();
            if mine.is_empty() {
                continue;
            }
            if let Err(e) = crate::protocol::write_step_response(stream, tick, &mine) {
                warn!(client_id = ?session.client_id, error = %e, "step broadcast failed, dropping connection");
                session.stream = None;
            }
        }
    }
}

/// The running server: owns the simulator, the connection table, and every
/// background thread (acceptor + worker pool).
pub struct Server {
    sim: Arc<Simulator<Broadcaster>>,
    sessions: Sessions,
    state: Arc<StateLatch>,
    local_addr: std::net::SocketAddr,
    _acceptor: thread::JoinHandle<()>,
    _workers: Vec<thread::JoinHandle<()>>,
}

impl Server {
    /// Bind the listener and start every background thread. Blocks until
    /// the acceptor reports `Started` or fails to bind (§5 "Server init").
    pub fn start(config: ServerConfig, sim_config: SimulatorConfig) -> ServerResult<Self> {
        let sessions: Sessions = Arc::new(Mutex::new(HashMap::new()));
        let sim = Arc::new(Simulator::new(
            sim_config,
            Broadcaster { sessions: sessions.clone() },
        )?);

        let (job_tx, job_rx): (Sender<Job>, Receiver<Job>) = bounded(config.worker_count * 4);
        let workers = (0..config.worker_count.max(1))
            .map(|idx| spawn_worker(idx, job_rx.clone(), sim.clone(), sessions.clone()))
            .collect();

        let state = Arc::new(StateLatch::new());
        let (acceptor, local_addr) = spawn_acceptor(config, state.clone(), job_tx, sim.clone(), sessions.clone())?;

        match state.wait_until_started() {
            ServerState::Started => Ok(Self {
                sim,
                sessions,
                state,
                local_addr,
                _acceptor: acceptor,
                _workers: workers,
            }),
            _ => Err(ServerError::Io(std::io::Error::new(std::io::ErrorKind::Other, "server failed to start"))),
        }
    }

    pub fn simulator(&self) -> &Simulator<Broadcaster> {
        &self.sim
    }

    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.local_addr
    }

    pub fn connected_client_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Transition to `Stopping`. Background threads observe this on their
    /// next loop iteration; does not forcibly close sockets mid-read.
    pub fn stop(&self) {
        self.state.set(ServerState::Stopping);
    }

    pub fn state(&self) -> ServerState {
        self.state.get()
    }
}

fn spawn_acceptor(
    config: ServerConfig,
    state: Arc<StateLatch>,
    job_tx: Sender<Job>,
    sim: Arc<Simulator<Broadcaster>>,
    sessions: Sessions,
) -> ServerResult<(thread::JoinHandle<()>, std::net::SocketAddr)> {
    let listener = TcpListener::bind(&config.addr)?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "server listening");
    state.set(ServerState::Started);
    let next_client_id = Arc::new(AtomicU64::new(1));

    let handle = thread::spawn(move || {
        for incoming in listener.incoming() {
            if state.get() == ServerState::Stopping {
                break;
            }
            let stream = match incoming {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            let job_tx = job_tx.clone();
            let sim = sim.clone();
            let sessions = sessions.clone();
            let next_client_id = next_client_id.clone();
            thread::spawn(move || {
                if let Err(e) = handle_connection(stream, &job_tx, &sim, &sessions, &next_client_id) {
                    debug!(error = %e, "connection closed");
                }
            });
        }
    });
    Ok((handle, local_addr))
}

/// Per-connection reader loop: handshake once, then forward decoded
/// requests to the worker pool one at a time (§4.8, §5).
fn handle_connection(
    mut stream: TcpStream,
    job_tx: &Sender<Job>,
    sim: &Arc<Simulator<Broadcaster>>,
    sessions: &Sessions,
    next_client_id: &Arc<AtomicU64>,
) -> ServerResult<()> {
    let client_id = do_handshake(&mut stream, sim, sessions, next_client_id)?;
    info!(?client_id, "client connected");

    loop {
        let request = match Request::read_from(&mut stream) {
            Ok(r) => r,
            Err(_) => break,
        };
        let reply_to = stream.try_clone()?;
        let (done_tx, done_rx) = bounded(1);
        if job_tx
            .send(Job {
                client_id,
                request,
                reply_to,
                done: done_tx,
            })
            .is_err()
        {
            break;
        }
        if done_rx.recv().is_err() {
            break;
        }
    }

    if let Some(session) = sessions.lock().unwrap().get_mut(&client_id) {
        session.stream = None;
    }
    info!(?client_id, "client disconnected");
    Ok(())
}

/// `u64` request, `{u8 code, u64 time, config, new_client_id | (agent_count, (id, state)*)}` reply (§6 "Handshake").
fn do_handshake(
    stream: &mut TcpStream,
    sim: &Arc<Simulator<Broadcaster>>,
    sessions: &Sessions,
    next_client_id: &Arc<AtomicU64>,
) -> ServerResult<ClientId> {
    let requested = ClientId::decode(stream)?;

    let (client_id, owned_states) = if requested.0 == NEW_CLIENT_REQUEST {
        let id = ClientId(next_client_id.fetch_add(1, Ordering::Relaxed));
        sessions.lock().unwrap().insert(id, Session::new(id, stream.try_clone()?));
        (id, None)
    } else {
        let mut guard = sessions.lock().unwrap();
        match guard.get_mut(&requested) {
            Some(session) => {
                session.stream = Some(stream.try_clone()?);
                let states: Vec<gw_agent::AgentState> =
                    session.owned_agent_ids.iter().filter_map(|&id| sim.agent_state(id).ok()).collect();
                (requested, Some(states))
            }
            None => {
                ResponseCode::InvalidAgentId.encode(stream)?;
                return Err(ServerError::UnknownClient(requested));
            }
        }
    };

    ResponseCode::Success.encode(stream)?;
    sim.current_time().encode(stream)?;
    sim.config().encode(stream)?;
    match owned_states {
        None => client_id.encode(stream)?,
        Some(states) => {
            (states.len() as u32).encode(stream)?;
            for state in &states {
                state.id.encode(stream)?;
                state.encode(stream)?;
            }
        }
    }
    Ok(client_id)
}

fn spawn_worker(idx: usize, job_rx: Receiver<Job>, sim: Arc<Simulator<Broadcaster>>, sessions: Sessions) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        debug!(worker = idx, "worker started");
        while let Ok(job) = job_rx.recv() {
            let mut reply_to = job.reply_to;
            let kind = job.request.kind();
            let response = dispatch(&sim, &sessions, job.client_id, job.request);
            if let Err(e) = response.write_to(kind, &mut reply_to) {
                warn!(error = %e, "failed writing response");
            }
            let _ = job.done.send(());
        }
    })
}

fn dispatch(sim: &Arc<Simulator<Broadcaster>>, sessions: &Sessions, client_id: ClientId, request: Request) -> Response {
    match request {
        Request::AddAgent { position, facing } => match sim.add_agent(position, facing) {
            Ok(id) => {
                if let Some(session) = sessions.lock().unwrap().get_mut(&client_id) {
                    session.owned_agent_ids.insert(id);
                }
                Response::AgentId {
                    code: ResponseCode::Success,
                    agent_id: Some(id),
                }
            }
            Err(_) => Response::AgentId {
                code: ResponseCode::Failure,
                agent_id: None,
            },
        },
        Request::Move { agent_id, direction } => action_response(sim, agent_id, Action::Move(direction)),
        Request::Turn { agent_id, direction } => action_response(sim, agent_id, Action::Turn(direction)),
        Request::DoNothing { agent_id } => action_response(sim, agent_id, Action::DoNothing),
        Request::GetMap { center, radius: _ } => {
            // `gw-sim` exposes fixed neighborhoods keyed by a single world
            // position, not an arbitrary radius; the served map is that
            // position's fixed 2x2 block (§4.3).
            Response::Map {
                code: ResponseCode::Success,
                patches: sim.get_map_neighborhood(center),
            }
        }
        Request::GetAgentIds => Response::AgentIds {
            code: ResponseCode::Success,
            agent_ids: sim.agent_ids(),
        },
        Request::GetAgentStates { agent_ids } => {
            let states = agent_ids.iter().filter_map(|&id| sim.agent_state(id).ok()).collect();
            Response::AgentStates {
                code: ResponseCode::Success,
                states,
            }
        }
        Request::SetActive { agent_id, active } => match sim.set_active(agent_id, active) {
            Ok(()) => Response::Empty { code: ResponseCode::Success },
            Err(_) => Response::Empty {
                code: ResponseCode::InvalidAgentId,
            },
        },
        Request::IsActive { agent_id } => match sim.is_active(agent_id) {
            Ok(value) => Response::Flag {
                code: ResponseCode::Success,
                value,
            },
            Err(_) => Response::Flag {
                code: ResponseCode::InvalidAgentId,
                value: false,
            },
        },
    }
}

fn action_response(sim: &Arc<Simulator<Broadcaster>>, agent_id: gw_core::AgentId, action: Action) -> Response {
    match sim.request_action(agent_id, action) {
        Ok(code) => Response::Empty { code },
        Err(gw_sim::SimError::InvalidAgentId(_)) => Response::Empty {
            code: ResponseCode::InvalidAgentId,
        },
        Err(gw_sim::SimError::PermissionError(_)) => Response::Empty {
            code: ResponseCode::PermissionError,
        },
        Err(gw_sim::SimError::OutOfMemory(_)) => Response::Empty {
            code: ResponseCode::OutOfMemory,
        },
        Err(e) => {
            error!(error = %e, "fatal error applying action");
            Response::Empty { code: ResponseCode::Failure }
        }
    }
}
