//! Per-connection session state (§4.8 "Client record").

use std::collections::HashSet;
use std::net::TcpStream;

use gw_core::{AgentId, ClientId};

use crate::permissions::Permissions;

/// One connected (or disconnected-but-recoverable) client.
///
/// `stream` is `None` between disconnection and a reconnect — the record
/// itself, and the agent ids it owns, survive the gap (§6 "Client id").
pub struct Session {
    pub client_id: ClientId,
    pub owned_agent_ids: HashSet<AgentId>,
    pub permissions: Permissions,
    pub stream: Option<TcpStream>,
}

impl Session {
    pub fn new(client_id: ClientId, stream: TcpStream) -> Self {
        Self {
            client_id,
            owned_agent_ids: HashSet::new(),
            permissions: Permissions::allow_all(),
            stream: Some(stream),
        }
    }
}
