//! The server's lifecycle state machine (§4.8 "States").

use std::sync::{Condvar, Mutex};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ServerState {
    /// Internal: the acceptor thread is still binding the listen socket.
    Starting,
    Started,
    Stopping,
}

/// Shared between the acceptor thread and whoever called `start_server` —
/// the dispatching caller blocks on `wait` until `Started` or `Stopping` is
/// observed (§5 "Server init").
#[derive(Default)]
pub struct StateLatch {
    state: Mutex<Option<ServerState>>,
    cv: Condvar,
}

impl StateLatch {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Some(ServerState::Starting)),
            cv: Condvar::new(),
        }
    }

    pub fn set(&self, state: ServerState) {
        *self.state.lock().unwrap() = Some(state);
        self.cv.notify_all();
    }

    /// Block until the state is no longer `Starting`.
    pub fn wait_until_started(&self) -> ServerState {
        let guard = self.state.lock().unwrap();
        let guard = self
            .cv
            .wait_while(guard, |s| *s == Some(ServerState::Starting))
            .unwrap();
        guard.unwrap()
    }

    pub fn get(&self) -> ServerState {
        self.state.lock().unwrap().unwrap()
    }
}
