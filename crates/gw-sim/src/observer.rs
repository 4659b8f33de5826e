//! Step callback trait (§4.6 step 7, §9 "cooperative single-threaded
//! callback on step").

use gw_agent::AgentState;
use gw_core::Tick;

/// Callback invoked by [`crate::Simulator::step`] once a tick has fully
/// committed.
///
/// Runs synchronously on whichever thread executed the tick. Implementors
/// must not call back into the simulator's action API from inside these
/// methods — reentrancy here is a design error, not a recoverable case
/// (§9 Open Questions).
pub trait StepObserver {
    /// Called once per tick with every agent's freshly updated state, in
    /// ascending `AgentId` order.
    fn on_step(&mut self, _tick: Tick, _agents: &[AgentState]) {}

    /// Called whenever a periodic snapshot is written (§4.6 step 8).
    fn on_snapshot(&mut self, _tick: Tick, _path: &std::path::Path) {}
}

/// A [`StepObserver`] that does nothing.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
