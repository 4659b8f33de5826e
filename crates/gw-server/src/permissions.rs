//! Per-connection permission record (§4.8 "Permissions").

/// Which request kinds a connection is allowed to issue.
///
/// Denial returns `PERMISSION_ERROR` without touching simulator state, the
/// same shape as `SimulatorConfig`'s `allowed_movement_directions` gate in
/// `gw-sim`, just applied at the transport boundary instead of the action
/// boundary.
#[derive(Copy, Clone, Debug)]
pub struct Permissions {
    pub add_agent: bool,
    pub move_: bool,
    pub turn: bool,
    pub do_nothing: bool,
    pub get_map: bool,
    pub set_active: bool,
    pub is_active: bool,
    pub get_agent_ids: bool,
    pub get_agent_states: bool,
    pub manage_clients: bool,
}

impl Permissions {
    pub const fn allow_all() -> Self {
        Self {
            add_agent: true,
            move_: true,
            turn: true,
            do_nothing: true,
            get_map: true,
            set_active: true,
            is_active: true,
            get_agent_ids: true,
            get_agent_states: true,
            manage_clients: true,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::allow_all()
    }
}
