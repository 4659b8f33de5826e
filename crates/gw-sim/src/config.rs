//! `SimulatorConfig` and its builder (§6).

use gw_core::Direction;
use gw_item::ItemType;

use crate::error::{SimError, SimResult};

/// Whether a particular movement direction or rotation is allowed for
/// agents, and if so, whether a denied attempt still counts as the
/// agent's action for the tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Permission {
    /// The action is rejected with `PERMISSION_ERROR`.
    Disallowed,
    /// The action is accepted and applied normally.
    Allowed,
    /// The action is accepted as the agent's move for the tick but has no
    /// effect on position/facing — used to let an agent "pass" in a
    /// direction without granting it real movement.
    Ignored,
}

/// How simultaneous movers contending for the same destination cell are
/// resolved during a tick (§4.6 step 3).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CollisionPolicy {
    /// Earliest successful `request_action` call (by action-lock order)
    /// wins; later contenders are denied.
    FirstComeFirstServed,
    /// Tied contenders are shuffled by the simulator's `SimRng` before
    /// picking a winner.
    Random,
    /// Every colliding mover is denied; no cell is ever shared mid-tick.
    NoCollisions,
}

/// Immutable per-simulator configuration (§6).
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    pub max_steps_per_movement: u32,
    pub scent_dimension: usize,
    pub color_dimension: usize,
    pub vision_range: i64,
    pub allowed_movement_directions: [Permission; 4],
    pub allowed_rotations: [Permission; 4],
    pub no_op_allowed: bool,
    pub patch_size: i64,
    pub mcmc_iterations: u32,
    pub item_types: Vec<ItemType>,
    pub agent_color: Vec<f64>,
    pub agent_field_of_view: f64,
    pub collision_policy: CollisionPolicy,
    pub decay_param: f64,
    pub diffusion_param: f64,
    pub deleted_item_lifetime: u64,
    pub seed: u32,
    /// Every `save_frequency` ticks, if `save_directory` is set, a
    /// snapshot is written (§4.6 step 8). Zero disables periodic saves.
    pub save_frequency: u64,
    pub save_directory: Option<std::path::PathBuf>,
}

impl SimulatorConfig {
    fn validate(&self) -> SimResult<()> {
        if self.max_steps_per_movement == 0 {
            return Err(SimError::Config("max_steps_per_movement must be positive".into()));
        }
        if self.patch_size <= 0 {
            return Err(SimError::Config("patch_size must be positive".into()));
        }
        if self.mcmc_iterations == 0 {
            return Err(SimError::Config("mcmc_iterations must be positive".into()));
        }
        if self.item_types.is_empty() {
            return Err(SimError::Config("at least one item type is required".into()));
        }
        if self.agent_color.len() != self.color_dimension {
            return Err(SimError::Config(format!(
                "agent_color length {} does not match color_dimension {}",
                self.agent_color.len(),
                self.color_dimension
            )));
        }
        for ty in &self.item_types {
            if ty.color.len() != self.color_dimension {
                return Err(SimError::Config(format!(
                    "item type {:?} color length {} does not match color_dimension {}",
                    ty.name,
                    ty.color.len(),
                    self.color_dimension
                )));
            }
            if ty.scent.len() != self.scent_dimension {
                return Err(SimError::Config(format!(
                    "item type {:?} scent length {} does not match scent_dimension {}",
                    ty.name,
                    ty.scent.len(),
                    self.scent_dimension
                )));
            }
            ty.validate(self.item_types.len())
                .map_err(|e| SimError::Config(format!("item type {:?}: {e}", ty.name)))?;
        }
        Ok(())
    }
}

/// Fluent builder for [`SimulatorConfig`], validating everything only
/// once on `build`.
pub struct SimulatorConfigBuilder {
    max_steps_per_movement: u32,
    scent_dimension: usize,
    color_dimension: usize,
    vision_range: i64,
    allowed_movement_directions: [Permission; 4],
    allowed_rotations: [Permission; 4],
    no_op_allowed: bool,
    patch_size: i64,
    mcmc_iterations: u32,
    item_types: Vec<ItemType>,
    agent_color: Vec<f64>,
    agent_field_of_view: f64,
    collision_policy: CollisionPolicy,
    decay_param: f64,
    diffusion_param: f64,
    deleted_item_lifetime: u64,
    seed: u32,
    save_frequency: u64,
    save_directory: Option<std::path::PathBuf>,
}

impl Default for SimulatorConfigBuilder {
    fn default() -> Self {
        Self {
            max_steps_per_movement: 1,
            scent_dimension: 0,
            color_dimension: 0,
            vision_range: 0,
            allowed_movement_directions: [Permission::Allowed; 4],
            allowed_rotations: [Permission::Allowed; 4],
            no_op_allowed: true,
            patch_size: 32,
            mcmc_iterations: 10,
            item_types: Vec::new(),
            agent_color: Vec::new(),
            agent_field_of_view: std::f64::consts::TAU,
            collision_policy: CollisionPolicy::NoCollisions,
            decay_param: 0.0,
            diffusion_param: 0.0,
            deleted_item_lifetime: 0,
            seed: 0,
            save_frequency: 0,
            save_directory: None,
        }
    }
}

impl SimulatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_steps_per_movement(mut self, v: u32) -> Self {
        self.max_steps_per_movement = v;
        self
    }

    pub fn scent_dimension(mut self, v: usize) -> Self {
        self.scent_dimension = v;
        self
    }

    pub fn color_dimension(mut self, v: usize) -> Self {
        self.color_dimension = v;
        self
    }

    pub fn vision_range(mut self, v: i64) -> Self {
        self.vision_range = v;
        self
    }

    pub fn allowed_movement_directions(mut self, v: [Permission; 4]) -> Self {
        self.allowed_movement_directions = v;
        self
    }

    pub fn allowed_rotations(mut self, v: [Permission; 4]) -> Self {
        self.allowed_rotations = v;
        self
    }

    pub fn no_op_allowed(mut self, v: bool) -> Self {
        self.no_op_allowed = v;
        self
    }

    pub fn patch_size(mut self, v: i64) -> Self {
        self.patch_size = v;
        self
    }

    pub fn mcmc_iterations(mut self, v: u32) -> Self {
        self.mcmc_iterations = v;
        self
    }

    pub fn item_types(mut self, v: Vec<ItemType>) -> Self {
        self.item_types = v;
        self
    }

    pub fn agent_color(mut self, v: Vec<f64>) -> Self {
        self.agent_color = v;
        self
    }

    pub fn agent_field_of_view(mut self, v: f64) -> Self {
        self.agent_field_of_view = v;
        self
    }

    pub fn collision_policy(mut self, v: CollisionPolicy) -> Self {
        self.collision_policy = v;
        self
    }

    pub fn decay_param(mut self, v: f64) -> Self {
        self.decay_param = v;
        self
    }

    pub fn diffusion_param(mut self, v: f64) -> Self {
        self.diffusion_param = v;
        self
    }

    pub fn deleted_item_lifetime(mut self, v: u64) -> Self {
        self.deleted_item_lifetime = v;
        self
    }

    pub fn seed(mut self, v: u32) -> Self {
        self.seed = v;
        self
    }

    pub fn save_frequency(mut self, v: u64) -> Self {
        self.save_frequency = v;
        self
    }

    pub fn save_directory(mut self, v: impl Into<std::path::PathBuf>) -> Self {
        self.save_directory = Some(v.into());
        self
    }

    pub fn build(self) -> SimResult<SimulatorConfig> {
        let config = SimulatorConfig {
            max_steps_per_movement: self.max_steps_per_movement,
            scent_dimension: self.scent_dimension,
            color_dimension: self.color_dimension,
            vision_range: self.vision_range,
            allowed_movement_directions: self.allowed_movement_directions,
            allowed_rotations: self.allowed_rotations,
            no_op_allowed: self.no_op_allowed,
            patch_size: self.patch_size,
            mcmc_iterations: self.mcmc_iterations,
            item_types: self.item_types,
            agent_color: self.agent_color,
            agent_field_of_view: self.agent_field_of_view,
            collision_policy: self.collision_policy,
            decay_param: self.decay_param,
            diffusion_param: self.diffusion_param,
            deleted_item_lifetime: self.deleted_item_lifetime,
            seed: self.seed,
            save_frequency: self.save_frequency,
            save_directory: self.save_directory,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Permission for movement in `dir`, indexed by `Direction::index()`.
pub fn movement_permission(config: &SimulatorConfig, dir: Direction) -> Permission {
    config.allowed_movement_directions[dir.index()]
}

/// Permission for rotating to face `dir`, indexed by `Direction::index()`.
pub fn rotation_permission(config: &SimulatorConfig, dir: Direction) -> Permission {
    config.allowed_rotations[dir.index()]
}
