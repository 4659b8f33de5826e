//! The `Simulator` core and its tick loop (§4.6).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use gw_agent::{Action, AgentState, AgentTable};
use gw_core::{AgentId, Direction, Position, SimRng, Tick};
use gw_item::ItemInstance;
use gw_map::{MapConfig, PatchMap};
use gw_proto::ResponseCode;
use gw_scent::ScentParams;
use gw_vision::VisionParams;

use crate::config::{movement_permission, rotation_permission, CollisionPolicy, Permission, SimulatorConfig};
use crate::error::{SimError, SimResult};
use crate::observer::StepObserver;
use crate::snapshot::Snapshot;

/// State guarded by the simulator's single tick lock: the clock and the
/// sole source of randomness (§5 "Shared resources").
struct TickState {
    time: Tick,
    rng: SimRng,
}

/// The simulator core: owns the map, the agent table, and the tick clock.
///
/// Generic over the observer implementation rather than boxing it as a
/// trait object — the step callback is a compile-time known type, so the
/// common case (a single observer, e.g. `gw-server`'s broadcaster) pays no
/// dynamic dispatch cost.
pub struct Simulator<O: StepObserver> {
    config: SimulatorConfig,
    map: PatchMap,
    agents: AgentTable,
    tick_state: Mutex<TickState>,
    observer: Mutex<O>,
}

impl<O: StepObserver> Simulator<O> {
    pub fn new(config: SimulatorConfig, observer: O) -> SimResult<Self> {
        let map = PatchMap::new(MapConfig {
            patch_size: config.patch_size,
            mcmc_iterations: config.mcmc_iterations,
            item_types: config.item_types.clone(),
        })?;
        let seed = config.seed;
        Ok(Self {
            config,
            map,
            agents: AgentTable::new(),
            tick_state: Mutex::new(TickState {
                time: Tick::ZERO,
                rng: SimRng::new(seed),
            }),
            observer: Mutex::new(observer),
        })
    }

    /// Rebuild a simulator from a snapshot (§6, §8 snapshot round-trip law).
    pub fn from_snapshot(config: SimulatorConfig, snapshot: Snapshot, observer: O) -> SimResult<Self> {
        let map = PatchMap::from_patches(
            MapConfig {
                patch_size: snapshot.patch_size,
                mcmc_iterations: snapshot.mcmc_iterations,
                item_types: config.item_types.clone(),
            },
            snapshot.patches,
        )?;
        Ok(Self {
            config,
            map,
            agents: AgentTable::from_states(snapshot.agents),
            tick_state: Mutex::new(TickState {
                time: snapshot.time,
                rng: snapshot.rng(),
            }),
            observer: Mutex::new(observer),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn current_time(&self) -> Tick {
        self.tick_state.lock().unwrap().time
    }

    /// The already-fixed patches covering `world_pos`'s 2x2 core block, if
    /// any have been materialized yet. Read-only: unlike `request_action`'s
    /// internal path, serving a map query never triggers the fix
    /// neighborhood protocol, so an unexplored area simply comes back empty.
    pub fn get_map_neighborhood(&self, world_pos: Position) -> Vec<gw_map::Patch> {
        self.map.get_neighborhood(world_pos)
    }

    /// Add a new agent and render its initial vision/scent in place.
    pub fn add_agent(&self, position: Position, facing: Direction) -> SimResult<AgentId> {
        let id = self.agents.add_agent(position, facing, self.config.item_types.len());
        let mut state = self.tick_state.lock().unwrap();
        self.refresh_perception(id, &mut state.rng, state.time)?;
        Ok(id)
    }

    pub fn agent_state(&self, id: AgentId) -> SimResult<AgentState> {
        Ok(self.agents.snapshot(id)?)
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.ids_ascending()
    }

    pub fn set_active(&self, id: AgentId, active: bool) -> SimResult<()> {
        Ok(self.agents.set_active(id, active)?)
    }

    pub fn is_active(&self, id: AgentId) -> SimResult<bool> {
        Ok(self.agents.is_active(id)?)
    }

    /// Queue `action` for `id`; if every active agent now has a pending
    /// action, perform the tick on this thread before returning (§4.6,
    /// §5 "the thread that submits the last pending action... is the one
    /// that performs the tick").
    pub fn request_action(&self, id: AgentId, action: Action) -> SimResult<ResponseCode> {
        if let Err(e) = self.check_permission(action) {
            return Ok(e);
        }

        if let Err(err) = self.agents.request_action(id, action) {
            return Ok(match err {
                gw_agent::AgentError::UnknownAgent(_) => ResponseCode::InvalidAgentId,
                gw_agent::AgentError::AlreadyActed(_) => ResponseCode::AgentAlreadyActed,
            });
        }

        self.maybe_tick()?;
        Ok(ResponseCode::Success)
    }

    fn check_permission(&self, action: Action) -> Result<(), ResponseCode> {
        match action {
            Action::Move(dir) => match movement_permission(&self.config, dir) {
                Permission::Disallowed => Err(ResponseCode::PermissionError),
                Permission::Allowed | Permission::Ignored => Ok(()),
            },
            Action::Turn(dir) => match rotation_permission(&self.config, dir) {
                Permission::Disallowed => Err(ResponseCode::PermissionError),
                Permission::Allowed | Permission::Ignored => Ok(()),
            },
            Action::DoNothing => {
                if self.config.no_op_allowed {
                    Ok(())
                } else {
                    Err(ResponseCode::PermissionError)
                }
            }
        }
    }

    fn maybe_tick(&self) -> SimResult<()> {
        if !self.agents.all_active_requested() {
            return Ok(());
        }
        let mut state = self.tick_state.lock().unwrap();
        // Re-check: another thread may have already performed this tick
        // while we were waiting for the lock.
        if !self.agents.all_active_requested() {
            return Ok(());
        }
        self.process_tick(&mut state)
    }

    /// The full tick procedure (§4.6 steps 1-9).
    fn process_tick(&self, state: &mut TickState) -> SimResult<()> {
        let pending = self.agents.collect_pending_actions();

        let mut movers: Vec<Mover> = Vec::new();
        let mut turns: Vec<(AgentId, Direction)> = Vec::new();
        for &(id, action, request_seq) in &pending {
            match action {
                Action::Move(dir) => {
                    let current = self.agents.snapshot(id)?.position;
                    let path = self.plan_path(current, dir, &mut state.rng, state.time);
                    movers.push(Mover {
                        id,
                        dir,
                        request_seq,
                        current,
                        target: path.last().copied().unwrap_or(current),
                        path,
                        allowed: false,
                    });
                }
                Action::Turn(dir) => turns.push((id, dir)),
                Action::DoNothing => {}
            }
        }

        let resolved = self.resolve_collisions(movers, &mut state.rng);

        // ── Apply movement, turning, and item collection ──────────────────
        for (id, dir) in &turns {
            let handle = self.agents_handle(*id)?;
            let mut guard = handle.lock().unwrap();
            guard.facing = *dir;
        }

        for mv in &resolved {
            let handle = self.agents_handle(mv.id)?;
            let mut guard = handle.lock().unwrap();
            guard.facing = mv.dir;
            if mv.allowed {
                guard.position = mv.target;
                for &cell in mv.path.iter() {
                    self.collect_at(&mut guard, cell, state.time)?;
                    if cell == mv.target {
                        break;
                    }
                }
            }
        }

        state.time = state.time.next();

        // ── Recompute vision/scent for every active agent ──────────────────
        self.refresh_all_perception(&mut state.rng, state.time)?;

        let snapshot = self.agents.all_snapshots_ascending();
        self.observer.lock().unwrap().on_step(state.time, &snapshot);

        if self.config.save_frequency > 0
            && self.config.save_directory.is_some()
            && state.time.0 % self.config.save_frequency == 0
        {
            self.write_periodic_snapshot(state)?;
        }

        self.agents.reset_all_for_next_tick();
        Ok(())
    }

    fn agents_handle(&self, id: AgentId) -> SimResult<Arc<Mutex<AgentState>>> {
        Ok(self.agents.handle(id)?)
    }

    /// Mark the item at `cell` (if any, live at `t`, and collectible)
    /// deleted as of `t.next()` and credit the agent (§4.6 step 4).
    fn collect_at(&self, agent: &mut AgentState, cell: Position, t: Tick) -> SimResult<()> {
        let live: Vec<ItemInstance> = self
            .map
            .item_history_at(cell)
            .into_iter()
            .filter(|i| i.is_live_at(t))
            .collect();
        for item in live {
            let Some(ty) = self.config.item_types.get(item.item_type as usize) else {
                continue;
            };
            if !is_collectible(ty, &agent.collected_items) {
                continue;
            }
            self.map.mark_deleted(cell, item.item_type, item.creation_time, t.next());
            agent.collected_items[item.item_type as usize] += 1;
        }
        Ok(())
    }

    /// Tentative path for a single mover: up to `max_steps_per_movement`
    /// cells in `dir`, stopping before the first `blocks_movement` item
    /// (§4.6 step 2).
    fn plan_path(&self, from: Position, dir: Direction, rng: &mut SimRng, t: Tick) -> Vec<Position> {
        let mut path = Vec::with_capacity(self.config.max_steps_per_movement as usize);
        let mut cursor = from;
        for _ in 0..self.config.max_steps_per_movement {
            let next = cursor.step(dir);
            self.map.get_fixed_neighborhood(next, rng);
            let blocked = self
                .map
                .item_history_at(next)
                .into_iter()
                .filter(|i| i.is_live_at(t))
                .any(|i| {
                    self.config
                        .item_types
                        .get(i.item_type as usize)
                        .map(|ty| ty.blocks_movement)
                        .unwrap_or(false)
                });
            if blocked {
                break;
            }
            path.push(next);
            cursor = next;
        }
        path
    }

    /// Resolve simultaneous movement per `collision_policy` (§4.6 step 3).
    fn resolve_collisions(&self, mut movers: Vec<Mover>, rng: &mut SimRng) -> Vec<Mover> {
        match self.config.collision_policy {
            CollisionPolicy::NoCollisions => {
                let mut target_counts: HashMap<Position, u32> = HashMap::new();
                for mv in &movers {
                    if mv.target != mv.current {
                        *target_counts.entry(mv.target).or_insert(0) += 1;
                    }
                }
                // Stationary agents (including non-mover actives) reserve
                // their current cell; a mover targeting an occupied cell
                // collides too. Non-mover occupancy is already implied by
                // nobody else being allowed to target their current cell
                // unless it's also somebody's own starting cell.
                let occupied: HashSet<Position> = self
                    .agents
                    .ids_ascending()
                    .into_iter()
                    .filter_map(|id| self.agents.snapshot(id).ok())
                    .map(|s| s.position)
                    .collect();
                for mv in &mut movers {
                    let contested = mv.target != mv.current
                        && (target_counts.get(&mv.target).copied().unwrap_or(0) > 1
                            || (occupied.contains(&mv.target) && !movers_vacate(&movers, mv.target, mv.id)));
                    mv.allowed = !contested;
                }
                movers
            }
            CollisionPolicy::FirstComeFirstServed => {
                movers.sort_by_key(|m| m.request_seq);
                self.greedy_resolve(movers)
            }
            CollisionPolicy::Random => {
                rng.shuffle(&mut movers);
                self.greedy_resolve(movers)
            }
        }
    }

    /// First-come greedy cell reservation shared by `FirstComeFirstServed`
    /// and `Random` (which only differs in processing order).
    fn greedy_resolve(&self, movers: Vec<Mover>) -> Vec<Mover> {
        let mut claims: HashMap<Position, AgentId> = self
            .agents
            .ids_ascending()
            .into_iter()
            .filter_map(|id| self.agents.snapshot(id).ok().map(|s| (s.position, id)))
            .collect();

        let mut resolved = Vec::with_capacity(movers.len());
        for mut mv in movers {
            if mv.target == mv.current {
                mv.allowed = true;
                resolved.push(mv);
                continue;
            }
            let blocked = claims.get(&mv.target).map(|&owner| owner != mv.id).unwrap_or(false);
            if blocked {
                mv.allowed = false;
            } else {
                mv.allowed = true;
                if claims.get(&mv.current) == Some(&mv.id) {
                    claims.remove(&mv.current);
                }
                claims.insert(mv.target, mv.id);
            }
            resolved.push(mv);
        }
        resolved
    }

    fn refresh_all_perception(&self, rng: &mut SimRng, t: Tick) -> SimResult<()> {
        let ids = self.agents.ids_ascending();

        #[cfg(not(feature = "parallel"))]
        {
            for id in ids {
                self.refresh_perception(id, rng, t)?;
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            // Every patch this tick's agents can see is forced fixed up
            // front (sequentially, since `rng` is a single shared stream);
            // the parallel phase below only reads already-fixed patches, so
            // no further synchronization is needed (§4.6 step 6).
            for &id in &ids {
                if let Ok(state) = self.agents.snapshot(id) {
                    self.map.get_fixed_neighborhood(state.position, rng);
                }
            }
            ids.par_iter().try_for_each(|&id| self.refresh_perception_readonly(id, t))?;
        }
        Ok(())
    }

    fn refresh_perception(&self, id: AgentId, rng: &mut SimRng, t: Tick) -> SimResult<()> {
        let position = self.agents.snapshot(id)?.position;
        self.map.get_fixed_neighborhood(position, rng);
        self.refresh_perception_readonly(id, t)
    }

    /// Render vision/scent assuming every patch the agent can see has
    /// already been fixed — safe to call without `&mut SimRng` (§4.6 step 6
    /// "parallel" note).
    fn refresh_perception_readonly(&self, id: AgentId, t: Tick) -> SimResult<()> {
        let handle = self.agents_handle(id)?;
        let (position, facing) = {
            let guard = handle.lock().unwrap();
            (guard.position, guard.facing)
        };

        let vision = gw_vision::render::render(
            &self.map,
            &self.config.item_types,
            position,
            facing,
            &self.config.agent_color,
            VisionParams {
                range: self.config.vision_range,
                dimension: self.config.color_dimension,
                field_of_view: self.config.agent_field_of_view,
            },
            t,
        );
        let scent = gw_scent::engine::compute(
            &self.map,
            &self.config.item_types,
            position,
            t,
            ScentParams {
                dimension: self.config.scent_dimension,
                decay: self.config.decay_param,
                diffusion: self.config.diffusion_param,
                deleted_item_lifetime: self.config.deleted_item_lifetime,
            },
        );

        let mut guard = handle.lock().unwrap();
        guard.vision = vision;
        guard.scent = scent;
        Ok(())
    }

    /// Write a snapshot to `{save_directory}/tick_{n}.snapshot` (§4.6 step 8).
    fn write_periodic_snapshot(&self, state: &mut TickState) -> SimResult<()> {
        let dir = self.config.save_directory.as_ref().expect("checked by caller");
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("tick_{}.snapshot", state.time.0));
        let snapshot = self.to_snapshot(state);
        let mut file = std::fs::File::create(&path)?;
        snapshot.write_to(&mut file)?;
        self.observer.lock().unwrap().on_snapshot(state.time, &path);
        Ok(())
    }

    /// Build an in-memory [`Snapshot`] of the simulator's full current state.
    pub fn snapshot(&self) -> Snapshot {
        let mut state = self.tick_state.lock().unwrap();
        self.to_snapshot(&mut state)
    }

    fn to_snapshot(&self, state: &mut TickState) -> Snapshot {
        Snapshot {
            rng_state: state.rng.snapshot(),
            patch_size: self.config.patch_size,
            mcmc_iterations: self.config.mcmc_iterations,
            seed: self.config.seed,
            patches: self.map.all_patches(),
            time: state.time,
            agents: self.agents.all_snapshots_ascending(),
        }
    }

    /// Write a full snapshot to `w` (§6).
    pub fn save_to<W: std::io::Write>(&self, w: &mut W) -> SimResult<()> {
        self.snapshot().write_to(w)?;
        Ok(())
    }

    /// Load a full snapshot from `r`, building a ready-to-run simulator.
    pub fn load_from<R: std::io::Read>(config: SimulatorConfig, r: &mut R, observer: O) -> SimResult<Self> {
        let snapshot = Snapshot::read_from(r)?;
        Self::from_snapshot(config, snapshot, observer)
    }
}

/// `true` if some other mover in `movers` is leaving `pos` this tick (so a
/// collision at `pos` with a stationary occupant doesn't actually apply).
fn movers_vacate(movers: &[Mover], pos: Position, exclude: AgentId) -> bool {
    movers.iter().any(|m| m.id != exclude && m.current == pos && m.target != pos)
}

/// `true` if `agent_collected` satisfies every requirement in `ty`'s
/// requirement row — the collection gate (§4.6 step 4).
///
/// `required_item_costs` is part of the wire-compatible data model (§3) but
/// is not applied here: this engine does not model a reward/energy ledger
/// (an explicit Non-goal), and `collected_items` must stay monotone
/// non-decreasing (§8), which a cost deduction against it would violate.
fn is_collectible(ty: &gw_item::ItemType, agent_collected: &[u64]) -> bool {
    ty.required_item_counts
        .iter()
        .enumerate()
        .all(|(j, &required)| agent_collected.get(j).copied().unwrap_or(0) >= required as u64)
}

struct Mover {
    id: AgentId,
    dir: Direction,
    request_seq: u64,
    current: Position,
    target: Position,
    path: Vec<Position>,
    allowed: bool,
}
