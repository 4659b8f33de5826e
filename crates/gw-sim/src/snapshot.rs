//! Snapshot file format (§6 "Snapshot file layout").
//!
//! The literal layout named in §6 —
//! `u64 length || PRNG state bytes || u32 n || u32 mcmc_iterations || u32 seed || patch_count || patches…`
//! — captures the map and its generator parameters but says nothing about
//! agents or elapsed time, even though the round-trip law in §8 ("replaying
//! from a snapshot at tick 500 yields the same final state") requires both.
//! This is preserved verbatim as the record's prefix, then extended with
//! `u64 time || agents…` so a reload can resume ticking exactly where the
//! original simulator left off. The extension is additive: a reader that
//! only cares about the map can stop after `patches`.

use std::io::{self, Read, Write};

use gw_agent::AgentState;
use gw_core::{SimRng, Tick};
use gw_map::Patch;
use gw_proto::{Decode, Encode};

/// A full, reloadable simulator snapshot.
pub struct Snapshot {
    pub rng_state: u64,
    pub patch_size: i64,
    pub mcmc_iterations: u32,
    pub seed: u32,
    pub patches: Vec<Patch>,
    pub time: Tick,
    pub agents: Vec<AgentState>,
}

impl Snapshot {
    /// Write the length-prefixed record to `w` (§6).
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut body = Vec::new();
        self.rng_state.encode(&mut body)?;
        (self.patch_size as u32).encode(&mut body)?;
        self.mcmc_iterations.encode(&mut body)?;
        self.seed.encode(&mut body)?;
        self.patches.encode(&mut body)?;
        self.time.encode(&mut body)?;
        self.agents.encode(&mut body)?;

        (body.len() as u64).encode(w)?;
        w.write_all(&body)
    }

    /// Read a length-prefixed record written by [`Snapshot::write_to`].
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = u64::decode(r)?;
        let mut body = vec![0u8; len as usize];
        r.read_exact(&mut body)?;
        let mut cursor = io::Cursor::new(body);

        let rng_state = u64::decode(&mut cursor)?;
        let patch_size = u32::decode(&mut cursor)? as i64;
        let mcmc_iterations = u32::decode(&mut cursor)?;
        let seed = u32::decode(&mut cursor)?;
        let patches = Vec::decode(&mut cursor)?;
        let time = Tick::decode(&mut cursor)?;
        let agents = Vec::decode(&mut cursor)?;

        Ok(Snapshot {
            rng_state,
            patch_size,
            mcmc_iterations,
            seed,
            patches,
            time,
            agents,
        })
    }

    /// Reconstruct the simulator's RNG from this snapshot's recorded state.
    pub fn rng(&self) -> SimRng {
        SimRng::from_snapshot(self.rng_state)
    }
}
