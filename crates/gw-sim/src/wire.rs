//! `Encode`/`Decode` for the parts of `SimulatorConfig` sent over the wire
//! during the handshake (§6 "Handshake", "serialized config").
//!
//! `save_frequency`/`save_directory` are local-process concerns a remote
//! client has no use for and are deliberately left off the wire; everything
//! a client needs to validate incoming agent/vision/scent shapes against is
//! included.

use std::io::{self, Read, Write};

use gw_proto::{Decode, Encode};

use crate::config::{CollisionPolicy, Permission, SimulatorConfig};

impl Encode for Permission {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let tag: u8 = match self {
            Permission::Disallowed => 0,
            Permission::Allowed => 1,
            Permission::Ignored => 2,
        };
        tag.encode(w)
    }
}

impl Decode for Permission {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match u8::decode(r)? {
            0 => Permission::Disallowed,
            1 => Permission::Allowed,
            2 => Permission::Ignored,
            other => return Err(io::Error::new(io::ErrorKind::InvalidData, format!("bad Permission tag {other}"))),
        })
    }
}

impl Encode for CollisionPolicy {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let tag: u8 = match self {
            CollisionPolicy::FirstComeFirstServed => 0,
            CollisionPolicy::Random => 1,
            CollisionPolicy::NoCollisions => 2,
        };
        tag.encode(w)
    }
}

impl Decode for CollisionPolicy {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match u8::decode(r)? {
            0 => CollisionPolicy::FirstComeFirstServed,
            1 => CollisionPolicy::Random,
            2 => CollisionPolicy::NoCollisions,
            other => {
                return Err(io::Error::new(io::ErrorKind::InvalidData, format!("bad CollisionPolicy tag {other}")))
            }
        })
    }
}

fn encode_permission_array<W: Write>(arr: &[Permission; 4], w: &mut W) -> io::Result<()> {
    for p in arr {
        p.encode(w)?;
    }
    Ok(())
}

fn decode_permission_array<R: Read>(r: &mut R) -> io::Result<[Permission; 4]> {
    let mut out = [Permission::Allowed; 4];
    for slot in &mut out {
        *slot = Permission::decode(r)?;
    }
    Ok(out)
}

impl Encode for SimulatorConfig {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (self.max_steps_per_movement as u64).encode(w)?;
        (self.scent_dimension as u64).encode(w)?;
        (self.color_dimension as u64).encode(w)?;
        self.vision_range.encode(w)?;
        encode_permission_array(&self.allowed_movement_directions, w)?;
        encode_permission_array(&self.allowed_rotations, w)?;
        self.no_op_allowed.encode(w)?;
        self.patch_size.encode(w)?;
        self.mcmc_iterations.encode(w)?;
        self.item_types.encode(w)?;
        self.agent_color.encode(w)?;
        self.agent_field_of_view.encode(w)?;
        self.collision_policy.encode(w)?;
        self.decay_param.encode(w)?;
        self.diffusion_param.encode(w)?;
        self.deleted_item_lifetime.encode(w)?;
        self.seed.encode(w)
    }
}

impl Decode for SimulatorConfig {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let max_steps_per_movement = u64::decode(r)? as u32;
        let scent_dimension = u64::decode(r)? as usize;
        let color_dimension = u64::decode(r)? as usize;
        let vision_range = i64::decode(r)?;
        let allowed_movement_directions = decode_permission_array(r)?;
        let allowed_rotations = decode_permission_array(r)?;
        let no_op_allowed = bool::decode(r)?;
        let patch_size = i64::decode(r)?;
        let mcmc_iterations = u32::decode(r)?;
        let item_types = Vec::decode(r)?;
        let agent_color = Vec::decode(r)?;
        let agent_field_of_view = f64::decode(r)?;
        let collision_policy = CollisionPolicy::decode(r)?;
        let decay_param = f64::decode(r)?;
        let diffusion_param = f64::decode(r)?;
        let deleted_item_lifetime = u64::decode(r)?;
        let seed = u32::decode(r)?;
        Ok(SimulatorConfig {
            max_steps_per_movement,
            scent_dimension,
            color_dimension,
            vision_range,
            allowed_movement_directions,
            allowed_rotations,
            no_op_allowed,
            patch_size,
            mcmc_iterations,
            item_types,
            agent_color,
            agent_field_of_view,
            collision_policy,
            decay_param,
            diffusion_param,
            deleted_item_lifetime,
            seed,
            save_frequency: 0,
            save_directory: None,
        })
    }
}
