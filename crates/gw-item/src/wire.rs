//! `Encode`/`Decode` impls for item catalogue types (§4.7).

use std::io::{self, Read, Write};

use gw_core::{Position, Tick};
use gw_proto::{Decode, Encode};

use crate::{IntensityFn, InteractionFn, ItemInstance, ItemType};

impl Encode for IntensityFn {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            IntensityFn::Constant(v) => {
                0u8.encode(w)?;
                v.encode(w)
            }
        }
    }
}

impl Decode for IntensityFn {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        match u8::decode(r)? {
            0 => Ok(IntensityFn::Constant(f64::decode(r)?)),
            other => Err(io::Error::new(io::ErrorKind::InvalidData, format!("bad IntensityFn tag {other}"))),
        }
    }
}

impl Encode for InteractionFn {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            InteractionFn::Zero => 0u8.encode(w),
            InteractionFn::PiecewiseBox { r1, r2, v1, v2 } => {
                1u8.encode(w)?;
                r1.encode(w)?;
                r2.encode(w)?;
                v1.encode(w)?;
                v2.encode(w)
            }
            InteractionFn::Cross { radius, value } => {
                2u8.encode(w)?;
                radius.encode(w)?;
                value.encode(w)
            }
        }
    }
}

impl Decode for InteractionFn {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        match u8::decode(r)? {
            0 => Ok(InteractionFn::Zero),
            1 => Ok(InteractionFn::PiecewiseBox {
                r1: i64::decode(r)?,
                r2: i64::decode(r)?,
                v1: f64::decode(r)?,
                v2: f64::decode(r)?,
            }),
            2 => Ok(InteractionFn::Cross {
                radius: i64::decode(r)?,
                value: f64::decode(r)?,
            }),
            other => Err(io::Error::new(io::ErrorKind::InvalidData, format!("bad InteractionFn tag {other}"))),
        }
    }
}

impl Encode for ItemType {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.name.encode(w)?;
        self.scent.encode(w)?;
        self.color.encode(w)?;
        self.required_item_counts.encode(w)?;
        self.required_item_costs.encode(w)?;
        self.blocks_movement.encode(w)?;
        self.visual_occlusion.encode(w)?;
        self.intensity_fn.encode(w)?;
        self.interaction_fns.encode(w)
    }
}

impl Decode for ItemType {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(ItemType {
            name: String::decode(r)?,
            scent: Vec::decode(r)?,
            color: Vec::decode(r)?,
            required_item_counts: Vec::decode(r)?,
            required_item_costs: Vec::decode(r)?,
            blocks_movement: bool::decode(r)?,
            visual_occlusion: f64::decode(r)?,
            intensity_fn: IntensityFn::decode(r)?,
            interaction_fns: Vec::decode(r)?,
        })
    }
}

// Wire layout matches §6's snapshot item record exactly: a raw `u64`
// deletion tick where `0` means "never deleted" (§3), not a separate
// presence flag. `Tick::ZERO` is therefore not a representable deletion
// time on the wire — consistent with creation_time=0 meaning "from start".
impl Encode for ItemInstance {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.item_type.encode(w)?;
        self.location.encode(w)?;
        self.creation_time.encode(w)?;
        self.deletion_time.unwrap_or(Tick::ZERO).encode(w)
    }
}

impl Decode for ItemInstance {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let item_type = u32::decode(r)?;
        let location = Position::decode(r)?;
        let creation_time = Tick::decode(r)?;
        let deletion_tick = Tick::decode(r)?;
        Ok(ItemInstance {
            item_type,
            location,
            creation_time,
            deletion_time: (deletion_tick.0 != 0).then_some(deletion_tick),
        })
    }
}
