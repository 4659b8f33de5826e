//! `Encode`/`Decode` impls for patch types (§4.7, §6).

use std::io::{self, Read, Write};

use gw_proto::{Decode, Encode};

use crate::{Patch, PatchCoord};

impl Encode for PatchCoord {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.px.encode(w)?;
        self.py.encode(w)
    }
}

impl Decode for PatchCoord {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(PatchCoord::new(i64::decode(r)?, i64::decode(r)?))
    }
}

/// Wire layout per §6: coordinate, then `bool fixed || items…`, making each
/// patch record self-contained within the snapshot's `patch_count` listing.
impl Encode for Patch {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.coord.encode(w)?;
        self.fixed.encode(w)?;
        self.items.encode(w)
    }
}

impl Decode for Patch {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Patch {
            coord: PatchCoord::decode(r)?,
            fixed: bool::decode(r)?,
            items: Decode::decode(r)?,
        })
    }
}
