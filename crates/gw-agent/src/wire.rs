//! `Encode`/`Decode` for the observable part of `AgentState` (§4.7, §6).
//!
//! The action-request lifecycle (`action_state`, `pending_action`) is
//! per-connection transient state, not part of what a reconnecting client
//! or a step broadcast needs to see — only the observable record from §3
//! goes on the wire.

use std::io::{self, Read, Write};

use gw_proto::{Decode, Encode};

use crate::AgentState;

impl Encode for AgentState {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.id.encode(w)?;
        self.position.encode(w)?;
        self.facing.encode(w)?;
        self.scent.encode(w)?;
        self.vision.encode(w)?;
        self.collected_items.encode(w)?;
        self.active.encode(w)
    }
}

impl Decode for AgentState {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let id = Decode::decode(r)?;
        let position = Decode::decode(r)?;
        let facing = Decode::decode(r)?;
        let scent = Decode::decode(r)?;
        let vision = Decode::decode(r)?;
        let collected_items = Decode::decode(r)?;
        let active = Decode::decode(r)?;
        Ok(AgentState {
            id,
            position,
            facing,
            scent,
            vision,
            collected_items,
            active,
            action_state: Default::default(),
            pending_action: None,
            request_seq: 0,
        })
    }
}
