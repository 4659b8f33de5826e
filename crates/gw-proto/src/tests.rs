use std::io::Cursor;

use gw_core::{AgentId, Direction, Position, Tick};

use crate::{Decode, Encode, MessageKind, ResponseCode};

fn roundtrip<T: Encode + Decode + PartialEq + std::fmt::Debug>(value: T) {
    let mut buf = Vec::new();
    value.encode(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = T::decode(&mut cursor).unwrap();
    assert_eq!(value, decoded);
}

#[test]
fn primitive_roundtrip() {
    roundtrip(42u8);
    roundtrip(0xdead_beefu32);
    roundtrip(u64::MAX);
    roundtrip(-1234i64);
    roundtrip(3.5f64);
    roundtrip(true);
    roundtrip(false);
}

#[test]
fn string_roundtrip_is_length_prefixed() {
    let s = "hello grid world".to_string();
    let mut buf = Vec::new();
    s.encode(&mut buf).unwrap();
    assert_eq!(&buf[0..8], &(s.len() as u64).to_le_bytes());
    let mut cursor = Cursor::new(buf);
    assert_eq!(String::decode(&mut cursor).unwrap(), s);
}

#[test]
fn vec_roundtrip() {
    roundtrip(vec![1u32, 2, 3, 4]);
    roundtrip(Vec::<u32>::new());
}

#[test]
fn option_roundtrip() {
    roundtrip(Some(7u64));
    roundtrip(None::<u64>);
}

#[test]
fn domain_type_roundtrip() {
    roundtrip(Position::new(-5, 12));
    roundtrip(Tick(99));
    roundtrip(AgentId(3));
    roundtrip(Direction::Left);
}

#[test]
fn message_kind_and_response_code_roundtrip() {
    for kind in [
        MessageKind::AddAgent,
        MessageKind::Move,
        MessageKind::Turn,
        MessageKind::DoNothing,
        MessageKind::GetMap,
        MessageKind::GetAgentIds,
        MessageKind::GetAgentStates,
        MessageKind::SetActive,
        MessageKind::IsActive,
        MessageKind::StepResponse,
    ] {
        let mut buf = Vec::new();
        kind.encode(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(MessageKind::decode(&mut cursor).unwrap(), kind);
    }

    for code in [
        ResponseCode::Failure,
        ResponseCode::Success,
        ResponseCode::InvalidAgentId,
        ResponseCode::ServerParseMessageError,
        ResponseCode::ClientParseMessageError,
        ResponseCode::PermissionError,
        ResponseCode::AgentAlreadyActed,
        ResponseCode::OutOfMemory,
        ResponseCode::MpiError,
    ] {
        let mut buf = Vec::new();
        code.encode(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(ResponseCode::decode(&mut cursor).unwrap(), code);
    }
}

#[test]
fn truncated_payload_is_an_error_not_a_panic() {
    let mut cursor = Cursor::new(vec![0u8; 2]);
    assert!(u64::decode(&mut cursor).is_err());
}
