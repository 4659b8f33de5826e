//! Byte-exact little-endian `Encode`/`Decode` traits (§4.7).
//!
//! Every wire type implements both traits by hand — no `serde` — so the
//! on-the-wire layout is exactly the concatenation of fields in the order
//! named in the data model, with no framing surprises from a generic
//! serializer. Strings and arrays share one `u64`-length-prefixed shape.

use std::io::{self, Read, Write};

use gw_core::{AgentId, ClientId, Direction, Position, Tick};

pub trait Encode {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()>;
}

pub trait Decode: Sized {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self>;
}

macro_rules! impl_int_codec {
    ($($t:ty),+) => {
        $(
            impl Encode for $t {
                #[inline]
                fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
                    w.write_all(&self.to_le_bytes())
                }
            }
            impl Decode for $t {
                #[inline]
                fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    r.read_exact(&mut buf)?;
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )+
    };
}

impl_int_codec!(u8, u16, u32, u64, i64, f64);

impl Encode for bool {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (*self as u8).encode(w)
    }
}

impl Decode for bool {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(u8::decode(r)? != 0)
    }
}

impl Encode for String {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (self.len() as u64).encode(w)?;
        w.write_all(self.as_bytes())
    }
}

impl Decode for String {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = u64::decode(r)? as usize;
        let mut buf = vec![0u8; len];
        r.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (self.len() as u64).encode(w)?;
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = u64::decode(r)? as usize;
        let mut out = Vec::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            out.push(T::decode(r)?);
        }
        Ok(out)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            Some(v) => {
                true.encode(w)?;
                v.encode(w)
            }
            None => false.encode(w),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        if bool::decode(r)? {
            Ok(Some(T::decode(r)?))
        } else {
            Ok(None)
        }
    }
}

impl Encode for Position {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.x.encode(w)?;
        self.y.encode(w)
    }
}

impl Decode for Position {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Position::new(i64::decode(r)?, i64::decode(r)?))
    }
}

impl Encode for Tick {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.0.encode(w)
    }
}

impl Decode for Tick {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Tick(u64::decode(r)?))
    }
}

impl Encode for AgentId {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.0.encode(w)
    }
}

impl Decode for AgentId {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(AgentId(u64::decode(r)?))
    }
}

impl Encode for ClientId {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.0.encode(w)
    }
}

impl Decode for ClientId {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(ClientId(u64::decode(r)?))
    }
}

impl Encode for Direction {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let tag: u8 = match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        };
        tag.encode(w)
    }
}

impl Decode for Direction {
    fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match u8::decode(r)? {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            other => return Err(io::Error::new(io::ErrorKind::InvalidData, format!("bad Direction tag {other}"))),
        })
    }
}
