use super::{
    tag::{Size, Tag},
    DecodeConfig,
};
use crate::{
    errors::Error,
    vecmap::VecMap,
    Bion::{self, *},
};
use byteorder::{BigEndian, ByteOrder};
use bytes::{Buf, Bytes};
use log::trace;
use std::convert::TryFrom;

/// A read cursor over encoded BION.
///
/// Every read checks that enough input is left before consuming it, and consumes exactly
/// the bytes it declares: the tag, any length field and the payload. Strings are sliced
/// out of the underlying [`Bytes`] without copying.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// // two values back to back
/// let mut enc = encode_full(&Bion::from(1)).unwrap();
/// enc.extend(encode_full(&Bion::from("two")).unwrap());
///
/// let data = &mut BionBytes::new(Bytes::from(enc));
///
/// assert_eq!(decode(data).unwrap(), Bion::from(1));
/// assert_eq!(data.offset(), 2);
/// assert_eq!(decode(data).unwrap(), Bion::from("two"));
/// assert_eq!(data.remaining(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct BionBytes {
    buf: Bytes,
    len: usize,
    depth: usize,
    max_depth: usize,
}

impl BionBytes {
    /// Creates a cursor at the start of `buf` with the default [`DecodeConfig`].
    pub fn new(buf: Bytes) -> Self { Self::with_config(buf, &DecodeConfig::default()) }

    /// Creates a cursor at the start of `buf`.
    pub fn with_config(buf: Bytes, config: &DecodeConfig) -> Self {
        BionBytes {
            len: buf.len(),
            buf,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize { self.len - self.buf.len() }

    /// Number of bytes left.
    pub fn remaining(&self) -> usize { self.buf.len() }

    #[cold]
    fn truncated(&self, needed: usize) -> Error {
        Error::Truncated {
            offset: self.offset(),
            needed,
            available: self.remaining(),
        }
    }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, Error> {
        if self.buf.has_remaining() {
            Ok(self.buf.get_u8())
        } else {
            Err(self.truncated(1))
        }
    }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<Bytes, Error> {
        if self.buf.len() >= len {
            Ok(self.buf.split_to(len))
        } else {
            Err(self.truncated(len))
        }
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, Error> {
        let bs = self.read_many(2)?;
        Ok(BigEndian::read_u16(&bs))
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, Error> {
        let bs = self.read_many(4)?;
        Ok(BigEndian::read_u32(&bs))
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, Error> {
        let bs = self.read_many(8)?;
        Ok(BigEndian::read_u64(&bs))
    }

    #[inline]
    fn read_tag(&mut self) -> Result<Tag, Error> {
        let offset = self.offset();
        let byte = self.take_byte()?;
        Tag::try_from(byte).map_err(|tag| Error::InvalidTag { tag, offset })
    }

    /// Reads the length field of a size-tiered tag.
    #[inline]
    fn read_len(&mut self, size: Size) -> Result<usize, Error> {
        let width = size.width();
        if width == 0 {
            return Ok(0);
        }
        let bs = self.read_many(width)?;
        Ok(BigEndian::read_uint(&bs, width) as usize)
    }

    fn enter(&mut self, offset: usize) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            Err(Error::DepthExceeded {
                max_depth: self.max_depth,
                offset,
            })
        } else {
            self.depth += 1;
            Ok(())
        }
    }

    fn leave(&mut self) { self.depth -= 1; }

    /// Reads one complete value.
    pub(crate) fn read_value(&mut self) -> Result<Bion, Error> {
        let offset = self.offset();
        let tag = self.read_tag()?;
        trace!("read_value: {:?} at offset {}", tag, offset);

        let len = match tag.size() {
            Some(size) => self.read_len(size)?,
            None => 0,
        };

        let value = match tag {
            Tag::Undefined => Undefined,
            Tag::Null => Null,
            Tag::False => Bool(false),
            Tag::True => Bool(true),
            Tag::Int8 => Number(self.take_byte()? as i8 as f64),
            Tag::Int16 => Number(self.read_u16()? as i16 as f64),
            Tag::Int32 => Number(self.read_u32()? as i32 as f64),
            Tag::Int64 => Number(self.read_u64()? as i64 as f64),
            Tag::Uint8 => Number(self.take_byte()? as f64),
            Tag::Uint16 => Number(self.read_u16()? as f64),
            Tag::Uint32 => Number(self.read_u32()? as f64),
            Tag::Uint64 => Number(self.read_u64()? as f64),
            Tag::Float64 => Number(f64::from_bits(self.read_u64()?)),
            Tag::Str(_) => Str(self.read_many(len)?),
            Tag::Array(_) => {
                self.enter(offset)?;
                let arr = self.read_array(len);
                self.leave();
                Array(arr?)
            }
            Tag::Object(_) => {
                self.enter(offset)?;
                let obj = self.read_object(len);
                self.leave();
                Object(obj?)
            }
        };

        Ok(value)
    }

    fn read_array(&mut self, len: usize) -> Result<Vec<Bion>, Error> {
        // every element takes at least one byte
        let mut out = Vec::with_capacity(len.min(self.remaining()));
        for ix in 0..len {
            let item = self.read_value().map_err(|e| {
                trace!("read_array: element {} of {} failed: {}", ix, len, e);
                e
            })?;
            out.push(item);
        }
        Ok(out)
    }

    fn read_key(&mut self) -> Result<Bytes, Error> {
        let offset = self.offset();
        match self.read_tag()? {
            Tag::Str(size) => {
                let len = self.read_len(size)?;
                self.read_many(len)
            }
            other => Err(Error::InvalidKey {
                tag: other.byte(),
                offset,
            }),
        }
    }

    fn read_object(&mut self, len: usize) -> Result<VecMap<Bytes, Bion>, Error> {
        let mut out = Vec::with_capacity(len.min(self.remaining() / 2));
        for ix in 0..len {
            let key = self.read_key().map_err(|e| {
                trace!("read_object: key {} of {} failed: {}", ix, len, e);
                e
            })?;
            let val = self.read_value().map_err(|e| {
                trace!("read_object: value for key {:?} failed: {}", key, e);
                e
            })?;
            out.push((key, val));
        }
        Ok(VecMap::from(out))
    }
}
