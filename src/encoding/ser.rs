use super::{
    constants::*,
    tag::{Size, Tag},
};
use crate::{
    errors::Error,
    vecmap::VecMap,
    Bion::{self, *},
};
use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};
use std::convert::TryFrom;

/// A byte sink the encoder writes into.
pub trait Serializer {
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
}

impl Serializer for Vec<u8> {
    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }
}

impl Serializer for BytesMut {
    fn put_u8(&mut self, u: u8) { BufMut::put_u8(self, u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }
}

/// Convenience methods for [`Serializer`].
///
/// Each method writes one complete tagged value, except the `*_header` methods, which
/// write the tag and count of a collection and leave its elements to the caller.
pub trait SerializerExt: Serializer {
    /// Add a tag byte.
    fn put_tag(&mut self, tag: Tag);

    /// Add [`Bion::Undefined`].
    fn put_undefined(&mut self);
    /// Add [`Bion::Null`].
    fn put_null(&mut self);
    /// Add a [`bool`].
    fn put_bool(&mut self, b: bool);

    /// Add a number, as an integer when it is integral and fits an [`i64`], otherwise
    /// as a double.
    ///
    /// # Arguments
    ///
    /// * `n: f64` - The value to be added.
    fn put_number(&mut self, n: f64);
    /// Add an integer in the narrowest width that holds it.
    ///
    /// # Arguments
    ///
    /// * `i: i64` - The value to be added.
    fn put_int(&mut self, i: i64);
    /// Add a double, without trying the integer encodings.
    fn put_float(&mut self, f: f64);

    /// Add a string.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::LengthOverflow`] if `s` is longer than `u32::MAX` bytes.
    fn put_str(&mut self, s: &[u8]) -> Result<(), Error>;

    /// Add an array tag and element count.
    fn put_array_header(&mut self, len: usize) -> Result<(), Error>;
    /// Add an object tag and property count.
    fn put_object_header(&mut self, len: usize) -> Result<(), Error>;

    /// Add an array.
    fn put_arr<T: Ser>(&mut self, v: &[T]) -> Result<(), Error>;
    /// Add an object.
    fn put_obj<T: Ser>(&mut self, m: &VecMap<Bytes, T>) -> Result<(), Error>;
}

/// Writes a size-tiered tag followed by its length field.
fn tag_and_len<S: Serializer + ?Sized>(
    out: &mut S,
    ctor: fn(Size) -> Tag,
    len: usize,
) -> Result<(), Error> {
    let len32 = u32::try_from(len).map_err(|_| Error::LengthOverflow { len })?;
    let size = Size::for_len(len);
    out.put_u8(ctor(size).byte());
    let width = size.width();
    if width > 0 {
        let mut buf = [0; 4];
        BigEndian::write_uint(&mut buf, u64::from(len32), width);
        out.put_slice(&buf[..width]);
    }
    Ok(())
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_tag(&mut self, tag: Tag) { self.put_u8(tag.byte()) }

    fn put_undefined(&mut self) { self.put_tag(Tag::Undefined) }

    fn put_null(&mut self) { self.put_tag(Tag::Null) }

    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_tag(Tag::True)
        } else {
            self.put_tag(Tag::False)
        }
    }

    #[inline]
    fn put_number(&mut self, n: f64) {
        if n.fract() == 0.0 && n >= -I64_BOUND && n < I64_BOUND {
            self.put_int(n as i64)
        } else {
            self.put_float(n)
        }
    }

    fn put_int(&mut self, i: i64) {
        if i < 0 {
            if i >= i8::MIN as i64 {
                self.put_tag(Tag::Int8);
                self.put_u8(i as i8 as u8);
            } else if i >= i16::MIN as i64 {
                let mut buf = [0; 2];
                BigEndian::write_i16(&mut buf, i as i16);
                self.put_tag(Tag::Int16);
                self.put_slice(&buf);
            } else if i >= i32::MIN as i64 {
                let mut buf = [0; 4];
                BigEndian::write_i32(&mut buf, i as i32);
                self.put_tag(Tag::Int32);
                self.put_slice(&buf);
            } else {
                let mut buf = [0; 8];
                BigEndian::write_i64(&mut buf, i);
                self.put_tag(Tag::Int64);
                self.put_slice(&buf);
            }
        } else if i < UINT8_LIMIT {
            self.put_tag(Tag::Uint8);
            self.put_u8(i as u8);
        } else if i < UINT16_LIMIT {
            let mut buf = [0; 2];
            BigEndian::write_u16(&mut buf, i as u16);
            self.put_tag(Tag::Uint16);
            self.put_slice(&buf);
        } else if i < UINT32_LIMIT {
            let mut buf = [0; 4];
            BigEndian::write_u32(&mut buf, i as u32);
            self.put_tag(Tag::Uint32);
            self.put_slice(&buf);
        } else {
            let mut buf = [0; 8];
            BigEndian::write_u64(&mut buf, i as u64);
            self.put_tag(Tag::Uint64);
            self.put_slice(&buf);
        }
    }

    fn put_float(&mut self, f: f64) {
        let mut buf = [0; 8];
        BigEndian::write_f64(&mut buf, f);
        self.put_tag(Tag::Float64);
        self.put_slice(&buf);
    }

    fn put_str(&mut self, s: &[u8]) -> Result<(), Error> {
        tag_and_len(self, Tag::Str, s.len())?;
        self.put_slice(s);
        Ok(())
    }

    fn put_array_header(&mut self, len: usize) -> Result<(), Error> {
        tag_and_len(self, Tag::Array, len)
    }

    fn put_object_header(&mut self, len: usize) -> Result<(), Error> {
        tag_and_len(self, Tag::Object, len)
    }

    fn put_arr<T: Ser>(&mut self, v: &[T]) -> Result<(), Error> {
        self.put_array_header(v.len())?;
        for t in v {
            t.ser(self)?;
        }
        Ok(())
    }

    fn put_obj<T: Ser>(&mut self, m: &VecMap<Bytes, T>) -> Result<(), Error> {
        self.put_object_header(m.len())?;
        for (k, v) in m.iter() {
            self.put_str(k)?;
            v.ser(self)?;
        }
        Ok(())
    }
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes `self` into `s`.
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error>;
}

impl Ser for Bion {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        match self {
            Undefined => s.put_undefined(),
            Null => s.put_null(),
            Bool(b) => s.put_bool(*b),
            Number(n) => s.put_number(*n),
            Str(bs) => return s.put_str(bs),
            Array(a) => return s.put_arr(a),
            Object(m) => return s.put_obj(m),
        }
        Ok(())
    }
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { (**self).ser(s) }
}

impl Ser for bool {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_bool(*self);
        Ok(())
    }
}

impl Ser for f64 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_number(*self);
        Ok(())
    }
}

impl Ser for i64 {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> {
        s.put_int(*self);
        Ok(())
    }
}

impl Ser for str {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_str(self.as_bytes()) }
}

impl Ser for String {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_str(self.as_bytes()) }
}

impl Ser for Bytes {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_str(self) }
}

impl<T: Ser> Ser for [T] {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_arr(self) }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_arr(self) }
}

impl<T: Ser> Ser for VecMap<Bytes, T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), Error> { s.put_obj(self) }
}
