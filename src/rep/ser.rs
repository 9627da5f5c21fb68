use super::{Numeric, RepError};
use crate::{
    vecmap::VecMap,
    Bion::{self, *},
};
use bytes::Bytes;
use serde::ser::{self, Impossible, Serialize};

type Result<T> = std::result::Result<T, RepError>;

impl Serialize for Bion {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Undefined => serializer.serialize_unit(),
            Null => serializer.serialize_none(),
            Bool(b) => serializer.serialize_bool(*b),
            Number(n) => match Numeric::of(*n) {
                Numeric::Unsigned(u) => serializer.serialize_u64(u),
                Numeric::Signed(i) => serializer.serialize_i64(i),
                Numeric::Float(f) => serializer.serialize_f64(f),
            },
            Str(bs) => Text(bs).serialize(serializer),
            Array(a) => serializer.collect_seq(a),
            Object(m) => serializer.collect_map(m.iter().map(|(k, v)| (Text(k), v))),
        }
    }
}

/// A string that is written as `str` when it is UTF-8, and as bytes otherwise.
struct Text<'a>(&'a [u8]);

impl<'a> Serialize for Text<'a> {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match std::str::from_utf8(self.0) {
            Ok(s) => serializer.serialize_str(s),
            Err(_) => serializer.serialize_bytes(self.0),
        }
    }
}

fn variant_object(variant: &'static str, value: Bion) -> Bion {
    Object(VecMap::from_sorted(vec![(
        Bytes::from_static(variant.as_bytes()),
        value,
    )]))
}

/// Builds [`Bion`] out of any [`Serialize`] value.
pub(crate) struct BionSerializer;

impl ser::Serializer for BionSerializer {
    type Error = RepError;
    type Ok = Bion;
    type SerializeMap = MapBuilder;
    type SerializeSeq = SeqBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = StructVariantBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = TupleVariantBuilder;

    fn serialize_bool(self, v: bool) -> Result<Bion> { Ok(Bool(v)) }

    fn serialize_i8(self, v: i8) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_i16(self, v: i16) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_i32(self, v: i32) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_i64(self, v: i64) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_i128(self, _v: i128) -> Result<Bion> { Err(RepError::unsupported("i128")) }

    fn serialize_u8(self, v: u8) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_u16(self, v: u16) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_u32(self, v: u32) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_u64(self, v: u64) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_u128(self, _v: u128) -> Result<Bion> { Err(RepError::unsupported("u128")) }

    fn serialize_f32(self, v: f32) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_f64(self, v: f64) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_char(self, v: char) -> Result<Bion> { Ok(Bion::from(v.to_string())) }

    fn serialize_str(self, v: &str) -> Result<Bion> { Ok(Bion::from(v)) }

    fn serialize_bytes(self, v: &[u8]) -> Result<Bion> { Ok(Str(Bytes::copy_from_slice(v))) }

    fn serialize_none(self) -> Result<Bion> { Ok(Null) }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Bion> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Bion> { Ok(Null) }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Bion> { Ok(Null) }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Bion> {
        Ok(Str(Bytes::from_static(variant.as_bytes())))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Bion> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Bion> {
        Ok(variant_object(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> { self.serialize_seq(Some(len)) }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantBuilder> {
        Ok(TupleVariantBuilder {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapBuilder> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantBuilder> {
        Ok(StructVariantBuilder {
            variant,
            entries: Vec::with_capacity(len),
        })
    }
}

pub(crate) struct SeqBuilder {
    vec: Vec<Bion>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(value.serialize(BionSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Bion> { Ok(Array(self.vec)) }
}

impl ser::SerializeTuple for SeqBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Bion> { ser::SerializeSeq::end(self) }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Bion> { ser::SerializeSeq::end(self) }
}

pub(crate) struct TupleVariantBuilder {
    variant: &'static str,
    vec: Vec<Bion>,
}

impl ser::SerializeTupleVariant for TupleVariantBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(value.serialize(BionSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Bion> { Ok(variant_object(self.variant, Array(self.vec))) }
}

pub(crate) struct MapBuilder {
    entries: Vec<(Bytes, Bion)>,
    next_key: Option<Bytes>,
}

impl ser::SerializeMap for MapBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| RepError::Message("map value without a key".to_string()))?;
        self.entries.push((key, value.serialize(BionSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Bion> { Ok(Object(VecMap::from(self.entries))) }
}

impl ser::SerializeStruct for MapBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.entries.push((
            Bytes::from_static(key.as_bytes()),
            value.serialize(BionSerializer)?,
        ));
        Ok(())
    }

    fn end(self) -> Result<Bion> { ser::SerializeMap::end(self) }
}

pub(crate) struct StructVariantBuilder {
    variant: &'static str,
    entries: Vec<(Bytes, Bion)>,
}

impl ser::SerializeStructVariant for StructVariantBuilder {
    type Error = RepError;
    type Ok = Bion;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.entries.push((
            Bytes::from_static(key.as_bytes()),
            value.serialize(BionSerializer)?,
        ));
        Ok(())
    }

    fn end(self) -> Result<Bion> {
        Ok(variant_object(
            self.variant,
            Object(VecMap::from(self.entries)),
        ))
    }
}

fn key_error(kind: &str) -> RepError { RepError::unsupported(format!("{} map key", kind)) }

/// Accepts only string-like map keys.
struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Error = RepError;
    type Ok = Bytes;
    type SerializeMap = Impossible<Bytes, RepError>;
    type SerializeSeq = Impossible<Bytes, RepError>;
    type SerializeStruct = Impossible<Bytes, RepError>;
    type SerializeStructVariant = Impossible<Bytes, RepError>;
    type SerializeTuple = Impossible<Bytes, RepError>;
    type SerializeTupleStruct = Impossible<Bytes, RepError>;
    type SerializeTupleVariant = Impossible<Bytes, RepError>;

    fn serialize_bool(self, _v: bool) -> Result<Bytes> { Err(key_error("bool")) }

    fn serialize_i8(self, _v: i8) -> Result<Bytes> { Err(key_error("i8")) }

    fn serialize_i16(self, _v: i16) -> Result<Bytes> { Err(key_error("i16")) }

    fn serialize_i32(self, _v: i32) -> Result<Bytes> { Err(key_error("i32")) }

    fn serialize_i64(self, _v: i64) -> Result<Bytes> { Err(key_error("i64")) }

    fn serialize_i128(self, _v: i128) -> Result<Bytes> { Err(key_error("i128")) }

    fn serialize_u8(self, _v: u8) -> Result<Bytes> { Err(key_error("u8")) }

    fn serialize_u16(self, _v: u16) -> Result<Bytes> { Err(key_error("u16")) }

    fn serialize_u32(self, _v: u32) -> Result<Bytes> { Err(key_error("u32")) }

    fn serialize_u64(self, _v: u64) -> Result<Bytes> { Err(key_error("u64")) }

    fn serialize_u128(self, _v: u128) -> Result<Bytes> { Err(key_error("u128")) }

    fn serialize_f32(self, _v: f32) -> Result<Bytes> { Err(key_error("f32")) }

    fn serialize_f64(self, _v: f64) -> Result<Bytes> { Err(key_error("f64")) }

    fn serialize_char(self, v: char) -> Result<Bytes> { Ok(Bytes::from(v.to_string())) }

    fn serialize_str(self, v: &str) -> Result<Bytes> { Ok(Bytes::copy_from_slice(v.as_bytes())) }

    fn serialize_bytes(self, v: &[u8]) -> Result<Bytes> { Ok(Bytes::copy_from_slice(v)) }

    fn serialize_none(self) -> Result<Bytes> { Err(key_error("option")) }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<Bytes> {
        Err(key_error("option"))
    }

    fn serialize_unit(self) -> Result<Bytes> { Err(key_error("unit")) }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Bytes> { Err(key_error(name)) }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Bytes> {
        Ok(Bytes::from_static(variant.as_bytes()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Bytes> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Bytes> {
        Err(key_error(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_error("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_error("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_error(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_error(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_error("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_error(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_error(name))
    }
}
