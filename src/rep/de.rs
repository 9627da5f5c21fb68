use super::{Numeric, RepError};
use crate::{
    vecmap::VecMap,
    Bion::{self, *},
};
use bytes::Bytes;
use serde::{
    de::{
        self,
        value::{MapDeserializer, SeqDeserializer},
        DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
        VariantAccess, Visitor,
    },
    forward_to_deserialize_any, Deserialize, Deserializer,
};
use std::fmt;

type Result<T> = std::result::Result<T, RepError>;

fn unexpected(b: &Bion) -> Unexpected<'_> {
    match b {
        Undefined | Null => Unexpected::Unit,
        Bool(b) => Unexpected::Bool(*b),
        Number(n) => Unexpected::Float(*n),
        Str(bs) => Unexpected::Bytes(bs),
        Array(_) => Unexpected::Seq,
        Object(_) => Unexpected::Map,
    }
}

/// Hands a [`Bion`] value to `serde`.
pub(crate) struct BionDeserializer(pub(crate) Bion);

impl<'de> IntoDeserializer<'de, RepError> for BionDeserializer {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self { self }
}

impl<'de> Deserializer<'de> for BionDeserializer {
    type Error = RepError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.0 {
            Undefined | Null => visitor.visit_unit(),
            Bool(b) => visitor.visit_bool(b),
            Number(n) => match Numeric::of(n) {
                Numeric::Unsigned(u) => visitor.visit_u64(u),
                Numeric::Signed(i) => visitor.visit_i64(i),
                Numeric::Float(f) => visitor.visit_f64(f),
            },
            Str(bs) => match std::str::from_utf8(&bs) {
                Ok(s) => visitor.visit_str(s),
                Err(_) => visitor.visit_bytes(&bs),
            },
            Array(a) => {
                let mut seq =
                    SeqDeserializer::<_, RepError>::new(a.into_iter().map(BionDeserializer));
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Object(m) => {
                let mut map = MapDeserializer::<_, RepError>::new(
                    m.into_iter()
                        .map(|(k, v)| (BionDeserializer(Str(k)), BionDeserializer(v))),
                );
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.0 {
            Undefined | Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.0 {
            Str(bs) => visitor.visit_bytes(&bs),
            other => BionDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.0 {
            Str(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Object(m) => {
                let mut entries = m.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    _ => Err(de::Error::invalid_value(
                        Unexpected::Map,
                        &"an object with exactly one entry",
                    )),
                }
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a string or an object with exactly one entry",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string
        unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: Bytes,
    value: Option<Bion>,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = RepError;
    type Variant = VariantDeserializer;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, VariantDeserializer)> {
        let variant = seed.deserialize(BionDeserializer(Str(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Bion>,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = RepError;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Null) | Some(Undefined) => Ok(()),
            Some(other) => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a unit variant",
            )),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        match self.value {
            Some(value) => seed.deserialize(BionDeserializer(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"a newtype variant",
            )),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        match self.value {
            Some(Array(a)) => BionDeserializer(Array(a)).deserialize_any(visitor),
            Some(other) => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a tuple variant",
            )),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"a tuple variant",
            )),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            Some(Object(m)) => BionDeserializer(Object(m)).deserialize_any(visitor),
            Some(other) => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a struct variant",
            )),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"a struct variant",
            )),
        }
    }
}

struct BionVisitor;

impl<'de> Visitor<'de> for BionVisitor {
    type Value = Bion;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("a BION value") }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<Bion, E> { Ok(Bool(v)) }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<Bion, E> { Ok(Bion::from(v)) }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<Bion, E> { Ok(Bion::from(v)) }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<Bion, E> { Ok(Number(v)) }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Bion, E> { Ok(Bion::from(v)) }

    fn visit_string<E>(self, v: String) -> std::result::Result<Bion, E> { Ok(Bion::from(v)) }

    fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Bion, E> {
        Ok(Str(Bytes::copy_from_slice(v)))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Bion, E> {
        Ok(Str(Bytes::from(v)))
    }

    fn visit_none<E>(self) -> std::result::Result<Bion, E> { Ok(Null) }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Bion, D::Error> {
        Bion::deserialize(d)
    }

    fn visit_unit<E>(self) -> std::result::Result<Bion, E> { Ok(Null) }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Bion, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            out.push(item);
        }
        Ok(Array(out))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Bion, A::Error> {
        let mut entries = Vec::new();
        while let Some((Key(k), v)) = map.next_entry()? {
            entries.push((k, v));
        }
        Ok(Object(VecMap::from(entries)))
    }
}

impl<'de> Deserialize<'de> for Bion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Bion, D::Error> {
        deserializer.deserialize_any(BionVisitor)
    }
}

/// An object key, as text or raw bytes.
struct Key(Bytes);

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Key, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string key")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Key, E> {
                Ok(Key(Bytes::copy_from_slice(v.as_bytes())))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Key, E> {
                Ok(Key(Bytes::from(v)))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Key, E> {
                Ok(Key(Bytes::copy_from_slice(v)))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Key, E> {
                Ok(Key(Bytes::from(v)))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
