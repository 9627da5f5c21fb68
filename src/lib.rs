//! # BION
//!
//! BION (Binary Object Notation) is a compact, self-describing binary encoding for
//! dynamic values: undefined, null, booleans, numbers, strings, arrays and objects.
//!
//! # Usage
//!
//! Values are represented by [`Bion`]. They can be built by hand, or converted from any
//! type implementing `serde::Serialize` with the [`rep`] adapter.
//!
//! ```
//! use bion::prelude::*;
//!
//! let value = Bion::from(vec![Bion::Null, Bion::from(true), Bion::from("x")]);
//!
//! // encode
//! let encoded = encode_full(&value).unwrap();
//!
//! // and then immediately decode
//! let decoded = decode_full(&encoded).unwrap();
//!
//! assert_eq!(value, decoded);
//! ```
//!
//! With serde:
//!
//! ```
//! use bion::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: f64,
//! }
//!
//! let p = Point { x: -3, y: 0.5 };
//!
//! let bytes = to_vec(&p).unwrap();
//! let back: Point = from_slice(&bytes).unwrap();
//!
//! assert_eq!(p, back);
//! ```
//!
//! # An overview of BION types
//!
//! ## Numbers
//!
//! Every number is an [`f64`] once decoded. The encoder stores integral values in the
//! narrowest integer width that holds them, and everything else as a double. Integers
//! with a magnitude above `2^53` cannot be held exactly by an `f64`, so they may come back
//! rounded.
//!
//! ```
//! use bion::prelude::*;
//!
//! // written as one tag byte and one payload byte
//! assert_eq!(encode_full(&Bion::from(3)).unwrap(), vec![0x34, 3]);
//!
//! // 3.0 is integral, so it is written the same way
//! assert_eq!(encode_full(&Bion::from(3.0)).unwrap(), vec![0x34, 3]);
//! ```
//!
//! ## Strings
//!
//! Strings are byte sequences interpreted as text. They are not checked for UTF-8.
//!
//! ## Objects
//!
//! Objects map string keys to values. They are stored in a [`VecMap`], so keys are unique
//! and always encoded in ascending byte order.
//!
//! # Wire format
//!
//! ## Tags
//!
//! The first byte of every value is its *tag*. The high nibble is the type; for strings,
//! arrays and objects the low nibble is the size tier of the length field.
//!
//! | Tag           | Meaning              | Payload                          |
//! | ---           | ---                  | ---                              |
//! | `0x00`        | undefined            | none                             |
//! | `0x10`        | null                 | none                             |
//! | `0x20`/`0x21` | false/true           | none                             |
//! | `0x30`-`0x33` | int 8/16/32/64       | 1/2/4/8 bytes, two's complement  |
//! | `0x34`-`0x37` | uint 8/16/32/64      | 1/2/4/8 bytes                    |
//! | `0x38`        | double               | 8 bytes, IEEE 754                |
//! | `0x40`-`0x43` | string               | length, then raw bytes           |
//! | `0x50`-`0x53` | array                | count, then values               |
//! | `0x60`-`0x63` | object               | count, then (string, value) pairs |
//!
//! All multi-byte fields are big-endian.
//!
//! ## Size tiers
//!
//! | Low nibble | Length field | Used when     |
//! | ---        | ---          | ---           |
//! | `0`        | none         | length 0      |
//! | `1`        | 8-bit        | length < 2^8  |
//! | `2`        | 16-bit       | length < 2^16 |
//! | `3`        | 32-bit       | otherwise     |
//!
//! ## Integers
//!
//! Negative integers use the narrowest of int8, int16, int32 and int64. Non-negative
//! integers use uint8 below `2^8`, uint16 below `2^16`, uint32 below `2^24` and uint64
//! otherwise. The uint32 bound is `2^24`, not `2^32`.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod prelude;
pub mod rep;
mod util;
pub mod vecmap;

pub use errors::Error;

use bytes::Bytes;
use failure::bail;
use std::{
    collections::BTreeMap,
    convert::{TryFrom, TryInto},
    iter::FromIterator,
};
use vecmap::*;

#[derive(PartialEq, Clone, Debug)]
/// [`Bion`] and its variants.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// let b = Bion::Bool(true);
///
/// let val = match b {
///     Bion::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Bion {
    /// Absent or unspecified. Distinct from [`Bion::Null`].
    Undefined,
    /// Null. Corresponds to [`None`].
    Null,
    /// Boolean.
    Bool(bool),
    /// Number. Every numeric encoding decodes to this.
    Number(f64),
    /// String, as raw bytes.
    ///
    /// ```
    /// use bion::prelude::*;
    ///
    /// let s = Bion::Str(Bytes::from_static(b"hello world"));
    ///
    /// assert_eq!(s.to_str().unwrap(), "hello world");
    /// ```
    Str(Bytes),
    /// Array.
    Array(Vec<Bion>),
    /// Object.
    ///
    /// ```
    /// use bion::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from("one"), Bion::from(1))]);
    ///
    /// let obj = Bion::Object(vmap);
    ///
    /// assert_eq!(obj.get("one"), Some(&Bion::Number(1.0)));
    /// ```
    Object(VecMap<Bytes, Bion>),
}

use Bion::*;

impl Bion {
    /// Converts a [`Bion`] value to a vector of [`Bion`].
    /// This will return an error if the value is not a [`Bion::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use bion::prelude::*;
    ///
    /// let b = Bion::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(b.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Bion>, failure::Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Consumes a [`Bion`] value, converting it into a vector of [`Bion`] values.
    /// This will return an error if the value is not a [`Bion::Array`].
    pub fn into_vec(self) -> Result<Vec<Bion>, failure::Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not an `Array`"),
        }
    }

    /// Converts a [`Bion`] value to a [`VecMap`].
    /// This will return an error if the value is not a [`Bion::Object`].
    pub fn to_vecmap(&self) -> Result<&VecMap<Bytes, Bion>, failure::Error> {
        match self {
            Object(vmap) => Ok(vmap),
            _ => bail!("This value is not an `Object`"),
        }
    }

    /// Consumes a [`Bion`] value, converting it into a [`VecMap`].
    /// This will return an error if the value is not a [`Bion::Object`].
    pub fn into_vecmap(self) -> Result<VecMap<Bytes, Bion>, failure::Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not an `Object`"),
        }
    }

    /// Looks up `key` in an object. Returns `None` for other variants.
    pub fn get(&self, key: &str) -> Option<&Bion> {
        match self {
            Object(m) => m.get(key.as_bytes()),
            _ => None,
        }
    }

    /// Indicates whether a value is [`Undefined`].
    pub fn is_undefined(&self) -> bool {
        match self {
            Undefined => true,
            _ => false,
        }
    }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use bion::Bion::Null;
    ///
    /// let foo = Null;
    ///
    /// assert!(foo.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an error if the value is not a [`Bion::Bool`].
    pub fn to_bool(&self) -> Result<bool, failure::Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Tries to convert a value to an [`f64`].
    /// This will return an error if the value is not a [`Bion::Number`].
    pub fn to_number(&self) -> Result<f64, failure::Error> {
        match self {
            Number(n) => Ok(*n),
            _ => bail!("Value is not `Number`"),
        }
    }

    /// Tries to convert a value to `Bytes`.
    /// This will return an error if the value is not a [`Bion::Str`].
    pub fn to_bytes(&self) -> Result<&Bytes, failure::Error> {
        match self {
            Str(s) => Ok(s),
            _ => bail!("Value is not a string"),
        }
    }

    /// Tries to view a string value as UTF-8 text.
    /// This will return an error if the value is not a [`Bion::Str`] or is not valid
    /// UTF-8.
    pub fn to_str(&self) -> Result<&str, failure::Error> {
        Ok(std::str::from_utf8(self.to_bytes()?)?)
    }
}

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

impl std::fmt::Display for Bion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_map(m: &VecMap<Bytes, Bion>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                let value = fmt_helper(v, indent + 2);
                map_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_bytes(k),
                    value = value,
                ));

                // check if we're at last element
                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(b: &Bion, indent: usize) -> String {
            match b {
                Undefined => "undefined".to_owned(),
                Null => "null".to_owned(),
                Bool(b) => if *b { "true" } else { "false" }.to_owned(),
                Number(n) => format!("{}", n),
                Str(bytes) => fmt_bytes(bytes),
                Array(a) => {
                    let mut arr_string: String = "[".to_owned();
                    for (i, b) in a.iter().enumerate() {
                        if i != 0 {
                            arr_string.push_str(", ");
                        }
                        arr_string.push_str(&fmt_helper(b, indent));
                    }
                    arr_string.push(']');

                    arr_string
                }
                Object(m) => fmt_map(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl From<&str> for Bion {
    fn from(s: &str) -> Bion { Str(Bytes::copy_from_slice(s.as_bytes())) }
}

impl From<String> for Bion {
    fn from(s: String) -> Bion { Str(Bytes::from(s)) }
}

impl<T: Into<Bion>> From<Vec<T>> for Bion {
    fn from(v: Vec<T>) -> Bion { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Bion>> From<VecMap<Bytes, T>> for Bion {
    fn from(v: VecMap<Bytes, T>) -> Bion {
        Object(VecMap::from_sorted(
            v.into_iter().map(|(k, v)| (k, v.into())).collect(),
        ))
    }
}

impl<T: Into<Bion>> From<BTreeMap<String, T>> for Bion {
    fn from(m: BTreeMap<String, T>) -> Bion {
        Object(VecMap::from_sorted(
            m.into_iter()
                .map(|(k, v)| (Bytes::from(k), v.into()))
                .collect(),
        ))
    }
}

impl<T: Into<Bion>> From<Option<T>> for Bion {
    fn from(o: Option<T>) -> Bion { o.map_or(Null, T::into) }
}

/// Collects pairs into a [`Bion::Object`]; a repeated key keeps its last value.
impl<K: Into<Bytes>, V: Into<Bion>> FromIterator<(K, V)> for Bion {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Bion {
        Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Bion> for Vec<Bion> {
    type Error = Bion;

    fn try_from(b: Bion) -> Result<Self, Bion> {
        match b {
            Array(a) => Ok(a),
            other => Err(other),
        }
    }
}

impl TryFrom<Bion> for VecMap<Bytes, Bion> {
    type Error = Bion;

    fn try_from(b: Bion) -> Result<Self, Bion> {
        match b {
            Object(m) => Ok(m),
            other => Err(other),
        }
    }
}

// bool -> Bion
from_fn!(Bion, bool, Bool);
// f64 -> Bion
from_fn!(Bion, f64, Number);
// Bytes -> Bion
from_fn!(Bion, Bytes, Str);

// Lossless numbers
from_prims!(Bion);

// Wide integers, exact only up to 2^53 in magnitude
from_as!(Bion, i64, f64);
from_as!(Bion, u64, f64);
from_as!(Bion, isize, f64);
from_as!(Bion, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());
        assert!(Undefined.is_undefined());
        assert!(!Undefined.is_null());

        assert_eq!(Bion::from(5).to_number().unwrap(), 5.0);

        assert!(Bion::from(true).to_bool().unwrap());

        assert_eq!(
            Bion::from("word").to_bytes().unwrap(),
            &Bytes::from("word")
        );
        assert!(Bion::from(1).to_str().is_err());
        assert!(Bion::Str(Bytes::from_static(&[0xff])).to_str().is_err());
    }

    #[test]
    fn from_vec() {
        let v: Vec<u8> = vec![0, 1, 2, 3, 4];
        let b = Bion::from(v);
        let nums: Vec<f64> = b
            .into_vec()
            .unwrap()
            .iter()
            .map(|n| n.to_number().unwrap())
            .collect();
        assert_eq!(nums, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn from_pairs() {
        let obj: Bion = vec![("b", 2), ("a", 1), ("b", 3)].into_iter().collect();

        assert_eq!(obj.to_vecmap().unwrap().len(), 2);
        assert_eq!(obj.get("b"), Some(&Number(3.0)));
        assert_eq!(obj.get("c"), None);
        assert_eq!(Null.get("a"), None);
    }

    #[test]
    fn display() {
        let obj: Bion = vec![
            ("list", Bion::from(vec![Bion::from(1), Null, Undefined])),
            ("name", Bion::from("x")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            obj.to_string(),
            "{\n  \"list\": [1, null, undefined],\n  \"name\": \"x\"\n}"
        );
        assert_eq!(Bion::from(2.5).to_string(), "2.5");
        assert_eq!(Bion::Str(Bytes::from_static(&[0xff, 0x01])).to_string(), "b\"ff01\"");
    }

    #[test]
    fn option_and_wide_ints() {
        assert_eq!(Bion::from(None::<bool>), Null);
        assert_eq!(Bion::from(Some(false)), Bool(false));
        assert_eq!(Bion::from(u64::MAX), Number(18_446_744_073_709_551_615.0));
        assert_eq!(Bion::from(-7i64), Number(-7.0));
    }
}
