//! Conversions between [`Bion`] and any type implementing `serde`'s traits.
//!
//! # Example
//!
//! ```
//! use bion::prelude::*;
//! use serde::{Deserialize, Serialize};
//! use std::collections::BTreeMap;
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! enum Shape {
//!     Dot,
//!     Circle { r: f64 },
//! }
//!
//! let shapes = vec![Shape::Dot, Shape::Circle { r: 1.5 }];
//!
//! let value = to_bion(&shapes).unwrap();
//!
//! let mut circle = BTreeMap::new();
//! circle.insert("Circle".to_string(), vec![("r", 1.5)].into_iter().collect::<Bion>());
//!
//! assert_eq!(value, Bion::from(vec![Bion::from("Dot"), Bion::from(circle)]));
//!
//! let back: Vec<Shape> = from_bion(value).unwrap();
//! assert_eq!(back, shapes);
//! ```
//!
//! # Mapping
//!
//! | Rust                                   | BION                          |
//! | ---                                    | ---                           |
//! | `bool`                                 | `Bool`                        |
//! | integers and floats up to 64 bits      | `Number`                      |
//! | `char`, `str`, byte buffers            | `Str`                         |
//! | `()`, unit structs, `None`             | `Null`                        |
//! | sequences, tuples, tuple structs       | `Array`                       |
//! | maps with string keys, structs         | `Object`                      |
//! | unit variants                          | `Str` holding the name        |
//! | other variants                         | `{name: payload}`             |
//!
//! `i128`, `u128` and maps with non-string keys fail with [`Error::UnsupportedType`].
//!
//! Integers with a magnitude above `2^53` lose precision, since every number is an
//! [`f64`].

use crate::{
    encoding::{constants::I64_BOUND, decode_full, encode_full},
    errors::Error,
    Bion,
};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

mod de;
mod ser;

/// `2^64`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Converts a value into [`Bion`].
///
/// # Errors
///
/// Fails with [`Error::UnsupportedType`] if the value contains a shape BION cannot hold,
/// such as a `u128` or a map keyed by integers.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
/// use std::collections::HashMap;
///
/// assert_eq!(to_bion(&Some(3u8)).unwrap(), Bion::from(3));
///
/// let mut by_id = HashMap::new();
/// by_id.insert(7, "seven");
///
/// assert!(to_bion(&by_id).is_err());
/// ```
pub fn to_bion<T: Serialize + ?Sized>(value: &T) -> Result<Bion, Error> {
    value.serialize(ser::BionSerializer).map_err(|e| {
        debug!("to_bion failed: {}", e);
        Error::from(e)
    })
}

/// Converts [`Bion`] into a value.
///
/// # Errors
///
/// Fails with [`Error::Conversion`] if `value` does not have the shape `T` expects.
pub fn from_bion<T: DeserializeOwned>(value: Bion) -> Result<T, Error> {
    T::deserialize(de::BionDeserializer(value)).map_err(|e| {
        debug!("from_bion failed: {}", e);
        Error::from(e)
    })
}

/// Converts a value into [`Bion`] and encodes it.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    encode_full(&to_bion(value)?)
}

/// Decodes a bytestring and converts the result into a value.
pub fn from_slice<T: DeserializeOwned>(bs: &[u8]) -> Result<T, Error> {
    from_bion(decode_full(bs)?)
}

/// The error type `serde` sees while converting.
#[derive(Debug)]
pub(crate) enum RepError {
    Unsupported(String),
    Message(String),
}

impl RepError {
    fn unsupported<S: Into<String>>(type_name: S) -> Self { RepError::Unsupported(type_name.into()) }
}

impl fmt::Display for RepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepError::Unsupported(t) => write!(f, "type `{}` cannot be represented", t),
            RepError::Message(m) => f.write_str(m),
        }
    }
}

impl std::error::Error for RepError {}

impl serde::ser::Error for RepError {
    fn custom<T: fmt::Display>(msg: T) -> Self { RepError::Message(msg.to_string()) }
}

impl serde::de::Error for RepError {
    fn custom<T: fmt::Display>(msg: T) -> Self { RepError::Message(msg.to_string()) }
}

impl From<RepError> for Error {
    fn from(e: RepError) -> Error {
        match e {
            RepError::Unsupported(type_name) => Error::UnsupportedType { type_name },
            RepError::Message(m) => Error::Conversion(m),
        }
    }
}

/// How a number is presented to `serde`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl Numeric {
    /// Integral values that fit a `u64` or an `i64` are presented as integers, so that
    /// integer fields can be read back.
    fn of(n: f64) -> Numeric {
        if n.fract() != 0.0 {
            Numeric::Float(n)
        } else if n >= 0.0 && n < U64_BOUND {
            Numeric::Unsigned(n as u64)
        } else if n < 0.0 && n >= -I64_BOUND {
            Numeric::Signed(n as i64)
        } else {
            Numeric::Float(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_classes() {
        assert_eq!(Numeric::of(0.0), Numeric::Unsigned(0));
        assert_eq!(Numeric::of(-0.0), Numeric::Unsigned(0));
        assert_eq!(Numeric::of(-1.0), Numeric::Signed(-1));
        assert_eq!(Numeric::of(0.5), Numeric::Float(0.5));
        assert_eq!(Numeric::of(U64_BOUND), Numeric::Float(U64_BOUND));
        assert_eq!(Numeric::of(-I64_BOUND), Numeric::Signed(i64::MIN));
        assert_eq!(
            Numeric::of(f64::INFINITY),
            Numeric::Float(f64::INFINITY)
        );
        assert!(match Numeric::of(f64::NAN) {
            Numeric::Float(n) => n.is_nan(),
            _ => false,
        });
    }

    #[test]
    fn errors_map_to_kinds() {
        assert_eq!(
            Error::from(RepError::unsupported("u128")),
            Error::UnsupportedType {
                type_name: "u128".to_string()
            }
        );
        assert_eq!(
            Error::from(RepError::Message("bad".to_string())),
            Error::Conversion("bad".to_string())
        );
    }
}
