//! # BION binary encoder and decoder
//!
//! Encode and decode functions for BION.
//!
//! # Example
//!
//! ```
//! use bion::prelude::*;
//!
//! // a value holding some data
//! let some_data: Bion = vec![("x", Bion::from(1)), ("y", Bion::from(-2))]
//!     .into_iter()
//!     .collect();
//!
//! // and we've encoded it
//! let enc_full = encode_full(&some_data).unwrap();
//!
//! // let's encode it a different way too
//!
//! // create a buffer
//! let out = &mut Vec::new();
//!
//! // and we've encoded it a different way
//! encode(&some_data, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc_full);
//!
//! // Note: decoding returns a `Result`
//! let dec: Bion = decode_full(&enc_full).unwrap();
//!
//! // success!
//! assert_eq!(dec, some_data);
//! ```

use crate::{errors::Error, Bion};
use bytes::Bytes;
use log::{debug, trace};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub mod tag;
pub use tag::{parse_tag, Size, Tag};
pub(crate) mod constants;
use constants::*;

/// Decoder settings.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// let config = DecodeConfig::new().with_max_depth(2);
///
/// // [[[]]] nests three deep
/// let enc: &'static [u8] = &[0x51, 0x01, 0x51, 0x01, 0x50];
///
/// assert!(decode_with_config(Bytes::from_static(enc), &config).is_err());
/// assert!(decode_full(enc).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Arrays and objects nested deeper than this are rejected with
    /// [`Error::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    /// The default configuration, with a nesting limit of 128.
    pub fn new() -> Self { Self::default() }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Encode a value into its binary representation, appending the output to `out`.
///
/// If encoding fails, `out` is truncated back to its original length.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
/// * `out: &mut Vec<u8>` - A mutable reference to the buffer where the encoder output will
///   be stored.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
/// // value to encode
/// let b = Bion::Null;
///
/// // encode value
/// encode(&b, out).unwrap();
///
/// assert_eq!(*out, vec![0x10]);
/// ```
pub fn encode<T: Ser>(t: T, out: &mut Vec<u8>) -> Result<(), Error> {
    let start = out.len();
    t.ser(out).map_err(|e| {
        out.truncate(start);
        e
    })
}

/// Decodes exactly one value from the front of `data`.
///
/// Bytes after the value are left in `data`. On failure the cursor is restored to where it
/// was before the call.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// // encoded value
/// let data = &mut BionBytes::new(Bytes::from(encode_full(&Bion::Null).unwrap()));
///
/// // Did the decoding succeed?
/// let dec: Bion = match decode(data) {
///     Ok(value) => value,
///     Err(_e) => panic!("Oh no. Whatever will I do?"),
/// };
///
/// // should be equal
/// assert_eq!(dec, Bion::Null);
/// ```
pub fn decode(data: &mut BionBytes) -> Result<Bion, Error> {
    let checkpoint = data.clone();
    data.read_value().map_err(|e| {
        *data = checkpoint;
        e
    })
}

/// Encodes a value into a vector of bytes.
///
/// # Errors
///
/// Fails with [`Error::LengthOverflow`] if a string, array or object is too long for a
/// 32-bit length field.
///
/// # Example
///
/// ```
/// use bion::prelude::*;
///
/// // encoded value
/// let enc: Vec<u8> = encode_full(&Bion::from("hi")).unwrap();
///
/// assert_eq!(enc, vec![0x41, 0x02, b'h', b'i']);
/// ```
pub fn encode_full<T: Ser>(t: T) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    t.ser(&mut out)?;
    trace!("encode_full: wrote {} bytes", out.len());
    Ok(out)
}

/// Decodes a bytestring holding exactly one value.
///
/// The input is copied once into a [`Bytes`]; use [`decode_bytes`] to avoid that.
///
/// # Arguments
///
/// * `bs` - The bytestring to be decoded.
///
/// # Example
///
/// ```
/// use bion::{prelude::*, Bion::Null};
///
/// // encoded value
/// let bs = encode_full(&Null).unwrap();
///
/// // decode value
/// let dec: Result<Bion, Error> = decode_full(&bs);
///
/// assert_eq!(dec, Ok(Null));
/// ```
pub fn decode_full(bs: &[u8]) -> Result<Bion, Error> {
    decode_bytes(Bytes::copy_from_slice(bs))
}

/// Decodes a [`Bytes`] holding exactly one value, with the default [`DecodeConfig`].
///
/// Strings in the result share memory with `bs`.
pub fn decode_bytes(bs: Bytes) -> Result<Bion, Error> {
    decode_with_config(bs, &DecodeConfig::default())
}

/// Decodes a [`Bytes`] holding exactly one value.
///
/// # Errors
///
/// Fails with [`Error::TrailingData`] if anything is left after the value, and with any
/// of the malformed-input errors if the value itself is bad.
pub fn decode_with_config(bs: Bytes, config: &DecodeConfig) -> Result<Bion, Error> {
    let data = &mut BionBytes::with_config(bs, config);

    let value = decode(data).map_err(|e| {
        debug!("decode failed: {}", e);
        e
    })?;

    if data.remaining() != 0 {
        let err = Error::TrailingData {
            offset: data.offset(),
            remaining: data.remaining(),
        };
        debug!("decode failed: {}", err);
        return Err(err);
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vecmap::VecMap, Bion::*};
    use bytes::BytesMut;

    fn enc(b: &Bion) -> Vec<u8> { encode_full(b).unwrap() }

    #[test]
    fn constants() {
        assert_eq!(enc(&Undefined), vec![TAG_UNDEFINED]);
        assert_eq!(enc(&Null), vec![TAG_NULL]);
        assert_eq!(enc(&Bool(true)), vec![TAG_TRUE]);
        assert_eq!(enc(&Bool(false)), vec![TAG_FALSE]);
    }

    #[test]
    fn int_widths_unsigned() {
        assert_eq!(enc(&Bion::from(0)), vec![TAG_UINT8, 0]);
        assert_eq!(enc(&Bion::from(255)), vec![TAG_UINT8, 0xff]);
        assert_eq!(enc(&Bion::from(256)), vec![TAG_UINT16, 0x01, 0x00]);
        assert_eq!(enc(&Bion::from(65_535)), vec![TAG_UINT16, 0xff, 0xff]);
        assert_eq!(
            enc(&Bion::from(65_536)),
            vec![TAG_UINT32, 0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            enc(&Bion::from(16_777_215)),
            vec![TAG_UINT32, 0x00, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn uint32_stops_at_2_24() {
        assert_eq!(
            enc(&Bion::from(16_777_216)),
            vec![TAG_UINT64, 0, 0, 0, 0, 0x01, 0, 0, 0]
        );
        assert_eq!(
            enc(&Bion::from(u32::MAX)),
            vec![TAG_UINT64, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn int_widths_signed() {
        assert_eq!(enc(&Bion::from(-1)), vec![TAG_INT8, 0xff]);
        assert_eq!(enc(&Bion::from(-128)), vec![TAG_INT8, 0x80]);
        assert_eq!(enc(&Bion::from(-129)), vec![TAG_INT16, 0xff, 0x7f]);
        assert_eq!(enc(&Bion::from(-32_769)), vec![
            TAG_INT32, 0xff, 0xff, 0x7f, 0xff
        ]);
        assert_eq!(enc(&Bion::from(-2_147_483_649i64)), vec![
            TAG_INT64, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff
        ]);
    }

    #[test]
    fn int_extremes() {
        assert_eq!(enc(&Bion::from(i64::MIN)), vec![
            TAG_INT64, 0x80, 0, 0, 0, 0, 0, 0, 0
        ]);

        // 2^63 does not fit an i64, so it is written as a double
        let out = enc(&Bion::from(9_223_372_036_854_775_808.0));
        assert_eq!(out[0], TAG_FLOAT64);
        assert_eq!(out.len(), 9);
    }

    #[test]
    fn floats() {
        assert_eq!(enc(&Bion::from(3.0)), vec![TAG_UINT8, 3]);
        assert_eq!(enc(&Bion::from(3.5)), vec![
            TAG_FLOAT64, 0x40, 0x0c, 0, 0, 0, 0, 0, 0
        ]);
        assert_eq!(enc(&Bion::from(-0.0)), vec![TAG_UINT8, 0]);

        let out = enc(&Bion::from(f64::NAN));
        assert_eq!(out[0], TAG_FLOAT64);
        assert!(decode_full(&out).unwrap().to_number().unwrap().is_nan());

        let out = enc(&Bion::from(f64::NEG_INFINITY));
        assert_eq!(out[0], TAG_FLOAT64);
        assert_eq!(decode_full(&out), Ok(Number(f64::NEG_INFINITY)));
    }

    #[test]
    fn strings() {
        assert_eq!(enc(&Bion::from("")), vec![0x40]);
        assert_eq!(enc(&Bion::from("w")), vec![0x41, 0x01, b'w']);

        let long = Bion::Str(Bytes::from(vec![b'w'; 300]));
        let out = enc(&long);

        // tag
        assert_eq!(out[0], 0x42);
        // length
        assert_eq!(out[1..3], [0x01, 0x2c]);
        // bytes
        assert_eq!(out[3..].to_vec(), vec![b'w'; 300]);

        let longer = Bion::Str(Bytes::from(vec![0; 70_000]));
        let out = enc(&longer);
        assert_eq!(out[..5], [0x43, 0x00, 0x01, 0x11, 0x70]);
        assert_eq!(decode_full(&out), Ok(longer));
    }

    #[test]
    fn arrays() {
        assert_eq!(enc(&Array(vec![])), vec![0x50]);
        assert_eq!(enc(&Bion::from(vec![0])), vec![0x51, 0x01, TAG_UINT8, 0]);

        let large_array = Bion::from(vec![0; 300]);
        let out = enc(&large_array);

        // tag
        assert_eq!(out[0], 0x52);
        // length
        assert_eq!(out[1..3], [0x01, 0x2c]);

        // element tags
        let out_tags: Vec<&u8> = out[3..].iter().step_by(2).collect();
        assert_eq!(out_tags, vec![&TAG_UINT8; 300]);

        let out_vals: Vec<&u8> = out[4..].iter().step_by(2).collect();
        assert_eq!(out_vals, vec![&0; 300]);
    }

    #[test]
    fn objects() {
        assert_eq!(enc(&Object(VecMap::new())), vec![0x60]);

        let obj: Bion = vec![("b", Bion::from("x")), ("a", Null)]
            .into_iter()
            .collect();

        // keys come out sorted
        assert_eq!(enc(&obj), vec![
            0x61, 0x02, 0x41, 0x01, b'a', TAG_NULL, 0x41, 0x01, b'b', 0x41, 0x01, b'x'
        ]);
    }

    #[test]
    fn collection_tiers() {
        let medium: Bion = (0..300).map(|i| (format!("k{:03}", i), i)).collect();
        let out = enc(&medium);
        assert_eq!(out[..3], [0x62, 0x01, 0x2c]);
        assert_eq!(decode_full(&out), Ok(medium));

        let long: Bion = (0..70_000).map(|i| (format!("k{:05}", i), i)).collect();
        let out = enc(&long);
        assert_eq!(out[..5], [0x63, 0x00, 0x01, 0x11, 0x70]);
        assert_eq!(decode_full(&out), Ok(long));

        let long = Bion::from((0..70_000).collect::<Vec<i32>>());
        let out = enc(&long);
        assert_eq!(out[..5], [0x53, 0x00, 0x01, 0x11, 0x70]);
        assert_eq!(decode_full(&out), Ok(long));
    }

    #[test]
    fn typed_values() {
        assert_eq!(encode_full(&-5i64).unwrap(), vec![TAG_INT8, 0xfb]);
        assert_eq!(encode_full("ab").unwrap(), vec![0x41, 0x02, b'a', b'b']);
        assert_eq!(encode_full(&vec![true, false]).unwrap(), vec![
            0x51, 0x02, TAG_TRUE, TAG_FALSE
        ]);
    }

    #[test]
    fn bytes_mut_sink() {
        let value = Bion::from(vec![Bion::from(1.5), Bion::from("s")]);

        let mut out = BytesMut::new();
        value.ser(&mut out).unwrap();

        assert_eq!(out.to_vec(), enc(&value));
    }

    #[test]
    fn encode_appends() {
        let out = &mut vec![0xaa];
        encode(&Null, out).unwrap();
        encode(&Bion::from(1), out).unwrap();

        assert_eq!(*out, vec![0xaa, TAG_NULL, TAG_UINT8, 1]);
    }

    #[test]
    fn header_overflow() {
        let mut out = Vec::new();
        assert_eq!(
            out.put_array_header(1 << 32),
            Err(Error::LengthOverflow { len: 1 << 32 })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn decode_signed_regression() {
        // back to back signed ints of every width inside one array
        let enc = [
            0x51, 0x05, // array of 5
            0x30, 0xff, // -1
            0x31, 0xfe, 0xff, // -257
            0x32, 0xff, 0xfe, 0xff, 0xff, // -65537
            0x33, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff, // -4294967297
            0x10, // null
        ];

        assert_eq!(
            decode_full(&enc),
            Ok(Array(vec![
                Number(-1.0),
                Number(-257.0),
                Number(-65_537.0),
                Number(-4_294_967_297.0),
                Null,
            ]))
        );
    }

    #[test]
    fn decode_widths() {
        assert_eq!(decode_full(&[0x36, 0xff, 0xff, 0xff, 0xff]), Ok(Number(4_294_967_295.0)));
        assert_eq!(decode_full(&[0x35, 0x01, 0x00]), Ok(Number(256.0)));
        assert_eq!(
            decode_full(&[0x37, 0, 0, 0, 0, 0, 0, 0, 0x02]),
            Ok(Number(2.0))
        );
        // non-canonical, but valid
        assert_eq!(decode_full(&[0x42, 0x00, 0x01, b'z']), Ok(Bion::from("z")));
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            decode_full(&[0x32, 0x01, 0x02]),
            Err(Error::Truncated {
                offset: 1,
                needed: 4,
                available: 2
            })
        );

        assert_eq!(
            decode_full(&[0x99]),
            Err(Error::InvalidTag {
                tag: 0x99,
                offset: 0
            })
        );

        assert_eq!(
            decode_full(&[0x51, 0x01, 0x44]),
            Err(Error::InvalidTag {
                tag: 0x44,
                offset: 2
            })
        );

        assert_eq!(
            decode_full(&[TAG_TRUE, 0x00]),
            Err(Error::TrailingData {
                offset: 1,
                remaining: 1
            })
        );

        assert_eq!(
            decode_full(&[]),
            Err(Error::Truncated {
                offset: 0,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn decode_rejects_non_string_key() {
        let err = decode_full(&[0x61, 0x01, 0x10, 0x10]).unwrap_err();

        assert_eq!(err, Error::InvalidKey {
            tag: TAG_NULL,
            offset: 2
        });
        assert!(err.is_malformed());
    }

    #[test]
    fn depth_guard() {
        let nested = |depth: usize| {
            let mut v = Array(vec![]);
            for _ in 1..depth {
                v = Array(vec![v]);
            }
            enc(&v)
        };

        assert!(decode_full(&nested(DEFAULT_MAX_DEPTH)).is_ok());
        assert_eq!(
            decode_full(&nested(DEFAULT_MAX_DEPTH + 1)),
            Err(Error::DepthExceeded {
                max_depth: DEFAULT_MAX_DEPTH,
                offset: 2 * DEFAULT_MAX_DEPTH
            })
        );

        // far past any stack limit, still an error
        let mut deep = vec![0x51, 0x01].repeat(100_000);
        deep.push(0x50);
        assert!(matches!(
            decode_full(&deep),
            Err(Error::DepthExceeded { .. })
        ));
    }

    #[test]
    fn decode_restores_cursor_on_failure() {
        let data = &mut BionBytes::new(Bytes::from_static(&[0x10, 0x51, 0x02, 0x10]));

        assert_eq!(decode(data), Ok(Null));
        assert_eq!(data.offset(), 1);

        assert!(decode(data).is_err());
        assert_eq!(data.offset(), 1);
        assert_eq!(data.remaining(), 3);
    }

    #[test]
    fn duplicate_keys_keep_last() {
        let enc = [
            0x61, 0x02, 0x41, 0x01, b'k', 0x34, 0x01, 0x41, 0x01, b'k', 0x34, 0x02,
        ];

        let obj = decode_full(&enc).unwrap();
        assert_eq!(obj.to_vecmap().unwrap().len(), 1);
        assert_eq!(obj.get("k"), Some(&Number(2.0)));
    }
}
