pub use crate::{
    encoding::{
        decode, decode_bytes, decode_full, decode_with_config, encode, encode_full, BionBytes,
        DecodeConfig, Ser, Serializer, SerializerExt,
    },
    errors::Error,
    rep::{from_bion, from_slice, to_bion, to_vec},
    vecmap::VecMap,
    Bion,
};
pub use bytes::{Bytes, BytesMut};
pub use std::convert::TryFrom;
