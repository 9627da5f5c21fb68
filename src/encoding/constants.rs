/// `Undefined`, 0x00
pub(crate) const TAG_UNDEFINED: u8 = 0x00;
/// `Null`, 0x10
pub(crate) const TAG_NULL: u8 = 0x10;
/// `false`, 0x20
pub(crate) const TAG_FALSE: u8 = 0x20;
/// `true`, 0x21
pub(crate) const TAG_TRUE: u8 = 0x21;

/// Signed integer tags, 8 to 64 bits.
pub(crate) const TAG_INT8: u8 = 0x30;
pub(crate) const TAG_INT16: u8 = 0x31;
pub(crate) const TAG_INT32: u8 = 0x32;
pub(crate) const TAG_INT64: u8 = 0x33;
/// Unsigned integer tags, 8 to 64 bits.
pub(crate) const TAG_UINT8: u8 = 0x34;
pub(crate) const TAG_UINT16: u8 = 0x35;
pub(crate) const TAG_UINT32: u8 = 0x36;
pub(crate) const TAG_UINT64: u8 = 0x37;
/// Double precision float, 0x38
pub(crate) const TAG_FLOAT64: u8 = 0x38;

/// String type bits, 0x40
pub(crate) const TYPE_STR: u8 = 0x40;
/// Array type bits, 0x50
pub(crate) const TYPE_ARR: u8 = 0x50;
/// Object type bits, 0x60
pub(crate) const TYPE_OBJ: u8 = 0x60;
/// Low nibble of a string, array or object tag: the size tier.
pub(crate) const MASK_SIZE: u8 = 0x0f;
/// High nibble of a tag: the type.
pub(crate) const MASK_TYPE: u8 = 0xf0;

/// Exclusive upper bound of a short (8-bit) length.
pub(crate) const SHORT_LIMIT: usize = 1 << 8;
/// Exclusive upper bound of a medium (16-bit) length.
pub(crate) const MEDIUM_LIMIT: usize = 1 << 16;

/// Exclusive upper bound of `Uint8`.
pub(crate) const UINT8_LIMIT: i64 = 1 << 8;
/// Exclusive upper bound of `Uint16`.
pub(crate) const UINT16_LIMIT: i64 = 1 << 16;
/// Exclusive upper bound of `Uint32`. This is `2^24`, not `2^32`; values in
/// `[2^24, 2^32)` are written as `Uint64`.
pub(crate) const UINT32_LIMIT: i64 = 1 << 24;

/// Default limit on array/object nesting when decoding.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 128;

/// `2^63`. Integral numbers in `[-2^63, 2^63)` take the integer encodings.
pub(crate) const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
