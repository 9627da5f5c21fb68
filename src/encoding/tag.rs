//! The tag registry.
//!
//! Every encoded value starts with one tag byte. The high nibble names the type, and for
//! strings, arrays and objects the low nibble names the [`Size`] tier of the length field
//! that follows.

use super::constants::*;
use crate::errors::Error;
use std::convert::TryFrom;

/// Width tier of a string, array or object length field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    /// No length field, the length is zero.
    Empty,
    /// 8-bit length.
    Short,
    /// 16-bit length.
    Medium,
    /// 32-bit length.
    Long,
}

impl Size {
    /// Picks the narrowest tier that holds `len`.
    ///
    /// # Example
    ///
    /// ```
    /// use bion::encoding::tag::Size;
    ///
    /// assert_eq!(Size::for_len(0), Size::Empty);
    /// assert_eq!(Size::for_len(255), Size::Short);
    /// assert_eq!(Size::for_len(300), Size::Medium);
    /// assert_eq!(Size::for_len(65536), Size::Long);
    /// ```
    pub fn for_len(len: usize) -> Size {
        if len == 0 {
            Size::Empty
        } else if len < SHORT_LIMIT {
            Size::Short
        } else if len < MEDIUM_LIMIT {
            Size::Medium
        } else {
            Size::Long
        }
    }

    /// Width in bytes of the length field for this tier.
    pub fn width(self) -> usize {
        match self {
            Size::Empty => 0,
            Size::Short => 1,
            Size::Medium => 2,
            Size::Long => 4,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Size::Empty => 0,
            Size::Short => 1,
            Size::Medium => 2,
            Size::Long => 3,
        }
    }

    fn from_bits(bits: u8) -> Option<Size> {
        match bits {
            0 => Some(Size::Empty),
            1 => Some(Size::Short),
            2 => Some(Size::Medium),
            3 => Some(Size::Long),
            _ => None,
        }
    }
}

/// BION tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Null,
    False,
    True,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float64,
    /// String tag.
    Str(Size),
    /// Array tag.
    Array(Size),
    /// Object tag.
    Object(Size),
}

impl Tag {
    /// The byte this tag is written as.
    ///
    /// # Example
    ///
    /// ```
    /// use bion::encoding::tag::{Size, Tag};
    ///
    /// assert_eq!(Tag::Uint8.byte(), 0x34);
    /// assert_eq!(Tag::Str(Size::Medium).byte(), 0x42);
    /// ```
    pub fn byte(self) -> u8 {
        match self {
            Tag::Undefined => TAG_UNDEFINED,
            Tag::Null => TAG_NULL,
            Tag::False => TAG_FALSE,
            Tag::True => TAG_TRUE,
            Tag::Int8 => TAG_INT8,
            Tag::Int16 => TAG_INT16,
            Tag::Int32 => TAG_INT32,
            Tag::Int64 => TAG_INT64,
            Tag::Uint8 => TAG_UINT8,
            Tag::Uint16 => TAG_UINT16,
            Tag::Uint32 => TAG_UINT32,
            Tag::Uint64 => TAG_UINT64,
            Tag::Float64 => TAG_FLOAT64,
            Tag::Str(size) => TYPE_STR | size.bits(),
            Tag::Array(size) => TYPE_ARR | size.bits(),
            Tag::Object(size) => TYPE_OBJ | size.bits(),
        }
    }

    /// Size tier of a string, array or object tag.
    pub fn size(self) -> Option<Size> {
        match self {
            Tag::Str(size) | Tag::Array(size) | Tag::Object(size) => Some(size),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Tag, u8> {
        let tag = match byte {
            TAG_UNDEFINED => Tag::Undefined,
            TAG_NULL => Tag::Null,
            TAG_FALSE => Tag::False,
            TAG_TRUE => Tag::True,
            TAG_INT8 => Tag::Int8,
            TAG_INT16 => Tag::Int16,
            TAG_INT32 => Tag::Int32,
            TAG_INT64 => Tag::Int64,
            TAG_UINT8 => Tag::Uint8,
            TAG_UINT16 => Tag::Uint16,
            TAG_UINT32 => Tag::Uint32,
            TAG_UINT64 => Tag::Uint64,
            TAG_FLOAT64 => Tag::Float64,
            _ => {
                let size = Size::from_bits(byte & MASK_SIZE).ok_or(byte)?;
                match byte & MASK_TYPE {
                    TYPE_STR => Tag::Str(size),
                    TYPE_ARR => Tag::Array(size),
                    TYPE_OBJ => Tag::Object(size),
                    _ => return Err(byte),
                }
            }
        };
        Ok(tag)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 { tag.byte() }
}

/// Reads the tag at the start of `data`.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if `data` is empty and [`Error::InvalidTag`] if the first
/// byte is not in the registry.
///
/// # Example
///
/// ```
/// use bion::encoding::tag::{parse_tag, Tag};
///
/// assert_eq!(parse_tag(&[0x21, 0xff]).unwrap(), Tag::True);
/// assert!(parse_tag(&[0x99]).is_err());
/// ```
pub fn parse_tag(data: &[u8]) -> Result<Tag, Error> {
    match data.first() {
        None => Err(Error::Truncated {
            offset: 0,
            needed: 1,
            available: 0,
        }),
        Some(&byte) => Tag::try_from(byte).map_err(|tag| Error::InvalidTag { tag, offset: 0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_byte_round_trips() {
        let registered: Vec<u8> = (0..=255u8).filter(|b| Tag::try_from(*b).is_ok()).collect();

        assert_eq!(
            registered,
            vec![
                0x00, 0x10, 0x20, 0x21, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38,
                0x40, 0x41, 0x42, 0x43, 0x50, 0x51, 0x52, 0x53, 0x60, 0x61, 0x62, 0x63,
            ]
        );

        for byte in registered {
            assert_eq!(Tag::try_from(byte).map(Tag::byte), Ok(byte));
        }
    }

    #[test]
    fn unregistered_bytes() {
        for byte in &[0x01, 0x11, 0x22, 0x39, 0x3f, 0x44, 0x54, 0x64, 0x70, 0x99, 0xff] {
            assert_eq!(Tag::try_from(*byte), Err(*byte));
        }
    }

    #[test]
    fn parse_empty_and_invalid() {
        assert_eq!(
            parse_tag(&[]),
            Err(Error::Truncated {
                offset: 0,
                needed: 1,
                available: 0
            })
        );
        assert_eq!(
            parse_tag(&[0x99, 0x00]),
            Err(Error::InvalidTag {
                tag: 0x99,
                offset: 0
            })
        );
    }

    #[test]
    fn size_tiers() {
        assert_eq!(Size::for_len(1), Size::Short);
        assert_eq!(Size::for_len(256), Size::Medium);
        assert_eq!(Size::for_len(65535), Size::Medium);
        assert_eq!(Size::for_len(1 << 20), Size::Long);
        assert_eq!(Size::Medium.width(), 2);
        assert_eq!(Size::Long.width(), 4);
        assert_eq!(u8::from(Tag::Object(Size::Empty)), 0x60);

        assert_eq!(Tag::Array(Size::Long).size(), Some(Size::Long));
        assert_eq!(Tag::Float64.size(), None);
    }
}
