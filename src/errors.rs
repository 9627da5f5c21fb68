use failure::Fail;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
/// An error encountered while encoding, decoding or converting [`Bion`](crate::Bion).
pub enum Error {
    /// A byte that is not in the tag registry was found where a tag was expected.
    #[fail(display = "invalid tag 0x{:02x} at offset {}", tag, offset)]
    InvalidTag {
        /// The offending byte.
        tag: u8,
        /// Position of the byte in the input.
        offset: usize,
    },

    /// A field declared more bytes than the input has left.
    #[fail(
        display = "truncated input at offset {}: needed {} bytes, {} available",
        offset, needed, available
    )]
    Truncated {
        /// Position where the read was attempted.
        offset: usize,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// A complete top-level value was decoded but input remains.
    #[fail(
        display = "{} trailing bytes after value ending at offset {}",
        remaining, offset
    )]
    TrailingData {
        /// Position just after the decoded value.
        offset: usize,
        /// Bytes left unconsumed.
        remaining: usize,
    },

    /// An object key was not tagged as a string.
    #[fail(display = "object key at offset {} has non-string tag 0x{:02x}", offset, tag)]
    InvalidKey {
        /// The tag found in key position.
        tag: u8,
        /// Position of the tag in the input.
        offset: usize,
    },

    /// Arrays or objects were nested deeper than the configured limit.
    #[fail(display = "nesting deeper than {} at offset {}", max_depth, offset)]
    DepthExceeded {
        /// The configured limit.
        max_depth: usize,
        /// Position of the collection tag that crossed the limit.
        offset: usize,
    },

    /// A value has no representation in the value model.
    #[fail(display = "type `{}` cannot be represented", type_name)]
    UnsupportedType {
        /// Name of the rejected type or shape.
        type_name: String,
    },

    /// A string, array or object is too long for a 32-bit length field.
    #[fail(display = "length {} does not fit in a 32-bit length field", len)]
    LengthOverflow {
        /// The length that was rejected.
        len: usize,
    },

    /// A decoded value could not be converted into the requested type.
    #[fail(display = "conversion failed: {}", _0)]
    Conversion(String),
}

impl Error {
    /// Indicates whether the error describes structurally invalid input.
    ///
    /// # Example
    ///
    /// ```
    /// use bion::prelude::*;
    ///
    /// let err = decode_full(&[0x99]).unwrap_err();
    ///
    /// assert!(err.is_malformed());
    /// ```
    pub fn is_malformed(&self) -> bool {
        match self {
            Error::InvalidTag { .. }
            | Error::Truncated { .. }
            | Error::TrailingData { .. }
            | Error::InvalidKey { .. }
            | Error::DepthExceeded { .. } => true,
            Error::UnsupportedType { .. } | Error::LengthOverflow { .. } | Error::Conversion(_) => {
                false
            }
        }
    }
}
