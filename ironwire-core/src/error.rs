/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Error types for FIX message decoding.
//!
//! A field whose tag does not match the schema position is *not* an error;
//! the field codec reports it as absent and the caller moves on. The variants
//! here cover genuinely malformed input: bad digits, a value that never
//! terminates, capacity violations driven by the wire, and repeating-group
//! count problems.

use thiserror::Error;

/// Errors that occur while decoding FIX tag/value data.
///
/// A message that produces any of these is considered malformed as a whole;
/// the caller is expected to discard it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field value was not terminated by SOH before the buffer ended.
    #[error("missing field separator (SOH)")]
    MissingSeparator,

    /// A numeric field value contained something other than an optional
    /// leading minus sign and decimal digits.
    #[error("invalid digits in value for tag {tag}")]
    BadDigits {
        /// The tag number of the offending field.
        tag: u32,
    },

    /// A wire value exceeded the fixed capacity of its field.
    #[error("value too long for tag {tag}: {len} bytes exceeds capacity {cap}")]
    ValueTooLong {
        /// The tag number of the offending field.
        tag: u32,
        /// Length of the value on the wire.
        len: usize,
        /// Declared capacity of the field.
        cap: usize,
    },

    /// A timestamp field value did not match the FIX UTC timestamp grammar.
    #[error("invalid timestamp in value for tag {tag}")]
    BadTimestamp {
        /// The tag number of the offending field.
        tag: u32,
    },

    /// The checksum field value was not exactly three decimal digits.
    #[error("invalid checksum digits")]
    BadChecksum,

    /// A repeating group was parsed without a preceding count field.
    #[error("repeating group count missing")]
    CountMissing,

    /// A repeating group count exceeded the fixed capacity of its container.
    #[error("repeating group count {count} exceeds capacity {cap}")]
    CountOverflow {
        /// Count read from the wire.
        count: usize,
        /// Capacity of the fixed container.
        cap: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ValueTooLong {
            tag: 49,
            len: 40,
            cap: 32,
        };
        assert_eq!(
            err.to_string(),
            "value too long for tag 49: 40 bytes exceeds capacity 32"
        );
    }

    #[test]
    fn test_count_overflow_display() {
        let err = DecodeError::CountOverflow { count: 5, cap: 3 };
        assert_eq!(
            err.to_string(),
            "repeating group count 5 exceeds capacity 3"
        );
    }
}
