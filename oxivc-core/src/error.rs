//! Error types for OxiVC decode operations.
//!
//! Every decoder reports one of a small, closed set of failures. A failed
//! decode never returns partial output; the caller gets the error only.

use thiserror::Error;

/// The main error type for OxiVC decode operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VcError {
    /// Unrecognized tag, type byte, or header variant.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// Description of the tag or type that was not recognized.
        format: String,
    },

    /// Input ran out before the decoder was done with it.
    #[error("Truncated input at byte {offset}: needed {needed} more")]
    TruncatedInput {
        /// Byte offset (relative to the slice being read) where input ran out.
        offset: usize,
        /// Number of bytes that were still required.
        needed: usize,
    },

    /// Back-reference reaching before the start of the output, or a table
    /// walk that stopped making progress.
    #[error("Invalid back-reference at output position {position}: {message}")]
    InvalidBackreference {
        /// Output cursor at the time of the failure.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// Structurally invalid Huffman table.
    #[error("Corrupt Huffman table: {message}")]
    HuffmanTableCorrupt {
        /// Description of the problem.
        message: String,
    },

    /// Decoded byte count does not match the declared length.
    #[error("Length mismatch: declared {expected} bytes, decoded {actual}")]
    LengthMismatch {
        /// Declared uncompressed length.
        expected: usize,
        /// Number of bytes the stream actually produced (or tried to).
        actual: usize,
    },

    /// Declared length exceeds the configured output limit.
    #[error("Declared output of {declared} bytes exceeds limit of {limit} bytes")]
    OutputTooLarge {
        /// Declared uncompressed length.
        declared: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Result type alias for OxiVC operations.
pub type Result<T> = std::result::Result<T, VcError>;

impl VcError {
    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedInput { offset, needed }
    }

    /// Create an invalid back-reference error for a distance that reaches
    /// before the start of the output.
    pub fn invalid_backreference(distance: usize, position: usize) -> Self {
        Self::InvalidBackreference {
            position,
            message: format!("distance {} exceeds decoded history", distance),
        }
    }

    /// Create an error for a table walk that failed to advance.
    pub fn decode_loop(node: usize, position: usize) -> Self {
        Self::InvalidBackreference {
            position,
            message: format!("decode loop at table node {}", node),
        }
    }

    /// Create a corrupt Huffman table error.
    pub fn huffman_corrupt(message: impl Into<String>) -> Self {
        Self::HuffmanTableCorrupt {
            message: message.into(),
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an output limit error.
    pub fn output_too_large(declared: usize, limit: usize) -> Self {
        Self::OutputTooLarge { declared, limit }
    }
}
