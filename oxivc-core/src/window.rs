//! Output buffer (sliding window) for back-reference decompression.
//!
//! Every format handled by OxiVC declares its uncompressed length up front, so
//! the whole output is allocated once and doubles as the history window.
//! Back-references address already written bytes by distance from the write
//! cursor.
//!
//! # Invariants
//!
//! - The write cursor only moves forward and never passes the declared length;
//!   a token that would overrun is [`VcError::LengthMismatch`].
//! - A back-reference distance is in `1..=cursor`, otherwise
//!   [`VcError::InvalidBackreference`].
//! - Overlapping copies run byte by byte in cursor order, so a short distance
//!   repeats a pattern.
//! - A declared length above the window's limit is refused before anything
//!   is allocated ([`VcError::OutputTooLarge`]).

use crate::error::{Result, VcError};

/// Default cap on a declared output length (256 MiB).
pub const DEFAULT_MAX_OUTPUT_LEN: usize = 256 * 1024 * 1024;

/// A decoded LZ token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal byte.
    Literal(u8),
    /// A reference to previously decoded data.
    Backref {
        /// Number of bytes to copy.
        length: usize,
        /// Distance back from the write cursor.
        distance: usize,
    },
}

/// Preallocated output buffer with a forward-only write cursor.
#[derive(Debug, Clone)]
pub struct OutputWindow {
    /// Output bytes, sized to the declared length.
    buffer: Vec<u8>,
    /// Next byte will be written here.
    cursor: usize,
}

impl OutputWindow {
    /// Create a window for `declared_len` output bytes.
    pub fn new(declared_len: usize) -> Self {
        Self {
            buffer: vec![0; declared_len],
            cursor: 0,
        }
    }

    /// Create a window, refusing declared lengths above `limit`.
    pub fn with_limit(declared_len: usize, limit: usize) -> Result<Self> {
        if declared_len > limit {
            return Err(VcError::output_too_large(declared_len, limit));
        }
        Ok(Self::new(declared_len))
    }

    /// Declared output length.
    pub fn declared_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes still to be written.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Whether the declared length has been reached.
    pub fn is_full(&self) -> bool {
        self.cursor == self.buffer.len()
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    /// Append a literal byte.
    #[inline]
    pub fn push_literal(&mut self, byte: u8) -> Result<()> {
        if self.is_full() {
            return Err(VcError::length_mismatch(
                self.buffer.len(),
                self.cursor + 1,
            ));
        }
        self.buffer[self.cursor] = byte;
        self.cursor += 1;
        Ok(())
    }

    /// Append raw bytes verbatim.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.cursor + bytes.len();
        if end > self.buffer.len() {
            return Err(VcError::length_mismatch(self.buffer.len(), end));
        }
        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    /// Copy `length` bytes starting `distance` bytes before the cursor.
    pub fn copy_backref(&mut self, length: usize, distance: usize) -> Result<()> {
        if distance == 0 || distance > self.cursor {
            return Err(VcError::invalid_backreference(distance, self.cursor));
        }
        let end = self.cursor + length;
        if end > self.buffer.len() {
            return Err(VcError::length_mismatch(self.buffer.len(), end));
        }

        // Source and destination may overlap: copy in cursor order.
        let mut src = self.cursor - distance;
        for dst in self.cursor..end {
            self.buffer[dst] = self.buffer[src];
            src += 1;
        }
        self.cursor = end;
        Ok(())
    }

    /// Apply a decoded token.
    pub fn apply(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(byte) => self.push_literal(byte),
            Token::Backref { length, distance } => self.copy_backref(length, distance),
        }
    }

    /// Consume the window, returning the output if it is complete.
    pub fn finish(self) -> Result<Vec<u8>> {
        if !self.is_full() {
            return Err(VcError::length_mismatch(self.buffer.len(), self.cursor));
        }
        Ok(self.buffer)
    }
}
