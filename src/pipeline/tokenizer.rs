//! Delimiter-based tokenizer with carry-over between reads
//!
//! A serial device hands us bytes in whatever chunk sizes the driver feels
//! like, so a reading such as `"12.5\n"` may arrive as `"1"`, `"2.5"`, `"\n"`.
//! The tokenizer keeps the unterminated tail of the stream in a carry-over
//! buffer and only emits a token once its closing delimiter has been seen.
//!
//! Work is done on raw bytes. A multi-byte UTF-8 character split across two
//! reads is reassembled before anyone tries to decode it.

use crate::error::{Result, SerialVisError};

/// Splits a fragmented byte stream into delimiter-terminated tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiter: Vec<u8>,
    /// Bytes since the last delimiter; at most one partial token
    carry: Vec<u8>,
}

impl Tokenizer {
    /// Create a tokenizer for the given delimiter
    ///
    /// Returns a configuration error for an empty delimiter.
    pub fn new(delimiter: impl AsRef<[u8]>) -> Result<Self> {
        let delimiter = delimiter.as_ref().to_vec();
        if delimiter.is_empty() {
            return Err(SerialVisError::Config(
                "delimiter must not be empty".to_string(),
            ));
        }
        Ok(Self {
            delimiter,
            carry: Vec::new(),
        })
    }

    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    /// Append a chunk and return every token it completes, in stream order
    ///
    /// The trailing piece after the last delimiter (possibly empty) stays in
    /// the carry-over buffer for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        // A delimiter may straddle the old carry and the new chunk, so the
        // search restarts just far enough back to catch it.
        let rescan_from = self
            .carry
            .len()
            .saturating_sub(self.delimiter.len() - 1);
        self.carry.extend_from_slice(chunk);

        let mut tokens = Vec::new();
        let mut token_start = 0;
        let mut search_from = rescan_from;

        while let Some(offset) = find(&self.carry[search_from..], &self.delimiter) {
            let delim_at = search_from + offset;
            tokens.push(self.carry[token_start..delim_at].to_vec());
            token_start = delim_at + self.delimiter.len();
            search_from = token_start;
        }

        if token_start > 0 {
            self.carry.drain(..token_start);
        }
        tokens
    }

    /// The unterminated tail held for the next `feed`
    pub fn remainder(&self) -> &[u8] {
        &self.carry
    }

    /// Drop any partial token
    pub fn clear(&mut self) {
        self.carry.clear();
    }
}

/// Position of the first exact occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
