//! Library error type.

use thiserror::Error;

/// Failure surfaced by the byte-cursor API.
///
/// Malformed-but-common conditions (missing SOI signature, no Exif segment,
/// unusable GPS tags) are not errors: the parsing entry points degrade their
/// result value instead. An `OutOfRange` means a read or a computed offset
/// would pass the end of the buffer, which indicates truncated input or an
/// offset bug, and is never silently clamped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A read of `len` bytes at `offset` would exceed a buffer of `buffer_len` bytes.
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {buffer_len} bytes")]
    OutOfRange {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },
}
