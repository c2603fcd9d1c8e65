use thiserror::Error;

/// Errors surfaced while decoding or encoding on-chain account data.
///
/// Every variant is deterministic in the input bytes and is reported to the
/// immediate caller. Batch-decoding layers may choose to skip a record that
/// failed to decode, but nothing in this crate swallows an error or
/// substitutes a default value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before the field being read was complete.
    #[error("buffer underrun: needed {needed} more byte(s), {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },

    /// A length-prefixed string field did not hold valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// A leading discriminant byte matched none of the known record shapes.
    #[error("unknown variant discriminant {0}")]
    UnknownVariant(u8),

    /// Edition-marker bit index or Merkle leaf index outside valid bounds.
    #[error("index out of range")]
    IndexOutOfRange,

    /// The bytes contradict the declared schema (e.g. an option presence
    /// byte that is neither 0 nor 1). Indicates a corrupt account or a
    /// programming error rather than ordinary bad input.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(&'static str),
}
