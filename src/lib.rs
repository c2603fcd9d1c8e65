//! Client-side codec for the storefront family of on-chain programs
//! (auction, token vault, token metadata, auction manager, NFT packs).
//!
//! The programs store their accounts in a compact binary convention:
//! little-endian integers, u32 length prefixes on strings and arrays, a
//! one-byte presence tag on optional values and raw 32-byte public keys.
//! This crate re-implements that convention from scratch and layers the
//! concrete account and instruction-argument schemas of each program on top
//! of it, so off-chain callers can turn fetched account bytes into typed
//! records and typed argument records into instruction data.
//!
//! Everything here is pure and synchronous. Fetching account bytes and
//! submitting transactions belong to the surrounding client; this crate only
//! ever sees byte buffers and typed values.

/// Low-level byte reader/writer and the schema-driven record codec.
pub mod codec;
/// Explicit per-store program address sets.
pub mod config;
mod error;
/// Instruction argument records for each program.
pub mod instruction;
/// Merkle commitment over an allow-list of byte strings.
pub mod merkle;
/// Typed account records of each on-chain program.
pub mod state;

#[cfg(feature = "client")]
/// Display-friendly shapes for frontends, serialized with serde.
pub mod frontend;

pub use error::CodecError;
pub use solana_program;

/// Fixed width of the on-chain metadata name slot, NUL-padded.
pub const MAX_NAME_LENGTH: usize = 32;
/// Fixed width of the on-chain metadata symbol slot, NUL-padded.
pub const MAX_SYMBOL_LENGTH: usize = 10;
/// Fixed width of the on-chain metadata uri slot, NUL-padded.
pub const MAX_URI_LENGTH: usize = 200;
/// Maximum number of creators a metadata account may list.
pub const MAX_CREATOR_LIMIT: usize = 5;
/// Number of editions tracked by a single edition-marker ledger.
pub const EDITION_MARKER_BIT_SIZE: u64 = 248;
