//! Typed account records of the storefront programs.
//!
//! Each record mirrors the exact field order of its on-chain counterpart;
//! the `decode_*` entry points accept the raw account bytes and tolerate
//! trailing padding. Records whose first byte selects between several
//! physical layouts dispatch on that byte before applying a schema.

pub mod auction;
pub mod metadata;
pub mod metaplex;
pub mod packs;
pub mod vault;

/// Strips the trailing NUL padding an on-chain fixed-width string slot
/// carries. Interior NULs are left alone; only the padding run goes.
pub(crate) fn strip_nul_padding(value: &mut String) {
    let trimmed = value.trim_end_matches('\0').len();
    value.truncate(trimmed);
}

/// Pads a string with NULs up to the fixed slot width. Strings already at
/// or over the width are returned unchanged.
pub(crate) fn puff_to_width(value: &str, width: usize) -> String {
    let mut out = String::with_capacity(width.max(value.len()));
    out.push_str(value);
    while out.len() < width {
        out.push('\0');
    }
    out
}
