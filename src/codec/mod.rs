//! Schema-driven binary codec replicating the serialization convention used
//! by the storefront on-chain programs: little-endian integers, u32 length
//! prefixes on strings and arrays, a one-byte presence tag on optional
//! values, raw 32-byte public keys, and nested records with no extra
//! framing.
//!
//! A record's schema is its ordered field list. The [`wire_record!`] macro
//! declares the struct once and derives both directions from it, so the
//! declaration order in the source *is* the wire order.

mod reader;
mod writer;

pub use reader::ByteReader;
pub use writer::ByteWriter;

use crate::error::CodecError;

use solana_program::pubkey::Pubkey;

use std::collections::BTreeMap;

/// Encodes a value by appending its wire representation to a writer.
pub trait WireSerialize {
    fn serialize(&self, writer: &mut ByteWriter);
}

/// Decodes a value by consuming bytes from a reader.
pub trait WireDeserialize: Sized {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError>;
}

/// Decodes a value from the front of `bytes`.
///
/// Trailing bytes are ignored on purpose: account buffers are routinely
/// over-allocated on chain to leave room for schema growth, so a decoder
/// that insisted on full consumption would reject perfectly valid accounts.
pub fn from_bytes<T: WireDeserialize>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut reader = ByteReader::new(bytes);
    T::deserialize(&mut reader)
}

/// Encodes a value into a fresh byte buffer.
pub fn to_vec<T: WireSerialize + ?Sized>(value: &T) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    value.serialize(&mut writer);
    writer.into_vec()
}

macro_rules! int_impl {
    ($ty:ty, $read:ident, $write:ident) => {
        impl WireSerialize for $ty {
            fn serialize(&self, writer: &mut ByteWriter) {
                writer.$write(*self);
            }
        }

        impl WireDeserialize for $ty {
            fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
                reader.$read()
            }
        }
    };
}

int_impl!(u8, read_u8, write_u8);
int_impl!(u16, read_u16, write_u16);
int_impl!(u32, read_u32, write_u32);
int_impl!(u64, read_u64, write_u64);
int_impl!(i64, read_i64, write_i64);

impl WireSerialize for bool {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_tag(*self);
    }
}

impl WireDeserialize for bool {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        reader.read_tag()
    }
}

impl<const N: usize> WireSerialize for [u8; N] {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self);
    }
}

impl<const N: usize> WireDeserialize for [u8; N] {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        reader.read_fixed::<N>()
    }
}

impl WireSerialize for Pubkey {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_pubkey(self);
    }
}

impl WireDeserialize for Pubkey {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        reader.read_pubkey()
    }
}

impl WireSerialize for String {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_string(self);
    }
}

impl WireDeserialize for String {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        reader.read_string()
    }
}

impl<T: WireSerialize> WireSerialize for Option<T> {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            None => writer.write_tag(false),
            Some(value) => {
                writer.write_tag(true);
                value.serialize(writer);
            }
        }
    }
}

impl<T: WireDeserialize> WireDeserialize for Option<T> {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        if reader.read_tag()? {
            Ok(Some(T::deserialize(reader)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: WireSerialize> WireSerialize for Vec<T> {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_u32(self.len() as u32);
        for item in self {
            item.serialize(writer);
        }
    }
}

impl<T: WireDeserialize> WireDeserialize for Vec<T> {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let count = reader.read_u32()? as usize;
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(T::deserialize(reader)?);
        }
        Ok(items)
    }
}

/// Ordered integer map, u32 count prefix then (key, value) pairs.
///
/// `BTreeMap` iterates in ascending key order, which makes the encoded pair
/// order stable across implementations regardless of insertion order.
impl WireSerialize for BTreeMap<u32, u32> {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_u32(self.len() as u32);
        for (key, value) in self {
            writer.write_u32(*key);
            writer.write_u32(*value);
        }
    }
}

impl WireDeserialize for BTreeMap<u32, u32> {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let count = reader.read_u32()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = reader.read_u32()?;
            let value = reader.read_u32()?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Declares a record struct together with its wire schema.
///
/// Fields are encoded and decoded in declaration order, each according to
/// its type's [`WireSerialize`]/[`WireDeserialize`] impl.
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::codec::WireSerialize for $name {
            fn serialize(&self, writer: &mut $crate::codec::ByteWriter) {
                $(
                    $crate::codec::WireSerialize::serialize(&self.$field, writer);
                )*
            }
        }

        impl $crate::codec::WireDeserialize for $name {
            fn deserialize(
                reader: &mut $crate::codec::ByteReader<'_>,
            ) -> Result<Self, $crate::error::CodecError> {
                Ok(Self {
                    $(
                        $field: $crate::codec::WireDeserialize::deserialize(reader)?,
                    )*
                })
            }
        }
    };
}

/// Declares a one-byte discriminant enum with fallible conversion from the
/// raw tag byte.
macro_rules! key_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl core::convert::TryFrom<u8> for $name {
            type Error = $crate::error::CodecError;

            fn try_from(byte: u8) -> Result<Self, Self::Error> {
                match byte {
                    $( $value => Ok(Self::$variant), )*
                    other => Err($crate::error::CodecError::UnknownVariant(other)),
                }
            }
        }

        impl $crate::codec::WireSerialize for $name {
            fn serialize(&self, writer: &mut $crate::codec::ByteWriter) {
                writer.write_u8(*self as u8);
            }
        }

        impl $crate::codec::WireDeserialize for $name {
            fn deserialize(
                reader: &mut $crate::codec::ByteReader<'_>,
            ) -> Result<Self, $crate::error::CodecError> {
                Self::try_from(reader.read_u8()?)
            }
        }
    };
}

pub(crate) use key_enum;
pub(crate) use wire_record;

#[cfg(test)]
mod test {
    use super::*;

    wire_record! {
        pub struct Sample {
            pub id: Pubkey,
            pub amount: u64,
            pub label: String,
            pub deadline: Option<u64>,
            pub shares: Vec<u16>,
        }
    }

    key_enum! {
        pub enum SampleKind {
            Plain = 0,
            Fancy = 7,
        }
    }

    fn sample() -> Sample {
        Sample {
            id: Pubkey::new_from_array([3; 32]),
            amount: 42,
            label: "hello".to_string(),
            deadline: None,
            shares: vec![1, 2, 3],
        }
    }

    #[test]
    fn record_round_trip() {
        let value = sample();
        let bytes = to_vec(&value);
        // 32 + 8 + (4 + 5) + 1 + (4 + 3 * 2)
        assert_eq!(bytes.len(), 60);
        let decoded: Sample = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn trailing_padding_is_tolerated() {
        let mut bytes = to_vec(&sample());
        bytes.extend_from_slice(&[0; 100]);
        let decoded: Sample = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn truncation_is_rejected() {
        let bytes = to_vec(&sample());
        let result: Result<Sample, _> = from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(CodecError::BufferUnderrun { .. })));
    }

    #[test]
    fn option_tag_must_be_binary() {
        let mut bytes = to_vec(&sample());
        // the presence byte of `deadline` sits after id + amount + label
        bytes[32 + 8 + 4 + 5] = 2;
        let result: Result<Sample, _> = from_bytes(&bytes);
        assert_eq!(
            result,
            Err(CodecError::SchemaMismatch("tag byte is neither 0 nor 1"))
        );
    }

    #[test]
    fn key_enum_dispatch() {
        assert_eq!(SampleKind::try_from(7).unwrap(), SampleKind::Fancy);
        assert_eq!(
            SampleKind::try_from(3),
            Err(CodecError::UnknownVariant(3))
        );
        let decoded: SampleKind = from_bytes(&[0]).unwrap();
        assert_eq!(decoded, SampleKind::Plain);
    }

    #[test]
    fn ordered_map_is_encoded_ascending() {
        let mut map = BTreeMap::new();
        map.insert(9_u32, 1_u32);
        map.insert(2, 5);
        map.insert(4, 2);
        let bytes = to_vec(&map);
        assert_eq!(
            bytes,
            vec![
                3, 0, 0, 0, //
                2, 0, 0, 0, 5, 0, 0, 0, //
                4, 0, 0, 0, 2, 0, 0, 0, //
                9, 0, 0, 0, 1, 0, 0, 0,
            ]
        );
        let decoded: BTreeMap<u32, u32> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, map);
    }
}
