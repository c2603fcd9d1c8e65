//! Accounts owned by the token-metadata program.

use crate::codec::{
    from_bytes, key_enum, wire_record, ByteReader, ByteWriter, WireDeserialize, WireSerialize,
};
use crate::error::CodecError;
use crate::state::{puff_to_width, strip_nul_padding};
use crate::{EDITION_MARKER_BIT_SIZE, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH};

use solana_program::pubkey::Pubkey;

pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

pub const MAX_METADATA_LEN: usize = 1
    + 32
    + 32
    + 4
    + MAX_NAME_LENGTH
    + 4
    + MAX_SYMBOL_LENGTH
    + 4
    + MAX_URI_LENGTH
    + 2
    + 1
    + 4
    + crate::MAX_CREATOR_LIMIT * MAX_CREATOR_LEN
    + 1
    + 1
    + 9
    + 172;

pub const MAX_EDITION_LEN: usize = 1 + 32 + 8 + 200;

/// Shared by both master edition versions. The v1 layout is larger, but the
/// account is sized so that an in-place upgrade to v2 always fits.
pub const MAX_MASTER_EDITION_LEN: usize = 1 + 9 + 8 + 264;

pub const MAX_EDITION_MARKER_SIZE: usize = 32;

key_enum! {
    pub enum MetadataKey {
        Uninitialized = 0,
        EditionV1 = 1,
        MasterEditionV1 = 2,
        ReservationListV1 = 3,
        MetadataV1 = 4,
        ReservationListV2 = 5,
        MasterEditionV2 = 6,
        EditionMarker = 7,
    }
}

wire_record! {
    pub struct Creator {
        pub address: Pubkey,
        pub verified: bool,
        /// In percentages, not basis points.
        pub share: u8,
    }
}

/// The user-facing portion of a metadata account.
///
/// On chain the three strings are written at their maximum widths and padded
/// with trailing NULs so the account never reallocates. Decoding strips that
/// padding; encoding restores it, so a decoded account re-encodes to the
/// exact on-chain image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub name: String,
    pub symbol: String,
    /// URI pointing to JSON representing the asset.
    pub uri: String,
    /// Royalty basis points that go to creators in secondary sales (0-10000).
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

impl WireSerialize for Data {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_string(&puff_to_width(&self.name, MAX_NAME_LENGTH));
        writer.write_string(&puff_to_width(&self.symbol, MAX_SYMBOL_LENGTH));
        writer.write_string(&puff_to_width(&self.uri, MAX_URI_LENGTH));
        writer.write_u16(self.seller_fee_basis_points);
        self.creators.serialize(writer);
    }
}

impl WireDeserialize for Data {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let mut name = reader.read_string()?;
        let mut symbol = reader.read_string()?;
        let mut uri = reader.read_string()?;
        strip_nul_padding(&mut name);
        strip_nul_padding(&mut symbol);
        strip_nul_padding(&mut uri);
        Ok(Self {
            name,
            symbol,
            uri,
            seller_fee_basis_points: reader.read_u16()?,
            creators: Option::deserialize(reader)?,
        })
    }
}

wire_record! {
    pub struct Metadata {
        pub key: MetadataKey,
        pub update_authority: Pubkey,
        pub mint: Pubkey,
        pub data: Data,
        /// Immutable; once flipped, all sales of this metadata are considered
        /// secondary.
        pub primary_sale_happened: bool,
        pub is_mutable: bool,
        /// Bump for the edition PDA, if recorded.
        pub edition_nonce: Option<u8>,
    }
}

wire_record! {
    /// A print of a master edition. Supply on these should never exceed 1.
    pub struct Edition {
        pub key: MetadataKey,
        /// Points at the parent master edition account.
        pub parent: Pubkey,
        /// Starting at 0 for the master record, incremented for each edition
        /// minted.
        pub edition: u64,
    }
}

wire_record! {
    pub struct MasterEditionV1 {
        pub key: MetadataKey,
        pub supply: u64,
        pub max_supply: Option<u64>,
        /// Mint of tokens granting one-time permission to mint a single
        /// limited edition.
        pub printing_mint: Pubkey,
        /// Mint of tokens redeemable for any number of printing tokens,
        /// once.
        pub one_time_printing_authorization_mint: Pubkey,
    }
}

wire_record! {
    pub struct MasterEditionV2 {
        pub key: MetadataKey,
        pub supply: u64,
        pub max_supply: Option<u64>,
    }
}

/// Either version of a master edition, behind the discriminant byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterEdition {
    V1(MasterEditionV1),
    V2(MasterEditionV2),
}

impl MasterEdition {
    pub fn key(&self) -> MetadataKey {
        match self {
            MasterEdition::V1(me) => me.key,
            MasterEdition::V2(me) => me.key,
        }
    }

    pub fn supply(&self) -> u64 {
        match self {
            MasterEdition::V1(me) => me.supply,
            MasterEdition::V2(me) => me.supply,
        }
    }

    pub fn max_supply(&self) -> Option<u64> {
        match self {
            MasterEdition::V1(me) => me.max_supply,
            MasterEdition::V2(me) => me.max_supply,
        }
    }
}

impl WireSerialize for MasterEdition {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            MasterEdition::V1(me) => me.serialize(writer),
            MasterEdition::V2(me) => me.serialize(writer),
        }
    }
}

impl WireDeserialize for MasterEdition {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.peek_u8()? {
            2 => Ok(MasterEdition::V1(MasterEditionV1::deserialize(reader)?)),
            6 => Ok(MasterEdition::V2(MasterEditionV2::deserialize(reader)?)),
            other => Err(CodecError::UnknownVariant(other)),
        }
    }
}

wire_record! {
    /// A 248-bit ledger tracking which print editions of one master edition
    /// window have been claimed. Each marker covers editions
    /// `[n * 248, (n + 1) * 248)`.
    pub struct EditionMarker {
        pub key: MetadataKey,
        pub ledger: [u8; 31],
    }
}

impl EditionMarker {
    fn index_and_mask(edition: u64) -> Result<(usize, u8), CodecError> {
        // Bit position within this marker's 248-edition window.
        Self::ledger_slot((edition % EDITION_MARKER_BIT_SIZE) as usize)
    }

    fn ledger_slot(offset: usize) -> Result<(usize, u8), CodecError> {
        let index = offset / 8;
        if index > 30 {
            return Err(CodecError::IndexOutOfRange);
        }
        // Bit 0 of the window is the leftmost bit of ledger[0].
        let mask = 1u8 << (7 - (offset % 8) as u32);
        Ok((index, mask))
    }

    pub fn edition_taken(&self, edition: u64) -> Result<bool, CodecError> {
        let (index, mask) = Self::index_and_mask(edition)?;
        Ok(self.ledger[index] & mask != 0)
    }

    pub fn insert_edition(&mut self, edition: u64) -> Result<(), CodecError> {
        let (index, mask) = Self::index_and_mask(edition)?;
        self.ledger[index] |= mask;
        Ok(())
    }
}

pub fn decode_metadata(bytes: &[u8]) -> Result<Metadata, CodecError> {
    from_bytes(bytes)
}

pub fn decode_edition(bytes: &[u8]) -> Result<Edition, CodecError> {
    from_bytes(bytes)
}

pub fn decode_master_edition(bytes: &[u8]) -> Result<MasterEdition, CodecError> {
    from_bytes(bytes)
}

pub fn decode_edition_marker(bytes: &[u8]) -> Result<EditionMarker, CodecError> {
    from_bytes(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::to_vec;

    fn sample_data() -> Data {
        Data {
            name: "Degen Ape #4269".to_string(),
            symbol: "DAPE".to_string(),
            uri: "https://arweave.net/W5eVkV".to_string(),
            seller_fee_basis_points: 500,
            creators: Some(vec![Creator {
                address: Pubkey::new_unique(),
                verified: true,
                share: 100,
            }]),
        }
    }

    #[test]
    fn metadata_strings_are_padded_on_the_wire() {
        let metadata = Metadata {
            key: MetadataKey::MetadataV1,
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            data: sample_data(),
            primary_sale_happened: false,
            is_mutable: true,
            edition_nonce: Some(255),
        };

        let bytes = to_vec(&metadata);
        // name starts after key + two pubkeys + u32 length prefix
        let name_start = 1 + 32 + 32 + 4;
        assert_eq!(
            &bytes[name_start..name_start + MAX_NAME_LENGTH],
            puff_to_width("Degen Ape #4269", MAX_NAME_LENGTH).as_bytes()
        );

        let decoded = decode_metadata(&bytes).unwrap();
        assert_eq!(decoded, metadata);
        assert_eq!(decoded.data.name, "Degen Ape #4269");
    }

    #[test]
    fn metadata_tolerates_account_padding() {
        let metadata = Metadata {
            key: MetadataKey::MetadataV1,
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            data: sample_data(),
            primary_sale_happened: true,
            is_mutable: false,
            edition_nonce: None,
        };
        let mut bytes = to_vec(&metadata);
        bytes.resize(MAX_METADATA_LEN, 0);
        assert_eq!(decode_metadata(&bytes).unwrap(), metadata);
    }

    #[test]
    fn master_edition_dispatches_on_first_byte() {
        let v2 = MasterEditionV2 {
            key: MetadataKey::MasterEditionV2,
            supply: 10,
            max_supply: Some(100),
        };
        let decoded = decode_master_edition(&to_vec(&v2)).unwrap();
        assert_eq!(decoded, MasterEdition::V2(v2));
        assert_eq!(decoded.supply(), 10);
        assert_eq!(decoded.max_supply(), Some(100));

        let v1 = MasterEditionV1 {
            key: MetadataKey::MasterEditionV1,
            supply: 3,
            max_supply: None,
            printing_mint: Pubkey::new_unique(),
            one_time_printing_authorization_mint: Pubkey::new_unique(),
        };
        assert_eq!(
            decode_master_edition(&to_vec(&v1)).unwrap(),
            MasterEdition::V1(v1)
        );

        assert_eq!(
            decode_master_edition(&[4u8; 40]),
            Err(CodecError::UnknownVariant(4))
        );
    }

    #[test]
    fn edition_marker_bit_positions() {
        let mut marker = EditionMarker {
            key: MetadataKey::EditionMarker,
            ledger: [0; 31],
        };

        marker.insert_edition(1).unwrap();
        assert!(marker.edition_taken(1).unwrap());
        assert!(!marker.edition_taken(2).unwrap());
        // Bit 1 of the window is the second-highest bit of the first byte.
        assert_eq!(marker.ledger[0], 0b0100_0000);

        // Last edition of the window lands in the final in-range byte.
        marker.insert_edition(247).unwrap();
        assert_eq!(marker.ledger[30], 0b0000_0001);

        // 248 and 249 wrap into the next marker's window, so within this one
        // they alias offsets 0 and 1.
        assert!(!marker.edition_taken(248).unwrap());
        assert!(marker.edition_taken(249).unwrap());
    }

    #[test]
    fn ledger_slot_rejects_offsets_past_the_window() {
        // `index_and_mask` reduces mod 248 first, so only a direct call can
        // reach the byte-index guard.
        assert!(matches!(
            EditionMarker::ledger_slot(248),
            Err(CodecError::IndexOutOfRange)
        ));
        assert!(EditionMarker::ledger_slot(247).is_ok());
    }

    #[test]
    fn edition_marker_round_trip() {
        let mut marker = EditionMarker {
            key: MetadataKey::EditionMarker,
            ledger: [0; 31],
        };
        marker.insert_edition(42).unwrap();
        let bytes = to_vec(&marker);
        assert_eq!(bytes.len(), MAX_EDITION_MARKER_SIZE);
        assert_eq!(decode_edition_marker(&bytes).unwrap(), marker);
    }
}
