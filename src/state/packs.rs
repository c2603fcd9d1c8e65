//! Accounts owned by the nft-packs program.

use std::collections::BTreeMap;

use crate::codec::{
    from_bytes, key_enum, wire_record, ByteReader, ByteWriter, WireDeserialize, WireSerialize,
};
use crate::error::CodecError;
use crate::state::{puff_to_width, strip_nul_padding};

use solana_program::pubkey::Pubkey;

/// Fixed width of the pack set name field.
pub const MAX_PACK_NAME_LEN: usize = 32;

key_enum! {
    pub enum PackAccountType {
        Uninitialized = 0,
        PackSet = 1,
        PackCard = 2,
        PackVoucher = 3,
        ProvingProcess = 4,
        PackConfig = 5,
    }
}

key_enum! {
    pub enum PackSetState {
        NotActivated = 0,
        Activated = 1,
        Deactivated = 2,
        Ended = 3,
    }
}

key_enum! {
    pub enum PackDistributionType {
        /// Probability weighted by each card's max supply.
        MaxSupply = 0,
        /// Fixed probability per card.
        Fixed = 1,
        Unlimited = 2,
    }
}

/// A set of card masters that users open packs against.
///
/// `name` occupies a fixed 32-byte slot on the wire, NUL padded on the right;
/// decoding strips the padding and encoding restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSet {
    pub account_type: PackAccountType,
    pub store: Pubkey,
    pub authority: Pubkey,
    pub description: String,
    /// Link to the pack set image.
    pub uri: String,
    pub name: String,
    /// Card masters counter.
    pub pack_cards: u32,
    /// Pack voucher counter.
    pub pack_vouchers: u32,
    pub total_weight: u64,
    /// Total amount of editions the pack can mint.
    pub total_editions: u64,
    /// If true the authority can make changes in the deactivated phase.
    pub mutable: bool,
    pub pack_state: PackSetState,
    pub distribution_type: PackDistributionType,
    /// How many cards a user may try to redeem per voucher.
    pub allowed_amount_to_redeem: u32,
    pub redeem_start_date: u64,
    pub redeem_end_date: Option<u64>,
}

impl WireSerialize for PackSet {
    fn serialize(&self, writer: &mut ByteWriter) {
        self.account_type.serialize(writer);
        writer.write_pubkey(&self.store);
        writer.write_pubkey(&self.authority);
        writer.write_string(&self.description);
        writer.write_string(&self.uri);
        writer.write_bytes(puff_to_width(&self.name, MAX_PACK_NAME_LEN).as_bytes());
        writer.write_u32(self.pack_cards);
        writer.write_u32(self.pack_vouchers);
        writer.write_u64(self.total_weight);
        writer.write_u64(self.total_editions);
        writer.write_tag(self.mutable);
        self.pack_state.serialize(writer);
        self.distribution_type.serialize(writer);
        writer.write_u32(self.allowed_amount_to_redeem);
        writer.write_u64(self.redeem_start_date);
        self.redeem_end_date.serialize(writer);
    }
}

impl WireDeserialize for PackSet {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let account_type = PackAccountType::deserialize(reader)?;
        let store = reader.read_pubkey()?;
        let authority = reader.read_pubkey()?;
        let description = reader.read_string()?;
        let uri = reader.read_string()?;
        let name_bytes = reader.read_fixed::<MAX_PACK_NAME_LEN>()?;
        let mut name =
            String::from_utf8(name_bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)?;
        strip_nul_padding(&mut name);
        Ok(Self {
            account_type,
            store,
            authority,
            description,
            uri,
            name,
            pack_cards: reader.read_u32()?,
            pack_vouchers: reader.read_u32()?,
            total_weight: reader.read_u64()?,
            total_editions: reader.read_u64()?,
            mutable: reader.read_tag()?,
            pack_state: PackSetState::deserialize(reader)?,
            distribution_type: PackDistributionType::deserialize(reader)?,
            allowed_amount_to_redeem: reader.read_u32()?,
            redeem_start_date: reader.read_u64()?,
            redeem_end_date: Option::deserialize(reader)?,
        })
    }
}

wire_record! {
    /// One card master inside a pack set.
    pub struct PackCard {
        pub account_type: PackAccountType,
        pub pack_set: Pubkey,
        /// Master edition the prints are made from.
        pub master: Pubkey,
        pub metadata: Pubkey,
        /// Program token account holding the master token.
        pub token_account: Pubkey,
        pub max_supply: u32,
        /// Probability weight for weighted distributions.
        pub weight: u16,
    }
}

wire_record! {
    /// Voucher master whose editions grant the right to open a pack.
    pub struct PackVoucher {
        pub account_type: PackAccountType,
        pub pack_set: Pubkey,
        pub master: Pubkey,
        pub metadata: Pubkey,
    }
}

wire_record! {
    /// Per-user redemption progress for one voucher mint.
    pub struct ProvingProcess {
        pub account_type: PackAccountType,
        pub wallet_key: Pubkey,
        /// Set once the user has redeemed everything they are allowed to.
        pub is_exhausted: bool,
        pub voucher_mint: Pubkey,
        pub pack_set: Pubkey,
        pub cards_redeemed: u32,
        /// Remaining claims per card index, encoded in ascending key order.
        pub cards_to_redeem: BTreeMap<u32, u32>,
    }
}

pub fn decode_pack_set(bytes: &[u8]) -> Result<PackSet, CodecError> {
    from_bytes(bytes)
}

pub fn decode_pack_card(bytes: &[u8]) -> Result<PackCard, CodecError> {
    from_bytes(bytes)
}

pub fn decode_pack_voucher(bytes: &[u8]) -> Result<PackVoucher, CodecError> {
    from_bytes(bytes)
}

pub fn decode_proving_process(bytes: &[u8]) -> Result<ProvingProcess, CodecError> {
    from_bytes(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::to_vec;

    #[test]
    fn pack_set_name_occupies_fixed_slot() {
        let set = PackSet {
            account_type: PackAccountType::PackSet,
            store: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            description: "ten random cards".to_string(),
            uri: "https://arweave.net/pack".to_string(),
            name: "Genesis".to_string(),
            pack_cards: 10,
            pack_vouchers: 1,
            total_weight: 100,
            total_editions: 1000,
            mutable: true,
            pack_state: PackSetState::Activated,
            distribution_type: PackDistributionType::Fixed,
            allowed_amount_to_redeem: 3,
            redeem_start_date: 1_640_995_200,
            redeem_end_date: None,
        };

        let bytes = to_vec(&set);
        let name_start = 1 + 32 + 32 + 4 + set.description.len() + 4 + set.uri.len();
        assert_eq!(&bytes[name_start..name_start + 7], b"Genesis");
        assert_eq!(bytes[name_start + 7], 0);

        let decoded = decode_pack_set(&bytes).unwrap();
        assert_eq!(decoded, set);
        assert_eq!(decoded.name, "Genesis");
    }

    #[test]
    fn proving_process_map_encodes_keys_ascending() {
        let mut cards_to_redeem = BTreeMap::new();
        cards_to_redeem.insert(7, 1);
        cards_to_redeem.insert(2, 2);
        let process = ProvingProcess {
            account_type: PackAccountType::ProvingProcess,
            wallet_key: Pubkey::new_unique(),
            is_exhausted: false,
            voucher_mint: Pubkey::new_unique(),
            pack_set: Pubkey::new_unique(),
            cards_redeemed: 0,
            cards_to_redeem,
        };

        let bytes = to_vec(&process);
        // map starts after account type, three pubkeys, bool and u32
        let map_start = 1 + 32 + 1 + 32 + 32 + 4;
        assert_eq!(&bytes[map_start..map_start + 4], &2u32.to_le_bytes());
        assert_eq!(&bytes[map_start + 4..map_start + 8], &2u32.to_le_bytes());
        assert_eq!(&bytes[map_start + 12..map_start + 16], &7u32.to_le_bytes());

        assert_eq!(decode_proving_process(&bytes).unwrap(), process);
    }

    #[test]
    fn pack_card_round_trip_with_padding() {
        let card = PackCard {
            account_type: PackAccountType::PackCard,
            pack_set: Pubkey::new_unique(),
            master: Pubkey::new_unique(),
            metadata: Pubkey::new_unique(),
            token_account: Pubkey::new_unique(),
            max_supply: 100,
            weight: 30,
        };
        let mut bytes = to_vec(&card);
        bytes.extend_from_slice(&[0; 17]);
        assert_eq!(decode_pack_card(&bytes).unwrap(), card);
    }
}
