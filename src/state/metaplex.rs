//! Accounts owned by the auction-manager (metaplex) program.
//!
//! The auction manager ties one auction and one vault together and tracks
//! redemption of the prizes inside. Most accounts here are plain records;
//! [`SafetyDepositConfig`] carries a packed amount-range table and
//! [`BidRedemptionTicketV2`] is read as a view over the raw account bytes.

use crate::codec::{
    from_bytes, key_enum, wire_record, ByteReader, ByteWriter, WireDeserialize, WireSerialize,
};
use crate::error::CodecError;

use solana_program::pubkey::Pubkey;

pub const MAX_INDEXED_ELEMENTS: usize = 100;
pub const MAX_STORE_INDEXER_SIZE: usize = 1 + 32 + 8 + 4 + 32 * MAX_INDEXED_ELEMENTS;

pub const MAX_METADATA_PER_CACHE: usize = 10;
pub const MAX_AUCTION_CACHE_SIZE: usize =
    1 + 32 + 8 + 4 + 32 * MAX_METADATA_PER_CACHE + 32 + 32 + 32;

pub const MAX_STORE_SIZE: usize = 2 + 32 + 32 + 32 + 32 + 100;
pub const MAX_WHITELISTED_CREATOR_SIZE: usize = 2 + 32 + 10;
pub const MAX_PAYOUT_TICKET_SIZE: usize = 1 + 32 + 8;
pub const MAX_PRIZE_TRACKING_TICKET_SIZE: usize = 1 + 32 + 8 + 8 + 8 + 50;

/// Serialized size of a [`SafetyDepositConfig`] before its variable-width
/// amount-range table.
pub const BASE_SAFETY_CONFIG_SIZE: usize =
    1 + 32 + 8 + 1 + 1 + 1 + 4 + 1 + 1 + 1 + 9 + 1 + 8 + 20;

key_enum! {
    pub enum MetaplexKey {
        Uninitialized = 0,
        OriginalAuthorityLookupV1 = 1,
        BidRedemptionTicketV1 = 2,
        StoreV1 = 3,
        WhitelistedCreatorV1 = 4,
        PayoutTicketV1 = 5,
        SafetyDepositValidationTicketV1 = 6,
        AuctionManagerV1 = 7,
        PrizeTrackingTicketV1 = 8,
        SafetyDepositConfigV1 = 9,
        AuctionManagerV2 = 10,
        BidRedemptionTicketV2 = 11,
        AuctionWinnerTokenTypeTrackerV1 = 12,
        StoreIndexerV1 = 13,
        AuctionCacheV1 = 14,
        StoreConfigV1 = 15,
    }
}

key_enum! {
    pub enum AuctionManagerStatus {
        Initialized = 0,
        Validated = 1,
        Running = 2,
        Disbursing = 3,
        Finished = 4,
    }
}

key_enum! {
    pub enum WinningConstraint {
        NoParticipationPrize = 0,
        ParticipationPrizeGiven = 1,
    }
}

key_enum! {
    pub enum NonWinningConstraint {
        NoParticipationPrize = 0,
        GivenForFixedPrice = 1,
        GivenForBidPrice = 2,
    }
}

key_enum! {
    pub enum WinningConfigType {
        /// Transfer the token but not its metadata; the seller keeps
        /// (nominal) metadata ownership and creators keep earning royalties.
        TokenOnlyTransfer = 0,
        /// Transfer the master edition record and metadata ownership along
        /// with the token itself.
        FullRightsTransfer = 1,
        /// Print editions during the auction using authorization tokens from
        /// a MasterEditionV1.
        PrintingV1 = 2,
        /// Print editions from a MasterEditionV2.
        PrintingV2 = 3,
        /// A MasterEditionV2 used as a participation prize.
        Participation = 4,
    }
}

key_enum! {
    /// Byte width of one side of an amount-range tuple. The discriminant is
    /// the width itself, so a cast gives the number of bytes to read.
    pub enum TupleNumericType {
        U8 = 1,
        U16 = 2,
        U32 = 4,
        U64 = 8,
    }
}

/// `(amount each winner in the range gets, number of winners in the range)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange(pub u64, pub u64);

wire_record! {
    pub struct ParticipationConfigV2 {
        /// Whether winners also receive the participation prize.
        pub winner_constraint: WinningConstraint,
        /// What non-winners pay for the prize, if anything.
        pub non_winning_constraint: NonWinningConstraint,
        /// Setting this disconnects the participation prize's price from the
        /// bid; every redeemer pays the same fixed price.
        pub fixed_price: Option<u64>,
    }
}

wire_record! {
    pub struct ParticipationStateV2 {
        /// Ledger of participation income collected so far, since those
        /// payments trickle in over time instead of arriving with the bid.
        pub collected_to_accept_payment: u64,
    }
}

wire_record! {
    pub struct AuctionManagerStateV2 {
        pub status: AuctionManagerStatus,
        /// When all configs are validated the auction is started and the
        /// manager moves to Running.
        pub safety_config_items_validated: u64,
        pub bids_pushed_to_accept_payment: u64,
        pub has_participation: bool,
    }
}

wire_record! {
    pub struct AuctionManagerV2 {
        pub key: MetaplexKey,
        pub store: Pubkey,
        pub authority: Pubkey,
        pub auction: Pubkey,
        pub vault: Pubkey,
        pub accept_payment: Pubkey,
        pub state: AuctionManagerStateV2,
    }
}

wire_record! {
    pub struct WinningConfigItem {
        pub safety_deposit_box_index: u8,
        pub amount: u8,
        pub winning_config_type: WinningConfigType,
    }
}

wire_record! {
    pub struct WinningConfig {
        pub items: Vec<WinningConfigItem>,
    }
}

wire_record! {
    pub struct WinningConfigStateItem {
        /// Record of primary sale or not at auction creation, set during the
        /// validation step.
        pub primary_sale_happened: bool,
        /// Ticked to true when the prize is claimed by the winner.
        pub claimed: bool,
    }
}

wire_record! {
    pub struct WinningConfigState {
        pub items: Vec<WinningConfigStateItem>,
        /// Ticked to true when money is pushed to the accept-payment account
        /// from the bidding pot.
        pub money_pushed_to_accept_payment: bool,
    }
}

wire_record! {
    pub struct ParticipationConfigV1 {
        pub winner_constraint: WinningConstraint,
        pub non_winning_constraint: NonWinningConstraint,
        /// Safety deposit box index holding the participation prize
        /// template.
        pub safety_deposit_box_index: u8,
        pub fixed_price: Option<u64>,
    }
}

wire_record! {
    pub struct ParticipationStateV1 {
        pub collected_to_accept_payment: u64,
        pub primary_sale_happened: bool,
        pub validated: bool,
        /// Deprecated printing authorization token account, still present on
        /// old accounts.
        pub printing_authorization_token_account: Option<Pubkey>,
    }
}

wire_record! {
    pub struct AuctionManagerSettingsV1 {
        /// Winning configs in order of place. The same safety deposit index
        /// can appear multiple times if that box holds enough tokens.
        pub winning_configs: Vec<WinningConfig>,
        pub participation_config: Option<ParticipationConfigV1>,
    }
}

wire_record! {
    pub struct AuctionManagerStateV1 {
        pub status: AuctionManagerStatus,
        pub winning_config_items_validated: u8,
        pub winning_config_states: Vec<WinningConfigState>,
        pub participation_state: Option<ParticipationStateV1>,
    }
}

wire_record! {
    pub struct AuctionManagerV1 {
        pub key: MetaplexKey,
        pub store: Pubkey,
        pub authority: Pubkey,
        pub auction: Pubkey,
        pub vault: Pubkey,
        pub accept_payment: Pubkey,
        pub state: AuctionManagerStateV1,
        pub settings: AuctionManagerSettingsV1,
        /// True if every winning config has exactly one item, used to
        /// shortcut saving.
        pub straight_shot_optimization: bool,
    }
}

/// Either version of an auction manager, behind the discriminant byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionManager {
    V1(AuctionManagerV1),
    V2(AuctionManagerV2),
}

impl AuctionManager {
    pub fn store(&self) -> Pubkey {
        match self {
            AuctionManager::V1(am) => am.store,
            AuctionManager::V2(am) => am.store,
        }
    }

    pub fn authority(&self) -> Pubkey {
        match self {
            AuctionManager::V1(am) => am.authority,
            AuctionManager::V2(am) => am.authority,
        }
    }

    pub fn auction(&self) -> Pubkey {
        match self {
            AuctionManager::V1(am) => am.auction,
            AuctionManager::V2(am) => am.auction,
        }
    }

    pub fn vault(&self) -> Pubkey {
        match self {
            AuctionManager::V1(am) => am.vault,
            AuctionManager::V2(am) => am.vault,
        }
    }

    pub fn accept_payment(&self) -> Pubkey {
        match self {
            AuctionManager::V1(am) => am.accept_payment,
            AuctionManager::V2(am) => am.accept_payment,
        }
    }

    pub fn status(&self) -> AuctionManagerStatus {
        match self {
            AuctionManager::V1(am) => am.state.status,
            AuctionManager::V2(am) => am.state.status,
        }
    }
}

impl WireSerialize for AuctionManager {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            AuctionManager::V1(am) => am.serialize(writer),
            AuctionManager::V2(am) => am.serialize(writer),
        }
    }
}

impl WireDeserialize for AuctionManager {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.peek_u8()? {
            7 => Ok(AuctionManager::V1(AuctionManagerV1::deserialize(reader)?)),
            10 => Ok(AuctionManager::V2(AuctionManagerV2::deserialize(reader)?)),
            other => Err(CodecError::UnknownVariant(other)),
        }
    }
}

wire_record! {
    pub struct Store {
        pub key: MetaplexKey,
        /// Whether creators outside the whitelist may list in this store.
        pub public: bool,
        pub auction_program: Pubkey,
        pub token_vault_program: Pubkey,
        pub token_metadata_program: Pubkey,
        pub token_program: Pubkey,
    }
}

wire_record! {
    /// One page of auction caches for a store, newest timestamps first.
    pub struct StoreIndexer {
        pub key: MetaplexKey,
        pub store: Pubkey,
        pub page: u64,
        pub auction_caches: Vec<Pubkey>,
    }
}

wire_record! {
    pub struct AuctionCache {
        pub key: MetaplexKey,
        pub store: Pubkey,
        /// Creation time, used to order caches within an indexer page.
        pub timestamp: i64,
        pub metadata: Vec<Pubkey>,
        pub auction: Pubkey,
        pub vault: Pubkey,
        pub auction_manager: Pubkey,
    }
}

wire_record! {
    pub struct WhitelistedCreator {
        pub key: MetaplexKey,
        pub address: Pubkey,
        pub activated: bool,
    }
}

wire_record! {
    pub struct PayoutTicket {
        pub key: MetaplexKey,
        pub recipient: Pubkey,
        pub amount_paid: u64,
    }
}

wire_record! {
    pub struct PrizeTrackingTicket {
        pub key: MetaplexKey,
        pub metadata: Pubkey,
        /// Master edition supply when the first redemption happened.
        pub supply_snapshot: u64,
        pub expected_redemptions: u64,
        pub redemptions: u64,
    }
}

/// Per-box prize configuration for a v2 auction manager.
///
/// The amount-range table is packed: each tuple side is written at the byte
/// width named by `amount_type`/`length_type` rather than as a full u64, so
/// this record carries its own codec instead of going through `wire_record!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyDepositConfig {
    pub key: MetaplexKey,
    /// Reverse lookup to the owning auction manager.
    pub auction_manager: Pubkey,
    /// Safety deposit box order within the vault.
    pub order: u64,
    pub winning_config_type: WinningConfigType,
    pub amount_type: TupleNumericType,
    pub length_type: TupleNumericType,
    pub amount_ranges: Vec<AmountRange>,
    pub participation_config: Option<ParticipationConfigV2>,
    pub participation_state: Option<ParticipationStateV2>,
}

fn read_packed(reader: &mut ByteReader<'_>, width: TupleNumericType) -> Result<u64, CodecError> {
    Ok(match width {
        TupleNumericType::U8 => reader.read_u8()? as u64,
        TupleNumericType::U16 => reader.read_u16()? as u64,
        TupleNumericType::U32 => reader.read_u32()? as u64,
        TupleNumericType::U64 => reader.read_u64()?,
    })
}

fn write_packed(writer: &mut ByteWriter, width: TupleNumericType, value: u64) {
    match width {
        TupleNumericType::U8 => writer.write_u8(value as u8),
        TupleNumericType::U16 => writer.write_u16(value as u16),
        TupleNumericType::U32 => writer.write_u32(value as u32),
        TupleNumericType::U64 => writer.write_u64(value),
    }
}

impl SafetyDepositConfig {
    /// Account size needed for this record, padding included.
    pub fn created_size(&self) -> usize {
        BASE_SAFETY_CONFIG_SIZE
            + (self.amount_type as usize + self.length_type as usize) * self.amount_ranges.len()
    }

    /// The amount of tokens or editions the winner at `winner_index` gets
    /// from this box, or 0 if the index falls outside every range.
    pub fn amount_for_winner(&self, winner_index: u64) -> u64 {
        let mut range_start = 0u64;
        for range in &self.amount_ranges {
            let range_end = range_start.saturating_add(range.1);
            if winner_index >= range_start && winner_index < range_end {
                return range.0;
            }
            range_start = range_end;
        }
        0
    }
}

impl WireSerialize for SafetyDepositConfig {
    fn serialize(&self, writer: &mut ByteWriter) {
        self.key.serialize(writer);
        writer.write_pubkey(&self.auction_manager);
        writer.write_u64(self.order);
        self.winning_config_type.serialize(writer);
        self.amount_type.serialize(writer);
        self.length_type.serialize(writer);
        writer.write_u32(self.amount_ranges.len() as u32);
        for range in &self.amount_ranges {
            write_packed(writer, self.amount_type, range.0);
            write_packed(writer, self.length_type, range.1);
        }
        self.participation_config.serialize(writer);
        self.participation_state.serialize(writer);
    }
}

impl WireDeserialize for SafetyDepositConfig {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let key = MetaplexKey::deserialize(reader)?;
        let auction_manager = reader.read_pubkey()?;
        let order = reader.read_u64()?;
        let winning_config_type = WinningConfigType::deserialize(reader)?;
        let amount_type = TupleNumericType::deserialize(reader)?;
        let length_type = TupleNumericType::deserialize(reader)?;
        let range_count = reader.read_u32()? as usize;
        let mut amount_ranges = Vec::with_capacity(range_count.min(4096));
        for _ in 0..range_count {
            let amount = read_packed(reader, amount_type)?;
            let length = read_packed(reader, length_type)?;
            amount_ranges.push(AmountRange(amount, length));
        }
        Ok(Self {
            key,
            auction_manager,
            order,
            winning_config_type,
            amount_type,
            length_type,
            amount_ranges,
            participation_config: Option::deserialize(reader)?,
            participation_state: Option::deserialize(reader)?,
        })
    }
}

wire_record! {
    pub struct BidRedemptionTicketV1 {
        pub key: MetaplexKey,
        pub participation_redeemed: bool,
        pub items_redeemed: u8,
    }
}

/// V2 redemption tickets keep a bitmask where bit n, counted from the left,
/// records whether safety deposit order n has been redeemed. Reads go
/// straight against the account bytes, so checking a bid costs O(1) with no
/// up-front decode of the mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidRedemptionTicketV2 {
    data: Vec<u8>,
}

// key byte, winner index option tag, auction manager
const BID_REDEMPTION_V2_MIN_LEN: usize = 1 + 1 + 32;

impl BidRedemptionTicketV2 {
    /// Byte offset of the redemption bitmask; the absent winner-index option
    /// shifts everything after it down by 8.
    fn mask_offset(&self) -> usize {
        if self.data[1] == 0 {
            42 - 8
        } else {
            42
        }
    }

    pub fn winner_index(&self) -> Option<u64> {
        if self.data[1] == 0 {
            return None;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[2..10]);
        Some(u64::from_le_bytes(bytes))
    }

    pub fn auction_manager(&self) -> Pubkey {
        let start = if self.data[1] == 0 { 2 } else { 10 };
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.data[start..start + 32]);
        Pubkey::new_from_array(bytes)
    }

    /// Whether the prize in the box at `order` has been redeemed. Orders
    /// past the end of the account are unredeemed.
    pub fn bid_redeemed(&self, order: u64) -> bool {
        let index = self.mask_offset() + (order / 8) as usize;
        let mask = 1u8 << (7 - (order % 8) as u32);
        match self.data.get(index) {
            Some(byte) => byte & mask != 0,
            None => false,
        }
    }
}

impl WireSerialize for BidRedemptionTicketV2 {
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.data);
    }
}

impl WireDeserialize for BidRedemptionTicketV2 {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let remaining = reader.remaining();
        if remaining < BID_REDEMPTION_V2_MIN_LEN {
            return Err(CodecError::BufferUnderrun {
                needed: BID_REDEMPTION_V2_MIN_LEN - remaining,
                remaining,
            });
        }
        let data = reader.read_bytes(remaining)?.to_vec();
        match data[1] {
            0 => {}
            1 => {
                if data.len() < BID_REDEMPTION_V2_MIN_LEN + 8 {
                    return Err(CodecError::BufferUnderrun {
                        needed: BID_REDEMPTION_V2_MIN_LEN + 8 - data.len(),
                        remaining: data.len(),
                    });
                }
            }
            _ => return Err(CodecError::SchemaMismatch("winner index presence byte")),
        }
        Ok(Self { data })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidRedemptionTicket {
    V1(BidRedemptionTicketV1),
    V2(BidRedemptionTicketV2),
}

impl WireSerialize for BidRedemptionTicket {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            BidRedemptionTicket::V1(ticket) => ticket.serialize(writer),
            BidRedemptionTicket::V2(ticket) => ticket.serialize(writer),
        }
    }
}

impl WireDeserialize for BidRedemptionTicket {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.peek_u8()? {
            2 => Ok(BidRedemptionTicket::V1(BidRedemptionTicketV1::deserialize(
                reader,
            )?)),
            11 => Ok(BidRedemptionTicket::V2(BidRedemptionTicketV2::deserialize(
                reader,
            )?)),
            other => Err(CodecError::UnknownVariant(other)),
        }
    }
}

pub fn decode_auction_manager(bytes: &[u8]) -> Result<AuctionManager, CodecError> {
    from_bytes(bytes)
}

pub fn decode_store(bytes: &[u8]) -> Result<Store, CodecError> {
    from_bytes(bytes)
}

pub fn decode_store_indexer(bytes: &[u8]) -> Result<StoreIndexer, CodecError> {
    from_bytes(bytes)
}

pub fn decode_auction_cache(bytes: &[u8]) -> Result<AuctionCache, CodecError> {
    from_bytes(bytes)
}

pub fn decode_whitelisted_creator(bytes: &[u8]) -> Result<WhitelistedCreator, CodecError> {
    from_bytes(bytes)
}

pub fn decode_payout_ticket(bytes: &[u8]) -> Result<PayoutTicket, CodecError> {
    from_bytes(bytes)
}

pub fn decode_prize_tracking_ticket(bytes: &[u8]) -> Result<PrizeTrackingTicket, CodecError> {
    from_bytes(bytes)
}

pub fn decode_safety_deposit_config(bytes: &[u8]) -> Result<SafetyDepositConfig, CodecError> {
    from_bytes(bytes)
}

pub fn decode_bid_redemption_ticket(bytes: &[u8]) -> Result<BidRedemptionTicket, CodecError> {
    from_bytes(bytes)
}
