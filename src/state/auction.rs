//! Accounts owned by the auction program.

use crate::codec::{from_bytes, key_enum, wire_record};
use crate::error::CodecError;

use solana_program::pubkey::Pubkey;

/// Serialized size of an [`AuctionData`] account before the variable bid
/// list.
pub const BASE_AUCTION_DATA_SIZE: usize = 32 + 32 + 9 + 9 + 9 + 9 + 33 + 1 + 13;
/// Serialized size of a [`BidderMetadata`] account.
pub const BIDDER_METADATA_LEN: usize = 32 + 32 + 8 + 8 + 1;
/// Serialized size of a [`BidderPot`] account.
pub const BIDDER_POT_LEN: usize = 32 + 32 + 32 + 1;

key_enum! {
    pub enum AuctionState {
        Created = 0,
        Started = 1,
        Ended = 2,
    }
}

key_enum! {
    pub enum BidStateType {
        EnglishAuction = 0,
        OpenEdition = 1,
    }
}

key_enum! {
    pub enum PriceFloorType {
        None = 0,
        Minimum = 1,
        BlindedPrice = 2,
    }
}

key_enum! {
    pub enum WinnerLimitType {
        Unlimited = 0,
        Capped = 1,
    }
}

wire_record! {
    pub struct Bid {
        pub key: Pubkey,
        pub amount: u64,
    }
}

wire_record! {
    /// The auction's open bids, stored lowest-to-highest so the winner is
    /// the *last* entry.
    pub struct BidState {
        pub kind: BidStateType,
        pub bids: Vec<Bid>,
        /// Maximum number of winners.
        pub max: u64,
    }
}

impl BidState {
    /// Zero-based winner position of `bidder`, or `None` if the bidder
    /// holds no winning bid. Position 0 is the highest bid.
    pub fn winner_index(&self, bidder: &Pubkey) -> Option<usize> {
        let index = self.bids.iter().position(|bid| &bid.key == bidder)?;
        // bids are stored in reverse winner order
        let zero_based = self.bids.len() - index - 1;
        if (zero_based as u64) < self.max {
            Some(zero_based)
        } else {
            None
        }
    }
}

wire_record! {
    /// Reserve price, stored as a tagged 32-byte payload. For a minimum
    /// floor only the first 8 bytes are used; for a blinded floor the whole
    /// payload is a hash.
    pub struct PriceFloor {
        pub kind: PriceFloorType,
        pub hash: [u8; 32],
    }
}

impl PriceFloor {
    pub fn minimum(price: u64) -> Self {
        let mut hash = [0_u8; 32];
        hash[..8].copy_from_slice(&price.to_le_bytes());
        Self {
            kind: PriceFloorType::Minimum,
            hash,
        }
    }

    /// The minimum acceptable bid, if this floor declares one.
    pub fn min_price(&self) -> Option<u64> {
        match self.kind {
            PriceFloorType::Minimum => {
                let mut le = [0_u8; 8];
                le.copy_from_slice(&self.hash[..8]);
                Some(u64::from_le_bytes(le))
            }
            _ => None,
        }
    }
}

wire_record! {
    /// Main auction account.
    pub struct AuctionData {
        /// Authority with permission to modify this auction.
        pub authority: Pubkey,
        /// Mint of the SPL token used for bidding.
        pub token_mint: Pubkey,
        /// Time the last bid was placed, used to keep track of auction
        /// timing.
        pub last_bid: Option<u64>,
        /// Slot time the auction was officially ended by.
        pub ended_at: Option<u64>,
        /// Cut-off point that the auction is forced to end by.
        pub end_auction_at: Option<u64>,
        /// Gap time after the previous bid at which the auction ends.
        pub auction_gap: Option<u64>,
        pub price_floor: PriceFloor,
        pub state: AuctionState,
        pub bid_state: BidState,
    }
}

impl AuctionData {
    /// Whether the auction has ended by `now` (unix seconds), accounting
    /// for gap-time extensions after the last bid.
    pub fn ended(&self, now: u64) -> bool {
        match self.ended_at {
            None => false,
            Some(ended_at) => {
                let gap_end = match (self.auction_gap, self.last_bid) {
                    (Some(gap), Some(last_bid)) => gap.saturating_add(last_bid),
                    _ => 0,
                };
                ended_at.max(gap_end) < now
            }
        }
    }
}

wire_record! {
    /// Sibling account of [`AuctionData`] holding fields added after the
    /// original layout was frozen.
    pub struct AuctionDataExtended {
        pub total_uncancelled_bids: u64,
        pub tick_size: Option<u64>,
        pub gap_tick_size_percentage: Option<u8>,
    }
}

wire_record! {
    /// Per-bidder bookkeeping for one auction.
    pub struct BidderMetadata {
        pub bidder_pubkey: Pubkey,
        pub auction_pubkey: Pubkey,
        /// Amount of the user's last bid.
        pub last_bid: u64,
        pub last_bid_timestamp: u64,
        /// Whether the last bid was cancelled. A cancelled last bid implies
        /// all earlier ones were too.
        pub cancelled: bool,
    }
}

wire_record! {
    /// Points at the token account escrowing one bidder's funds.
    pub struct BidderPot {
        pub bidder_pot: Pubkey,
        pub bidder_act: Pubkey,
        pub auction_act: Pubkey,
        pub emptied: bool,
    }
}

wire_record! {
    pub struct WinnerLimit {
        pub kind: WinnerLimitType,
        pub limit: u64,
    }
}

pub fn decode_auction_data(bytes: &[u8]) -> Result<AuctionData, CodecError> {
    from_bytes(bytes)
}

pub fn decode_auction_data_extended(bytes: &[u8]) -> Result<AuctionDataExtended, CodecError> {
    from_bytes(bytes)
}

pub fn decode_bidder_metadata(bytes: &[u8]) -> Result<BidderMetadata, CodecError> {
    from_bytes(bytes)
}

pub fn decode_bidder_pot(bytes: &[u8]) -> Result<BidderPot, CodecError> {
    from_bytes(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::to_vec;

    fn auction_fixture() -> AuctionData {
        AuctionData {
            authority: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            last_bid: Some(1_000),
            ended_at: Some(2_000),
            end_auction_at: None,
            auction_gap: Some(600),
            price_floor: PriceFloor::minimum(50_000),
            state: AuctionState::Started,
            bid_state: BidState {
                kind: BidStateType::EnglishAuction,
                bids: vec![],
                max: 1,
            },
        }
    }

    #[test]
    fn auction_data_round_trip() {
        let auction = auction_fixture();
        let bytes = to_vec(&auction);
        assert_eq!(bytes.len(), BASE_AUCTION_DATA_SIZE - /* absent option */ 8);
        assert_eq!(decode_auction_data(&bytes).unwrap(), auction);
        // over-allocated account
        let mut padded = bytes;
        padded.resize(padded.len() + 64, 0);
        assert_eq!(decode_auction_data(&padded).unwrap(), auction);
    }

    #[test]
    fn price_floor_views() {
        assert_eq!(PriceFloor::minimum(50_000).min_price(), Some(50_000));
        let blinded = PriceFloor {
            kind: PriceFloorType::BlindedPrice,
            hash: [7; 32],
        };
        assert_eq!(blinded.min_price(), None);
    }

    #[test]
    fn winner_index_is_reverse_of_storage() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let carol = Pubkey::new_unique();
        let state = BidState {
            kind: BidStateType::EnglishAuction,
            bids: vec![
                Bid { key: carol, amount: 10 },
                Bid { key: bob, amount: 20 },
                Bid { key: alice, amount: 30 },
            ],
            max: 2,
        };
        // alice holds the highest bid, stored last
        assert_eq!(state.winner_index(&alice), Some(0));
        assert_eq!(state.winner_index(&bob), Some(1));
        // carol is outside the winner cap
        assert_eq!(state.winner_index(&carol), None);
        assert_eq!(state.winner_index(&Pubkey::new_unique()), None);
    }

    #[test]
    fn gap_extension_moves_the_end() {
        let mut auction = auction_fixture();
        // ended_at 2000, last bid 1000 + gap 600 -> effective end 2000
        assert!(auction.ended(2_001));
        assert!(!auction.ended(1_999));
        auction.last_bid = Some(1_900);
        // gap pushes the end to 2500
        assert!(!auction.ended(2_400));
        assert!(auction.ended(2_501));
    }

    #[test]
    fn truncated_auction_fails() {
        let bytes = to_vec(&auction_fixture());
        assert!(matches!(
            decode_auction_data(&bytes[..40]),
            Err(CodecError::BufferUnderrun { .. })
        ));
    }
}
