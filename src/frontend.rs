//! Display-ready shapes for a storefront UI, behind the `client` feature.
//!
//! These are JSON types, not wire types: pubkeys become base-58 strings,
//! lamport amounts become SOL scalars, field names go out in camelCase.

use crate::state::auction::{AuctionData, AuctionState, BidderMetadata};
use crate::state::metadata::Metadata;

use serde::{Deserialize, Serialize};

pub type Scalar = f64;

const LAMPORTS_PER_SOL: Scalar = 1e9;

pub fn to_sol(amount: u64) -> Scalar {
    amount as Scalar / LAMPORTS_PER_SOL
}

pub fn to_lamports(amount: Scalar) -> u64 {
    (amount * LAMPORTS_PER_SOL) as u64
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendMetadata {
    pub mint: String,
    pub update_authority: String,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub primary_sale_happened: bool,
}

impl From<&Metadata> for FrontendMetadata {
    fn from(metadata: &Metadata) -> Self {
        Self {
            mint: metadata.mint.to_string(),
            update_authority: metadata.update_authority.to_string(),
            name: metadata.data.name.clone(),
            symbol: metadata.data.symbol.clone(),
            uri: metadata.data.uri.clone(),
            seller_fee_basis_points: metadata.data.seller_fee_basis_points,
            primary_sale_happened: metadata.primary_sale_happened,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendAuction {
    pub authority_pubkey: String,
    pub token_mint_pubkey: String,
    pub last_bid_amount: Option<Scalar>,
    pub ended_at: Option<u64>,
    pub price_floor: Option<Scalar>,
    pub is_ended: bool,
    pub bids: Vec<FrontendBid>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendBid {
    pub bidder_pubkey: String,
    pub amount: Scalar,
    pub cancelled: bool,
}

impl FrontendAuction {
    pub fn new(auction: &AuctionData, bids: &[BidderMetadata]) -> Self {
        Self {
            authority_pubkey: auction.authority.to_string(),
            token_mint_pubkey: auction.token_mint.to_string(),
            last_bid_amount: auction.bid_state.bids.last().map(|bid| to_sol(bid.amount)),
            ended_at: auction.ended_at,
            price_floor: auction.price_floor.min_price().map(to_sol),
            is_ended: auction.state == AuctionState::Ended,
            bids: bids.iter().map(FrontendBid::from).collect(),
        }
    }
}

impl From<&BidderMetadata> for FrontendBid {
    fn from(meta: &BidderMetadata) -> Self {
        Self {
            bidder_pubkey: meta.bidder_pubkey.to_string(),
            amount: to_sol(meta.last_bid),
            cancelled: meta.cancelled,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sol_conversion_round_trip() {
        assert_eq!(to_sol(1_000_000_000), 1.0);
        assert_eq!(to_lamports(2.5), 2_500_000_000);
        assert_eq!(to_lamports(to_sol(123_456_789)), 123_456_789);
    }

    #[test]
    fn bid_serializes_camel_case() {
        let bid = FrontendBid {
            bidder_pubkey: "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi".to_string(),
            amount: 1.5,
            cancelled: false,
        };
        let json = serde_json::to_value(&bid).unwrap();
        assert_eq!(json["bidderPubkey"], bid.bidder_pubkey);
        assert_eq!(json["amount"], 1.5);
        assert_eq!(json["cancelled"], false);
    }
}
