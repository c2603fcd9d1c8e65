//! End-to-end decode scenarios against hand-built account images.

use storefront_client::codec::{from_bytes, to_vec};
use storefront_client::merkle::{verify, MerkleTree};
use storefront_client::solana_program::pubkey::Pubkey;
use storefront_client::state::auction::{
    decode_auction_data, AuctionState, Bid, BidState, BidStateType, PriceFloor,
    BASE_AUCTION_DATA_SIZE,
};
use storefront_client::state::metadata::{
    decode_edition_marker, decode_master_edition, decode_metadata, Creator, Data, EditionMarker,
    MasterEdition, MasterEditionV2, Metadata, MetadataKey, MAX_METADATA_LEN,
};
use storefront_client::state::metaplex::{
    decode_safety_deposit_config, AmountRange, MetaplexKey, SafetyDepositConfig,
    TupleNumericType, WinningConfigType,
};
use storefront_client::state::packs::{decode_proving_process, PackAccountType, ProvingProcess};
use storefront_client::CodecError;

use std::collections::BTreeMap;

/// An on-chain metadata account is allocated at its maximum size, so the
/// live fields are followed by a long zero tail and the name/symbol/uri are
/// padded with NULs inside their length prefixes.
#[test]
fn metadata_account_with_padded_strings() {
    let metadata = Metadata {
        key: MetadataKey::MetadataV1,
        update_authority: Pubkey::new_unique(),
        mint: Pubkey::new_unique(),
        data: Data {
            name: "Solstice".to_string(),
            symbol: "SOL".to_string(),
            uri: "https://arweave.net/abc123".to_string(),
            seller_fee_basis_points: 250,
            creators: Some(vec![
                Creator {
                    address: Pubkey::new_unique(),
                    verified: true,
                    share: 60,
                },
                Creator {
                    address: Pubkey::new_unique(),
                    verified: false,
                    share: 40,
                },
            ]),
        },
        primary_sale_happened: false,
        is_mutable: true,
        edition_nonce: Some(254),
    };

    let mut image = to_vec(&metadata);
    image.resize(MAX_METADATA_LEN, 0);

    let decoded = decode_metadata(&image).unwrap();
    assert_eq!(decoded.data.name, "Solstice");
    assert_eq!(decoded.data.symbol, "SOL");
    assert_eq!(decoded, metadata);

    // re-encoding restores the padded wire image, minus the account tail
    assert_eq!(to_vec(&decoded), image[..to_vec(&metadata).len()]);
}

#[test]
fn truncated_metadata_fails_loudly() {
    let metadata = Metadata {
        key: MetadataKey::MetadataV1,
        update_authority: Pubkey::new_unique(),
        mint: Pubkey::new_unique(),
        data: Data {
            name: "x".to_string(),
            symbol: "X".to_string(),
            uri: "u".to_string(),
            seller_fee_basis_points: 0,
            creators: None,
        },
        primary_sale_happened: false,
        is_mutable: false,
        edition_nonce: None,
    };
    let image = to_vec(&metadata);
    let err = decode_metadata(&image[..40]).unwrap_err();
    assert!(matches!(err, CodecError::BufferUnderrun { .. }));
}

#[test]
fn edition_marker_window_boundaries() {
    // editions 247, 248 and 249 belong to two different marker accounts
    let mut first_window = EditionMarker {
        key: MetadataKey::EditionMarker,
        ledger: [0; 31],
    };
    first_window.insert_edition(247).unwrap();
    assert!(first_window.edition_taken(247).unwrap());

    let image = to_vec(&first_window);
    let reloaded = decode_edition_marker(&image).unwrap();
    assert!(reloaded.edition_taken(247).unwrap());

    // 248 wraps to offset 0 of the next marker
    let mut second_window = EditionMarker {
        key: MetadataKey::EditionMarker,
        ledger: [0; 31],
    };
    second_window.insert_edition(248).unwrap();
    second_window.insert_edition(249).unwrap();
    assert_eq!(second_window.ledger[0], 0b1100_0000);
    assert!(!reloaded.edition_taken(248).unwrap());

    // a ledger byte of 0b1000_0000 marks exactly edition 0 of its window
    let mut image = vec![MetadataKey::EditionMarker as u8];
    image.extend_from_slice(&[0u8; 31]);
    image[1] = 0b1000_0000;
    let marker = decode_edition_marker(&image).unwrap();
    assert!(marker.edition_taken(0).unwrap());
    for edition in 1..8 {
        assert!(!marker.edition_taken(edition).unwrap());
    }
}

#[test]
fn master_edition_version_dispatch() {
    let v2 = MasterEditionV2 {
        key: MetadataKey::MasterEditionV2,
        supply: 7,
        max_supply: None,
    };
    let mut image = to_vec(&v2);
    image.resize(image.len() + 200, 0);
    match decode_master_edition(&image).unwrap() {
        MasterEdition::V2(decoded) => assert_eq!(decoded, v2),
        MasterEdition::V1(_) => panic!("dispatched to the wrong version"),
    }

    image[0] = 3;
    assert_eq!(
        decode_master_edition(&image),
        Err(CodecError::UnknownVariant(3))
    );
}

#[test]
fn safety_deposit_config_round_trip_through_account_image() {
    let config = SafetyDepositConfig {
        key: MetaplexKey::SafetyDepositConfigV1,
        auction_manager: Pubkey::new_unique(),
        order: 3,
        winning_config_type: WinningConfigType::TokenOnlyTransfer,
        amount_type: TupleNumericType::U16,
        length_type: TupleNumericType::U8,
        amount_ranges: vec![AmountRange(1, 10), AmountRange(5, 2)],
        participation_config: None,
        participation_state: None,
    };

    let mut image = to_vec(&config);
    image.resize(config.created_size(), 0);

    let decoded = decode_safety_deposit_config(&image).unwrap();
    assert_eq!(decoded, config);
    assert_eq!(decoded.amount_for_winner(9), 1);
    assert_eq!(decoded.amount_for_winner(10), 5);
    assert_eq!(decoded.amount_for_winner(12), 0);
}

#[test]
fn proving_process_ledger_round_trip() {
    let mut cards_to_redeem = BTreeMap::new();
    cards_to_redeem.insert(0, 1);
    cards_to_redeem.insert(3, 2);
    cards_to_redeem.insert(9, 1);

    let process = ProvingProcess {
        account_type: PackAccountType::ProvingProcess,
        wallet_key: Pubkey::new_unique(),
        is_exhausted: false,
        voucher_mint: Pubkey::new_unique(),
        pack_set: Pubkey::new_unique(),
        cards_redeemed: 1,
        cards_to_redeem,
    };

    let image = to_vec(&process);
    let decoded = decode_proving_process(&image).unwrap();
    assert_eq!(decoded, process);
    // stable ascending-key encode keeps the image reproducible
    assert_eq!(to_vec(&decoded), image);
}

#[test]
fn auction_data_without_optional_fields_is_base_size_minus_absent_values() {
    let auction = storefront_client::state::auction::AuctionData {
        authority: Pubkey::new_unique(),
        token_mint: Pubkey::new_unique(),
        last_bid: None,
        ended_at: None,
        end_auction_at: None,
        auction_gap: None,
        price_floor: PriceFloor::minimum(1_000),
        state: AuctionState::Started,
        bid_state: BidState {
            kind: BidStateType::EnglishAuction,
            bids: vec![Bid {
                key: Pubkey::new_unique(),
                amount: 2_000,
            }],
            max: 1,
        },
    };

    let image = to_vec(&auction);
    // four absent u64 options save 8 bytes each against the fully-populated
    // base, one live bid adds a 40-byte entry
    assert_eq!(image.len(), BASE_AUCTION_DATA_SIZE - 4 * 8 + 40);
    assert_eq!(decode_auction_data(&image).unwrap(), auction);
}

#[test]
fn whitelist_membership_proof_round_trip() {
    let wallets: Vec<[u8; 32]> = (1u8..=7).map(|i| [i; 32]).collect();
    let tree = MerkleTree::new(&wallets);
    let root = tree.root().unwrap();

    for (i, wallet) in wallets.iter().enumerate() {
        let proof = tree.proof(i).unwrap();
        assert!(verify(root, wallet, &proof));
        // a proof only works for its own leaf
        assert!(!verify(root, &[0xaa; 32], &proof));
    }

    assert_eq!(tree.proof(7).unwrap_err(), CodecError::IndexOutOfRange);
}

#[test]
fn instruction_data_matches_known_layout() {
    use storefront_client::instruction::{AuctionInstruction, PlaceBidArgs};

    let resource = Pubkey::new_unique();
    let ix = AuctionInstruction::PlaceBid(PlaceBidArgs {
        amount: 42,
        resource,
    });
    let bytes = to_vec(&ix);

    let mut expected = vec![6u8];
    expected.extend_from_slice(&42u64.to_le_bytes());
    expected.extend_from_slice(resource.as_ref());
    assert_eq!(bytes, expected);
    assert_eq!(from_bytes::<AuctionInstruction>(&bytes).unwrap(), ix);
}
