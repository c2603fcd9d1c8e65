//! Instruction argument records for the supported programs.
//!
//! Each enum mirrors the tag bytes of its on-chain program's instruction
//! list, but only the instructions a storefront client actually sends are
//! spelled out; any other tag byte fails to decode with `UnknownVariant`.
//! Account-key assembly is the caller's business, these types only own the
//! data payload.

use crate::codec::{
    wire_record, ByteReader, ByteWriter, WireDeserialize, WireSerialize,
};
use crate::error::CodecError;
use crate::state::auction::{PriceFloor, WinnerLimit};
use crate::state::metadata::Data;
use crate::state::metaplex::{AuctionManagerSettingsV1, SafetyDepositConfig, TupleNumericType};

use solana_program::pubkey::Pubkey;

wire_record! {
    pub struct CreateAuctionArgs {
        /// How many winners are allowed for this auction.
        pub winners: WinnerLimit,
        /// Cut-off point that the auction is forced to end by.
        pub end_auction_at: Option<i64>,
        /// How much time after the last bid before the auction ends.
        pub auction_gap: Option<i64>,
        /// Mint of the SPL token used for bidding.
        pub token_mint: Pubkey,
        pub authority: Pubkey,
        /// The resource being auctioned.
        pub resource: Pubkey,
        pub price_floor: PriceFloor,
        pub tick_size: Option<u64>,
        /// Minimum percentage increase each gap-time bid must meet.
        pub gap_tick_size_percentage: Option<u8>,
    }
}

wire_record! {
    pub struct StartAuctionArgs {
        pub resource: Pubkey,
    }
}

wire_record! {
    pub struct PlaceBidArgs {
        pub amount: u64,
        pub resource: Pubkey,
    }
}

wire_record! {
    pub struct CancelBidArgs {
        pub resource: Pubkey,
    }
}

wire_record! {
    pub struct ClaimBidArgs {
        pub resource: Pubkey,
    }
}

/// Tagged instruction data for the auction program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionInstruction {
    CancelBid(CancelBidArgs),
    CreateAuction(CreateAuctionArgs),
    ClaimBid(ClaimBidArgs),
    StartAuction(StartAuctionArgs),
    SetAuthority,
    PlaceBid(PlaceBidArgs),
}

impl WireSerialize for AuctionInstruction {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            AuctionInstruction::CancelBid(args) => {
                writer.write_u8(0);
                args.serialize(writer);
            }
            AuctionInstruction::CreateAuction(args) => {
                writer.write_u8(1);
                args.serialize(writer);
            }
            AuctionInstruction::ClaimBid(args) => {
                writer.write_u8(2);
                args.serialize(writer);
            }
            AuctionInstruction::StartAuction(args) => {
                writer.write_u8(4);
                args.serialize(writer);
            }
            AuctionInstruction::SetAuthority => writer.write_u8(5),
            AuctionInstruction::PlaceBid(args) => {
                writer.write_u8(6);
                args.serialize(writer);
            }
        }
    }
}

impl WireDeserialize for AuctionInstruction {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(match reader.read_u8()? {
            0 => AuctionInstruction::CancelBid(CancelBidArgs::deserialize(reader)?),
            1 => AuctionInstruction::CreateAuction(CreateAuctionArgs::deserialize(reader)?),
            2 => AuctionInstruction::ClaimBid(ClaimBidArgs::deserialize(reader)?),
            4 => AuctionInstruction::StartAuction(StartAuctionArgs::deserialize(reader)?),
            5 => AuctionInstruction::SetAuthority,
            6 => AuctionInstruction::PlaceBid(PlaceBidArgs::deserialize(reader)?),
            other => return Err(CodecError::UnknownVariant(other)),
        })
    }
}

wire_record! {
    pub struct CreateMetadataAccountArgs {
        pub data: Data,
        /// Whether the metadata can be updated in the future.
        pub is_mutable: bool,
    }
}

wire_record! {
    pub struct UpdateMetadataAccountArgs {
        pub data: Option<Data>,
        pub update_authority: Option<Pubkey>,
        pub primary_sale_happened: Option<bool>,
    }
}

wire_record! {
    pub struct CreateMasterEditionArgs {
        /// If set, no more than this number of editions can ever be minted.
        /// Immutable once chosen.
        pub max_supply: Option<u64>,
    }
}

wire_record! {
    pub struct MintPrintingTokensArgs {
        pub supply: u64,
    }
}

wire_record! {
    pub struct MintNewEditionFromMasterEditionViaTokenArgs {
        pub edition: u64,
    }
}

/// Tagged instruction data for the token-metadata program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataInstruction {
    CreateMetadataAccount(CreateMetadataAccountArgs),
    UpdateMetadataAccount(UpdateMetadataAccountArgs),
    UpdatePrimarySaleHappenedViaToken,
    SignMetadata,
    MintPrintingTokens(MintPrintingTokensArgs),
    CreateMasterEdition(CreateMasterEditionArgs),
    MintNewEditionFromMasterEditionViaToken(MintNewEditionFromMasterEditionViaTokenArgs),
    ConvertMasterEditionV1ToV2,
    PuffMetadata,
}

impl WireSerialize for MetadataInstruction {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            MetadataInstruction::CreateMetadataAccount(args) => {
                writer.write_u8(0);
                args.serialize(writer);
            }
            MetadataInstruction::UpdateMetadataAccount(args) => {
                writer.write_u8(1);
                args.serialize(writer);
            }
            MetadataInstruction::UpdatePrimarySaleHappenedViaToken => writer.write_u8(4),
            MetadataInstruction::SignMetadata => writer.write_u8(7),
            MetadataInstruction::MintPrintingTokens(args) => {
                writer.write_u8(9);
                args.serialize(writer);
            }
            MetadataInstruction::CreateMasterEdition(args) => {
                writer.write_u8(10);
                args.serialize(writer);
            }
            MetadataInstruction::MintNewEditionFromMasterEditionViaToken(args) => {
                writer.write_u8(11);
                args.serialize(writer);
            }
            MetadataInstruction::ConvertMasterEditionV1ToV2 => writer.write_u8(12),
            MetadataInstruction::PuffMetadata => writer.write_u8(14),
        }
    }
}

impl WireDeserialize for MetadataInstruction {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(match reader.read_u8()? {
            0 => MetadataInstruction::CreateMetadataAccount(CreateMetadataAccountArgs::deserialize(
                reader,
            )?),
            1 => MetadataInstruction::UpdateMetadataAccount(UpdateMetadataAccountArgs::deserialize(
                reader,
            )?),
            4 => MetadataInstruction::UpdatePrimarySaleHappenedViaToken,
            7 => MetadataInstruction::SignMetadata,
            9 => MetadataInstruction::MintPrintingTokens(MintPrintingTokensArgs::deserialize(
                reader,
            )?),
            10 => MetadataInstruction::CreateMasterEdition(CreateMasterEditionArgs::deserialize(
                reader,
            )?),
            11 => MetadataInstruction::MintNewEditionFromMasterEditionViaToken(
                MintNewEditionFromMasterEditionViaTokenArgs::deserialize(reader)?,
            ),
            12 => MetadataInstruction::ConvertMasterEditionV1ToV2,
            14 => MetadataInstruction::PuffMetadata,
            other => return Err(CodecError::UnknownVariant(other)),
        })
    }
}

wire_record! {
    pub struct InitVaultArgs {
        pub allow_further_share_creation: bool,
    }
}

wire_record! {
    pub struct AmountArgs {
        pub amount: u64,
    }
}

wire_record! {
    pub struct NumberOfShareArgs {
        pub number_of_shares: u64,
    }
}

wire_record! {
    pub struct UpdateExternalPriceAccountArgs {
        pub price_per_share: u64,
        pub price_mint: Pubkey,
        pub allowed_to_combine: bool,
    }
}

/// Tagged instruction data for the token-vault program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultInstruction {
    InitVault(InitVaultArgs),
    AddTokenToInactiveVault(AmountArgs),
    ActivateVault(NumberOfShareArgs),
    CombineVault,
    RedeemShares,
    WithdrawTokenFromSafetyDepositBox(AmountArgs),
    MintFractionalShares(NumberOfShareArgs),
    WithdrawSharesFromTreasury(NumberOfShareArgs),
    AddSharesToTreasury(NumberOfShareArgs),
    UpdateExternalPriceAccount(UpdateExternalPriceAccountArgs),
    SetAuthority,
}

impl WireSerialize for VaultInstruction {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            VaultInstruction::InitVault(args) => {
                writer.write_u8(0);
                args.serialize(writer);
            }
            VaultInstruction::AddTokenToInactiveVault(args) => {
                writer.write_u8(1);
                args.serialize(writer);
            }
            VaultInstruction::ActivateVault(args) => {
                writer.write_u8(2);
                args.serialize(writer);
            }
            VaultInstruction::CombineVault => writer.write_u8(3),
            VaultInstruction::RedeemShares => writer.write_u8(4),
            VaultInstruction::WithdrawTokenFromSafetyDepositBox(args) => {
                writer.write_u8(5);
                args.serialize(writer);
            }
            VaultInstruction::MintFractionalShares(args) => {
                writer.write_u8(6);
                args.serialize(writer);
            }
            VaultInstruction::WithdrawSharesFromTreasury(args) => {
                writer.write_u8(7);
                args.serialize(writer);
            }
            VaultInstruction::AddSharesToTreasury(args) => {
                writer.write_u8(8);
                args.serialize(writer);
            }
            VaultInstruction::UpdateExternalPriceAccount(args) => {
                writer.write_u8(9);
                args.serialize(writer);
            }
            VaultInstruction::SetAuthority => writer.write_u8(10),
        }
    }
}

impl WireDeserialize for VaultInstruction {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(match reader.read_u8()? {
            0 => VaultInstruction::InitVault(InitVaultArgs::deserialize(reader)?),
            1 => VaultInstruction::AddTokenToInactiveVault(AmountArgs::deserialize(reader)?),
            2 => VaultInstruction::ActivateVault(NumberOfShareArgs::deserialize(reader)?),
            3 => VaultInstruction::CombineVault,
            4 => VaultInstruction::RedeemShares,
            5 => VaultInstruction::WithdrawTokenFromSafetyDepositBox(AmountArgs::deserialize(
                reader,
            )?),
            6 => VaultInstruction::MintFractionalShares(NumberOfShareArgs::deserialize(reader)?),
            7 => VaultInstruction::WithdrawSharesFromTreasury(NumberOfShareArgs::deserialize(
                reader,
            )?),
            8 => VaultInstruction::AddSharesToTreasury(NumberOfShareArgs::deserialize(reader)?),
            9 => VaultInstruction::UpdateExternalPriceAccount(
                UpdateExternalPriceAccountArgs::deserialize(reader)?,
            ),
            10 => VaultInstruction::SetAuthority,
            other => return Err(CodecError::UnknownVariant(other)),
        })
    }
}

wire_record! {
    pub struct EmptyPaymentAccountArgs {
        /// Winning config index being redeemed for, None for participation.
        pub winning_config_index: Option<u8>,
        /// Index into that winning config's item list, None for
        /// participation.
        pub winning_config_item_index: Option<u8>,
        /// Index in the metadata creator list, None when the metadata has no
        /// creators.
        pub creator_index: Option<u8>,
    }
}

wire_record! {
    pub struct SetStoreArgs {
        pub public: bool,
    }
}

wire_record! {
    pub struct SetWhitelistedCreatorArgs {
        pub activated: bool,
    }
}

wire_record! {
    pub struct RedeemPrintingV2BidArgs {
        pub edition_offset: u64,
        pub win_index: u64,
    }
}

wire_record! {
    pub struct RedeemParticipationBidV3Args {
        pub win_index: Option<u64>,
    }
}

wire_record! {
    pub struct InitAuctionManagerV2Args {
        pub amount_type: TupleNumericType,
        pub length_type: TupleNumericType,
        /// How many ranges the winner token-type tracker can store. Scale
        /// this with auction complexity; too small a value fails validation.
        pub max_ranges: u64,
    }
}

/// Tagged instruction data for the auction-manager program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaplexInstruction {
    DeprecatedInitAuctionManagerV1(AuctionManagerSettingsV1),
    RedeemBid,
    RedeemFullRightsTransferBid,
    StartAuction,
    ClaimBid,
    EmptyPaymentAccount(EmptyPaymentAccountArgs),
    SetStore(SetStoreArgs),
    SetWhitelistedCreator(SetWhitelistedCreatorArgs),
    DecommissionAuctionManager,
    RedeemPrintingV2Bid(RedeemPrintingV2BidArgs),
    WithdrawMasterEdition,
    InitAuctionManagerV2(InitAuctionManagerV2Args),
    ValidateSafetyDepositBoxV2(SafetyDepositConfig),
    RedeemParticipationBidV3(RedeemParticipationBidV3Args),
}

impl WireSerialize for MetaplexInstruction {
    fn serialize(&self, writer: &mut ByteWriter) {
        match self {
            MetaplexInstruction::DeprecatedInitAuctionManagerV1(settings) => {
                writer.write_u8(0);
                settings.serialize(writer);
            }
            MetaplexInstruction::RedeemBid => writer.write_u8(2),
            MetaplexInstruction::RedeemFullRightsTransferBid => writer.write_u8(3),
            MetaplexInstruction::StartAuction => writer.write_u8(5),
            MetaplexInstruction::ClaimBid => writer.write_u8(6),
            MetaplexInstruction::EmptyPaymentAccount(args) => {
                writer.write_u8(7);
                args.serialize(writer);
            }
            MetaplexInstruction::SetStore(args) => {
                writer.write_u8(8);
                args.serialize(writer);
            }
            MetaplexInstruction::SetWhitelistedCreator(args) => {
                writer.write_u8(9);
                args.serialize(writer);
            }
            MetaplexInstruction::DecommissionAuctionManager => writer.write_u8(13),
            MetaplexInstruction::RedeemPrintingV2Bid(args) => {
                writer.write_u8(14);
                args.serialize(writer);
            }
            MetaplexInstruction::WithdrawMasterEdition => writer.write_u8(15),
            MetaplexInstruction::InitAuctionManagerV2(args) => {
                writer.write_u8(17);
                args.serialize(writer);
            }
            MetaplexInstruction::ValidateSafetyDepositBoxV2(config) => {
                writer.write_u8(18);
                config.serialize(writer);
            }
            MetaplexInstruction::RedeemParticipationBidV3(args) => {
                writer.write_u8(19);
                args.serialize(writer);
            }
        }
    }
}

impl WireDeserialize for MetaplexInstruction {
    fn deserialize(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(match reader.read_u8()? {
            0 => MetaplexInstruction::DeprecatedInitAuctionManagerV1(
                AuctionManagerSettingsV1::deserialize(reader)?,
            ),
            2 => MetaplexInstruction::RedeemBid,
            3 => MetaplexInstruction::RedeemFullRightsTransferBid,
            5 => MetaplexInstruction::StartAuction,
            6 => MetaplexInstruction::ClaimBid,
            7 => MetaplexInstruction::EmptyPaymentAccount(EmptyPaymentAccountArgs::deserialize(
                reader,
            )?),
            8 => MetaplexInstruction::SetStore(SetStoreArgs::deserialize(reader)?),
            9 => MetaplexInstruction::SetWhitelistedCreator(
                SetWhitelistedCreatorArgs::deserialize(reader)?,
            ),
            13 => MetaplexInstruction::DecommissionAuctionManager,
            14 => MetaplexInstruction::RedeemPrintingV2Bid(RedeemPrintingV2BidArgs::deserialize(
                reader,
            )?),
            15 => MetaplexInstruction::WithdrawMasterEdition,
            17 => MetaplexInstruction::InitAuctionManagerV2(InitAuctionManagerV2Args::deserialize(
                reader,
            )?),
            18 => MetaplexInstruction::ValidateSafetyDepositBoxV2(SafetyDepositConfig::deserialize(
                reader,
            )?),
            19 => MetaplexInstruction::RedeemParticipationBidV3(
                RedeemParticipationBidV3Args::deserialize(reader)?,
            ),
            other => return Err(CodecError::UnknownVariant(other)),
        })
    }
}
