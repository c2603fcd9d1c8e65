//! Accounts owned by the token-vault program.

use crate::codec::{from_bytes, key_enum, wire_record};
use crate::error::CodecError;

use solana_program::pubkey::Pubkey;

/// Serialized size of a [`Vault`] account.
pub const MAX_VAULT_SIZE: usize = 1 + 32 + 32 + 32 + 32 + 32 + 1 + 32 + 1 + 1 + 8;
/// Serialized size of an [`ExternalPriceAccount`].
pub const MAX_EXTERNAL_ACCOUNT_SIZE: usize = 1 + 8 + 32 + 1;

key_enum! {
    pub enum VaultKey {
        Uninitialized = 0,
        SafetyDepositBoxV1 = 1,
        ExternalPriceAccountV1 = 2,
        VaultV1 = 3,
    }
}

key_enum! {
    pub enum VaultState {
        Inactive = 0,
        Active = 1,
        Combined = 2,
        Deactivated = 3,
    }
}

wire_record! {
    /// A vault locks a set of tokens behind fractional shares until it is
    /// combined by its authority.
    pub struct Vault {
        pub key: VaultKey,
        /// Token program in use.
        pub token_program: Pubkey,
        /// Mint that produces the fractional shares.
        pub fraction_mint: Pubkey,
        /// Authority who can make changes to the vault.
        pub authority: Pubkey,
        /// Treasury holding fractional shares for redemption by the
        /// authority.
        pub fraction_treasury: Pubkey,
        /// Treasury holding funds that share holders redeem (burn) against
        /// once a buyout happens.
        pub redeem_treasury: Pubkey,
        /// Whether the authority may mint more shares after activation.
        pub allow_further_share_creation: bool,
        /// Points at an [`ExternalPriceAccount`] giving permission and a
        /// price for buyout.
        pub pricing_lookup_address: Pubkey,
        /// While inactive, the order assigned to the next safety deposit
        /// box; while combined, a countdown of boxes left to withdraw.
        pub token_type_count: u8,
        pub state: VaultState,
        /// Price per share at combination time, copied in so later price
        /// changes in the external account cannot alter the payout math.
        pub locked_price_per_share: u64,
    }
}

wire_record! {
    /// One token type held in a vault: its mint and the account storing it.
    pub struct SafetyDepositBox {
        pub key: VaultKey,
        /// The parent vault.
        pub vault: Pubkey,
        /// This particular token's mint.
        pub token_mint: Pubkey,
        /// Account holding the tokens under management.
        pub store: Pubkey,
        /// Order of this box in the vault's registry.
        pub order: u8,
    }
}

wire_record! {
    pub struct ExternalPriceAccount {
        pub key: VaultKey,
        pub price_per_share: u64,
        /// Mint the shares are priced against; normally matches the redeem
        /// treasury's mint.
        pub price_mint: Pubkey,
        /// Whether combination has been allowed for the vault.
        pub allowed_to_combine: bool,
    }
}

pub fn decode_vault(bytes: &[u8]) -> Result<Vault, CodecError> {
    from_bytes(bytes)
}

pub fn decode_safety_deposit_box(bytes: &[u8]) -> Result<SafetyDepositBox, CodecError> {
    from_bytes(bytes)
}

pub fn decode_external_price_account(bytes: &[u8]) -> Result<ExternalPriceAccount, CodecError> {
    from_bytes(bytes)
}
