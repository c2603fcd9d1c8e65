//! Program addresses the client talks to.
//!
//! Instead of a process-wide mutable registry, callers pass a [`ProgramSet`]
//! value around. The default set is the well-known mainnet deployment; a
//! store that was created against other deployments yields its own set via
//! [`ProgramSet::for_store`].

use crate::state::metaplex::Store;

use solana_program::pubkey::Pubkey;

pub mod auction_program {
    solana_program::declare_id!("auctxRXPeJoc4817jDhf4HbjnhEcr1cCXenosMhK5R8");
}

pub mod vault_program {
    solana_program::declare_id!("vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn");
}

pub mod metadata_program {
    solana_program::declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
}

pub mod metaplex_program {
    solana_program::declare_id!("p1exdMJcjVao65QdewkaZRUnU6VPSXhus9n2GzWfh98");
}

pub mod packs_program {
    solana_program::declare_id!("packFeFNZzMfD9aVWL7QbGz1WcU7R9zpf6pvNsw2BLu");
}

pub mod token_program {
    solana_program::declare_id!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}

/// The set of program ids one storefront operates against. Immutable once
/// built; construct a new value to target a different deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSet {
    pub auction: Pubkey,
    pub vault: Pubkey,
    pub metadata: Pubkey,
    pub metaplex: Pubkey,
    pub packs: Pubkey,
    pub token: Pubkey,
}

impl Default for ProgramSet {
    fn default() -> Self {
        Self {
            auction: auction_program::id(),
            vault: vault_program::id(),
            metadata: metadata_program::id(),
            metaplex: metaplex_program::id(),
            packs: packs_program::id(),
            token: token_program::id(),
        }
    }
}

impl ProgramSet {
    /// The addresses a decoded store record was created against. The store
    /// does not carry metaplex or packs ids, those stay as in `self`.
    pub fn for_store(&self, store: &Store) -> Self {
        Self {
            auction: store.auction_program,
            vault: store.token_vault_program,
            metadata: store.token_metadata_program,
            metaplex: self.metaplex,
            packs: self.packs,
            token: store.token_program,
        }
    }
}
