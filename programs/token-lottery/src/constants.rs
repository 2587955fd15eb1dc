use anchor_lang::prelude::*;

/// Name of the collection NFT; individual tickets append `#<index>`.
#[constant]
pub const NAME: &str = "Token Lottery Ticket";

#[constant]
pub const SYMBOL: &str = "TICKET";

#[constant]
pub const URI: &str = "Token Lottery";

#[constant]
pub const CONFIG_SEED: &[u8] = b"lottery_config";

#[constant]
pub const STATE_SEED: &[u8] = b"lottery_state";

#[constant]
pub const COLLECTION_MINT_SEED: &[u8] = b"collection_mint";

#[constant]
pub const COLLECTION_TOKEN_ACCOUNT_SEED: &[u8] = b"collection_token_account";

#[constant]
pub const TICKET_SEED: &[u8] = b"ticket";

#[constant]
pub const TICKET_MINT_SEED: &[u8] = b"ticket_mint";

/// Switchboard on-demand program on mainnet.
pub const SWITCHBOARD_MAINNET_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("SBondMDrcV3K4kxZR1HNVT7osZxAHVHgYXL5Ze1oMUv");

/// Switchboard on-demand program on devnet.
pub const SWITCHBOARD_DEVNET_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("Aio4gaXjXzJNVLtzwtNVmSqGKpANtXhybbkhtAC94ji2");

/// Tickets one lottery can sell. Index `MAX_TICKETS` would need an eleven digit
/// suffix and push the ticket name past Metaplex's 32 byte limit.
#[constant]
pub const MAX_TICKETS: u64 = 10_000_000_000;

/// Metadata name carried by the ticket with the given sequence index.
///
/// Fits `mpl_token_metadata::MAX_NAME_LENGTH` for every index below [`MAX_TICKETS`].
pub fn ticket_name(sequence_index: u64) -> String {
    format!("{} #{}", NAME, sequence_index)
}
