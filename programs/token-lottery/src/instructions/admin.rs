use anchor_lang::prelude::*;
use anchor_spl::metadata::{
    create_master_edition_v3, create_metadata_accounts_v3, sign_metadata, CreateMasterEditionV3,
    CreateMetadataAccountsV3, Metadata, SignMetadata,
};
use anchor_spl::token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface};
use mpl_token_metadata::types::{CollectionDetails, Creator, DataV2};

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::{CollectionInitialized, LotteryConfigured};
use crate::state::{ConfigParams, LotteryConfig, LotteryState};

/// Accounts required to initialize the configuration of lottery `id`.
///
/// Both records use `init_if_needed` so that a repeated call reaches the
/// handler and fails with `AlreadyInitialized` instead of a runtime error.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct InitializeConfig<'info> {
    /// Pays for the records and becomes the lottery authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump
    )]
    pub lottery_config: Box<Account<'info, LotteryConfig>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + LotteryState::INIT_SPACE,
        seeds = [STATE_SEED, id.to_le_bytes().as_ref()],
        bump
    )]
    pub lottery_state: Box<Account<'info, LotteryState>>,

    /// Switchboard queue the draw must use.
    /// CHECK: Its owner must be a Switchboard on-demand program; key and owner are recorded.
    pub randomness_queue: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to create the ticket collection of lottery `id`.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct InitializeLottery<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_config.bump,
        constraint = lottery_config.authority == payer.key() @ LotteryError::NotAuthorized,
    )]
    pub lottery_config: Box<Account<'info, LotteryConfig>>,

    #[account(
        init_if_needed,
        payer = payer,
        mint::decimals = 0,
        mint::authority = collection_mint,
        mint::freeze_authority = collection_mint,
        mint::token_program = token_program,
        seeds = [COLLECTION_MINT_SEED, id.to_le_bytes().as_ref()],
        bump,
    )]
    pub collection_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: Initialized by the token metadata program.
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), collection_mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata: UncheckedAccount<'info>,

    /// CHECK: Initialized by the token metadata program.
    #[account(
        mut,
        seeds = [
            b"metadata",
            token_metadata_program.key().as_ref(),
            collection_mint.key().as_ref(),
            b"edition"
        ],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub master_edition: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        seeds = [COLLECTION_TOKEN_ACCOUNT_SEED, id.to_le_bytes().as_ref()],
        bump,
        token::mint = collection_mint,
        token::authority = collection_mint,
        token::token_program = token_program,
    )]
    pub collection_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,

    pub token_metadata_program: Program<'info, Metadata>,

    pub rent: Sysvar<'info, Rent>,
}

/// Creates the configuration and a zeroed state for lottery `id`.
///
/// The signer becomes the authority. The randomness queue must be owned by
/// Switchboard; that owner is recorded as the oracle program every randomness
/// account must belong to.
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    id: u64,
    ticket_price: u64,
    sale_start_slot: u64,
    sale_end_slot: u64,
    reveal_timeout_slots: u64,
) -> Result<()> {
    let params = ConfigParams {
        id,
        ticket_price,
        sale_start_slot,
        sale_end_slot,
        authority: ctx.accounts.payer.key(),
        randomness_queue: ctx.accounts.randomness_queue.key(),
        randomness_program: *ctx.accounts.randomness_queue.owner,
        reveal_timeout_slots,
    };
    ctx.accounts
        .lottery_config
        .initialize(params, ctx.bumps.lottery_config)?;
    ctx.accounts
        .lottery_state
        .initialize(id, ctx.bumps.lottery_state);

    msg!(
        "Lottery {} configured: price {}, sale slots [{}, {})",
        id,
        ticket_price,
        sale_start_slot,
        sale_end_slot
    );
    emit!(LotteryConfigured {
        lottery_id: id,
        authority: params.authority,
        ticket_price,
        sale_start_slot,
        sale_end_slot,
    });

    Ok(())
}

/// Creates the sized collection NFT every ticket of lottery `id` is verified against:
/// - mints the single collection token
/// - creates the metadata and master edition accounts
/// - signs the metadata as creator
pub fn process_initialize_lottery(ctx: Context<InitializeLottery>, id: u64) -> Result<()> {
    let collection_mint = ctx.accounts.collection_mint.key();
    ctx.accounts.lottery_config.set_collection(collection_mint)?;

    let id_bytes = id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        COLLECTION_MINT_SEED,
        &id_bytes,
        &[ctx.bumps.collection_mint],
    ]];

    msg!("Minting collection token");
    mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.collection_mint.to_account_info(),
                to: ctx.accounts.collection_token_account.to_account_info(),
                authority: ctx.accounts.collection_mint.to_account_info(),
            },
            signer_seeds,
        ),
        1,
    )?;

    msg!("Creating metadata account");
    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: ctx.accounts.metadata.to_account_info(),
                mint: ctx.accounts.collection_mint.to_account_info(),
                mint_authority: ctx.accounts.collection_mint.to_account_info(),
                update_authority: ctx.accounts.collection_mint.to_account_info(),
                payer: ctx.accounts.payer.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        DataV2 {
            name: NAME.to_string(),
            symbol: SYMBOL.to_string(),
            uri: URI.to_string(),
            seller_fee_basis_points: 0,
            creators: Some(vec![Creator {
                address: collection_mint,
                verified: false,
                share: 100,
            }]),
            collection: None,
            uses: None,
        },
        true,
        true,
        Some(CollectionDetails::V1 { size: 0 }),
    )?;

    msg!("Creating master edition account");
    create_master_edition_v3(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            CreateMasterEditionV3 {
                payer: ctx.accounts.payer.to_account_info(),
                mint: ctx.accounts.collection_mint.to_account_info(),
                edition: ctx.accounts.master_edition.to_account_info(),
                mint_authority: ctx.accounts.collection_mint.to_account_info(),
                update_authority: ctx.accounts.collection_mint.to_account_info(),
                metadata: ctx.accounts.metadata.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        Some(0),
    )?;

    msg!("Verifying collection");
    sign_metadata(CpiContext::new_with_signer(
        ctx.accounts.token_metadata_program.to_account_info(),
        SignMetadata {
            creator: ctx.accounts.collection_mint.to_account_info(),
            metadata: ctx.accounts.metadata.to_account_info(),
        },
        signer_seeds,
    ))?;

    emit!(CollectionInitialized {
        lottery_id: id,
        collection_mint,
    });

    Ok(())
}
