use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::metadata::{
    create_master_edition_v3, create_metadata_accounts_v3, set_and_verify_sized_collection_item,
    CreateMasterEditionV3, CreateMetadataAccountsV3, Metadata, SetAndVerifySizedCollectionItem,
};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};
use mpl_token_metadata::types::{Creator, DataV2};

use crate::constants::*;
use crate::events::TicketPurchased;
use crate::state::{LotteryConfig, LotteryState, Ticket};

/// Accounts required to buy the next ticket of lottery `id`.
///
/// The ticket record and mint are seeded with the current `ticket_count`,
/// so two purchases can never produce the same address.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct BuyTicket<'info> {
    /// The account paying for the ticket.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Box<Account<'info, LotteryConfig>>,

    /// Lottery state; also receives the ticket price.
    #[account(
        mut,
        seeds = [STATE_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_state.bump,
    )]
    pub lottery_state: Box<Account<'info, LotteryState>>,

    #[account(
        init,
        payer = payer,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [
            TICKET_SEED,
            id.to_le_bytes().as_ref(),
            lottery_state.ticket_count.to_le_bytes().as_ref()
        ],
        bump,
    )]
    pub ticket: Box<Account<'info, Ticket>>,

    #[account(
        init,
        payer = payer,
        seeds = [
            TICKET_MINT_SEED,
            id.to_le_bytes().as_ref(),
            lottery_state.ticket_count.to_le_bytes().as_ref()
        ],
        bump,
        mint::decimals = 0,
        mint::authority = collection_mint,
        mint::freeze_authority = collection_mint,
        mint::token_program = token_program
    )]
    pub ticket_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Buyer's token account receiving the ticket.
    #[account(
        init,
        payer = payer,
        associated_token::mint = ticket_mint,
        associated_token::authority = payer,
        associated_token::token_program = token_program,
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Initialized by the token metadata program.
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), ticket_mint.key().as_ref()],
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
            ticket_mint.key().as_ref(),
            b"edition"
        ],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub master_edition: UncheckedAccount<'info>,

    /// CHECK: Validated by the token metadata program during collection verification.
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), collection_mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub collection_metadata: UncheckedAccount<'info>,

    /// CHECK: Validated by the token metadata program during collection verification.
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
    pub collection_master_edition: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [COLLECTION_MINT_SEED, id.to_le_bytes().as_ref()],
        bump,
    )]
    pub collection_mint: Box<InterfaceAccount<'info, Mint>>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,

    pub token_metadata_program: Program<'info, Metadata>,

    pub rent: Sysvar<'info, Rent>,
}

/// Buys a lottery ticket for the caller.
///
/// Steps performed:
/// 1. Assign the next sequence index (checks sale window, collection and funds).
/// 2. Transfer the ticket price from payer to the lottery state account.
/// 3. Mint the ticket NFT into the payer's associated token account.
/// 4. Create metadata and master edition for the ticket.
/// 5. Verify the ticket as part of the lottery collection.
/// 6. Write the ticket record.
///
/// Any failure reverts the whole purchase, including the counter increment.
pub fn process_buy_ticket(ctx: Context<BuyTicket>, id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let price = ctx.accounts.lottery_config.ticket_price;
    let available = ctx.accounts.payer.lamports();

    let sequence_index =
        ctx.accounts
            .lottery_state
            .issue_ticket(&ctx.accounts.lottery_config, clock.slot, available)?;
    msg!(
        "Lottery {}: selling ticket {} at slot {}",
        id,
        sequence_index,
        clock.slot
    );

    if price > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.lottery_state.to_account_info(),
                },
            ),
            price,
        )?;
    }

    let id_bytes = id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        COLLECTION_MINT_SEED,
        &id_bytes,
        &[ctx.bumps.collection_mint],
    ]];

    mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.ticket_mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.collection_mint.to_account_info(),
            },
            signer_seeds,
        ),
        1,
    )?;

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: ctx.accounts.metadata.to_account_info(),
                mint: ctx.accounts.ticket_mint.to_account_info(),
                mint_authority: ctx.accounts.collection_mint.to_account_info(),
                update_authority: ctx.accounts.collection_mint.to_account_info(),
                payer: ctx.accounts.payer.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        DataV2 {
            name: ticket_name(sequence_index),
            symbol: SYMBOL.to_string(),
            uri: URI.to_string(),
            seller_fee_basis_points: 0,
            creators: Some(vec![Creator {
                address: ctx.accounts.collection_mint.key(),
                verified: false,
                share: 100,
            }]),
            collection: None,
            uses: None,
        },
        true,
        true,
        None,
    )?;

    create_master_edition_v3(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            CreateMasterEditionV3 {
                payer: ctx.accounts.payer.to_account_info(),
                mint: ctx.accounts.ticket_mint.to_account_info(),
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

    // verify nft as part of collection
    set_and_verify_sized_collection_item(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            SetAndVerifySizedCollectionItem {
                metadata: ctx.accounts.metadata.to_account_info(),
                collection_authority: ctx.accounts.collection_mint.to_account_info(),
                payer: ctx.accounts.payer.to_account_info(),
                update_authority: ctx.accounts.collection_mint.to_account_info(),
                collection_mint: ctx.accounts.collection_mint.to_account_info(),
                collection_metadata: ctx.accounts.collection_metadata.to_account_info(),
                collection_master_edition: ctx.accounts.collection_master_edition.to_account_info(),
            },
            signer_seeds,
        ),
        None,
    )?;

    let ticket_mint = ctx.accounts.ticket_mint.key();
    let ticket = &mut ctx.accounts.ticket;
    ticket.lottery_id = id;
    ticket.sequence_index = sequence_index;
    ticket.mint = ticket_mint;
    ticket.bump = ctx.bumps.ticket;

    emit!(TicketPurchased {
        lottery_id: id,
        sequence_index,
        buyer: ctx.accounts.payer.key(),
        mint: ticket_mint,
        pot_amount: ctx.accounts.lottery_state.pot_amount,
    });

    Ok(())
}
