use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::{Metadata, MetadataAccount},
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::PrizeClaimed;
use crate::state::{LotteryConfig, LotteryState, Ticket, TicketHolding};

/// Accounts required for claiming the prize of lottery `id`.
///
/// Ownership is read from the live token account the caller presents, not
/// from who bought the ticket, so a ticket that changed hands pays its
/// current holder.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct ClaimPrize<'info> {
    /// The claimant; receives the prize.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Box<Account<'info, LotteryConfig>>,

    /// Lottery state; pays the prize out of its balance.
    #[account(
        mut,
        seeds = [STATE_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_state.bump,
    )]
    pub lottery_state: Box<Account<'info, LotteryState>>,

    /// Record of the ticket being claimed with.
    pub ticket: Box<Account<'info, Ticket>>,

    pub ticket_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token account through which the caller holds the ticket.
    pub holder_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Metadata account for the ticket NFT.
    #[account(
        seeds = [b"metadata", token_metadata_program.key().as_ref(), ticket_mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata: Box<Account<'info, MetadataAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub token_metadata_program: Program<'info, Metadata>,
}

/// Processes the prize claim for the winner.
///
/// Steps:
/// 1. Collect the live mint, metadata and token account state and check the caller holds the ticket.
/// 2. Settle the claim against the state (revealed, unclaimed, winning index).
/// 3. Move the pot lamports from the state account to the caller.
pub fn process_claim_prize(ctx: Context<ClaimPrize>, id: u64) -> Result<()> {
    let config = &ctx.accounts.lottery_config;
    let ticket = &ctx.accounts.ticket;
    let holder = &ctx.accounts.holder_token_account;
    let claimant = ctx.accounts.payer.key();

    let verified_collection = ctx
        .accounts
        .metadata
        .collection
        .as_ref()
        .filter(|collection| collection.verified)
        .map(|collection| collection.key);
    let holding = TicketHolding {
        presented_mint: ctx.accounts.ticket_mint.key(),
        verified_collection,
        mint: holder.mint,
        owner: holder.owner,
        amount: holder.amount,
    };
    let held_ticket = ticket.held_by(config, claimant, &holding);

    msg!(
        "Lottery {}: claim by {} with ticket {}",
        id,
        claimant,
        ticket.sequence_index
    );

    let payout = ctx.accounts.lottery_state.settle_claim(held_ticket)?;

    let lottery_info = ctx.accounts.lottery_state.to_account_info();
    let payer_info = ctx.accounts.payer.to_account_info();
    let remaining = lottery_info
        .lamports()
        .checked_sub(payout)
        .ok_or(LotteryError::MathOverflow)?;
    let credited = payer_info
        .lamports()
        .checked_add(payout)
        .ok_or(LotteryError::MathOverflow)?;
    **lottery_info.try_borrow_mut_lamports()? = remaining;
    **payer_info.try_borrow_mut_lamports()? = credited;

    msg!("Paid {} lamports", payout);
    emit!(PrizeClaimed {
        lottery_id: id,
        winner: claimant,
        winner_index: ticket.sequence_index,
        amount: payout,
    });

    Ok(())
}
