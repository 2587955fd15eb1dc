use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::WinnerCommitted;
use crate::randomness::RandomnessSnapshot;
use crate::state::{LotteryConfig, LotteryState};

/// Accounts required to commit a randomness request for lottery `id`.
///
/// Ensures:
/// 1. Only the authority of the lottery can commit the randomness.
/// 2. The randomness account belongs to the configured oracle program and queue.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct CommitWinner<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_config.bump,
        constraint = lottery_config.authority == payer.key() @ LotteryError::NotAuthorized,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        seeds = [STATE_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_state.bump,
    )]
    pub lottery_state: Account<'info, LotteryState>,

    /// Randomness account from Switchboard.
    /// CHECK: Owner and layout are validated by `RandomnessSnapshot::load`.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Binds the draw to a Switchboard request seeded in the previous slot.
///
/// The request must be committed on the oracle side in the same transaction
/// or the slot before, after the sale closed, and must not be revealed yet.
pub fn process_commit_a_winner(ctx: Context<CommitWinner>, id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_account = ctx.accounts.randomness_account_data.key();
    let randomness = RandomnessSnapshot::load(
        &ctx.accounts.randomness_account_data,
        &ctx.accounts.lottery_config.randomness_program,
    )?;

    ctx.accounts.lottery_state.commit(
        &ctx.accounts.lottery_config,
        clock.slot,
        randomness_account,
        &randomness,
    )?;

    msg!("Lottery {}: committed to {}", id, randomness_account);
    msg!("Seed slot: {}", randomness.seed_slot);

    emit!(WinnerCommitted {
        lottery_id: id,
        randomness_account,
        seed_slot: randomness.seed_slot,
        ticket_count: ctx.accounts.lottery_state.ticket_count,
    });

    Ok(())
}
