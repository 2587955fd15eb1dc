use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::CommitmentExpired;
use crate::randomness::RandomnessSnapshot;
use crate::state::{LotteryConfig, LotteryState};

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct ExpireCommitment<'info> {
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

    /// CHECK: Owner and layout are validated by `RandomnessSnapshot::load`.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Drops a commitment the oracle never revealed so a new request can be committed.
pub fn process_expire_commitment(ctx: Context<ExpireCommitment>, id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_account = ctx.accounts.randomness_account_data.key();
    let randomness = RandomnessSnapshot::load(
        &ctx.accounts.randomness_account_data,
        &ctx.accounts.lottery_config.randomness_program,
    )?;
    let committed_slot = ctx.accounts.lottery_state.committed_slot;

    ctx.accounts.lottery_state.expire_commitment(
        &ctx.accounts.lottery_config,
        clock.slot,
        randomness_account,
        &randomness,
    )?;

    msg!(
        "Lottery {}: commitment from slot {} expired at slot {}",
        id,
        committed_slot,
        clock.slot
    );
    emit!(CommitmentExpired {
        lottery_id: id,
        randomness_account,
        committed_slot,
    });

    Ok(())
}
