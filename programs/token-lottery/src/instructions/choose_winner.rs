use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::WinnerChosen;
use crate::randomness::RandomnessSnapshot;
use crate::state::{DrawStatus, LotteryConfig, LotteryState};

/// Accounts required to choose the winner of lottery `id`.
///
/// Anyone may submit the reveal, so whoever committed cannot sit on an
/// unfavourable outcome.
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct ChooseWinner<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        seeds = [STATE_SEED, id.to_le_bytes().as_ref()],
        bump = lottery_state.bump,
    )]
    pub lottery_state: Account<'info, LotteryState>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: Must be the committed account; its data is validated in the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_choose_a_winner(ctx: Context<ChooseWinner>, id: u64) -> Result<()> {
    let randomness_account = ctx.accounts.randomness_account_data.key();

    // Reject a foreign account before touching its data.
    let state = &ctx.accounts.lottery_state;
    require!(
        state.status == DrawStatus::Committed,
        LotteryError::NotCommitted
    );
    require_keys_eq!(
        randomness_account,
        state.randomness_account,
        LotteryError::RevealMismatch
    );

    let randomness = RandomnessSnapshot::load(
        &ctx.accounts.randomness_account_data,
        &ctx.accounts.lottery_config.randomness_program,
    )?;

    let winner = ctx
        .accounts
        .lottery_state
        .reveal(randomness_account, &randomness)?;
    let ticket_count = ctx.accounts.lottery_state.ticket_count;

    msg!("Reveal slot: {}", randomness.reveal_slot);
    msg!("Ticket count: {}", ticket_count);
    msg!("Lottery {}: winner is ticket {}", id, winner);

    emit!(WinnerChosen {
        lottery_id: id,
        winner_index: winner,
        ticket_count,
    });

    Ok(())
}
