#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

/// Program-wide constants: ticket metadata and record seeds.
pub mod constants;

/// Custom error types returned by every instruction.
pub mod error;

/// Events emitted on each state transition.
pub mod events;

/// Instruction handlers and their account contexts.
pub mod instructions;

/// Switchboard randomness parsing and commitment digests.
pub mod randomness;

/// Address derivation for every record a lottery owns.
pub mod seeds;

/// On-chain records and the lottery state machine.
pub mod state;

declare_id!("2RTh2Y4e2N421EbSnUYTKdGqDHJH7etxZb3VrWDMpNMY");

#[program]
pub mod token_lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        id: u64,
        ticket_price: u64,
        sale_start_slot: u64,
        sale_end_slot: u64,
        reveal_timeout_slots: u64,
    ) -> Result<()> {
        process_initialize_config(
            ctx,
            id,
            ticket_price,
            sale_start_slot,
            sale_end_slot,
            reveal_timeout_slots,
        )
    }

    pub fn initialize_lottery(ctx: Context<InitializeLottery>, id: u64) -> Result<()> {
        process_initialize_lottery(ctx, id)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, id: u64) -> Result<()> {
        process_buy_ticket(ctx, id)
    }

    pub fn commit_a_winner(ctx: Context<CommitWinner>, id: u64) -> Result<()> {
        process_commit_a_winner(ctx, id)
    }

    pub fn choose_a_winner(ctx: Context<ChooseWinner>, id: u64) -> Result<()> {
        process_choose_a_winner(ctx, id)
    }

    pub fn expire_commitment(ctx: Context<ExpireCommitment>, id: u64) -> Result<()> {
        process_expire_commitment(ctx, id)
    }

    pub fn claim_prize(ctx: Context<ClaimPrize>, id: u64) -> Result<()> {
        process_claim_prize(ctx, id)
    }
}
