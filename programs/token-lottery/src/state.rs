use anchor_lang::prelude::*;

use crate::constants::MAX_TICKETS;
use crate::error::LotteryError;
use crate::randomness::{is_oracle_program, winner_index, RandomnessSnapshot};

/// Immutable parameters of one lottery.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct LotteryConfig {
    /// Caller-chosen identifier, part of every seed this lottery uses.
    pub id: u64,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The price (in lamports) required to purchase a single ticket.
    pub ticket_price: u64,

    /// First slot in which tickets can be bought.
    pub sale_start_slot: u64,

    /// First slot in which tickets can no longer be bought.
    pub sale_end_slot: u64,

    /// The authority or admin responsible for managing this lottery.
    pub authority: Pubkey,

    /// Collection every ticket NFT is verified against.
    /// `Pubkey::default()` until `initialize_lottery` runs.
    pub collection_mint: Pubkey,

    /// Switchboard queue the randomness request must come from.
    pub randomness_queue: Pubkey,

    /// Switchboard program owning `randomness_queue`; randomness accounts must be owned by it too.
    pub randomness_program: Pubkey,

    /// Slots after commit before an unrevealed commitment may be dropped. `0` never expires.
    pub reveal_timeout_slots: u64,
}

/// Parameters accepted by [`LotteryConfig::initialize`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigParams {
    pub id: u64,
    pub ticket_price: u64,
    pub sale_start_slot: u64,
    pub sale_end_slot: u64,
    pub authority: Pubkey,
    pub randomness_queue: Pubkey,
    pub randomness_program: Pubkey,
    pub reveal_timeout_slots: u64,
}

impl LotteryConfig {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn initialize(&mut self, params: ConfigParams, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), LotteryError::AlreadyInitialized);
        require!(
            params.sale_start_slot < params.sale_end_slot,
            LotteryError::InvalidWindow
        );
        require!(
            is_oracle_program(&params.randomness_program),
            LotteryError::IncorrectRandomnessQueue
        );

        self.id = params.id;
        self.bump = bump;
        self.ticket_price = params.ticket_price;
        self.sale_start_slot = params.sale_start_slot;
        self.sale_end_slot = params.sale_end_slot;
        self.authority = params.authority;
        self.collection_mint = Pubkey::default();
        self.randomness_queue = params.randomness_queue;
        self.randomness_program = params.randomness_program;
        self.reveal_timeout_slots = params.reveal_timeout_slots;
        Ok(())
    }

    pub fn has_collection(&self) -> bool {
        self.collection_mint != Pubkey::default()
    }

    /// Records the ticket collection. Write-once.
    pub fn set_collection(&mut self, collection_mint: Pubkey) -> Result<()> {
        require!(!self.has_collection(), LotteryError::AlreadyInitialized);
        self.collection_mint = collection_mint;
        Ok(())
    }

    pub fn is_sale_open(&self, slot: u64) -> bool {
        self.sale_start_slot <= slot && slot < self.sale_end_slot
    }
}

/// Progress of the commit-reveal draw.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawStatus {
    #[default]
    Open,
    Committed,
    Revealed,
}

/// Mutable progress of one lottery. Also escrows the prize pool lamports.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct LotteryState {
    pub id: u64,
    pub bump: u8,

    /// Tickets sold so far; the next ticket gets this index.
    pub ticket_count: u64,

    pub status: DrawStatus,

    /// Set once on reveal, always `< ticket_count`.
    pub winner_index: Option<u64>,

    /// Switchboard randomness account committed for the draw.
    pub randomness_account: Pubkey,

    /// Digest of the committed request, see [`RandomnessSnapshot::commitment`].
    pub commitment: [u8; 32],

    pub committed_slot: u64,

    /// Lamports collected from ticket sales and owed to the winner.
    pub pot_amount: u64,

    pub claimed: bool,
}

impl LotteryState {
    pub fn initialize(&mut self, id: u64, bump: u8) {
        *self = LotteryState {
            id,
            bump,
            ..Default::default()
        };
    }

    /// Assigns the next ticket index and adds the price to the pot.
    ///
    /// The index read and the increment happen in one call, and the runtime
    /// write-locks the state account for the whole instruction, so indices
    /// are dense and never repeat.
    pub fn issue_ticket(&mut self, config: &LotteryConfig, slot: u64, available: u64) -> Result<u64> {
        require!(config.is_sale_open(slot), LotteryError::SaleNotOpen);
        require!(config.has_collection(), LotteryError::CollectionNotInitialized);
        require!(self.ticket_count < MAX_TICKETS, LotteryError::SoldOut);
        require!(available >= config.ticket_price, LotteryError::InsufficientFunds);

        let sequence_index = self.ticket_count;
        let ticket_count = sequence_index
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        let pot_amount = self
            .pot_amount
            .checked_add(config.ticket_price)
            .ok_or(LotteryError::MathOverflow)?;

        self.ticket_count = ticket_count;
        self.pot_amount = pot_amount;
        Ok(sequence_index)
    }

    /// `Open -> Committed`: binds the draw to a fresh, unrevealed oracle request.
    pub fn commit(
        &mut self,
        config: &LotteryConfig,
        slot: u64,
        randomness_account: Pubkey,
        randomness: &RandomnessSnapshot,
    ) -> Result<()> {
        require!(self.status == DrawStatus::Open, LotteryError::AlreadyCommitted);
        require!(slot >= config.sale_end_slot, LotteryError::SaleStillOpen);
        require!(self.ticket_count > 0, LotteryError::NoTickets);
        require_keys_eq!(
            randomness.queue,
            config.randomness_queue,
            LotteryError::IncorrectRandomnessQueue
        );

        // The seed must come from the previous slot, which is already past the
        // sale window, and nobody may have seen its output yet.
        let fresh = slot.checked_sub(1) == Some(randomness.seed_slot)
            && randomness.seed_slot >= config.sale_end_slot
            && !randomness.is_revealed();
        require!(fresh, LotteryError::StaleRandomness);

        self.randomness_account = randomness_account;
        self.commitment = randomness.commitment(&randomness_account);
        self.committed_slot = slot;
        self.status = DrawStatus::Committed;
        Ok(())
    }

    /// `Committed -> Revealed`: verifies the reveal against the commitment and picks the winner.
    pub fn reveal(&mut self, randomness_account: Pubkey, randomness: &RandomnessSnapshot) -> Result<u64> {
        require!(self.status == DrawStatus::Committed, LotteryError::NotCommitted);
        require_keys_eq!(
            randomness_account,
            self.randomness_account,
            LotteryError::RevealMismatch
        );
        require!(
            randomness.commitment(&randomness_account) == self.commitment,
            LotteryError::RevealMismatch
        );

        let value = randomness
            .revealed_value()
            .ok_or(LotteryError::RevealNotReady)?;
        let winner = winner_index(value, self.ticket_count).ok_or(LotteryError::NoTickets)?;

        self.winner_index = Some(winner);
        self.status = DrawStatus::Revealed;
        Ok(winner)
    }

    /// `Committed -> Open` once the oracle has failed to reveal within the timeout.
    ///
    /// Only the committed request itself, still unrevealed, can be dropped. A
    /// reveal blocks expiry so an unfavourable value cannot be discarded, and
    /// a request re-seeded since the commit is refused outright; that lottery
    /// can no longer be drawn fairly.
    pub fn expire_commitment(
        &mut self,
        config: &LotteryConfig,
        slot: u64,
        randomness_account: Pubkey,
        randomness: &RandomnessSnapshot,
    ) -> Result<()> {
        require!(self.status == DrawStatus::Committed, LotteryError::NotCommitted);
        require_keys_eq!(
            randomness_account,
            self.randomness_account,
            LotteryError::RevealMismatch
        );
        require!(
            config.reveal_timeout_slots > 0
                && slot >= self.committed_slot.saturating_add(config.reveal_timeout_slots),
            LotteryError::CommitmentNotExpired
        );
        require!(
            randomness.commitment(&randomness_account) == self.commitment,
            LotteryError::RevealMismatch
        );
        require!(!randomness.is_revealed(), LotteryError::RevealAvailable);

        self.randomness_account = Pubkey::default();
        self.commitment = [0u8; 32];
        self.committed_slot = 0;
        self.status = DrawStatus::Open;
        Ok(())
    }

    /// Marks the prize as paid and returns the payout.
    ///
    /// `held_ticket` is the sequence index of the ticket the caller holds
    /// right now, if any.
    pub fn settle_claim(&mut self, held_ticket: Option<u64>) -> Result<u64> {
        require!(self.status == DrawStatus::Revealed, LotteryError::NotRevealed);
        require!(!self.claimed, LotteryError::AlreadyClaimed);
        require!(
            held_ticket.is_some() && held_ticket == self.winner_index,
            LotteryError::NotWinner
        );

        let payout = self.pot_amount;
        self.pot_amount = 0;
        self.claimed = true;
        Ok(payout)
    }
}

/// Record of one sold ticket.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Ticket {
    pub lottery_id: u64,
    pub sequence_index: u64,
    pub mint: Pubkey,
    pub bump: u8,
}

/// Live mint, metadata and token account state presented at claim time.
#[derive(Debug, Clone, Copy)]
pub struct TicketHolding {
    /// Mint account passed next to the ticket record.
    pub presented_mint: Pubkey,
    /// Collection named by that mint's metadata, `None` unless verified.
    pub verified_collection: Option<Pubkey>,
    /// Mint of the claimant's token account.
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl Ticket {
    /// Sequence index of this ticket if `claimant` holds it right now through `holding`.
    pub fn held_by(
        &self,
        config: &LotteryConfig,
        claimant: Pubkey,
        holding: &TicketHolding,
    ) -> Option<u64> {
        let holds = self.lottery_id == config.id
            && config.has_collection()
            && holding.verified_collection == Some(config.collection_mint)
            && holding.presented_mint == self.mint
            && holding.mint == self.mint
            && holding.owner == claimant
            && holding.amount == 1;
        holds.then_some(self.sequence_index)
    }
}
