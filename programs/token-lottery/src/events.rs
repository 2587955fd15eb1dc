use anchor_lang::prelude::*;

#[event]
pub struct LotteryConfigured {
    pub lottery_id: u64,
    pub authority: Pubkey,
    pub ticket_price: u64,
    pub sale_start_slot: u64,
    pub sale_end_slot: u64,
}

#[event]
pub struct CollectionInitialized {
    pub lottery_id: u64,
    pub collection_mint: Pubkey,
}

#[event]
pub struct TicketPurchased {
    pub lottery_id: u64,
    pub sequence_index: u64,
    pub buyer: Pubkey,
    pub mint: Pubkey,
    pub pot_amount: u64,
}

#[event]
pub struct WinnerCommitted {
    pub lottery_id: u64,
    pub randomness_account: Pubkey,
    pub seed_slot: u64,
    pub ticket_count: u64,
}

#[event]
pub struct WinnerChosen {
    pub lottery_id: u64,
    pub winner_index: u64,
    pub ticket_count: u64,
}

#[event]
pub struct CommitmentExpired {
    pub lottery_id: u64,
    pub randomness_account: Pubkey,
    pub committed_slot: u64,
}

#[event]
pub struct PrizeClaimed {
    pub lottery_id: u64,
    pub winner: Pubkey,
    pub winner_index: u64,
    pub amount: u64,
}
