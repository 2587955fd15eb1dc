use std::collections::HashMap;

use anchor_lang::prelude::*;
use token_lottery::constants::SWITCHBOARD_MAINNET_PROGRAM_ID;
use token_lottery::error::LotteryError;
use token_lottery::randomness::RandomnessSnapshot;
use token_lottery::seeds::find_ticket_mint_address;
use token_lottery::state::{
    ConfigParams, DrawStatus, LotteryConfig, LotteryState, Ticket, TicketHolding,
};

const LOTTERY_ID: u64 = 1;

/// In-memory stand-in for the records and token balances the runtime keeps.
struct Harness {
    config: LotteryConfig,
    state: LotteryState,
    tickets: Vec<Ticket>,
    balances: HashMap<(Pubkey, Pubkey), u64>,
    queue: Pubkey,
}

impl Harness {
    fn new(ticket_price: u64, sale_start_slot: u64, sale_end_slot: u64) -> Self {
        let queue = Pubkey::new_unique();
        let mut config = LotteryConfig::default();
        config
            .initialize(
                ConfigParams {
                    id: LOTTERY_ID,
                    ticket_price,
                    sale_start_slot,
                    sale_end_slot,
                    authority: Pubkey::new_unique(),
                    randomness_queue: queue,
                    randomness_program: SWITCHBOARD_MAINNET_PROGRAM_ID,
                    reveal_timeout_slots: 100,
                },
                255,
            )
            .unwrap();
        config.set_collection(Pubkey::new_unique()).unwrap();

        let mut state = LotteryState::default();
        state.initialize(LOTTERY_ID, 254);

        Self {
            config,
            state,
            tickets: Vec::new(),
            balances: HashMap::new(),
            queue,
        }
    }

    fn buy(&mut self, buyer: Pubkey, slot: u64) -> Result<u64> {
        let index = self
            .state
            .issue_ticket(&self.config, slot, self.config.ticket_price)?;
        let (mint, bump) = find_ticket_mint_address(LOTTERY_ID, index);
        self.tickets.push(Ticket {
            lottery_id: LOTTERY_ID,
            sequence_index: index,
            mint,
            bump,
        });
        self.balances.insert((mint, buyer), 1);
        Ok(index)
    }

    fn transfer_ticket(&mut self, index: u64, from: Pubkey, to: Pubkey) {
        let mint = self.tickets[index as usize].mint;
        self.balances.insert((mint, from), 0);
        self.balances.insert((mint, to), 1);
    }

    fn claim(&mut self, claimant: Pubkey, index: u64) -> Result<u64> {
        let ticket = &self.tickets[index as usize];
        let holding = TicketHolding {
            presented_mint: ticket.mint,
            verified_collection: Some(self.config.collection_mint),
            mint: ticket.mint,
            owner: claimant,
            amount: *self.balances.get(&(ticket.mint, claimant)).unwrap_or(&0),
        };
        let held = ticket.held_by(&self.config, claimant, &holding);
        self.state.settle_claim(held)
    }

    fn request(&self, seed_slot: u64) -> RandomnessSnapshot {
        RandomnessSnapshot {
            queue: self.queue,
            seed_slot,
            seed_slothash: [42u8; 32],
            reveal_slot: 0,
            value: [0u8; 32],
        }
    }
}

fn reveal(mut request: RandomnessSnapshot, reveal_slot: u64, value: u64) -> RandomnessSnapshot {
    request.reveal_slot = reveal_slot;
    request.value[..8].copy_from_slice(&value.to_le_bytes());
    request
}

#[test]
fn end_to_end_free_lottery() {
    let mut h = Harness::new(0, 0, 10);
    let buyers: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();

    for (slot, buyer) in (1..=5u64).zip(&buyers) {
        assert_eq!(h.buy(*buyer, slot).unwrap(), slot - 1);
    }
    assert_eq!(
        h.buy(Pubkey::new_unique(), 11).unwrap_err(),
        LotteryError::SaleNotOpen.into()
    );
    assert_eq!(h.state.ticket_count, 5);

    let oracle_account = Pubkey::new_unique();
    let request = h.request(10);
    h.state
        .commit(&h.config, 11, oracle_account, &request)
        .unwrap();
    assert_eq!(h.state.status, DrawStatus::Committed);

    let winner = h
        .state
        .reveal(oracle_account, &reveal(request, 14, 23))
        .unwrap();
    assert_eq!(winner, 3);
    assert_eq!(h.state.winner_index, Some(3));

    assert_eq!(h.claim(buyers[3], 3).unwrap(), 0);
    assert!(h.state.claimed);
    assert_eq!(
        h.claim(buyers[3], 3).unwrap_err(),
        LotteryError::AlreadyClaimed.into()
    );
}

#[test]
fn paid_lottery_pays_pot_once_to_current_holder() {
    let mut h = Harness::new(1_000, 100, 200);
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let carol = Pubkey::new_unique();

    for slot in 100..104 {
        h.buy(alice, slot).unwrap();
    }
    h.buy(bob, 150).unwrap();
    assert_eq!(h.state.pot_amount, 5_000);

    // sale closes at 200, seed from slot 205 committed at 206
    let oracle_account = Pubkey::new_unique();
    let request = h.request(205);
    h.state
        .commit(&h.config, 206, oracle_account, &request)
        .unwrap();
    // 7 mod 5 = 2, one of alice's tickets
    let winner = h
        .state
        .reveal(oracle_account, &reveal(request, 300, 7))
        .unwrap();
    assert_eq!(winner, 2);

    h.transfer_ticket(2, alice, carol);

    assert_eq!(
        h.claim(alice, 2).unwrap_err(),
        LotteryError::NotWinner.into()
    );
    assert_eq!(h.claim(bob, 4).unwrap_err(), LotteryError::NotWinner.into());
    assert_eq!(h.state.pot_amount, 5_000);

    assert_eq!(h.claim(carol, 2).unwrap(), 5_000);
    assert_eq!(h.state.pot_amount, 0);
    assert_eq!(
        h.claim(carol, 2).unwrap_err(),
        LotteryError::AlreadyClaimed.into()
    );
    assert_eq!(h.state.pot_amount, 0);
}

#[test]
fn interleaved_buyers_get_a_dense_range() {
    let mut h = Harness::new(10, 0, 1_000);
    let buyers: Vec<Pubkey> = (0..7).map(|_| Pubkey::new_unique()).collect();

    let mut indices = Vec::new();
    for round in 0..20u64 {
        let buyer = buyers[(round * 3 % 7) as usize];
        indices.push(h.buy(buyer, round * 13 % 1_000).unwrap());
        if round % 4 == 0 {
            // failed purchases in between must not consume an index
            assert!(h.buy(buyer, 1_000 + round).is_err());
        }
    }

    assert_eq!(indices, (0..20).collect::<Vec<u64>>());
    assert_eq!(h.state.ticket_count, 20);
    assert_eq!(h.state.pot_amount, 200);

    let mints: std::collections::HashSet<Pubkey> = h.tickets.iter().map(|t| t.mint).collect();
    assert_eq!(mints.len(), 20);
}

#[test]
fn empty_lottery_cannot_draw() {
    let mut h = Harness::new(5, 0, 10);
    let request = h.request(10);
    assert_eq!(
        h.state
            .commit(&h.config, 11, Pubkey::new_unique(), &request)
            .unwrap_err(),
        LotteryError::NoTickets.into()
    );
    assert_eq!(h.state.status, DrawStatus::Open);
    assert_eq!(h.state.winner_index, None);
}

#[test]
fn stuck_oracle_can_be_replaced_after_timeout() {
    let mut h = Harness::new(0, 0, 10);
    for slot in 0..3 {
        h.buy(Pubkey::new_unique(), slot).unwrap();
    }

    let first = Pubkey::new_unique();
    let first_request = h.request(10);
    h.state
        .commit(&h.config, 11, first, &first_request)
        .unwrap();

    assert_eq!(
        h.state.reveal(first, &first_request).unwrap_err(),
        LotteryError::RevealNotReady.into()
    );
    assert_eq!(
        h.state
            .expire_commitment(&h.config, 50, first, &first_request)
            .unwrap_err(),
        LotteryError::CommitmentNotExpired.into()
    );
    h.state
        .expire_commitment(&h.config, 111, first, &first_request)
        .unwrap();

    let second = Pubkey::new_unique();
    let second_request = h.request(120);
    h.state
        .commit(&h.config, 121, second, &second_request)
        .unwrap();

    // the abandoned request is no longer accepted
    assert_eq!(
        h.state
            .reveal(first, &reveal(first_request, 130, 1))
            .unwrap_err(),
        LotteryError::RevealMismatch.into()
    );
    let winner = h
        .state
        .reveal(second, &reveal(second_request, 125, 5))
        .unwrap();
    assert_eq!(winner, 2);
}
