//! Deterministic addresses for every record a lottery owns.
//!
//! Each lottery is keyed by its `u64` id; tickets additionally by their
//! sequence index. Clients use these helpers to find accounts without
//! scanning, and the account constraints in `instructions` use the same seeds.

use anchor_lang::prelude::*;

use crate::constants::*;

pub fn find_config_address(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED, &id.to_le_bytes()], &crate::ID)
}

pub fn find_state_address(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STATE_SEED, &id.to_le_bytes()], &crate::ID)
}

pub fn find_collection_mint_address(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COLLECTION_MINT_SEED, &id.to_le_bytes()], &crate::ID)
}

pub fn find_collection_token_account_address(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[COLLECTION_TOKEN_ACCOUNT_SEED, &id.to_le_bytes()],
        &crate::ID,
    )
}

pub fn find_ticket_address(id: u64, sequence_index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[TICKET_SEED, &id.to_le_bytes(), &sequence_index.to_le_bytes()],
        &crate::ID,
    )
}

pub fn find_ticket_mint_address(id: u64, sequence_index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[TICKET_MINT_SEED, &id.to_le_bytes(), &sequence_index.to_le_bytes()],
        &crate::ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_deterministic() {
        assert_eq!(find_config_address(7), find_config_address(7));
        assert_eq!(find_ticket_address(7, 3), find_ticket_address(7, 3));
    }

    #[test]
    fn records_of_one_lottery_do_not_collide() {
        let id = 1;
        let addresses = [
            find_config_address(id).0,
            find_state_address(id).0,
            find_collection_mint_address(id).0,
            find_collection_token_account_address(id).0,
            find_ticket_address(id, 0).0,
            find_ticket_mint_address(id, 0).0,
        ];
        for (i, a) in addresses.iter().enumerate() {
            for b in &addresses[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn tickets_are_keyed_by_lottery_and_index() {
        assert_ne!(find_ticket_address(1, 0).0, find_ticket_address(1, 1).0);
        assert_ne!(find_ticket_address(1, 0).0, find_ticket_address(2, 0).0);
        assert_ne!(find_ticket_mint_address(1, 4).0, find_ticket_mint_address(2, 4).0);
    }
}
