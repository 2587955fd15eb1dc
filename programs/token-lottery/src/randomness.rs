use anchor_lang::prelude::*;
use solana_program::hash::hashv;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{SWITCHBOARD_DEVNET_PROGRAM_ID, SWITCHBOARD_MAINNET_PROGRAM_ID};
use crate::error::LotteryError;

/// True for the deployed Switchboard on-demand programs.
pub fn is_oracle_program(program: &Pubkey) -> bool {
    *program == SWITCHBOARD_MAINNET_PROGRAM_ID || *program == SWITCHBOARD_DEVNET_PROGRAM_ID
}

/// The parts of a Switchboard randomness account the lottery relies on.
///
/// Copied out of the account so the state machine can be driven without
/// holding a borrow on account data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomnessSnapshot {
    pub queue: Pubkey,
    pub seed_slot: u64,
    pub seed_slothash: [u8; 32],
    pub reveal_slot: u64,
    pub value: [u8; 32],
}

impl RandomnessSnapshot {
    /// Reads a randomness account, rejecting anything not owned by the oracle program.
    ///
    /// `oracle_program` is the one recorded for the lottery; it must also be a
    /// real Switchboard deployment.
    pub fn load(account: &AccountInfo, oracle_program: &Pubkey) -> Result<Self> {
        require!(
            is_oracle_program(account.owner),
            LotteryError::InvalidRandomnessAccount
        );
        require_keys_eq!(
            *account.owner,
            *oracle_program,
            LotteryError::InvalidRandomnessAccount
        );
        let data = RandomnessAccountData::parse(account.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessAccount)?;

        Ok(Self {
            queue: data.queue,
            seed_slot: data.seed_slot,
            seed_slothash: data.seed_slothash,
            reveal_slot: data.reveal_slot,
            value: data.value,
        })
    }

    /// Digest binding a request account to the seed it was committed with.
    ///
    /// Re-committing the same account on the oracle side changes the seed, so
    /// a later reveal of that account no longer hashes to the stored value.
    pub fn commitment(&self, account: &Pubkey) -> [u8; 32] {
        hashv(&[
            account.as_ref(),
            self.queue.as_ref(),
            &self.seed_slot.to_le_bytes(),
            &self.seed_slothash,
        ])
        .to_bytes()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal_slot > self.seed_slot
    }

    /// First eight bytes of the oracle output as a little-endian integer.
    pub fn revealed_value(&self) -> Option<u64> {
        if !self.is_revealed() {
            return None;
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.value[..8]);
        Some(u64::from_le_bytes(bytes))
    }
}

/// Maps a revealed value onto `[0, ticket_count)`.
///
/// Plain modulo reduction; for a `u64` source the bias is below
/// `ticket_count / 2^64`.
pub fn winner_index(value: u64, ticket_count: u64) -> Option<u64> {
    value.checked_rem(ticket_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(seed_slot: u64) -> RandomnessSnapshot {
        RandomnessSnapshot {
            queue: Pubkey::new_unique(),
            seed_slot,
            seed_slothash: [9u8; 32],
            reveal_slot: 0,
            value: [0u8; 32],
        }
    }

    #[test]
    fn load_rejects_accounts_outside_switchboard() {
        let key = Pubkey::new_unique();
        let forged_program = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 512];
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &forged_program,
            false,
            0,
        );
        // even when the lottery was pointed at the forged program
        assert_eq!(
            RandomnessSnapshot::load(&info, &forged_program).unwrap_err(),
            LotteryError::InvalidRandomnessAccount.into()
        );
    }

    #[test]
    fn load_rejects_other_cluster_and_bad_layout() {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 512];
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &SWITCHBOARD_DEVNET_PROGRAM_ID,
            false,
            0,
        );
        assert_eq!(
            RandomnessSnapshot::load(&info, &SWITCHBOARD_MAINNET_PROGRAM_ID).unwrap_err(),
            LotteryError::InvalidRandomnessAccount.into()
        );
        // right owner, but no randomness discriminator
        assert_eq!(
            RandomnessSnapshot::load(&info, &SWITCHBOARD_DEVNET_PROGRAM_ID).unwrap_err(),
            LotteryError::InvalidRandomnessAccount.into()
        );
    }

    #[test]
    fn only_switchboard_deployments_are_oracles() {
        assert!(is_oracle_program(&SWITCHBOARD_MAINNET_PROGRAM_ID));
        assert!(is_oracle_program(&SWITCHBOARD_DEVNET_PROGRAM_ID));
        assert!(!is_oracle_program(&Pubkey::new_unique()));
        assert!(!is_oracle_program(&Pubkey::default()));
    }

    #[test]
    fn unrevealed_snapshot_has_no_value() {
        let s = snapshot(10);
        assert!(!s.is_revealed());
        assert_eq!(s.revealed_value(), None);
    }

    #[test]
    fn revealed_value_reads_little_endian_prefix() {
        let mut s = snapshot(10);
        s.reveal_slot = 12;
        s.value[0] = 23;
        assert_eq!(s.revealed_value(), Some(23));

        s.value[1] = 1;
        assert_eq!(s.revealed_value(), Some(256 + 23));

        // bytes past the first eight do not contribute
        s.value[31] = 0xff;
        assert_eq!(s.revealed_value(), Some(256 + 23));
    }

    #[test]
    fn commitment_survives_reveal() {
        let account = Pubkey::new_unique();
        let mut s = snapshot(10);
        let committed = s.commitment(&account);

        s.reveal_slot = 15;
        s.value = [7u8; 32];
        assert_eq!(s.commitment(&account), committed);
    }

    #[test]
    fn commitment_changes_with_seed_or_account() {
        let account = Pubkey::new_unique();
        let s = snapshot(10);
        let committed = s.commitment(&account);

        let mut reseeded = s;
        reseeded.seed_slot = 11;
        assert_ne!(reseeded.commitment(&account), committed);

        let mut rehashed = s;
        rehashed.seed_slothash = [1u8; 32];
        assert_ne!(rehashed.commitment(&account), committed);

        assert_ne!(s.commitment(&Pubkey::new_unique()), committed);
    }

    #[test]
    fn winner_index_is_in_range() {
        assert_eq!(winner_index(23, 5), Some(3));
        assert_eq!(winner_index(u64::MAX, 7), Some(u64::MAX % 7));
        for v in 0..50u64 {
            assert!(winner_index(v, 9).unwrap() < 9);
        }
        assert_eq!(winner_index(23, 0), None);
    }
}
