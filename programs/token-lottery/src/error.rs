use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Lottery is already initialized")]
    AlreadyInitialized,
    #[msg("Sale start slot must be before sale end slot")]
    InvalidWindow,
    #[msg("Not authorized")]
    NotAuthorized,
    #[msg("Ticket collection has not been initialized")]
    CollectionNotInitialized,
    #[msg("Ticket sale is not open")]
    SaleNotOpen,
    #[msg("Ticket sale is still open")]
    SaleStillOpen,
    #[msg("All tickets have been sold")]
    SoldOut,
    #[msg("Insufficient funds to buy a ticket")]
    InsufficientFunds,
    #[msg("No tickets were sold")]
    NoTickets,
    #[msg("Randomness already committed")]
    AlreadyCommitted,
    #[msg("Randomness not committed")]
    NotCommitted,
    #[msg("Randomness account is not a valid oracle account")]
    InvalidRandomnessAccount,
    #[msg("Randomness account belongs to the wrong queue")]
    IncorrectRandomnessQueue,
    #[msg("Randomness seed is stale or already revealed")]
    StaleRandomness,
    #[msg("Revealed randomness does not match the commitment")]
    RevealMismatch,
    #[msg("Randomness not revealed yet")]
    RevealNotReady,
    #[msg("Commitment has not expired")]
    CommitmentNotExpired,
    #[msg("Randomness is revealed and must be consumed")]
    RevealAvailable,
    #[msg("Winner not chosen")]
    NotRevealed,
    #[msg("Caller does not hold the winning ticket")]
    NotWinner,
    #[msg("Prize already claimed")]
    AlreadyClaimed,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}

/// How a caller should react to a [`LotteryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad parameters or identity; retrying with the same input fails again.
    Configuration,
    /// Clock is on the wrong side of a boundary; retry after it moves.
    Timing,
    /// Wrong state machine step for the current state.
    Sequencing,
    /// Forged or foreign input. A `RevealMismatch` means the lottery should be abandoned.
    Integrity,
    /// Lamport accounting.
    Funds,
}

impl LotteryError {
    pub fn class(&self) -> ErrorClass {
        use LotteryError::*;
        match self {
            AlreadyInitialized | InvalidWindow | NotAuthorized | CollectionNotInitialized => {
                ErrorClass::Configuration
            }
            SaleNotOpen | SaleStillOpen | CommitmentNotExpired => ErrorClass::Timing,
            SoldOut | NoTickets | AlreadyCommitted | NotCommitted | StaleRandomness
            | RevealNotReady | RevealAvailable | NotRevealed | AlreadyClaimed => {
                ErrorClass::Sequencing
            }
            InvalidRandomnessAccount | IncorrectRandomnessQueue | RevealMismatch | NotWinner => {
                ErrorClass::Integrity
            }
            InsufficientFunds | MathOverflow => ErrorClass::Funds,
        }
    }

    /// True when the same call can succeed later without any other instruction landing first.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Timing || matches!(self, LotteryError::RevealNotReady)
    }
}
