pub mod admin;
pub mod buy_ticket;
pub mod choose_winner;
pub mod claim_prize;
pub mod commit_winner;
pub mod expire_commitment;

pub use admin::*;
pub use buy_ticket::*;
pub use choose_winner::*;
pub use claim_prize::*;
pub use commit_winner::*;
pub use expire_commitment::*;
