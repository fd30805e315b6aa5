//! Share ledger: a fixed pool of virtual shares split between unissued and issued
//! holdings, plus the accounts that own the issued part.
//!
//! Pure in-memory logic: no IO, no persistence. Every public transfer operation
//! conserves `free + issued == total_supply` and never drives a balance negative.

pub mod account;
pub mod config;
pub mod guard;
pub mod journal;
mod lock;
pub mod outcome;
pub mod pool;

pub use account::Account;
pub use config::LedgerConfig;
pub use guard::guarded;
pub use journal::{AccountOpened, JournalEntry, ShareEvent, SharesIssued, SharesTransferred};
pub use outcome::TxOutcome;
pub use pool::{PoolOverview, SharePool};

pub use vshares_core::{AccountId, LedgerError, LedgerResult, OwnerId, Shares};
