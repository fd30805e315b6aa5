//! Transaction journal: one event per successful ledger mutation.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vshares_core::{AccountId, OwnerId, Shares};
use vshares_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};

/// Event: an account was opened with shares drawn from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_id: AccountId,
    pub owner_id: OwnerId,
    pub amount: Shares,
    pub occurred_at: DateTime<Utc>,
}

/// Event: an existing account bought shares directly from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesIssued {
    pub account_id: AccountId,
    pub owner_id: OwnerId,
    pub amount: Shares,
    pub previous_balance: Shares,
    pub current_balance: Shares,
    pub occurred_at: DateTime<Utc>,
}

/// Event: shares moved between two accounts. The pool is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesTransferred {
    pub seller_id: AccountId,
    pub seller: OwnerId,
    pub buyer_id: AccountId,
    pub buyer: OwnerId,
    pub amount: Shares,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShareEvent {
    AccountOpened(AccountOpened),
    SharesIssued(SharesIssued),
    SharesTransferred(SharesTransferred),
}

impl Event for ShareEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShareEvent::AccountOpened(_) => "ledger.account.opened",
            ShareEvent::SharesIssued(_) => "ledger.shares.issued",
            ShareEvent::SharesTransferred(_) => "ledger.shares.transferred",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ShareEvent::AccountOpened(e) => e.occurred_at,
            ShareEvent::SharesIssued(e) => e.occurred_at,
            ShareEvent::SharesTransferred(e) => e.occurred_at,
        }
    }
}

/// What subscribers receive.
pub type JournalEntry = EventEnvelope<ShareEvent>;

/// Sequenced fan-out of journal entries.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    bus: InMemoryEventBus<JournalEntry>,
    last_sequence: Mutex<u64>,
}

impl Journal {
    pub(crate) fn subscribe(&self) -> Subscription<JournalEntry> {
        self.bus.subscribe()
    }

    /// Publish under the sequence lock so delivery order matches sequence order.
    pub(crate) fn record(&self, event: ShareEvent) {
        let mut last = self.last_sequence.lock();
        *last += 1;
        let entry = EventEnvelope::new(Uuid::now_v7(), *last, event);
        if let Err(e) = self.bus.publish(entry) {
            tracing::error!(error = ?e, sequence = *last, "failed to publish journal entry");
        }
    }
}
