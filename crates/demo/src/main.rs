//! Walkthrough of the share ledger: open accounts, buy from the pool, trade
//! between holders, and print every outcome.

mod console;

use std::time::Duration;

use anyhow::Context;

use vshares_ledger::{Account, LedgerConfig, SharePool};

fn main() -> anyhow::Result<()> {
    vshares_observability::init();

    let config = LedgerConfig::from_env().context("invalid ledger configuration")?;
    let pool = SharePool::initialize_with(config).context("failed to initialize share pool")?;
    let journal = pool.journal();

    console::overview(&pool.overview());

    let alice = Account::create(&pool, "alice", 100u64).context("open account for alice")?;
    console::holding(&alice);

    console::transaction("alice buys 50 shares from the service", || {
        alice.acquire_from_pool(50u64)
    });

    let bob = Account::create(&pool, "bob", 20u64).context("open account for bob")?;
    console::holding(&bob);

    console::transaction("bob buys 20 shares from alice", || bob.buy_from(20u64, &alice));
    console::transaction("bob tries to buy 1000 shares from alice", || {
        bob.buy_from(1000u64, &alice)
    });
    console::transaction("alice tries to buy -5 shares from the service", || {
        alice.acquire_from_pool(-5i64)
    });

    if let Err(e) = Account::create(&pool, "mallory", pool.total_supply()) {
        console::refused("open account for mallory", &e);
    }

    console::holding(&alice);
    console::holding(&bob);
    console::overview(&pool.overview());

    // Every mutation above recorded its entry before returning; the short timeout
    // only ends the loop once the buffer is empty.
    let mut printed = 0usize;
    while let Ok(entry) = journal.recv_timeout(Duration::from_millis(50)) {
        console::journal_entry(&entry).context("encode journal entry")?;
        printed += 1;
    }
    tracing::info!(entries = printed, "journal drained");

    Ok(())
}
