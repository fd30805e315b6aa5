//! Console presentation of ledger results.

use vshares_ledger::{Account, JournalEntry, LedgerError, LedgerResult, PoolOverview, TxOutcome};

const RULE: &str = "                ---------------------------------------";

pub fn overview(overview: &PoolOverview) {
    println!();
    println!(" TOTAL VIRTUAL SHARES: {}", overview.total_supply);
    println!(" FREE: {}", overview.free);
    println!(" BOUGHT: {}", overview.issued);
}

pub fn holding(account: &Account) {
    println!(" {account}");
}

/// Run one transaction between separator lines and print its outcome.
pub fn transaction<F>(label: &str, run: F)
where
    F: FnOnce() -> LedgerResult<TxOutcome>,
{
    println!();
    println!(" >> {label}");
    match run() {
        Ok(outcome) => println!(" {outcome}"),
        Err(e) => refused(label, &e),
    }
    println!("{RULE}");
}

pub fn refused(label: &str, err: &LedgerError) {
    println!(" refused ({label}): {err}");
}

/// One journal line: sequence, event id, then the event as JSON.
pub fn journal_entry(entry: &JournalEntry) -> serde_json::Result<()> {
    let payload = serde_json::to_string(entry.payload())?;
    println!(" #{} {} {payload}", entry.sequence_number(), entry.event_id());
    Ok(())
}
