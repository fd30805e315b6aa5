//! Shareholder accounts and the transfers between them.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use tracing::{info, warn};

use vshares_core::{AccountId, Entity, LedgerError, LedgerResult, OwnerId, Shares};

use crate::guard::guarded;
use crate::journal::{AccountOpened, ShareEvent, SharesIssued, SharesTransferred};
use crate::lock;
use crate::outcome::TxOutcome;
use crate::pool::SharePool;

/// One shareholder.
///
/// Lock order: account balances (ascending by owner id, then account id) before
/// the pool. Every operation below follows it.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    owner_id: OwnerId,
    pool: Arc<SharePool>,
    balance: Mutex<Shares>,
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Account {
    /// Open an account holding `amount` shares drawn from `pool`.
    ///
    /// `amount` must be positive, strictly below the total supply (an amount equal
    /// to the supply is refused too), no more than what is free and within
    /// `Shares::MAX_SCALE` decimal places. On refusal no account exists and the
    /// pool is untouched.
    pub fn create(
        pool: &Arc<SharePool>,
        owner_id: impl Into<OwnerId>,
        amount: impl Into<Shares>,
    ) -> LedgerResult<Self> {
        let owner_id = owner_id.into();
        let amount = amount.into();
        let unavailable = || {
            LedgerError::invalid_amount(format!(
                "Unable to create account for {owner_id}. The given amount of shares are not available to own."
            ))
        };

        if !amount.is_positive()
            || !amount.fits_precision()
            || amount >= Shares::whole(pool.total_supply())
        {
            warn!(owner = %owner_id, %amount, "account creation refused");
            return Err(unavailable());
        }

        pool.reserve(amount).map_err(|e| match e {
            LedgerError::InsufficientSupply { .. } => {
                warn!(owner = %owner_id, %amount, "account creation refused: supply exhausted");
                unavailable()
            }
            other => other,
        })?;

        let account = Self {
            id: AccountId::new(),
            owner_id,
            pool: Arc::clone(pool),
            balance: Mutex::new(amount),
        };

        info!(account_id = %account.id, owner = %account.owner_id, %amount, "shareholder account created");
        pool.record(ShareEvent::AccountOpened(AccountOpened {
            account_id: account.id,
            owner_id: account.owner_id.clone(),
            amount,
            occurred_at: Utc::now(),
        }));

        Ok(account)
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn pool(&self) -> &Arc<SharePool> {
        &self.pool
    }

    /// Current balance. Waits for any in-flight transfer on this account.
    pub fn balance(&self) -> Shares {
        *self.balance.lock()
    }

    /// Buy `amount` shares directly from the pool.
    ///
    /// A non-positive amount is an `Err(InvalidArgument)`. An empty pool and an
    /// amount above the free supply are both `Ok` outcomes with `status: false`,
    /// with different messages.
    pub fn acquire_from_pool(&self, amount: impl Into<Shares>) -> LedgerResult<TxOutcome> {
        let amount = amount.into();

        guarded("acquire_from_pool", || {
            ensure_amount(amount, "shares to purchase must be more than zero")?;

            let mut balance = lock::acquire(&self.balance, self.pool.lock_timeout(), &self.owner_id)?;
            let previous = *balance;
            let current = previous
                .checked_add(amount)
                .ok_or_else(|| LedgerError::internal("balance overflow"))?;

            self.pool.issue(amount)?;
            *balance = current;
            drop(balance);

            info!(
                owner = %self.owner_id,
                %amount,
                %previous,
                %current,
                "purchase of virtual shares from service successful"
            );
            self.pool.record(ShareEvent::SharesIssued(SharesIssued {
                account_id: self.id,
                owner_id: self.owner_id.clone(),
                amount,
                previous_balance: previous,
                current_balance: current,
                occurred_at: Utc::now(),
            }));

            Ok(TxOutcome::success(format!(
                "direct purchase of shares from Service by {} successful",
                self.owner_id
            )))
        })
    }

    /// Buy `amount` shares from `seller`.
    ///
    /// The seller is debited first; the buyer is credited only once the debit is
    /// confirmed, while both balances stay locked. A failed sale leaves both
    /// balances as they were and reports the seller's reason.
    pub fn buy_from(&self, amount: impl Into<Shares>, seller: &Account) -> LedgerResult<TxOutcome> {
        let amount = amount.into();

        guarded("buy_from", || {
            ensure_amount(amount, "Shares to buy must be more than zero.")?;
            if self.id == seller.id {
                return Err(LedgerError::invalid_argument(
                    "buyer and seller must be different accounts",
                ));
            }
            if !Arc::ptr_eq(&self.pool, &seller.pool) {
                return Err(LedgerError::invalid_argument(
                    "buyer and seller belong to different share pools",
                ));
            }

            let (mut buyer_balance, mut seller_balance) = self.lock_pair(seller)?;
            let previous = *buyer_balance;
            let current = previous
                .checked_add(amount)
                .ok_or_else(|| LedgerError::internal("balance overflow"))?;

            match seller.sell_to(&mut seller_balance, amount, self) {
                Ok(()) => {}
                Err(err) if err.is_business_rule() => {
                    warn!(buyer = %self.owner_id, seller = %seller.owner_id, %amount, reason = %err, "transaction could not be completed");
                    return Ok(TxOutcome::failure(format!(
                        "transaction could not be completed by seller ({})",
                        TxOutcome::rejected(&err).message
                    )));
                }
                Err(err) => return Err(err),
            }

            *buyer_balance = current;
            drop(seller_balance);
            drop(buyer_balance);

            info!(
                buyer = %self.owner_id,
                seller = %seller.owner_id,
                %amount,
                %previous,
                %current,
                "purchase of virtual shares from peer successful"
            );
            self.pool.record(ShareEvent::SharesTransferred(SharesTransferred {
                seller_id: seller.id,
                seller: seller.owner_id.clone(),
                buyer_id: self.id,
                buyer: self.owner_id.clone(),
                amount,
                occurred_at: Utc::now(),
            }));

            Ok(TxOutcome::success(format!(
                "purchase from {} to {} successful",
                seller.owner_id, self.owner_id
            )))
        })
    }

    /// Seller half of a peer transfer. Only reachable through [`Account::buy_from`],
    /// which already holds this account's balance lock and passes the guarded value.
    ///
    /// Debits the seller; crediting the buyer is the caller's job. Fails with
    /// `InsufficientBalance` and leaves `balance` alone when `amount` is not
    /// positive or exceeds it.
    fn sell_to(&self, balance: &mut Shares, amount: Shares, buyer: &Account) -> LedgerResult<()> {
        if !amount.is_positive() || amount > *balance {
            warn!(
                seller = %self.owner_id,
                buyer = %buyer.owner_id,
                %amount,
                available = %*balance,
                "sale of shares unsuccessful"
            );
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: *balance,
            });
        }

        let previous = *balance;
        *balance = previous - amount;

        info!(
            seller = %self.owner_id,
            buyer = %buyer.owner_id,
            %amount,
            %previous,
            current = %*balance,
            "sale of virtual shares successful"
        );
        Ok(())
    }

    fn lock_key(&self) -> (&OwnerId, AccountId) {
        (&self.owner_id, self.id)
    }

    /// Lock both balances in global order. Returns `(self, other)`.
    fn lock_pair<'a>(
        &'a self,
        other: &'a Account,
    ) -> LedgerResult<(MutexGuard<'a, Shares>, MutexGuard<'a, Shares>)> {
        let timeout = self.pool.lock_timeout();
        if self.lock_key() < other.lock_key() {
            let mine = lock::acquire(&self.balance, timeout, &self.owner_id)?;
            let theirs = lock::acquire(&other.balance, timeout, &other.owner_id)?;
            Ok((mine, theirs))
        } else {
            let theirs = lock::acquire(&other.balance, timeout, &other.owner_id)?;
            let mine = lock::acquire(&self.balance, timeout, &self.owner_id)?;
            Ok((mine, theirs))
        }
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} owns {} virtual shares.", self.owner_id, self.balance())
    }
}

/// Entry validation for transfer amounts: positive, and exact at ledger precision.
fn ensure_amount(amount: Shares, msg: &str) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_argument(format!("{msg} (got {amount})")));
    }
    amount.ensure_precision()
}
