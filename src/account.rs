// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Account management.
//!
//! An [`Account`] pairs an immutable identity (number, holder, policy) with a
//! mutex-guarded balance. The policy check and the balance update always run
//! under the same lock, so concurrent callers never interleave between them.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use policy_ledger::{Account, AccountKind};
//!
//! let account = Account::new("001", "Alice", AccountKind::Savings.policy(), dec!(1000));
//! assert!(account.withdraw(dec!(600)).is_err());
//! assert_eq!(account.withdraw(dec!(400)), Ok(dec!(600)));
//! ```

use crate::LedgerError;
use crate::base::AccountNumber;
use crate::policy::WithdrawalPolicy;
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use std::fmt;
use std::ptr;

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
}

impl AccountData {
    fn new(balance: Decimal) -> Self {
        Self { balance }
    }

    /// Increases the balance by a positive amount.
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(self.credit(amount))
    }

    /// Decreases the balance if `policy` allows it.
    fn withdraw(
        &mut self,
        policy: &WithdrawalPolicy,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if !policy.permits(self.balance, amount) {
            return Err(LedgerError::WithdrawalDeclined { policy: *policy });
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    /// Deposits have no upper bound; the balance saturates at `Decimal::MAX`.
    fn credit(&mut self, amount: Decimal) -> Decimal {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}

/// Result of a completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub amount: Decimal,
    /// Source balance after the transfer.
    pub from_balance: Decimal,
    /// Destination balance after the transfer.
    pub to_balance: Decimal,
}

/// Ledger account.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    policy: WithdrawalPolicy,
    inner: Mutex<AccountData>,
}

impl Account {
    /// Opens an account. The initial balance is not checked against `policy`.
    pub fn new(
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        policy: WithdrawalPolicy,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            policy,
            inner: Mutex::new(AccountData::new(initial_balance)),
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.policy
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Credits `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] if `amount` is zero or negative.
    pub fn deposit(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.inner.lock().deposit(amount)
    }

    /// Debits `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::WithdrawalDeclined`] if the account's policy refuses it.
    pub fn withdraw(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.inner.lock().withdraw(&self.policy, amount)
    }

    /// Moves `amount` from this account into `to`.
    ///
    /// Both balances stay locked for the whole operation. Before the policy is
    /// consulted, the source balance must cover `amount` on its own; this is
    /// stricter than an overdraft policy, so a checking account cannot fund a
    /// transfer from its overdraft even though it could withdraw the same
    /// amount directly.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientFunds`] - Source balance is below `amount`.
    /// - [`LedgerError::WithdrawalDeclined`] - Source policy refuses the debit.
    pub fn transfer_to(&self, to: &Account, amount: Decimal) -> Result<Transfer, LedgerError> {
        if ptr::eq(self, to) {
            let mut data = self.inner.lock();
            if data.balance < amount {
                return Err(LedgerError::InsufficientFunds);
            }
            data.withdraw(&self.policy, amount)?;
            let balance = data.credit(amount);
            return Ok(Transfer {
                amount,
                from_balance: balance,
                to_balance: balance,
            });
        }

        let (mut from_data, mut to_data) = self.lock_pair(to);
        if from_data.balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        // A successful withdrawal guarantees `amount > 0`, so the credit
        // cannot be refused.
        let from_balance = from_data.withdraw(&self.policy, amount)?;
        let to_balance = to_data.credit(amount);

        Ok(Transfer {
            amount,
            from_balance,
            to_balance,
        })
    }

    /// Locks `self` and `other` in address order, returning `(self, other)`.
    fn lock_pair<'a>(
        &'a self,
        other: &'a Account,
    ) -> (MutexGuard<'a, AccountData>, MutexGuard<'a, AccountData>) {
        if ptr::from_ref(self) < ptr::from_ref(other) {
            let first = self.inner.lock();
            let second = other.inner.lock();
            (first, second)
        } else {
            let second = other.inner.lock();
            let first = self.inner.lock();
            (first, second)
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account Holder: {}, Account Number: {}, Balance: ${}",
            self.holder,
            self.number,
            self.balance()
        )
    }
}
