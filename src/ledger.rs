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


//! Account ledger.
//!
//! The [`Ledger`] owns every account, keyed by account number, and exposes the
//! operations the interactive shell drives:
//!
//! - **Create**: Opens a savings or checking account, replacing any account
//!   already registered under the same number.
//! - **Deposit / Withdraw**: Delegates to the addressed account.
//! - **Transfer**: Debits one account and credits another under both locks.
//! - **Show balance**: Reads the current balance.
//!
//! # Thread Safety
//!
//! Accounts are stored as `Arc<Account>` in a [`DashMap`]. Lookups clone the
//! `Arc` and drop the shard guard straight away, so no map lock is ever held
//! while an account lock is taken.

use crate::LedgerError;
use crate::account::{Account, Transfer};
use crate::base::AccountNumber;
use crate::policy::AccountKind;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// In-memory set of accounts.
///
/// # Invariants
///
/// - Every stored account is keyed by its own account number.
/// - Declined operations leave every balance unchanged.
pub struct Ledger {
    /// Accounts indexed by account number.
    accounts: DashMap<AccountNumber, Arc<Account>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            accounts: DashMap::new(),
        }
    }

    /// Opens an account from a type tag (`savings` or `checking`, any case).
    ///
    /// An existing account with the same number is silently replaced. The
    /// initial balance is not validated against the account's policy.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAccountType`] if the tag is not recognized; no
    /// account is stored.
    pub fn create_account(
        &self,
        account_type: &str,
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Arc<Account>, LedgerError> {
        let kind = account_type.parse::<AccountKind>().map_err(|()| {
            info!(account_type, "rejected unknown account type");
            LedgerError::InvalidAccountType(account_type.to_owned())
        })?;
        Ok(self.open_account(kind, number, holder, initial_balance))
    }

    /// Opens an account of a known kind. See [`Ledger::create_account`].
    pub fn open_account(
        &self,
        kind: AccountKind,
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        initial_balance: Decimal,
    ) -> Arc<Account> {
        let account = Arc::new(Account::new(number, holder, kind.policy(), initial_balance));
        let number = account.number().clone();

        if self
            .accounts
            .insert(number.clone(), Arc::clone(&account))
            .is_some()
        {
            warn!(account = %number, "replaced existing account with the same number");
        }
        debug!(account = %number, %kind, balance = %initial_balance, "opened account");

        account
    }

    /// Retrieves an account by number.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AccountNotFound`] if no account has this number.
    pub fn get_account(&self, number: &str) -> Result<Arc<Account>, LedgerError> {
        self.accounts
            .get(number)
            .map(|account| Arc::clone(account.value()))
            .ok_or_else(|| LedgerError::AccountNotFound(AccountNumber::from(number)))
    }

    /// Deposits into an account and returns its new balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - Unknown account number.
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    pub fn deposit(&self, number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.get_account(number)?;
        let result = account.deposit(amount);
        log_outcome("deposit", number, amount, &result);
        result
    }

    /// Withdraws from an account and returns its new balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - Unknown account number.
    /// - [`LedgerError::WithdrawalDeclined`] - The account's policy refuses it.
    pub fn withdraw(&self, number: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.get_account(number)?;
        let result = account.withdraw(amount);
        log_outcome("withdraw", number, amount, &result);
        result
    }

    /// Moves `amount` between two accounts.
    ///
    /// The source balance must be at least `amount` before its policy is even
    /// consulted (see [`Account::transfer_to`]). Either both balances change or
    /// neither does.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - Either account number is unknown.
    /// - [`LedgerError::InsufficientFunds`] - Source balance is below `amount`.
    /// - [`LedgerError::WithdrawalDeclined`] - Source policy refuses the debit.
    pub fn transfer_money(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Transfer, LedgerError> {
        let from_account = self.get_account(from)?;
        let to_account = self.get_account(to)?;

        match from_account.transfer_to(&to_account, amount) {
            Ok(transfer) => {
                debug!(from, to, %amount, "transferred");
                Ok(transfer)
            }
            Err(e) => {
                info!(from, to, %amount, reason = %e, "transfer declined");
                Err(e)
            }
        }
    }

    /// Returns the current balance of an account.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AccountNotFound`] if no account has this number.
    pub fn show_balance(&self, number: &str) -> Result<Decimal, LedgerError> {
        self.get_account(number).map(|account| account.balance())
    }

    /// Number of accounts in the ledger.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn log_outcome(
    operation: &str,
    number: &str,
    amount: Decimal,
    result: &Result<Decimal, LedgerError>,
) {
    match result {
        Ok(balance) => debug!(operation, account = number, %amount, %balance, "applied"),
        Err(e) => info!(operation, account = number, %amount, reason = %e, "declined"),
    }
}
