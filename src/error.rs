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


//! Error types for ledger operations.
//!
//! Every variant is a recoverable decline: the requested operation did not
//! happen and no balance changed.

use crate::base::AccountNumber;
use crate::policy::WithdrawalPolicy;
use thiserror::Error;

/// Ledger operation declines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Account type tag is neither `savings` nor `checking`
    #[error("invalid account type: {0}")]
    InvalidAccountType(String),

    /// Deposit amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// The account's withdrawal policy refused the withdrawal
    #[error("withdrawal declined by {policy} policy")]
    WithdrawalDeclined { policy: WithdrawalPolicy },

    /// Transfer source balance is lower than the transfer amount
    #[error("insufficient funds in source account")]
    InsufficientFunds,

    /// No account is registered under this number
    #[error("account not found: {0}")]
    AccountNotFound(AccountNumber),
}
