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


//! Withdrawal policies and the account types that bind them.
//!
//! Every account carries exactly one [`WithdrawalPolicy`], chosen from its
//! [`AccountKind`] when the account is opened:
//!
//! | Kind       | Policy                                  |
//! |------------|-----------------------------------------|
//! | `savings`  | [`WithdrawalPolicy::MinimumBalanceFloor`] (floor 500) |
//! | `checking` | [`WithdrawalPolicy::OverdraftLimit`] (limit 1000)     |
//!
//! # Example
//!
//! ```
//! use policy_ledger::AccountKind;
//! use rust_decimal_macros::dec;
//!
//! let policy = "Savings".parse::<AccountKind>().unwrap().policy();
//! assert!(policy.permits(dec!(1000), dec!(400)));
//! assert!(!policy.permits(dec!(1000), dec!(600)));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::str::FromStr;

/// Minimum balance a savings account must keep after a withdrawal.
pub const DEFAULT_MINIMUM_BALANCE: Decimal = dec!(500);

/// Deepest negative balance a checking account may reach after a withdrawal.
pub const DEFAULT_OVERDRAFT_LIMIT: Decimal = dec!(1000);

/// Rule deciding whether a withdrawal may proceed.
///
/// Parameters are fixed when the policy is built and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalPolicy {
    /// The balance may not drop below `floor`.
    MinimumBalanceFloor { floor: Decimal },
    /// The balance may not drop below `-limit`.
    OverdraftLimit { limit: Decimal },
}

impl WithdrawalPolicy {
    /// Returns `true` if withdrawing `amount` from `balance` is allowed.
    ///
    /// Non-positive amounts are never allowed. A difference that cannot be
    /// represented is treated as a decline.
    pub fn permits(&self, balance: Decimal, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }
        let Some(remaining) = balance.checked_sub(amount) else {
            return false;
        };
        remaining >= self.lowest_balance()
    }

    /// Lowest balance this policy lets an account reach.
    pub fn lowest_balance(&self) -> Decimal {
        match *self {
            Self::MinimumBalanceFloor { floor } => floor,
            Self::OverdraftLimit { limit } => -limit,
        }
    }
}

impl fmt::Display for WithdrawalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumBalanceFloor { floor } => write!(f, "minimum balance of {floor}"),
            Self::OverdraftLimit { limit } => write!(f, "overdraft limit of {limit}"),
        }
    }
}

/// Account type tag accepted when opening an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    /// Policy bound to this account type.
    pub fn policy(self) -> WithdrawalPolicy {
        match self {
            Self::Savings => WithdrawalPolicy::MinimumBalanceFloor {
                floor: DEFAULT_MINIMUM_BALANCE,
            },
            Self::Checking => WithdrawalPolicy::OverdraftLimit {
                limit: DEFAULT_OVERDRAFT_LIMIT,
            },
        }
    }
}

impl FromStr for AccountKind {
    type Err = ();

    /// Parses a type tag, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("savings") {
            Ok(Self::Savings)
        } else if s.eq_ignore_ascii_case("checking") {
            Ok(Self::Checking)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => f.write_str("savings"),
            Self::Checking => f.write_str("checking"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVINGS: WithdrawalPolicy = WithdrawalPolicy::MinimumBalanceFloor {
        floor: DEFAULT_MINIMUM_BALANCE,
    };
    const CHECKING: WithdrawalPolicy = WithdrawalPolicy::OverdraftLimit {
        limit: DEFAULT_OVERDRAFT_LIMIT,
    };

    #[test]
    fn floor_allows_landing_exactly_on_floor() {
        assert!(SAVINGS.permits(dec!(1000), dec!(500)));
        assert!(!SAVINGS.permits(dec!(1000), dec!(500.01)));
    }

    #[test]
    fn floor_rejects_when_already_below() {
        assert!(!SAVINGS.permits(dec!(100), dec!(1)));
    }

    #[test]
    fn overdraft_allows_down_to_negative_limit() {
        assert!(CHECKING.permits(dec!(0), dec!(1000)));
        assert!(!CHECKING.permits(dec!(0), dec!(1000.01)));
        assert!(CHECKING.permits(dec!(-800), dec!(200)));
    }

    #[test]
    fn non_positive_amounts_never_permitted() {
        for policy in [SAVINGS, CHECKING] {
            assert!(!policy.permits(dec!(10000), Decimal::ZERO));
            assert!(!policy.permits(dec!(10000), dec!(-5)));
        }
    }

    #[test]
    fn unrepresentable_difference_is_declined() {
        assert!(!CHECKING.permits(Decimal::MIN, Decimal::MAX));
    }

    #[test]
    fn kind_parsing_ignores_case() {
        assert_eq!("savings".parse(), Ok(AccountKind::Savings));
        assert_eq!("SAVINGS".parse(), Ok(AccountKind::Savings));
        assert_eq!("Checking".parse(), Ok(AccountKind::Checking));
        assert_eq!("brokerage".parse::<AccountKind>(), Err(()));
        assert_eq!(" savings".parse::<AccountKind>(), Err(()));
    }

    #[test]
    fn kinds_bind_default_policies() {
        assert_eq!(AccountKind::Savings.policy(), SAVINGS);
        assert_eq!(AccountKind::Checking.policy(), CHECKING);
    }

    #[test]
    fn policy_display() {
        assert_eq!(SAVINGS.to_string(), "minimum balance of 500");
        assert_eq!(CHECKING.to_string(), "overdraft limit of 1000");
    }
}
