//! Decimal money with an explicit currency.
//!
//! Every amount in the marketplace is a [`Money`]: catalog prices, cart
//! line prices, order totals, wallet balances, and ledger entries. The
//! arithmetic helpers refuse to mix currencies, which turns a class of
//! silent pricing bugs into explicit errors.

use core::fmt;
use core::ops::Neg;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors from money arithmetic.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    /// The two operands carry different currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },
    /// The operation overflowed the decimal range.
    #[error("amount overflow")]
    Overflow,
}

/// A monetary amount with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create an INR amount. The marketplace trades in rupees.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, Currency::INR)
    }

    /// Create an INR amount from a whole number of rupees.
    #[must_use]
    pub fn rupees(amount: i64) -> Self {
        Self::inr(Decimal::from(amount))
    }

    /// The zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ
    /// and [`MoneyError::Overflow`] when the sum leaves the decimal range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, MoneyError> {
        self.same_currency(rhs)?;
        let amount = self
            .amount
            .checked_add(rhs.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtract an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ
    /// and [`MoneyError::Overflow`] when the difference leaves the decimal
    /// range.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, MoneyError> {
        self.same_currency(rhs)?;
        let amount = self
            .amount
            .checked_sub(rhs.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiply the amount by a unit count (for line totals).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when the product leaves the decimal
    /// range.
    pub fn checked_mul_units(self, units: u32) -> Result<Self, MoneyError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(units))
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    fn same_currency(self, rhs: Self) -> Result<(), MoneyError> {
        if self.currency == rhs.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: rhs.currency,
            })
        }
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}{:.2}", self.currency.symbol(), -self.amount)
        } else {
            write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
        }
    }
}

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Indian rupee - the marketplace currency.
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "\u{20b9}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let sum = Money::rupees(100).checked_add(Money::rupees(25)).unwrap();
        assert_eq!(sum, Money::rupees(125));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let usd = Money::new(Decimal::ONE, Currency::USD);
        let err = Money::rupees(1).checked_add(usd).unwrap_err();
        assert!(matches!(err, MoneyError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let diff = Money::rupees(10).checked_sub(Money::rupees(25)).unwrap();
        assert!(diff.is_negative());
        assert_eq!(diff, Money::rupees(-15));
    }

    #[test]
    fn test_checked_mul_units() {
        let line = Money::rupees(100).checked_mul_units(2).unwrap();
        assert_eq!(line, Money::rupees(200));
    }

    #[test]
    fn test_display_rupees() {
        assert_eq!(Money::rupees(250).to_string(), "\u{20b9}250.00");
        assert_eq!(Money::rupees(-250).to_string(), "-\u{20b9}250.00");
    }

    #[test]
    fn test_neg() {
        assert_eq!(-Money::rupees(50), Money::rupees(-50));
    }

    #[test]
    fn test_zero_is_not_negative() {
        assert!(!Money::zero(Currency::INR).is_negative());
    }

    #[test]
    fn test_serde_roundtrip() {
        let money = Money::rupees(1500);
        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
