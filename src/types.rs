// 1.0: all the primitives live here. nothing in the engine works without these types.
// asset identity, the signed base balance, fixed-point factors and prices.
// each is a newtype so the compiler catches unit mixups.

use crate::numeric::{self, FACTOR_DECIMALS, PRICE_DECIMALS};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collateral token identity: address or symbol, whatever the caller keys by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.1: signed base-asset position. positive = earning (supplied), negative = borrowing,
// zero = neither. the sign alone carries the earn/borrow distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseBalance(BigInt);

impl BaseBalance {
    pub fn new(value: BigInt) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn from_supplied(amount: BigUint) -> Self {
        Self(BigInt::from(amount))
    }

    pub fn from_borrowed(amount: BigUint) -> Self {
        Self(-BigInt::from(amount))
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    pub fn is_earning(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn is_borrowing(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Positive part: the supplied balance, zero while borrowing.
    pub fn earn_balance(&self) -> BigUint {
        match self.0.sign() {
            Sign::Plus => self.0.magnitude().clone(),
            _ => BigUint::zero(),
        }
    }

    /// Magnitude of the negative part: the outstanding borrow, zero while earning.
    pub fn borrow_balance(&self) -> BigUint {
        match self.0.sign() {
            Sign::Minus => self.0.magnitude().clone(),
            _ => BigUint::zero(),
        }
    }

    pub fn credit(&self, amount: &BigUint) -> Self {
        Self(&self.0 + BigInt::from(amount.clone()))
    }

    pub fn debit(&self, amount: &BigUint) -> Self {
        Self(&self.0 - BigInt::from(amount.clone()))
    }
}

impl fmt::Display for BaseBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: fixed-point fraction scaled by 10^18. collateral factors, safety margins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Factor(BigUint);

impl Factor {
    pub fn from_scaled(raw: BigUint) -> Self {
        Self(raw)
    }

    /// 95 -> 0.95 in factor scale.
    pub fn from_percent(percent: u32) -> Self {
        Self(BigUint::from(percent) * numeric::pow10(FACTOR_DECIMALS - 2))
    }

    /// 8250 -> 0.825 in factor scale.
    pub fn from_basis_points(bps: u32) -> Self {
        Self(BigUint::from(bps) * numeric::pow10(FACTOR_DECIMALS - 4))
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// floor(amount * self / 10^18)
    pub fn apply(&self, amount: &BigUint) -> BigUint {
        numeric::take_percentage(amount, &self.0)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", numeric::format_units(&self.0, FACTOR_DECIMALS))
    }
}

// 1.3: USD price scaled by 10^8.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(BigUint);

impl Price {
    pub fn from_scaled(raw: BigUint) -> Self {
        Self(raw)
    }

    pub fn from_dollars(dollars: u64) -> Self {
        Self(BigUint::from(dollars) * numeric::price_scale())
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", numeric::format_units(&self.0, PRICE_DECIMALS))
    }
}
