//! Account snapshots for the market's base asset and its collateral assets.
//!
//! Snapshots are immutable value objects: the caller refreshes them from the
//! chain (out of scope here) and re-passes the full set on every call. The
//! engine never mutates a caller's snapshot, it folds over working copies.

use crate::numeric::token_value;
use crate::types::{AssetId, BaseBalance, Factor, Price};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The account's position in the market's single borrow/lend asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAssetSnapshot {
    pub symbol: String,
    pub decimals: u32,
    pub price: Price,
    /// Signed: positive = net supplied and earning, negative = net borrowed.
    pub balance: BaseBalance,
    /// Off-protocol holdings in the user's wallet.
    pub wallet_balance: BigUint,
    /// Chain-reported maximum absolute borrow given current collateral.
    /// Stale the moment collateral actions queue; the engine derives its own.
    pub borrow_capacity: BigUint,
    /// Total liquidity available in the market to borrow from.
    pub market_liquidity: BigUint,
    /// Minimum allowed open borrow size.
    pub min_borrow: BigUint,
    /// ERC-20 spend approval granted directly to the protocol.
    pub allowance: BigUint,
    /// Spend approval granted to the bulker that submits queued actions.
    pub bulker_allowance: BigUint,
}

impl BaseAssetSnapshot {
    pub fn earn_balance(&self) -> BigUint {
        self.balance.earn_balance()
    }

    pub fn borrow_balance(&self) -> BigUint {
        self.balance.borrow_balance()
    }
}

/// One supported collateral token. Identity is by `id` equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralAssetSnapshot {
    pub id: AssetId,
    pub symbol: String,
    pub decimals: u32,
    pub price: Price,
    /// Amount supplied as collateral. Unsigned: collateral is never borrowed.
    pub balance: BigUint,
    pub wallet_balance: BigUint,
    /// Fraction of this asset's value that counts toward borrow capacity.
    pub collateral_factor: Factor,
    /// Fraction at which the position becomes liquidatable. >= collateral_factor.
    pub liquidate_collateral_factor: Factor,
    /// Protocol-wide ceiling on total supplied collateral of this asset.
    pub supply_cap: BigUint,
    /// Current protocol-wide total of this asset supplied.
    pub total_supply: BigUint,
}

impl CollateralAssetSnapshot {
    /// USD value (price-scaled) of the supplied balance.
    pub fn value(&self) -> BigUint {
        token_value(&self.balance, self.price.raw(), self.decimals)
    }
}

/// Defensive lookup: an action naming an unlisted asset is a business
/// verdict for the validator, never a panic.
pub fn find_collateral<'a>(
    assets: &'a [CollateralAssetSnapshot],
    id: &AssetId,
) -> Option<&'a CollateralAssetSnapshot> {
    assets.iter().find(|a| &a.id == id)
}

// Mock fixtures, sized so the default borrow scenario validates clean:
// 10 WETH at $2,000 under an 82.5% factor derives $16,500 of capacity.
// Used by the sim binary and the test suites.

impl BaseAssetSnapshot {
    pub fn usdc_mock() -> Self {
        Self {
            symbol: "USDC".to_string(),
            decimals: 6,
            price: Price::from_dollars(1),
            balance: BaseBalance::zero(),
            wallet_balance: BigUint::from(10_000_000_000u64), // $10,000
            borrow_capacity: BigUint::from(16_500_000_000u64),
            market_liquidity: BigUint::from(1_000_000_000_000u64), // $1M
            min_borrow: BigUint::from(1_000_000_000u64), // $1,000
            allowance: BigUint::from(0u32),
            bulker_allowance: BigUint::from(0u32),
        }
    }
}

impl CollateralAssetSnapshot {
    pub fn weth_mock() -> Self {
        let wad = crate::numeric::pow10(18);
        Self {
            id: AssetId::new("WETH"),
            symbol: "WETH".to_string(),
            decimals: 18,
            price: Price::from_dollars(2_000),
            balance: BigUint::from(10u32) * &wad, // 10 WETH supplied
            wallet_balance: BigUint::from(5u32) * &wad,
            collateral_factor: Factor::from_basis_points(8_250),
            liquidate_collateral_factor: Factor::from_basis_points(8_950),
            supply_cap: BigUint::from(100_000u32) * &wad,
            total_supply: BigUint::from(60_000u32) * &wad,
        }
    }

    pub fn wbtc_mock() -> Self {
        let sats = crate::numeric::pow10(8);
        Self {
            id: AssetId::new("WBTC"),
            symbol: "WBTC".to_string(),
            decimals: 8,
            price: Price::from_dollars(30_000),
            balance: BigUint::from(0u32),
            wallet_balance: BigUint::from(2u32) * &sats,
            collateral_factor: Factor::from_basis_points(7_000),
            liquidate_collateral_factor: Factor::from_basis_points(7_700),
            supply_cap: BigUint::from(1_000u32) * &sats,
            total_supply: BigUint::from(400u32) * &sats,
        }
    }
}
