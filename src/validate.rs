//! Action validation: may this action join the queue?
//!
//! The queue already holds validated actions; the candidate is checked
//! against the *effective* balances obtained by folding that queue through
//! the projection engine. Checks per action kind run in a deliberate
//! priority order and the first failure wins: "Must Repay Borrow First" is
//! more actionable than a wallet-balance complaint, so it is raised first.
//!
//! The reason strings are a compatibility contract: UI code and tests match
//! on them verbatim.

use crate::action::{Action, ActionAmount};
use crate::asset::{find_collateral, BaseAssetSnapshot, CollateralAssetSnapshot};
use crate::numeric::{format_units_display, saturating_sub, DISPLAY_DECIMALS};
use crate::projection::{
    calculate_updated_balances, collateral_capacity_contribution,
    max_safe_collateral_withdrawal, ProjectedBalances, ProtocolParams,
};
use crate::types::AssetId;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Verdict on appending one candidate action. A tagged variant, not a
/// truthy tuple: `Ok` is distinguished by type, never by shape-sniffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validation {
    Ok,
    Invalid(InvalidReason),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok)
    }

    pub fn reason(&self) -> Option<&InvalidReason> {
        match self {
            Validation::Ok => None,
            Validation::Invalid(reason) => Some(reason),
        }
    }
}

/// The closed taxonomy of validation failures. Display output is the exact
/// user-facing string for each invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum InvalidReason {
    #[error("Amount Exceeds Borrow Capacity")]
    BorrowCapacityExceeded,

    #[error("Minimum Borrow of {minimum} {symbol}")]
    BelowMinimumBorrow { minimum: String, symbol: String },

    #[error("Not Enough Market Liquidity")]
    NotEnoughLiquidity,

    #[error("Must Withdraw Full {symbol} Balance")]
    MustWithdrawFullBalance { symbol: String },

    #[error("Amount Exceeds Wallet Balance")]
    WalletBalanceExceeded,

    #[error("Must Repay Borrow First")]
    MustRepayBorrowFirst,

    #[error("Amount Exceeds Balance")]
    BalanceExceeded,

    #[error("Collateral Asset Doesn't Exist")]
    UnknownCollateralAsset,

    #[error("Amount Exceeds Supply Cap")]
    SupplyCapExceeded,

    #[error("Borrow Balance Will Exceed Capacity")]
    CapacityWillBeExceeded,
}

// 6.1: entry point. fold the existing queue, then dispatch on the candidate.
pub fn validate_adding_action(
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
    existing: &[Action],
    candidate: &Action,
    params: &ProtocolParams,
) -> Validation {
    let projected = calculate_updated_balances(base, collaterals, existing, params);

    match candidate {
        Action::Borrow { amount } => check_borrow(&projected, amount, params),
        Action::Supply { amount } => check_supply(&projected, amount),
        Action::Repay { amount } => check_repay(&projected, amount),
        Action::Withdraw { amount } => check_withdraw(&projected, amount),
        Action::SupplyCollateral { asset, amount } => {
            check_supply_collateral(&projected, asset, amount)
        }
        Action::WithdrawCollateral { asset, amount } => {
            check_withdraw_collateral(&projected, asset, amount)
        }
        // reward claims move no balances and are always accepted
        Action::ClaimRewards => Validation::Ok,
    }
}

fn check_borrow(
    projected: &ProjectedBalances,
    amount: &ActionAmount,
    params: &ProtocolParams,
) -> Validation {
    let base = &projected.base_asset;

    // a positive balance must be fully withdrawn before borrowing
    if base.balance.is_earning() {
        return Validation::Invalid(InvalidReason::MustWithdrawFullBalance {
            symbol: base.symbol.clone(),
        });
    }

    let borrow_balance = base.borrow_balance();
    let available = params
        .borrow_safety_factor
        .apply(&saturating_sub(&projected.borrow_capacity, &borrow_balance));
    let resolved = concrete_amount(amount, &available);

    if resolved > available {
        return Validation::Invalid(InvalidReason::BorrowCapacityExceeded);
    }

    if borrow_balance + &resolved < base.min_borrow {
        return Validation::Invalid(InvalidReason::BelowMinimumBorrow {
            minimum: format_units_display(&base.min_borrow, base.decimals, DISPLAY_DECIMALS),
            symbol: base.symbol.clone(),
        });
    }

    if resolved > base.market_liquidity {
        return Validation::Invalid(InvalidReason::NotEnoughLiquidity);
    }

    Validation::Ok
}

fn check_supply(projected: &ProjectedBalances, amount: &ActionAmount) -> Validation {
    let base = &projected.base_asset;

    // an open borrow is closed with Repay, not Supply
    if base.balance.is_borrowing() {
        return Validation::Invalid(InvalidReason::MustRepayBorrowFirst);
    }

    let resolved = concrete_amount(amount, &base.wallet_balance);
    if resolved > base.wallet_balance {
        return Validation::Invalid(InvalidReason::WalletBalanceExceeded);
    }

    Validation::Ok
}

fn check_repay(projected: &ProjectedBalances, amount: &ActionAmount) -> Validation {
    let base = &projected.base_asset;

    // no minimum-repay floor: partial and exact-zero repays are always fine
    let max = base.borrow_balance().min(base.wallet_balance.clone());
    let resolved = concrete_amount(amount, &max);
    if resolved > base.wallet_balance {
        return Validation::Invalid(InvalidReason::WalletBalanceExceeded);
    }

    Validation::Ok
}

fn check_withdraw(projected: &ProjectedBalances, amount: &ActionAmount) -> Validation {
    let base = &projected.base_asset;

    if base.balance.is_borrowing() {
        return Validation::Invalid(InvalidReason::MustRepayBorrowFirst);
    }

    let earn = base.earn_balance();
    let resolved = concrete_amount(amount, &earn);
    if resolved > earn {
        return Validation::Invalid(InvalidReason::BalanceExceeded);
    }

    if resolved > base.market_liquidity {
        return Validation::Invalid(InvalidReason::NotEnoughLiquidity);
    }

    Validation::Ok
}

fn check_supply_collateral(
    projected: &ProjectedBalances,
    asset: &AssetId,
    amount: &ActionAmount,
) -> Validation {
    let Some(held) = find_collateral(&projected.collateral_assets, asset) else {
        return Validation::Invalid(InvalidReason::UnknownCollateralAsset);
    };

    let resolved = concrete_amount(amount, &held.wallet_balance);
    if resolved > held.wallet_balance {
        return Validation::Invalid(InvalidReason::WalletBalanceExceeded);
    }

    if &held.total_supply + &resolved > held.supply_cap {
        return Validation::Invalid(InvalidReason::SupplyCapExceeded);
    }

    Validation::Ok
}

fn check_withdraw_collateral(
    projected: &ProjectedBalances,
    asset: &AssetId,
    amount: &ActionAmount,
) -> Validation {
    let base = &projected.base_asset;

    let Some(held) = find_collateral(&projected.collateral_assets, asset) else {
        return Validation::Invalid(InvalidReason::UnknownCollateralAsset);
    };

    let max_safe =
        max_safe_collateral_withdrawal(held, base, &projected.collateral_assets);
    let resolved = concrete_amount(amount, &held.balance.clone().min(max_safe));

    if resolved > held.balance {
        return Validation::Invalid(InvalidReason::BalanceExceeded);
    }

    // capacity after this withdrawal must still cover the open borrow
    let withdrawn_capacity = collateral_capacity_contribution(held, &resolved, base);
    let capacity_after = saturating_sub(&projected.borrow_capacity, &withdrawn_capacity);
    if base.borrow_balance() > capacity_after {
        return Validation::Invalid(InvalidReason::CapacityWillBeExceeded);
    }

    Validation::Ok
}

fn concrete_amount(amount: &ActionAmount, max: &BigUint) -> BigUint {
    match amount {
        ActionAmount::Literal(value) => value.clone(),
        ActionAmount::Max => max.clone(),
    }
}
