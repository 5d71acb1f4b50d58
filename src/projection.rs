//! Balance projection: the what-if engine.
//!
//! Folds an ordered action queue left-to-right over working copies of the
//! account snapshots and reports the resulting balances plus three derived
//! aggregates: total collateral value, liquidation capacity, and effective
//! borrow capacity. Every MAX amount is resolved at its own fold step,
//! against the state produced by the steps before it, never against the
//! original snapshot.
//!
//! Effective borrow capacity is derived from the folded collateral set
//! (value weighted by each asset's collateral factor, converted to base
//! token units). The chain-reported `borrow_capacity` field on the snapshot
//! is stale as soon as collateral actions queue, so the engine never
//! consults it.

use crate::action::{Action, ActionAmount};
use crate::asset::{find_collateral, BaseAssetSnapshot, CollateralAssetSnapshot};
use crate::numeric::{factor_scale, saturating_sub, token_value, value_to_tokens};
use crate::types::Factor;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Protocol risk parameters. These are policy, supplied by the caller; the
/// defaults are placeholders, not protocol constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Safety margin applied to raw borrow capacity before it is offered as
    /// "available to borrow", so price drift between quote and execution
    /// cannot push a max borrow past capacity.
    pub borrow_safety_factor: Factor,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            borrow_safety_factor: Factor::from_percent(95),
        }
    }
}

impl ProtocolParams {
    pub fn new(borrow_safety_factor: Factor) -> Self {
        Self {
            borrow_safety_factor,
        }
    }
}

/// Output of a projection: post-queue snapshots plus derived aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedBalances {
    pub base_asset: BaseAssetSnapshot,
    pub collateral_assets: Vec<CollateralAssetSnapshot>,
    /// Sum of collateral balances at price, in price-scaled USD.
    pub collateral_value: BigUint,
    /// Borrow balance at which liquidation becomes possible, price-scaled USD.
    pub liquidation_capacity: BigUint,
    /// Effective maximum absolute borrow, in base token units, derived from
    /// the folded collateral set.
    pub borrow_capacity: BigUint,
}

// 5.1: the fold.
pub fn calculate_updated_balances(
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
    actions: &[Action],
    params: &ProtocolParams,
) -> ProjectedBalances {
    let mut base = base.clone();
    let mut collaterals = collaterals.to_vec();

    for action in actions {
        apply_action(&mut base, &mut collaterals, action, params);
    }

    let collateral_value: BigUint = collaterals.iter().map(|a| a.value()).sum();
    let liquidation_capacity: BigUint = collaterals
        .iter()
        .map(|a| a.liquidate_collateral_factor.apply(&a.value()))
        .sum();
    let borrow_capacity = derived_borrow_capacity(&base, &collaterals);

    ProjectedBalances {
        base_asset: base,
        collateral_assets: collaterals,
        collateral_value,
        liquidation_capacity,
        borrow_capacity,
    }
}

fn apply_action(
    base: &mut BaseAssetSnapshot,
    collaterals: &mut [CollateralAssetSnapshot],
    action: &Action,
    params: &ProtocolParams,
) {
    let Some(resolved) = resolved_action_amount(action, base, collaterals, params) else {
        return; // ClaimRewards: nothing to fold
    };

    match action {
        Action::Borrow { .. } | Action::Withdraw { .. } => {
            base.balance = base.balance.debit(&resolved);
        }
        Action::Supply { .. } | Action::Repay { .. } => {
            base.balance = base.balance.credit(&resolved);
        }
        Action::SupplyCollateral { asset, .. } => {
            if let Some(held) = collaterals.iter_mut().find(|a| &a.id == asset) {
                held.balance = &held.balance + &resolved;
            }
        }
        Action::WithdrawCollateral { asset, .. } => {
            if let Some(held) = collaterals.iter_mut().find(|a| &a.id == asset) {
                // collateral balances are unsigned; over-withdrawal is a
                // caller bug the validator rejects before queueing
                debug_assert!(resolved <= held.balance, "collateral underflow");
                held.balance = saturating_sub(&held.balance, &resolved);
            }
        }
        Action::ClaimRewards => {}
    }
}

/// Resolve an action's amount against the current fold state. `None` only
/// for actions that carry no amount. MAX resolution is deterministic: same
/// state in, same concrete amount out.
pub fn resolved_action_amount(
    action: &Action,
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
    params: &ProtocolParams,
) -> Option<BigUint> {
    let concrete = |amount: &ActionAmount, max: BigUint| match amount {
        ActionAmount::Literal(value) => value.clone(),
        ActionAmount::Max => max,
    };

    match action {
        Action::Borrow { amount } => {
            Some(concrete(amount, available_to_borrow(base, collaterals, params)))
        }
        Action::Supply { amount } => Some(concrete(amount, base.wallet_balance.clone())),
        Action::Repay { amount } => Some(concrete(
            amount,
            base.borrow_balance().min(base.wallet_balance.clone()),
        )),
        Action::Withdraw { amount } => Some(concrete(amount, base.earn_balance())),
        Action::SupplyCollateral { asset, amount } => Some(concrete(
            amount,
            find_collateral(collaterals, asset)
                .map(|a| a.wallet_balance.clone())
                .unwrap_or_default(),
        )),
        Action::WithdrawCollateral { asset, amount } => Some(concrete(
            amount,
            find_collateral(collaterals, asset)
                .map(|a| {
                    a.balance
                        .clone()
                        .min(max_safe_collateral_withdrawal(a, base, collaterals))
                })
                .unwrap_or_default(),
        )),
        Action::ClaimRewards => None,
    }
}

/// Effective maximum absolute borrow in base token units: collateral value
/// weighted by each asset's collateral factor, converted at the base price.
pub fn derived_borrow_capacity(
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
) -> BigUint {
    let capacity_value: BigUint = collaterals
        .iter()
        .map(|a| a.collateral_factor.apply(&a.value()))
        .sum();
    value_to_tokens(&capacity_value, base.price.raw(), base.decimals)
}

/// Capacity headroom scaled by the safety margin: what a MAX borrow resolves
/// to, and the ceiling the validator enforces on any borrow.
pub fn available_to_borrow(
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
    params: &ProtocolParams,
) -> BigUint {
    let headroom = saturating_sub(
        &derived_borrow_capacity(base, collaterals),
        &base.borrow_balance(),
    );
    params.borrow_safety_factor.apply(&headroom)
}

/// Largest withdrawal of `asset` that keeps the current borrow within
/// capacity: remaining capacity headroom, un-weighted by the asset's
/// collateral factor, converted into the asset's token units. A zero-factor
/// asset grants no borrowing power, so withdrawing it cannot breach
/// capacity and the bound is the full balance.
pub fn max_safe_collateral_withdrawal(
    asset: &CollateralAssetSnapshot,
    base: &BaseAssetSnapshot,
    collaterals: &[CollateralAssetSnapshot],
) -> BigUint {
    if asset.collateral_factor.is_zero() || asset.price.is_zero() {
        return asset.balance.clone();
    }

    let headroom_units = saturating_sub(
        &derived_borrow_capacity(base, collaterals),
        &base.borrow_balance(),
    );
    let headroom_value = token_value(&headroom_units, base.price.raw(), base.decimals);
    let withdrawable_value = (&headroom_value * factor_scale()) / asset.collateral_factor.raw();
    value_to_tokens(&withdrawable_value, asset.price.raw(), asset.decimals)
}

/// Base-unit capacity contribution of `token_amount` of one collateral
/// asset. Used to price the capacity impact of a candidate withdrawal.
pub fn collateral_capacity_contribution(
    asset: &CollateralAssetSnapshot,
    token_amount: &BigUint,
    base: &BaseAssetSnapshot,
) -> BigUint {
    let value = token_value(token_amount, asset.price.raw(), asset.decimals);
    let capacity_value = asset.collateral_factor.apply(&value);
    value_to_tokens(&capacity_value, base.price.raw(), base.decimals)
}
