// 4.0 action.rs: queue entries. an Action is fully specified; a PendingAction
// is still under user edit and may lack an amount.
// 4.1 ActionAmount replaces the raw uint256-max wire sentinel with a sum type
// so no arithmetic ever touches the sentinel value itself.

use crate::numeric::max_uint256;
use crate::types::AssetId;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete amount, or a request to use everything available.
/// Resolution of `Max` happens inside the projection fold, against the fold
/// state current at that step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionAmount {
    Literal(BigUint),
    Max,
}

impl ActionAmount {
    /// Wire-compatible constructor: the uint256 maximum maps to `Max`.
    pub fn from_raw(raw: BigUint) -> Self {
        if raw == max_uint256() {
            ActionAmount::Max
        } else {
            ActionAmount::Literal(raw)
        }
    }

    /// Inverse of `from_raw`, for callers that keep the sentinel encoding.
    pub fn to_raw(&self) -> BigUint {
        match self {
            ActionAmount::Literal(amount) => amount.clone(),
            ActionAmount::Max => max_uint256(),
        }
    }

    pub fn is_max(&self) -> bool {
        matches!(self, ActionAmount::Max)
    }

    pub fn literal(&self) -> Option<&BigUint> {
        match self {
            ActionAmount::Literal(amount) => Some(amount),
            ActionAmount::Max => None,
        }
    }
}

/// A committed queue entry. Base-asset actions carry only an amount; the
/// base asset is implied by the market. Collateral actions name their asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Borrow { amount: ActionAmount },
    Supply { amount: ActionAmount },
    Repay { amount: ActionAmount },
    Withdraw { amount: ActionAmount },
    SupplyCollateral { asset: AssetId, amount: ActionAmount },
    WithdrawCollateral { asset: AssetId, amount: ActionAmount },
    /// Exempt from validation and a projection no-op; carried so a queue
    /// containing one still folds.
    ClaimRewards,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Borrow { .. } => ActionKind::Borrow,
            Action::Supply { .. } => ActionKind::Supply,
            Action::Repay { .. } => ActionKind::Repay,
            Action::Withdraw { .. } => ActionKind::Withdraw,
            Action::SupplyCollateral { .. } => ActionKind::SupplyCollateral,
            Action::WithdrawCollateral { .. } => ActionKind::WithdrawCollateral,
            Action::ClaimRewards => ActionKind::ClaimRewards,
        }
    }

    pub fn amount(&self) -> Option<&ActionAmount> {
        match self {
            Action::Borrow { amount }
            | Action::Supply { amount }
            | Action::Repay { amount }
            | Action::Withdraw { amount }
            | Action::SupplyCollateral { amount, .. }
            | Action::WithdrawCollateral { amount, .. } => Some(amount),
            Action::ClaimRewards => None,
        }
    }

    pub fn collateral_asset(&self) -> Option<&AssetId> {
        match self {
            Action::SupplyCollateral { asset, .. }
            | Action::WithdrawCollateral { asset, .. } => Some(asset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Borrow,
    Supply,
    Repay,
    Withdraw,
    SupplyCollateral,
    WithdrawCollateral,
    ClaimRewards,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Borrow => "Borrow",
            ActionKind::Supply => "Supply",
            ActionKind::Repay => "Repay",
            ActionKind::Withdraw => "Withdraw",
            ActionKind::SupplyCollateral => "Supply Collateral",
            ActionKind::WithdrawCollateral => "Withdraw Collateral",
            ActionKind::ClaimRewards => "Claim Rewards",
        };
        write!(f, "{name}")
    }
}

/// A queue entry under active edit. The amount may not have been typed yet;
/// collateral kinds additionally need an asset before they can commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub asset: Option<AssetId>,
    pub amount: Option<ActionAmount>,
}

impl PendingAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            asset: None,
            amount: None,
        }
    }

    pub fn with_asset(mut self, asset: AssetId) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn with_amount(mut self, amount: ActionAmount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Promote to a committed `Action` once every required field exists.
    pub fn finalize(&self) -> Option<Action> {
        match self.kind {
            ActionKind::Borrow => Some(Action::Borrow {
                amount: self.amount.clone()?,
            }),
            ActionKind::Supply => Some(Action::Supply {
                amount: self.amount.clone()?,
            }),
            ActionKind::Repay => Some(Action::Repay {
                amount: self.amount.clone()?,
            }),
            ActionKind::Withdraw => Some(Action::Withdraw {
                amount: self.amount.clone()?,
            }),
            ActionKind::SupplyCollateral => Some(Action::SupplyCollateral {
                asset: self.asset.clone()?,
                amount: self.amount.clone()?,
            }),
            ActionKind::WithdrawCollateral => Some(Action::WithdrawCollateral {
                asset: self.asset.clone()?,
                amount: self.amount.clone()?,
            }),
            ActionKind::ClaimRewards => Some(Action::ClaimRewards),
        }
    }
}
