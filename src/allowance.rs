// 7.0 allowance.rs: spend-approval check for the queued submission.
// Supply and Repay pull base tokens out of the wallet through the bulker,
// so the bulker's ERC-20 allowance must cover their combined total before
// the queue can be submitted. Everything else moves protocol-side balances
// and consumes no approval.

use crate::action::{Action, ActionAmount};
use crate::asset::BaseAssetSnapshot;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowanceStatus {
    Sufficient,
    NeedsApproval { required: BigUint, current: BigUint },
}

impl AllowanceStatus {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, AllowanceStatus::Sufficient)
    }
}

/// Total base-asset spend the queue will draw from the wallet. MAX amounts
/// resolve against the snapshot the same way the projection resolves them.
pub fn required_base_allowance(base: &BaseAssetSnapshot, actions: &[Action]) -> BigUint {
    let mut required = BigUint::zero();
    for action in actions {
        match action {
            Action::Supply { amount } => {
                required += match amount {
                    ActionAmount::Literal(value) => value.clone(),
                    ActionAmount::Max => base.wallet_balance.clone(),
                };
            }
            Action::Repay { amount } => {
                required += match amount {
                    ActionAmount::Literal(value) => value.clone(),
                    ActionAmount::Max => base.borrow_balance().min(base.wallet_balance.clone()),
                };
            }
            _ => {}
        }
    }
    required
}

pub fn validate_allowance(base: &BaseAssetSnapshot, actions: &[Action]) -> AllowanceStatus {
    let required = required_base_allowance(base, actions);
    if required > base.bulker_allowance {
        AllowanceStatus::NeedsApproval {
            required,
            current: base.bulker_allowance.clone(),
        }
    } else {
        AllowanceStatus::Sufficient
    }
}
