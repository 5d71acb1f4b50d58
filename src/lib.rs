// lend-core: lending protocol action engine.
// validation-first architecture: every queued action is checked against
// balances projected from the queue before it, never against raw snapshots.
// all computation is deterministic scaled-integer math with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x types.rs: primitives: AssetId, BaseBalance, Factor, Price
//   2.x numeric.rs: fixed-point helpers, MAX sentinel, unit conversion
//   3.x asset.rs: base/collateral account snapshots + mock fixtures
//   4.x action.rs: queue entries, ActionAmount (Literal | Max), PendingAction
//   5.x projection.rs: what-if balance fold + derived capacity aggregates
//   6.x validate.rs: action validator and the reason-string taxonomy
//   7.x allowance.rs: bulker spend-approval check

pub mod action;
pub mod allowance;
pub mod asset;
pub mod numeric;
pub mod projection;
pub mod types;
pub mod validate;

// re exports for convenience
pub use action::*;
pub use allowance::*;
pub use asset::*;
pub use projection::*;
pub use types::*;
pub use validate::*;
pub use numeric::{
    format_units, format_units_display, max_uint256, parse_units, take_percentage,
    AmountParseError, DISPLAY_DECIMALS, FACTOR_DECIMALS, PRICE_DECIMALS,
};
