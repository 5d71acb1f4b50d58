//! Property-based tests for the projection and validation core.
//!
//! These tests verify invariants hold under random inputs.

use lend_core::*;
use num_bigint::BigUint;
use proptest::prelude::*;

// Strategies for generating test data

fn amount_strategy() -> impl Strategy<Value = BigUint> {
    (0u64..20_000_000_000u64).prop_map(BigUint::from)
}

fn base_balance_strategy() -> impl Strategy<Value = BaseBalance> {
    (-10_000_000_000i64..=10_000_000_000i64).prop_map(|v| BaseBalance::new(v.into()))
}

/// Base-asset actions with literal amounts. Kept within ranges the mock
/// market can absorb so folds stay meaningful.
fn base_action_strategy() -> impl Strategy<Value = Action> {
    let amount = (1u64..3_000_000_000u64).prop_map(|v| ActionAmount::Literal(BigUint::from(v)));
    prop_oneof![
        amount.clone().prop_map(|amount| Action::Borrow { amount }),
        amount.clone().prop_map(|amount| Action::Supply { amount }),
        amount.clone().prop_map(|amount| Action::Repay { amount }),
        amount.prop_map(|amount| Action::Withdraw { amount }),
        Just(Action::ClaimRewards),
    ]
}

fn queue_strategy() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(base_action_strategy(), 0..6)
}

fn fixtures() -> (BaseAssetSnapshot, Vec<CollateralAssetSnapshot>, ProtocolParams) {
    (
        BaseAssetSnapshot::usdc_mock(),
        vec![CollateralAssetSnapshot::weth_mock()],
        ProtocolParams::default(),
    )
}

proptest! {
    /// Folding an empty queue returns the snapshots unchanged.
    #[test]
    fn projection_is_idempotent_on_empty_queue(
        balance in base_balance_strategy(),
        wallet in amount_strategy(),
    ) {
        let (mut base, collaterals, params) = fixtures();
        base.balance = balance;
        base.wallet_balance = wallet;

        let projected = calculate_updated_balances(&base, &collaterals, &[], &params);

        prop_assert_eq!(&projected.base_asset, &base);
        prop_assert_eq!(&projected.collateral_assets, &collaterals);
    }

    /// Folding q1 ++ q2 in one call equals folding q1, then feeding its
    /// output snapshots into a second call with q2.
    #[test]
    fn fold_composes(
        balance in base_balance_strategy(),
        q1 in queue_strategy(),
        q2 in queue_strategy(),
    ) {
        let (mut base, collaterals, params) = fixtures();
        base.balance = balance;

        let combined: Vec<Action> = q1.iter().chain(q2.iter()).cloned().collect();
        let all_at_once = calculate_updated_balances(&base, &collaterals, &combined, &params);

        let midway = calculate_updated_balances(&base, &collaterals, &q1, &params);
        let chained = calculate_updated_balances(
            &midway.base_asset,
            &midway.collateral_assets,
            &q2,
            &params,
        );

        prop_assert_eq!(all_at_once, chained);
    }

    /// Resolving a MAX amount twice with identical inputs yields the
    /// identical concrete amount.
    #[test]
    fn max_resolution_is_deterministic(
        balance in base_balance_strategy(),
        wallet in amount_strategy(),
    ) {
        let (mut base, collaterals, params) = fixtures();
        base.balance = balance;
        base.wallet_balance = wallet;

        for action in [
            Action::Borrow { amount: ActionAmount::Max },
            Action::Supply { amount: ActionAmount::Max },
            Action::Repay { amount: ActionAmount::Max },
            Action::Withdraw { amount: ActionAmount::Max },
            Action::WithdrawCollateral {
                asset: AssetId::new("WETH"),
                amount: ActionAmount::Max,
            },
        ] {
            let first = resolved_action_amount(&action, &base, &collaterals, &params);
            let second = resolved_action_amount(&action, &base, &collaterals, &params);
            prop_assert_eq!(first, second);
        }
    }

    /// Projection never panics and never produces a negative unsigned field
    /// for arbitrary base-action queues.
    #[test]
    fn fold_is_total_over_base_queues(
        balance in base_balance_strategy(),
        queue in queue_strategy(),
    ) {
        let (mut base, collaterals, params) = fixtures();
        base.balance = balance;

        let projected = calculate_updated_balances(&base, &collaterals, &queue, &params);
        // wallet and collateral balances are untouched by base actions
        prop_assert_eq!(&projected.base_asset.wallet_balance, &base.wallet_balance);
        prop_assert_eq!(&projected.collateral_assets, &collaterals);
    }

    /// For a flat account, every amount at or below the safety-scaled
    /// capacity (and above the minimum) validates; every amount above it
    /// fails with the capacity reason. The threshold never inverts.
    #[test]
    fn borrow_verdict_is_monotonic_in_amount(
        below in 0u64..15_675_000_000u64,
        over in 1u64..1_000_000_000u64,
    ) {
        let (base, collaterals, params) = fixtures();
        // available = 95% of $16,500 = 15_675_000_000 base units

        let below_amount = BigUint::from(below);
        let verdict = validate_adding_action(
            &base,
            &collaterals,
            &[],
            &Action::Borrow { amount: ActionAmount::Literal(below_amount) },
            &params,
        );
        // below the threshold the only possible failure is the borrow minimum
        prop_assert!(
            verdict.is_ok()
                || matches!(verdict.reason(), Some(InvalidReason::BelowMinimumBorrow { .. })),
            "unexpected verdict below threshold: {:?}",
            verdict,
        );

        let over_amount = BigUint::from(15_675_000_000u64 + over);
        let verdict = validate_adding_action(
            &base,
            &collaterals,
            &[],
            &Action::Borrow { amount: ActionAmount::Literal(over_amount) },
            &params,
        );
        prop_assert_eq!(
            verdict,
            Validation::Invalid(InvalidReason::BorrowCapacityExceeded)
        );
    }

    /// String -> units -> string round trip is lossless for any value
    /// representable at the asset's decimals.
    #[test]
    fn unit_conversion_round_trips(
        raw in any::<u128>(),
        decimals in 0u32..=18u32,
    ) {
        let amount = BigUint::from(raw);
        let rendered = format_units(&amount, decimals);
        prop_assert_eq!(parse_units(&rendered, decimals).unwrap(), amount);
    }

    /// take_percentage never rounds upward and a 100% factor is identity.
    #[test]
    fn take_percentage_bounds(raw in any::<u128>(), percent in 0u32..=100u32) {
        let amount = BigUint::from(raw);
        let factor = Factor::from_percent(percent);
        let taken = factor.apply(&amount);

        prop_assert!(taken <= amount);
        if percent == 100 {
            prop_assert_eq!(taken, amount);
        }
    }
}
