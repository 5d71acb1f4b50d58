//! Lending Action Engine Simulation.
//!
//! Walks the validation and projection pipeline the way a front end drives
//! it: queue actions one at a time, validate each against the projected
//! balances, and render the before/after position.

use lend_core::*;
use num_bigint::BigUint;

fn main() {
    println!("Lending Action Engine Simulation");
    println!("Single Market, Collateralized Borrowing, Full Queue Lifecycle\n");

    scenario_1_borrow_happy_path();
    scenario_2_validation_tour();
    scenario_3_max_resolution();
    scenario_4_queue_composition();
    scenario_5_allowance();

    println!("\nAll simulations completed successfully.");
}

fn market() -> (BaseAssetSnapshot, Vec<CollateralAssetSnapshot>, ProtocolParams) {
    (
        BaseAssetSnapshot::usdc_mock(),
        vec![
            CollateralAssetSnapshot::weth_mock(),
            CollateralAssetSnapshot::wbtc_mock(),
        ],
        ProtocolParams::default(),
    )
}

fn usdc(units: u64) -> ActionAmount {
    ActionAmount::Literal(BigUint::from(units))
}

fn print_projection(label: &str, projected: &ProjectedBalances) {
    let base = &projected.base_asset;
    println!("  {label}:");
    println!(
        "    base balance: {} ({})",
        base.balance,
        if base.balance.is_borrowing() {
            "borrowing"
        } else if base.balance.is_earning() {
            "earning"
        } else {
            "flat"
        }
    );
    println!(
        "    collateral value: ${}, borrow capacity: {} {}",
        format_units_display(&projected.collateral_value, PRICE_DECIMALS, 2),
        format_units_display(&projected.borrow_capacity, base.decimals, 2),
        base.symbol,
    );
    println!(
        "    liquidation point: ${}",
        format_units_display(&projected.liquidation_capacity, PRICE_DECIMALS, 2)
    );
}

/// A clean borrow against WETH collateral.
fn scenario_1_borrow_happy_path() {
    println!("Scenario 1: Borrow Happy Path\n");

    let (base, collaterals, params) = market();
    print_projection(
        "before",
        &calculate_updated_balances(&base, &collaterals, &[], &params),
    );

    let candidate = Action::Borrow {
        amount: usdc(1_200_000_000), // $1,200
    };
    let verdict = validate_adding_action(&base, &collaterals, &[], &candidate, &params);
    println!("  validate Borrow $1,200 -> {verdict:?}");

    let queue = [candidate];
    print_projection(
        "after",
        &calculate_updated_balances(&base, &collaterals, &queue, &params),
    );
    println!();
}

/// One failing candidate per reason in the taxonomy.
fn scenario_2_validation_tour() {
    println!("Scenario 2: Validation Failure Tour\n");

    let (base, collaterals, params) = market();

    let mut borrowing = base.clone();
    borrowing.balance = BaseBalance::from_borrowed(BigUint::from(10_000_000_000u64));

    let mut earning = base.clone();
    earning.balance = BaseBalance::from_supplied(BigUint::from(2_000_000_000u64));

    let cases: Vec<(&str, &BaseAssetSnapshot, Action)> = vec![
        (
            "Borrow past capacity",
            &base,
            Action::Borrow {
                amount: usdc(20_000_000_000),
            },
        ),
        (
            "Borrow below the minimum",
            &base,
            Action::Borrow { amount: usdc(100) },
        ),
        (
            "Borrow while earning",
            &earning,
            Action::Borrow {
                amount: usdc(1_200_000_000),
            },
        ),
        (
            "Supply while borrowing",
            &borrowing,
            Action::Supply {
                amount: usdc(10_000_000_000),
            },
        ),
        (
            "Withdraw collateral backing a borrow",
            &borrowing,
            Action::WithdrawCollateral {
                asset: AssetId::new("WETH"),
                amount: ActionAmount::Literal(BigUint::from(10u32) * numeric::pow10(18)),
            },
        ),
        (
            "Unknown collateral asset",
            &base,
            Action::SupplyCollateral {
                asset: AssetId::new("LINK"),
                amount: ActionAmount::Max,
            },
        ),
    ];

    for (label, snapshot, candidate) in cases {
        let verdict = validate_adding_action(snapshot, &collaterals, &[], &candidate, &params);
        match verdict.reason() {
            Some(reason) => println!("  {label}: \"{reason}\""),
            None => println!("  {label}: ok"),
        }
    }
    println!();
}

/// MAX amounts resolve to concrete figures inside the engine.
fn scenario_3_max_resolution() {
    println!("\nScenario 3: MAX Sentinel Resolution\n");

    let (base, collaterals, params) = market();

    let max_borrow = Action::Borrow {
        amount: ActionAmount::Max,
    };
    let projected = calculate_updated_balances(&base, &collaterals, &[max_borrow], &params);
    println!(
        "  MAX borrow resolves to {} USDC (95% of capacity headroom)",
        format_units_display(&projected.base_asset.borrow_balance(), 6, 2)
    );

    let wire = ActionAmount::from_raw(max_uint256());
    println!(
        "  wire sentinel 2^256-1 decodes to {:?} and re-encodes losslessly: {}",
        wire,
        wire.to_raw() == max_uint256()
    );
    println!();
}

/// Each step's MAX resolution sees the fold state before it.
fn scenario_4_queue_composition() {
    println!("Scenario 4: Queue Composition\n");

    let (mut base, collaterals, params) = market();
    base.balance = BaseBalance::from_supplied(BigUint::from(2_000_000_000u64));

    let queue = [
        Action::Withdraw {
            amount: ActionAmount::Max,
        },
        Action::Borrow {
            amount: ActionAmount::Max,
        },
    ];
    print_projection(
        "withdraw all, then MAX borrow",
        &calculate_updated_balances(&base, &collaterals, &queue, &params),
    );
    println!();
}

/// The bulker needs spend approval for wallet-outbound actions.
fn scenario_5_allowance() {
    println!("Scenario 5: Bulker Allowance\n");

    let (base, _collaterals, _params) = market();
    let queue = [Action::Supply {
        amount: usdc(2_000_000_000),
    }];

    match validate_allowance(&base, &queue) {
        AllowanceStatus::Sufficient => println!("  allowance covers the queue"),
        AllowanceStatus::NeedsApproval { required, current } => println!(
            "  approval needed: required {} USDC, granted {} USDC",
            format_units_display(&required, 6, 2),
            format_units_display(&current, 6, 2)
        ),
    }
}
