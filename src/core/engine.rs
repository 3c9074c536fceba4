use log::trace;

use super::types::{ProjectionInput, ProjectionResult, TARGET_AGE, TimelinePoint};

const MONTHS_PER_YEAR: u32 = 12;
/// Upper bound on the up-front timeline allocation; longer runs grow as they go.
const TIMELINE_CAPACITY_HINT: u32 = 256;

/// Projects the account balance year by year until [`TARGET_AGE`].
///
/// Every month the contribution is deposited first and the balance then grows
/// by the twelfth root of the annual growth factor. Recorded timeline balances
/// are rounded; the carried balance is not.
///
/// Runtime and memory are linear in the horizon, which is unbounded for very
/// negative ages. Service callers bound it with `check_horizon` first.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    if input.current_age >= TARGET_AGE {
        return already_retired(input);
    }

    let years = input.horizon_years();
    let factor = monthly_growth_factor(input.annual_interest_rate);

    let mut total_invested = input.initial_capital;
    let mut balance = input.initial_capital;
    let mut timeline = Vec::with_capacity(years.min(TIMELINE_CAPACITY_HINT) as usize + 1);
    timeline.push(TimelinePoint {
        age: input.current_age,
        balance: input.initial_capital,
    });

    for year in 1..=years {
        total_invested += input.monthly_contribution * f64::from(MONTHS_PER_YEAR);
        balance = simulate_year(balance, input.monthly_contribution, factor);

        // Never past TARGET_AGE, so always back in i32 range.
        let age = i32::try_from(i64::from(input.current_age) + i64::from(year))
            .unwrap_or(TARGET_AGE);
        trace!("age {age}: balance {balance}, invested {total_invested}");
        timeline.push(TimelinePoint {
            age,
            balance: round_half_up(balance),
        });
    }

    ProjectionResult {
        total_invested,
        total_interest_earned: balance - total_invested,
        final_balance: balance,
        timeline,
    }
}

fn already_retired(input: &ProjectionInput) -> ProjectionResult {
    ProjectionResult {
        total_invested: input.initial_capital,
        total_interest_earned: 0.0,
        final_balance: input.initial_capital,
        timeline: vec![TimelinePoint {
            age: input.current_age,
            balance: input.initial_capital,
        }],
    }
}

/// Effective monthly multiplier whose twelfth power is `1 + annual_rate`.
pub fn monthly_growth_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / f64::from(MONTHS_PER_YEAR))
}

fn simulate_year(opening_balance: f64, monthly_contribution: f64, factor: f64) -> f64 {
    let mut balance = opening_balance;
    for _ in 0..MONTHS_PER_YEAR {
        balance += monthly_contribution;
        balance *= factor;
    }
    balance
}

/// Rounds to the nearest integer, with halves going towards positive infinity.
///
/// Values in `[-0.5, 0)` round to `-0.0`, as in the browser.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    if rounded == 0.0 && value.is_sign_negative() {
        -0.0
    } else {
        rounded
    }
}
