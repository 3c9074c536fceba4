use serde::Serialize;

/// Age at which every projection ends.
pub const TARGET_AGE: i32 = 65;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub initial_capital: f64,
    pub current_age: i32,
    /// Nominal annual rate as a fraction, e.g. 0.05 for 5%.
    pub annual_interest_rate: f64,
    pub monthly_contribution: f64,
}

impl ProjectionInput {
    /// Number of simulated years until [`TARGET_AGE`], zero when already there.
    pub fn horizon_years(&self) -> u32 {
        let years = i64::from(TARGET_AGE) - i64::from(self.current_age);
        u32::try_from(years.max(0)).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub age: i32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub total_invested: f64,
    pub total_interest_earned: f64,
    pub final_balance: f64,
    pub timeline: Vec<TimelinePoint>,
}

impl ProjectionResult {
    pub fn ages(&self) -> Vec<i32> {
        self.timeline.iter().map(|point| point.age).collect()
    }

    pub fn balances(&self) -> Vec<f64> {
        self.timeline.iter().map(|point| point.balance).collect()
    }
}
