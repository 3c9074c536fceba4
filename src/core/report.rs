use serde::Serialize;

use super::engine::{project, round_half_up};
use super::format::CurrencyFormatter;
use super::input::FormFields;
use super::types::{ProjectionInput, ProjectionResult, TARGET_AGE};

pub const COMPOSITION_LABELS: [&str; 2] = ["Dinero Aportado", "Intereses Generados"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryText {
    pub total_invested: String,
    pub total_interest: String,
    pub final_capital: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSeries {
    pub labels: [&'static str; 2],
    pub data: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSeries {
    pub labels: Vec<i32>,
    pub data: Vec<f64>,
}

/// Everything the page renders for one projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub target_age: i32,
    pub total_invested: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub summary: SummaryText,
    pub composition: CompositionSeries,
    pub timeline: TimelineSeries,
}

pub fn build_report(result: &ProjectionResult, formatter: &dyn CurrencyFormatter) -> ProjectionReport {
    ProjectionReport {
        target_age: TARGET_AGE,
        total_invested: result.total_invested,
        total_interest: result.total_interest_earned,
        final_balance: result.final_balance,
        summary: SummaryText {
            total_invested: formatter.format(result.total_invested),
            total_interest: formatter.format(result.total_interest_earned),
            final_capital: formatter.format(result.final_balance),
        },
        composition: CompositionSeries {
            labels: COMPOSITION_LABELS,
            data: [
                round_half_up(result.total_invested),
                round_half_up(result.total_interest_earned),
            ],
        },
        timeline: TimelineSeries {
            labels: result.ages(),
            data: result.balances(),
        },
    }
}

/// Recompute pipeline driven by input-change events.
///
/// Holds only the formatter; every call gets the full set of fields.
pub struct Calculator<F: CurrencyFormatter> {
    formatter: F,
}

impl<F: CurrencyFormatter> Calculator<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn recompute(&self, fields: &FormFields) -> ProjectionReport {
        self.run(&fields.normalize())
    }

    pub fn run(&self, input: &ProjectionInput) -> ProjectionReport {
        build_report(&project(input), &self.formatter)
    }
}
