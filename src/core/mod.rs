mod engine;
mod format;
mod input;
mod report;
mod types;

pub use engine::{monthly_growth_factor, project, round_half_up};
pub use format::{CurrencyFormatter, LocaleCurrency};
pub use input::{FormFields, parse_lenient_float, parse_lenient_int};
pub use report::{
    COMPOSITION_LABELS, Calculator, CompositionSeries, ProjectionReport, SummaryText,
    TimelineSeries, build_report,
};
pub use types::{ProjectionInput, ProjectionResult, TARGET_AGE, TimelinePoint};
