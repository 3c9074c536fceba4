use thiserror::Error;

use crate::core::ProjectionInput;

/// Longest horizon the service boundaries accept before refusing to project.
pub const MAX_HORIZON_YEARS: u32 = 150;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("currentAge {current_age} needs {years} projected years; at most {max} are allowed")]
    HorizonTooLong { current_age: i32, years: u32, max: u32 },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejects inputs whose projection horizon would exceed [`MAX_HORIZON_YEARS`].
pub fn check_horizon(input: &ProjectionInput) -> Result<(), ProjectionError> {
    let years = input.horizon_years();
    if years > MAX_HORIZON_YEARS {
        return Err(ProjectionError::HorizonTooLong {
            current_age: input.current_age,
            years,
            max: MAX_HORIZON_YEARS,
        });
    }
    Ok(())
}
