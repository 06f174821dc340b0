use serde::{Deserialize, Serialize};
use thiserror::Error;

// This represents the maximum number of periods a projection can span, i.e. ten years
// of weekly pay periods.
// NOTE! If you change this const, make sure you also update the `ExcessivePeriodCount`
// error message.
pub const MAX_PERIODS: usize = 520;

const DEFAULT_PERIOD_COUNT: usize = 6;

/// Caller supplied settings for a projection.
///
/// These are always passed explicitly; the engine never reads preferences from
/// anywhere else. Missing fields fall back to [`ProjectionOptions::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Number of periods from the current period onwards
    pub period_count: usize,
    /// Number of periods before the current period
    pub history_count: usize,
    pub carry_over_enabled: bool,
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("projections longer than 520 periods are unsupported (requested {0})")]
    ExcessivePeriodCount(usize),
    #[error("could not parse projection options")]
    Parse(#[from] serde_json::Error),
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions {
            period_count: DEFAULT_PERIOD_COUNT,
            history_count: 0,
            carry_over_enabled: true,
        }
    }
}

impl ProjectionOptions {
    /// Parse options from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: ProjectionOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let total = self.period_count.saturating_add(self.history_count);
        if total > MAX_PERIODS {
            return Err(OptionsError::ExcessivePeriodCount(total));
        }

        Ok(())
    }
}
