//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for a [`crate::TrafficRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Fuel units burned per km.
    pub fuel_consumption_rate: f64,
    /// Toll budget applied when a query does not specify one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_toll: Option<f64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fuel_consumption_rate: 1.0,
            max_toll: None,
        }
    }
}

impl RouterConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to [`RouterConfig::default`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: RouterConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.fuel_consumption_rate.is_finite() || self.fuel_consumption_rate < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "fuel_consumption_rate must be finite and non-negative, got {}",
                    self.fuel_consumption_rate
                ),
            });
        }

        if let Some(message) = toll_budget_error(self.max_toll) {
            return Err(Error::InvalidConfig { message });
        }

        Ok(())
    }
}

/// Describe what is wrong with a toll budget, if anything. NaN would disable
/// the budget check entirely, so it is rejected along with negative values.
pub(crate) fn toll_budget_error(max_toll: Option<f64>) -> Option<String> {
    match max_toll {
        Some(max_toll) if max_toll.is_nan() || max_toll < 0.0 => {
            Some(format!("max_toll must be non-negative, got {max_toll}"))
        }
        _ => None,
    }
}
