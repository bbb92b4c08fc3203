use serde::{Deserialize, Serialize};

/// Energy at the lowest tier of the lowest difficulty.
pub const ENERGY_BASE: f64 = 100.0;

/// Energy added per tier step.
pub const ENERGY_INCREMENT: f64 = 100.0;

/// Resolved energy constants handed to every engine call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyScale {
    pub base: f64,
    pub increment: f64,
}

impl Default for EnergyScale {
    fn default() -> Self {
        Self {
            base: ENERGY_BASE,
            increment: ENERGY_INCREMENT,
        }
    }
}

/// Energy configuration as written in the config file.
///
/// Example YAML:
/// ```yaml
/// energy:
///   base: 100
///   increment: 100
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnergyConfig {
    /// Energy of the first tier of the first difficulty (default: 100.0)
    #[serde(default)]
    pub base: Option<f64>,

    /// Energy per tier step (default: 100.0)
    #[serde(default)]
    pub increment: Option<f64>,
}

impl EnergyConfig {
    pub fn scale(&self) -> EnergyScale {
        EnergyScale {
            base: self.base.unwrap_or(ENERGY_BASE),
            increment: self.increment.unwrap_or(ENERGY_INCREMENT),
        }
    }
}
