use thiserror::Error;

/// Malformed threshold data. A missing score or an incomplete aggregate is
/// never an error: the first is skipped, the second yields energy 0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("threshold map needs at least 2 tiers, found {found}")]
    InsufficientTiers { found: usize },

    #[error("tiers '{first}' and '{second}' share the threshold {value}")]
    DuplicateThreshold {
        first: String,
        second: String,
        value: f64,
    },

    #[error("tier '{tier}' has a non-finite threshold")]
    NonFiniteThreshold { tier: String },

    #[error("scenario '{scenario}': {source}")]
    Scenario {
        scenario: String,
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Attach the scenario name, unless one is already attached.
    pub fn in_scenario(self, scenario: &str) -> Self {
        match self {
            EngineError::Scenario { .. } => self,
            other => EngineError::Scenario {
                scenario: scenario.to_string(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_scenario_wraps_once() {
        let err = EngineError::InsufficientTiers { found: 1 }
            .in_scenario("pasu")
            .in_scenario("other");
        assert_eq!(
            err.to_string(),
            "scenario 'pasu': threshold map needs at least 2 tiers, found 1"
        );
    }
}
