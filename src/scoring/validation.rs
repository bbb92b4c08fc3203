use super::config::EnergyConfig;

/// Validate energy configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_energy(config: &EnergyConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(base) = config.base {
        if !base.is_finite() {
            errors.push("energy.base: must be a finite number".to_string());
        } else if base < 0.0 {
            errors.push("energy.base: must be non-negative".to_string());
        }
    }

    if let Some(increment) = config.increment {
        if !increment.is_finite() {
            errors.push("energy.increment: must be a finite number".to_string());
        } else if increment <= 0.0 {
            errors.push("energy.increment: must be greater than zero".to_string());
        }
    }

    // The virtual lower tier sits at `base - increment` and must not go below
    // the 0 reserved for incomplete aggregates.
    if errors.is_empty() {
        let scale = config.scale();
        if scale.base < scale.increment {
            errors.push(format!(
                "energy.base: must be at least energy.increment ({})",
                scale.increment
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
