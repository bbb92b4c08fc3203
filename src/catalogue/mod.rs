mod types;
pub mod validation;

pub use types::{
    Catalogue, Category, Difficulty, DifficultyBlock, Scenario, Subcategory, ThresholdMap,
};
pub use validation::validate_catalogue;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a threshold catalogue from a JSON or YAML file
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The content cannot be parsed into a catalogue
pub fn load_catalogue(path: &Path) -> Result<Catalogue> {
    if !path.exists() {
        anyhow::bail!("Catalogue file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let catalogue: Catalogue = if is_json {
        serde_json::from_str(&content)
            .with_context(|| {
                format!(
                    "Failed to parse catalogue: invalid JSON in {}",
                    path.display()
                )
            })?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| {
                format!(
                    "Failed to parse catalogue: invalid YAML in {}",
                    path.display()
                )
            })?
    };

    log::debug!(
        "Loaded catalogue from {} ({} difficulties, {} scenarios)",
        path.display(),
        catalogue.difficulties.len(),
        catalogue.scenario_names().len()
    );

    Ok(catalogue)
}
