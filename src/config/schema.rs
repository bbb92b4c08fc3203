use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::EnergyConfig;

/// Contents of `config.yaml`. Every field is optional.
///
/// Example YAML:
/// ```yaml
/// catalogue: ~/benchmarks/season4.yaml
/// stats_dir: /mnt/games/SteamLibrary/steamapps/common/FPSAimTrainer/FPSAimTrainer/stats
/// energy:
///   base: 100
///   increment: 100
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Threshold catalogue file (JSON or YAML)
    #[serde(default)]
    pub catalogue: Option<PathBuf>,

    /// Stats export directory; discovered from Steam libraries when unset
    #[serde(default)]
    pub stats_dir: Option<PathBuf>,

    #[serde(default)]
    pub energy: Option<EnergyConfig>,
}
