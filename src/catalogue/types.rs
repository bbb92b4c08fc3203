use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::scoring::{EngineError, TierLadder};

/// Benchmark difficulty. Declaration order is the energy order: each
/// difficulty's ladder starts above every lower difficulty's ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Novice,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Novice,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown difficulty '{}' (expected novice, intermediate or advanced)",
                    s
                )
            })
    }
}

/// Tier label -> score threshold for a single scenario.
///
/// Iteration order is alphabetical by label and carries no meaning; build a
/// [`TierLadder`] to get tiers in rank order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ThresholdMap(BTreeMap<String, f64>);

impl ThresholdMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tier: impl Into<String>, threshold: f64) -> Option<f64> {
        self.0.insert(tier.into(), threshold)
    }

    pub fn get(&self, tier: &str) -> Option<f64> {
        self.0.get(tier).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ThresholdMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub thresholds: ThresholdMap,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Subcategory {
    pub name: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DifficultyBlock {
    pub difficulty: Difficulty,
    pub categories: Vec<Category>,
}

impl DifficultyBlock {
    pub fn subcategories(&self) -> impl Iterator<Item = &Subcategory> {
        self.categories.iter().flat_map(|c| c.subcategories.iter())
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.subcategories().flat_map(|s| s.scenarios.iter())
    }

    /// Tier labels of this difficulty in rank order (lowest first).
    ///
    /// Taken from the first scenario's ladder; catalogue validation makes
    /// sure every other scenario agrees. Empty when there are no scenarios.
    pub fn tiers(&self) -> Result<Vec<String>, EngineError> {
        let Some(first) = self.scenarios().next() else {
            return Ok(Vec::new());
        };
        let ladder = TierLadder::from_map(&first.thresholds)
            .map_err(|e| e.in_scenario(&first.name))?;
        Ok(ladder.names().map(str::to_string).collect())
    }
}

/// Full threshold catalogue: difficulty -> category -> subcategory -> scenario.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    pub difficulties: Vec<DifficultyBlock>,
}

impl Catalogue {
    pub fn difficulty(&self, difficulty: Difficulty) -> Option<&DifficultyBlock> {
        self.difficulties
            .iter()
            .find(|block| block.difficulty == difficulty)
    }

    /// Every scenario name in the catalogue, across all difficulties.
    pub fn scenario_names(&self) -> Vec<&str> {
        self.difficulties
            .iter()
            .flat_map(|block| block.scenarios())
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn find_scenario(&self, name: &str) -> Option<(Difficulty, &Scenario)> {
        self.difficulties.iter().find_map(|block| {
            block
                .scenarios()
                .find(|s| s.name == name)
                .map(|s| (block.difficulty, s))
        })
    }

    /// Number of tiers per difficulty, used to offset starting energies.
    pub fn tier_counts(&self) -> Result<BTreeMap<Difficulty, usize>, EngineError> {
        let mut counts = BTreeMap::new();
        for block in &self.difficulties {
            counts.insert(block.difficulty, block.tiers()?.len());
        }
        Ok(counts)
    }
}
