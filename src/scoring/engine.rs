use std::collections::BTreeMap;

use super::config::EnergyScale;
use super::error::EngineError;
use super::ladder::{Rank, TierLadder};
use crate::catalogue::{Catalogue, Difficulty, Scenario, ThresholdMap};
use crate::stats::ScoreSnapshot;

/// Energy of one score against one scenario's thresholds.
pub fn scenario_energy(
    score: f64,
    thresholds: &ThresholdMap,
    starting_energy: f64,
    scale: &EnergyScale,
) -> Result<f64, EngineError> {
    let ladder = TierLadder::from_map(thresholds)?;
    Ok(ladder.energy(score, starting_energy, scale))
}

/// Highest tier whose threshold is at or below `score`.
///
/// Works on any threshold map, including one with a single tier.
pub fn rank_of(score: f64, thresholds: &ThresholdMap) -> Rank {
    thresholds
        .iter()
        .filter(|(_, threshold)| **threshold <= score)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(name, _)| Rank::Tier(name.clone()))
        .unwrap_or(Rank::Unranked)
}

/// Best scenario energy in a subcategory.
///
/// Scenarios without a recorded score are skipped; 0 when none is scored.
pub fn subcategory_energy(
    scenarios: &[Scenario],
    scores: &ScoreSnapshot,
    starting_energy: f64,
    scale: &EnergyScale,
) -> Result<f64, EngineError> {
    let mut best: Option<f64> = None;

    for scenario in scenarios {
        let Some(record) = scores.get(&scenario.name) else {
            continue;
        };
        let energy = scenario_energy(
            record.high_score,
            &scenario.thresholds,
            starting_energy,
            scale,
        )
        .map_err(|e| e.in_scenario(&scenario.name))?;
        best = Some(best.map_or(energy, |b| b.max(energy)));
    }

    Ok(best.unwrap_or(0.0))
}

/// Harmonic mean of subcategory energies, gated on completeness.
///
/// Returns exactly 0 unless `energies` holds `expected` values and none of
/// them is zero.
pub fn difficulty_energy(energies: &[f64], expected: usize) -> f64 {
    if energies.is_empty() || energies.len() != expected || energies.iter().any(|e| *e == 0.0) {
        return 0.0;
    }
    let reciprocal_sum: f64 = energies.iter().map(|e| 1.0 / e).sum();
    energies.len() as f64 / reciprocal_sum
}

/// Energy of the lowest tier of `difficulty`: the base plus one increment
/// for every tier of every lower difficulty.
pub fn starting_energy(
    difficulty: Difficulty,
    tier_counts: &BTreeMap<Difficulty, usize>,
    scale: &EnergyScale,
) -> f64 {
    let lower_tiers: usize = tier_counts.range(..difficulty).map(|(_, count)| count).sum();
    scale.base + scale.increment * lower_tiers as f64
}

/// Map an aggregate energy back onto the tiers of a difficulty.
///
/// `tiers` must be in rank order (lowest first); tier `i` is reached at
/// `starting_energy + increment * i`.
pub fn classify(
    energy: f64,
    difficulty: Difficulty,
    tiers: &[String],
    tier_counts: &BTreeMap<Difficulty, usize>,
    scale: &EnergyScale,
) -> Rank {
    let start = starting_energy(difficulty, tier_counts, scale);
    tiers
        .iter()
        .enumerate()
        .rev()
        .find(|(i, _)| start + scale.increment * *i as f64 <= energy)
        .map(|(_, name)| Rank::Tier(name.clone()))
        .unwrap_or(Rank::Unranked)
}

/// Whether every scored scenario of `difficulty` that defines `tier` meets it.
///
/// Unscored scenarios never block completion.
pub fn is_complete(
    scores: &ScoreSnapshot,
    catalogue: &Catalogue,
    difficulty: Difficulty,
    tier: &str,
) -> bool {
    let Some(block) = catalogue.difficulty(difficulty) else {
        return true;
    };

    block.scenarios().all(|scenario| {
        match (scenario.thresholds.get(tier), scores.get(&scenario.name)) {
            (Some(threshold), Some(record)) => record.high_score >= threshold,
            _ => true,
        }
    })
}
