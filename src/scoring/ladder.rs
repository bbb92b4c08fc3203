use serde::{Serialize, Serializer};
use std::fmt;
use std::iter;

use super::config::EnergyScale;
use super::error::EngineError;
use crate::catalogue::ThresholdMap;

/// Achieved rank of a score or an aggregate energy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rank {
    Unranked,
    Tier(String),
}

impl Rank {
    pub fn label(&self) -> &str {
        match self {
            Rank::Unranked => "Unranked",
            Rank::Tier(name) => name,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Rank::Tier(_))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tier {
    pub name: String,
    pub threshold: f64,
}

/// A scenario's tiers sorted by threshold, ascending and strictly increasing.
///
/// A tier's ordinal is its index here. At least two tiers are always present,
/// which is what the mirrored-gap extrapolation below and above the known
/// range needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TierLadder {
    tiers: Vec<Tier>,
}

impl TierLadder {
    pub fn from_map(map: &ThresholdMap) -> Result<Self, EngineError> {
        if map.len() < 2 {
            return Err(EngineError::InsufficientTiers { found: map.len() });
        }

        let mut tiers = Vec::with_capacity(map.len());
        for (name, &threshold) in map.iter() {
            if !threshold.is_finite() {
                return Err(EngineError::NonFiniteThreshold { tier: name.clone() });
            }
            tiers.push(Tier {
                name: name.clone(),
                threshold,
            });
        }
        tiers.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        if let Some(pair) = tiers
            .windows(2)
            .find(|pair| pair[0].threshold == pair[1].threshold)
        {
            return Err(EngineError::DuplicateThreshold {
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
                value: pair[0].threshold,
            });
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|t| t.name.as_str())
    }

    pub fn ordinal(&self, tier: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.name == tier)
    }

    /// Virtual tier one gap below the lowest, mirroring the lowest real gap.
    pub fn fake_lower(&self) -> f64 {
        let first = self.tiers[0].threshold;
        first - (self.tiers[1].threshold - first)
    }

    /// Virtual tier one gap above the highest, mirroring the highest real gap.
    pub fn fake_upper(&self) -> f64 {
        let n = self.tiers.len();
        let last = self.tiers[n - 1].threshold;
        last + (last - self.tiers[n - 2].threshold)
    }

    /// Ordinal of the highest tier whose threshold is at or below `score`.
    pub fn achieved(&self, score: f64) -> Option<usize> {
        self.tiers.iter().rposition(|t| t.threshold <= score)
    }

    pub fn rank_of(&self, score: f64) -> Rank {
        match self.achieved(score) {
            Some(i) => Rank::Tier(self.tiers[i].name.clone()),
            None => Rank::Unranked,
        }
    }

    /// Fraction of the way from the achieved tier to the next one, in `[0, 1]`.
    ///
    /// Unranked scores measure against the lowest threshold; the top tier is
    /// always complete.
    pub fn progress(&self, score: f64) -> f64 {
        match self.achieved(score) {
            None => {
                let lowest = self.tiers[0].threshold;
                if lowest > 0.0 {
                    (score / lowest).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            }
            Some(i) if i + 1 == self.tiers.len() => 1.0,
            Some(i) => {
                let current = self.tiers[i].threshold;
                let next = self.tiers[i + 1].threshold;
                ((score - current) / (next - current)).clamp(0.0, 1.0)
            }
        }
    }

    /// Continuous energy of `score`.
    ///
    /// Tier `i` sits at `starting_energy + increment * i`. Between tiers the
    /// energy is interpolated linearly; one virtual tier on each side extends
    /// the ladder by one step. Scores past the upper virtual tier saturate.
    /// Scores under the lower virtual tier scale linearly toward zero.
    pub fn energy(&self, score: f64, starting_energy: f64, scale: &EnergyScale) -> f64 {
        let step = scale.increment;
        let fake_lower = self.fake_lower();
        let floor = starting_energy - step;

        if score < fake_lower {
            if fake_lower <= 0.0 {
                return floor;
            }
            return score / fake_lower * floor;
        }

        let ceiling = starting_energy + step * self.tiers.len() as f64;
        if score >= self.fake_upper() {
            return ceiling;
        }

        let levels = iter::once((fake_lower, floor))
            .chain(
                self.tiers
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (t.threshold, starting_energy + step * i as f64)),
            )
            .chain(iter::once((self.fake_upper(), ceiling)));

        let mut previous: Option<(f64, f64)> = None;
        for (threshold, level) in levels {
            if let Some((prev_threshold, prev_level)) = previous {
                if score < threshold {
                    let fraction = (score - prev_threshold) / (threshold - prev_threshold);
                    return prev_level + fraction * (level - prev_level);
                }
            }
            previous = Some((threshold, level));
        }

        ceiling
    }
}
