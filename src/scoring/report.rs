use serde::Serialize;

use super::config::EnergyScale;
use super::engine::{classify, difficulty_energy, is_complete, starting_energy, subcategory_energy};
use super::error::EngineError;
use super::ladder::{Rank, TierLadder};
use crate::catalogue::{Catalogue, Difficulty, Scenario};
use crate::stats::ScoreSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub score: Option<f64>,
    pub rank: Rank,
    /// Fraction toward the next tier, in `[0, 1]`
    pub progress: f64,
    pub energy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryReport {
    pub name: String,
    pub energy: f64,
    pub scenarios: Vec<ScenarioReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub name: String,
    pub energy: f64,
    pub subcategories: Vec<SubcategoryReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankCompletion {
    pub tier: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyReport {
    pub difficulty: Difficulty,
    pub starting_energy: f64,
    pub energy: f64,
    pub rank: Rank,
    pub completion: Vec<RankCompletion>,
    pub categories: Vec<CategoryReport>,
}

impl DifficultyReport {
    pub fn scenarios(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.scenarios.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub difficulties: Vec<DifficultyReport>,
}

impl Report {
    pub fn difficulty(&self, difficulty: Difficulty) -> Option<&DifficultyReport> {
        self.difficulties.iter().find(|d| d.difficulty == difficulty)
    }

    pub fn find_scenario(&self, name: &str) -> Option<(&DifficultyReport, &ScenarioReport)> {
        self.difficulties
            .iter()
            .find_map(|d| d.scenarios().find(|s| s.name == name).map(|s| (d, s)))
    }
}

/// Compute every per-scenario, per-group and per-difficulty figure for a
/// catalogue and a score snapshot.
pub fn build_report(
    catalogue: &Catalogue,
    scores: &ScoreSnapshot,
    scale: &EnergyScale,
) -> Result<Report, EngineError> {
    let tier_counts = catalogue.tier_counts()?;
    let mut difficulties = Vec::with_capacity(catalogue.difficulties.len());

    for block in &catalogue.difficulties {
        let start = starting_energy(block.difficulty, &tier_counts, scale);
        let tiers = block.tiers()?;

        let mut all_energies = Vec::new();
        let mut expected = 0;
        let mut categories = Vec::with_capacity(block.categories.len());

        for category in &block.categories {
            let mut energies = Vec::with_capacity(category.subcategories.len());
            let mut subcategories = Vec::with_capacity(category.subcategories.len());

            for subcategory in &category.subcategories {
                let energy = subcategory_energy(&subcategory.scenarios, scores, start, scale)?;
                let scenarios = subcategory
                    .scenarios
                    .iter()
                    .map(|s| scenario_report(s, scores, start, scale))
                    .collect::<Result<Vec<_>, _>>()?;

                energies.push(energy);
                subcategories.push(SubcategoryReport {
                    name: subcategory.name.clone(),
                    energy,
                    scenarios,
                });
            }

            expected += category.subcategories.len();
            all_energies.extend_from_slice(&energies);
            categories.push(CategoryReport {
                name: category.name.clone(),
                energy: difficulty_energy(&energies, category.subcategories.len()),
                subcategories,
            });
        }

        let energy = difficulty_energy(&all_energies, expected);
        let rank = classify(energy, block.difficulty, &tiers, &tier_counts, scale);
        let completion = tiers
            .iter()
            .map(|tier| RankCompletion {
                tier: tier.clone(),
                complete: is_complete(scores, catalogue, block.difficulty, tier),
            })
            .collect();

        difficulties.push(DifficultyReport {
            difficulty: block.difficulty,
            starting_energy: start,
            energy,
            rank,
            completion,
            categories,
        });
    }

    Ok(Report { difficulties })
}

fn scenario_report(
    scenario: &Scenario,
    scores: &ScoreSnapshot,
    starting_energy: f64,
    scale: &EnergyScale,
) -> Result<ScenarioReport, EngineError> {
    let Some(record) = scores.get(&scenario.name) else {
        return Ok(ScenarioReport {
            name: scenario.name.clone(),
            score: None,
            rank: Rank::Unranked,
            progress: 0.0,
            energy: None,
        });
    };

    let ladder =
        TierLadder::from_map(&scenario.thresholds).map_err(|e| e.in_scenario(&scenario.name))?;
    let score = record.high_score;

    Ok(ScenarioReport {
        name: scenario.name.clone(),
        score: Some(score),
        rank: ladder.rank_of(score),
        progress: ladder.progress(score),
        energy: Some(ladder.energy(score, starting_energy, scale)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Category, DifficultyBlock, Subcategory, ThresholdMap};
    use crate::stats::ScoreRecord;

    const EPS: f64 = 1e-9;

    fn scenario(name: &str, tiers: &[(&str, f64)]) -> Scenario {
        let thresholds: ThresholdMap = tiers.iter().map(|(t, v)| (*t, *v)).collect();
        Scenario {
            name: name.to_string(),
            thresholds,
        }
    }

    fn subcategory(name: &str, scenarios: Vec<Scenario>) -> Subcategory {
        Subcategory {
            name: name.to_string(),
            scenarios,
        }
    }

    /// Novice: Bronze/Silver/Gold at 100/200/400 in two subcategories.
    /// Intermediate: Platinum/Diamond at 1000/1500 in one subcategory.
    fn sample_catalogue() -> Catalogue {
        let novice = [("Bronze", 100.0), ("Silver", 200.0), ("Gold", 400.0)];
        let intermediate = [("Platinum", 1000.0), ("Diamond", 1500.0)];
        Catalogue {
            difficulties: vec![
                DifficultyBlock {
                    difficulty: Difficulty::Novice,
                    categories: vec![Category {
                        name: "clicking".to_string(),
                        subcategories: vec![
                            subcategory("static", vec![scenario("1wall", &novice)]),
                            subcategory(
                                "dynamic",
                                vec![scenario("pasu", &novice), scenario("popcorn", &novice)],
                            ),
                        ],
                    }],
                },
                DifficultyBlock {
                    difficulty: Difficulty::Intermediate,
                    categories: vec![Category {
                        name: "tracking".to_string(),
                        subcategories: vec![subcategory(
                            "smooth",
                            vec![scenario("smoothbot", &intermediate)],
                        )],
                    }],
                },
            ],
        }
    }

    fn scores(entries: &[(&str, f64)]) -> ScoreSnapshot {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), ScoreRecord::new(*name, *score)))
            .collect()
    }

    #[test]
    fn test_full_report() {
        let catalogue = sample_catalogue();
        let snapshot = scores(&[
            ("1wall", 200.0),
            ("pasu", 250.0),
            ("popcorn", 100.0),
            ("smoothbot", 1250.0),
        ]);

        let report = build_report(&catalogue, &snapshot, &EnergyScale::default()).unwrap();
        let novice = report.difficulty(Difficulty::Novice).unwrap();

        assert_eq!(novice.starting_energy, 100.0);
        let static_sub = &novice.categories[0].subcategories[0];
        let dynamic_sub = &novice.categories[0].subcategories[1];
        assert!((static_sub.energy - 200.0).abs() < EPS);
        assert!((dynamic_sub.energy - 225.0).abs() < EPS);

        // 2 / (1/200 + 1/225)
        let expected = 2.0 / (1.0 / 200.0 + 1.0 / 225.0);
        assert!((novice.energy - expected).abs() < EPS);
        assert!((novice.categories[0].energy - expected).abs() < EPS);
        assert_eq!(novice.rank, Rank::Tier("Silver".to_string()));

        let intermediate = report.difficulty(Difficulty::Intermediate).unwrap();
        assert_eq!(intermediate.starting_energy, 400.0);
        assert!((intermediate.energy - 450.0).abs() < EPS);
        assert_eq!(intermediate.rank, Rank::Tier("Platinum".to_string()));
    }

    #[test]
    fn test_incomplete_difficulty_is_zero_and_unranked() {
        let catalogue = sample_catalogue();
        let snapshot = scores(&[("pasu", 400.0)]);

        let report = build_report(&catalogue, &snapshot, &EnergyScale::default()).unwrap();
        let novice = report.difficulty(Difficulty::Novice).unwrap();

        assert_eq!(novice.categories[0].subcategories[0].energy, 0.0);
        assert_eq!(novice.energy, 0.0);
        assert_eq!(novice.categories[0].energy, 0.0);
        assert_eq!(novice.rank, Rank::Unranked);
    }

    #[test]
    fn test_scenario_reports() {
        let catalogue = sample_catalogue();
        let snapshot = scores(&[("pasu", 250.0)]);
        let report = build_report(&catalogue, &snapshot, &EnergyScale::default()).unwrap();

        let (difficulty, pasu) = report.find_scenario("pasu").unwrap();
        assert_eq!(difficulty.difficulty, Difficulty::Novice);
        assert_eq!(pasu.rank, Rank::Tier("Silver".to_string()));
        assert!((pasu.progress - 0.25).abs() < EPS);
        assert!((pasu.energy.unwrap() - 225.0).abs() < EPS);

        let (_, popcorn) = report.find_scenario("popcorn").unwrap();
        assert_eq!(popcorn.score, None);
        assert_eq!(popcorn.energy, None);
        assert_eq!(popcorn.rank, Rank::Unranked);
    }

    #[test]
    fn test_completion_flags() {
        let catalogue = sample_catalogue();
        let snapshot = scores(&[("1wall", 450.0), ("pasu", 250.0)]);
        let report = build_report(&catalogue, &snapshot, &EnergyScale::default()).unwrap();
        let novice = report.difficulty(Difficulty::Novice).unwrap();

        let flags: Vec<(&str, bool)> = novice
            .completion
            .iter()
            .map(|c| (c.tier.as_str(), c.complete))
            .collect();
        assert_eq!(flags, vec![("Bronze", true), ("Silver", true), ("Gold", false)]);
    }

    #[test]
    fn test_bad_thresholds_fail_the_report() {
        let mut catalogue = sample_catalogue();
        catalogue.difficulties[1].categories[0].subcategories[0].scenarios[0] =
            scenario("smoothbot", &[("Platinum", 1000.0)]);

        let err =
            build_report(&catalogue, &ScoreSnapshot::new(), &EnergyScale::default()).unwrap_err();
        assert!(err.to_string().contains("smoothbot"));
    }

    #[test]
    fn test_report_serializes() {
        let catalogue = sample_catalogue();
        let report =
            build_report(&catalogue, &ScoreSnapshot::new(), &EnergyScale::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["difficulties"][0]["difficulty"], "novice");
        assert_eq!(json["difficulties"][0]["rank"], "Unranked");
    }
}
