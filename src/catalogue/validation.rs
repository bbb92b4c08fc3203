use std::collections::HashSet;

use super::types::Catalogue;
use crate::scoring::TierLadder;

/// Validate a threshold catalogue after loading.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalogue(catalogue: &Catalogue) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_difficulties = HashSet::new();

    for block in &catalogue.difficulties {
        let difficulty = block.difficulty;
        if !seen_difficulties.insert(difficulty) {
            errors.push(format!("{}: difficulty listed more than once", difficulty));
        }

        if block.scenarios().next().is_none() {
            errors.push(format!("{}: no scenarios", difficulty));
        }

        let mut seen_scenarios = HashSet::new();
        let mut reference: Option<(String, Vec<String>)> = None;

        for category in &block.categories {
            for subcategory in &category.subcategories {
                let path = format!("{}.{}.{}", difficulty, category.name, subcategory.name);

                if subcategory.scenarios.is_empty() {
                    errors.push(format!("{}: no scenarios", path));
                }

                for scenario in &subcategory.scenarios {
                    if !seen_scenarios.insert(scenario.name.as_str()) {
                        errors.push(format!(
                            "{}.{}: scenario listed more than once in {}",
                            path, scenario.name, difficulty
                        ));
                    }

                    let ladder = match TierLadder::from_map(&scenario.thresholds) {
                        Ok(ladder) => ladder,
                        Err(e) => {
                            errors.push(format!("{}.{}: {}", path, scenario.name, e));
                            continue;
                        }
                    };

                    let names: Vec<String> = ladder.names().map(str::to_string).collect();
                    if reference.is_none() {
                        reference = Some((scenario.name.clone(), names));
                        continue;
                    }
                    if let Some((first, expected)) = &reference {
                        if *expected != names {
                            errors.push(format!(
                                "{}.{}: tier order [{}] differs from '{}' [{}]",
                                path,
                                scenario.name,
                                names.join(", "),
                                first,
                                expected.join(", ")
                            ));
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Category, Difficulty, DifficultyBlock, Scenario, Subcategory};

    fn scenario(name: &str, tiers: &[(&str, f64)]) -> Scenario {
        Scenario {
            name: name.to_string(),
            thresholds: tiers.iter().map(|(t, v)| (*t, *v)).collect(),
        }
    }

    fn block(difficulty: Difficulty, scenarios: Vec<Scenario>) -> DifficultyBlock {
        DifficultyBlock {
            difficulty,
            categories: vec![Category {
                name: "clicking".to_string(),
                subcategories: vec![Subcategory {
                    name: "static".to_string(),
                    scenarios,
                }],
            }],
        }
    }

    const TIERS: [(&str, f64); 3] = [("Bronze", 100.0), ("Silver", 200.0), ("Gold", 300.0)];

    #[test]
    fn test_valid_catalogue() {
        let catalogue = Catalogue {
            difficulties: vec![block(
                Difficulty::Novice,
                vec![scenario("a", &TIERS), scenario("b", &TIERS)],
            )],
        };
        assert!(validate_catalogue(&catalogue).is_ok());
    }

    #[test]
    fn test_empty_catalogue() {
        assert!(validate_catalogue(&Catalogue::default()).is_ok());
    }

    #[test]
    fn test_insufficient_tiers() {
        let catalogue = Catalogue {
            difficulties: vec![block(
                Difficulty::Novice,
                vec![scenario("a", &[("Bronze", 100.0)])],
            )],
        };
        let errors = validate_catalogue(&catalogue).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("novice.clicking.static.a:"));
        assert!(errors[0].contains("at least 2 tiers"));
    }

    #[test]
    fn test_inconsistent_tier_order() {
        let catalogue = Catalogue {
            difficulties: vec![block(
                Difficulty::Novice,
                vec![
                    scenario("a", &TIERS),
                    scenario("b", &[("Bronze", 100.0), ("Silver", 400.0), ("Gold", 300.0)]),
                ],
            )],
        };
        let errors = validate_catalogue(&catalogue).unwrap_err();
        assert!(errors[0].contains("tier order"));
        assert!(errors[0].contains("'a'"));
    }

    #[test]
    fn test_duplicate_difficulty_and_scenario() {
        let catalogue = Catalogue {
            difficulties: vec![
                block(Difficulty::Novice, vec![scenario("a", &TIERS), scenario("a", &TIERS)]),
                block(Difficulty::Novice, vec![scenario("c", &TIERS)]),
            ],
        };
        let errors = validate_catalogue(&catalogue).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("listed more than once in novice")));
        assert!(errors.iter().any(|e| e == "novice: difficulty listed more than once"));
    }

    #[test]
    fn test_empty_subcategory() {
        let catalogue = Catalogue {
            difficulties: vec![block(Difficulty::Advanced, vec![])],
        };
        let errors = validate_catalogue(&catalogue).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "advanced: no scenarios".to_string(),
                "advanced.clicking.static: no scenarios".to_string()
            ]
        );
    }
}
