pub mod config;
pub mod engine;
pub mod error;
pub mod ladder;
pub mod report;
pub mod validation;

pub use config::*;
pub use engine::{
    classify, difficulty_energy, is_complete, rank_of, scenario_energy, starting_energy,
    subcategory_energy,
};
pub use error::EngineError;
pub use ladder::{Rank, Tier, TierLadder};
pub use report::{
    build_report, CategoryReport, DifficultyReport, RankCompletion, Report, ScenarioReport,
    SubcategoryReport,
};
pub use validation::validate_energy;
