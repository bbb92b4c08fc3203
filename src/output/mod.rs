pub mod formatter;

pub use formatter::{
    format_date, format_difficulty_summary, format_difficulty_table, format_energy,
    format_progress, format_scenario_detail, format_score, format_tsv, should_use_colors,
};
