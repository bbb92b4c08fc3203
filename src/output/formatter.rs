use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalogue::Scenario;
use crate::scoring::{DifficultyReport, Rank, Report, ScenarioReport};
use crate::stats::ScoreRecord;

/// Tier colors, lowest tier first; wraps for longer ladders.
const TIER_PALETTE: [AnsiColors; 8] = [
    AnsiColors::BrightBlack,
    AnsiColors::Yellow,
    AnsiColors::White,
    AnsiColors::BrightYellow,
    AnsiColors::Cyan,
    AnsiColors::BrightBlue,
    AnsiColors::Magenta,
    AnsiColors::BrightRed,
];

/// Name column width when output is not a terminal or is very narrow.
const DEFAULT_NAME_WIDTH: usize = 36;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an energy value with one decimal
pub fn format_energy(energy: f64) -> String {
    format!("{:.1}", energy)
}

/// Format a `[0, 1]` fraction as a whole percentage
pub fn format_progress(progress: f64) -> String {
    format!("{:.0}%", progress * 100.0)
}

/// Format a score, trimming a trailing `.0`
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}

/// Format the run date of a record ("2024-01-15 18:42"), falling back to the
/// raw timestamp
pub fn format_date(record: &ScoreRecord) -> String {
    match record.played_at() {
        Some(played) => played.format("%Y-%m-%d %H:%M").to_string(),
        None if record.timestamp.is_empty() => "-".to_string(),
        None => record.timestamp.clone(),
    }
}

/// Color a rank label by its ordinal among `tiers` (lowest first)
fn paint_rank(rank: &Rank, tiers: &[String], use_colors: bool) -> String {
    let label = rank.label();
    if !use_colors {
        return label.to_string();
    }
    match tiers.iter().position(|t| t == label) {
        Some(ordinal) => label
            .color(TIER_PALETTE[ordinal % TIER_PALETTE.len()])
            .bold()
            .to_string(),
        None => label.dimmed().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn tiers_of(report: &DifficultyReport) -> Vec<String> {
    report.completion.iter().map(|c| c.tier.clone()).collect()
}

/// Headline for one difficulty: overall rank, energy and completion per tier
pub fn format_difficulty_summary(report: &DifficultyReport, use_colors: bool) -> String {
    let tiers = tiers_of(report);
    let title = capitalize(report.difficulty.as_str());
    let rank = paint_rank(&report.rank, &tiers, use_colors);
    let energy = if report.energy == 0.0 {
        "incomplete".to_string()
    } else {
        format_energy(report.energy)
    };

    let completion = report
        .completion
        .iter()
        .map(|c| {
            let mark = if c.complete { "+" } else { "-" };
            if use_colors && c.complete {
                format!("{}{}", mark.green(), c.tier)
            } else if use_colors {
                format!("{}{}", mark.red(), c.tier.dimmed())
            } else {
                format!("{}{}", mark, c.tier)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    if use_colors {
        format!(
            "{}  {}  energy {}\n  complete: {}",
            title.bold(),
            rank,
            energy,
            completion
        )
    } else {
        format!(
            "{}  {}  energy {}\n  complete: {}",
            title, rank, energy, completion
        )
    }
}

/// Scenario table for one difficulty, grouped by category and subcategory.
/// Columns: name, score, rank, progress, energy
pub fn format_difficulty_table(report: &DifficultyReport, use_colors: bool) -> String {
    let tiers = tiers_of(report);

    // score 9, rank 12, progress 5, energy 7, separators 4 x 2
    let fixed_width = 9 + 12 + 5 + 7 + 8 + 4;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => width - fixed_width,
        _ => DEFAULT_NAME_WIDTH,
    };

    let mut lines = Vec::new();
    for category in &report.categories {
        let header = format!(
            "{} ({})",
            category.name,
            format_energy(category.energy)
        );
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });

        for subcategory in &category.subcategories {
            let header = format!(
                "  {} ({})",
                subcategory.name,
                format_energy(subcategory.energy)
            );
            lines.push(if use_colors {
                header.underline().to_string()
            } else {
                header
            });

            for scenario in &subcategory.scenarios {
                lines.push(format_scenario_row(scenario, &tiers, name_width, use_colors));
            }
        }
    }

    lines.join("\n")
}

fn format_scenario_row(
    scenario: &ScenarioReport,
    tiers: &[String],
    name_width: usize,
    use_colors: bool,
) -> String {
    let name = truncate_name(&scenario.name, name_width);
    let score = scenario.score.map(format_score).unwrap_or_else(|| "-".to_string());
    let energy = scenario
        .energy
        .map(format_energy)
        .unwrap_or_else(|| "-".to_string());
    let progress = if scenario.score.is_some() {
        format_progress(scenario.progress)
    } else {
        "-".to_string()
    };

    // Pad before coloring so escape codes don't count toward the width
    let rank = format!("{:<12}", scenario.rank.label());
    let rank = if use_colors {
        rank.replacen(
            scenario.rank.label(),
            &paint_rank(&scenario.rank, tiers, true),
            1,
        )
    } else {
        rank
    };

    format!(
        "    {:<name_width$}  {:>9}  {}  {:>5}  {:>7}",
        name,
        score,
        rank,
        progress,
        energy,
        name_width = name_width
    )
}

/// Every scenario as tab-separated values for scripting
/// Columns: difficulty, category, subcategory, scenario, score, rank, progress, energy
/// (no headers, no colors; unscored cells are empty)
pub fn format_tsv(report: &Report) -> String {
    let mut rows = Vec::new();
    for difficulty in &report.difficulties {
        for category in &difficulty.categories {
            for subcategory in &category.subcategories {
                for scenario in &subcategory.scenarios {
                    rows.push(format!(
                        "{}\t{}\t{}\t{}\t{}\t{}\t{:.3}\t{}",
                        difficulty.difficulty,
                        category.name,
                        subcategory.name,
                        scenario.name,
                        scenario.score.map(format_score).unwrap_or_default(),
                        scenario.rank,
                        scenario.progress,
                        scenario.energy.map(format_energy).unwrap_or_default(),
                    ));
                }
            }
        }
    }
    rows.join("\n")
}

/// Detailed multi-line view of a single scenario
pub fn format_scenario_detail(
    scenario: &Scenario,
    report: &ScenarioReport,
    tiers: &[String],
    record: Option<&ScoreRecord>,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    lines.push(if use_colors {
        scenario.name.bold().to_string()
    } else {
        scenario.name.clone()
    });

    let mut thresholds: Vec<(&String, &f64)> = scenario.thresholds.iter().collect();
    thresholds.sort_by(|a, b| a.1.total_cmp(b.1));
    let ladder = thresholds
        .iter()
        .map(|(tier, threshold)| {
            let rank = Rank::Tier((*tier).clone());
            format!("{} {}", paint_rank(&rank, tiers, use_colors), format_score(**threshold))
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("  Thresholds: {}", ladder));

    match record {
        Some(record) => {
            lines.push(format!("  Score: {}", format_score(record.high_score)));
            lines.push(format!(
                "  Rank: {} ({} to next)",
                paint_rank(&report.rank, tiers, use_colors),
                format_progress(report.progress)
            ));
            if let Some(energy) = report.energy {
                lines.push(format!("  Energy: {}", format_energy(energy)));
            }
            lines.push(format!("  Played: {}", format_date(record)));
            if let Some(accuracy) = record.accuracy() {
                lines.push(format!(
                    "  Hits: {}/{} ({:.1}%)",
                    record.hits,
                    record.hits + record.misses,
                    accuracy * 100.0
                ));
            }
            if let Some((horiz, vert)) = record.sensitivity {
                lines.push(format!("  Sens: {}/{} cm/360", horiz, vert));
            }
            if !record.resolution.is_empty() {
                lines.push(format!(
                    "  Setup: {} @ {:.0} fps, FOV {} ({})",
                    record.resolution, record.avg_fps, record.fov, record.fov_scale
                ));
            }
        }
        None => lines.push("  No recorded runs".to_string()),
    }

    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
