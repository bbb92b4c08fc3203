use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use bench_rank::catalogue::{self, Difficulty};
use bench_rank::config;
use bench_rank::output;
use bench_rank::scoring::{self, Report};
use bench_rank::stats;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show ranks and energy per difficulty (default if no subcommand)
    Show {
        /// Only show this difficulty (novice, intermediate, advanced)
        difficulty: Option<Difficulty>,
    },
    /// Show thresholds, best run and energy of one scenario
    Scenario {
        /// Scenario name as it appears in the catalogue
        name: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bench-rank")]
#[command(about = "Benchmark rank and energy calculator for aim-trainer stats", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/bench-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Threshold catalogue file (JSON or YAML); overrides the config file
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Stats export directory; overrides the config file and Steam discovery
    #[arg(long, global = true)]
    stats_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show { difficulty: None });
    let start_time = Instant::now();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate energy config at startup
    let energy_config = config.energy.clone().unwrap_or_default();
    if let Err(errors) = scoring::validate_energy(&energy_config) {
        eprintln!("Energy config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let scale = energy_config.scale();

    let Some(catalogue_path) = cli.catalogue.or(config.catalogue.clone()) else {
        eprintln!("No threshold catalogue configured.");
        eprintln!("Pass --catalogue <file> or add it to ~/.config/bench-rank/config.yaml:");
        eprintln!("  catalogue: ~/benchmarks/catalogue.yaml");
        std::process::exit(EXIT_CONFIG);
    };
    let catalogue_path = config::expand_home(&catalogue_path);

    let catalogue = match catalogue::load_catalogue(&catalogue_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Catalogue error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };
    if let Err(errors) = catalogue::validate_catalogue(&catalogue) {
        eprintln!("Catalogue errors in {}:", catalogue_path.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_DATA);
    }

    if cli.verbose {
        eprintln!(
            "Loaded catalogue {} ({} scenarios)",
            catalogue_path.display(),
            catalogue.scenario_names().len()
        );
    }

    let stats_dir = cli
        .stats_dir
        .or(config.stats_dir.clone())
        .map(|p| config::expand_home(&p))
        .or_else(|| dirs::home_dir().and_then(|home| stats::find_stats_dir(&home)));
    let Some(stats_dir) = stats_dir else {
        eprintln!("No stats directory found.");
        eprintln!("Pass --stats-dir <dir> or set stats_dir in ~/.config/bench-rank/config.yaml");
        std::process::exit(EXIT_DATA);
    };

    let scan_start = Instant::now();
    let scores = match stats::scan_stats_dir(&stats_dir, &catalogue.scenario_names()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Stats error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if cli.verbose {
        eprintln!(
            "Found runs for {} scenarios in {} ({:?})",
            scores.len(),
            stats_dir.display(),
            scan_start.elapsed()
        );
    }

    let report = match scoring::build_report(&catalogue, &scores, &scale) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Catalogue error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let use_colors = output::should_use_colors();

    match command {
        Commands::Show { difficulty } => {
            let report = match difficulty {
                Some(d) => match report.difficulty(d) {
                    Some(r) => Report {
                        difficulties: vec![r.clone()],
                    },
                    None => {
                        eprintln!("The catalogue has no {} difficulty.", d);
                        std::process::exit(EXIT_DATA);
                    }
                },
                None => report,
            };

            match cli.format {
                OutputFormat::Json => print_json(&report),
                OutputFormat::Tsv => println!("{}", output::format_tsv(&report)),
                OutputFormat::Table => {
                    let sections: Vec<String> = report
                        .difficulties
                        .iter()
                        .map(|d| {
                            format!(
                                "{}\n\n{}",
                                output::format_difficulty_summary(d, use_colors),
                                output::format_difficulty_table(d, use_colors)
                            )
                        })
                        .collect();
                    println!("{}", sections.join("\n\n"));
                }
            }
        }
        Commands::Scenario { name } => {
            let (Some((_, scenario)), Some((difficulty_report, scenario_report))) =
                (catalogue.find_scenario(&name), report.find_scenario(&name))
            else {
                eprintln!("Scenario '{}' is not in the catalogue.", name);
                std::process::exit(EXIT_DATA);
            };

            match cli.format {
                OutputFormat::Json => print_json(scenario_report),
                OutputFormat::Tsv => println!(
                    "{}\t{}\t{}\t{:.3}\t{}",
                    scenario_report.name,
                    scenario_report.score.map(output::format_score).unwrap_or_default(),
                    scenario_report.rank,
                    scenario_report.progress,
                    scenario_report
                        .energy
                        .map(output::format_energy)
                        .unwrap_or_default()
                ),
                OutputFormat::Table => {
                    let tiers: Vec<String> = difficulty_report
                        .completion
                        .iter()
                        .map(|c| c.tier.clone())
                        .collect();
                    println!(
                        "{}",
                        output::format_scenario_detail(
                            scenario,
                            scenario_report,
                            &tiers,
                            scores.get(&name),
                            use_colors
                        )
                    );
                }
            }
        }
    }

    if cli.verbose {
        eprintln!();
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}
