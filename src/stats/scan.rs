use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::parse::parse_stats_file;
use super::types::ScoreSnapshot;

/// Stats directory relative to a Steam library root.
pub const STATS_SUBDIR: &str = "steamapps/common/FPSAimTrainer/FPSAimTrainer/stats";

/// Steam install roots checked under the home directory.
const STEAM_ROOTS: [&str; 2] = [".local/share/Steam", ".steam/steam"];

/// Read every stats export in `dir` that belongs to one of `scenarios` and
/// keep the best run per scenario.
///
/// A file belongs to a scenario when its name starts with `"<scenario> - "`,
/// so `pasu` does not pick up `pasuVoxReload` runs.
///
/// Files that cannot be read or parsed are skipped with a warning. On equal
/// scores the first file read is kept.
pub fn scan_stats_dir(dir: &Path, scenarios: &[&str]) -> Result<ScoreSnapshot> {
    if !dir.is_dir() {
        anyhow::bail!("Stats directory not found at {}", dir.display());
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.csv");
    let entries = glob::glob(&pattern.to_string_lossy())
        .with_context(|| format!("Failed to list stats files in {}", dir.display()))?;

    let mut snapshot = ScoreSnapshot::new();
    let mut files_read = 0usize;

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Skipping unreadable stats entry: {}", e);
                continue;
            }
        };
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !scenarios
            .iter()
            .any(|s| file_name.starts_with(&format!("{} - ", s)))
        {
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let Some(record) = parse_stats_file(file_name, &content) else {
            log::warn!("Skipping {}: unrecognised file name", path.display());
            continue;
        };
        files_read += 1;

        match snapshot.get(&record.scenario) {
            Some(best) if best.high_score >= record.high_score => {}
            _ => {
                snapshot.insert(record.scenario.clone(), record);
            }
        }
    }

    log::debug!(
        "Read {} stats files from {} ({} scenarios)",
        files_read,
        dir.display(),
        snapshot.len()
    );

    Ok(snapshot)
}

/// Library roots listed in Steam's `libraryfolders.vdf`.
///
/// Only `"path"  "<dir>"` lines are read; the directory is the fourth
/// `"`-separated field.
pub fn parse_library_folders(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('"');
            let key = fields.nth(1)?;
            let value = fields.nth(1)?;
            (key == "path" && !value.is_empty()).then(|| PathBuf::from(value))
        })
        .collect()
}

/// Candidate stats directories, in lookup order: each Steam root under
/// `home` followed by the libraries it lists.
pub fn candidate_stats_dirs(home: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for root in STEAM_ROOTS {
        let root = home.join(root);
        candidates.push(root.join(STATS_SUBDIR));

        let library_file = root.join("steamapps").join("libraryfolders.vdf");
        if let Ok(content) = fs::read_to_string(&library_file) {
            for library in parse_library_folders(&content) {
                let dir = library.join(STATS_SUBDIR);
                if !candidates.contains(&dir) {
                    candidates.push(dir);
                }
            }
        }
    }

    candidates
}

/// First candidate stats directory that exists.
pub fn find_stats_dir(home: &Path) -> Option<PathBuf> {
    candidate_stats_dirs(home).into_iter().find(|dir| dir.is_dir())
}
