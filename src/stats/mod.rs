mod parse;
pub mod scan;
mod types;

pub use parse::parse_stats_file;
pub use scan::{find_stats_dir, scan_stats_dir};
pub use types::{ScoreRecord, ScoreSnapshot, TIMESTAMP_FORMAT};
