use super::types::ScoreRecord;

const FILE_SUFFIX: &str = " Stats.csv";

/// Parse one stats export.
///
/// `file_name` has the form `"<scenario> - <mode> - <timestamp> Stats.csv"`;
/// the scenario and timestamp come from it. The content holds `Key:,value`
/// lines; anything else is ignored and unparseable numbers read as 0.
///
/// Returns None when the file name does not follow the layout.
pub fn parse_stats_file(file_name: &str, content: &str) -> Option<ScoreRecord> {
    let parts: Vec<&str> = file_name.split(" - ").collect();
    let scenario = parts.first()?.trim();
    if scenario.is_empty() {
        return None;
    }
    let timestamp = parts.get(2)?.replace(FILE_SUFFIX, "");

    let mut record = ScoreRecord::new(scenario, 0.0);
    record.timestamp = timestamp;

    let mut sens_scale = String::new();
    let mut horiz_sens = 0.0;
    let mut vert_sens = 0.0;

    for line in content.lines() {
        let Some((key, value)) = split_key_value(line) else {
            continue;
        };

        match key {
            "Score" => record.high_score = number(value),
            "Kills" => record.kills = value.parse().unwrap_or(0),
            "Hit Count" => record.hits = value.parse().unwrap_or(0),
            "Miss Count" => record.misses = value.parse().unwrap_or(0),
            "FOVScale" => record.fov_scale = value.to_string(),
            "FOV" => record.fov = number(value),
            "Resolution" => record.resolution = value.to_string(),
            "Avg FPS" => record.avg_fps = number(value),
            "Sens Scale" => sens_scale = value.to_string(),
            "Horiz Sens" => horiz_sens = number(value),
            "Vert Sens" => vert_sens = number(value),
            _ => {}
        }
    }

    if sens_scale == "cm/360" {
        record.sensitivity = Some((horiz_sens, vert_sens));
    }

    Some(record)
}

/// Split `Key:,value` lines. Lines with more than one `:` (times, ratios)
/// are not key/value pairs.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(':');
    let key = parts.next()?.trim();
    let value = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    Some((key, value.trim_start_matches(',')))
}

fn number(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Kill #,Timestamp,Bot,Weapon,TTK,Shots,Hits
1,18:41:09.123,target,pistol,0.412s,2,1
Kills:,92
Deaths:,0
Fight Time:,60.0
Hit Count:,92
Miss Count:,31
Score:,921.5
Sens Scale:,cm/360
Horiz Sens:,34.5
Vert Sens:,34.5
FOV:,103.0
FOVScale:,Overwatch
Resolution:,1920x1080
Avg FPS:,240.7
Challenge Start:,18:41:07.000
";

    const FILE_NAME: &str = "1wall6targets TE - Challenge - 2024.01.15-18.42.07 Stats.csv";

    #[test]
    fn test_parse_full_file() {
        let record = parse_stats_file(FILE_NAME, SAMPLE).unwrap();

        assert_eq!(record.scenario, "1wall6targets TE");
        assert_eq!(record.timestamp, "2024.01.15-18.42.07");
        assert_eq!(record.high_score, 921.5);
        assert_eq!(record.kills, 92);
        assert_eq!(record.hits, 92);
        assert_eq!(record.misses, 31);
        assert_eq!(record.fov, 103.0);
        assert_eq!(record.fov_scale, "Overwatch");
        assert_eq!(record.resolution, "1920x1080");
        assert_eq!(record.avg_fps, 240.7);
        assert_eq!(record.sensitivity, Some((34.5, 34.5)));
        assert!(record.played_at().is_some());
    }

    #[test]
    fn test_sensitivity_only_for_cm_per_360() {
        let content = SAMPLE.replace("Sens Scale:,cm/360", "Sens Scale:,Overwatch");
        let record = parse_stats_file(FILE_NAME, &content).unwrap();
        assert_eq!(record.sensitivity, None);
    }

    #[test]
    fn test_bad_numbers_default_to_zero() {
        let content = "Score:,abc\nKills:,-\nAvg FPS:,NaN\n";
        let record = parse_stats_file(FILE_NAME, content).unwrap();
        assert_eq!(record.high_score, 0.0);
        assert_eq!(record.kills, 0);
        assert_eq!(record.avg_fps, 0.0);
    }

    #[test]
    fn test_bad_file_name() {
        assert!(parse_stats_file("notes.csv", SAMPLE).is_none());
        assert!(parse_stats_file("pasu - Challenge.csv", SAMPLE).is_none());
        assert!(parse_stats_file(" - Challenge - 2024.01.15-18.42.07 Stats.csv", SAMPLE).is_none());
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(split_key_value("Score:,12.5"), Some(("Score", "12.5")));
        assert_eq!(split_key_value("Challenge Start:,18:41:07.000"), None);
        assert_eq!(split_key_value("no separator"), None);
    }
}
