use chrono::{DateTime, FixedOffset, Local};

const UNITS: [(u64, char); 3] = [(3600, 'h'), (60, 'm'), (1, 's')];

/// Formats seconds the way Jira shows logged work, e.g. `1h30m`
pub fn seconds_to_string(seconds: u64) -> String {
    let mut rest = seconds;
    let formatted: String = UNITS
        .iter()
        .filter_map(|&(size, unit)| {
            let amount = rest / size;
            rest %= size;
            (amount > 0).then(|| format!("{amount}{unit}"))
        })
        .collect();

    if formatted.is_empty() {
        "0s".to_owned()
    } else {
        formatted
    }
}

/// Jira timestamp in the local timezone, without seconds
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod test {
    use super::seconds_to_string;

    #[test]
    fn test_seconds_to_string() {
        assert_eq!(seconds_to_string(0), "0s");
        assert_eq!(seconds_to_string(60), "1m");
        assert_eq!(seconds_to_string(21607), "6h7s");
        assert_eq!(seconds_to_string(5400), "1h30m");
        assert_eq!(seconds_to_string(90061), "25h1m1s");
    }
}
