//! Wall-clock time-of-day parsing for schedule entries.

use regex::Regex;
use std::sync::OnceLock;

static TIME_RE: OnceLock<Regex> = OnceLock::new();

/// Converts a 12-hour time string ("9:00 AM", "12:30 pm") into minutes since
/// midnight.
///
/// Returns `None` for anything that does not match the `H:MM AM/PM` grammar:
/// empty strings, missing colon, missing period marker, hour outside 1-12,
/// minute outside 0-59. Callers must check before comparing.
pub fn time_to_minutes(raw: &str) -> Option<u32> {
    let re = TIME_RE
        .get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})\s*([ap]m)$").unwrap());

    let cleaned = raw.trim().to_ascii_lowercase();
    let caps = re.captures(&cleaned)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    // 12-hour -> 24-hour correction: noon stays 12, midnight becomes 0.
    let hour = match (&caps[3], hour) {
        (p, h) if p == "pm" && h != 12 => h + 12,
        (p, 12) if p == "am" => 0,
        (_, h) => h,
    };

    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(time_to_minutes("12:00 AM"), Some(0));
        assert_eq!(time_to_minutes("12:00 PM"), Some(720));
        assert_eq!(time_to_minutes("11:59 PM"), Some(1439));
    }

    #[test]
    fn test_morning_and_afternoon() {
        assert_eq!(time_to_minutes("9:00 AM"), Some(540));
        assert_eq!(time_to_minutes("09:00 AM"), Some(540));
        assert_eq!(time_to_minutes("1:30 PM"), Some(810));
        assert_eq!(time_to_minutes("12:01 AM"), Some(1));
    }

    #[test]
    fn test_whitespace_and_case_tolerance() {
        assert_eq!(time_to_minutes("  9:00 am  "), Some(540));
        assert_eq!(time_to_minutes("9:00am"), Some(540));
        assert_eq!(time_to_minutes("9:00   PM"), Some(1260));
    }

    #[test]
    fn test_malformed_yields_none() {
        assert_eq!(time_to_minutes(""), None);
        assert_eq!(time_to_minutes("9:00"), None);
        assert_eq!(time_to_minutes("900 AM"), None);
        assert_eq!(time_to_minutes("25:00 PM"), None);
        assert_eq!(time_to_minutes("0:30 AM"), None);
        assert_eq!(time_to_minutes("9:75 AM"), None);
        assert_eq!(time_to_minutes("noonish"), None);
    }

    #[test]
    fn test_monotonic_over_a_day() {
        let samples = [
            "12:00 AM", "12:59 AM", "1:00 AM", "6:30 AM", "11:59 AM",
            "12:00 PM", "12:01 PM", "1:00 PM", "5:45 PM", "11:59 PM",
        ];
        let encoded: Vec<u32> = samples
            .iter()
            .map(|s| time_to_minutes(s).unwrap())
            .collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1], "{:?} not strictly increasing", pair);
        }
    }
}
