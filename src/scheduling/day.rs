//! Closed day-of-week enumeration.
//!
//! Days are validated at the write boundary so the `day_of_week` column only
//! ever holds one of the seven canonical names. Ordering is calendar order
//! (Sunday first), matching how the week calendar is displayed.

use chrono::Datelike;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// The canonical capitalized name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Calendar position, Sunday = 0 through Saturday = 6.
    pub fn calendar_index(&self) -> u8 {
        *self as u8
    }

    /// Parses a day name, tolerating surrounding whitespace and any casing.
    /// Returns `None` for anything that is not one of the seven names.
    pub fn parse(raw: &str) -> Option<Weekday> {
        let cleaned = raw.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(cleaned))
    }

    /// Today's weekday according to the local wall clock.
    pub fn today() -> Weekday {
        chrono::Local::now().weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tolerates_case_and_whitespace() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("  tuesday "), Some(Weekday::Tuesday));
        assert_eq!(Weekday::parse("SATURDAY"), Some(Weekday::Saturday));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(Weekday::parse(""), None);
        assert_eq!(Weekday::parse("Mondays"), None);
        assert_eq!(Weekday::parse("Tue"), None);
    }

    #[test]
    fn test_calendar_order_not_lexical() {
        // Lexically "Friday" < "Monday"; calendar order must disagree.
        assert!(Weekday::Monday < Weekday::Friday);
        assert_eq!(Weekday::Sunday.calendar_index(), 0);
        assert_eq!(Weekday::Saturday.calendar_index(), 6);
    }

    #[test]
    fn test_chrono_round_trip() {
        assert_eq!(Weekday::from(chrono::Weekday::Wed), Weekday::Wednesday);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
    }
}
