use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::OnceLock,
};

use regex::Regex;

use super::Error;

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Turns "mercredi 12 mars 2025" (or "12 mars 2025") into `2025-3-12`.
///
/// The month is not zero padded, the day always is. Returns an empty string
/// when no month name can be found, callers treat that as an unknown date.
pub fn normalize_menu_date(text: &str) -> String {
    for (index, month) in MONTHS.iter().enumerate() {
        let Some(position) = text.find(month) else {
            continue;
        };
        let day = text[..position]
            .split_whitespace()
            .last()
            .unwrap_or_default();
        let year = text[position + month.len()..].trim();
        return format!("{year}-{}-{day:0>2}", index + 1);
    }
    String::new()
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenHours {
    pub start: String,
    pub end: String,
}

impl OpenHours {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl Display for OpenHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

// reads back the persisted `HH:MM - HH:MM` form
impl FromStr for OpenHours {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(" - ")
            .ok_or_else(|| Error::malformed(&format!("open hours {s:?} are not a range")))?;
        Ok(Self::new(start.trim(), end.trim()))
    }
}

fn time_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([01]?[0-9]|2[0-3])(?:h([0-5][0-9])?)?$").expect("regex should be valid")
    })
}

/// Finds the two times of day in a sentence like
/// "Du lundi au vendredi de 11h30 à 14h." and returns them as `HH:MM`.
pub fn parse_open_hours(text: &str) -> Result<OpenHours, Error> {
    let times: Vec<String> = text
        .split_whitespace()
        .map(|token| {
            token
                .trim_end_matches(['.', ',', ';', ':'])
                .to_lowercase()
        })
        .filter_map(|token| {
            let captures = time_token().captures(&token)?;
            let hour = captures.get(1).map_or("0", |m| m.as_str());
            let minutes = captures.get(2).map_or("00", |m| m.as_str());
            Some(format!("{hour:0>2}:{minutes:0>2}"))
        })
        .collect();

    match times.as_slice() {
        [start, end] => Ok(OpenHours::new(start, end)),
        _ => Err(Error::UnderspecifiedTime {
            found: times.len(),
            input: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_menu_date() {
        assert_eq!(normalize_menu_date("3 mars 2025"), "2025-3-03");
        assert_eq!(normalize_menu_date("12 mars 2025"), "2025-3-12");
        assert_eq!(normalize_menu_date("mercredi 12 mars 2025"), "2025-3-12");
        assert_eq!(normalize_menu_date("vendredi 1 août 2025"), "2025-8-01");
        assert_eq!(normalize_menu_date("lundi 22 décembre 2025"), "2025-12-22");
    }

    #[test]
    fn test_normalize_menu_date_unknown_month() {
        assert_eq!(normalize_menu_date(""), "");
        assert_eq!(normalize_menu_date("12 march 2025"), "");
    }

    #[test]
    fn test_normalize_menu_date_does_not_accept_its_own_output() {
        let canonical = normalize_menu_date("jeudi 27 novembre 2025");
        assert_eq!(canonical, "2025-11-27");
        assert_eq!(normalize_menu_date(&canonical), "");
    }

    #[test]
    fn test_parse_open_hours() {
        let hours = parse_open_hours("ouvert de 11h30 à 14h00.").unwrap();
        assert_eq!(hours, OpenHours::new("11:30", "14:00"));
    }

    #[test]
    fn test_parse_open_hours_pads_and_defaults_minutes() {
        let hours = parse_open_hours("Du lundi au vendredi de 7h à 9h30").unwrap();
        assert_eq!(hours, OpenHours::new("07:00", "09:30"));
        let hours = parse_open_hours("De 11H15 à 14h.").unwrap();
        assert_eq!(hours, OpenHours::new("11:15", "14:00"));
        let hours = parse_open_hours("de 18 à 20").unwrap();
        assert_eq!(hours, OpenHours::new("18:00", "20:00"));
    }

    #[test]
    fn test_parse_open_hours_needs_exactly_two_times() {
        let err = parse_open_hours("de 8h à 10h puis de 12h à 14h").unwrap_err();
        assert!(matches!(err, Error::UnderspecifiedTime { found: 4, .. }));
        let err = parse_open_hours("de 8h à 10h puis 12h").unwrap_err();
        assert!(matches!(err, Error::UnderspecifiedTime { found: 3, .. }));
        let err = parse_open_hours("Fermé pendant les vacances").unwrap_err();
        assert!(matches!(err, Error::UnderspecifiedTime { found: 0, .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_parse_open_hours_ignores_out_of_range_numbers() {
        let hours = parse_open_hours("Depuis 2024, ouvert de 11h30 à 13h45.").unwrap();
        assert_eq!(hours, OpenHours::new("11:30", "13:45"));
    }

    #[test]
    fn test_open_hours_round_trip_through_persisted_form() {
        let hours = OpenHours::new("11:30", "14:00");
        assert_eq!(hours.to_string(), "11:30 - 14:00");
        assert_eq!(hours.to_string().parse::<OpenHours>().unwrap(), hours);
        assert!("11:30".parse::<OpenHours>().is_err());
    }
}
