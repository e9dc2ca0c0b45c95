//! Natural language date normalization
//!
//! Turns the loose date phrases a language model extracts from travel
//! requests ("tomorrow", "in 5 days", "next Friday", "5th May") into ISO
//! calendar dates. Relative phrases are resolved against an injected `today`,
//! never the system clock, so the result is a pure function of its inputs.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. `tomorrow` / `tmrw`
//! 2. `in <N> days` (a bad number is final, later rules are not tried)
//! 3. `next <weekday>` (always a following week, never today)
//! 4. absolute dates: ISO `YYYY-MM-DD` first, then day-month-name,
//!    month-name-day, abbreviated variants, then numeric slash and dash forms
//!    in day-first order. Phrases without a year get today's year, even when
//!    that puts the date in the past.
//!
//! Anything else is unparseable (`None`), which callers turn into a
//! clarifying question rather than an error.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use domain::IsoDate;
use serde_json::Value;
use tracing::debug;

/// Ordinal suffixes stripped after a digit ("5th" -> "5")
const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Weekday names in the order they are searched for
const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Absolute date formats without a year, paired with the separator placed
/// before the year. Order decides ambiguous input such as "03/04".
const ABSOLUTE_FORMATS: [(&str, &str); 8] = [
    ("%d %B", " "),
    ("%B %d", " "),
    ("%d %b", " "),
    ("%b %d", " "),
    ("%d/%m", "/"),
    ("%m/%d", "/"),
    ("%d-%m", "-"),
    ("%m-%d", "-"),
];

/// Date normalizer bound to a reference date
///
/// # Examples
///
/// ```
/// use application::DateNormalizer;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(); // a Monday
/// let normalizer = DateNormalizer::new(today);
///
/// assert_eq!(normalizer.normalize(Some("next Friday")).unwrap().to_string(), "2025-03-14");
/// assert!(normalizer.normalize(Some("gibberish")).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    today: NaiveDate,
}

impl DateNormalizer {
    /// Create a normalizer resolving relative phrases against `today`
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The reference date
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Normalize an optional phrase
    #[must_use]
    pub fn normalize(&self, phrase: Option<&str>) -> Option<IsoDate> {
        normalize_date(phrase, self.today)
    }

    /// Normalize a raw JSON value; anything but a string is unparseable
    #[must_use]
    pub fn normalize_value(&self, value: &Value) -> Option<IsoDate> {
        normalize_json_date(value, self.today)
    }
}

/// Normalize a date phrase relative to `today`
///
/// Returns `None` when the phrase is absent, blank, or cannot be interpreted.
pub fn normalize_date(phrase: Option<&str>, today: NaiveDate) -> Option<IsoDate> {
    let Some(input) = phrase.and_then(preprocess) else {
        debug!("Empty date phrase");
        return None;
    };

    if matches!(input.as_str(), "tomorrow" | "tmrw") {
        let date = add_days(today, 1);
        debug!(input = %input, date = ?date, "Parsed tomorrow");
        return date;
    }

    if let Some(days) = relative_days(&input) {
        let date = days.ok().and_then(|days| add_days(today, days));
        debug!(input = %input, date = ?date, "Parsed relative day offset");
        return date;
    }

    if let Some(date) = parse_next_weekday(&input, today) {
        debug!(input = %input, date = %date, "Parsed next weekday");
        return Some(date);
    }

    if let Some(date) = parse_absolute(&input, today.year()) {
        debug!(input = %input, date = %date, "Parsed absolute date");
        return Some(date);
    }

    debug!(input = %input, "Failed to parse date");
    None
}

/// Normalize a JSON value as produced by the extraction model
pub fn normalize_json_date(value: &Value, today: NaiveDate) -> Option<IsoDate> {
    match value {
        Value::String(s) => normalize_date(Some(s.as_str()), today),
        Value::Null => None,
        other => {
            debug!(value = %other, "Non-text date value");
            None
        },
    }
}

/// Lower-case, trim, drop one trailing comma and ordinal suffixes
fn preprocess(phrase: &str) -> Option<String> {
    let lowered = phrase.trim().to_lowercase();
    let without_comma = lowered.strip_suffix(',').unwrap_or(&lowered).trim_end();
    let cleaned = strip_ordinals(without_comma);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Remove "st", "nd", "rd", "th" wherever they directly follow a digit
fn strip_ordinals(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        out.push(c);
        if c.is_ascii_digit() {
            if let Some(rest) = ORDINAL_SUFFIXES
                .iter()
                .find_map(|suffix| chars.as_str().strip_prefix(suffix))
            {
                chars = rest.chars();
            }
        }
    }

    out
}

/// Match "in <N> days"
///
/// `None` if the pattern is absent, `Some(Err(_))` if it is present but the
/// number does not parse.
fn relative_days(input: &str) -> Option<Result<u64, std::num::ParseIntError>> {
    if !(input.contains("in ") && input.contains(" days")) {
        return None;
    }

    let after_in = input.split_once("in ").map_or("", |(_, rest)| rest);
    let number = after_in
        .split_once(" days")
        .map_or(after_in, |(number, _)| number);

    Some(number.trim().parse())
}

/// Match "next <weekday>"
fn parse_next_weekday(input: &str, today: NaiveDate) -> Option<IsoDate> {
    // Substring match, so "nextmonday" counts too.
    if !input.contains("next") {
        return None;
    }

    let (_, weekday) = WEEKDAYS.iter().find(|(name, _)| input.contains(*name))?;
    next_weekday(today, *weekday)
}

/// Find the next occurrence of a weekday, a full week ahead if it is today
fn next_weekday(from: NaiveDate, target: Weekday) -> Option<IsoDate> {
    let target_num = target.num_days_from_monday();
    let current_num = from.weekday().num_days_from_monday();

    let days_until = match (target_num + 7 - current_num) % 7 {
        0 => 7,
        n => n,
    };

    add_days(from, u64::from(days_until))
}

/// Try ISO first, then each absolute format with an explicit or inferred year
fn parse_absolute(input: &str, year: i32) -> Option<IsoDate> {
    if IsoDate::has_iso_shape(input) {
        return input.parse().ok();
    }

    ABSOLUTE_FORMATS.iter().find_map(|(format, separator)| {
        let with_year = format!("{format}{separator}%Y");
        let explicit = if has_four_digit_year(input, separator) {
            NaiveDate::parse_from_str(input, &with_year).ok()
        } else {
            None
        };
        explicit
            .or_else(|| {
                NaiveDate::parse_from_str(&format!("{input}{separator}{year}"), &with_year).ok()
            })
            .map(IsoDate::from)
    })
}

/// `%Y` also reads one to three digits, so only a full year counts as explicit
fn has_four_digit_year(input: &str, separator: &str) -> bool {
    input.rsplit_once(separator).is_some_and(|(_, year)| {
        year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
    })
}

fn add_days(date: NaiveDate, days: u64) -> Option<IsoDate> {
    date.checked_add_days(Days::new(days)).map(IsoDate::from)
}
