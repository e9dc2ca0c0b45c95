//! Travel request entity
//!
//! The structured record a language model extracts from a free-text request
//! such as "Find me a direct flight from London to Delhi on May 5 for 2
//! adults". Models are sloppy about types, so deserialisation is lenient:
//! counts may arrive as numbers, whole floats or numeric strings, `children`
//! may be a list of ages or a plain count, and date fields keep whatever JSON
//! value was produced so the date normalizer can decide what is usable. A
//! count that cannot be read is treated as unknown, never as a broken record.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured flight request extracted from user text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Departure city or airport as written by the user
    #[serde(default)]
    pub origin: Option<String>,

    /// Arrival city or airport as written by the user
    #[serde(default)]
    pub destination: Option<String>,

    /// Raw departure date phrase (any JSON value)
    #[serde(default)]
    pub departure_date: Value,

    /// Raw return date phrase; null means one-way
    #[serde(default)]
    pub return_date: Value,

    /// Number of adults, `None` if the model could not tell
    #[serde(default, deserialize_with = "lenient_count")]
    pub adults: Option<u32>,

    /// Children's ages; an absent key means no children, `null` means unknown
    #[serde(default = "no_children", deserialize_with = "lenient_child_ages")]
    pub children: Option<Vec<u32>>,

    /// Number of lap infants
    #[serde(default, deserialize_with = "lenient_infants")]
    pub infants: u32,

    /// Whether only non-stop flights are wanted
    #[serde(default, deserialize_with = "lenient_bool")]
    pub direct_flight: bool,
}

impl TravelRequest {
    /// Parse a request from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Origin with surrounding whitespace removed, `None` if blank
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        non_blank(self.origin.as_deref())
    }

    /// Destination with surrounding whitespace removed, `None` if blank
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        non_blank(self.destination.as_deref())
    }

    /// True when the request carries no return date at all
    #[must_use]
    pub fn is_one_way(&self) -> bool {
        match &self.return_date {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[allow(clippy::unnecessary_wraps)]
const fn no_children() -> Option<Vec<u32>> {
    Some(Vec::new())
}

/// Read a whole, non-negative count from a number or numeric string
fn value_to_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        },
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(n: f64) -> Option<u32> {
    (n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)).then(|| n as u32)
}

/// Unreadable counts become `None`, which is asked about like a missing one
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_count(&value))
}

fn lenient_infants<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_count(deserializer)?.unwrap_or(0))
}

fn lenient_child_ages<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        // One unreadable age makes the whole list unknown.
        Value::Array(items) => items.iter().map(value_to_count).collect(),
        // A bare count carries no ages; only zero is usable as-is.
        other => match value_to_count(&other) {
            Some(0) => Some(Vec::new()),
            _ => None,
        },
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_request() {
        let json = r#"{
            "origin": "London",
            "destination": "Delhi",
            "departure_date": "May 5",
            "return_date": null,
            "adults": 2,
            "children": [5, 8],
            "infants": 1,
            "direct_flight": true
        }"#;
        let req = TravelRequest::from_json(json).unwrap();
        assert_eq!(req.origin(), Some("London"));
        assert_eq!(req.destination(), Some("Delhi"));
        assert_eq!(req.departure_date, Value::String("May 5".to_string()));
        assert!(req.is_one_way());
        assert_eq!(req.adults, Some(2));
        assert_eq!(req.children, Some(vec![5, 8]));
        assert_eq!(req.infants, 1);
        assert!(req.direct_flight);
    }

    #[test]
    fn absent_keys_use_defaults() {
        let req = TravelRequest::from_json("{}").unwrap();
        assert_eq!(req.origin(), None);
        assert_eq!(req.departure_date, Value::Null);
        assert_eq!(req.adults, None);
        assert_eq!(req.children, Some(Vec::new()));
        assert_eq!(req.infants, 0);
        assert!(!req.direct_flight);
    }

    #[test]
    fn null_children_means_unknown() {
        let req = TravelRequest::from_json(r#"{"children": null}"#).unwrap();
        assert_eq!(req.children, None);
    }

    #[test]
    fn children_count_without_ages() {
        let req = TravelRequest::from_json(r#"{"children": 0}"#).unwrap();
        assert_eq!(req.children, Some(Vec::new()));

        let req = TravelRequest::from_json(r#"{"children": 2}"#).unwrap();
        assert_eq!(req.children, None);
    }

    #[test]
    fn counts_may_be_strings() {
        let req = TravelRequest::from_json(r#"{"adults": "3", "infants": "1"}"#).unwrap();
        assert_eq!(req.adults, Some(3));
        assert_eq!(req.infants, 1);
    }

    #[test]
    fn direct_flight_accepts_strings() {
        let req = TravelRequest::from_json(r#"{"direct_flight": "yes"}"#).unwrap();
        assert!(req.direct_flight);
        let req = TravelRequest::from_json(r#"{"direct_flight": null}"#).unwrap();
        assert!(!req.direct_flight);
    }

    #[test]
    fn counts_in_words_are_unknown() {
        let req = TravelRequest::from_json(r#"{"origin": "London", "adults": "two"}"#).unwrap();
        assert_eq!(req.origin(), Some("London"));
        assert_eq!(req.adults, None);

        let req = TravelRequest::from_json(r#"{"adults": "many", "infants": "one"}"#).unwrap();
        assert_eq!(req.adults, None);
        assert_eq!(req.infants, 0);
    }

    #[test]
    fn whole_floats_are_counts() {
        let req = TravelRequest::from_json(r#"{"adults": 2.0, "children": [7.0], "infants": "1.0"}"#)
            .unwrap();
        assert_eq!(req.adults, Some(2));
        assert_eq!(req.children, Some(vec![7]));
        assert_eq!(req.infants, 1);
    }

    #[test]
    fn fractional_and_negative_counts_are_unknown() {
        let req = TravelRequest::from_json(r#"{"adults": 1.5}"#).unwrap();
        assert_eq!(req.adults, None);
        let req = TravelRequest::from_json(r#"{"adults": -2}"#).unwrap();
        assert_eq!(req.adults, None);
        let req = TravelRequest::from_json(r#"{"adults": 1e12}"#).unwrap();
        assert_eq!(req.adults, None);
    }

    #[test]
    fn unreadable_child_age_makes_children_unknown() {
        let req = TravelRequest::from_json(r#"{"children": ["7 years"]}"#).unwrap();
        assert_eq!(req.children, None);
        let req = TravelRequest::from_json(r#"{"children": [5, "five"]}"#).unwrap();
        assert_eq!(req.children, None);
        let req = TravelRequest::from_json(r#"{"children": "some"}"#).unwrap();
        assert_eq!(req.children, None);
    }

    #[test]
    fn unrecognised_direct_flag_is_false() {
        let req = TravelRequest::from_json(r#"{"direct_flight": "maybe"}"#).unwrap();
        assert!(!req.direct_flight);
        let req = TravelRequest::from_json(r#"{"direct_flight": 1}"#).unwrap();
        assert!(!req.direct_flight);
    }

    #[test]
    fn invalid_json_is_still_an_error() {
        assert!(TravelRequest::from_json("not json").is_err());
        assert!(TravelRequest::from_json("42").is_err());
    }

    #[test]
    fn blank_city_counts_as_missing() {
        let req = TravelRequest::from_json(r#"{"origin": "   "}"#).unwrap();
        assert_eq!(req.origin(), None);
    }

    #[test]
    fn non_string_dates_are_kept_verbatim() {
        let req = TravelRequest::from_json(r#"{"departure_date": 20250505}"#).unwrap();
        assert!(req.departure_date.is_number());
    }

    #[test]
    fn return_date_presence() {
        let req = TravelRequest::from_json(r#"{"return_date": "May 12"}"#).unwrap();
        assert!(!req.is_one_way());
        let req = TravelRequest::from_json(r#"{"return_date": ""}"#).unwrap();
        assert!(req.is_one_way());
    }
}
