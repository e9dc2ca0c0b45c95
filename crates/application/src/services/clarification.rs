//! Request completeness check and clarifying questions
//!
//! A travel request is only searchable once it names both ends of the trip,
//! a departure date the normalizer understands, and who is travelling.
//! Anything missing becomes a question for the user instead of a guess.

use std::fmt;

use domain::{IsoDate, Passengers, TravelRequest};
use tracing::debug;

use crate::date_parser::DateNormalizer;
use crate::error::ApplicationError;

/// A piece of information the user still has to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingField {
    /// Departure city
    Origin,
    /// Arrival city
    Destination,
    /// Departure date absent or not understood
    DepartureDate,
    /// Return date given but not understood
    ReturnDate,
    /// Number of adults
    Adults,
    /// Children and their ages
    Children,
}

impl MissingField {
    /// Question asked to fill in this field
    #[must_use]
    pub const fn question(&self) -> &'static str {
        match self {
            Self::Origin => "Where are you departing from?",
            Self::Destination => "Where are you flying to?",
            Self::DepartureDate => "What date do you want to travel?",
            Self::ReturnDate => "What date do you want to return?",
            Self::Adults => "How many adults are traveling?",
            Self::Children => "How many children (and their ages)?",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::DepartureDate => "departure_date",
            Self::ReturnDate => "return_date",
            Self::Adults => "adults",
            Self::Children => "children",
        };
        write!(f, "{name}")
    }
}

/// A request with every field needed for a search
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteRequest {
    /// Departure city as written by the user
    pub origin: String,
    /// Arrival city as written by the user
    pub destination: String,
    /// Normalized departure date
    pub departure: IsoDate,
    /// Normalized return date, `None` for one-way
    pub return_date: Option<IsoDate>,
    /// Validated travellers
    pub passengers: Passengers,
    /// Only non-stop flights
    pub direct_flight: bool,
}

/// Outcome of checking a travel request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestCheck {
    /// Ready to search
    Complete(CompleteRequest),
    /// Needs answers from the user, in asking order
    Incomplete(Vec<MissingField>),
}

impl RequestCheck {
    /// The questions to ask, one per line, or `None` if nothing is missing
    #[must_use]
    pub fn clarification(&self) -> Option<String> {
        match self {
            Self::Complete(_) => None,
            Self::Incomplete(missing) => Some(
                missing
                    .iter()
                    .map(MissingField::question)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }
}

/// Check a request for missing fields and normalize its dates
///
/// Returns an error only when the passenger numbers are present but
/// impossible (e.g. more infants than adults).
pub fn check_request(
    request: &TravelRequest,
    normalizer: &DateNormalizer,
) -> Result<RequestCheck, ApplicationError> {
    let departure = normalizer.normalize_value(&request.departure_date);
    let return_date = if request.is_one_way() {
        None
    } else {
        Some(normalizer.normalize_value(&request.return_date))
    };
    let adults = request.adults.filter(|&adults| adults > 0);

    let mut missing = Vec::new();
    if request.origin().is_none() {
        missing.push(MissingField::Origin);
    }
    if request.destination().is_none() {
        missing.push(MissingField::Destination);
    }
    if departure.is_none() {
        missing.push(MissingField::DepartureDate);
    }
    if matches!(return_date, Some(None)) {
        missing.push(MissingField::ReturnDate);
    }
    if adults.is_none() {
        missing.push(MissingField::Adults);
    }
    if request.children.is_none() {
        missing.push(MissingField::Children);
    }

    if !missing.is_empty() {
        debug!(missing = ?missing, "Travel request incomplete");
        return Ok(RequestCheck::Incomplete(missing));
    }

    // Every branch below is guaranteed by the checks above
    let (Some(origin), Some(destination), Some(departure), Some(adults), Some(children)) = (
        request.origin(),
        request.destination(),
        departure,
        adults,
        request.children.clone(),
    ) else {
        return Err(ApplicationError::Internal(
            "request check lost a required field".to_string(),
        ));
    };

    let passengers = Passengers::new(adults, children, request.infants)?;

    Ok(RequestCheck::Complete(CompleteRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure,
        return_date: return_date.flatten(),
        passengers,
        direct_flight: request.direct_flight,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn normalizer() -> DateNormalizer {
        DateNormalizer::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    fn request(json: &str) -> TravelRequest {
        TravelRequest::from_json(json).unwrap()
    }

    #[test]
    fn complete_request_is_normalized() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"May 5th",
                "return_date":"in 14 days","adults":2,"children":[7],"direct_flight":true}"#,
        );
        let RequestCheck::Complete(complete) = check_request(&req, &normalizer()).unwrap() else {
            unreachable!("expected a complete request");
        };
        assert_eq!(complete.origin, "London");
        assert_eq!(complete.departure.to_string(), "2025-05-05");
        assert_eq!(complete.return_date.unwrap().to_string(), "2025-03-24");
        assert_eq!(complete.passengers.adults(), 2);
        assert_eq!(complete.passengers.child_ages(), &[7]);
        assert!(complete.direct_flight);
    }

    #[test]
    fn one_way_has_no_return_date() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow","adults":1}"#,
        );
        let RequestCheck::Complete(complete) = check_request(&req, &normalizer()).unwrap() else {
            unreachable!("expected a complete request");
        };
        assert!(complete.return_date.is_none());
        assert_eq!(complete.departure.to_string(), "2025-03-11");
    }

    #[test]
    fn empty_request_asks_everything_in_order() {
        let req = request(r#"{"children": null}"#);
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(
            check,
            RequestCheck::Incomplete(vec![
                MissingField::Origin,
                MissingField::Destination,
                MissingField::DepartureDate,
                MissingField::Adults,
                MissingField::Children,
            ])
        );
        let message = check.clarification().unwrap();
        assert_eq!(message.lines().count(), 5);
        assert!(message.starts_with("Where are you departing from?"));
    }

    #[test]
    fn unparseable_departure_asks_for_date() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"sometime soon","adults":1}"#,
        );
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(check, RequestCheck::Incomplete(vec![MissingField::DepartureDate]));
        assert_eq!(
            check.clarification().as_deref(),
            Some("What date do you want to travel?")
        );
    }

    #[test]
    fn non_string_departure_asks_for_date() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":5,"adults":1}"#,
        );
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(check, RequestCheck::Incomplete(vec![MissingField::DepartureDate]));
    }

    #[test]
    fn unparseable_return_asks_for_return() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow",
                "return_date":"whenever","adults":1}"#,
        );
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(check, RequestCheck::Incomplete(vec![MissingField::ReturnDate]));
    }

    #[test]
    fn zero_adults_asks_for_adults() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow","adults":0}"#,
        );
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(check, RequestCheck::Incomplete(vec![MissingField::Adults]));
    }

    #[test]
    fn unreadable_counts_ask_for_passengers() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow",
                "adults":"two","children":["7 years"]}"#,
        );
        let check = check_request(&req, &normalizer()).unwrap();
        assert_eq!(
            check,
            RequestCheck::Incomplete(vec![MissingField::Adults, MissingField::Children])
        );
    }

    #[test]
    fn whole_float_adults_are_accepted() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow","adults":2.0}"#,
        );
        let RequestCheck::Complete(complete) = check_request(&req, &normalizer()).unwrap() else {
            unreachable!("expected a complete request");
        };
        assert_eq!(complete.passengers.adults(), 2);
    }

    #[test]
    fn impossible_passengers_is_an_error() {
        let req = request(
            r#"{"origin":"London","destination":"Delhi","departure_date":"tomorrow",
                "adults":1,"infants":3}"#,
        );
        let err = check_request(&req, &normalizer()).unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn complete_check_has_no_clarification() {
        let req = request(
            r#"{"origin":"A","destination":"B","departure_date":"tomorrow","adults":1}"#,
        );
        assert!(check_request(&req, &normalizer()).unwrap().clarification().is_none());
    }

    #[test]
    fn missing_field_display_uses_request_keys() {
        assert_eq!(MissingField::DepartureDate.to_string(), "departure_date");
        assert_eq!(MissingField::Children.to_string(), "children");
    }
}
