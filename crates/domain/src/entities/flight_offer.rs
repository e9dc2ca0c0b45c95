//! Flight offer entity

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A priced flight option returned by a flight search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    /// Validating airline carrier code (e.g. "BA")
    pub airline: String,
    /// Number of stops on the outbound itinerary
    pub stops: u32,
    /// Outbound duration as an ISO-8601 duration (e.g. "PT9H35M")
    pub duration: String,
    /// Total price for all travellers
    pub price: f64,
    /// ISO-4217 currency code of `price`
    pub currency: String,
}

impl FlightOffer {
    /// Outbound duration in minutes, `None` if the duration text is malformed
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::FlightOffer;
    ///
    /// let offer = FlightOffer {
    ///     airline: "BA".to_string(),
    ///     stops: 0,
    ///     duration: "PT9H35M".to_string(),
    ///     price: 512.0,
    ///     currency: "GBP".to_string(),
    /// };
    /// assert_eq!(offer.duration_minutes(), Some(575));
    /// ```
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_iso_duration_minutes(&self.duration)
    }

    /// Human-readable duration ("9h 35m"), falling back to the raw text
    #[must_use]
    pub fn format_duration(&self) -> String {
        match self.duration_minutes() {
            Some(total) if total >= 60 => {
                let (hours, minutes) = (total / 60, total % 60);
                if minutes == 0 {
                    format!("{hours}h")
                } else {
                    format!("{hours}h {minutes}m")
                }
            },
            Some(total) => format!("{total}m"),
            None => self.duration.clone(),
        }
    }

    /// Price with currency symbol and two decimals ("£512.40")
    #[must_use]
    pub fn format_price(&self) -> String {
        match currency_symbol(&self.currency) {
            Some(symbol) => format!("{symbol}{:.2}", self.price),
            None => format!("{:.2} {}", self.price, self.currency),
        }
    }

    /// Stable ordering for result tables: cheapest, then fewest stops, then airline
    #[must_use]
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.price
            .total_cmp(&other.price)
            .then_with(|| self.stops.cmp(&other.stops))
            .then_with(|| self.airline.cmp(&other.airline))
    }
}

/// Sort offers for display (see [`FlightOffer::display_order`])
pub fn sort_offers(offers: &mut [FlightOffer]) {
    offers.sort_by(FlightOffer::display_order);
}

/// Symbol for the currencies the search is commonly run in
#[must_use]
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Parse `P[nD]T[nH][nM]` durations into minutes
fn parse_iso_duration_minutes(text: &str) -> Option<u32> {
    let rest = text.trim().strip_prefix('P')?;
    let (date_part, time_part) = rest.split_once('T').unwrap_or((rest, ""));

    let mut minutes: u32 = 0;
    let mut number = String::new();
    let mut saw_unit = false;

    for (part, is_time) in [(date_part, false), (time_part, true)] {
        for c in part.chars() {
            if c.is_ascii_digit() {
                number.push(c);
                continue;
            }
            let value: u32 = number.parse().ok()?;
            number.clear();
            let factor = match (c, is_time) {
                ('D', false) => 24 * 60,
                ('H', true) => 60,
                ('M', true) => 1,
                // Seconds do not change a minute-level display
                ('S', true) => 0,
                _ => return None,
            };
            minutes = minutes.checked_add(value.checked_mul(factor)?)?;
            saw_unit = true;
        }
        if !number.is_empty() {
            return None;
        }
    }

    saw_unit.then_some(minutes)
}
