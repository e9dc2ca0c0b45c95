//! Presentation of a search: request summary and results table

use std::fmt;

use domain::{FlightOffer, sort_offers};

use super::clarification::CompleteRequest;

/// Recap of what is being searched for
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    request: CompleteRequest,
}

impl SearchSummary {
    /// Summarize a complete request
    #[must_use]
    pub const fn new(request: CompleteRequest) -> Self {
        Self { request }
    }

    /// The summarized request
    #[must_use]
    pub const fn request(&self) -> &CompleteRequest {
        &self.request
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.request;
        writeln!(f, "From: {}", r.origin)?;
        writeln!(f, "To: {}", r.destination)?;
        writeln!(f, "Departure: {}", r.departure)?;
        match r.return_date {
            Some(date) => writeln!(f, "Return: {date}")?,
            None => writeln!(f, "Return: One-way")?,
        }
        writeln!(f, "Adults: {}", r.passengers.adults())?;
        writeln!(f, "Children: {}", r.passengers.describe_children())?;
        if r.passengers.infants() > 0 {
            writeln!(f, "Infants: {}", r.passengers.infants())?;
        }
        write!(
            f,
            "Direct flight: {}",
            if r.direct_flight { "Yes" } else { "No" }
        )
    }
}

/// Flight offers in display order
#[derive(Debug, Clone, PartialEq)]
pub struct FlightResultsTable {
    offers: Vec<FlightOffer>,
    currency: String,
}

impl FlightResultsTable {
    /// Build a table, sorting by price, then stops, then airline
    #[must_use]
    pub fn new(mut offers: Vec<FlightOffer>, currency: impl Into<String>) -> Self {
        sort_offers(&mut offers);
        Self {
            offers,
            currency: currency.into(),
        }
    }

    /// Offers in display order
    #[must_use]
    pub fn offers(&self) -> &[FlightOffer] {
        &self.offers
    }

    /// Returns true if there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Render as a markdown table
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = format!(
            "| Airline | Stops | Duration | Price ({}) |\n|---|---|---|---|\n",
            self.currency
        );
        for offer in &self.offers {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                offer.airline,
                offer.stops,
                offer.format_duration(),
                offer.format_price()
            ));
        }
        out
    }
}

impl fmt::Display for FlightResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_markdown())
    }
}

#[cfg(test)]
mod tests {
    use domain::{IsoDate, Passengers};

    use super::*;

    fn offer(airline: &str, stops: u32, price: f64) -> FlightOffer {
        FlightOffer {
            airline: airline.to_string(),
            stops,
            duration: "PT9H35M".to_string(),
            price,
            currency: "GBP".to_string(),
        }
    }

    fn request(return_date: Option<IsoDate>) -> CompleteRequest {
        CompleteRequest {
            origin: "London".to_string(),
            destination: "Delhi".to_string(),
            departure: IsoDate::from_ymd(2025, 5, 5).unwrap(),
            return_date,
            passengers: Passengers::new(2, vec![5, 8], 0).unwrap(),
            direct_flight: true,
        }
    }

    #[test]
    fn summary_one_way() {
        let text = SearchSummary::new(request(None)).to_string();
        assert_eq!(
            text,
            "From: London\nTo: Delhi\nDeparture: 2025-05-05\nReturn: One-way\n\
             Adults: 2\nChildren: 5 years old, 8 years old\nDirect flight: Yes"
        );
    }

    #[test]
    fn summary_with_return() {
        let back = IsoDate::from_ymd(2025, 5, 19).unwrap();
        let text = SearchSummary::new(request(Some(back))).to_string();
        assert!(text.contains("Return: 2025-05-19"));
        assert!(!text.contains("Infants"));
    }

    #[test]
    fn table_sorts_by_price_then_stops_then_airline() {
        let table = FlightResultsTable::new(
            vec![
                offer("VS", 1, 450.0),
                offer("BA", 0, 512.0),
                offer("AI", 1, 450.0),
                offer("LH", 0, 450.0),
            ],
            "GBP",
        );
        let airlines: Vec<_> = table.offers().iter().map(|o| o.airline.as_str()).collect();
        assert_eq!(airlines, ["LH", "AI", "VS", "BA"]);
    }

    #[test]
    fn table_renders_markdown() {
        let table = FlightResultsTable::new(vec![offer("BA", 0, 512.0)], "GBP");
        assert_eq!(
            table.render_markdown(),
            "| Airline | Stops | Duration | Price (GBP) |\n|---|---|---|---|\n\
             | BA | 0 | 9h 35m | £512.00 |\n"
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_table() {
        let table = FlightResultsTable::new(vec![], "EUR");
        assert!(table.is_empty());
        assert!(table.render_markdown().contains("Price (EUR)"));
    }
}
