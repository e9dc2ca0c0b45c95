//! Domain entities

mod flight_offer;
mod travel_request;

pub use flight_offer::{FlightOffer, sort_offers};
pub use travel_request::TravelRequest;
