//! Value Objects - Immutable, identity-less domain primitives

mod iata_code;
mod iso_date;
mod passengers;

pub use iata_code::IataCode;
pub use iso_date::IsoDate;
pub use passengers::{MAX_SEATED_TRAVELLERS, Passengers};
