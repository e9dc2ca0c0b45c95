//! Passenger composition value object

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Maximum number of seated travellers (adults + children) per search
pub const MAX_SEATED_TRAVELLERS: u32 = 9;

/// Who is travelling
///
/// Infants travel on an adult's lap, so there can never be more infants
/// than adults, and they do not count towards the seated limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    adults: u32,
    child_ages: Vec<u32>,
    infants: u32,
}

impl Passengers {
    /// Create a validated passenger composition
    pub fn new(adults: u32, child_ages: Vec<u32>, infants: u32) -> Result<Self, DomainError> {
        if adults == 0 {
            return Err(DomainError::InvalidPassengers(
                "at least one adult must travel".to_string(),
            ));
        }
        if infants > adults {
            return Err(DomainError::InvalidPassengers(format!(
                "{infants} infants need at least {infants} adults"
            )));
        }
        let seated = u32::try_from(child_ages.len())
            .ok()
            .and_then(|children| children.checked_add(adults))
            .unwrap_or(u32::MAX);
        if seated > MAX_SEATED_TRAVELLERS {
            return Err(DomainError::InvalidPassengers(format!(
                "{seated} seated travellers exceeds the limit of {MAX_SEATED_TRAVELLERS}"
            )));
        }
        Ok(Self {
            adults,
            child_ages,
            infants,
        })
    }

    /// Number of adults
    #[must_use]
    pub const fn adults(&self) -> u32 {
        self.adults
    }

    /// Ages of the travelling children
    #[must_use]
    pub fn child_ages(&self) -> &[u32] {
        &self.child_ages
    }

    /// Number of children
    #[must_use]
    pub fn children(&self) -> u32 {
        u32::try_from(self.child_ages.len()).unwrap_or(u32::MAX)
    }

    /// Number of lap infants
    #[must_use]
    pub const fn infants(&self) -> u32 {
        self.infants
    }

    /// Children rendered as "5 years old, 8 years old", or "None"
    #[must_use]
    pub fn describe_children(&self) -> String {
        if self.child_ages.is_empty() {
            return "None".to_string();
        }
        self.child_ages
            .iter()
            .map(|age| format!("{age} years old"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
