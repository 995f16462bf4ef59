//! Domain Models - The vocabulary of Kage
//!
//! These types represent the "Ubiquitous Language" of the village system.
//! Every name here should match how we talk about ninjas and missions.

pub mod mission;
pub mod ninja;
pub mod rank;
pub mod role;
pub mod time;
pub mod village;

/// Error returned when parsing an enumerated value from its wire name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl core::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
