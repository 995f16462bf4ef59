//! Timestamp - A point in time, without a calendar library
//!
//! Formatting and the wall clock live in adapters (see `port::clock`).

/// Milliseconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_unix_millis(&self) -> i64 {
        self.0
    }
}
