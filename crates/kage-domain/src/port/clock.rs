//! Clock - Source of "now" for creation timestamps

use crate::model::time::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
