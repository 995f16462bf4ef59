//! Gateway Adapters - Implementations of the domain's outbound ports

pub mod clock;
pub mod credential;
pub mod notifier;

pub use clock::{FixedClock, SystemClock};
pub use credential::Sha256Hasher;
pub use notifier::{LogNotifier, Notification, RecordingNotifier};
