//! Gateway Ports - Outbound collaborators the use cases call
//!
//! Like the repository traits, these only say WHAT the domain needs:
//! a clock, a way to hash credentials and a way to tell ninjas about news.
//! Adapters decide how.

pub mod clock;
pub mod credential;
pub mod notifier;
