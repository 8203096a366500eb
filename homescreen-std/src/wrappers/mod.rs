//! Section wrappers.
//!
//! Wrappers implement [`Section`](homescreen_core::Section) by delegating to
//! an inner section, so they can be registered like any other provider.

mod timeout;
mod traced;

pub use timeout::TimeoutSection;
pub use traced::TracedSection;
