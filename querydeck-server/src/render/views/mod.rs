//! Server-rendered pages.

mod authorization;
mod dispatch;

pub use authorization::AuthorizationSummary;
pub use dispatch::{status_counts, DispatchSummary};
