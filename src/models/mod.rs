//! Domain models for carom practice tracking.
//!
//! # Core Concepts
//!
//! - [`Turn`]: One scoring event, optionally tagged with a failure reason.
//! - [`SessionState`]: The ledger of the session in progress, plus its
//!   derived counters.
//! - [`Moyenne`]: Exact average points per turn, rounded only for display.
//! - [`ArchivedDetail`]: Turn-by-turn record of a completed session, stored
//!   parallel to its summary moyenne.
//! - [`DetailProjection`]: Table rows and cumulative series derived from an
//!   archived session for inspection.

mod detail;
mod history;
mod moyenne;
mod session;
mod turn;

pub use detail::*;
pub use history::*;
pub use moyenne::*;
pub use session::*;
pub use turn::*;
