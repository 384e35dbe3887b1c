//! # bo-driver
//!
//! The observation store and the replay-based optimization driver.
//!
//! Each iteration the driver constructs a *fresh* optimizer session,
//! replays every historical observation into it in chronological order,
//! and asks it for exactly one candidate. Rebuilding the session every
//! iteration keeps strategy comparisons stateless: no session-internal
//! cache can leak assumptions across iterations or across strategies
//! compared side by side. This trade is deliberate and load-bearing for
//! the benchmark's semantics; do not replace it with a persistent
//! incremental session.

mod driver;
mod session;
mod store;

pub use driver::ReplayDriver;
pub use session::OptimizerSession;
pub use store::ObservationStore;
