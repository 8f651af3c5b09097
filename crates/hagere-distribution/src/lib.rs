//! hagere-distribution: winning distribution domain for the hagere admin console
//!
//! per-game payout shares are computed and persisted by the backend; this crate
//! holds the client-side model of that data and the state machines around
//! reviewing and approving it
//!
//! ## modules
//!
//! - `record`: distribution records, roles, game rows, integrity checks
//! - `aggregate`: summaries, grouping, search/status filtering
//! - `review`: the per-game review surface (filter/page state, fetch tokens)
//! - `approval`: approval batches and the confirm state machine
//! - `state`: the distributions fetch-lifecycle slice

pub mod aggregate;
pub mod approval;
pub mod record;
pub mod review;
pub mod state;

pub use aggregate::*;
pub use approval::*;
pub use record::*;
pub use review::*;
pub use state::*;
