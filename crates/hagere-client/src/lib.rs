//! hagere-client: REST access to the hagere online backend
//!
//! the backend owns all business logic; this crate is the typed wire layer
//! the admin console talks through. every call attaches the session's bearer
//! token; a 401 clears the session so the caller can force a re-login.
//!
//! ## usage
//!
//! ```rust,ignore
//! let session = Session::with_token(token);
//! let client = AdminClient::new(ClientConfig::from_env(), session)?;
//! let rows = client.distribute_winnings("G100", false).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::*;
pub use config::*;
pub use error::*;
pub use session::*;
