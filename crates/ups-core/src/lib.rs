//! Admin client for a push notification server.
//!
//! Manages **applications** and their platform **variants** (Android, iOS)
//! over the server's REST API:
//!
//! ```no_run
//! # async fn demo() -> ups_core::Result<()> {
//! use ups_core::{ApplicationFilter, ClientConfig, UpsClient};
//! use ups_schema::NewApplication;
//!
//! let client = UpsClient::from_config(&ClientConfig::default())?;
//! let app = client
//!     .applications()
//!     .create(&NewApplication::new("Demo"))
//!     .await?;
//! let mine = client
//!     .applications()
//!     .find(&ApplicationFilter::by_developer("admin"))
//!     .await?;
//! # let _ = (app, mine);
//! # Ok(())
//! # }
//! ```
//!
//! All HTTP goes through the [`Transport`] trait. [`mock::MockUps`] is an
//! in-memory server behind the same trait, so tests swap it in for
//! [`HttpTransport`] without touching the client.

pub mod applications;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod mock;
pub mod paging;
pub mod paths;
pub mod transport;
pub mod variants;

pub use applications::ApplicationsAdmin;
pub use client::UpsClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use filter::{ApplicationFilter, Filter, VariantFilter};
pub use paging::Page;
#[cfg(feature = "network")]
pub use transport::HttpTransport;
pub use transport::Transport;
pub use variants::VariantsAdmin;

/// User Agent string for outgoing requests
pub const USER_AGENT: &str = concat!("ups-core/", env!("CARGO_PKG_VERSION"));
