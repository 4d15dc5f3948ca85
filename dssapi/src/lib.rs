//! Library for interfacing with the JSON API of a digitalSTROM server (dSS).
//!
//! It is used by the `dssctrl` utility.
//!
//! ## Example
//!
//! ### Call a scene
//!
//! ```no_run
//! # async fn run() -> dssapi::Result<()> {
//! use dssapi::{ConnectionConfig, DssClient, GroupFilter};
//!
//! let mut client = DssClient::new();
//! client
//!     .connect(
//!         ConnectionConfig::new("https://dss.local:8080")
//!             .with_app_token("...")
//!             .accept_invalid_certs(true),
//!     )
//!     .await?;
//!
//! println!("{}", client.apartment().get_name().await?);
//!
//! // turn on the lights (group 1) in zone 10
//! let answer = client.zone().call_scene(10, 5, &GroupFilter::by_id(1), None).await?;
//! assert!(answer.ok);
//!
//! client.disconnect().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Optional parameters are `Option`s and are sent whenever they are `Some`,
//! so `force: Some(false)` and a value of `0` reach the server. Older
//! JavaScript clients dropped those.

#[macro_use]
extern crate tracing;

pub(crate) mod api;
pub mod apartment;
pub(crate) mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod session;
pub mod state;
pub mod system;
pub mod zone;

pub use api::Envelope;
pub use apartment::{Apartment, GroupFilter};
pub use client::DssClient;
pub use config::{ConnectionConfig, DEFAULT_USER};
pub use device::Device;
pub use error::{DssError, Result};
pub use session::{Session, SessionToken};
pub use state::State;
pub use system::{System, SystemMut};
pub use zone::Zone;
