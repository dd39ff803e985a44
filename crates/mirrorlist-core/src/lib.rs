//! Pacman mirrorlist refresh from the Arch Linux mirror status.
//!
//! A run fetches the status document once, keeps the mirrors that are
//! complete, fast, recently synced and served over https, and replaces the
//! mirrorlist with them in the order the registry listed them.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use mirrorlist_core::{preflight, update, HttpSource, UpdaterConfig};
//!
//! fn refresh() -> mirrorlist_core::Result<()> {
//!     preflight()?;
//!     let config = UpdaterConfig::default();
//!     let report = update(&config, &HttpSource::from_config(&config), Utc::now())?;
//!     println!("{} mirrors written", report.written);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod freshness;
pub mod http_client;
pub mod status;
pub mod system;
pub mod updater;
pub mod writer;

pub use config::{FilterCriteria, UpdaterConfig};
pub use error::{ErrorContext, MirrorlistError, Result};
pub use status::{HttpSource, MirrorEntry, MirrorStatus, StatusSource};
pub use system::preflight;
pub use updater::{update, Advisory, UpdateReport};
