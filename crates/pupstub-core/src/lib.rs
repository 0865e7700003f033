//! pupstub-core - Shared pieces of the pupstub stub responder
//!
//! This crate provides everything around the reply loop itself:
//! - Configuration loading
//! - Port announcement (child launcher or stdout)
//! - Parsing of operator-entered response fields
//! - Request/reply transcript

pub mod announce;
pub mod config;
pub mod error;
pub mod fields;
pub mod transcript;

pub use announce::{Announce, ChildLauncher, StdoutAnnouncer};
pub use config::Config;
pub use error::{PupstubError, Result};
pub use fields::FieldEntry;
pub use transcript::Transcript;
