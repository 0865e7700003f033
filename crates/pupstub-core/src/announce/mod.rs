//! Port announcement strategies
//!
//! The responder binds to an OS-assigned port, so whoever talks to it has to
//! be told which one. Two channels are supported:
//! - [`ChildLauncher`] starts the add-on under test with the port in its
//!   environment
//! - [`StdoutAnnouncer`] prints `PUPPETEER_SOCKET=<port>` for a wrapper script

mod launcher;
mod stdout;

pub use launcher::ChildLauncher;
pub use stdout::StdoutAnnouncer;

use crate::error::Result;

/// Environment variable carrying the reply socket port
pub const SOCKET_VAR: &str = "PUPPETEER_SOCKET";
/// Environment variable carrying the client identifier
pub const CLIENT_ID_VAR: &str = "PUPPETEER_CLIENT_ID";
/// Environment variable carrying the add-on's control log path
pub const LOG_VAR: &str = "PUPPETEER_LOG";
/// Environment variable enabling the add-on's watchdog ticks
pub const WATCHDOG_VAR: &str = "PUPPETEER_WATCHDOG";

/// Publishes the bound port to the peer
pub trait Announce {
    fn announce(&mut self, port: u16) -> Result<()>;
}

impl<A: Announce + ?Sized> Announce for Box<A> {
    fn announce(&mut self, port: u16) -> Result<()> {
        (**self).announce(port)
    }
}
