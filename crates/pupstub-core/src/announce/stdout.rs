use std::io::Write;

use super::{Announce, SOCKET_VAR};
use crate::error::Result;

/// Writes `PUPPETEER_SOCKET=<port>` as a single line
pub struct StdoutAnnouncer<W: Write> {
    out: W,
}

impl StdoutAnnouncer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StdoutAnnouncer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Announce for StdoutAnnouncer<W> {
    fn announce(&mut self, port: u16) -> Result<()> {
        writeln!(self.out, "{}={}", SOCKET_VAR, port)?;
        // A wrapper script may be blocked reading this line
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce_line() {
        let mut announcer = StdoutAnnouncer::new(Vec::new());
        announcer.announce(40123).unwrap();

        let out = String::from_utf8(announcer.into_inner()).unwrap();
        assert_eq!(out, "PUPPETEER_SOCKET=40123\n");
    }
}
