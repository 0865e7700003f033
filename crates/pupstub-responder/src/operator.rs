//! The human side of the loop: show requests, read response fields

use pupstub_core::fields::{strip_line_ending, FieldEntry};
use pupstub_core::{PupstubError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::protocol::{Request, Response};

/// Line-oriented operator console
pub struct Operator<R, W> {
    input: R,
    output: W,
    marker: String,
}

impl Operator<BufReader<Stdin>, Stdout> {
    /// Operator on the process's own terminal
    pub fn console(marker: impl Into<String>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), marker)
    }
}

impl<R, W> Operator<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, marker: impl Into<String>) -> Self {
        Self {
            input,
            output,
            marker: marker.into(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a received request in full
    pub async fn show_request(&mut self, request: &Request) -> Result<()> {
        let pretty = serde_json::to_string_pretty(request)?;
        self.output.write_all(pretty.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Prompt for one line and parse it
    pub async fn read_entry(&mut self) -> Result<FieldEntry> {
        self.output.write_all(self.marker.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(PupstubError::OperatorClosed);
        }

        Ok(FieldEntry::parse(strip_line_ending(&line)))
    }

    /// Read fields into `response` until an empty line
    pub async fn fill(&mut self, response: &mut Response) -> Result<()> {
        while let FieldEntry::Field { key, value } = self.read_entry().await? {
            response.set(key, value);
        }
        Ok(())
    }
}
