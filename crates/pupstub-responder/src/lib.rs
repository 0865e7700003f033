//! pupstub-responder - The interactive stub responder
//!
//! This crate provides the request/prompt/response loop that stands in for the
//! real controller while the puppeteer add-on is being developed:
//! - Binds a ZeroMQ REP socket on an OS-assigned loopback port
//! - Prints each JSON request for the operator
//! - Builds the reply from the request's correlation fields plus whatever
//!   `key:value` lines the operator types

pub mod operator;
pub mod protocol;
pub mod socket;

pub use operator::Operator;
pub use protocol::{Request, Response};
pub use socket::{PendingReply, ReplySocket};

use pupstub_core::{Announce, Config, Result, Transcript};
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Reply socket, operator console and optional transcript for one session
pub struct Responder<R, W> {
    socket: ReplySocket,
    operator: Operator<R, W>,
    transcript: Option<Transcript>,
}

impl<R, W> Responder<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Bind the reply socket described by `config`
    pub async fn bind(config: &Config, operator: Operator<R, W>) -> Result<Self> {
        let socket = ReplySocket::bind(&config.bind_endpoint()).await?;
        let transcript = match &config.transcript.path {
            Some(path) => {
                let transcript = Transcript::open(path)?;
                tracing::info!(path = %transcript.path().display(), "writing transcript");
                Some(transcript)
            }
            None => None,
        };

        Ok(Self {
            socket,
            operator,
            transcript,
        })
    }

    pub fn port(&self) -> u16 {
        self.socket.port()
    }

    /// Tell the peer where to connect
    pub fn announce<A: Announce + ?Sized>(&mut self, announcer: &mut A) -> Result<()> {
        let port = self.port();
        if let Some(transcript) = self.transcript.as_mut() {
            transcript.opened(port)?;
        }
        announcer.announce(port)
    }

    /// Handle exactly one request: receive, show, prompt, reply
    pub async fn serve_one(&mut self) -> Result<Response> {
        let pending = self.socket.recv().await?;
        let request = pending.request();
        tracing::debug!(
            client_id = %request.client_id,
            sequence = request.sequence,
            "request received"
        );

        if let Some(transcript) = self.transcript.as_mut() {
            transcript.recv(request)?;
        }
        self.operator.show_request(request).await?;

        let mut response = Response::for_request(request);
        self.operator.fill(&mut response).await?;

        if let Some(transcript) = self.transcript.as_mut() {
            transcript.send(&response)?;
        }
        pending.send(&response).await?;

        Ok(response)
    }

    /// Serve requests until the process is killed or something fails
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.serve_one().await?;
        }
    }
}
