//! Reply socket with enforced receive/send alternation
//!
//! A ZeroMQ REP socket must answer every request exactly once before it can
//! take the next one. [`ReplySocket::recv`] hands out a [`PendingReply`] that
//! mutably borrows the socket, so a second `recv` cannot even be written until
//! the pending reply has been consumed by [`PendingReply::send`].

use pupstub_core::{PupstubError, Result};
use zeromq::{Endpoint, RepSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::protocol::{Request, Response};

/// REP socket bound to an OS-assigned TCP port
pub struct ReplySocket {
    inner: RepSocket,
    port: u16,
    /// Set while a received request has not been answered
    awaiting_send: bool,
}

impl ReplySocket {
    /// Bind to a `tcp://host:port` endpoint; port 0 lets the OS choose
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let mut inner = RepSocket::new();
        let bound = inner.bind(endpoint).await.map_err(socket_error)?;

        let port = match bound {
            Endpoint::Tcp(_, port) => port,
            other => return Err(PupstubError::UnexpectedEndpoint(format!("{:?}", other))),
        };
        tracing::info!(port, "reply socket bound");

        Ok(Self {
            inner,
            port,
            awaiting_send: false,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the next request
    ///
    /// Fails without touching the socket if the previous request was dropped
    /// unanswered.
    pub async fn recv(&mut self) -> Result<PendingReply<'_>> {
        if self.awaiting_send {
            return Err(PupstubError::Protocol(
                "previous request was never answered".into(),
            ));
        }

        let message = self.inner.recv().await.map_err(socket_error)?;
        self.awaiting_send = true;

        if message.len() > 1 {
            tracing::warn!(frames = message.len(), "ignoring frames after the first");
        }
        let frame = message
            .get(0)
            .ok_or_else(|| PupstubError::Protocol("empty message".into()))?;
        tracing::debug!(bytes = frame.len(), "received request frame");

        let request = Request::from_slice(frame)?;

        Ok(PendingReply {
            socket: self,
            request,
        })
    }
}

/// A received request whose reply is still owed
#[must_use = "every request must be answered before the next one can be received"]
pub struct PendingReply<'a> {
    socket: &'a mut ReplySocket,
    request: Request,
}

impl PendingReply<'_> {
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Send the reply, returning the socket to the receiving state
    pub async fn send(self, response: &Response) -> Result<()> {
        let PendingReply { socket, request } = self;
        let payload = response.to_vec()?;
        tracing::debug!(
            bytes = payload.len(),
            sequence = request.sequence,
            "sending reply"
        );

        socket
            .inner
            .send(ZmqMessage::from(payload))
            .await
            .map_err(socket_error)?;
        socket.awaiting_send = false;
        Ok(())
    }
}

fn socket_error(err: zeromq::ZmqError) -> PupstubError {
    PupstubError::Socket(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use zeromq::ReqSocket;

    async fn within<F: std::future::Future>(fut: F) -> F::Output {
        tokio::time::timeout(Duration::from_secs(10), fut)
            .await
            .expect("timed out")
    }

    async fn connect(port: u16) -> ReqSocket {
        let mut req = ReqSocket::new();
        req.connect(&format!("tcp://127.0.0.1:{}", port)).await.unwrap();
        req
    }

    async fn request(req: &mut ReqSocket, body: &str) {
        req.send(ZmqMessage::from(body.to_string())).await.unwrap();
    }

    async fn reply(req: &mut ReqSocket) -> Value {
        let message = req.recv().await.unwrap();
        serde_json::from_slice(message.get(0).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let socket = ReplySocket::bind("tcp://127.0.0.1:0").await.unwrap();
        assert_ne!(socket.port(), 0);
    }

    #[tokio::test]
    async fn test_request_reply_cycle() {
        let mut socket = ReplySocket::bind("tcp://127.0.0.1:0").await.unwrap();
        let mut req = connect(socket.port()).await;

        within(async {
            request(&mut req, r#"{"client_id":"abc","sequence":1,"action":"click"}"#).await;

            let pending = socket.recv().await.unwrap();
            assert_eq!(pending.request().client_id, "abc");
            assert_eq!(pending.request().extra["action"], json!("click"));

            let mut response = Response::for_request(pending.request());
            response.set("status", "ok");
            pending.send(&response).await.unwrap();

            assert_eq!(
                reply(&mut req).await,
                json!({"client_id": "abc", "sequence": 1, "status": "ok"})
            );
        })
        .await;
    }

    #[tokio::test]
    async fn test_unanswered_request_blocks_next_recv() {
        let mut socket = ReplySocket::bind("tcp://127.0.0.1:0").await.unwrap();
        let mut req = connect(socket.port()).await;

        within(async {
            request(&mut req, r#"{"client_id":"abc","sequence":0}"#).await;
            let pending = socket.recv().await.unwrap();
            drop(pending);

            let err = socket.recv().await.err().unwrap();
            assert!(matches!(err, PupstubError::Protocol(_)));
        })
        .await;
    }

    #[tokio::test]
    async fn test_malformed_request() {
        let mut socket = ReplySocket::bind("tcp://127.0.0.1:0").await.unwrap();
        let mut req = connect(socket.port()).await;

        within(async {
            request(&mut req, r#"{"sequence":0}"#).await;
            let err = socket.recv().await.err().unwrap();
            assert!(matches!(err, PupstubError::Json(_)));
        })
        .await;
    }
}
