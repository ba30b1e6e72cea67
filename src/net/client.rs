use super::{Request, Response};
use crate::{
    dispatcher::{InboundCall, TransportHeaders, WireResponse},
    error::DispatchError,
    types::{Headers, ResultUnion, StatusCode, ThriftArgs},
};
use async_bincode::{tokio::AsyncBincodeStream, AsyncDestination};
use futures::{SinkExt, StreamExt};
use std::{io, net::SocketAddr, time::Duration};
use thiserror::Error;
use tokio::{io::BufStream, net::TcpStream};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("framing: {0}")]
    Framing(#[from] bincode::Error),

    #[error("no response from server")]
    NoResponse,

    #[error("unexpected response: {0}")]
    Unexpected(&'static str),

    #[error("server fault: {0}")]
    Fault(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// A decoded reply to a call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResponse<R> {
    pub code: StatusCode,
    pub headers: Headers,
    pub result: R,
}

pub struct Client(pub SocketAddr);

impl Client {
    async fn connect(
        &self,
    ) -> io::Result<AsyncBincodeStream<BufStream<TcpStream>, Response, Request, AsyncDestination>>
    {
        let sock = TcpStream::connect(self.0).await?;
        let sock = BufStream::new(sock);
        let sock = AsyncBincodeStream::from(sock).for_async();
        Ok(sock)
    }

    async fn send_recv(&self, req: Request) -> Result<Response, ClientError> {
        let mut sock = self.connect().await?;
        sock.send(req).await?;
        let resp = sock.next().await.ok_or(ClientError::NoResponse)??;
        Ok(resp)
    }

    pub async fn ping(&self) -> Result<(), ClientError> {
        match self.send_recv(Request::Ping).await? {
            Response::Ping => Ok(()),
            Response::Fault(message) => Err(ClientError::Fault(message)),
            Response::Call(_) => Err(ClientError::Unexpected("call response to ping")),
        }
    }

    /// Calls `endpoint` and decodes its result union.
    pub async fn call<A, R>(
        &self,
        endpoint: &str,
        headers: &Headers,
        args: &A,
        ttl: Duration,
    ) -> Result<CallResponse<R>, ClientError>
    where
        A: ThriftArgs,
        R: ResultUnion,
    {
        let transport = TransportHeaders {
            headers: Headers::new(),
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        };
        let call = InboundCall::new(endpoint, headers, args, transport)?;
        let response = match self.send_recv(Request::Call(call)).await? {
            Response::Call(response) => response,
            Response::Fault(message) => return Err(ClientError::Fault(message)),
            Response::Ping => return Err(ClientError::Unexpected("ping response to call")),
        };
        let result = response.decode_body()?;
        let WireResponse { code, headers, .. } = response;
        Ok(CallResponse {
            code,
            headers,
            result,
        })
    }
}
