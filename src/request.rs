use crate::{
    codec::ThriftSerializer,
    dispatcher::{InboundCall, TransportHeaders},
    error::CodecError,
    types::{Headers, ThriftArgs},
};
use std::time::Duration;

/// Transport-level view of a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMetadata {
    /// The transport-level headers.
    pub headers: Headers,
    /// The caller expects a response within this period. Enforcing it is up to the
    /// transport.
    pub ttl: Duration,
}

impl TransportMetadata {
    pub fn from_request<A>(request: &RawRequest<'_, A>) -> Self {
        Self::from(request.transport())
    }
}

impl From<&TransportHeaders> for TransportMetadata {
    fn from(transport: &TransportHeaders) -> Self {
        Self {
            headers: transport.headers.clone(),
            ttl: Duration::from_millis(transport.ttl_ms),
        }
    }
}

/// Represents a Thrift call request.
///
/// `args` carries the parameters of the call, one field per parameter declared in
/// the IDL.
#[derive(Debug, Clone)]
pub struct ThriftRequest<A> {
    headers: Headers,
    args: A,
    transport: TransportMetadata,
}

impl<A: ThriftArgs> ThriftRequest<A> {
    pub(crate) async fn from_raw_request(request: &RawRequest<'_, A>) -> Result<Self, CodecError> {
        let headers = request.get_header().await?;
        let args = request.get_body().await?;
        Ok(Self {
            headers,
            args,
            transport: TransportMetadata::from_request(request),
        })
    }
}

impl<A> ThriftRequest<A> {
    /// The application-level headers passed in for this request.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn args(&self) -> &A {
        &self.args
    }

    pub fn transport(&self) -> &TransportMetadata {
        &self.transport
    }

    pub fn into_args(self) -> A {
        self.args
    }
}

/// Typed request handed to return-based handlers, decoded by the dispatcher.
#[derive(Debug, Clone)]
pub struct Request<A> {
    pub body: A,
    pub headers: Headers,
    pub transport: TransportMetadata,
}

/// An undecoded inbound call as seen by mutate-in-place handlers.
pub struct RawRequest<'a, A> {
    call: InboundCall,
    headers_codec: ThriftSerializer<Headers>,
    args_codec: &'a ThriftSerializer<A>,
}

impl<'a, A: ThriftArgs> RawRequest<'a, A> {
    pub fn new(call: InboundCall, args_codec: &'a ThriftSerializer<A>) -> Self {
        Self {
            call,
            headers_codec: ThriftSerializer::new(),
            args_codec,
        }
    }

    pub async fn get_header(&self) -> Result<Headers, CodecError> {
        self.headers_codec.decode(&self.call.headers)
    }

    pub async fn get_body(&self) -> Result<A, CodecError> {
        self.args_codec.decode(&self.call.body)
    }
}

impl<A> RawRequest<'_, A> {
    pub fn endpoint(&self) -> &str {
        &self.call.endpoint
    }

    pub fn transport(&self) -> &TransportHeaders {
        &self.call.transport
    }
}
