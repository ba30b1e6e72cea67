use crate::{
    calling::{CallContext, CallingConvention, Strategy},
    codec::ThriftSerializer,
    config::DispatcherConfig,
    error::DispatchError,
    request::{RawRequest, Request, TransportMetadata},
    response::OutboundResponse,
    types::{Headers, ResultUnion, StatusCode, ThriftArgs},
};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, warn};

/// Transport-level part of an inbound call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportHeaders {
    pub headers: Headers,
    pub ttl_ms: u64,
}

/// An inbound call before decoding: endpoint, encoded headers, encoded arguments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InboundCall {
    pub endpoint: String,
    pub headers: Vec<u8>,
    pub body: Vec<u8>,
    pub transport: TransportHeaders,
}

impl InboundCall {
    /// Encodes `headers` and `args` for `endpoint`.
    pub fn new<A: ThriftArgs>(
        endpoint: impl Into<String>,
        headers: &Headers,
        args: &A,
        transport: TransportHeaders,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            endpoint: endpoint.into(),
            headers: ThriftSerializer::<Headers>::new().encode(headers)?,
            body: ThriftSerializer::<A>::new().encode(args)?,
            transport,
        })
    }
}

/// A finished call, ready to go on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub code: StatusCode,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn decode_body<R: ResultUnion>(&self) -> Result<R, DispatchError> {
        Ok(ThriftSerializer::<R>::new().decode(&self.body)?)
    }
}

/// Maps endpoint names to registered handlers.
///
/// Endpoints are added with [`register`](Self::register), usually through
/// [`crate::register`], and called via [`handle`](Self::handle).
#[derive(Default)]
pub struct Dispatcher {
    config: DispatcherConfig,
    endpoints: BTreeMap<String, Arc<dyn DynamicEndpoint + Send + Sync + 'static>>,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            endpoints: BTreeMap::new(),
        }
    }

    /// The calling convention registered handlers are wrapped for.
    pub fn convention(&self) -> CallingConvention {
        self.config.convention
    }

    pub fn register<A, R>(
        &mut self,
        endpoint: String,
        strategy: Strategy<A, R>,
        request_codec: ThriftSerializer<A>,
        response_codec: ThriftSerializer<R>,
    ) where
        A: ThriftArgs,
        R: ResultUnion,
    {
        let typed = TypedEndpoint {
            strategy,
            request_codec,
            response_codec,
        };
        info!(%endpoint, convention = ?typed.strategy.convention(), "registered endpoint");
        if self.endpoints.insert(endpoint.clone(), Arc::new(typed)).is_some() {
            warn!(%endpoint, "endpoint registered twice, replacing the earlier handler");
        }
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn context(&self, endpoint: &str) -> Option<&CallContext> {
        self.endpoints.get(endpoint).map(|e| e.context())
    }

    pub async fn handle(&self, call: InboundCall) -> Result<WireResponse, DispatchError> {
        debug!(endpoint = %call.endpoint, "dispatching call");
        let endpoint = self
            .endpoints
            .get(&call.endpoint)
            .ok_or_else(|| DispatchError::NoSuchEndpoint(call.endpoint.clone()))?;
        endpoint.call(call).await
    }
}

struct TypedEndpoint<A, R> {
    strategy: Strategy<A, R>,
    request_codec: ThriftSerializer<A>,
    response_codec: ThriftSerializer<R>,
}

impl<A, R> TypedEndpoint<A, R>
where
    A: ThriftArgs,
    R: ResultUnion,
{
    async fn call(&self, call: InboundCall) -> Result<WireResponse, DispatchError> {
        match &self.strategy {
            Strategy::Legacy(strategy) => {
                let mut response = OutboundResponse::new();
                let request = RawRequest::new(call, &self.request_codec);
                strategy
                    .invoke(request, &mut response)
                    .await
                    .map_err(DispatchError::Fault)?;
                let (code, headers, body) = response.into_parts();
                let body = self.response_codec.encode(&body.unwrap_or_default())?;
                Ok(WireResponse {
                    code,
                    headers,
                    body,
                })
            }
            Strategy::Modern(strategy) => {
                let request = Request {
                    headers: ThriftSerializer::<Headers>::new().decode(&call.headers)?,
                    body: self.request_codec.decode(&call.body)?,
                    transport: TransportMetadata::from(&call.transport),
                };
                let response = strategy
                    .invoke(request)
                    .await
                    .map_err(DispatchError::Fault)?;
                Ok(WireResponse {
                    code: response.status,
                    body: self.response_codec.encode(&response.body)?,
                    headers: response.headers,
                })
            }
        }
    }
}

/// A type-erased version of [`TypedEndpoint`]
trait DynamicEndpoint {
    fn context(&self) -> &CallContext;
    fn call(&self, call: InboundCall) -> BoxFuture<Result<WireResponse, DispatchError>>;
}

impl<A, R> DynamicEndpoint for TypedEndpoint<A, R>
where
    A: ThriftArgs,
    R: ResultUnion,
{
    fn context(&self) -> &CallContext {
        self.strategy.context()
    }

    fn call(&self, call: InboundCall) -> BoxFuture<Result<WireResponse, DispatchError>> {
        Box::pin(self.call(call))
    }
}
