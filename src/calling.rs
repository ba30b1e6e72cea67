//! The two calling conventions a dispatcher can expect from its handlers.
//!
//! * [`CallingConvention::Legacy`]: the handler receives a [`ThriftRequest`] and a
//!   [`ThriftResponse`] it mutates in place.
//! * [`CallingConvention::Modern`]: the handler receives the dispatcher-decoded
//!   [`Request`] and returns a [`Reply`].

use crate::{
    error::RegisterError,
    request::{RawRequest, Request, ThriftRequest},
    response::{OutboundResponse, Reply, Response, ThriftResponse},
    types::{BoxError, ResultUnion, Success, ThriftArgs},
};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingConvention {
    #[default]
    Legacy,
    Modern,
}

/// Fixed per endpoint; passed to mutate-in-place handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    service: String,
    endpoint: String,
}

impl CallContext {
    pub fn new(service: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// A handler that writes its result into a [`ThriftResponse`].
///
/// Returning `Some(value)` without having written anything is the same as calling
/// `write_result(Some(value))`. Returning an error encodes it into the declared
/// exception it matches.
pub trait LegacyHandler: Send + Sync + 'static {
    type Args: ThriftArgs;
    type Result: ResultUnion;

    /// Default method name of the endpoint.
    fn name(&self) -> &str;

    fn call<'call>(
        &'call self,
        request: ThriftRequest<Self::Args>,
        response: &'call mut ThriftResponse<Self::Result>,
        context: &'call CallContext,
    ) -> BoxFuture<'call, Result<Option<Success<Self::Result>>, BoxError>>;
}

/// A handler that returns its result.
pub trait ModernHandler: Send + Sync + 'static {
    type Args: ThriftArgs;
    type Result: ResultUnion;

    /// Default method name of the endpoint.
    fn name(&self) -> &str;

    fn call(
        &self,
        request: Request<Self::Args>,
    ) -> BoxFuture<'_, Result<Reply<Success<Self::Result>>, BoxError>>;
}

/// An application handler, tagged with the calling convention it was written for.
pub enum Handler<A, R> {
    Legacy(Arc<dyn LegacyHandler<Args = A, Result = R>>),
    Modern(Arc<dyn ModernHandler<Args = A, Result = R>>),
}

impl<A: ThriftArgs, R: ResultUnion> Handler<A, R> {
    pub fn legacy<H>(handler: H) -> Self
    where
        H: LegacyHandler<Args = A, Result = R>,
    {
        Handler::Legacy(Arc::new(handler))
    }

    pub fn modern<H>(handler: H) -> Self
    where
        H: ModernHandler<Args = A, Result = R>,
    {
        Handler::Modern(Arc::new(handler))
    }

    pub fn name(&self) -> &str {
        match self {
            Handler::Legacy(handler) => handler.name(),
            Handler::Modern(handler) => handler.name(),
        }
    }

    pub fn convention(&self) -> CallingConvention {
        match self {
            Handler::Legacy(_) => CallingConvention::Legacy,
            Handler::Modern(_) => CallingConvention::Modern,
        }
    }
}

/// A handler wrapped for the dispatcher's calling convention.
pub enum Strategy<A, R> {
    Legacy(LegacyStrategy<A, R>),
    Modern(ModernStrategy<A, R>),
}

impl<A, R> Strategy<A, R>
where
    A: ThriftArgs,
    R: ResultUnion,
{
    pub fn select(
        convention: CallingConvention,
        handler: Handler<A, R>,
        context: CallContext,
    ) -> Result<Self, RegisterError> {
        match (convention, handler) {
            (CallingConvention::Legacy, Handler::Legacy(handler)) => {
                Ok(Strategy::Legacy(LegacyStrategy { handler, context }))
            }
            (CallingConvention::Modern, Handler::Modern(handler)) => {
                Ok(Strategy::Modern(ModernStrategy { handler, context }))
            }
            (expected, handler) => Err(RegisterError::ConventionMismatch {
                expected,
                found: handler.convention(),
            }),
        }
    }

    pub fn convention(&self) -> CallingConvention {
        match self {
            Strategy::Legacy(_) => CallingConvention::Legacy,
            Strategy::Modern(_) => CallingConvention::Modern,
        }
    }

    pub fn context(&self) -> &CallContext {
        match self {
            Strategy::Legacy(strategy) => &strategy.context,
            Strategy::Modern(strategy) => &strategy.context,
        }
    }
}

/// How a mutate-in-place handler ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome<S> {
    /// The handler wrote the response itself. `discarded` is set when it also
    /// returned a value, which loses to the write.
    Written { discarded: bool },
    Returned(S),
    Nothing,
}

impl<S> Outcome<S> {
    fn resolve(finished: bool, returned: Option<S>) -> Self {
        match (finished, returned) {
            (true, returned) => Outcome::Written {
                discarded: returned.is_some(),
            },
            (false, Some(value)) => Outcome::Returned(value),
            (false, None) => Outcome::Nothing,
        }
    }
}

pub struct LegacyStrategy<A, R> {
    handler: Arc<dyn LegacyHandler<Args = A, Result = R>>,
    context: CallContext,
}

impl<A, R> LegacyStrategy<A, R>
where
    A: ThriftArgs,
    R: ResultUnion,
{
    pub async fn invoke(
        &self,
        request: RawRequest<'_, A>,
        response: &mut OutboundResponse<R>,
    ) -> Result<(), BoxError> {
        let req = ThriftRequest::from_raw_request(&request).await?;
        let mut res = ThriftResponse::new();

        // Waits for the handler to return, not merely for the first write.
        let returned = self.handler.call(req, &mut res, &self.context).await;
        match returned {
            Ok(returned) => match Outcome::resolve(res.finished(), returned) {
                Outcome::Written { discarded } => {
                    if discarded {
                        warn!(
                            endpoint = self.context.endpoint(),
                            "handler wrote a result and also returned one; returned value dropped"
                        );
                    }
                }
                Outcome::Returned(value) => res.write_result(Some(value))?,
                Outcome::Nothing => {}
            },
            Err(error) => res
                .write_exc_info(error)
                .inspect_err(|error| escaped(&self.context, error))?,
        }

        let (code, headers, result) = res.into_parts();
        debug!(endpoint = self.context.endpoint(), %code, "legacy call finished");
        response.code = code;
        response.write_header(headers);
        response.write_body(result);
        Ok(())
    }
}

pub struct ModernStrategy<A, R> {
    handler: Arc<dyn ModernHandler<Args = A, Result = R>>,
    context: CallContext,
}

impl<A, R> ModernStrategy<A, R>
where
    A: ThriftArgs,
    R: ResultUnion,
{
    pub async fn invoke(&self, request: Request<A>) -> Result<Response<R>, BoxError> {
        let mut result = ThriftResponse::<R>::new();

        let returned = self.handler.call(request).await;
        let response = match returned {
            Ok(reply) => {
                let response = reply.into_response();
                let Response {
                    body,
                    headers,
                    status,
                } = response;
                result.write_result(body)?;
                Response {
                    body: (),
                    headers,
                    status,
                }
            }
            Err(error) => {
                result
                    .write_exc_info(error)
                    .inspect_err(|error| escaped(&self.context, error))?;
                Response::new(())
            }
        };

        let (code, _, container) = result.into_parts();
        debug!(endpoint = self.context.endpoint(), %code, "call finished");
        Ok(response.replace_body(container))
    }
}

fn escaped(context: &CallContext, error: &BoxError) {
    warn!(
        endpoint = context.endpoint(),
        %error,
        "error left unencoded, passing it to the dispatcher"
    );
}
