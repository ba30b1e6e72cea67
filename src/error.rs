use crate::{calling::CallingConvention, types::BoxError};
use thiserror::Error;

/// Contract violations detected while registering an endpoint.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegisterError {
    #[error("a service name could not be determined")]
    MissingService,

    #[error("a method name could not be determined")]
    MissingMethod,

    #[error("service {service} doesn't define method {method}")]
    UnknownMethod { service: String, method: String },

    #[error("oneway methods are not supported: {endpoint}")]
    Oneway { endpoint: String },

    #[error("handler shape {found} does not match declared {expected}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("dispatcher expects {expected:?} handlers, got a {found:?} handler")]
    ConventionMismatch {
        expected: CallingConvention,
        found: CallingConvention,
    },
}

/// Misuse of a [`ThriftResponse`](crate::ThriftResponse).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseError {
    #[error("already sent a response")]
    AlreadyFinished,

    #[error("tried to return a result for a void method ({result})")]
    VoidResult { result: &'static str },
}

#[derive(Error, Debug)]
#[error("codec: {0}")]
pub struct CodecError(#[from] bincode::Error);

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("no endpoint named {0}")]
    NoSuchEndpoint(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The call failed with an error no declared exception covers. The original
    /// error is kept as is.
    #[error("call failed: {0}")]
    Fault(BoxError),
}
