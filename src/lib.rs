//! Serve IDL-generated Thrift service contracts over an asynchronous RPC dispatcher.
//!
//! Application code implements one handler per IDL method, in either of the two
//! calling conventions a [`Dispatcher`] can expect ([`LegacyHandler`] or
//! [`ModernHandler`]), and hands it to [`register`]. Declared exceptions a handler
//! returns are encoded into the method's result union; any other error escapes to the
//! dispatcher unchanged.

pub mod calling;
pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod encoder;
pub mod error;
mod macros;
pub mod net;
pub mod register;
pub mod request;
pub mod response;
pub mod types;

pub use calling::{CallContext, CallingConvention, Handler, LegacyHandler, ModernHandler, Strategy};
pub use codec::ThriftSerializer;
pub use config::{Config, DispatcherConfig, ServerConfig};
pub use dispatcher::{Dispatcher, InboundCall, TransportHeaders, WireResponse};
pub use error::{CodecError, DispatchError, RegisterError, ResponseError};
pub use futures::future::BoxFuture;
pub use net::{client::Client, server::Server};
pub use register::register;
pub use request::{RawRequest, Request, ThriftRequest, TransportMetadata};
pub use response::{OutboundResponse, Reply, Response, ThriftResponse};
pub use types::{
    BoxError, ExceptionType, FieldSpec, Headers, MethodSpec, ResultUnion, StatusCode, Success,
    ThriftArgs, ThriftModule,
};
