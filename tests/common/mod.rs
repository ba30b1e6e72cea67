//! Hand-written equivalent of generator output for:
//!
//! ```thrift
//! exception NotFound { 1: string key }
//! exception Unavailable { 1: i64 retry_after_ms }
//!
//! service HelloWorld {
//!     string hello(1: string name)
//!     i64 lookup(1: string key) throws (1: NotFound not_found, 2: Unavailable unavailable)
//!     void ping()
//!     oneway void notify(1: string message)
//! }
//! ```
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt, time::Duration};
use thriftquickly::{
    BoxError, Dispatcher, ExceptionType, FieldSpec, Headers, InboundCall, MethodSpec,
    ResultUnion, ThriftArgs, ThriftModule, TransportHeaders, WireResponse,
};

pub struct HelloWorld;

impl ThriftModule for HelloWorld {
    const PATH: &'static str = "gen::hello_world::HelloWorld";
    const METHODS: &'static [MethodSpec] = &[
        MethodSpec::new("hello", "hello_args", "hello_result"),
        MethodSpec::new("lookup", "lookup_args", "lookup_result"),
        MethodSpec::new("ping", "ping_args", "ping_result"),
        MethodSpec::oneway("notify", "notify_args"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFound {
    pub key: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not found: {}", self.key)
    }
}

impl Error for NotFound {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unavailable {
    pub retry_after_ms: i64,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unavailable, retry after {}ms", self.retry_after_ms)
    }
}

impl Error for Unavailable {}

/// Not declared by any method.
#[derive(Debug, Clone, PartialEq)]
pub struct Boom(pub String);

impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "boom: {}", self.0)
    }
}

impl Error for Boom {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelloArgs {
    pub name: String,
}

impl ThriftArgs for HelloArgs {
    const NAME: &'static str = "hello_args";
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelloResult {
    pub success: Option<String>,
}

impl ResultUnion for HelloResult {
    const NAME: &'static str = "hello_result";
    const SPEC: &'static [Option<FieldSpec>] = &[Some(FieldSpec::success("success"))];

    type Success = String;

    fn set_success(&mut self, value: String) {
        self.success = Some(value);
    }

    fn set_exception(&mut self, _id: i16, error: BoxError) -> Result<(), BoxError> {
        Err(error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupArgs {
    pub key: String,
}

impl ThriftArgs for LookupArgs {
    const NAME: &'static str = "lookup_args";
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub success: Option<i64>,
    pub not_found: Option<NotFound>,
    pub unavailable: Option<Unavailable>,
}

impl ResultUnion for LookupResult {
    const NAME: &'static str = "lookup_result";
    const SPEC: &'static [Option<FieldSpec>] = &[
        Some(FieldSpec::success("success")),
        Some(FieldSpec::exception(
            1,
            "not_found",
            ExceptionType::of::<NotFound>("NotFound"),
        )),
        Some(FieldSpec::exception(
            2,
            "unavailable",
            ExceptionType::of::<Unavailable>("Unavailable"),
        )),
    ];

    type Success = i64;

    fn set_success(&mut self, value: i64) {
        self.success = Some(value);
    }

    fn set_exception(&mut self, id: i16, error: BoxError) -> Result<(), BoxError> {
        match id {
            1 => self.not_found = Some(*error.downcast::<NotFound>()?),
            2 => self.unavailable = Some(*error.downcast::<Unavailable>()?),
            _ => return Err(error),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingArgs;

impl ThriftArgs for PingArgs {
    const NAME: &'static str = "ping_args";
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult;

impl ResultUnion for PingResult {
    const NAME: &'static str = "ping_result";
    const SPEC: &'static [Option<FieldSpec>] = &[None];

    type Success = ();

    fn set_success(&mut self, _value: ()) {}

    fn set_exception(&mut self, _id: i16, error: BoxError) -> Result<(), BoxError> {
        Err(error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyArgs {
    pub message: String,
}

impl ThriftArgs for NotifyArgs {
    const NAME: &'static str = "notify_args";
}

pub fn call<A: ThriftArgs>(endpoint: &str, args: &A) -> InboundCall {
    let mut headers = Headers::new();
    headers.insert("caller".into(), "tests".into());
    let transport = TransportHeaders {
        headers: Headers::from([("cn".to_owned(), "tests".to_owned())]),
        ttl_ms: 1500,
    };
    InboundCall::new(endpoint, &headers, args, transport).unwrap()
}

pub async fn lookup(dispatcher: &Dispatcher, key: &str) -> (WireResponse, LookupResult) {
    let response = dispatcher
        .handle(call("HelloWorld::lookup", &LookupArgs { key: key.into() }))
        .await
        .unwrap();
    let result = response.decode_body().unwrap();
    (response, result)
}

pub const TTL: Duration = Duration::from_millis(1500);
