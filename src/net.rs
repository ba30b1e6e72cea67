//! A one-shot TCP transport for a [`Dispatcher`](crate::Dispatcher): each connection
//! carries one request frame and one response frame.

pub mod client;
pub mod server;

use crate::dispatcher::{InboundCall, WireResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub(crate) enum Request {
    Ping,
    Call(InboundCall),
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) enum Response {
    Ping,
    Call(WireResponse),
    /// Transport-level fault, e.g. an error no declared exception covers.
    Fault(String),
}
