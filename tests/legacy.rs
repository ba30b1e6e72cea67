mod common;

use common::*;
use std::time::Duration;
use thriftquickly::{
    legacy_call, name, register, CallingConvention, DispatchError, Dispatcher,
    DispatcherConfig, Handler, LegacyHandler, ResponseError, StatusCode,
};

struct Hello;

impl LegacyHandler for Hello {
    name!("hello");
    legacy_call! {
        async fn call(&self, request: ThriftRequest<HelloArgs>, response: &mut ThriftResponse<HelloResult>, context) {
            response.write_header("served-by", context.endpoint());
            response.write_header("caller", request.headers()["caller"].clone());
            let ttl = request.transport().ttl;
            response.write_header("ttl", ttl.as_millis().to_string());
            Ok(Some(format!("Hello, {}", request.args().name)))
        }
    }
}

struct Lookup;

impl LegacyHandler for Lookup {
    name!("lookup");
    legacy_call! {
        async fn call(&self, request: ThriftRequest<LookupArgs>, response: &mut ThriftResponse<LookupResult>, context) {
            let _ = context;
            match request.into_args().key.as_str() {
                "bob" => Ok(Some(42)),
                "explicit" => {
                    response.write_result(Some(7))?;
                    Ok(Some(8))
                }
                "twice" => {
                    response.write_result(Some(1))?;
                    response.write_result(Some(2))?;
                    Ok(None)
                }
                "busy" => Err(Unavailable { retry_after_ms: 250 }.into()),
                "explode" => Err(Boom("kaboom".into()).into()),
                "silent" => Ok(None),
                key => Err(NotFound { key: key.into() }.into()),
            }
        }
    }
}

struct Ping;

impl LegacyHandler for Ping {
    name!("ping");
    legacy_call! {
        async fn call(&self, request: ThriftRequest<PingArgs>, response: &mut ThriftResponse<PingResult>, context) {
            let _ = (request, context);
            response.write_result(None)?;
            Ok(None)
        }
    }
}

fn dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new(DispatcherConfig {
        convention: CallingConvention::Legacy,
    });
    register(&mut dispatcher, &HelloWorld, Handler::legacy(Hello), None, None).unwrap();
    register(&mut dispatcher, &HelloWorld, Handler::legacy(Lookup), None, None).unwrap();
    register(&mut dispatcher, &HelloWorld, Handler::legacy(Ping), None, None).unwrap();
    dispatcher
}

#[tokio::test]
async fn returned_value_becomes_success() {
    let dispatcher = dispatcher();
    let response = dispatcher
        .handle(call("HelloWorld::hello", &HelloArgs { name: "Bob".into() }))
        .await
        .unwrap();

    assert_eq!(response.code, StatusCode::Ok);
    assert_eq!(
        response.decode_body::<HelloResult>().unwrap(),
        HelloResult {
            success: Some("Hello, Bob".into())
        }
    );
    assert_eq!(response.headers["served-by"], "HelloWorld::hello");
    assert_eq!(response.headers["caller"], "tests");
    assert_eq!(response.headers["ttl"], TTL.as_millis().to_string());
}

#[tokio::test]
async fn declared_exception_is_encoded() {
    let dispatcher = dispatcher();
    let (response, result) = lookup(&dispatcher, "x").await;

    assert_eq!(response.code, StatusCode::Error);
    assert_eq!(
        result,
        LookupResult {
            not_found: Some(NotFound { key: "x".into() }),
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn second_declared_exception_is_encoded() {
    let dispatcher = dispatcher();
    let (response, result) = lookup(&dispatcher, "busy").await;

    assert_eq!(response.code, StatusCode::Error);
    assert_eq!(
        result,
        LookupResult {
            unavailable: Some(Unavailable {
                retry_after_ms: 250
            }),
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn explicit_write_wins_over_returned_value() {
    let dispatcher = dispatcher();
    let (response, result) = lookup(&dispatcher, "explicit").await;

    assert_eq!(response.code, StatusCode::Ok);
    assert_eq!(result.success, Some(7));
}

#[tokio::test]
async fn nothing_written_leaves_result_empty() {
    let dispatcher = dispatcher();
    let (response, result) = lookup(&dispatcher, "silent").await;

    assert_eq!(response.code, StatusCode::Ok);
    assert_eq!(result, LookupResult::default());
}

#[tokio::test]
async fn double_write_escapes() {
    let dispatcher = dispatcher();
    let err = dispatcher
        .handle(call("HelloWorld::lookup", &LookupArgs { key: "twice".into() }))
        .await
        .unwrap_err();

    let err = match err {
        DispatchError::Fault(err) => err,
        other => panic!("expected a fault, got {other}"),
    };
    assert_eq!(
        err.downcast_ref::<ResponseError>(),
        Some(&ResponseError::AlreadyFinished)
    );
}

#[tokio::test]
async fn undeclared_exception_escapes_unchanged() {
    let dispatcher = dispatcher();
    let err = dispatcher
        .handle(call("HelloWorld::lookup", &LookupArgs { key: "explode".into() }))
        .await
        .unwrap_err();

    let err = match err {
        DispatchError::Fault(err) => err,
        other => panic!("expected a fault, got {other}"),
    };
    assert_eq!(err.downcast_ref::<Boom>(), Some(&Boom("kaboom".into())));
    assert_eq!(err.to_string(), "boom: kaboom");
}

#[tokio::test]
async fn void_method_succeeds_without_value() {
    let dispatcher = dispatcher();
    let response = dispatcher
        .handle(call("HelloWorld::ping", &PingArgs))
        .await
        .unwrap();

    assert_eq!(response.code, StatusCode::Ok);
    assert_eq!(response.decode_body::<PingResult>().unwrap(), PingResult);
}

#[tokio::test]
async fn unknown_endpoint() {
    let dispatcher = dispatcher();
    let err = dispatcher
        .handle(call("HelloWorld::goodbye", &PingArgs))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NoSuchEndpoint(name) if name == "HelloWorld::goodbye"));
}

#[tokio::test]
async fn undecodable_body_is_a_fault() {
    let dispatcher = dispatcher();
    let mut inbound = call("HelloWorld::hello", &HelloArgs { name: "Bob".into() });
    inbound.body.truncate(2);
    let err = dispatcher.handle(inbound).await.unwrap_err();
    assert!(matches!(err, DispatchError::Fault(_)));
}

#[test]
fn ttl_is_carried_in_milliseconds() {
    assert_eq!(TTL, Duration::from_millis(1500));
}
