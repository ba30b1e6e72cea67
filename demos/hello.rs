//! `service HelloWorld { string hello(1: string name) }` served with the
//! return-based calling convention.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thriftquickly::{
    modern_call, name, register, BoxError, Client, Config, Dispatcher, FieldSpec, Handler,
    Headers, MethodSpec, ModernHandler, Reply, ResultUnion, Server, ThriftArgs, ThriftModule,
};
use tokio::{net::TcpListener, task};
use tracing_subscriber::EnvFilter;

struct HelloWorld;

impl ThriftModule for HelloWorld {
    const PATH: &'static str = "demos::HelloWorld";
    const METHODS: &'static [MethodSpec] =
        &[MethodSpec::new("hello", "hello_args", "hello_result")];
}

#[derive(Serialize, Deserialize)]
struct HelloArgs {
    name: String,
}

impl ThriftArgs for HelloArgs {
    const NAME: &'static str = "hello_args";
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HelloResult {
    success: Option<String>,
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

struct Hello;

impl ModernHandler for Hello {
    name!("hello");
    modern_call! {
        async fn call(&self, request: Request<HelloArgs>) -> HelloResult {
            Ok(Reply::Value(format!("Hello, {}!", request.body.name)))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_toml(
        r#"
        [dispatcher]
        convention = "modern"

        [server]
        host = "127.0.0.1"
        port = 0
        "#,
    )?;

    let mut dispatcher = Dispatcher::new(config.dispatcher);
    register(&mut dispatcher, &HelloWorld, Handler::modern(Hello), None, None)?;

    let listener = TcpListener::bind((config.server.host, config.server.port)).await?;
    let client = Client(listener.local_addr()?);
    task::spawn(Server::new(dispatcher).serve(listener));
    tokio::time::sleep(Duration::from_secs_f32(0.01)).await;

    client.ping().await?;
    let reply = client
        .call::<_, HelloResult>(
            "HelloWorld::hello",
            &Headers::new(),
            &HelloArgs {
                name: "world".into(),
            },
            Duration::from_secs(1),
        )
        .await?;
    println!("{:?}", reply.result);
    Ok(())
}
