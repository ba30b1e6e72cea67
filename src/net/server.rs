use crate::{
    config::ServerConfig,
    dispatcher::Dispatcher,
    net::{Request, Response},
};
use async_bincode::tokio::AsyncBincodeStream;
use futures::{SinkExt, StreamExt};
use std::{io, net::Ipv4Addr, sync::Arc};
use tokio::{io::BufStream, net::TcpListener, task};
use tracing::{debug, error, warn};

pub struct Server {
    dispatcher: Dispatcher,
}

impl Server {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    async fn handle_request(self: Arc<Self>, req: Request) -> Response {
        match req {
            Request::Ping => Response::Ping,
            Request::Call(call) => match self.dispatcher.handle(call).await {
                Ok(response) => Response::Call(response),
                Err(err) => {
                    warn!(%err, "call failed at transport level");
                    Response::Fault(err.to_string())
                }
            },
        }
    }

    pub async fn serve_tcp(self, port: u16) -> io::Result<()> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        self.serve(listener).await
    }

    pub async fn serve_config(self, config: &ServerConfig) -> io::Result<()> {
        let listener = TcpListener::bind((config.host, config.port)).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        let root_arc = Arc::new(self);
        loop {
            let arc_self = root_arc.clone();
            let (sock, addr) = listener.accept().await?;
            debug!(%addr, "accepted connection");
            let mut sock =
                AsyncBincodeStream::<_, Request, Response, _>::from(BufStream::new(sock))
                    .for_async();

            task::spawn(async move {
                match sock.next().await {
                    Some(Ok(request)) => {
                        let response = arc_self.handle_request(request).await;
                        if let Err(err) = sock.send(response).await {
                            error!(%addr, %err, "sending response");
                        }
                    }
                    Some(Err(err)) => error!(%addr, %err, "reading request"),
                    None => {}
                }
            });
        }
    }
}
