//! The local listener: owns the loopback socket and serves every accepted
//! connection on its own task.

use crate::config::Config;
use crate::connector::{Connector, Upstreams};
use crate::error::ProxyError;
use crate::handlers::ProxyContext;
use crate::profile::ClientProfile;
use crate::router::Router;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1::Builder as ServerBuilder;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use std::convert::Infallible;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct RequestListener {
    listener: TcpListener,
    router: Arc<Router>,
}

impl RequestListener {
    pub async fn bind(config: &Config) -> Result<Self, ProxyError> {
        Self::bind_with_upstreams(config, Upstreams::default()).await
    }

    /// Binds `127.0.0.1:<listen_port>` and builds the startup templates.
    ///
    /// With port 0 the templates use the port actually bound.
    pub async fn bind_with_upstreams(config: &Config, upstreams: Upstreams) -> Result<Self, ProxyError> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.listen_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ProxyError::Listener { addr, source })?;
        let local_addr = listener.local_addr()?;

        let profile = ClientProfile::new(&config.client, local_addr.port())?;
        let connector = Connector::new(profile.user_agent(), config.accept_invalid_upstream_certs)?;
        info!("Spoofing client as: {}", profile.user_agent());

        let context = Arc::new(ProxyContext {
            profile,
            upstreams,
            connector,
        });

        info!("Request listener bound to http://{}", local_addr);
        Ok(Self {
            listener,
            router: Arc::new(Router::for_context(context)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ProxyError> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self) -> Result<(), ProxyError> {
        loop {
            let (stream, remote_addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            debug!("Accepted connection from {}", remote_addr);

            let router = self.router.clone();
            tokio::spawn(async move {
                let service = service_fn(move |request: Request<Incoming>| {
                    let router = router.clone();
                    async move {
                        let request = request.map(|body| body.boxed_unsync());
                        Ok::<_, Infallible>(router.serve(request).await)
                    }
                });

                if let Err(e) = ServerBuilder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    debug!("Error serving connection from {}: {}", remote_addr, e);
                }
            });
        }
    }
}
