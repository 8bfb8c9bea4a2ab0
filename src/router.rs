//! Ordered prefix routing.
//!
//! Routes are checked in insertion order with a literal `starts_with` on the
//! request path; the first hit wins and the fallback takes everything else.
//! The request body is never looked at.

use crate::body::ProxyBody;
use crate::handlers::{
    ApResolveHandler, ClientTokenHandler, PassthroughHandler, PlayPlayHandler, ProxyContext,
    RouteHandler, ap_resolve, client_token, playplay,
};
use hyper::{Request, Response};
use log::info;
use std::sync::Arc;

struct Route {
    prefix: String,
    handler: Arc<dyn RouteHandler>,
}

pub struct Router {
    routes: Vec<Route>,
    fallback: Arc<dyn RouteHandler>,
}

impl Router {
    pub fn new(fallback: Arc<dyn RouteHandler>) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    pub fn route(mut self, prefix: impl Into<String>, handler: Arc<dyn RouteHandler>) -> Self {
        self.routes.push(Route {
            prefix: prefix.into(),
            handler,
        });
        self
    }

    /// Token, resolver and playplay routes in front of the spclient relay.
    pub fn for_context(context: Arc<ProxyContext>) -> Self {
        Router::new(Arc::new(PassthroughHandler::new(context.clone())))
            .route(
                client_token::PATH_PREFIX,
                Arc::new(ClientTokenHandler::new(context.clone())),
            )
            .route(
                ap_resolve::PATH_PREFIX,
                Arc::new(ApResolveHandler::new(context.clone())),
            )
            .route(playplay::PATH_PREFIX, Arc::new(PlayPlayHandler::new(context)))
    }

    pub fn resolve(&self, path: &str) -> &Arc<dyn RouteHandler> {
        self.routes
            .iter()
            .find(|route| path.starts_with(route.prefix.as_str()))
            .map(|route| &route.handler)
            .unwrap_or(&self.fallback)
    }

    pub async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody> {
        info!("Serving request for URI: {}", request.uri());
        let handler = self.resolve(request.uri().path());
        handler.serve(request).await
    }
}
