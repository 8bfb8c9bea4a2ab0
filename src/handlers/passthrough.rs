use super::{ProxyContext, RouteHandler, or_internal_error};
use crate::body::{BoundedBody, ProxyBody};
use crate::error::ProxyError;
use crate::translate::translate;
use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::header::CONTENT_LENGTH;
use hyper::{Request, Response};
use std::sync::Arc;

/// Fallback handler: relays anything no other route claims to the spclient
/// origin and returns the answer unmodified.
pub struct PassthroughHandler {
    context: Arc<ProxyContext>,
}

impl PassthroughHandler {
    pub fn new(context: Arc<ProxyContext>) -> Self {
        Self { context }
    }

    async fn handle(&self, request: Request<ProxyBody>) -> Result<Response<ProxyBody>, ProxyError> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = self.context.upstreams.spclient_url(path_and_query);

        // Without a declared length nothing is read from the inbound stream.
        let body = if parts.headers.contains_key(CONTENT_LENGTH) {
            Some(BoundedBody::from_headers(&parts.headers, body)?.boxed_unsync())
        } else {
            None
        };

        let response = self
            .context
            .connector
            .request(parts.method.clone(), &url, Some(&parts.headers), body)
            .await?;

        translate(response)
    }
}

#[async_trait]
impl RouteHandler for PassthroughHandler {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody> {
        or_internal_error(self.name(), self.handle(request).await)
    }
}
