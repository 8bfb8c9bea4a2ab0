//! Endpoint handlers.
//!
//! Each handler does its work in a fallible `handle` method and implements
//! [`RouteHandler::serve`] by turning any error into the uniform internal-error
//! response. The cause goes to the log, never into the response.

pub mod ap_resolve;
pub mod client_token;
pub mod passthrough;
pub mod playplay;

use crate::body::{ProxyBody, empty, full};
use crate::connector::{Connector, PROTOBUF_CONTENT_TYPE, Upstreams};
use crate::error::ProxyError;
use crate::profile::ClientProfile;
use async_trait::async_trait;
use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{Request, Response, StatusCode};
use log::error;

pub use ap_resolve::ApResolveHandler;
pub use client_token::ClientTokenHandler;
pub use passthrough::PassthroughHandler;
pub use playplay::PlayPlayHandler;

#[async_trait]
pub trait RouteHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails: errors become [`internal_error_response`].
    async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody>;
}

/// Everything a handler needs besides the request; built once at startup.
pub struct ProxyContext {
    pub profile: ClientProfile,
    pub upstreams: Upstreams,
    pub connector: Connector,
}

/// Status 500, protobuf content type, empty body.
pub fn internal_error_response() -> Response<ProxyBody> {
    let mut response = Response::new(empty());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(PROTOBUF_CONTENT_TYPE));
    response
}

pub(crate) fn ok_response(content_type: &'static str, body: impl Into<Bytes>) -> Response<ProxyBody> {
    let mut response = Response::new(full(body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

pub(crate) fn or_internal_error(
    handler: &'static str,
    result: Result<Response<ProxyBody>, ProxyError>,
) -> Response<ProxyBody> {
    result.unwrap_or_else(|e| {
        error!("{} request failed: {}", handler, e);
        internal_error_response()
    })
}

/// Token and resolver calls treat any non-2xx answer as a failed call.
/// Redirects are not followed, so a 3xx fails too.
pub(crate) fn ensure_success<B>(response: &Response<B>) -> Result<(), ProxyError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ProxyError::Connector(format!(
            "Upstream answered with status {}",
            response.status()
        )))
    }
}
