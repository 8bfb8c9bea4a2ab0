use super::{ProxyContext, RouteHandler, ensure_success, ok_response, or_internal_error};
use crate::body::{BoundedBody, ProxyBody, full};
use crate::clienttoken::{ClientTokenRequest, ClientTokenRequestType, ClientTokenResponse};
use crate::connector::PROTOBUF_CONTENT_TYPE;
use crate::error::ProxyError;
use crate::profile::ClientProfile;
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::header::HeaderMap;
use hyper::{Method, Request, Response};
use log::info;
use prost::Message;
use std::sync::Arc;

pub const PATH_PREFIX: &str = "/v1/clienttoken";

/// Brokers client-token requests so that client-data requests reach the token
/// service as the iOS client.
pub struct ClientTokenHandler {
    context: Arc<ProxyContext>,
}

impl ClientTokenHandler {
    pub fn new(context: Arc<ProxyContext>) -> Self {
        Self { context }
    }

    async fn handle(&self, request: Request<ProxyBody>) -> Result<Response<ProxyBody>, ProxyError> {
        let (parts, body) = request.into_parts();
        let inbound = BoundedBody::from_headers(&parts.headers, body)?
            .collect()
            .await?
            .to_bytes();

        let outbound = rewrite_client_token_request(&inbound, &self.context.profile)?;

        // An empty header map still gets the protobuf overrides.
        let response = self
            .context
            .connector
            .request(
                Method::POST,
                self.context.upstreams.client_token_url(),
                Some(&HeaderMap::new()),
                Some(full(outbound)),
            )
            .await?;
        ensure_success(&response)?;

        // Decoded only to validate and log; the client gets the upstream bytes,
        // fields this schema does not know included.
        let body = response.into_body().collect().await?.to_bytes();
        let token_response = ClientTokenResponse::decode(body.clone())?;
        info!("Response of type: {:?}", token_response.response_type());

        Ok(ok_response(PROTOBUF_CONTENT_TYPE, body))
    }
}

#[async_trait]
impl RouteHandler for ClientTokenHandler {
    fn name(&self) -> &'static str {
        "client-token"
    }

    async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody> {
        or_internal_error(self.name(), self.handle(request).await)
    }
}

/// Decodes an inbound token request and produces the bytes to send upstream.
///
/// Only client-data requests are rebuilt, from the profile template plus the
/// caller's device id. Every other request type is relayed as the exact bytes
/// that came in.
pub fn rewrite_client_token_request(inbound: &Bytes, profile: &ClientProfile) -> Result<Bytes, ProxyError> {
    let request = ClientTokenRequest::decode(inbound.clone())?;
    info!("Request of type: {:?}", request.request_type());

    if request.request_type() != ClientTokenRequestType::RequestClientDataRequest {
        return Ok(inbound.clone());
    }

    info!("Requesting iOS client token");
    let substituted = profile.client_token_request(request.device_id());
    Ok(Bytes::from(substituted.encode_to_vec()))
}
