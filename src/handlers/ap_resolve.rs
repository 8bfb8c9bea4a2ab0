use super::{ProxyContext, RouteHandler, ensure_success, ok_response, or_internal_error};
use crate::body::ProxyBody;
use crate::error::ProxyError;
use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::{Method, Request, Response};
use log::{debug, info};
use serde_json::{Value, json};
use std::sync::Arc;

pub const PATH_PREFIX: &str = "/ap";
pub const JSON_CONTENT_TYPE: &str = "application/json";

const SPCLIENT_FIELD: &str = "spclient";

/// Asks the real resolver for access points and points the advertised
/// spclient hosts back at this listener.
pub struct ApResolveHandler {
    context: Arc<ProxyContext>,
}

impl ApResolveHandler {
    pub fn new(context: Arc<ProxyContext>) -> Self {
        Self { context }
    }

    async fn handle(&self, request: Request<ProxyBody>) -> Result<Response<ProxyBody>, ProxyError> {
        let url = self.context.upstreams.ap_resolve_url(request.uri().query());
        drop(request);

        let response = self
            .context
            .connector
            .request(Method::GET, &url, None, None)
            .await?;
        ensure_success(&response)?;

        let body = response.into_body().collect().await?.to_bytes();
        let document = String::from_utf8(body.to_vec())?;

        let spoofed = spoof_spclient_hosts(&document, self.context.profile.spoofed_spclient_host())?;
        Ok(ok_response(JSON_CONTENT_TYPE, spoofed))
    }
}

#[async_trait]
impl RouteHandler for ApResolveHandler {
    fn name(&self) -> &'static str {
        "ap-resolve"
    }

    async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody> {
        or_internal_error(self.name(), self.handle(request).await)
    }
}

/// Replaces the `spclient` host list with the single `host`.
///
/// A document without the field comes back byte-for-byte; anything that is
/// not a JSON object is a decode error.
pub fn spoof_spclient_hosts(document: &str, host: &str) -> Result<String, ProxyError> {
    let mut value: Value = serde_json::from_str(document)?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| ProxyError::Decode("AP resolve response is not a JSON object".to_string()))?;

    if !object.contains_key(SPCLIENT_FIELD) {
        debug!("AP resolve response has no {} hosts, relaying as is", SPCLIENT_FIELD);
        return Ok(document.to_string());
    }

    object.insert(SPCLIENT_FIELD.to_string(), json!([host]));
    let spoofed = serde_json::to_string(&value)?;
    info!("Spoofed AP resolve response: {}", spoofed);

    Ok(spoofed)
}
