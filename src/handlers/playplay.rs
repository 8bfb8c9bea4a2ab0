use super::{ProxyContext, RouteHandler, or_internal_error};
use crate::body::{BoundedBody, ProxyBody, full};
use crate::error::ProxyError;
use crate::translate::translate;
use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::header::{CONTENT_LENGTH, HeaderValue};
use hyper::{Method, Request, Response};
use log::debug;
use std::ops::Range;
use std::sync::Arc;

pub const PATH_PREFIX: &str = "/playplay";

pub const PLAYPLAY_TOKEN: [u8; 16] = [
    0x01, 0xAE, 0x93, 0x3B, 0x6E, 0xFB, 0xE8, 0xF3,
    0x53, 0xB8, 0xFD, 0x1A, 0x61, 0x56, 0xBE, 0x94,
];

/// Bytes of the response overwritten with [`PLAYPLAY_TOKEN`]; the first four
/// bytes are the message prefix and stay as they are.
pub const TOKEN_SPAN: Range<usize> = 4..20;

/// Relays playplay key requests and stamps the fixed token into the answer.
pub struct PlayPlayHandler {
    context: Arc<ProxyContext>,
}

impl PlayPlayHandler {
    pub fn new(context: Arc<ProxyContext>) -> Self {
        Self { context }
    }

    async fn handle(&self, request: Request<ProxyBody>) -> Result<Response<ProxyBody>, ProxyError> {
        let (parts, body) = request.into_parts();
        let body = BoundedBody::from_headers(&parts.headers, body)?.boxed_unsync();
        let url = self.context.upstreams.spclient_url(parts.uri.path());

        let response = self
            .context
            .connector
            .request(Method::POST, &url, Some(&parts.headers), Some(body))
            .await?;

        let (mut parts, body) = translate(response)?.into_parts();
        let mut payload = body.collect().await?.to_bytes().to_vec();

        patch_playplay_token(&mut payload)?;
        debug!("Patched playplay response of {} bytes", payload.len());

        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(payload.len()));
        Ok(Response::from_parts(parts, full(payload)))
    }
}

#[async_trait]
impl RouteHandler for PlayPlayHandler {
    fn name(&self) -> &'static str {
        "playplay"
    }

    async fn serve(&self, request: Request<ProxyBody>) -> Response<ProxyBody> {
        or_internal_error(self.name(), self.handle(request).await)
    }
}

/// Overwrites [`TOKEN_SPAN`] with [`PLAYPLAY_TOKEN`], whatever was there.
pub fn patch_playplay_token(payload: &mut [u8]) -> Result<(), ProxyError> {
    if payload.len() < TOKEN_SPAN.end {
        return Err(ProxyError::InvalidResponse(format!(
            "Playplay response is {} bytes, need at least {}",
            payload.len(),
            TOKEN_SPAN.end
        )));
    }

    payload[TOKEN_SPAN].copy_from_slice(&PLAYPLAY_TOKEN);
    Ok(())
}
