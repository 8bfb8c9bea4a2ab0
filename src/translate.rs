//! Turns an upstream response into the response sent back to the local caller.

use crate::body::{BoundedBody, ProxyBody, empty, parse_content_length};
use crate::error::ProxyError;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::header::{CONNECTION, CONTENT_LENGTH, HeaderMap, HeaderName};
use hyper::{Response, StatusCode};

// Hop-by-hop headers describe a single connection and are never relayed.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Header names the sender listed in `Connection`; these are scoped to the
/// connection just like the fixed hop-by-hop set.
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

/// Appends every end-to-end header of `source` to `target`, keeping repeated
/// names repeated.
pub(crate) fn copy_end_to_end_headers(source: &HeaderMap, target: &mut HeaderMap) {
    let scoped = connection_tokens(source);
    for (name, value) in source {
        if is_hop_by_hop(name) || scoped.contains(name) {
            continue;
        }
        target.append(name.clone(), value.clone());
    }
}

/// Maps a numeric status onto a known status; codes without a registered
/// reason phrase are treated as unmappable.
pub fn lookup_status(code: u16) -> Result<StatusCode, ProxyError> {
    StatusCode::from_u16(code)
        .ok()
        .filter(|status| status.canonical_reason().is_some())
        .ok_or_else(|| ProxyError::InvalidResponse(format!("Unmappable status code {}", code)))
}

/// Copies status and every header value (repeated names stay repeated).
///
/// With a `Content-Length` the body is relayed as a stream bounded by that
/// length; without one the response goes out bodiless and the upstream body
/// is dropped unread, which releases its connection.
pub fn translate<B>(response: Response<B>) -> Result<Response<ProxyBody>, ProxyError>
where
    B: Body<Data = Bytes, Error = hyper::Error> + Send + Unpin + 'static,
{
    let (parts, body) = response.into_parts();
    let status = lookup_status(parts.status.as_u16())?;

    let declared_length = match parts.headers.get(CONTENT_LENGTH) {
        Some(value) => Some(parse_content_length(value).ok_or_else(|| {
            ProxyError::InvalidResponse(format!("Invalid Content-Length: {:?}", value))
        })?),
        None => None,
    };

    let body = match declared_length {
        Some(length) => BoundedBody::new(body, length).boxed_unsync(),
        None => empty(),
    };

    let mut translated = Response::new(body);
    *translated.status_mut() = status;

    copy_end_to_end_headers(&parts.headers, translated.headers_mut());

    Ok(translated)
}
