//! Body plumbing shared by the listener, the handlers and the connector.
//!
//! [`BoundedBody`] is the bounded body reader: it wraps a body stream and
//! delivers at most the declared content length, signalling end-of-stream once
//! that many bytes have been handed out, even if the inner stream still has data.

use crate::error::ProxyError;
use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::{Body, Frame, SizeHint};
use hyper::header::{CONTENT_LENGTH, HeaderMap, HeaderValue};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Body type used for every request and response crossing the proxy.
pub type ProxyBody = UnsyncBoxBody<Bytes, hyper::Error>;

pub fn full(data: impl Into<Bytes>) -> ProxyBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub fn empty() -> ProxyBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Parses a `Content-Length` value, `None` if it is not a plain decimal length.
pub fn parse_content_length(value: &HeaderValue) -> Option<u64> {
    value.to_str().ok()?.trim().parse::<u64>().ok()
}

/// Body wrapper that never yields more than `limit` bytes in total.
pub struct BoundedBody<B> {
    inner: B,
    remaining: u64,
}

impl<B> BoundedBody<B> {
    pub fn new(inner: B, limit: u64) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }

    /// Bounds `inner` by the `Content-Length` found in `headers`.
    ///
    /// Fails with [`ProxyError::MissingContentLength`] when the header is
    /// absent; callers only reach for a bounded body when a length was declared.
    pub fn from_headers(headers: &HeaderMap, inner: B) -> Result<Self, ProxyError> {
        let value = headers
            .get(CONTENT_LENGTH)
            .ok_or(ProxyError::MissingContentLength)?;
        let limit = parse_content_length(value)
            .ok_or_else(|| ProxyError::Decode(format!("invalid Content-Length: {:?}", value)))?;
        Ok(Self::new(inner, limit))
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<B> Body for BoundedBody<B>
where
    B: Body<Data = Bytes> + Unpin,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.remaining == 0 {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.inner).poll_frame(cx) {
            Poll::Ready(Some(Ok(frame))) => match frame.into_data() {
                Ok(mut data) => {
                    if data.len() as u64 > self.remaining {
                        data.truncate(self.remaining as usize);
                    }
                    self.remaining -= data.len() as u64;
                    Poll::Ready(Some(Ok(Frame::data(data))))
                }
                Err(trailers) => Poll::Ready(Some(Ok(trailers))),
            },
            other => other,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.remaining == 0 || self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining)
    }
}
