//! Outbound connector.
//!
//! Every call opens its own upstream connection; the client never keeps idle
//! connections around, so a connection lives exactly as long as the response
//! (and its body) that came back on it.

use crate::body::{ProxyBody, empty};
use crate::error::ProxyError;
use crate::translate::copy_end_to_end_headers;
use hyper::body::Incoming;
use hyper::header::{ACCEPT, CONTENT_TYPE, HOST, HeaderMap, HeaderValue, USER_AGENT};
use hyper::{Method, Request, Response, Uri};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use log::debug;
use url::Url;

pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

const AP_RESOLVE_URL: &str = "https://apresolve.spotify.com";
const CLIENT_TOKEN_URL: &str = "https://clienttoken.spotify.com/v1/clienttoken";
// TODO: pick the spclient region from the AP resolve answer instead of pinning gew4.
const SPCLIENT_URL: &str = "https://gew4-spclient.spotify.com";

/// Remote hosts the handlers talk to.
#[derive(Debug, Clone)]
pub struct Upstreams {
    ap_resolve: Url,
    client_token: Url,
    spclient: Url,
}

impl Default for Upstreams {
    fn default() -> Self {
        Self::new(AP_RESOLVE_URL, CLIENT_TOKEN_URL, SPCLIENT_URL)
            .expect("built-in upstream URLs are valid")
    }
}

impl Upstreams {
    pub fn new(ap_resolve: &str, client_token: &str, spclient: &str) -> Result<Self, ProxyError> {
        Ok(Self {
            ap_resolve: Url::parse(ap_resolve)?,
            client_token: Url::parse(client_token)?,
            spclient: Url::parse(spclient)?,
        })
    }

    pub fn ap_resolve_url(&self, query: Option<&str>) -> String {
        format!(
            "{}/?{}",
            self.ap_resolve.as_str().trim_end_matches('/'),
            query.unwrap_or_default()
        )
    }

    pub fn client_token_url(&self) -> &str {
        self.client_token.as_str()
    }

    pub fn spclient_url(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.spclient.as_str().trim_end_matches('/'),
            path_and_query.trim_start_matches('/')
        )
    }
}

pub struct Connector {
    client: Client<HttpsConnector<HttpConnector>, ProxyBody>,
    user_agent: HeaderValue,
}

impl Connector {
    pub fn new(user_agent: &str, accept_invalid_certs: bool) -> Result<Self, ProxyError> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .danger_accept_invalid_hostnames(accept_invalid_certs)
            .build()
            .map_err(|e| ProxyError::Config(format!("Failed to build TLS connector: {}", e)))?;
        let https = HttpsConnector::from((http, tokio_native_tls::TlsConnector::from(tls)));

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(https);

        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|e| ProxyError::Config(format!("Invalid user agent {:?}: {}", user_agent, e)))?;

        Ok(Self { client, user_agent })
    }

    /// Sends one request upstream and returns the raw response.
    ///
    /// `headers: None` sends the request with connection defaults only. With
    /// `Some`, the end-to-end headers are copied and `Content-Type`, `Accept`
    /// and `User-Agent` are forced to the protobuf client values, even when
    /// the supplied map is empty.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: Option<&HeaderMap>,
        body: Option<ProxyBody>,
    ) -> Result<Response<Incoming>, ProxyError> {
        let uri: Uri = url
            .parse()
            .map_err(|e| ProxyError::Connector(format!("Invalid outbound URL {}: {}", url, e)))?;

        let mut request = Request::new(body.unwrap_or_else(empty));
        *request.method_mut() = method;
        *request.uri_mut() = uri;

        if let Some(headers) = headers {
            let outbound = request.headers_mut();
            copy_end_to_end_headers(headers, outbound);
            outbound.remove(HOST);
            outbound.insert(CONTENT_TYPE, HeaderValue::from_static(PROTOBUF_CONTENT_TYPE));
            outbound.insert(ACCEPT, HeaderValue::from_static(PROTOBUF_CONTENT_TYPE));
            outbound.insert(USER_AGENT, self.user_agent.clone());
        }

        debug!("Outbound {} {}", request.method(), request.uri());
        let response = self.client.request(request).await?;
        debug!("Upstream answered {} for {}", response.status(), url);

        Ok(response)
    }
}
