use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start request listener on {addr}: {source}")]
    Listener {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Connector I/O failure: {0}")]
    Connector(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Request has no Content-Length header")]
    MissingContentLength,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<hyper::Error> for ProxyError {
    fn from(e: hyper::Error) -> Self {
        ProxyError::Connector(e.to_string())
    }
}

impl From<hyper_util::client::legacy::Error> for ProxyError {
    fn from(e: hyper_util::client::legacy::Error) -> Self {
        // The legacy client hides the interesting part in the source chain.
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ProxyError::Connector(message)
    }
}

impl From<prost::DecodeError> for ProxyError {
    fn from(e: prost::DecodeError) -> Self {
        ProxyError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(e: serde_json::Error) -> Self {
        ProxyError::Decode(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ProxyError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ProxyError::Decode(e.to_string())
    }
}
