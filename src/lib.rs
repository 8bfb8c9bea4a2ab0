pub mod body;
pub mod clienttoken;
pub mod config;
pub mod config_validation;
pub mod connector;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod profile;
pub mod router;
pub mod server;
pub mod translate;

pub use config::Config;
pub use connector::Upstreams;
pub use error::ProxyError;
pub use server::RequestListener;
