//! Values computed once at startup and shared read-only by every handler.

use crate::clienttoken::{
    ClientDataRequest, ClientTokenRequest, ClientTokenRequestType, ConnectivitySdkData,
    NativeIosData, PlatformSpecificData, client_data_request, client_token_request,
    platform_specific_data,
};
use crate::config::ClientMetadata;
use crate::error::ProxyError;

pub const IOS_CLIENT_ID: &str = "58bd3c95768941ea9eb4350aaa033eb3";

/// Reduces a full client version (`iOS-9.0.58.558.g200011c`) to the
/// user-agent version (`9.0.58`): drops everything up to the first `-`
/// and the trailing build number and commit hash.
pub fn short_version(client_version: &str) -> Result<&str, ProxyError> {
    let invalid = || ProxyError::Config(format!("Unsupported client version format: {}", client_version));

    let start = client_version.find('-').map_or(0, |i| i + 1);
    let commit_hash_index = client_version.rfind('.').ok_or_else(invalid)?;
    let end = client_version[..commit_hash_index].rfind('.').ok_or_else(invalid)?;

    if end <= start {
        return Err(invalid());
    }
    Ok(&client_version[start..end])
}

pub fn format_user_agent(client: &ClientMetadata) -> Result<String, ProxyError> {
    Ok(format!(
        "Spotify/{} iOS/{} ({})",
        short_version(&client.client_version)?,
        client.system_version,
        client.hardware_machine
    ))
}

#[derive(Debug, Clone)]
pub struct ClientProfile {
    user_agent: String,
    spoofed_spclient_host: String,
    client_token_template: ClientTokenRequest,
}

impl ClientProfile {
    pub fn new(client: &ClientMetadata, listen_port: u16) -> Result<Self, ProxyError> {
        let client_token_template = ClientTokenRequest {
            request_type: ClientTokenRequestType::RequestClientDataRequest as i32,
            request: Some(client_token_request::Request::ClientData(ClientDataRequest {
                client_version: client.client_version.clone(),
                client_id: IOS_CLIENT_ID.to_string(),
                data: Some(client_data_request::Data::ConnectivitySdkData(ConnectivitySdkData {
                    platform_specific_data: Some(PlatformSpecificData {
                        data: Some(platform_specific_data::Data::Ios(NativeIosData {
                            hw_machine: client.hardware_machine.clone(),
                            system_version: client.system_version.clone(),
                            ..Default::default()
                        })),
                    }),
                    device_id: String::new(),
                })),
            })),
        };

        Ok(Self {
            user_agent: format_user_agent(client)?,
            spoofed_spclient_host: format!("localhost:{}", listen_port),
            client_token_template,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Host advertised in place of the real spclient hosts.
    pub fn spoofed_spclient_host(&self) -> &str {
        &self.spoofed_spclient_host
    }

    /// Canonical client-data request carrying `device_id`; the template itself
    /// is never touched.
    pub fn client_token_request(&self, device_id: &str) -> ClientTokenRequest {
        let mut request = self.client_token_template.clone();
        if let Some(client_token_request::Request::ClientData(data)) = &mut request.request {
            if let Some(client_data_request::Data::ConnectivitySdkData(sdk)) = &mut data.data {
                sdk.device_id = device_id.to_string();
            }
        }
        request
    }
}
