//! Client-token wire messages.
//!
//! Hand-written `prost` definitions of the client-token HTTP API and the
//! connectivity SDK data it embeds. Field tags must match what the token
//! service speaks; names follow the upstream schema.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientTokenRequest {
    #[prost(enumeration = "ClientTokenRequestType", tag = "1")]
    pub request_type: i32,
    #[prost(oneof = "client_token_request::Request", tags = "2, 3")]
    pub request: Option<client_token_request::Request>,
}

pub mod client_token_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "2")]
        ClientData(super::ClientDataRequest),
        #[prost(message, tag = "3")]
        ChallengeAnswers(super::ChallengeAnswersRequest),
    }
}

impl ClientTokenRequest {
    pub fn client_data(&self) -> Option<&ClientDataRequest> {
        match &self.request {
            Some(client_token_request::Request::ClientData(data)) => Some(data),
            _ => None,
        }
    }

    /// Device id carried in the connectivity SDK data, empty when absent.
    pub fn device_id(&self) -> &str {
        self.client_data()
            .and_then(|data| data.connectivity_sdk_data())
            .map(|sdk| sdk.device_id.as_str())
            .unwrap_or_default()
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientDataRequest {
    #[prost(string, tag = "1")]
    pub client_version: String,
    #[prost(string, tag = "2")]
    pub client_id: String,
    #[prost(oneof = "client_data_request::Data", tags = "3")]
    pub data: Option<client_data_request::Data>,
}

pub mod client_data_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "3")]
        ConnectivitySdkData(super::ConnectivitySdkData),
    }
}

impl ClientDataRequest {
    pub fn connectivity_sdk_data(&self) -> Option<&ConnectivitySdkData> {
        match &self.data {
            Some(client_data_request::Data::ConnectivitySdkData(sdk)) => Some(sdk),
            None => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChallengeAnswersRequest {
    #[prost(string, tag = "1")]
    pub state: String,
    #[prost(message, repeated, tag = "2")]
    pub answers: Vec<ChallengeAnswer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChallengeAnswer {
    #[prost(enumeration = "ChallengeType", tag = "1")]
    pub challenge_type: i32,
    #[prost(oneof = "challenge_answer::Answer", tags = "2, 3, 4")]
    pub answer: Option<challenge_answer::Answer>,
}

pub mod challenge_answer {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Answer {
        #[prost(message, tag = "2")]
        ClientSecret(super::ClientSecretHmacAnswer),
        #[prost(message, tag = "3")]
        EvaluateJs(super::EvaluateJsAnswer),
        #[prost(message, tag = "4")]
        HashCash(super::HashCashAnswer),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientSecretHmacAnswer {
    #[prost(string, tag = "1")]
    pub hmac: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvaluateJsAnswer {
    #[prost(string, tag = "1")]
    pub result: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HashCashAnswer {
    #[prost(string, tag = "1")]
    pub suffix: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientTokenResponse {
    #[prost(enumeration = "ClientTokenResponseType", tag = "1")]
    pub response_type: i32,
    #[prost(oneof = "client_token_response::Response", tags = "2, 3")]
    pub response: Option<client_token_response::Response>,
}

pub mod client_token_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "2")]
        GrantedToken(super::GrantedTokenResponse),
        #[prost(message, tag = "3")]
        Challenges(super::ChallengesResponse),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrantedTokenResponse {
    #[prost(string, tag = "1")]
    pub token: String,
    #[prost(int32, tag = "2")]
    pub expires_after_seconds: i32,
    #[prost(int32, tag = "3")]
    pub refresh_after_seconds: i32,
    #[prost(message, repeated, tag = "4")]
    pub domains: Vec<TokenDomain>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenDomain {
    #[prost(string, tag = "1")]
    pub domain: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChallengesResponse {
    #[prost(string, tag = "1")]
    pub state: String,
    #[prost(message, repeated, tag = "2")]
    pub challenges: Vec<Challenge>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Challenge {
    #[prost(enumeration = "ChallengeType", tag = "1")]
    pub challenge_type: i32,
    #[prost(oneof = "challenge::Parameters", tags = "2, 3, 4")]
    pub parameters: Option<challenge::Parameters>,
}

pub mod challenge {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Parameters {
        #[prost(message, tag = "2")]
        ClientSecretParameters(super::ClientSecretParameters),
        #[prost(message, tag = "3")]
        EvaluateJsParameters(super::EvaluateJsParameters),
        #[prost(message, tag = "4")]
        EvaluateHashcashParameters(super::HashCashParameters),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientSecretParameters {
    #[prost(string, tag = "1")]
    pub salt: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvaluateJsParameters {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, repeated, tag = "2")]
    pub libraries: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HashCashParameters {
    #[prost(int32, tag = "1")]
    pub length: i32,
    #[prost(string, tag = "2")]
    pub prefix: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectivitySdkData {
    #[prost(message, optional, tag = "1")]
    pub platform_specific_data: Option<PlatformSpecificData>,
    #[prost(string, tag = "2")]
    pub device_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformSpecificData {
    #[prost(oneof = "platform_specific_data::Data", tags = "1, 2, 4, 5, 6")]
    pub data: Option<platform_specific_data::Data>,
}

pub mod platform_specific_data {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        Android(super::NativeAndroidData),
        #[prost(message, tag = "2")]
        Ios(super::NativeIosData),
        #[prost(message, tag = "4")]
        DesktopMacos(super::NativeDesktopMacOsData),
        #[prost(message, tag = "5")]
        DesktopWindows(super::NativeDesktopWindowsData),
        #[prost(message, tag = "6")]
        DesktopLinux(super::NativeDesktopLinuxData),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeAndroidData {
    #[prost(message, optional, tag = "1")]
    pub screen_dimensions: Option<Screen>,
    #[prost(string, tag = "2")]
    pub android_version: String,
    #[prost(int32, tag = "3")]
    pub api_version: i32,
    #[prost(string, tag = "4")]
    pub device_name: String,
    #[prost(string, tag = "5")]
    pub model_str: String,
    #[prost(string, tag = "6")]
    pub vendor: String,
    #[prost(string, tag = "7")]
    pub vendor_2: String,
    #[prost(int32, tag = "8")]
    pub unknown_value_8: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeIosData {
    #[prost(int32, tag = "1")]
    pub user_interface_idiom: i32,
    #[prost(bool, tag = "2")]
    pub target_iphone_simulator: bool,
    #[prost(string, tag = "3")]
    pub hw_machine: String,
    #[prost(string, tag = "4")]
    pub system_version: String,
    #[prost(string, tag = "5")]
    pub simulator_model_identifier: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeDesktopMacOsData {
    #[prost(string, tag = "1")]
    pub system_version: String,
    #[prost(string, tag = "2")]
    pub hw_model: String,
    #[prost(string, tag = "3")]
    pub compiled_cpu_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeDesktopWindowsData {
    #[prost(int32, tag = "1")]
    pub os_version: i32,
    #[prost(int32, tag = "3")]
    pub os_build: i32,
    #[prost(int32, tag = "4")]
    pub platform_id: i32,
    #[prost(int32, tag = "5")]
    pub unknown_value_5: i32,
    #[prost(int32, tag = "6")]
    pub unknown_value_6: i32,
    #[prost(int32, tag = "7")]
    pub image_file_machine: i32,
    #[prost(int32, tag = "8")]
    pub pe_machine: i32,
    #[prost(bool, tag = "10")]
    pub unknown_value_10: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NativeDesktopLinuxData {
    #[prost(string, tag = "1")]
    pub system_name: String,
    #[prost(string, tag = "2")]
    pub system_release: String,
    #[prost(string, tag = "3")]
    pub system_version: String,
    #[prost(string, tag = "4")]
    pub hardware: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Screen {
    #[prost(int32, tag = "1")]
    pub width: i32,
    #[prost(int32, tag = "2")]
    pub height: i32,
    #[prost(int32, tag = "3")]
    pub density: i32,
    #[prost(int32, tag = "4")]
    pub unknown_value_4: i32,
    #[prost(int32, tag = "5")]
    pub unknown_value_5: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClientTokenRequestType {
    RequestUnknown = 0,
    RequestClientDataRequest = 1,
    RequestChallengeAnswersRequest = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClientTokenResponseType {
    ResponseUnknown = 0,
    ResponseGrantedTokenResponse = 1,
    ResponseChallengesResponse = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ChallengeType {
    ChallengeUnknown = 0,
    ChallengeClientSecretHmac = 1,
    ChallengeEvaluateJs = 2,
    ChallengeHashCash = 3,
}
