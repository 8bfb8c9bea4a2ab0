//! Startup validation of the configuration.
//!
//! Errors stop the service before the listener is bound; warnings are only
//! logged.

use crate::config::{Config, LogOutputType};
use crate::error::ProxyError;
use crate::profile::format_user_agent;
use hyper::header::HeaderValue;

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
            warnings: vec![],
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Logs the warnings and folds the errors into a single config error.
    pub fn into_result(self) -> Result<(), ProxyError> {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
        if self.is_valid {
            Ok(())
        } else {
            Err(ProxyError::Config(self.errors.join("; ")))
        }
    }
}

pub fn validate(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::success();

    validate_client(config, &mut result);
    validate_listener(config, &mut result);
    validate_logging(config, &mut result);

    if config.accept_invalid_upstream_certs {
        result.add_warning(
            "Upstream certificate validation is disabled; only use this against trusted networks".to_string(),
        );
    }

    result
}

fn validate_client(config: &Config, result: &mut ValidationResult) {
    let client = &config.client;

    if client.system_version.trim().is_empty() {
        result.add_error("client.system_version cannot be empty".to_string());
    }
    if client.hardware_machine.trim().is_empty() {
        result.add_error("client.hardware_machine cannot be empty".to_string());
    }

    match format_user_agent(client) {
        Ok(user_agent) => {
            if HeaderValue::from_str(&user_agent).is_err() {
                result.add_error(format!("User agent {:?} is not a valid header value", user_agent));
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }
}

fn validate_listener(config: &Config, result: &mut ValidationResult) {
    if config.listen_port == 0 {
        result.add_warning(
            "listen_port is 0; an ephemeral port will be advertised as the spclient host".to_string(),
        );
    } else if config.listen_port < 1024 {
        result.add_warning(format!(
            "Using privileged port {} - may require elevated privileges",
            config.listen_port
        ));
    }
}

fn validate_logging(config: &Config, result: &mut ValidationResult) {
    let Some(targets) = config.logging.as_ref().and_then(|l| l.targets.as_ref()) else {
        return;
    };

    for target in targets {
        if target.output_type == LogOutputType::File && target.path.is_none() {
            result.add_error("File log target requires a path".to_string());
        }
    }
}
