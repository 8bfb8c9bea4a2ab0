use clap::Parser;
use log::{error, info};
use spoof_client_proxy::config::LoggingConfig;
use spoof_client_proxy::logging::{self, parse_log_format, parse_log_level};
use spoof_client_proxy::{Config, RequestListener, config_validation};
use std::path::Path;
use tokio::signal;

#[derive(Parser)]
#[clap(
    version,
    about = "Local reverse proxy that spoofs client-token, AP resolve and playplay traffic"
)]
struct Args {
    #[clap(short, long, value_name = "PORT", help = "Loopback port to listen on (default: 4345)")]
    port: Option<u16>,

    #[clap(short, long, value_name = "FILE", help = "Configuration file path")]
    config: Option<String>,

    #[clap(long, value_name = "FILE", help = "Generate a sample configuration file")]
    generate_config: Option<String>,

    #[clap(long, value_name = "VERSION", help = "Full client version, e.g. iOS-9.0.58.558.g200011c")]
    client_version: Option<String>,

    #[clap(long, value_name = "VERSION", help = "OS version reported in the user agent")]
    system_version: Option<String>,

    #[clap(long, value_name = "MODEL", help = "Hardware machine identifier, e.g. iPhone16,1")]
    hardware_machine: Option<String>,

    #[clap(long, help = "Accept invalid upstream TLS certificates")]
    accept_invalid_upstream_certs: bool,

    #[clap(long, value_name = "LEVEL", help = "Log level: trace, debug, info, warn, error")]
    log_level: Option<String>,

    #[clap(long, value_name = "FORMAT", help = "Log format: text or json")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(config_file) = &args.generate_config {
        Config::default().to_file(config_file)?;
        println!("Sample configuration file generated: {}", config_file);
        return Ok(());
    }

    let mut config = if let Some(config_file) = &args.config {
        if !Path::new(config_file).exists() {
            return Err(format!("Configuration file not found: {}", config_file).into());
        }
        Config::from_file(config_file)?
    } else {
        Config::default()
    };
    apply_args(&mut config, &args)?;

    logging::init(config.logging.as_ref())?;
    config_validation::validate(&config).into_result()?;

    let listener = RequestListener::bind(&config).await?;
    info!("Starting request listener...");

    let server_handle = tokio::spawn(listener.run());

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
        result = server_handle => {
            match result {
                Ok(Err(e)) => error!("Server error: {}", e),
                Err(e) => error!("Server task error: {}", e),
                Ok(Ok(())) => {}
            }
        }
    }

    info!("Request listener stopped");
    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = args.port {
        config.listen_port = port;
    }
    if let Some(client_version) = &args.client_version {
        config.client.client_version = client_version.clone();
    }
    if let Some(system_version) = &args.system_version {
        config.client.system_version = system_version.clone();
    }
    if let Some(hardware_machine) = &args.hardware_machine {
        config.client.hardware_machine = hardware_machine.clone();
    }
    if args.accept_invalid_upstream_certs {
        config.accept_invalid_upstream_certs = true;
    }

    if args.log_level.is_some() || args.log_format.is_some() {
        let logging = config.logging.get_or_insert_with(|| LoggingConfig {
            level: None,
            format: None,
            targets: None,
        });
        if let Some(level) = &args.log_level {
            logging.level = Some(parse_log_level(level)?);
        }
        if let Some(format) = &args.log_format {
            logging.format = Some(parse_log_format(format)?);
        }
    }

    Ok(())
}
