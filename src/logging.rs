use crate::config::{LogFormat, LogLevel, LogOutputType, LoggingConfig};
use crate::error::ProxyError;
use chrono::{DateTime, Utc};
use log::{LevelFilter, Metadata, Record};
use serde_json::json;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

struct Sink {
    level: LevelFilter,
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
}

pub struct CustomLogger {
    format: LogFormat,
    sinks: Vec<Sink>,
}

impl CustomLogger {
    pub fn new(config: &LoggingConfig) -> Result<Self, ProxyError> {
        let default_level = config.level.unwrap_or_default();
        let targets = config.targets.clone().unwrap_or_default();

        let mut sinks = Vec::with_capacity(targets.len());
        for target in targets {
            let writer: Box<dyn Write + Send> = match target.output_type {
                LogOutputType::Stdout => Box::new(std::io::stdout()),
                LogOutputType::File => {
                    let path = target
                        .path
                        .as_ref()
                        .ok_or_else(|| ProxyError::Config("File output type requires path".to_string()))?;
                    let file = OpenOptions::new().create(true).append(true).open(path)?;
                    Box::new(file)
                }
            };
            sinks.push(Sink {
                level: target.level.unwrap_or(default_level).to_level_filter(),
                writer: Mutex::new(BufWriter::new(writer)),
            });
        }

        Ok(Self {
            format: config.format.unwrap_or_default(),
            sinks,
        })
    }

    pub fn init(config: &LoggingConfig) -> Result<(), ProxyError> {
        let logger = Self::new(config)?;
        let max_level = logger.max_level();
        log::set_boxed_logger(Box::new(logger))
            .map_err(|e| ProxyError::Config(format!("Logger already initialised: {}", e)))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn max_level(&self) -> LevelFilter {
        self.sinks
            .iter()
            .map(|sink| sink.level)
            .max()
            .unwrap_or(LevelFilter::Off)
    }

    fn format_text(&self, record: &Record) -> String {
        let timestamp: DateTime<Utc> = Utc::now();
        format!(
            "{} [{}] [{}] {}",
            timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    fn format_json(&self, record: &Record) -> String {
        let timestamp: DateTime<Utc> = Utc::now();
        json!({
            "timestamp": timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "level": record.level().to_string().to_lowercase(),
            "target": record.target(),
            "module": record.module_path().unwrap_or("unknown"),
            "line": record.line().unwrap_or(0),
            "message": record.args().to_string(),
        })
        .to_string()
    }
}

impl log::Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.sinks.iter().any(|sink| metadata.level() <= sink.level)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = match self.format {
            LogFormat::Text => self.format_text(record),
            LogFormat::Json => self.format_json(record),
        };

        for sink in &self.sinks {
            if record.level() > sink.level {
                continue;
            }
            if let Ok(mut writer) = sink.writer.lock() {
                let _ = writeln!(writer, "{}", message);
                let _ = writer.flush();
            }
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            if let Ok(mut writer) = sink.writer.lock() {
                let _ = writer.flush();
            }
        }
    }
}

/// env_logger based setup used when the configuration has no logging section.
/// `RUST_LOG` still wins over `level`.
pub fn init_fallback(level: LogLevel, format: LogFormat) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()));

    if format == LogFormat::Json {
        builder.format(|buf, record| {
            let timestamp: DateTime<Utc> = Utc::now();
            let entry = json!({
                "timestamp": timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
                "level": record.level().to_string().to_lowercase(),
                "target": record.target(),
                "message": record.args().to_string(),
            });
            writeln!(buf, "{}", entry)
        });
    }

    builder.init();
}

/// Installs the configured logger, or the env_logger fallback.
pub fn init(config: Option<&LoggingConfig>) -> Result<(), ProxyError> {
    match config {
        Some(config) if config.targets.as_ref().is_some_and(|t| !t.is_empty()) => {
            CustomLogger::init(config)
        }
        Some(config) => {
            init_fallback(config.level.unwrap_or_default(), config.format.unwrap_or_default());
            Ok(())
        }
        None => {
            init_fallback(LogLevel::Info, LogFormat::Text);
            Ok(())
        }
    }
}

pub fn parse_log_level(s: &str) -> Result<LogLevel, ProxyError> {
    match s.to_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        _ => Err(ProxyError::Config(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            s
        ))),
    }
}

pub fn parse_log_format(s: &str) -> Result<LogFormat, ProxyError> {
    match s.to_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(ProxyError::Config(format!(
            "Invalid log format: {}. Must be one of: text, json",
            s
        ))),
    }
}
