use std::fmt;
use std::io::{Error, ErrorKind};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Supported log format types
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plain => write!(f, "plain"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

fn build_filter(log_level: &str) -> Result<EnvFilter, Error> {
    EnvFilter::try_new(log_level).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid log level {:?}: {}", log_level, e),
        )
    })
}

pub fn init_logger(log_level: &str, log_format: &str, is_production: bool) -> Result<(), Error> {
    let filter = build_filter(log_level)?;
    let format = LogFormat::from(log_format);

    let result = if is_production {
        // Production: no timestamps, the collector adds its own
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .without_time();

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Plain => builder.try_init(),
        }
    } else {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Plain => builder.try_init(),
        }
    };

    result.map_err(|e| Error::new(ErrorKind::AlreadyExists, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from("json"), LogFormat::Json);
        assert_eq!(LogFormat::from("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from("plain"), LogFormat::Plain);
        assert_eq!(LogFormat::from("invalid"), LogFormat::Plain);
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Plain.to_string(), "plain");
    }

    #[test]
    fn test_build_filter_accepts_config_levels() {
        for level in [
            "info",
            "info,sqlx=warn",
            "debug,sqlx=warn,tower_http=debug",
        ] {
            assert!(build_filter(level).is_ok(), "{} should parse", level);
        }
    }

    #[test]
    fn test_build_filter_rejects_bad_level() {
        let err = build_filter("info,sqlx=loud").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("sqlx=loud"));
    }
}
