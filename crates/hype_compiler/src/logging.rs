//! Tracing setup.
//!
//! The subscriber is only installed when `HYPE_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! HYPE_LOG=debug hype program.json
//! HYPE_LOG="hype_checker=trace" HYPE_LOG_FORMAT=json hype program.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines (default).
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("HYPE_LOG_FORMAT").unwrap_or_default())
    }
}

/// `HYPE_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("HYPE_LOG") {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Does nothing when neither `HYPE_LOG` nor `RUST_LOG` is set, or when a
/// subscriber is already installed.
pub fn init_tracing() {
    if std::env::var("HYPE_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    let result = match LogFormat::from_env() {
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(err) = result {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}
