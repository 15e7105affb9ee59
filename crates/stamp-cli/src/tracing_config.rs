//! Log output for the `stamp` binary.
//!
//! Nothing is installed unless `STAMP_LOG` or `RUST_LOG` is set, so a normal
//! run writes only the rewritten document. `STAMP_LOG_FORMAT` picks the
//! layout:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: spans nested by pass and stage via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! STAMP_LOG=debug STAMP_LOG_FORMAT=tree stamp src/Mapping/Mappers.cs
//! STAMP_LOG="stamp_mapper=trace" stamp src/Mapping/Mappers.cs
//! ```
//!
//! Logs go to stderr; stdout carries the document or the `--explain` report.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "STAMP_LOG";
const FORMAT_VAR: &str = "STAMP_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(FORMAT_VAR)
            .map(|name| LogFormat::parse(&name))
            .unwrap_or(LogFormat::Text)
    }
}

/// `STAMP_LOG` wins over `RUST_LOG`.
fn env_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

pub fn logging_requested() -> bool {
    std::env::var_os(LOG_VAR).is_some() || std::env::var_os("RUST_LOG").is_some()
}

/// Install the global subscriber when logging was requested.
pub fn init_tracing() {
    if !logging_requested() {
        return;
    }
    let filter = env_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
    }
}
