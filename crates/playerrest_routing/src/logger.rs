// This module setup the logger level.

use std::str::FromStr;

pub fn setup(logger_level: &str) {
    let level = tracing::Level::from_str(logger_level).unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt().with_max_level(level).init();
}
