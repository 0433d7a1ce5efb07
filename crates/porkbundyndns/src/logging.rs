//! Log line format
//!
//! Every physical line is written as `{unix_millis} {app}]| {text}`. A message
//! containing newlines becomes several lines, each with its own prefix.

use anyhow::Result;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter that prefixes each line with a timestamp and the app name
#[derive(Debug, Clone)]
pub struct PrefixedLines {
    app_name: &'static str,
    clock: fn() -> i64,
}

impl PrefixedLines {
    pub fn new(app_name: &'static str) -> Self {
        Self::with_clock(app_name, || chrono::Utc::now().timestamp_millis())
    }

    /// Same format with a fixed time source
    pub fn with_clock(app_name: &'static str, clock: fn() -> i64) -> Self {
        Self { app_name, clock }
    }
}

impl<S, N> FormatEvent<S, N> for PrefixedLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut text = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut text), event)?;

        let millis = (self.clock)();
        for line in text.split('\n') {
            writeln!(writer, "{} {}]| {}", millis, self.app_name, line)?;
        }
        Ok(())
    }
}

/// Parse a `DDNS_LOG_LEVEL` value
pub fn parse_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "DDNS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            value
        ),
    }
}

/// Install the global subscriber
pub fn init(app_name: &'static str, level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .event_format(PrefixedLines::new(app_name))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
