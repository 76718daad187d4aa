use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;
use crate::error::CliError;

/// Environment variable whose value replaces `--log-level` entirely.
pub const LOG_FILTER_ENV: &str = "WATCHSIFT_LOG";

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the report.
pub fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<(), CliError> {
    let filter = std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| log_level.to_string());
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|err| CliError::Logging(format!("invalid log filter: {err}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|err| CliError::Logging(err.to_string()))
}
