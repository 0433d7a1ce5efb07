// # porkbundyndns
//
// Points a Porkbun A record at this host's current public IP, then exits.
// Run it from cron or a systemd timer to keep the record current.
//
// This is a THIN integration layer: all update logic lives in ddns-core and
// all HTTP in ddns-provider-porkbun. This file only:
// 1. Loads `.env` and reads the log level
// 2. Installs the log formatter
// 3. Builds a single-threaded runtime
// 4. Hands the arguments and configuration to `ddns_core::engine::run`
//
// ## Usage
//
// ```bash
// export PORKBUN_API_KEY=pk1_...
// export PORKBUN_SECRET_KEY=sk1_...
//
// porkbundyndns home.example.com            # use the IP Porkbun sees
// porkbundyndns home.example.com 203.0.113.7 # publish this IP instead
// ```
//
// ## Configuration
//
// - `PORKBUN_API_KEY`, `PORKBUN_SECRET_KEY`: required
// - `PORKBUN_API_URL`: API host override (default https://api.porkbun.com)
// - `DDNS_MODE=dry-run`: read records but do not write
// - `DDNS_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// Failures of the update itself are reported in the log only; the exit
// status stays 0 so schedulers do not treat a provider hiccup as a crash.

mod logging;

use ddns_core::engine::{APPLICATION_NAME, run};
use ddns_core::{Invocation, ProviderConfig};
use std::env;
use std::process::ExitCode;
use tracing::{debug, warn};

/// Exit codes
///
/// Only bootstrap problems (bad log level, runtime creation) are non-zero.
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Run finished, whatever its outcome
    Completed = 0,
    /// The process could not start
    StartupError = 1,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let log_level = match env::var("DDNS_LOG_LEVEL") {
        Ok(value) if !value.is_empty() => match logging::parse_level(&value) {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return DdnsExitCode::StartupError.into();
            }
        },
        _ => tracing::Level::INFO,
    };

    if let Err(e) = logging::init(APPLICATION_NAME, log_level) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::StartupError.into();
    }

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring .env file: {}", e),
    }

    let invocation = Invocation::from_args(env::args().skip(1));

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::StartupError.into();
        }
    };

    let outcome = rt.block_on(run(
        &invocation,
        ProviderConfig::from_env(),
        ddns_provider_porkbun::connect,
    ));
    debug!("Run finished: {:?}", outcome);

    DdnsExitCode::Completed.into()
}
