//! Core DDNS engine
//!
//! The engine runs one pass of the update flow and returns. Periodic updates
//! come from invoking the binary on a schedule, not from a loop in here.
//!
//! ## Flow
//!
//! ```text
//! domain arg? ──no──▶ usage
//!     │
//! credentials? ──no──▶ missing configuration
//!     │
//! explicit ip or IpSource::current() ──error──▶ stop
//!     │
//! DnsProvider::current_record() ──equal──▶ unchanged
//!     │
//! DnsProvider::update_record()
//! ```
//!
//! Every remote failure is logged here and turned into a "no value" result.
//! Nothing is retried.

use crate::config::ProviderConfig;
use crate::domain::{DomainParts, split_domain};
use crate::error::Result;
use crate::traits::{CurrentRecord, DnsProvider, IpSource, UpdateResult};
use tracing::{debug, info, warn};

/// Name used in log lines and the usage text
pub const APPLICATION_NAME: &str = "porkbundyndns";

/// Printed when no domain argument is given
pub const HELP_TEXT: &str = "Usage: porkbundyndns <domain> [ip]\n\
    Requires 1 argument domain, can optionally provide 2nd argument ip";

/// Command-line arguments of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Fully-qualified name whose A record is managed
    pub domain: Option<String>,
    /// IP to publish instead of asking the IP source
    pub explicit_ip: Option<String>,
}

impl Invocation {
    /// Build from positional arguments (program name already stripped)
    ///
    /// Empty strings count as absent. Anything past the second argument is
    /// ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(|arg| {
            let arg: String = arg.into();
            Some(arg).filter(|a| !a.is_empty())
        });

        Self {
            domain: args.next().flatten(),
            explicit_ip: args.next().flatten(),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No domain argument; usage was logged
    Usage,
    /// Credentials or provider settings missing or invalid
    MissingConfiguration,
    /// No explicit IP and the IP source produced none
    NoTargetIp,
    /// The record already holds the target IP
    Unchanged {
        /// The published IP
        ip: String,
    },
    /// The record was overwritten
    Updated {
        /// The IP that was written
        ip: String,
    },
    /// Dry-run: the write was logged instead of sent
    DryRun {
        /// The IP that would have been written
        ip: String,
    },
    /// The provider rejected the write
    UpdateFailed {
        /// The IP that was attempted
        ip: String,
    },
}

/// Core DDNS engine
///
/// Holds one IP source and one DNS provider, both already configured with
/// credentials. All calls are awaited one after the other.
pub struct DdnsEngine {
    /// IP source for discovery
    ip_source: Box<dyn IpSource>,

    /// DNS provider for reading and writing records
    provider: Box<dyn DnsProvider>,
}

impl std::fmt::Debug for DdnsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsEngine")
            .field("ip_source", &self.ip_source.source_name())
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl DdnsEngine {
    /// Create a new DDNS engine
    pub fn new(ip_source: Box<dyn IpSource>, provider: Box<dyn DnsProvider>) -> Self {
        Self {
            ip_source,
            provider,
        }
    }

    /// Resolve the IP to publish
    ///
    /// A non-empty explicit IP is returned as is and the IP source is not
    /// consulted.
    pub async fn discover_ip(&self, explicit_ip: Option<&str>) -> Option<String> {
        if let Some(ip) = explicit_ip.filter(|ip| !ip.is_empty()) {
            debug!("Using explicit IP {}", ip);
            return Some(ip.to_string());
        }

        match self.ip_source.current().await {
            Ok(ip) if !ip.is_empty() => {
                debug!("{} reported IP {}", self.ip_source.source_name(), ip);
                Some(ip)
            }
            Ok(_) => {
                warn!("{} reported an empty IP", self.ip_source.source_name());
                None
            }
            Err(e) => {
                warn!("Could not ping {}: {}", self.ip_source.source_name(), e);
                None
            }
        }
    }

    /// Read the IP currently published for `domain`
    ///
    /// Returns an empty string when the value is unknown: request failure,
    /// no record, or more than one record.
    pub async fn read_current_ip(&self, domain: &DomainParts) -> String {
        match self.provider.current_record(domain).await {
            Ok(CurrentRecord::Single(content)) => content,
            Ok(CurrentRecord::Missing) => {
                debug!("No A record published for {}", domain);
                String::new()
            }
            Ok(CurrentRecord::Ambiguous(count)) => {
                debug!("{} A records published for {}, treating as unknown", count, domain);
                String::new()
            }
            Err(e) => {
                warn!("Could not get DNS records: {}", e);
                String::new()
            }
        }
    }

    /// Overwrite the A record for `domain`
    ///
    /// Returns `Updated`, `DryRun` or `UpdateFailed`.
    pub async fn write_ip(&self, domain: &DomainParts, ip: &str) -> RunOutcome {
        match self.provider.update_record(domain, ip).await {
            Ok(UpdateResult::Updated { new_ip, message }) => {
                if let Some(message) = message {
                    debug!("{} answered: {}", self.provider.provider_name(), message);
                }
                info!("{} A record successfully set to {}", domain, new_ip);
                RunOutcome::Updated { ip: new_ip }
            }
            Ok(UpdateResult::DryRun { ip }) => {
                info!("[DRY-RUN] {} A record would be set to {}", domain, ip);
                RunOutcome::DryRun { ip }
            }
            Err(e) => {
                warn!("Could not set DNS: {}", e);
                RunOutcome::UpdateFailed { ip: ip.to_string() }
            }
        }
    }

    /// Discover, compare and (if needed) apply, for one domain
    pub async fn run_once(&self, domain: &str, explicit_ip: Option<&str>) -> RunOutcome {
        let Some(target_ip) = self.discover_ip(explicit_ip).await else {
            return RunOutcome::NoTargetIp;
        };

        let parts = split_domain(domain);
        let current_ip = self.read_current_ip(&parts).await;

        if current_ip == target_ip {
            info!(
                "'A' record for {} is already {}, no changes needed",
                domain, target_ip
            );
            return RunOutcome::Unchanged { ip: target_ip };
        }

        if current_ip.is_empty() {
            debug!("Current IP for {} unknown, setting {}", domain, target_ip);
        } else {
            debug!("{} moved from {} to {}", domain, current_ip, target_ip);
        }

        self.write_ip(&parts, &target_ip).await
    }
}

/// Run a whole invocation: argument check, configuration check, then the
/// engine pass
///
/// `connect` is only called once a domain is present and the configuration
/// loaded, so no client exists (and no request can happen) before that.
pub async fn run<F>(invocation: &Invocation, config: Result<ProviderConfig>, connect: F) -> RunOutcome
where
    F: FnOnce(ProviderConfig) -> Result<DdnsEngine>,
{
    info!("Starting {}", APPLICATION_NAME);

    let Some(domain) = invocation.domain.as_deref() else {
        info!("{}", HELP_TEXT);
        return RunOutcome::Usage;
    };

    let engine = match config.and_then(|config| {
        config.validate()?;
        connect(config)
    }) {
        Ok(engine) => engine,
        Err(e) => {
            warn!("{}", e);
            return RunOutcome::MissingConfiguration;
        }
    };

    engine
        .run_once(domain, invocation.explicit_ip.as_deref())
        .await
}
