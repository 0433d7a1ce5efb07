// # DNS Provider Trait
//
// Defines the interface for reading and overwriting A records via a provider
// API.
//
// ## Implementations
//
// - Porkbun: `ddns-provider-porkbun` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, domain::split_domain};
//
// let domain = split_domain("host.example.com");
// let current = provider.current_record(&domain).await?;
// if current.content() != Some("1.2.3.4") {
//     provider.update_record(&domain, "1.2.3.4").await?;
// }
// ```

use async_trait::async_trait;

use crate::domain::DomainParts;

/// What the provider currently publishes for a record key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentRecord {
    /// Exactly one record matched
    Single(String),
    /// No record matched
    Missing,
    /// More than one record matched; there is no way to tell which one counts
    Ambiguous(usize),
}

impl CurrentRecord {
    /// Build from the list of record contents returned by the provider
    pub fn from_contents(mut contents: Vec<String>) -> Self {
        match contents.len() {
            0 => Self::Missing,
            1 => Self::Single(contents.remove(0)),
            n => Self::Ambiguous(n),
        }
    }

    /// The published content, if it is known
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Single(content) => Some(content),
            Self::Missing | Self::Ambiguous(_) => None,
        }
    }
}

/// Result of a record write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// The provider accepted the new content
    Updated {
        /// The content that was written
        new_ip: String,
        /// Provider status message, when one was returned
        message: Option<String>,
    },
    /// Dry-run: the write was logged but not sent
    DryRun {
        /// The content that would have been written
        ip: String,
    },
}

/// Trait for DNS provider implementations
///
/// # Contract
///
/// Providers are single-shot: one HTTP request per call, no retry, no
/// caching, no decision about whether an update is needed (the engine owns
/// that). Failures are returned, never logged and swallowed here.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Read the A record currently published for `domain`
    async fn current_record(&self, domain: &DomainParts) -> Result<CurrentRecord, crate::Error>;

    /// Overwrite the A record for `domain` with `ip`
    async fn update_record(
        &self,
        domain: &DomainParts,
        ip: &str,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
