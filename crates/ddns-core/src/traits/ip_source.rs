// # IP Source Trait
//
// Defines the interface for discovering the caller's public IP address.
//
// ## Implementations
//
// - Porkbun ping endpoint: `ddns-provider-porkbun` crate
//
// An explicit IP given on the command line never reaches an `IpSource`; the
// engine short-circuits before calling it.

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// # Contract
///
/// - One remote call per invocation of [`IpSource::current`]
/// - No retry, no caching between calls
/// - An answer without an address is an error ([`crate::Error::NoAddress`]),
///   so the status and message reach the log
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(ip)`: The address as reported by the source
    /// - `Err(Error)`: Transport or parse failure, or no address reported
    async fn current(&self) -> Result<String, crate::Error>;

    /// Name of the source (for logging)
    fn source_name(&self) -> &'static str;
}
