//! Core traits for the DDNS updater
//!
//! - [`IpSource`]: Learn the caller's public IP address
//! - [`DnsProvider`]: Read and overwrite A records via a provider API

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{CurrentRecord, DnsProvider, UpdateResult};
