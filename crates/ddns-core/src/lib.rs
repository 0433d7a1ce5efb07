// # ddns-core
//
// Core library for the Porkbun dynamic DNS updater.
//
// ## Architecture Overview
//
// - **domain**: Splits a fully-qualified name into registrable domain and subdomain
// - **IpSource**: Trait for discovering the caller's public IP
// - **DnsProvider**: Trait for reading and overwriting A records
// - **DdnsEngine**: One-shot orchestration of discover → compare → apply
// - **config**: Credentials and provider settings, built once at startup
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Flow lives here, HTTP lives in the provider crate
// 2. **Single Pass**: One run per invocation, scheduling is external
// 3. **No Hidden State**: Credentials are passed in, never read from globals
// 4. **Library-First**: The binary is a thin wrapper around [`engine::run`]

pub mod traits;
pub mod engine;
pub mod config;
pub mod domain;
pub mod error;

// Re-export core types for convenience
pub use traits::{CurrentRecord, DnsProvider, IpSource, UpdateResult};
pub use engine::{DdnsEngine, Invocation, RunOutcome};
pub use config::{Credentials, ProviderConfig};
pub use domain::{DomainParts, split_domain};
pub use error::{Error, Result};
