// # Porkbun DNS Provider
//
// This crate provides the Porkbun implementation of both core traits:
//
// - `IpSource`: the `ping` endpoint reports the caller's public IP
// - `DnsProvider`: `retrieveByNameType` / `editByNameType` read and overwrite
//   the A record keyed by (domain, "A", subdomain)
//
// ## Constraints
//
// - One HTTP request per trait call
// - No retry, no backoff, no caching (there is nothing to retry into: the
//   binary runs once and exits)
// - Credentials travel in the JSON body and are never logged
//
// ## API Reference
//
// - Porkbun API v3: https://porkbun.com/api/json/v3/documentation
// - Ping: POST `/api/json/v3/ping`
// - Retrieve: POST `/api/json/v3/dns/retrieveByNameType/:domain/A/:subdomain`
// - Edit: POST `/api/json/v3/dns/editByNameType/:domain/A/:subdomain`

pub mod transport;

use async_trait::async_trait;
use ddns_core::config::{ProviderConfig, RECORD_TTL_SECS};
use ddns_core::domain::DomainParts;
use ddns_core::traits::{CurrentRecord, DnsProvider, IpSource, UpdateResult};
use ddns_core::{Credentials, DdnsEngine, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use transport::{ApiResponse, ApiTransport, ReqwestTransport};

/// Provider name used in errors and logs
const PROVIDER: &str = "porkbun";

/// Only A records are managed
const RECORD_TYPE: &str = "A";

const PING_PATH: &str = "/api/json/v3/ping";

/// Credential fields present in every request body
#[derive(Debug, Serialize)]
struct AuthPayload<'a> {
    apikey: &'a str,
    secretapikey: &'a str,
}

/// Body of an `editByNameType` request
#[derive(Debug, Serialize)]
struct EditPayload<'a> {
    #[serde(flatten)]
    auth: AuthPayload<'a>,
    /// Empty: the subdomain is already in the path
    name: &'a str,
    content: &'a str,
    /// Porkbun takes the TTL as a string
    ttl: String,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    #[serde(rename = "yourIp")]
    your_ip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    records: Vec<DnsRecord>,
}

/// One record as returned by `retrieveByNameType`
#[derive(Debug, Deserialize)]
struct DnsRecord {
    #[serde(default)]
    content: String,
}

/// Porkbun DNS provider
///
/// Cloning is cheap; clones share the transport.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, ping and retrieve requests are sent as usual but
/// the edit request is only logged (without credentials).
pub struct PorkbunProvider<T = ReqwestTransport> {
    /// API credentials
    /// ⚠️ NEVER log the secret
    credentials: Credentials,

    /// Network capability
    transport: Arc<T>,

    /// Dry-run mode: if true, skip the edit request
    dry_run: bool,
}

// Custom Debug implementation that hides the credentials
impl<T> std::fmt::Debug for PorkbunProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunProvider")
            .field("credentials", &self.credentials)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<T> Clone for PorkbunProvider<T> {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            transport: Arc::clone(&self.transport),
            dry_run: self.dry_run,
        }
    }
}

impl PorkbunProvider<ReqwestTransport> {
    /// Create a provider talking to the host in `config`
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.api_base.clone(), config.timeout)?;

        if config.dry_run {
            tracing::warn!("Porkbun provider running in DRY-RUN mode - no changes will be made");
        }

        Ok(Self::with_transport(config.credentials.clone(), transport, config.dry_run))
    }
}

impl<T: ApiTransport> PorkbunProvider<T> {
    /// Create a provider over an arbitrary transport
    pub fn with_transport(credentials: Credentials, transport: T, dry_run: bool) -> Self {
        Self {
            credentials,
            transport: Arc::new(transport),
            dry_run,
        }
    }

    fn auth(&self) -> AuthPayload<'_> {
        AuthPayload {
            apikey: self.credentials.api_key(),
            secretapikey: self.credentials.secret_api_key(),
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.transport.post_json(path, &body).await
    }

    /// Ask Porkbun which address the request came from
    ///
    /// A well-formed answer without `yourIp` is [`Error::NoAddress`], carrying
    /// the status and the provider message.
    pub async fn ping(&self) -> Result<String> {
        let response = self.post(PING_PATH, &self.auth()).await?;

        if !response.is_success() {
            return Err(Error::status(PROVIDER, response.status, response.describe()));
        }

        let Some(body) = response.body.as_ref() else {
            return Err(Error::provider(
                PROVIDER,
                format!("Unparsable ping response (status {})", response.status),
            ));
        };

        let ping = PingResponse::deserialize(body)?;
        match ping.your_ip.filter(|ip| !ip.is_empty()) {
            Some(ip) => Ok(ip),
            None => Err(Error::no_address(PROVIDER, response.status, response.describe())),
        }
    }
}

/// Path of a by-name/type endpoint for `domain`
///
/// An empty subdomain leaves the trailing slash in place.
fn record_path(action: &str, domain: &DomainParts) -> String {
    format!(
        "/api/json/v3/dns/{}/{}/{}/{}",
        action, domain.registrable_domain, RECORD_TYPE, domain.subdomain
    )
}

#[async_trait]
impl<T: ApiTransport> IpSource for PorkbunProvider<T> {
    async fn current(&self) -> Result<String> {
        self.ping().await
    }

    fn source_name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait]
impl<T: ApiTransport> DnsProvider for PorkbunProvider<T> {
    async fn current_record(&self, domain: &DomainParts) -> Result<CurrentRecord> {
        tracing::debug!("Looking up A record for {}", domain);

        let response = self
            .post(&record_path("retrieveByNameType", domain), &self.auth())
            .await?;

        if !response.is_success() {
            return Err(Error::status(PROVIDER, response.status, response.describe()));
        }

        let body = response.body.ok_or_else(|| {
            Error::provider(PROVIDER, "Invalid response format: body is not JSON")
        })?;

        let retrieved: RetrieveResponse = serde_json::from_value(body)?;
        Ok(CurrentRecord::from_contents(
            retrieved.records.into_iter().map(|r| r.content).collect(),
        ))
    }

    async fn update_record(&self, domain: &DomainParts, ip: &str) -> Result<UpdateResult> {
        let path = record_path("editByNameType", domain);
        let payload = EditPayload {
            auth: self.auth(),
            name: "",
            content: ip,
            ttl: RECORD_TTL_SECS.to_string(),
        };

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send POST request to {} with payload: {}",
                path,
                serde_json::json!({
                    "name": payload.name,
                    "content": payload.content,
                    "ttl": payload.ttl,
                })
            );
            return Ok(UpdateResult::DryRun { ip: ip.to_string() });
        }

        tracing::debug!("Setting A record for {} to {}", domain, ip);
        let response = self.post(&path, &payload).await?;

        if !response.is_success() {
            return Err(Error::status(PROVIDER, response.status, response.describe()));
        }

        let message = response
            .body
            .as_ref()
            .and_then(|b| b.get("message").or_else(|| b.get("status")))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(UpdateResult::Updated {
            new_ip: ip.to_string(),
            message,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Build an engine whose IP source and DNS provider both talk to Porkbun
pub fn connect(config: ProviderConfig) -> Result<DdnsEngine> {
    let provider = PorkbunProvider::from_config(&config)?;
    Ok(DdnsEngine::new(Box::new(provider.clone()), Box::new(provider)))
}
