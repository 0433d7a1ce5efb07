//! Test doubles and common utilities for engine contract tests
//!
//! The IP source and the provider share one [`CallLog`], so tests can assert
//! both which calls happened and in what order.

#![allow(dead_code)]

use ddns_core::domain::DomainParts;
use ddns_core::error::{Error, Result};
use ddns_core::traits::{CurrentRecord, DnsProvider, IpSource, UpdateResult};
use ddns_core::{Credentials, DdnsEngine, ProviderConfig};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;

/// A remote call observed by a test double
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Ping,
    Read(DomainParts),
    Write(DomainParts, String),
}

/// Shared, ordered record of remote calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }

    pub fn pings(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Ping).count()
    }

    pub fn reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Read(_)))
            .count()
    }

    pub fn writes(&self) -> Vec<(DomainParts, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Write(domain, ip) => Some((domain, ip)),
                _ => None,
            })
            .collect()
    }
}

/// What the mock IP source answers
#[derive(Debug, Clone)]
pub enum PingReply {
    Ip(&'static str),
    NoAddress,
    Fail,
}

/// An IpSource with a canned answer
pub struct MockIpSource {
    reply: PingReply,
    log: CallLog,
}

impl MockIpSource {
    pub fn new(reply: PingReply, log: &CallLog) -> Self {
        Self {
            reply,
            log: log.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for MockIpSource {
    async fn current(&self) -> Result<String> {
        self.log.push(Call::Ping);
        match &self.reply {
            PingReply::Ip(ip) => Ok(ip.to_string()),
            PingReply::NoAddress => Err(Error::no_address("mock-ping", 200, "SUCCESS")),
            PingReply::Fail => Err(Error::http("connection refused")),
        }
    }

    fn source_name(&self) -> &'static str {
        "mock-ping"
    }
}

/// What the mock provider answers on read
#[derive(Debug, Clone)]
pub enum ReadReply {
    Records(Vec<&'static str>),
    Fail,
}

/// A DnsProvider with canned answers that logs every call
pub struct MockDnsProvider {
    read: ReadReply,
    write_succeeds: bool,
    dry_run: bool,
    log: CallLog,
}

impl MockDnsProvider {
    pub fn new(read: ReadReply, log: &CallLog) -> Self {
        Self {
            read,
            write_succeeds: true,
            dry_run: false,
            log: log.clone(),
        }
    }

    pub fn rejecting_writes(mut self) -> Self {
        self.write_succeeds = false;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn current_record(&self, domain: &DomainParts) -> Result<CurrentRecord> {
        self.log.push(Call::Read(domain.clone()));
        match &self.read {
            ReadReply::Records(contents) => Ok(CurrentRecord::from_contents(
                contents.iter().map(|c| c.to_string()).collect(),
            )),
            ReadReply::Fail => Err(Error::status("mock", 400, "Invalid domain.")),
        }
    }

    async fn update_record(&self, domain: &DomainParts, ip: &str) -> Result<UpdateResult> {
        self.log.push(Call::Write(domain.clone(), ip.to_string()));
        if self.dry_run {
            Ok(UpdateResult::DryRun { ip: ip.to_string() })
        } else if self.write_succeeds {
            Ok(UpdateResult::Updated {
                new_ip: ip.to_string(),
                message: None,
            })
        } else {
            Err(Error::status("mock", 400, "Edit error"))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Engine wired to the two mocks
pub fn engine(ping: PingReply, read: ReadReply, log: &CallLog) -> DdnsEngine {
    DdnsEngine::new(
        Box::new(MockIpSource::new(ping, log)),
        Box::new(MockDnsProvider::new(read, log)),
    )
}

/// A valid provider configuration for tests
pub fn test_config() -> ProviderConfig {
    ProviderConfig::new(Credentials::new("pk1_test", "sk1_test").unwrap())
}

/// Log output collected by [`capture_logs`]
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

/// Route INFO and above to a buffer until the guard is dropped
///
/// Levels are kept in the output, timestamps and targets are not.
pub fn capture_logs() -> (Captured, DefaultGuard) {
    let out = Captured::default();
    let sink = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();
    (out, tracing::subscriber::set_default(subscriber))
}
