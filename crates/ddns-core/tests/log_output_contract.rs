//! Contract Test: Log Output
//!
//! The log is the only report a scheduled run leaves behind, so the lines a
//! user reads for each outcome are checked here at the default level.
//!
//! Constraints verified:
//! - Unchanged record → "no changes needed"
//! - Written record → "successfully set"
//! - Dry-run → "would be set", never "successfully set"
//! - Missing credentials → names both variables
//! - No domain → usage text
//! - No address from the IP source → warning with status and message

mod common;

use common::*;
use ddns_core::engine::{HELP_TEXT, run};
use ddns_core::{DdnsEngine, Invocation, ProviderConfig, RunOutcome};

#[tokio::test]
async fn unchanged_record_says_no_changes_needed() {
    let log = CallLog::new();
    let engine = engine(PingReply::Ip("1.2.3.4"), ReadReply::Records(vec!["1.2.3.4"]), &log);
    let (logs, _guard) = capture_logs();

    engine.run_once("host.example.com", None).await;

    assert!(logs.text().contains(
        "INFO 'A' record for host.example.com is already 1.2.3.4, no changes needed"
    ));
}

#[tokio::test]
async fn written_record_says_successfully_set() {
    let log = CallLog::new();
    let engine = engine(PingReply::Ip("1.2.3.4"), ReadReply::Records(vec!["5.6.7.8"]), &log);
    let (logs, _guard) = capture_logs();

    engine.run_once("a.b.example.com", None).await;

    assert!(logs.text().contains("INFO a.b.example.com A record successfully set to 1.2.3.4"));
}

#[tokio::test]
async fn dry_run_says_would_be_set() {
    let log = CallLog::new();
    let engine = DdnsEngine::new(
        Box::new(MockIpSource::new(PingReply::Ip("1.2.3.4"), &log)),
        Box::new(MockDnsProvider::new(ReadReply::Records(vec![]), &log).dry_run()),
    );
    let (logs, _guard) = capture_logs();

    let outcome = engine.run_once("example.com", None).await;

    assert_eq!(outcome, RunOutcome::DryRun { ip: "1.2.3.4".into() });
    let text = logs.text();
    assert!(text.contains("[DRY-RUN] example.com A record would be set to 1.2.3.4"));
    assert!(!text.contains("successfully set"), "dry-run claimed a write:\n{}", text);
}

#[tokio::test]
async fn missing_credentials_name_both_variables() {
    let (logs, _guard) = capture_logs();

    let outcome = run(
        &Invocation::from_args(["host.example.com"]),
        ProviderConfig::from_lookup(|_| None),
        |_| unreachable!("no client without credentials"),
    )
    .await;

    assert_eq!(outcome, RunOutcome::MissingConfiguration);
    let text = logs.text();
    assert!(text.contains("Starting porkbundyndns"));
    assert!(text.contains(
        "WARN Configuration error: Missing at least one environment variable: PORKBUN_API_KEY PORKBUN_SECRET_KEY"
    ));
}

#[tokio::test]
async fn missing_domain_logs_usage() {
    let (logs, _guard) = capture_logs();

    run(&Invocation::default(), Ok(test_config()), |_| {
        unreachable!("no client without a domain")
    })
    .await;

    let lines = logs.lines();
    assert_eq!(lines.len(), 3, "start line plus two usage lines: {:?}", lines);
    assert!(lines[1].ends_with("Usage: porkbundyndns <domain> [ip]"));
    assert_eq!(lines[2], HELP_TEXT.lines().nth(1).unwrap());
}

#[tokio::test]
async fn missing_address_warns_with_status_and_message() {
    let log = CallLog::new();
    let engine = engine(PingReply::NoAddress, ReadReply::Records(vec![]), &log);
    let (logs, _guard) = capture_logs();

    let outcome = engine.run_once("host.example.com", None).await;

    assert_eq!(outcome, RunOutcome::NoTargetIp);
    assert!(logs.text().contains(
        "WARN Could not ping mock-ping: mock-ping returned 200 without an IP: SUCCESS"
    ));
}
