//! Tests for the publish gate, the store fan-out and the publish pipeline.
mod common;
use async_trait::async_trait;
use common::*;
use routegraph::config::PublishConfig;
use routegraph::error::StoreError;
use routegraph::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::block_on;

fn targets() -> Vec<PublishTarget> {
    vec![
        PublishTarget::Preview {
            campaign_id: "c-42".to_string(),
        },
        PublishTarget::Production {
            workspace: "acme".to_string(),
            project: "spring".to_string(),
            slug: "sale".to_string(),
        },
        PublishTarget::CustomDomain {
            host: "promo.acme.com".to_string(),
        },
    ]
}

fn compiled() -> CompiledConfig {
    compile(&create_valid_graph(), &sample_settings()).expect("Failed to compile")
}

#[test]
fn test_gate_warnings_and_info_do_not_block() {
    let results = vec![ValidationResult {
        node_id: "s1".to_string(),
        node_type: NodeType::Segment,
        node_title: "Germany".to_string(),
        validations: vec![
            ValidationFinding::info("segment-no-rules", "no rules"),
            ValidationFinding::warning("ab-test-weak-hypothesis", "weak"),
        ],
    }];
    let report = PublishGate::evaluate(results, vec![]);

    assert!(report.can_publish);
    assert_eq!(report.summary.warnings, 1);
    assert_eq!(report.summary.info, 1);
    assert_eq!(report.by_severity.info[0].node_id, "s1");
    assert_eq!(report.first_blocker(), None);
}

#[test]
fn test_gate_sorts_critical_findings_by_priority() {
    let critical = vec![
        ValidationFinding::error("traffic-source-count", "two sources").with_priority(3),
        ValidationFinding::error("lead-form-empty", "empty form").with_priority(1),
    ];
    let report = PublishGate::evaluate(vec![], critical);

    assert!(!report.can_publish);
    assert_eq!(report.summary.critical_errors, 2);
    assert_eq!(report.summary.errors, 0);
    assert_eq!(report.by_severity.critical[0].id, "lead-form-empty");
    assert_eq!(report.first_blocker().map(|f| f.id.as_str()), Some("lead-form-empty"));
}

#[test]
fn test_lead_gen_with_empty_form_cannot_publish() {
    let context = ValidationContext::new().with_lead_form(Some(LeadForm { field_count: 0 }));
    let report = Validator::default().report(&create_valid_graph(), &context);

    assert!(!report.can_publish);
    let critical: Vec<_> = report.by_severity.critical.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(critical, vec!["lead-form-empty"]);
}

#[test]
fn test_report_serializes_for_the_ui() {
    let report = Validator::default().report(&create_valid_graph(), &ValidationContext::new());
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["canPublish"], false);
    assert_eq!(value["summary"]["criticalErrors"], 1);
    assert_eq!(value["bySeverity"]["critical"][0]["id"], "no-landing-pages");
    assert_eq!(value["bySeverity"]["critical"][0]["isValid"], false);
    assert_eq!(value["bySeverity"]["errors"][0]["nodeType"], "traffic");
    assert_eq!(value["bySeverity"]["errors"][0]["severity"], "error");
}

#[test]
fn test_fanout_writes_every_target() {
    let publisher = Publisher::new(MemoryStore::new(), PublishConfig::default());
    let config = compiled();
    let outcome = block_on(publisher.publish(&config, &targets())).unwrap();

    assert_eq!(outcome.status(), PublishStatus::Published);
    assert!(outcome.is_complete());
    assert_eq!(outcome.written.len(), 3);

    let expected = config.to_json().unwrap();
    let keys = block_on(publisher.store().keys());
    assert_eq!(
        keys,
        vec![
            "campaign:domain:promo.acme.com",
            "campaign:preview:c-42",
            "campaign:route:acme/spring/sale",
        ]
    );
    for key in keys {
        assert_eq!(block_on(publisher.store().get(&key)), Some(expected.clone()));
    }
}

#[test]
fn test_fanout_reports_exact_failed_keys() {
    let store = FlakyStore::failing_on(&["campaign:domain:promo.acme.com"]);
    let publisher = Publisher::new(store, PublishConfig::default());
    let config = compiled();
    let outcome = block_on(publisher.publish(&config, &targets())).unwrap();

    assert_eq!(outcome.status(), PublishStatus::Partial);
    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed_keys(), vec!["campaign:domain:promo.acme.com"]);
    assert!(matches!(
        outcome.failed[0].error,
        StoreError::Unavailable(_)
    ));
    assert_eq!(outcome.written.len(), 2);

    // A retry only touches the failed subset.
    let healthy = Publisher::new(MemoryStore::new(), PublishConfig::default());
    let retried = block_on(healthy.retry_failed(&config, &outcome)).unwrap();
    assert_eq!(retried.status(), PublishStatus::Published);
    assert_eq!(retried.written, vec!["campaign:domain:promo.acme.com"]);
    assert_eq!(block_on(healthy.store().keys()).len(), 1);
}

#[test]
fn test_fanout_nothing_published() {
    let store = FlakyStore::failing_on(&[
        "campaign:preview:c-42",
        "campaign:route:acme/spring/sale",
        "campaign:domain:promo.acme.com",
    ]);
    let publisher = Publisher::new(store, PublishConfig::default());
    let outcome = block_on(publisher.publish(&compiled(), &targets())).unwrap();

    assert_eq!(outcome.status(), PublishStatus::NothingPublished);
    assert_eq!(outcome.failed_keys().len(), 3);
}

#[test]
fn test_fanout_writes_duplicate_keys_once() {
    let mut duplicated = targets();
    duplicated.push(PublishTarget::CustomDomain {
        host: "PROMO.acme.com".to_string(),
    });
    let publisher = Publisher::new(Arc::new(MemoryStore::new()), PublishConfig::default());
    let outcome = block_on(publisher.publish(&compiled(), &duplicated)).unwrap();

    assert_eq!(outcome.written.len(), 3);
}

struct SlowStore;

#[async_trait]
impl ConfigStore for SlowStore {
    async fn put(&self, _key: &str, _value: &str) -> std::result::Result<(), StoreError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    }
}

#[test]
fn test_fanout_times_out_slow_writes() {
    let config = PublishConfig {
        write_timeout_ms: 20,
        ..Default::default()
    };
    let publisher = Publisher::new(SlowStore, config);
    let outcome = block_on(publisher.publish(&compiled(), &targets()[..1])).unwrap();

    assert_eq!(outcome.status(), PublishStatus::NothingPublished);
    assert_eq!(outcome.failed[0].error, StoreError::Timeout(20));
}

#[test]
fn test_pipeline_blocks_before_writing() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = PublishPipeline::new(store.clone(), &EngineConfig::default());
    let context = ValidationContext::new();

    let result = block_on(pipeline.run(
        &create_valid_graph(),
        &sample_settings(),
        &context,
        &targets(),
    ));

    match result {
        Err(PublishError::Blocked(report)) => {
            assert!(!report.can_publish);
            assert_eq!(report.by_severity.critical[0].id, "no-landing-pages");
        }
        other => panic!("Expected Blocked, got {:?}", other.map(|r| r.outcome)),
    }
    assert!(block_on(store.keys()).is_empty());
}

#[test]
fn test_pipeline_requires_targets() {
    let pipeline = PublishPipeline::new(MemoryStore::new(), &EngineConfig::default());
    let result = block_on(pipeline.run(
        &create_valid_graph(),
        &sample_settings(),
        &published(&["lp-1", "lp-2"]),
        &[],
    ));
    assert!(matches!(result, Err(PublishError::NoTargets)));
}

#[test]
fn test_pipeline_publishes_valid_campaign() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = PublishPipeline::new(store.clone(), &EngineConfig::default());
    let graph = create_valid_graph();

    let receipt = block_on(pipeline.run(
        &graph,
        &sample_settings(),
        &published(&["lp-1", "lp-2"]),
        &targets(),
    ))
    .expect("Valid campaign should publish");

    assert!(receipt.report.can_publish);
    assert_eq!(receipt.outcome.status(), PublishStatus::Published);
    assert_eq!(receipt.compiled, compile(&graph, &sample_settings()).unwrap());
    assert_eq!(
        block_on(store.get("campaign:preview:c-42")),
        Some(receipt.compiled.to_json().unwrap())
    );
}
