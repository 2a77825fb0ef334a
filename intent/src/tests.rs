// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Building, validating and rendering point-to-point intents

#![allow(clippy::unwrap_used, clippy::panic)] // valid in tests

use id::SequentialIds;
use net::device::DistinctConnectPoints;
use net::selector::ETH_TYPE_IPV4;
use net::{ConnectPoint, DeviceId, PortNumber, TrafficSelector, TrafficTreatment};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tracing_test::traced_test;

use crate::{
    ApplicationId, ConnectivityIntent, Constraint, DEFAULT_INTENT_PRIORITY, EncapsulationType,
    ErrorKind, Intent, IntentError, Key, SolIntent, SolIntentBuilder, SolIntentRecord,
};

fn app1() -> ApplicationId {
    ApplicationId::new(1, "app1")
}

fn cp(device: &str, port: u64) -> ConnectPoint {
    ConnectPoint::new(DeviceId::new(device).unwrap(), PortNumber::new(port))
}

fn selector() -> TrafficSelector {
    TrafficSelector::builder()
        .match_eth_type(ETH_TYPE_IPV4)
        .build()
}

fn treatment() -> TrafficTreatment {
    TrafficTreatment::builder()
        .set_output(PortNumber::new(1))
        .build()
}

fn sample_builder() -> SolIntentBuilder {
    SolIntent::builder()
        .app_id(app1())
        .ingress_point(cp("dev1", 1))
        .egress_point(cp("dev2", 1))
        .selector(selector())
        .treatment(treatment())
        .priority(5)
}

#[test]
fn build_point_to_point() {
    let intent = sample_builder().build().unwrap();
    assert_eq!(intent.priority(), 5);
    assert_eq!(intent.ingress_point(), &cp("dev1", 1));
    assert_eq!(intent.egress_point(), &cp("dev2", 1));
    assert_eq!(intent.app_id(), &app1());
    assert_eq!(intent.selector(), &selector());
    assert_eq!(intent.treatment(), &treatment());
    assert!(intent.constraints().is_empty());
    assert!(intent.resources().is_empty());
    assert!(!intent.is_installable());
}

#[test]
fn distinct_endpoints_are_accepted() {
    bolero::check!()
        .with_generator(DistinctConnectPoints)
        .for_each(|(ingress, egress): &(ConnectPoint, ConnectPoint)| {
            let intent = SolIntent::builder()
                .app_id(app1())
                .ingress_point(ingress.clone())
                .egress_point(egress.clone())
                .build()
                .unwrap();
            assert_eq!(intent.ingress_point(), ingress);
            assert_eq!(intent.egress_point(), egress);
        });
}

#[test]
fn equal_endpoints_are_rejected() {
    bolero::check!()
        .with_type()
        .for_each(|point: &ConnectPoint| {
            let err = SolIntent::builder()
                .app_id(app1())
                .ingress_point(point.clone())
                .egress_point(point.clone())
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(
                err,
                IntentError::SameEndpoints {
                    ingress: point.clone(),
                    egress: point.clone(),
                }
            );
        });
}

#[test]
fn endpoints_are_compared_by_value() {
    let err = SolIntent::builder()
        .app_id(app1())
        .ingress_point("of:0000000000000001/3".parse().unwrap())
        .egress_point(ConnectPoint::new(DeviceId::openflow(1), PortNumber::new(3)))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn missing_fields_are_rejected() {
    let err = SolIntent::builder()
        .app_id(app1())
        .egress_point(cp("dev2", 1))
        .build()
        .unwrap_err();
    assert_eq!(err, IntentError::MissingField("ingress_point"));
    assert_eq!(err.kind(), ErrorKind::NullReference);

    let err = SolIntent::builder()
        .app_id(app1())
        .ingress_point(cp("dev1", 1))
        .build()
        .unwrap_err();
    assert_eq!(err, IntentError::MissingField("egress_point"));
    assert_eq!(err.kind(), ErrorKind::NullReference);

    let err = SolIntent::builder()
        .ingress_point(cp("dev1", 1))
        .egress_point(cp("dev2", 1))
        .build()
        .unwrap_err();
    assert_eq!(err, IntentError::MissingField("app_id"));
    assert_eq!(err.kind(), ErrorKind::NullReference);

    // absence is detected before endpoint comparison
    let err = SolIntent::builder().build().unwrap_err();
    assert_eq!(err, IntentError::MissingField("app_id"));
}

#[test]
fn priority_out_of_range_is_rejected() {
    for priority in [0, 65536, u32::MAX] {
        let err = sample_builder().priority(priority).build().unwrap_err();
        assert_eq!(err, IntentError::PriorityOutOfRange(priority));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn defaults() {
    let idgen = SequentialIds::new(0);
    let intent = SolIntent::builder()
        .app_id(app1())
        .ingress_point(cp("dev1", 1))
        .egress_point(cp("dev2", 1))
        .build_with(&idgen)
        .unwrap();
    assert_eq!(intent.priority(), DEFAULT_INTENT_PRIORITY);
    assert!(intent.selector().is_empty());
    assert!(intent.treatment().is_empty());
    assert!(intent.constraints().is_empty());
    assert_eq!(intent.key(), &Key::of_long(1, app1()));
    assert_eq!(intent.key(), &Key::of_long(intent.id().fingerprint(), app1()));
}

#[test]
fn rejected_builds_draw_no_id() {
    let idgen = SequentialIds::new(0);
    let err = sample_builder()
        .egress_point(cp("dev1", 1))
        .build_with(&idgen)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = sample_builder().priority(0).build_with(&idgen).unwrap_err();
    assert_eq!(err, IntentError::PriorityOutOfRange(0));
    let err = SolIntent::builder().build_with(&idgen).unwrap_err();
    assert_eq!(err, IntentError::MissingField("app_id"));
    assert_eq!(idgen.issued(), 0);

    let intent = sample_builder().build_with(&idgen).unwrap();
    assert_eq!(intent.id().fingerprint(), 1);
    assert_eq!(idgen.issued(), 1);
}

#[test]
fn last_write_wins() {
    let intent = sample_builder()
        .priority(3)
        .priority(7)
        .ingress_point(cp("dev3", 4))
        .key(Key::of_str("first", app1()))
        .key(Key::of_str("second", app1()))
        .build()
        .unwrap();
    assert_eq!(intent.priority(), 7);
    assert_eq!(intent.ingress_point(), &cp("dev3", 4));
    assert_eq!(intent.key(), &Key::of_str("second", app1()));
}

#[test]
fn display_field_order() {
    let idgen = SequentialIds::new(0);
    let intent = sample_builder()
        .constraints(vec![Constraint::bandwidth_mbps(10)])
        .build_with(&idgen)
        .unwrap();
    assert_eq!(
        intent.to_string(),
        "SolIntent{id=00000000-0000-0000-0000-000000000001, key=0x1, \
         appId=ApplicationId{id=1, name=app1}, priority=5, resources=[], \
         selector=TrafficSelector{criteria=[ETH_TYPE:0x800]}, \
         treatment=TrafficTreatment{immediate=[OUTPUT:1], deferred=[], transition=None, cleared=false}, \
         ingress=dev1/1, egress=dev2/1, \
         constraints=[BandwidthConstraint{bandwidth=10000000bps}]}"
    );

    let rendered = intent.to_string();
    let fields = [
        "id=", "key=", "appId=", "priority=", "resources=", "selector=", "treatment=",
        "ingress=", "egress=", "constraints=",
    ];
    let mut rest = rendered.as_str();
    for field in fields {
        let at = rest
            .find(field)
            .unwrap_or_else(|| panic!("'{field}' missing or out of order in {rendered}"));
        rest = &rest[at + field.len()..];
    }
}

#[test]
fn builder_is_reusable() {
    let builder = sample_builder().key(Key::of_str("h1-h2", app1()));
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_ne!(first.id(), second.id());
    assert_ne!(first, second);
    assert!(first.same_content(&second));

    // without an explicit key, keys derive from the (distinct) ids
    let builder = sample_builder();
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_ne!(first.key(), second.key());
    assert!(!first.same_content(&second));
}

#[test]
fn intents_hash_by_id() {
    let intent = sample_builder().build().unwrap();
    let copy = intent.clone();
    let other = sample_builder().build().unwrap();
    let set: HashSet<SolIntent> = [intent, copy, other].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn intent_as_trait_object() {
    let intents: Vec<Box<dyn Intent>> = vec![
        Box::new(sample_builder().build().unwrap()),
        Box::new(
            sample_builder()
                .ingress_point(cp("dev2", 1))
                .egress_point(cp("dev1", 1))
                .build()
                .unwrap(),
        ),
    ];
    for intent in &intents {
        assert_eq!(intent.app_id(), &app1());
        assert!(intent.to_string().starts_with("SolIntent{"));
    }
}

#[test]
fn record_restores_intent() {
    let intent = sample_builder()
        .constraints(vec![
            Constraint::bandwidth_mbps(100),
            Constraint::Encapsulation(EncapsulationType::Vlan),
        ])
        .build()
        .unwrap();
    let yaml = serde_yaml_ng::to_string(&intent.to_record()).unwrap();
    let record: SolIntentRecord = serde_yaml_ng::from_str(&yaml).unwrap();
    let restored = SolIntent::from_record(record);
    assert_eq!(restored, intent);
    assert!(restored.same_content(&intent));
    assert_eq!(restored.to_string(), intent.to_string());
}

#[test]
fn record_path_skips_validation() {
    let mut record = sample_builder().build().unwrap().to_record();
    record.egress_point = record.ingress_point.clone();
    let restored = SolIntent::from_record(record);
    assert_eq!(restored.ingress_point(), restored.egress_point());
}

#[traced_test]
#[test]
fn build_outcome_is_logged() {
    let _ = sample_builder().build().unwrap();
    assert!(logs_contain("Built intent"));

    let _ = sample_builder()
        .egress_point(cp("dev1", 1))
        .build()
        .unwrap_err();
    assert!(logs_contain("Rejected intent"));
    assert!(logs_contain("ingress and egress should be different"));
}
