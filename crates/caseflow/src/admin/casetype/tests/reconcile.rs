use super::common::*;
use crate::admin::casetype::element::ElementId;
use crate::admin::casetype::reconcile::{reconcile, ReconcileError};

#[test]
fn pivot_match_merges_in_place_and_keeps_identity() {
    let persisted = vec![persisted_task(7, "verify-identity")];
    let mut submitted = task("verify-identity");
    submitted.active = false;
    submitted.assigned_group = Some("back-office".to_string());

    let result = reconcile(&persisted, &[submitted.clone()]).expect("reconcile succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, Some(ElementId(7)));
    assert!(!result[0].active);
    assert_eq!(result[0].assigned_group.as_deref(), Some("back-office"));
}

#[test]
fn unmatched_candidates_are_inserted_with_cleared_identity() {
    let mut submitted = task("advise");
    // A stale identity from the client must not survive the insert.
    submitted.id = Some(ElementId(99));

    let result = reconcile(&[], &[submitted]).expect("reconcile succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, None);
    assert_eq!(result[0].step_id, "advise");
}

#[test]
fn elements_absent_from_desired_are_removed() {
    let persisted = vec![persisted_task(7, "verify-identity")];

    let result = reconcile(&persisted, &[]).expect("reconcile succeeds");

    assert!(result.is_empty());
}

#[test]
fn unchanged_desired_set_leaves_collection_untouched() {
    let persisted = vec![persisted_task(7, "verify-identity"), persisted_task(8, "advise")];
    let desired = vec![task("verify-identity"), task("advise")];

    let result = reconcile(&persisted, &desired).expect("reconcile succeeds");

    assert_eq!(result.len(), persisted.len());
    assert_eq!(result[0].id, Some(ElementId(7)));
    assert_eq!(result[1].id, Some(ElementId(8)));
}

#[test]
fn reconcile_is_idempotent() {
    let persisted = vec![persisted_task(7, "verify-identity"), persisted_task(8, "advise")];
    let mut changed = task("verify-identity");
    changed.active = false;
    let desired = vec![changed, task("decide")];

    let once = reconcile(&persisted, &desired).expect("first pass");
    let twice = reconcile(&once, &desired).expect("second pass");

    assert_eq!(once, twice);
}

#[test]
fn mixed_update_merges_inserts_and_removes_in_one_pass() {
    let persisted = vec![persisted_task(7, "verify-identity"), persisted_task(8, "advise")];
    let mut reworked = task("verify-identity");
    reworked.duration_days = Some(15);
    let desired = vec![reworked, task("decide")];

    let result = reconcile(&persisted, &desired).expect("reconcile succeeds");

    assert_eq!(result.len(), 2);
    let verify = result
        .iter()
        .find(|template| template.step_id == "verify-identity")
        .expect("kept template");
    assert_eq!(verify.id, Some(ElementId(7)));
    assert_eq!(verify.duration_days, Some(15));
    let decide = result
        .iter()
        .find(|template| template.step_id == "decide")
        .expect("inserted template");
    assert_eq!(decide.id, None);
    assert!(!result.iter().any(|template| template.step_id == "advise"));
}

#[test]
fn duplicate_pivots_in_desired_are_rejected() {
    let mut duplicate = task("verify-identity");
    duplicate.active = false;
    let desired = vec![task("verify-identity"), duplicate];

    match reconcile(&[], &desired) {
        Err(ReconcileError::DuplicateKey { kind, key }) => {
            assert_eq!(kind, "task template");
            assert_eq!(key, "verify-identity");
        }
        other => panic!("expected duplicate key error, got {other:?}"),
    }
}

#[test]
fn changed_notification_binding_is_replace_not_merge() {
    let mut persisted_binding = binding(10);
    persisted_binding.id = Some(ElementId(3));

    let result =
        reconcile(&[persisted_binding], &[binding(11)]).expect("reconcile succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].template().id, 11);
    assert_eq!(result[0].id, None);
}

#[test]
fn completion_rule_outcome_change_preserves_identity() {
    let mut persisted_rule = completion_rule(1, Some(outcome(3)));
    persisted_rule.id = Some(ElementId(5));

    let result = reconcile(&[persisted_rule], &[completion_rule(1, Some(outcome(4)))])
        .expect("reconcile succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, Some(ElementId(5)));
    assert_eq!(result[0].outcome_type_id, Some(outcome(4)));
}

#[test]
fn sender_removal_and_insert_coexist() {
    let mut old_sender = sender("old@city.example", true);
    old_sender.id = Some(ElementId(1));
    let mut kept_sender = sender("desk@city.example", false);
    kept_sender.id = Some(ElementId(2));

    let desired = vec![sender("desk@city.example", false), sender("new@city.example", true)];
    let result = reconcile(&[old_sender, kept_sender], &desired).expect("reconcile succeeds");

    assert_eq!(result.len(), 2);
    let kept = result
        .iter()
        .find(|entry| entry.email == "desk@city.example")
        .expect("kept sender");
    assert_eq!(kept.id, Some(ElementId(2)));
    let inserted = result
        .iter()
        .find(|entry| entry.email == "new@city.example")
        .expect("inserted sender");
    assert_eq!(inserted.id, None);
}
