mod common;

use personnel_guard::policy::{
    build_center_filter, build_optional_center_filter, can_access_center, can_access_record,
    describe_transfer, is_hq, validate_center_access, PolicyError,
};
use personnel_guard::types::{center_id_from_json, AccessScope};
use serde_json::json;

const HQ: Option<&str> = None;

#[test]
fn scope_matrix() {
    assert!(can_access_center(HQ, Some("C9"), AccessScope::AllCenters));
    assert!(can_access_center(HQ, HQ, AccessScope::OwnCenter));
    assert!(!can_access_center(HQ, Some("C1"), AccessScope::OwnCenter));
    assert!(can_access_center(Some("C1"), Some("C1"), AccessScope::OwnCenter));
    assert!(!can_access_center(Some("C1"), Some("C2"), AccessScope::OwnCenter));
}

#[test]
fn json_missing_and_null_centers_compare_as_hq() {
    let missing = json!({ "id": "E1" });
    let null = json!({ "id": "E2", "centerId": null });
    let a = center_id_from_json(&missing, "centerId");
    let b = center_id_from_json(&null, "centerId");
    assert!(is_hq(a.as_deref()) && is_hq(b.as_deref()));
    assert!(can_access_center(a.as_deref(), b.as_deref(), AccessScope::OwnCenter));
}

#[test]
fn validate_fails_fast_with_forbidden() {
    let err = validate_center_access(Some("C1"), HQ, AccessScope::OwnCenter).unwrap_err();
    assert_eq!(err, PolicyError::Forbidden("no access to this center's data".to_string()));
}

#[test]
fn filters_for_query_layers() {
    assert_eq!(
        build_center_filter("t1", Some("C1"), AccessScope::AllCenters).where_clause(),
        json!({ "tenantId": "t1" })
    );
    assert_eq!(
        build_center_filter("t1", Some("C1"), AccessScope::OwnRecords).where_clause(),
        json!({ "tenantId": "t1", "centerId": "C1" })
    );
    assert_eq!(
        build_optional_center_filter("t1", HQ, AccessScope::OwnCenter).where_clause(),
        json!({ "tenantId": "t1", "centerId": null })
    );
    assert_eq!(
        build_optional_center_filter("t1", Some("C2"), AccessScope::OwnCenter).where_clause(),
        json!({ "tenantId": "t1", "centerId": "C2" })
    );
}

#[test]
fn hq_caller_filter_is_pinned_to_head_office() {
    let filter = build_center_filter("t1", HQ, AccessScope::OwnCenter);
    assert_eq!(filter.where_clause(), json!({ "tenantId": "t1", "centerId": null }));
    assert!(!filter.matches(&json!({ "tenantId": "t1", "centerId": "C1" })));
    assert!(filter.matches(&json!({ "tenantId": "t1", "centerId": null })));
}

#[test]
fn filter_never_wider_than_center_predicate() {
    let centers = [HQ, Some("C1"), Some("C2")];
    for scope in [AccessScope::AllCenters, AccessScope::OwnCenter] {
        for caller in centers {
            let filter = build_center_filter("t1", caller, scope);
            for target in centers {
                let record = match target {
                    Some(id) => json!({ "tenantId": "t1", "centerId": id }),
                    None => json!({ "tenantId": "t1" }),
                };
                assert_eq!(
                    filter.matches(&record),
                    can_access_center(caller, target, scope),
                    "caller={:?} target={:?} scope={}",
                    caller,
                    target,
                    scope
                );
            }
        }
    }
}

#[test]
fn record_access_follows_effective_scope() {
    let hq_officer = common::caller(HQ, AccessScope::OwnCenter, 30, "E7");
    assert!(can_access_record(&hq_officer, Some("E1"), HQ));
    assert!(!can_access_record(&hq_officer, Some("E1"), Some("C1")));

    let admin = common::caller(Some("C1"), AccessScope::AllCenters, 90, "E2");
    assert!(can_access_record(&admin, Some("E1"), Some("C3")));

    let employee = common::caller(Some("C1"), AccessScope::OwnRecords, 10, "E3");
    assert!(can_access_record(&employee, Some("E3"), Some("C1")));
    assert!(!can_access_record(&employee, Some("E4"), Some("C1")));
}

#[test]
fn transfer_validity() {
    let hq_to_hq = describe_transfer(HQ, HQ);
    assert!(!hq_to_hq.is_valid);
    assert!(hq_to_hq.error.is_some());

    let same = describe_transfer(Some("C1"), Some("C1"));
    assert!(!same.is_valid);
    assert_ne!(same.error, hq_to_hq.error);

    assert!(describe_transfer(HQ, Some("C1")).is_valid);
    assert!(describe_transfer(Some("C1"), Some("C2")).is_valid);
}
