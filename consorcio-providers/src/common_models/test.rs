use std::str::FromStr;

use serde_json::json;
use time::macros::datetime;
use uuid::Uuid;

use super::claim::{Claim, ClaimPriority, ClaimStatus, NewClaim};
use super::expense::ExpenseItem;
use super::organisation::ConsortiumId;
use super::profile::Profile;
use super::session::UserId;

#[test]
fn test_claim_row_deserializes_with_extra_columns() {
    let row = json!({
        "id": "0b1f9a2e-5d7c-4f0e-9a51-6f3c1f3c2d11",
        "title": "Leaking pipe in the garage",
        "status": "resolved",
        "priority": "high",
        "consortium_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
        "user_id": "00000000-0000-0000-0000-000000000000",
        "created_at": "2024-03-01T10:15:00+00:00",
        "updated_at": null
    });

    let claim: Claim = serde_json::from_value(row).unwrap();

    assert_eq!("Leaking pipe in the garage", claim.title);
    assert_eq!(ClaimStatus::Resolved, claim.status);
    assert_eq!(ClaimPriority::High, claim.priority);
    assert!(claim.user_id.is_nil());
    assert_eq!(datetime!(2024-03-01 10:15 UTC), claim.created_at);
}

#[test]
fn test_claim_priority_defaults_to_medium_when_missing() {
    let row = json!({
        "id": "0b1f9a2e-5d7c-4f0e-9a51-6f3c1f3c2d11",
        "title": "Broken light",
        "status": "open",
        "consortium_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
        "user_id": "00000000-0000-0000-0000-000000000000",
        "created_at": "2024-03-01T10:15:00.123456+00:00"
    });

    let claim: Claim = serde_json::from_value(row).unwrap();
    assert_eq!(ClaimPriority::Medium, claim.priority);
}

#[test]
fn test_claim_rows_with_null_priority_decode() {
    let rows = json!([
        {
            "id": "0b1f9a2e-5d7c-4f0e-9a51-6f3c1f3c2d11",
            "title": "Broken light",
            "status": "open",
            "priority": null,
            "consortium_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "created_at": "2024-03-02T08:00:00+00:00"
        },
        {
            "id": "6a1d0c1e-2f43-4b8e-8c1d-0f5a7d9e3b22",
            "title": "Leaking pipe",
            "status": "open",
            "priority": "low",
            "consortium_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "created_at": "2024-03-01T08:00:00+00:00"
        }
    ]);

    let claims: Vec<Claim> = serde_json::from_value(rows).unwrap();

    assert_eq!(2, claims.len());
    assert_eq!(ClaimPriority::Medium, claims[0].priority);
    assert_eq!(ClaimPriority::Low, claims[1].priority);
}

#[test]
fn test_new_claim_serializes_wire_names() {
    let claim = NewClaim {
        title: "Noise".to_string(),
        status: ClaimStatus::Open,
        priority: ClaimPriority::Medium,
        consortium_id: ConsortiumId::from_str("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11").unwrap(),
        user_id: UserId::nil(),
    };

    assert_eq!(
        json!({
            "title": "Noise",
            "status": "open",
            "priority": "medium",
            "consortium_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
            "user_id": "00000000-0000-0000-0000-000000000000"
        }),
        serde_json::to_value(&claim).unwrap()
    );

    let local = claim.clone().into_local_claim();
    assert_eq!(claim.title, local.title);
    assert_eq!(claim.consortium_id, local.consortium_id);
}

#[test]
fn test_status_strings() {
    assert_eq!("open", ClaimStatus::Open.to_string());
    assert_eq!(ClaimStatus::Resolved, ClaimStatus::from_str("resolved").unwrap());
}

#[test]
fn test_expense_item_keeps_raw_amount() {
    let items: Vec<ExpenseItem> = serde_json::from_value(json!([
        { "category": "Maintenance", "amount": "1000" },
        { "category": "Cleaning", "amount": 250.5 },
        { "category": "Security" }
    ]))
    .unwrap();

    assert_eq!(json!("1000"), items[0].amount);
    assert_eq!(json!(250.5), items[1].amount);
    assert!(items[2].amount.is_null());
}

#[test]
fn test_profile_with_missing_ids() {
    let id = Uuid::new_v4();
    let profile: Profile = serde_json::from_value(json!({ "id": id })).unwrap();

    assert_eq!(UserId::from(id), profile.id);
    assert!(profile.consortium_id.is_none());
    assert!(profile.unit_id.is_none());
}
