use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use wiremock::{
    http::Method,
    matchers::{body_bytes, body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::{Params, SupabaseGateway};
use crate::common_models::{
    claim::{ClaimPriority, ClaimStatus, NewClaim},
    file::UploadFile,
    organisation::{ConsortiumId, UnitId},
    payment::{NewPayment, PaymentStatus},
    session::UserId,
};
use crate::gateway::{error::GatewayError, AuthGateway, DataGateway, StorageGateway};
use crate::http_client::imp::reqwest_client::ReqwestClient;

const ANON_KEY: &str = "anon-key";
const USER_ID: &str = "5f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";
const CONSORTIUM_ID: &str = "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11";

fn gateway(mock_server: &MockServer) -> SupabaseGateway {
    SupabaseGateway::new(
        Params {
            url: mock_server.uri().parse().unwrap(),
            anon_key: ANON_KEY.to_string(),
        },
        Arc::new(ReqwestClient::default()),
    )
}

/// Gateway holding the session of a password sign-in.
async fn signed_in_gateway(mock_server: &MockServer) -> SupabaseGateway {
    Mock::given(method(Method::POST))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "token_type": "bearer",
            "user": { "id": USER_ID, "email": "owner@example.com" }
        })))
        .mount(mock_server)
        .await;

    let gateway = gateway(mock_server);
    gateway
        .sign_in("owner@example.com", "secret")
        .await
        .unwrap();
    gateway
}

fn claim_row(title: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "status": "open",
        "priority": "medium",
        "consortium_id": CONSORTIUM_ID,
        "user_id": USER_ID,
        "created_at": created_at
    })
}

#[tokio::test]
async fn test_sign_in_publishes_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(json!({
            "email": "owner@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": { "id": USER_ID, "email": "owner@example.com" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let mut changes = gateway.subscribe();
    assert!(changes.borrow_and_update().is_none());

    let session = gateway.sign_in("owner@example.com", "secret").await.unwrap();

    assert_eq!("user-token", session.access_token);
    assert_eq!(Some("refresh".to_string()), session.refresh_token);
    assert_eq!(USER_ID.parse::<UserId>().unwrap(), session.user_id());
    assert!(changes.has_changed().unwrap());
    assert_eq!(Some(session.clone()), *changes.borrow_and_update());
    assert_eq!(Some(session), gateway.get_session());
}

#[tokio::test]
async fn test_sign_in_bad_credentials_surfaces_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let error = gateway
        .sign_in("owner@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Status { status: 400, .. }));
    assert_eq!("Invalid login credentials", error.user_message());
    assert!(gateway.get_session().is_none());
}

#[tokio::test]
async fn test_sign_up_pending_confirmation_has_no_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "email": "new@example.com",
            "confirmation_sent_at": "2024-03-01T10:15:00Z"
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let result = gateway.sign_up("new@example.com", "secret").await.unwrap();

    assert!(result.is_none());
    assert!(gateway.get_session().is_none());
}

#[tokio::test]
async fn test_sign_up_duplicate_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "User already registered"
        })))
        .mount(&mock_server)
        .await;

    let error = gateway(&mock_server)
        .sign_up("owner@example.com", "secret")
        .await
        .unwrap_err();

    assert_eq!("User already registered", error.user_message());
}

#[tokio::test]
async fn test_sign_out_clears_session_even_if_backend_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = signed_in_gateway(&mock_server).await;

    assert!(gateway.sign_out().await.is_err());
    assert!(gateway.get_session().is_none());

    // already signed out, nothing is sent
    gateway.sign_out().await.unwrap();
}

#[tokio::test]
async fn test_fetch_claims_newest_first_with_user_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::GET))
        .and(path("/rest/v1/claims"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            claim_row("Second", "2024-03-02T08:00:00+00:00"),
            claim_row("First", "2024-03-01T08:00:00+00:00"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = signed_in_gateway(&mock_server).await;

    let claims = gateway.fetch_claims().await.unwrap();
    let titles: Vec<_> = claims.iter().map(|claim| claim.title.as_str()).collect();
    assert_eq!(vec!["Second", "First"], titles);
}

#[tokio::test]
async fn test_fetch_expense_items_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::GET))
        .and(path("/rest/v1/expense_items"))
        .and(query_param("select", "category,amount"))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "category": "Maintenance", "amount": "1000" },
            { "category": "Maintenance", "amount": 500 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = gateway(&mock_server).fetch_expense_items().await.unwrap();

    assert_eq!(2, items.len());
    assert_eq!("Maintenance", items[1].category);
}

#[tokio::test]
async fn test_fetch_rls_denied_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::GET))
        .and(path("/rest/v1/claims"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table claims"
        })))
        .mount(&mock_server)
        .await;

    let error = gateway(&mock_server).fetch_claims().await.unwrap_err();
    assert_eq!("permission denied for table claims", error.user_message());
}

#[tokio::test]
async fn test_fetch_profile_filters_by_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::GET))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{USER_ID}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": USER_ID, "consortium_id": CONSORTIUM_ID, "unit_id": null }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let profile = gateway(&mock_server)
        .fetch_profile(USER_ID.parse().unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(Some(CONSORTIUM_ID.parse().unwrap()), profile.consortium_id);
    assert!(profile.unit_id.is_none());
}

#[tokio::test]
async fn test_insert_claim_returns_representation() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/rest/v1/claims"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{
            "title": "Broken door",
            "status": "open",
            "priority": "medium",
            "consortium_id": CONSORTIUM_ID,
            "user_id": USER_ID
        }])))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([claim_row(
                "Broken door",
                "2024-03-03T09:30:00+00:00"
            )])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let claim = gateway(&mock_server)
        .insert_claim(NewClaim {
            title: "Broken door".to_string(),
            status: ClaimStatus::Open,
            priority: ClaimPriority::Medium,
            consortium_id: CONSORTIUM_ID.parse::<ConsortiumId>().unwrap(),
            user_id: USER_ID.parse().unwrap(),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!("Broken door", claim.title);
}

#[tokio::test]
async fn test_insert_payment_without_representation() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/rest/v1/payments"))
        .and(body_json(json!([{
            "amount": 1250.5,
            "status": "pending",
            "proof_url": "https://cdn.example.com/proof.pdf",
            "user_id": USER_ID,
            "unit_id": "00000000-0000-0000-0000-000000000000"
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payment = gateway(&mock_server)
        .insert_payment(NewPayment {
            amount: 1250.5,
            status: PaymentStatus::Pending,
            proof_url: "https://cdn.example.com/proof.pdf".parse().unwrap(),
            user_id: USER_ID.parse().unwrap(),
            unit_id: UnitId::nil(),
        })
        .await
        .unwrap();

    assert!(payment.is_none());
}

#[tokio::test]
async fn test_upload_and_public_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/storage/v1/object/payment_proofs/1700000000000_receipt.pdf"))
        .and(header("content-type", "application/pdf"))
        .and(body_bytes(b"%PDF-1.4".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "payment_proofs/1700000000000_receipt.pdf"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let stored = gateway
        .upload(
            "payment_proofs",
            "1700000000000_receipt.pdf",
            UploadFile {
                name: "receipt.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: b"%PDF-1.4".to_vec(),
            },
        )
        .await
        .unwrap();

    let url = gateway.public_url(&stored.bucket, &stored.key).unwrap();
    assert_eq!(
        format!(
            "{}/storage/v1/object/public/payment_proofs/1700000000000_receipt.pdf",
            mock_server.uri()
        ),
        url.as_str()
    );
}

#[tokio::test]
async fn test_upload_rejected_by_bucket_policy() {
    let mock_server = MockServer::start().await;

    Mock::given(method(Method::POST))
        .and(path("/storage/v1/object/payment_proofs/key.pdf"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "statusCode": "403",
            "error": "Unauthorized",
            "message": "new row violates row-level security policy"
        })))
        .mount(&mock_server)
        .await;

    let error = gateway(&mock_server)
        .upload(
            "payment_proofs",
            "key.pdf",
            UploadFile {
                name: "key.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: vec![],
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        "new row violates row-level security policy",
        error.user_message()
    );
}
