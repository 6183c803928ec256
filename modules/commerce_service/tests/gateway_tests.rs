//! Paystack and Flutterwave clients against a mock HTTP server

mod common;

use commerce_service::domain::{ChargeRequest, GatewayError, PaymentGateway};
use commerce_service::infra::payments::{http_client, FlutterwaveGateway, PaystackGateway};
use common::{dec, print_test_header};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const KEY: &str = "sk_test_123";

fn charge() -> ChargeRequest {
    ChargeRequest {
        reference: "IDGM-1700000000000-AB12CD34".to_string(),
        email: "payer@example.com".to_string(),
        amount: dec("1500.50"),
        currency: "NGN".to_string(),
        callback_url: Some("https://shop.example.com/callback".to_string()),
        metadata: json!({"orderId": null}),
    }
}

fn paystack(server: &MockServer, key: Option<&str>) -> PaystackGateway {
    let client = http_client(Duration::from_secs(2)).expect("client builds");
    PaystackGateway::new(client, &server.base_url(), key.map(str::to_string))
        .expect("gateway builds")
}

fn flutterwave(server: &MockServer, key: Option<&str>) -> FlutterwaveGateway {
    let client = http_client(Duration::from_secs(2)).expect("client builds");
    FlutterwaveGateway::new(client, &server.base_url(), key.map(str::to_string))
        .expect("gateway builds")
}

#[tokio::test]
async fn test_paystack_initialize_sends_kobo_and_returns_redirect() {
    print_test_header(
        "test_paystack_initialize_sends_kobo_and_returns_redirect",
        "Amounts go out in minor units with the bearer key and our reference",
    );
    let server = MockServer::start_async().await;
    let init = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/transaction/initialize")
                .header("authorization", format!("Bearer {}", KEY))
                .body_includes("\"amount\":150050")
                .body_includes("IDGM-1700000000000-AB12CD34");
            then.status(200).json_body(json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/abc",
                    "access_code": "abc",
                    "reference": "IDGM-1700000000000-AB12CD34"
                }
            }));
        })
        .await;

    let session = paystack(&server, Some(KEY))
        .initialize(&charge())
        .await
        .expect("initialize");

    init.assert_async().await;
    assert_eq!(session.authorization_url, "https://checkout.paystack.com/abc");
    assert_eq!(
        session.provider_reference.as_deref(),
        Some("IDGM-1700000000000-AB12CD34")
    );
    assert_eq!(session.raw["access_code"], "abc");
}

#[tokio::test]
async fn test_paystack_verify_reads_transaction_status() {
    let server = MockServer::start_async().await;
    let verify = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transaction/verify/IDGM-1-OK")
                .header("authorization", format!("Bearer {}", KEY));
            then.status(200).json_body(json!({
                "status": true,
                "message": "Verification successful",
                "data": {"status": "success", "amount": 150050}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/transaction/verify/IDGM-1-ABANDONED");
            then.status(200).json_body(json!({
                "status": true,
                "message": "Verification successful",
                "data": {"status": "abandoned"}
            }));
        })
        .await;
    let gateway = paystack(&server, Some(KEY));

    let ok = gateway.verify("IDGM-1-OK").await.expect("verify");
    let abandoned = gateway.verify("IDGM-1-ABANDONED").await.expect("verify");

    verify.assert_async().await;
    assert!(ok.succeeded);
    assert_eq!(ok.raw["amount"], 150050);
    assert!(!abandoned.succeeded);
}

#[tokio::test]
async fn test_paystack_error_status_is_rejected() {
    print_test_header(
        "test_paystack_error_status_is_rejected",
        "Non-2xx replies surface the provider message as a rejection",
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/transaction/initialize");
            then.status(401)
                .json_body(json!({"status": false, "message": "Invalid key"}));
        })
        .await;

    let err = paystack(&server, Some(KEY))
        .initialize(&charge())
        .await
        .unwrap_err();

    let GatewayError::Rejected(message) = err else {
        panic!("expected rejection");
    };
    assert!(message.contains("401"));
    assert!(message.contains("Invalid key"));
}

#[tokio::test]
async fn test_paystack_false_envelope_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/transaction/initialize");
            then.status(200)
                .json_body(json!({"status": false, "message": "Duplicate Transaction Reference"}));
        })
        .await;

    let err = paystack(&server, Some(KEY))
        .initialize(&charge())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected("Duplicate Transaction Reference".to_string())
    );
}

#[tokio::test]
async fn test_missing_secret_key_never_calls_provider() {
    print_test_header(
        "test_missing_secret_key_never_calls_provider",
        "Blank or absent keys fail before any HTTP request",
    );
    let server = MockServer::start_async().await;

    for key in [None, Some("   ")] {
        let err = paystack(&server, key).initialize(&charge()).await.unwrap_err();
        assert_eq!(err, GatewayError::MissingSecretKey);

        let err = flutterwave(&server, key).verify("IDGM-1-X").await.unwrap_err();
        assert_eq!(err, GatewayError::MissingSecretKey);
    }
}

#[tokio::test]
async fn test_flutterwave_initialize_uses_tx_ref_and_major_units() {
    print_test_header(
        "test_flutterwave_initialize_uses_tx_ref_and_major_units",
        "Flutterwave takes major units and returns the hosted link",
    );
    let server = MockServer::start_async().await;
    let init = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v3/payments")
                .header("authorization", format!("Bearer {}", KEY))
                .body_includes("\"tx_ref\":\"IDGM-1700000000000-AB12CD34\"")
                .body_includes("\"amount\":1500.5")
                .body_includes("payer@example.com");
            then.status(200).json_body(json!({
                "status": "success",
                "message": "Hosted Link",
                "data": {"link": "https://checkout.flutterwave.com/v3/hosted/pay/xyz"}
            }));
        })
        .await;

    let session = flutterwave(&server, Some(KEY))
        .initialize(&charge())
        .await
        .expect("initialize");

    init.assert_async().await;
    assert_eq!(
        session.authorization_url,
        "https://checkout.flutterwave.com/v3/hosted/pay/xyz"
    );
    assert!(session.provider_reference.is_none());
}

#[tokio::test]
async fn test_flutterwave_verify_by_reference() {
    let server = MockServer::start_async().await;
    let verify = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v3/transactions/verify_by_reference")
                .query_param("tx_ref", "IDGM-1-OK");
            then.status(200).json_body(json!({
                "status": "success",
                "message": "Transaction fetched successfully",
                "data": {"status": "successful", "flw_ref": "FLW-1"}
            }));
        })
        .await;

    let result = flutterwave(&server, Some(KEY))
        .verify("IDGM-1-OK")
        .await
        .expect("verify");

    verify.assert_async().await;
    assert!(result.succeeded);
    assert_eq!(result.raw["flw_ref"], "FLW-1");
}

#[tokio::test]
async fn test_flutterwave_error_envelope_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v3/transactions/verify_by_reference");
            then.status(400)
                .json_body(json!({"status": "error", "message": "No transaction was found"}));
        })
        .await;

    let err = flutterwave(&server, Some(KEY))
        .verify("IDGM-1-MISSING")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Rejected(m) if m.contains("No transaction was found")));
}

#[test]
fn test_base_url_must_be_http() {
    let client = http_client(Duration::from_secs(1)).expect("client builds");
    assert!(PaystackGateway::new(client.clone(), "ftp://paystack.local", None).is_err());
    assert!(FlutterwaveGateway::new(client, "not a url", None).is_err());
}
