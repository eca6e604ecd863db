//! Return-navigation behavior: the corrected session guard, idempotent
//! replays, and finalization from the polled session status.

mod common;

use checkout_gateway::{
    errors::messages, signing::ReturnUrlSigner, ConfirmationOutcome, OrderId, OrderStatus,
    OrderStore, PaymentOrchestrator, ReturnQuery,
};
use common::{pages, CannedApiClient, CannedReply, InMemoryOrderStore, TestSettings, SIGNING_SECRET};
use masking::Secret;
use serde_json::json;

const SESSION_ID: &str = "CS451F2AB1ED897A94";

fn token_for(order_id: OrderId) -> String {
    ReturnUrlSigner::new(&Secret::new(SIGNING_SECRET.to_string())).token(order_id)
}

fn query_for(order_id: OrderId, session_id: &str) -> ReturnQuery {
    ReturnQuery {
        confirmation_marker: Some("adyen".to_string()),
        payment_id: Some(order_id.to_string()),
        session_id: Some(session_id.to_string()),
        session_result: Some("Ab02b4c0".to_string()),
        token: Some(token_for(order_id)),
    }
}

#[tokio::test]
async fn completed_session_marks_order_paid() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![CannedReply::Success(json!({
        "id": SESSION_ID,
        "status": "completed"
    }))]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&query_for(order_id, SESSION_ID))
        .await;

    assert_eq!(
        outcome,
        ConfirmationOutcome::Completed {
            redirect_url: "https://shop.example.com/purchase-confirmation".to_string(),
        }
    );
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Paid);

    let sent = client.sent_requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].url,
        format!(
            "https://checkout-test.adyen.com/v71/sessions/{SESSION_ID}?sessionResult=Ab02b4c0"
        )
    );
    assert_eq!(sent[0].method, common_utils::request::Method::Get);
}

#[tokio::test]
async fn replayed_confirmation_leaves_paid_order_paid_without_calling_the_gateway() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Paid, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&query_for(order_id, SESSION_ID))
        .await;

    assert_eq!(
        outcome,
        ConfirmationOutcome::Completed {
            redirect_url: "https://shop.example.com/purchase-confirmation".to_string(),
        }
    );
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Paid);
    assert_eq!(client.sent_count(), 0);
}

#[tokio::test]
async fn mismatched_session_id_aborts_without_calling_the_gateway() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&query_for(order_id, "CS_someone_elses_session"))
        .await;

    assert_eq!(client.sent_count(), 0);
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Pending);
    match outcome {
        ConfirmationOutcome::Failed { error, .. } => {
            assert_eq!(error.message, messages::PAYMENT_PROCESSING_FAILED);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_payment_id_aborts_without_state_change() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let query = ReturnQuery {
        payment_id: None,
        ..query_for(order_id, SESSION_ID)
    };
    let outcome = orchestrator.handle_return_navigation(&query).await;

    assert!(matches!(outcome, ConfirmationOutcome::Failed { .. }));
    assert_eq!(client.sent_count(), 0);
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Pending);
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let other_order = OrderId::new(999);
    let query = ReturnQuery {
        token: Some(token_for(other_order)),
        ..query_for(order_id, SESSION_ID)
    };
    let outcome = orchestrator.handle_return_navigation(&query).await;

    assert!(matches!(outcome, ConfirmationOutcome::Failed { .. }));
    assert_eq!(client.sent_count(), 0);
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Pending);
}

#[tokio::test]
async fn navigation_without_signal_parameters_is_ignored() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let client = CannedApiClient::new(vec![]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&ReturnQuery::default())
        .await;

    assert_eq!(outcome, ConfirmationOutcome::NotApplicable);
    assert_eq!(client.sent_count(), 0);
}

#[tokio::test]
async fn non_completed_status_keeps_order_pending() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![CannedReply::Success(json!({
        "id": SESSION_ID,
        "status": "expired"
    }))]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&query_for(order_id, SESSION_ID))
        .await;

    assert_eq!(client.sent_count(), 1);
    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Pending);
    match outcome {
        ConfirmationOutcome::Failed {
            redirect_url,
            error,
        } => {
            assert_eq!(
                redirect_url,
                "https://shop.example.com/checkout?payment-mode=adyen"
            );
            assert_eq!(error.message, messages::PAYMENT_PROCESSING_FAILED);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_during_polling_keeps_order_pending() {
    let settings = TestSettings::hosted();
    let orders = InMemoryOrderStore::new();
    let order_id = orders.seed(OrderStatus::Pending, Some(SESSION_ID));
    let client = CannedApiClient::new(vec![CannedReply::Transport]);
    let orchestrator = PaymentOrchestrator::new(&settings, &orders, &client, pages());

    let outcome = orchestrator
        .handle_return_navigation(&query_for(order_id, SESSION_ID))
        .await;

    assert_eq!(orders.status(order_id).unwrap(), OrderStatus::Pending);
    match outcome {
        ConfirmationOutcome::Failed { error, .. } => {
            assert_eq!(error.message, messages::PAYMENT_GATEWAY_ERROR);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn query_parsing_picks_the_gateway_parameters_out_of_the_pairs() {
    let query = ReturnQuery::from_pairs([
        ("payment-confirmation", "adyen"),
        ("payment-id", "42"),
        ("sessionId", SESSION_ID),
        ("sessionResult", "Ab02b4c0"),
        ("payment-token", "deadbeef"),
        ("utm_source", "newsletter"),
    ]);

    assert_eq!(query.confirmation_marker.as_deref(), Some("adyen"));
    assert_eq!(query.payment_id.as_deref(), Some("42"));
    assert_eq!(query.session_id.as_deref(), Some(SESSION_ID));
    assert_eq!(query.session_result.as_deref(), Some("Ab02b4c0"));
    assert_eq!(query.token.as_deref(), Some("deadbeef"));
}
