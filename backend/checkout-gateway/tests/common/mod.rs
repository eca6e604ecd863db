//! In-memory doubles for the host collaborators and a canned transport.

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use checkout_gateway::{
    setting_keys, NewOrder, OrderId, OrderStatus, OrderStore, OrderStoreError, SettingsProvider,
    StorefrontPages,
};
use common_utils::request::{Method, Request};
use domain_types::{errors::ApiClientError, router_response_types::Response};
use external_services::service::ApiClient;
use masking::{PeekInterface, Secret};

pub const SIGNING_SECRET: &str = "storefront-signing-secret";

pub fn pages() -> StorefrontPages {
    StorefrontPages {
        checkout_url: "https://shop.example.com/checkout".to_string(),
        success_url: "https://shop.example.com/purchase-confirmation".to_string(),
        confirmation_url: "https://shop.example.com/checkout/confirm".to_string(),
    }
}

pub struct TestSettings {
    values: HashMap<&'static str, String>,
}

impl TestSettings {
    pub fn onsite() -> Self {
        Self::with_payment_mode("onsite")
    }

    pub fn hosted() -> Self {
        Self::with_payment_mode("hosted")
    }

    fn with_payment_mode(payment_mode: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(setting_keys::TEST_MODE, "test".to_string());
        values.insert(setting_keys::API_TEST_KEY, "test_api_key".to_string());
        values.insert(
            setting_keys::MERCHANT_ACCOUNT,
            "TestMerchantAccount".to_string(),
        );
        values.insert(setting_keys::THEME_ID, "theme_12345".to_string());
        values.insert(setting_keys::PAYMENT_MODE, payment_mode.to_string());
        Self { values }
    }
}

impl SettingsProvider for TestSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn signing_secret(&self) -> Secret<String> {
        Secret::new(SIGNING_SECRET.to_string())
    }
}

#[derive(Debug, Default)]
struct OrderRecord {
    status: OrderStatus,
    hosted_session_id: Option<String>,
}

pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<u64, OrderRecord>>,
    next_id: AtomicU64,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed an order the way a previous checkout cycle would have left it.
    pub fn seed(&self, status: OrderStatus, hosted_session_id: Option<&str>) -> OrderId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().unwrap().insert(
            id,
            OrderRecord {
                status,
                hosted_session_id: hosted_session_id.map(str::to_string),
            },
        );
        OrderId::new(id)
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create_pending_order(&self, _order: &NewOrder) -> Result<OrderId, OrderStoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().unwrap().insert(id, OrderRecord::default());
        Ok(OrderId::new(id))
    }

    fn status(&self, order_id: OrderId) -> Result<OrderStatus, OrderStoreError> {
        self.orders
            .lock()
            .unwrap()
            .get(&order_id.get())
            .map(|record| record.status)
            .ok_or(OrderStoreError::NotFound(order_id))
    }

    fn mark_paid(&self, order_id: OrderId) -> Result<(), OrderStoreError> {
        let mut orders = self.orders.lock().unwrap();
        let record = orders
            .get_mut(&order_id.get())
            .ok_or(OrderStoreError::NotFound(order_id))?;
        record.status = OrderStatus::Paid;
        Ok(())
    }

    fn set_hosted_session_id(
        &self,
        order_id: OrderId,
        session_id: &str,
    ) -> Result<(), OrderStoreError> {
        let mut orders = self.orders.lock().unwrap();
        let record = orders
            .get_mut(&order_id.get())
            .ok_or(OrderStoreError::NotFound(order_id))?;
        record.hosted_session_id = Some(session_id.to_string());
        Ok(())
    }

    fn hosted_session_id(&self, order_id: OrderId) -> Result<Option<String>, OrderStoreError> {
        self.orders
            .lock()
            .unwrap()
            .get(&order_id.get())
            .map(|record| record.hosted_session_id.clone())
            .ok_or(OrderStoreError::NotFound(order_id))
    }
}

/// One canned reply of the fake transport.
pub enum CannedReply {
    Success(serde_json::Value),
    ClientError(serde_json::Value),
    Transport,
}

/// A request as the fake transport saw it.
pub struct SentRequest {
    pub url: String,
    pub method: Method,
    pub body: Option<serde_json::Value>,
}

pub struct CannedApiClient {
    replies: Mutex<VecDeque<CannedReply>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl CannedApiClient {
    pub fn new(replies: Vec<CannedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent_requests(&self) -> Vec<SentRequest> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait::async_trait]
impl ApiClient for CannedApiClient {
    async fn send(
        &self,
        request: Request,
    ) -> error_stack::Result<Result<Response, Response>, ApiClientError> {
        let body = request
            .body
            .as_ref()
            .and_then(|content| serde_json::from_str(content.get_inner_value().peek()).ok());
        self.sent.lock().unwrap().push(SentRequest {
            url: request.url.clone(),
            method: request.method,
            body,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned reply left for request");
        match reply {
            CannedReply::Success(value) => Ok(Ok(Response {
                headers: None,
                response: value.to_string().into(),
                status_code: 200,
            })),
            CannedReply::ClientError(value) => Ok(Err(Response {
                headers: None,
                response: value.to_string().into(),
                status_code: 422,
            })),
            CannedReply::Transport => Err(error_stack::report!(
                ApiClientError::RequestTimeoutReceived
            )),
        }
    }
}
