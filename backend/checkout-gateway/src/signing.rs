//! Tamper-evident return URLs. The URL handed to the gateway at request
//! time carries the confirmation marker, the order id, and an HMAC token
//! binding the two; the confirmation handler refuses anything it did not
//! issue.

use masking::{PeekInterface, Secret};
use ring::hmac;

use crate::{errors::GatewayError, order::OrderId, settings::GATEWAY_ID};

pub mod query_keys {
    pub const CONFIRMATION_MARKER: &str = "payment-confirmation";
    pub const PAYMENT_ID: &str = "payment-id";
    pub const TOKEN: &str = "payment-token";
}

pub struct ReturnUrlSigner {
    key: hmac::Key,
}

impl ReturnUrlSigner {
    pub fn new(secret: &Secret<String>) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.peek().as_bytes()),
        }
    }

    fn message(order_id: OrderId) -> String {
        format!("{}:{}:{}", query_keys::CONFIRMATION_MARKER, GATEWAY_ID, order_id)
    }

    pub fn token(&self, order_id: OrderId) -> String {
        hex::encode(hmac::sign(&self.key, Self::message(order_id).as_bytes()))
    }

    pub fn verify(&self, order_id: OrderId, token: &str) -> bool {
        let Ok(tag) = hex::decode(token) else {
            return false;
        };
        hmac::verify(&self.key, Self::message(order_id).as_bytes(), &tag).is_ok()
    }

    /// Build the signed return URL for one order on top of the host's
    /// confirmation page URL.
    pub fn build_return_url(
        &self,
        confirmation_url: &str,
        order_id: OrderId,
    ) -> Result<String, GatewayError> {
        let mut url = url::Url::parse(confirmation_url)
            .map_err(|_| GatewayError::ConfigurationIncomplete)?;
        url.query_pairs_mut()
            .append_pair(query_keys::CONFIRMATION_MARKER, GATEWAY_ID)
            .append_pair(query_keys::PAYMENT_ID, &order_id.to_string())
            .append_pair(query_keys::TOKEN, &self.token(order_id));
        Ok(url.into())
    }
}
