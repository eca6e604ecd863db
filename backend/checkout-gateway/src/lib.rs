//! Storefront-facing orchestration for the Adyen checkout gateway.
//!
//! The host storefront owns orders, cart state, settings storage and page
//! rendering; this crate owns the payment request/response choreography in
//! between: resolve configuration, create the pending order, drive the
//! connector, and map the result back onto host actions (mark the order
//! paid, redirect the browser, surface a checkout error).

pub mod checkout;
pub mod config;
pub mod confirmation;
pub mod errors;
pub mod logger;
pub mod order;
pub mod settings;
pub mod signing;

pub use checkout::{CardFields, CheckoutOutcome, PaymentOrchestrator, PurchaseData, StorefrontPages};
pub use config::{AdyenConfig, GatewayMode, ProcessingStyle, ADYEN_TEST_ENDPOINT};
pub use confirmation::{ConfirmationOutcome, ReturnQuery};
pub use errors::{GatewayError, RecordedError};
pub use order::{NewOrder, OrderId, OrderStatus, OrderStore, OrderStoreError};
pub use settings::{
    gateway_registration, setting_keys, settings_descriptors, SettingsProvider, GATEWAY_ID,
};
