//! Marker types for the payment flows the gateway drives against the
//! connector. Each flow pairs with its own request and response data in
//! [`crate::connector_types`].

/// Onsite card payment: one `POST /payments` call.
#[derive(Debug, Clone, Copy)]
pub struct Authorize;

/// Hosted checkout: create a gateway-side session the shopper is redirected
/// to, via `POST /sessions`.
#[derive(Debug, Clone, Copy)]
pub struct CreateSessionToken;

/// Confirmation polling: fetch the final status of a hosted session after
/// the shopper returns.
#[derive(Debug, Clone, Copy)]
pub struct PSync;
