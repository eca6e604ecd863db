//! Failure kinds of one checkout or confirmation attempt, and the collapse
//! to the single shopper-facing message each of them produces.

/// Error code under which checkout failures are recorded with the host.
pub const GATEWAY_ERROR_CODE: &str = "adyen_error";

pub mod messages {
    pub const PAYMENT_GATEWAY_ERROR: &str = "Payment gateway error.";
    pub const UNABLE_TO_PROCESS_PAYMENT: &str = "Unable to process payment.";
    pub const INVALID_CARD_DATA: &str = "Invalid card data provided.";
    pub const UNABLE_TO_CREATE_PAYMENT_RECORD: &str = "Unable to create payment record.";
    pub const INVALID_GATEWAY_RESPONSE: &str = "Invalid response from payment gateway.";
    pub const PAYMENT_PROCESSING_FAILED: &str = "Payment processing failed. Please try again.";
}

/// Everything that can go wrong in one attempt. None of these are fatal to
/// the host and none leak detail to the shopper; each collapses to a generic
/// message plus a redirect back to checkout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway configuration is incomplete")]
    ConfigurationIncomplete,
    #[error("card data is missing or incomplete")]
    InvalidCardData,
    #[error("payment gateway could not be reached")]
    GatewayUnreachable,
    #[error("payment gateway returned an unreadable response")]
    InvalidGatewayResponse,
    #[error("payment attempt was declined")]
    PaymentDeclined,
    #[error("hosted session could not be created")]
    SessionCreationFailed,
    #[error("confirmation does not match the stored session")]
    SessionMismatch,
    #[error("host order store rejected the operation")]
    OrderStoreFailed,
}

impl GatewayError {
    /// The one generic message the shopper sees for this kind.
    pub fn shopper_message(&self) -> &'static str {
        match self {
            Self::ConfigurationIncomplete | Self::GatewayUnreachable => {
                messages::PAYMENT_GATEWAY_ERROR
            }
            Self::InvalidCardData => messages::INVALID_CARD_DATA,
            Self::InvalidGatewayResponse => messages::INVALID_GATEWAY_RESPONSE,
            Self::PaymentDeclined | Self::SessionMismatch => messages::PAYMENT_PROCESSING_FAILED,
            Self::SessionCreationFailed => messages::UNABLE_TO_PROCESS_PAYMENT,
            Self::OrderStoreFailed => messages::UNABLE_TO_CREATE_PAYMENT_RECORD,
        }
    }
}

/// An error as recorded with the host for display on the checkout page,
/// mirroring the host's error-banner contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub code: &'static str,
    pub message: &'static str,
}

impl From<&GatewayError> for RecordedError {
    fn from(error: &GatewayError) -> Self {
        Self {
            code: GATEWAY_ERROR_CODE,
            message: error.shopper_message(),
        }
    }
}
